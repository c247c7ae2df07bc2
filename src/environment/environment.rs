use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    #[error("variable {0:?} is not bound in any enclosing scope")]
    Unbound(String),
}

/// One level of the binding chain.
#[derive(Debug, Clone)]
pub struct Scope<T> {
    name: String,
    bindings: HashMap<String, T>,
}

impl<T> Scope<T> {
    pub fn new(name: &str) -> Self {
        Scope {
            name: name.to_string(),
            bindings: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A stack of scopes, innermost last. The global scope at the bottom is
/// never popped.
#[derive(Debug, Clone)]
pub struct Environment<T> {
    scopes: Vec<Scope<T>>,
}

impl<T> Environment<T> {
    pub fn new(global_name: &str) -> Self {
        Environment {
            scopes: vec![Scope::new(global_name)],
        }
    }

    pub fn push_scope(&mut self, name: &str) {
        tracing::trace!(scope = name, depth = self.scopes.len() + 1, "push scope");
        self.scopes.push(Scope::new(name));
    }

    /// Discards the innermost scope and its bindings. Returns `None` when
    /// only the global scope is left.
    pub fn pop_scope(&mut self) -> Option<Scope<T>> {
        if self.scopes.len() == 1 {
            return None;
        }

        let scope = self.scopes.pop();
        if let Some(scope) = &scope {
            tracing::trace!(scope = scope.name(), depth = self.scopes.len(), "pop scope");
        }
        scope
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_scope(&self) -> &Scope<T> {
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn global_scope(&self) -> &Scope<T> {
        &self.scopes[0]
    }

    /// Finds `name`, searching from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.scopes.iter().rev().find_map(|scope| scope.bindings.get(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut T> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(name))
    }

    /// Binds `name` in the innermost scope, replacing any binding of the
    /// same name in that scope.
    pub fn declare(&mut self, name: &str, value: T) -> Option<T> {
        let last = self.scopes.len() - 1;
        self.scopes[last].bindings.insert(name.to_string(), value)
    }

    /// Updates `name` in the scope that owns it.
    pub fn assign(&mut self, name: &str, value: T) -> Result<(), EnvironmentError> {
        match self.lookup_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EnvironmentError::Unbound(name.to_string())),
        }
    }

    /// Updates `name` where it is bound, or declares it in the innermost
    /// scope if it is new.
    pub fn declare_or_assign(&mut self, name: &str, value: T) {
        match self.lookup_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.declare(name, value);
            }
        }
    }
}
