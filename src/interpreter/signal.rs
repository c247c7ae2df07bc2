use super::value::Value;

/// How a statement finished. Anything but `Normal` unwinds to the nearest
/// construct that handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Normal,
    Break,
    Continue,
    Return(Value),
}

impl Signal {
    pub fn is_normal(&self) -> bool {
        matches!(self, Signal::Normal)
    }
}
