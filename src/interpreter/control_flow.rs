use crate::value::Value;

/// How a statement finished. Returns carry their value out of the function
/// body; break and continue stop at the innermost loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    Normal,
    Break,
    Continue,
    Return(Value),
}
