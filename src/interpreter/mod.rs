pub mod parser;
pub mod environment;
pub mod error;
pub mod control_flow;
pub mod builtins;
pub mod evaluator;
pub mod stack;

pub use error::RuntimeError;
pub use control_flow::ControlFlow;
pub use environment::Environment;
pub use parser::{Parser, ParseResult};
pub use evaluator::{Interpreter, parse_source, parse_tokens, run_source};
