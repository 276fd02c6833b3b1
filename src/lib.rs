pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod format;
pub mod interpreter;
pub mod lexer;
pub mod token;
pub mod value;

pub use ast::{Expr, FunctionDecl, Stmt};
pub use diagnostic::Diagnostics;
pub use interpreter::{Interpreter, RuntimeError};
pub use token::{Token, TokenKind};
pub use value::Value;
