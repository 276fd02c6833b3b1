use thiserror::Error;

use crate::token::Token;

/// A runtime failure. The first one aborts the current run; the message
/// text is exactly what gets reported, followed by `[line N]`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{message}")]
    TypeMismatch { message: String, line: usize },

    #[error("Division by zero.")]
    DivisionByZero { line: usize },

    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: usize },

    #[error("Variable '{name}' is already declared in this scope.")]
    Redeclared { name: String, line: usize },

    #[error("Can only call functions and classes.")]
    NotCallable { line: usize },

    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch { expected: usize, got: usize, line: usize },

    /// User function calls nested past the interpreter's depth limit.
    #[error("Stack overflow.")]
    StackOverflow { line: usize },

    /// A native function failed (for example, writing to a closed output).
    #[error("{message}")]
    Native { message: String, line: usize },
}

impl RuntimeError {
    pub fn type_mismatch_at(token: &Token, message: impl Into<String>) -> Self {
        Self::TypeMismatch { message: message.into(), line: token.line }
    }

    pub fn number_operand_at(token: &Token) -> Self {
        Self::type_mismatch_at(token, "Operand must be a number.")
    }

    pub fn number_operands_at(token: &Token) -> Self {
        Self::type_mismatch_at(token, "Operands must be numbers.")
    }

    pub fn division_by_zero(line: usize) -> Self {
        Self::DivisionByZero { line }
    }

    pub fn division_by_zero_at(token: &Token) -> Self {
        Self::division_by_zero(token.line)
    }

    pub fn undefined_variable_at(name: &Token) -> Self {
        Self::UndefinedVariable { name: name.lexeme.clone(), line: name.line }
    }

    pub fn redeclared_at(name: &Token) -> Self {
        Self::Redeclared { name: name.lexeme.clone(), line: name.line }
    }

    pub fn not_callable_at(paren: &Token) -> Self {
        Self::NotCallable { line: paren.line }
    }

    pub fn arity_mismatch_at(paren: &Token, expected: usize, got: usize) -> Self {
        Self::ArityMismatch { expected, got, line: paren.line }
    }

    pub fn stack_overflow_at(paren: &Token) -> Self {
        Self::StackOverflow { line: paren.line }
    }

    pub fn native_at(paren: &Token, message: impl Into<String>) -> Self {
        Self::Native { message: message.into(), line: paren.line }
    }

    /// Source line the error is attributed to.
    pub fn line(&self) -> usize {
        match self {
            Self::TypeMismatch { line, .. }
            | Self::DivisionByZero { line }
            | Self::UndefinedVariable { line, .. }
            | Self::Redeclared { line, .. }
            | Self::NotCallable { line }
            | Self::StackOverflow { line }
            | Self::ArityMismatch { line, .. }
            | Self::Native { line, .. } => *line,
        }
    }
}
