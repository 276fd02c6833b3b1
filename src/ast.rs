use std::rc::Rc;

use crate::token::Token;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// Short-circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Literal(Value),
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Variable(Token),
    Call {
        callee: Box<Expr>,
        /// Closing paren, kept for error line numbers.
        paren: Token,
        arguments: Vec<Expr>,
    },
    /// Anonymous `fun (params) { body }`; its declaration never has a name.
    Lambda(Rc<FunctionDecl>),
}

/// A function's parameters and body, shared between the tree and every
/// closure created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Option<Token>,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_ref().map_or("anonymous", |name| name.lexeme.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Expression(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Break,
    Continue,
    Function(Rc<FunctionDecl>),
    Return(Option<Expr>),
    /// Stands in for a declaration that failed to parse.
    Empty,
}
