use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use crate::ast::FunctionDecl;
use crate::interpreter::environment::Environment;
use crate::token::Literal;

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Callable(Callable),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(left_bool), Value::Bool(right_bool)) => left_bool == right_bool,
            (Value::Number(left_num), Value::Number(right_num)) => left_num == right_num,
            (Value::String(left_str), Value::String(right_str)) => left_str == right_str,
            (Value::Callable(left_fn), Value::Callable(right_fn)) => left_fn == right_fn,
            _ => false,
        }
    }
}

impl Value {
    pub fn string(text: impl AsRef<str>) -> Self {
        Value::String(Rc::from(text.as_ref()))
    }

    /// `nil`, `false`, `0` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Callable(_) => true,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Number(n),
            Literal::String(s) => Value::String(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::stringify(self))
    }
}

/// Host routine behind a native function. Gets the evaluated arguments and
/// the interpreter's output sink; never sees an environment.
pub type NativeFn = fn(&[Value], &mut dyn Write) -> io::Result<Value>;

pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A user-defined function value: the declaration plus the scope that was
/// active when the function value was created.
pub struct Function {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<Environment>,
}

impl fmt::Debug for Function {
    // The closure scope may contain this very function, so it is left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.declaration.display_name())
            .field("arity", &self.declaration.arity())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Callable {
    Function(Rc<Function>),
    Native(Rc<NativeFunction>),
}

impl Callable {
    pub fn function(declaration: Rc<FunctionDecl>, closure: Rc<Environment>) -> Self {
        Callable::Function(Rc::new(Function { declaration, closure }))
    }

    pub fn native(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Callable::Native(Rc::new(NativeFunction { name, arity, func }))
    }

    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(function) => function.declaration.arity(),
            Callable::Native(native) => native.arity,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Callable::Function(function) => function.declaration.display_name(),
            Callable::Native(native) => native.name,
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Function(left_fn), Callable::Function(right_fn)) => Rc::ptr_eq(left_fn, right_fn),
            (Callable::Native(left_fn), Callable::Native(right_fn)) => Rc::ptr_eq(left_fn, right_fn),
            _ => false,
        }
    }
}
