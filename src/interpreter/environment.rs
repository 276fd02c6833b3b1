use crate::interpreter::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One lexical scope. Blocks and calls each get a fresh scope chained to the
/// scope they were entered from (calls chain to the function's closure).
///
/// Scopes are shared through `Rc`, so a closure keeps its defining scope
/// alive for as long as the closure itself is reachable.
#[derive(Debug, Default)]
pub struct Environment {
    values: RefCell<HashMap<String, Value>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: Rc<Environment>) -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            enclosing: Some(enclosing),
        }
    }

    /// Bind a name in this scope, replacing any existing binding. Used for
    /// natives and call parameters.
    pub fn define(&self, name: &str, value: Value) {
        self.values.borrow_mut().insert(name.to_string(), value);
    }

    /// Bind a name in this scope, failing if the scope already has it.
    /// Outer scopes may hold the same name; the new binding shadows them.
    pub fn declare(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let mut values = self.values.borrow_mut();
        if values.contains_key(&name.lexeme) {
            return Err(RuntimeError::redeclared_at(name));
        }
        values.insert(name.lexeme.clone(), value);
        Ok(())
    }

    /// Look a name up, innermost scope first.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.lookup(&name.lexeme)
            .ok_or_else(|| RuntimeError::undefined_variable_at(name))
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(name) {
            return Some(value.clone());
        }
        self.enclosing.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Overwrite the nearest existing binding. Never creates one.
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        {
            let mut values = self.values.borrow_mut();
            if let Some(slot) = values.get_mut(&name.lexeme) {
                *slot = value;
                return Ok(());
            }
        }

        match &self.enclosing {
            Some(parent) => parent.assign(name, value),
            None => Err(RuntimeError::undefined_variable_at(name)),
        }
    }
}
