use crate::ast::{Expr, FunctionDecl, Stmt};
use crate::diagnostic::Diagnostics;
use crate::format::stringify;
use crate::lexer::{self, ScanResult};
use crate::token::{Token, TokenKind};
use crate::value::{Callable, Value};
use super::builtins;
use super::control_flow::ControlFlow;
use super::environment::Environment;
use super::error::RuntimeError;
use super::parser::{ParseResult, Parser};
use super::stack::ensure_sufficient_stack;
use std::io::{self, Write};
use std::rc::Rc;

/// Deepest nesting of user function calls before a run is aborted with
/// `Stack overflow.`.
pub const MAX_CALL_DEPTH: usize = 4096;

/// Tree-walking evaluator.
///
/// Holds the global scope, the scope currently in effect, and the sink that
/// `print` writes to. The global scope persists across `interpret` calls,
/// which is what lets a REPL build a program up one line at a time.
pub struct Interpreter {
    globals: Rc<Environment>,
    env: Rc<Environment>,
    out: Box<dyn Write>,
    call_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    pub fn with_output(out: Box<dyn Write>) -> Self {
        let globals = Rc::new(Environment::new());
        builtins::install(&globals);
        Self {
            env: Rc::clone(&globals),
            globals,
            out,
            call_depth: 0,
        }
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.lookup(name)
    }

    /// Scan, parse and, if both were clean, execute `source`.
    pub fn run(&mut self, source: &str) -> Diagnostics {
        self.run_parsed(parse_source(source))
    }

    /// Execute an already parsed program unless it has syntax errors.
    pub fn run_parsed(&mut self, parsed: ParseResult) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        diagnostics.extend_syntax(parsed.errors);
        if diagnostics.had_error() {
            tracing::debug!(errors = diagnostics.syntax.len(), "skipping execution after syntax errors");
            return diagnostics;
        }

        if let Err(error) = self.interpret(&parsed.statements) {
            tracing::debug!(line = error.line(), %error, "runtime error");
            diagnostics.set_runtime(error);
        }
        diagnostics
    }

    /// Execute statements in order; the first runtime error stops execution.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        ensure_sufficient_stack(|| self.execute_stmt(stmt))
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        match stmt {
            Stmt::Block(statements) => {
                let scope = Rc::new(Environment::with_enclosing(Rc::clone(&self.env)));
                self.execute_block(statements, scope)
            }
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.env.declare(name, value)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(ControlFlow::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        ControlFlow::Break => break,
                        ControlFlow::Normal | ControlFlow::Continue => {}
                        ControlFlow::Return(value) => return Ok(ControlFlow::Return(value)),
                    }
                }
                Ok(ControlFlow::Normal)
            }
            Stmt::Break => Ok(ControlFlow::Break),
            Stmt::Continue => Ok(ControlFlow::Continue),
            Stmt::Function(declaration) => {
                if let Some(name) = &declaration.name {
                    let function = Callable::function(Rc::clone(declaration), Rc::clone(&self.env));
                    self.env.declare(name, Value::Callable(function))?;
                }
                Ok(ControlFlow::Normal)
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(ControlFlow::Return(value))
            }
            Stmt::Empty => Ok(ControlFlow::Normal),
        }
    }

    /// Run `statements` with `scope` as the current scope. The previous scope
    /// is restored however the block exits.
    fn execute_block(&mut self, statements: &[Stmt], scope: Rc<Environment>) -> Result<ControlFlow, RuntimeError> {
        let previous = std::mem::replace(&mut self.env, scope);
        let result = self.execute_all(statements);
        self.env = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<ControlFlow, RuntimeError> {
        for stmt in statements {
            match self.execute(stmt)? {
                ControlFlow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(ControlFlow::Normal)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.env.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(operator, left, right)
            }
            Expr::Logical { left, operator, right } => {
                let left = self.evaluate(left)?;
                let short_circuits = match operator.kind {
                    TokenKind::Or => left.is_truthy(),
                    _ => !left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Unary { operator, operand } => {
                let operand = self.evaluate(operand)?;
                unary(operator, operand)
            }
            Expr::Variable(name) => self.env.get(name),
            Expr::Call { callee, paren, arguments } => {
                let callee = self.evaluate(callee)?;

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                let callable = match callee {
                    Value::Callable(callable) => callable,
                    _ => return Err(RuntimeError::not_callable_at(paren)),
                };
                if args.len() != callable.arity() {
                    return Err(RuntimeError::arity_mismatch_at(paren, callable.arity(), args.len()));
                }

                self.call(&callable, args, paren)
            }
            Expr::Lambda(declaration) => Ok(self.closure(declaration)),
        }
    }

    fn closure(&self, declaration: &Rc<FunctionDecl>) -> Value {
        Value::Callable(Callable::function(Rc::clone(declaration), Rc::clone(&self.env)))
    }

    fn call(&mut self, callable: &Callable, args: Vec<Value>, paren: &Token) -> Result<Value, RuntimeError> {
        tracing::trace!(callee = callable.name(), args = args.len(), line = paren.line, "call");

        match callable {
            Callable::Function(function) => {
                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(RuntimeError::stack_overflow_at(paren));
                }

                let scope = Rc::new(Environment::with_enclosing(Rc::clone(&function.closure)));
                for (param, arg) in function.declaration.params.iter().zip(args) {
                    scope.define(&param.lexeme, arg);
                }

                self.call_depth += 1;
                let flow = self.execute_block(&function.declaration.body, scope);
                self.call_depth -= 1;

                match flow? {
                    ControlFlow::Return(value) => Ok(value),
                    _ => Ok(Value::Nil),
                }
            }
            Callable::Native(native) => {
                (native.func)(&args, self.out.as_mut()).map_err(|error| RuntimeError::native_at(paren, error.to_string()))
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Plus => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::string(format!("{}{}", stringify(&left), stringify(&right))))
            }
            _ => Err(RuntimeError::type_mismatch_at(
                operator,
                "Operands must be two numbers or two strings.",
            )),
        },
        TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
        TokenKind::BangEqual => Ok(Value::Bool(left != right)),
        _ => {
            let (a, b) = number_operands(operator, &left, &right)?;
            match operator.kind {
                TokenKind::Minus => Ok(Value::Number(a - b)),
                TokenKind::Star => Ok(Value::Number(a * b)),
                TokenKind::StarStar => Ok(Value::Number(a.powf(b))),
                TokenKind::Slash if b == 0.0 => Err(RuntimeError::division_by_zero_at(operator)),
                TokenKind::Slash => Ok(Value::Number(a / b)),
                TokenKind::Greater => Ok(Value::Bool(a > b)),
                TokenKind::GreaterEqual => Ok(Value::Bool(a >= b)),
                TokenKind::Less => Ok(Value::Bool(a < b)),
                TokenKind::LessEqual => Ok(Value::Bool(a <= b)),
                _ => Err(RuntimeError::type_mismatch_at(
                    operator,
                    format!("Unknown binary operator '{}'.", operator.lexeme),
                )),
            }
        }
    }
}

fn unary(operator: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
        _ => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::number_operand_at(operator)),
        },
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::number_operands_at(operator)),
    }
}

/// Scan and parse `source`, lexical errors first.
pub fn parse_source(source: &str) -> ParseResult {
    parse_tokens(lexer::scan(source))
}

/// Parse an already scanned source, lexical errors first.
pub fn parse_tokens(scanned: ScanResult) -> ParseResult {
    let mut errors = scanned.errors;
    let parsed = Parser::new(scanned.tokens).parse();
    errors.extend(parsed.errors);
    ParseResult {
        statements: parsed.statements,
        errors,
    }
}

/// Run a whole program in a fresh interpreter writing to `out`.
pub fn run_source(source: &str, out: Box<dyn Write>) -> Diagnostics {
    Interpreter::with_output(out).run(source)
}
