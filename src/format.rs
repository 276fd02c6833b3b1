use crate::ast::{Expr, FunctionDecl, Stmt};
use crate::value::{Callable, Value};

/// Text form of a value, as written by `print` and by string concatenation.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.to_string(),
        Value::Callable(Callable::Function(function)) => format!("<fn {}>", function.declaration.display_name()),
        Value::Callable(Callable::Native(_)) => "<native fn>".to_string(),
    }
}

/// Integral numbers drop the fractional part: `3`, not `3.0`. Very large
/// and very small magnitudes switch to exponent form, e.g. `1.0E30`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n != 0.0 && (n.abs() >= 1e21 || n.abs() < 1e-7) {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// `1e30` becomes `1.0E30`; the mantissa always carries a fraction.
fn exponent_form(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => formatted,
    }
}

/// Renders an expression in fully parenthesized prefix form, e.g.
/// `(* (- 123) (group 45.67))`.
pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Assign { name, value } => parenthesize("=", &[name.lexeme.clone(), print_expr(value)]),
        Expr::Binary { left, operator, right } | Expr::Logical { left, operator, right } => {
            parenthesize(&operator.lexeme, &[print_expr(left), print_expr(right)])
        }
        Expr::Grouping(inner) => parenthesize("group", &[print_expr(inner)]),
        Expr::Literal(Value::String(s)) => format!("\"{}\"", s),
        Expr::Literal(value) => stringify(value),
        Expr::Unary { operator, operand } => parenthesize(&operator.lexeme, &[print_expr(operand)]),
        Expr::Variable(name) => name.lexeme.clone(),
        Expr::Call { callee, arguments, .. } => {
            let mut parts = vec![print_expr(callee)];
            parts.extend(arguments.iter().map(print_expr));
            parenthesize("call", &parts)
        }
        Expr::Lambda(declaration) => print_function("fun", declaration),
    }
}

pub fn print_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Block(statements) => {
            let parts: Vec<String> = statements.iter().map(print_stmt).collect();
            parenthesize("block", &parts)
        }
        Stmt::Expression(expr) => parenthesize(";", &[print_expr(expr)]),
        Stmt::Var { name, initializer } => match initializer {
            Some(init) => parenthesize("var", &[name.lexeme.clone(), print_expr(init)]),
            None => parenthesize("var", &[name.lexeme.clone()]),
        },
        Stmt::If { condition, then_branch, else_branch } => {
            let mut parts = vec![print_expr(condition), print_stmt(then_branch)];
            if let Some(else_branch) = else_branch {
                parts.push(print_stmt(else_branch));
            }
            parenthesize("if", &parts)
        }
        Stmt::While { condition, body } => parenthesize("while", &[print_expr(condition), print_stmt(body)]),
        Stmt::Break => "(break)".to_string(),
        Stmt::Continue => "(continue)".to_string(),
        Stmt::Function(declaration) => print_function("fun", declaration),
        Stmt::Return(Some(value)) => parenthesize("return", &[print_expr(value)]),
        Stmt::Return(None) => "(return)".to_string(),
        Stmt::Empty => "(empty)".to_string(),
    }
}

/// One statement per line.
pub fn print_program(statements: &[Stmt]) -> String {
    statements
        .iter()
        .map(|stmt| format!("{}\n", print_stmt(stmt)))
        .collect()
}

fn print_function(keyword: &str, declaration: &FunctionDecl) -> String {
    let params: Vec<&str> = declaration.params.iter().map(|param| param.lexeme.as_str()).collect();
    let mut parts = Vec::new();
    if let Some(name) = &declaration.name {
        parts.push(name.lexeme.clone());
    }
    parts.push(format!("({})", params.join(" ")));
    parts.extend(declaration.body.iter().map(print_stmt));
    parenthesize(keyword, &parts)
}

fn parenthesize(name: &str, parts: &[String]) -> String {
    let mut output = String::with_capacity(name.len() + 2);
    output.push('(');
    output.push_str(name);
    for part in parts {
        output.push(' ');
        output.push_str(part);
    }
    output.push(')');
    output
}
