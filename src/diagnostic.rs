use std::fmt;

use owo_colors::OwoColorize;

use crate::interpreter::RuntimeError;
use crate::token::{Token, TokenKind};

/// Where a syntax error points in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Reported by the lexer, before any token exists.
    Source,
    /// The offending token is the end-of-input sentinel.
    End,
    /// The offending token's lexeme.
    Lexeme(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Source => Ok(()),
            Location::End => f.write_str("at end"),
            Location::Lexeme(lexeme) => write!(f, "at '{}'", lexeme),
        }
    }
}

/// A lexical or syntax error. Never fatal on its own: the lexer and parser
/// collect these and keep going.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl SyntaxError {
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            location: Location::Source,
            message: message.into(),
        }
    }

    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.kind == TokenKind::Eof {
            Location::End
        } else {
            Location::Lexeme(token.lexeme.clone())
        };
        Self {
            line: token.line,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error {}: {}", self.line, self.location, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Everything that went wrong during one run of a program.
///
/// Each run gets its own collector, so a REPL session starts every prompt
/// with a clean slate while the interpreter state carries over.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub syntax: Vec<SyntaxError>,
    pub runtime: Option<RuntimeError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_syntax(&mut self, errors: impl IntoIterator<Item = SyntaxError>) {
        self.syntax.extend(errors);
    }

    pub fn set_runtime(&mut self, error: RuntimeError) {
        self.runtime = Some(error);
    }

    pub fn had_error(&self) -> bool {
        !self.syntax.is_empty()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.runtime.is_some()
    }

    pub fn is_clean(&self) -> bool {
        !self.had_error() && !self.had_runtime_error()
    }

    pub fn render(&self, use_color: bool) -> String {
        DiagnosticRenderer::new(use_color).render(self)
    }
}

/// Renders diagnostics in the fixed one-line formats, optionally colored.
pub struct DiagnosticRenderer {
    use_color: bool,
}

impl DiagnosticRenderer {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn render(&self, diagnostics: &Diagnostics) -> String {
        let mut output = String::new();
        for error in &diagnostics.syntax {
            output.push_str(&self.render_syntax(error));
            output.push('\n');
        }
        if let Some(error) = &diagnostics.runtime {
            output.push_str(&self.render_runtime(error));
            output.push('\n');
        }
        output
    }

    pub fn render_syntax(&self, error: &SyntaxError) -> String {
        format!(
            "[line {}] {} {}: {}",
            error.line,
            self.style_red_bold("Error"),
            error.location,
            error.message
        )
    }

    pub fn render_runtime(&self, error: &RuntimeError) -> String {
        format!("{}\n[line {}]", self.style_red(&error.to_string()), error.line())
    }

    fn style_red(&self, s: &str) -> String {
        if self.use_color {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    fn style_red_bold(&self, s: &str) -> String {
        if self.use_color {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    }
}
