#![allow(dead_code)]

use rlox::diagnostic::Diagnostics;
use rlox::Interpreter;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// In-memory sink handed to the interpreter in place of stdout. Clones
/// share the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Outcome {
    pub output: String,
    pub diagnostics: Diagnostics,
}

impl Outcome {
    pub fn stderr(&self) -> String {
        self.diagnostics.render(false)
    }
}

pub fn capturing_interpreter() -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    (interpreter, buffer)
}

/// Run a program in a fresh interpreter, collecting what it printed.
pub fn run_program(source: &str) -> Outcome {
    let (mut interpreter, buffer) = capturing_interpreter();
    let diagnostics = interpreter.run(source);
    Outcome {
        output: buffer.contents(),
        diagnostics,
    }
}

/// Run a program that must finish without any diagnostics; returns its output.
pub fn run_ok(source: &str) -> String {
    let outcome = run_program(source);
    assert!(
        outcome.diagnostics.is_clean(),
        "program reported errors:\n{}",
        outcome.stderr()
    );
    outcome.output
}

/// Run a program that must fail at runtime; returns the rendered error.
pub fn run_runtime_error(source: &str) -> String {
    let outcome = run_program(source);
    assert!(
        !outcome.diagnostics.had_error(),
        "program had syntax errors:\n{}",
        outcome.stderr()
    );
    assert!(outcome.diagnostics.had_runtime_error(), "program finished without a runtime error");
    outcome.stderr()
}

/// Run a program that must fail to parse; returns one line per syntax error.
pub fn syntax_errors(source: &str) -> Vec<String> {
    let outcome = run_program(source);
    assert!(outcome.diagnostics.had_error(), "program parsed cleanly");
    assert_eq!(outcome.output, "", "program with syntax errors produced output");
    outcome.diagnostics.syntax.iter().map(|error| error.to_string()).collect()
}
