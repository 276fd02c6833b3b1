//! Native functions installed into the global scope of every interpreter.
//!
//! - **IO**: `print`
//! - **Time**: `clock`

mod io;
mod time;

pub use io::native_print;
pub use time::native_clock;

use super::environment::Environment;
use crate::value::{Callable, NativeFn, Value};

/// Name, arity and host routine of every native.
pub const NATIVES: &[(&str, usize, NativeFn)] = &[("clock", 0, native_clock), ("print", 1, native_print)];

/// Bind every native by name, silently replacing any existing binding.
pub fn install(globals: &Environment) {
    for &(name, arity, func) in NATIVES {
        globals.define(name, Value::Callable(Callable::native(name, arity, func)));
    }
}
