//! Output built-in functions.

use crate::format::stringify;
use crate::value::Value;
use std::io::{self, Write};

/// Writes its argument with no trailing newline.
pub fn native_print(args: &[Value], out: &mut dyn Write) -> io::Result<Value> {
    if let Some(value) = args.first() {
        out.write_all(stringify(value).as_bytes())?;
        out.flush()?;
    }
    Ok(Value::Nil)
}
