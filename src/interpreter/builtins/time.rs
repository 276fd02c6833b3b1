use crate::value::Value;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, at millisecond resolution.
pub fn native_clock(_args: &[Value], _out: &mut dyn Write) -> io::Result<Value> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    Ok(Value::Number(millis as f64 / 1000.0))
}
