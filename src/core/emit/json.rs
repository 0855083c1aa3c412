//! JSON rendering

use crate::domain::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Renders a value as pretty JSON with a 4-space indent and a trailing
/// newline. Non-ASCII text and slashes are written unescaped.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut body, formatter);
    value.serialize(&mut serializer)?;
    body.push(b'\n');
    Ok(body)
}
