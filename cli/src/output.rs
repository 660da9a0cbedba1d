//! Writing command results.
//!
//! Records go out as pretty-printed JSON so they can be piped to `jq`;
//! status messages are plain lines.

use std::io::Write;

use serde::Serialize;

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_json<W, T>(out: &mut W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// # Errors
/// Returns an error if the write fails.
pub fn write_line<W: Write>(out: &mut W, message: &str) -> anyhow::Result<()> {
    writeln!(out, "{message}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_is_pretty_with_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &json!({"slug": "acme"})).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "{\n  \"slug\": \"acme\"\n}\n");
    }
}
