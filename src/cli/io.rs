//! stdin/stdout handling for CLI
//!
//! - Input: a single JSON object on one line of stdin
//! - Output: a JSON status object, or raw feed XML for `render`
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON request from stdin
pub fn read_request() -> CliResult<Value> {
    read_request_from(&mut io::stdin().lock())
}

fn read_request_from<R: BufRead>(reader: &mut R) -> CliResult<Value> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&line)?;
    Ok(value)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(&mut io::stdout(), code, message)
}

fn write_error_to<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write a rendered document to stdout as-is
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_request_parses_first_line() {
        let mut input = io::Cursor::new("{\"message\":\"boom\"}\nignored\n");
        let value = read_request_from(&mut input).unwrap();
        assert_eq!(value["message"], "boom");
    }

    #[test]
    fn test_write_error_is_one_json_line() {
        let mut out = Vec::new();
        write_error_to(&mut out, "ERRDIGEST_CLI_LOG_FAILED", "disk full").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let value: Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "ERRDIGEST_CLI_LOG_FAILED");
        assert_eq!(value["message"], "disk full");
    }

    #[test]
    fn test_read_request_rejects_empty_input() {
        let mut input = io::Cursor::new("\n");
        assert!(read_request_from(&mut input).is_err());
    }
}
