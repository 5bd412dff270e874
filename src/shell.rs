//! Front ends over the parse / compile / match pipeline.
//!
//! - [`run_repl`] prompts for a pattern and a candidate string, repeatedly.
//! - [`run_json`] answers one JSON request per input line.
//!
//! Both take their input and output as parameters so they can be driven
//! from memory in tests.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use serde::{Deserialize, Serialize};

use crate::pattern::render;
use crate::regex::Regex;

/// A JSON check request: `{ "regex": ..., "string": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckRequest {
    pub regex: String,
    #[serde(rename = "string")]
    pub candidate: String,
}

/// The reply to a [`CheckRequest`]: `{ "valid": bool }` or `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CheckResponse {
    Verdict { valid: bool },
    Error { error: String },
}

/// Run one request through the pipeline.
pub fn check(request: &CheckRequest) -> CheckResponse {
    match Regex::new(&request.regex) {
        Ok(re) => CheckResponse::Verdict {
            valid: re.is_match(&request.candidate),
        },
        Err(e) => {
            tracing::debug!(regex = %request.regex, error = %e, "rejected pattern");
            CheckResponse::Error {
                error: e.to_string(),
            }
        }
    }
}

/// Answer line-delimited JSON requests until end of input.
///
/// Blank lines are skipped. A line that is not a valid request, including
/// one that is not UTF-8, gets an error reply; processing continues with the
/// next line.
pub fn run_json<R: BufRead, W: Write>(mut input: R, out: &mut W) -> Result<()> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if input
            .read_until(b'\n', &mut line)
            .context("Failed to read request")?
            == 0
        {
            break;
        }
        if line.trim_ascii().is_empty() {
            continue;
        }
        let response = match serde_json::from_slice::<CheckRequest>(&line) {
            Ok(request) => check(&request),
            Err(e) => CheckResponse::Error {
                error: format!("Invalid request: {e}"),
            },
        };
        serde_json::to_writer(&mut *out, &response).context("Failed to write response")?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}

/// Interactive loop: read a pattern, read a candidate, print the verdict.
///
/// Pattern errors are reported and the loop goes on. End of input ends it.
pub fn run_repl<R: BufRead, W: Write>(mut input: R, out: &mut W, color: bool) -> Result<()> {
    loop {
        let Some(pattern) = prompt(&mut input, out, "Enter regex")? else {
            break;
        };
        let Some(candidate) = prompt(&mut input, out, "Enter string to check")? else {
            break;
        };

        match Regex::new(&pattern) {
            Ok(re) => {
                tracing::debug!(pattern = %render(re.nodes()), nodes = re.nodes().len(), "parsed pattern");
                tracing::debug!("automaton:\n{}", re.automaton());
                writeln!(out, "{}", verdict(re.is_match(&candidate), color))?;
            }
            Err(e) => writeln!(out, "Error while parsing regex: {e}")?,
        }
    }
    Ok(())
}

/// Print `message` and a `> ` prompt, then read one trimmed line.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    writeln!(out, "{message}")?;
    write!(out, "> ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// The verdict line for a match result.
pub fn verdict(valid: bool, color: bool) -> String {
    match (valid, color) {
        (true, false) => "The string is VALID".to_string(),
        (false, false) => "The string is NOT VALID".to_string(),
        (true, true) => format!("The string is {}", "VALID".green().bold()),
        (false, true) => format!("The string is {}", "NOT VALID".red().bold()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(regex: &str, candidate: &str) -> CheckRequest {
        CheckRequest {
            regex: regex.to_string(),
            candidate: candidate.to_string(),
        }
    }

    fn run_json_str(input: &str) -> String {
        let mut out = Vec::new();
        run_json(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run_repl_str(input: &str) -> String {
        let mut out = Vec::new();
        run_repl(input.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    // --- check ---

    #[test]
    fn check_verdicts() {
        assert_eq!(
            check(&request("a*", "aaa")),
            CheckResponse::Verdict { valid: true }
        );
        assert_eq!(
            check(&request("a+", "")),
            CheckResponse::Verdict { valid: false }
        );
    }

    #[test]
    fn check_reports_pattern_errors() {
        assert_eq!(
            check(&request("[]", "x")),
            CheckResponse::Error {
                error: "Empty character class '[]'".to_string()
            }
        );
    }

    // --- JSON front end ---

    #[test]
    fn json_reply_shapes() {
        let out = run_json_str(concat!(
            r#"{"regex": "a|b", "string": "a"}"#,
            "\n",
            r#"{"regex": "a|b", "string": "c"}"#,
            "\n",
        ));
        assert_eq!(out, "{\"valid\":true}\n{\"valid\":false}\n");
    }

    #[test]
    fn json_errors_do_not_stop_processing() {
        let out = run_json_str(concat!(
            "not json\n",
            "\n",
            r#"{"regex": "", "string": "x"}"#,
            "\n",
            r#"{"regex": "x", "string": "x"}"#,
            "\n",
        ));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("{\"error\":\"Invalid request:"));
        assert_eq!(lines[1], "{\"error\":\"Empty pattern\"}");
        assert_eq!(lines[2], "{\"valid\":true}");
    }

    #[test]
    fn json_non_utf8_line_gets_error_reply() {
        let mut out = Vec::new();
        run_json(
            &b"\xff\xfe\n{\"regex\":\"a\",\"string\":\"a\"}\n"[..],
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"error\":\"Invalid request:"));
        assert_eq!(lines[1], "{\"valid\":true}");
    }

    #[test]
    fn json_missing_field_is_invalid_request() {
        let out = run_json_str(r#"{"regex": "a"}"#);
        assert!(out.starts_with("{\"error\":\"Invalid request:"));
    }

    // --- REPL front end ---

    #[test]
    fn repl_prints_verdicts() {
        let out = run_repl_str("a{2}\naa\na{2}\na\n");
        let verdicts: Vec<&str> = out.lines().filter(|l| l.contains("VALID")).collect();
        assert_eq!(
            verdicts,
            vec!["> The string is VALID", "> The string is NOT VALID"]
        );
    }

    #[test]
    fn repl_trims_input_lines() {
        let out = run_repl_str("  ab  \r\nab\n");
        assert!(out.contains("The string is VALID"));
    }

    #[test]
    fn repl_continues_after_error() {
        let out = run_repl_str("(abc\nabc\nabc\nabc\n");
        assert!(out.contains("Error while parsing regex: Missing ')' to close group"));
        assert!(out.contains("The string is VALID"));
    }

    #[test]
    fn repl_stops_at_end_of_input() {
        let out = run_repl_str("abc\n");
        assert_eq!(out, "Enter regex\n> Enter string to check\n> ");
    }

    #[test]
    fn colored_verdict_keeps_text() {
        assert!(verdict(true, true).contains("VALID"));
        assert!(verdict(false, true).contains("NOT VALID"));
    }
}
