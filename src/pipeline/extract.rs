//! Elapsed-time extraction from serializer-bench output

use crate::error::BenchError;
use regex::Regex;
use std::sync::OnceLock;

const ELAPSED_PATTERN: &str = r"The test took ([0-9]+\.[0-9]+) seconds";

fn elapsed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ELAPSED_PATTERN).expect("elapsed pattern is valid"))
}

/// Parse `The test took <seconds> seconds` out of captured engine output
///
/// The first match wins. Bare integers (`12 seconds`) do not match; the
/// engine always prints a fractional part.
///
/// # Errors
///
/// `UnparsableOutput` carrying the full captured text if no match is found
/// or the matched number is too large to represent.
pub fn extract_elapsed(output: &str) -> Result<f64, BenchError> {
    let unparsable = || BenchError::UnparsableOutput {
        output: output.to_string(),
    };

    let captures = elapsed_regex().captures(output).ok_or_else(unparsable)?;
    let seconds: f64 = captures[1].parse().map_err(|_| unparsable())?;

    // Long enough digit runs parse to infinity
    if !seconds.is_finite() {
        return Err(unparsable());
    }
    Ok(seconds)
}
