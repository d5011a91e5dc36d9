//! Human-readable text output

use crate::pipeline::RunResult;

/// Result line printed on success
pub fn format_result(result: &RunResult) -> String {
    format!("The test took {:.3} seconds.", result.elapsed_secs)
}

/// Print the measured result to stdout
pub fn print_result(result: &RunResult) {
    println!("{}", format_result(result));
}
