//! Text and JSON rendering of tool results.

use serde::Serialize;

use super::types::ExecutionResult;

/// Text returned when a successful command printed nothing.
pub const NO_OUTPUT_MESSAGE: &str = "Command completed successfully (no output)";

/// Render an [`ExecutionResult`] as a single text block.
///
/// Successful results yield stdout followed by `STDERR: <stderr>` when stderr
/// is non-empty, trimmed. Failures yield `Error: <error>` followed by stderr.
pub fn format_result(result: &ExecutionResult) -> String {
    if result.success {
        let mut output = String::from(result.stdout());
        let stderr = result.stderr();
        if !stderr.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("STDERR: ");
            output.push_str(stderr);
        }

        let trimmed = output.trim();
        if trimmed.is_empty() {
            NO_OUTPUT_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        let error = result.error.as_deref().unwrap_or("Unknown error");
        let stderr = result.stderr();
        if stderr.is_empty() {
            format!("Error: {}", error)
        } else {
            format!("Error: {}\n{}", error, stderr)
        }
    }
}

/// Serialize a tool response as indented JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize response: {}\"}}", e))
}
