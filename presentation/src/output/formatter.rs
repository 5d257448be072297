//! Output formatter trait

use council_domain::SessionResult;

/// Trait for formatting council session results
pub trait OutputFormatter {
    /// Format all three stages
    fn format(&self, result: &SessionResult) -> String;

    /// Format as the JSON envelope
    fn format_json(&self, result: &SessionResult) -> String;

    /// Format the final answer only (concise output)
    fn format_final_only(&self, result: &SessionResult) -> String;
}
