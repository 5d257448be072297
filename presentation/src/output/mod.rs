//! Output formatting for session results and health reports

pub mod console;
pub mod formatter;
