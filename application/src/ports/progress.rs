//! Progress notification port
//!
//! Defines the interface for reporting progress during a council session.

use council_domain::Phase;

/// Callback for progress updates during a council session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when one backend call of a phase finishes, in completion order
    fn on_task_complete(&self, phase: &Phase, label: &str, success: bool);

    /// Called when every call of a phase has finished
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _label: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
