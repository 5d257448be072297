//! Progress reporting for council sessions

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::Phase;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_title(phase: &Phase) -> String {
        format!("Stage {}: {}", phase.number(), phase.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_title(phase));
        pb.set_message("Waiting for nodes...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("Stage {} complete", phase.number()).green().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        println!(
            "{} {} ({} calls)",
            "->".cyan(),
            ProgressReporter::phase_title(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, label: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), label);
        } else {
            println!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_titles() {
        assert_eq!(
            ProgressReporter::phase_title(&Phase::Opinions),
            "Stage 1: Initial Opinions"
        );
        assert_eq!(
            ProgressReporter::phase_title(&Phase::Synthesis),
            "Stage 3: Chairman Synthesis"
        );
    }

    #[test]
    fn test_reporter_survives_out_of_order_calls() {
        let reporter = ProgressReporter::new();
        reporter.on_task_complete(&Phase::Review, "Reviewer:Council_1", true);
        reporter.on_phase_complete(&Phase::Review);

        reporter.on_phase_start(&Phase::Review, 2);
        reporter.on_task_complete(&Phase::Review, "Reviewer:Council_1", true);
        reporter.on_task_complete(&Phase::Review, "Reviewer:Council_2", false);
        reporter.on_phase_complete(&Phase::Review);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
