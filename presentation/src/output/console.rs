//! Console output formatter for council results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_application::{HealthReport, NodeHealth, NodeStatus};
use council_domain::{InferenceResult, OutputFormat, SessionReport, SessionResult};

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors off when `enabled` is false; otherwise defer to the terminal
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Render `result` in the requested format
    pub fn render(result: &SessionResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Final => Self::format_final_only(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format all three stages of a session
    pub fn format(result: &SessionResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            result.question
        ));

        output.push_str(&format!(
            "{} {}\n\n",
            "Members:".cyan().bold(),
            result
                .opinions
                .iter()
                .map(|o| format!("{} ({})", o.member, o.result.model))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        output.push_str(&Self::section_header("Stage 1: Initial Opinions"));
        for opinion in &result.opinions {
            output.push_str(&format!(
                "\n{}\n{}\n",
                Self::title(&opinion.member, &opinion.result),
                opinion.result.response_text()
            ));
        }

        output.push_str(&Self::section_header("Stage 2: Peer Review"));
        for review in &result.reviews {
            let heading = format!(
                "── {} reviewed {} (score: {}) ──",
                review.reviewer(),
                review.reviewee(),
                review.score
            );
            let heading = if review.critique.is_success() {
                heading.yellow().bold()
            } else {
                heading.red().bold()
            };
            output.push_str(&format!(
                "\n{}\n{}\n",
                heading,
                review.critique.response_text()
            ));
        }

        if let Some(avg) = result.average_score() {
            output.push_str(&format!(
                "\n{} {:.1}\n",
                "Average rating:".cyan().bold(),
                avg
            ));
        }

        output.push_str(&Self::section_header("Stage 3: Chairman Synthesis"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            Self::title("Chairman", &result.synthesis),
            result.synthesis.response_text()
        ));

        output.push_str(&Self::summary_line(result));
        output.push_str(&Self::footer());

        output
    }

    /// Format as the JSON envelope
    pub fn format_json(result: &SessionResult) -> String {
        serde_json::to_string_pretty(&SessionReport::from(result))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_final_only(result: &SessionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Verdict ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.question));

        let answer = result.synthesis.response_text();
        if result.synthesis.is_success() {
            output.push_str(&answer);
        } else {
            output.push_str(&answer.red().to_string());
        }
        output.push('\n');

        output.push_str(&Self::summary_line(result));

        output
    }

    /// Format a node reachability report
    pub fn format_health(report: &HealthReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}/{} online\n\n",
            "Council health:".cyan().bold(),
            report.online_count(),
            report.total()
        ));
        output.push_str(&Self::health_line(&report.chairman));
        for member in &report.members {
            output.push_str(&Self::health_line(member));
        }

        output
    }

    fn health_line(node: &NodeHealth) -> String {
        let status = match &node.status {
            NodeStatus::Online { latency_ms } => {
                format!("{} ({}ms)", "ONLINE".green().bold(), latency_ms)
            }
            NodeStatus::Offline { reason } => {
                format!("{} ({})", "OFFLINE".red().bold(), reason)
            }
        };
        format!(
            "  {:<12} {:<32} {:<20} {}\n",
            node.label,
            node.url,
            node.model.as_str(),
            status
        )
    }

    fn title(name: &str, result: &InferenceResult) -> String {
        let heading = format!(
            "── {} · {} · {:.2}s ──",
            name,
            result.model,
            result.latency_secs()
        );
        if result.is_success() {
            heading.yellow().bold().to_string()
        } else {
            heading.red().bold().to_string()
        }
    }

    fn summary_line(result: &SessionResult) -> String {
        let failed = result.failed_calls();
        let mut line = format!("\n{}", format!("Total time: {:.2}s", result.total_secs()).dimmed());
        if failed > 0 {
            line.push_str(&format!(
                "  {}",
                format!("({} call(s) failed)", failed).yellow()
            ));
        } else if result.is_degraded() {
            line.push_str(&format!("  {}", "(some reviews unrated)".yellow()));
        }
        line.push('\n');
        line
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &SessionResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &SessionResult) -> String {
        Self::format_json(result)
    }

    fn format_final_only(&self, result: &SessionResult) -> String {
        Self::format_final_only(result)
    }
}
