//! Console output formatter for engine results

use super::formatter::OutputFormatter;
use super::report::{RunReport, TaskResult};
use colored::{ColoredString, Colorize};
use stamp_domain::{ConclusionPolicy, Decision, StampState, SubjectEvaluation};

/// Formats engine results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one evaluation
    pub fn format_evaluation(evaluation: &SubjectEvaluation, policy: &ConclusionPolicy) -> String {
        let mut output = String::new();
        let tally = &evaluation.tally;

        output.push_str(&Self::header(&format!("Evaluation of {}", evaluation.subject)));
        output.push('\n');

        output.push_str(&format!(
            "{} {} up / {} down ({} votes)\n",
            "Power:".cyan().bold(),
            Self::power(tally.upvote_power),
            Self::power(tally.downvote_power),
            tally.vote_count
        ));
        output.push_str(&format!(
            "{} {}% {}\n",
            "Majority:".cyan().bold(),
            evaluation.majority.size,
            evaluation.majority.kind
        ));
        output.push_str(&format!("{} {}\n", "Policy:".cyan().bold(), policy));

        let concludable = if evaluation.concludable {
            "yes".green().bold()
        } else {
            "no".yellow().bold()
        };
        output.push_str(&format!("{} {}\n", "Concludable:".cyan().bold(), concludable));
        output.push_str(&format!(
            "{} {}\n",
            "Decision:".cyan().bold(),
            Self::decision(evaluation.decision)
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format a conclude or sweep run
    pub fn format_report(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Conclusion Results"));
        output.push('\n');

        if let Some(cutoff) = report.sweep_cutoff {
            output.push_str(&format!(
                "{} in progress since before {}\n",
                "Due:".cyan().bold(),
                cutoff.to_rfc3339()
            ));
        }

        output.push_str(&Self::section_header("Evaluations"));
        if report.evaluations.is_empty() {
            output.push_str(&format!("  {}\n", "nothing to conclude".dimmed()));
        }
        for evaluation in &report.evaluations {
            output.push_str(&format!(
                "  {:<12} power {:>8}  majority {:>3}% {:<10} -> {}\n",
                evaluation.subject.to_string(),
                Self::power(evaluation.total_power()),
                evaluation.majority.size,
                evaluation.majority.kind.to_string(),
                Self::decision(evaluation.decision)
            ));
        }
        for failure in &report.failures {
            output.push_str(&format!(
                "  {:<12} {}\n",
                failure.subject.to_string(),
                failure.error.red()
            ));
        }

        output.push_str(&Self::section_header("Tasks"));
        for line in &report.tasks {
            let result = match &line.result {
                TaskResult::Applied { state } => format!("applied, now {}", Self::state(*state)),
                TaskResult::Skipped { reason } => format!("{} ({})", "skipped".yellow(), reason),
                TaskResult::Failed { error } => format!("{} ({})", "failed".red().bold(), error),
            };
            output.push_str(&format!("  {:<20} {}\n", line.task.to_string(), result));
        }

        output.push_str(&Self::section_header("Stamps"));
        for subject in &report.subjects {
            output.push_str(&format!(
                "  {:<12} target #{:<6} {}\n",
                subject.subject_ref().to_string(),
                subject.target.id,
                Self::state(subject.state)
            ));
        }

        if !report.notifications.is_empty() {
            output.push_str(&Self::section_header("Notifications"));
            for notification in &report.notifications {
                output.push_str(&format!(
                    "  user {:<8} {:<16} {}\n",
                    notification.recipient,
                    notification.activity_key,
                    notification.reference
                ));
            }
        }

        if !report.activities.is_empty() {
            output.push_str(&Self::section_header("Activities"));
            for activity in &report.activities {
                output.push_str(&format!(
                    "  {:<16} {:<12} target #{} (owner {})\n",
                    activity.key,
                    activity.trackable.to_string(),
                    activity.recipient.id,
                    activity.recipient.creator
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format one configuration issue
    pub fn format_issue(is_error: bool, field: &str, message: &str) -> String {
        let label = if is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        format!("  {}: {} {}", label, field.bold(), message)
    }

    fn power(value: f64) -> String {
        format!("{:.2}", value)
    }

    fn decision(decision: Decision) -> ColoredString {
        match decision {
            Decision::Accept => decision.as_str().green().bold(),
            Decision::Deny => decision.as_str().red().bold(),
            Decision::Dispute => decision.as_str().yellow().bold(),
        }
    }

    fn state(state: StampState) -> ColoredString {
        match state {
            StampState::InProgress => state.as_str().normal(),
            StampState::Accepted => state.as_str().green(),
            StampState::Denied => state.as_str().red(),
            StampState::Disputed => state.as_str().yellow(),
            StampState::Archived => state.as_str().dimmed(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_evaluation(
        &self,
        evaluation: &SubjectEvaluation,
        policy: &ConclusionPolicy,
    ) -> String {
        Self::format_evaluation(evaluation, policy)
    }

    fn format_report(&self, report: &RunReport) -> String {
        Self::format_report(report)
    }
}
