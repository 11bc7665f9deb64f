//! Output formatter trait

use super::report::RunReport;
use stamp_domain::{ConclusionPolicy, SubjectEvaluation};

/// Trait for formatting engine results
pub trait OutputFormatter {
    /// Format one evaluation against the policy it was made with
    fn format_evaluation(&self, evaluation: &SubjectEvaluation, policy: &ConclusionPolicy)
    -> String;

    /// Format a conclude or sweep run
    fn format_report(&self, report: &RunReport) -> String;
}

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_evaluation(
        &self,
        evaluation: &SubjectEvaluation,
        policy: &ConclusionPolicy,
    ) -> String {
        let value = serde_json::json!({
            "evaluation": evaluation,
            "policy": policy,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_report(&self, report: &RunReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}
