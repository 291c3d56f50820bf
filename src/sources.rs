// 🛰️ Data Sources - The five simulated record lookups
// Purely cosmetic: each step animates, none contributes data

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceStep {
    pub key: &'static str,
    pub label: &'static str,
    /// Zero-based position in the run order
    pub ordinal: usize,
}

/// Processed strictly in this order, one at a time.
pub const SOURCE_STEPS: [SourceStep; 5] = [
    SourceStep { key: "ekyc", label: "Aadhaar eKYC API", ordinal: 0 },
    SourceStep { key: "utilities", label: "Electricity and Water APIs", ordinal: 1 },
    SourceStep { key: "traffic", label: "RTO and Traffic Police APIs", ordinal: 2 },
    SourceStep { key: "municipal", label: "Municipal and Swachh Bharat APIs", ordinal: 3 },
    SourceStep { key: "ngo", label: "NGO and CSR APIs", ordinal: 4 },
];

pub fn source_step(key: &str) -> Option<&'static SourceStep> {
    SOURCE_STEPS.iter().find(|s| s.key == key)
}

/// Overall progress once `completed` steps are done, in percent.
pub fn progress_after(completed: usize) -> f64 {
    (completed as f64 / SOURCE_STEPS.len() as f64) * 100.0
}

// ============================================================================
// INDICATOR STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepState {
    #[default]
    Pending,
    InProgress,
    Done,
}

/// Status dot beside each source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusDot {
    #[default]
    Idle,
    Active,
    Done,
}

impl StepState {
    pub fn dot(&self) -> StatusDot {
        match self {
            StepState::Pending => StatusDot::Idle,
            StepState::InProgress => StatusDot::Active,
            StepState::Done => StatusDot::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_order() {
        let keys: Vec<&str> = SOURCE_STEPS.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["ekyc", "utilities", "traffic", "municipal", "ngo"]);
        for (i, step) in SOURCE_STEPS.iter().enumerate() {
            assert_eq!(step.ordinal, i);
        }
    }

    #[test]
    fn test_progress_after() {
        assert_eq!(progress_after(0), 0.0);
        assert_eq!(progress_after(1), 20.0);
        assert_eq!(progress_after(5), 100.0);
    }

    #[test]
    fn test_dot_follows_step_state() {
        assert_eq!(StepState::Pending.dot(), StatusDot::Idle);
        assert_eq!(StepState::InProgress.dot(), StatusDot::Active);
        assert_eq!(StepState::Done.dot(), StatusDot::Done);
    }

    #[test]
    fn test_source_lookup() {
        assert_eq!(source_step("ngo").map(|s| s.label), Some("NGO and CSR APIs"));
        assert!(source_step("bank").is_none());
    }
}
