// 🖼️ Rendering Surface - Named slots the simulation reads and writes
// The surface is an external collaborator; Dashboard is the in-memory one

use crate::scoring::{ScoreField, SCORE_FIELDS};
use crate::sources::{SourceStep, StatusDot, StepState, SOURCE_STEPS};
use serde::{Deserialize, Serialize};

pub const TRIGGER_IDLE_LABEL: &str = "Fetch Records & Calculate";
pub const TRIGGER_BUSY_LABEL: &str = "Processing Records...";
pub const TRIGGER_RERUN_LABEL: &str = "Re-Calculate Score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    Civic,
    Credit,
    Combined,
}

impl Ring {
    pub fn title(&self) -> &'static str {
        match self {
            Ring::Civic => "Civic Score",
            Ring::Credit => "Credit Score",
            Ring::Combined => "Combined Score",
        }
    }
}

// ============================================================================
// SURFACE CONTRACT
// ============================================================================

/// Everything a simulation run may touch.
///
/// Implementations only store what they are told; clamping and formatting
/// decisions are made by the caller.
pub trait Surface {
    /// Raw text of the citizen-name input slot
    fn citizen_name(&self) -> String;

    /// Raw text of the credit-score input slot
    fn credit_input(&self) -> String;

    fn set_trigger(&mut self, enabled: bool, label: &str);

    /// Overall progress bar width, in percent
    fn set_progress(&mut self, percent: f64);

    /// Every source row and status dot back to pending/idle
    fn reset_sources(&mut self);

    fn mark_source(&mut self, step: &SourceStep, state: StepState);

    fn set_ring(&mut self, ring: Ring, percentage: f64, value: i64);

    fn set_field(&mut self, field: &ScoreField, text: &str, bar_percent: f64);

    fn set_tier(&mut self, label: &str);

    fn set_benefit_band(&mut self, label: &str);

    fn scroll_results_into_view(&mut self);
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceIndicator {
    pub key: String,
    pub label: String,
    pub state: StepState,
    pub dot: StatusDot,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RingDisplay {
    /// Already clamped to [0, 100]
    pub percentage: f64,
    pub value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRow {
    pub key: String,
    pub label: String,
    pub max: i64,
    pub text: String,
    pub bar_percent: f64,
}

/// Snapshot of every slot, serializable for the API and drawn by the TUI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub name_input: String,
    pub credit_input: String,
    pub trigger: TriggerState,
    pub progress_percent: f64,
    pub sources: Vec<SourceIndicator>,
    pub civic_ring: RingDisplay,
    pub credit_ring: RingDisplay,
    pub combined_ring: RingDisplay,
    pub fields: Vec<FieldRow>,
    pub tier: Option<String>,
    pub benefit_band: Option<String>,
    /// Incremented each time the results region is scrolled into view
    pub results_scrolls: u32,
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {
            name_input: String::new(),
            credit_input: String::new(),
            trigger: TriggerState {
                enabled: true,
                label: TRIGGER_IDLE_LABEL.to_string(),
            },
            progress_percent: 0.0,
            sources: SOURCE_STEPS
                .iter()
                .map(|s| SourceIndicator {
                    key: s.key.to_string(),
                    label: s.label.to_string(),
                    state: StepState::Pending,
                    dot: StatusDot::Idle,
                })
                .collect(),
            civic_ring: RingDisplay::default(),
            credit_ring: RingDisplay::default(),
            combined_ring: RingDisplay::default(),
            fields: SCORE_FIELDS
                .iter()
                .map(|f| FieldRow {
                    key: f.key.to_string(),
                    label: f.label.to_string(),
                    max: f.max,
                    text: format!("-- / {}", f.max),
                    bar_percent: 0.0,
                })
                .collect(),
            tier: None,
            benefit_band: None,
            results_scrolls: 0,
        }
    }

    /// Dashboard with both input slots pre-filled
    pub fn with_inputs(name: &str, credit: &str) -> Self {
        let mut dashboard = Dashboard::new();
        dashboard.name_input = name.to_string();
        dashboard.credit_input = credit.to_string();
        dashboard
    }

    pub fn ring(&self, ring: Ring) -> &RingDisplay {
        match ring {
            Ring::Civic => &self.civic_ring,
            Ring::Credit => &self.credit_ring,
            Ring::Combined => &self.combined_ring,
        }
    }

    pub fn source(&self, key: &str) -> Option<&SourceIndicator> {
        self.sources.iter().find(|s| s.key == key)
    }

    pub fn field(&self, key: &str) -> Option<&FieldRow> {
        self.fields.iter().find(|f| f.key == key)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Dashboard {
    fn citizen_name(&self) -> String {
        self.name_input.clone()
    }

    fn credit_input(&self) -> String {
        self.credit_input.clone()
    }

    fn set_trigger(&mut self, enabled: bool, label: &str) {
        self.trigger.enabled = enabled;
        self.trigger.label = label.to_string();
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress_percent = percent;
    }

    fn reset_sources(&mut self) {
        for source in &mut self.sources {
            source.state = StepState::Pending;
            source.dot = StatusDot::Idle;
        }
    }

    fn mark_source(&mut self, step: &SourceStep, state: StepState) {
        if let Some(source) = self.sources.iter_mut().find(|s| s.key == step.key) {
            source.state = state;
            source.dot = state.dot();
        }
    }

    fn set_ring(&mut self, ring: Ring, percentage: f64, value: i64) {
        let display = match ring {
            Ring::Civic => &mut self.civic_ring,
            Ring::Credit => &mut self.credit_ring,
            Ring::Combined => &mut self.combined_ring,
        };
        display.percentage = percentage;
        display.value = Some(value);
    }

    fn set_field(&mut self, field: &ScoreField, text: &str, bar_percent: f64) {
        if let Some(row) = self.fields.iter_mut().find(|r| r.key == field.key) {
            row.text = text.to_string();
            row.bar_percent = bar_percent;
        }
    }

    fn set_tier(&mut self, label: &str) {
        self.tier = Some(label.to_string());
    }

    fn set_benefit_band(&mut self, label: &str) {
        self.benefit_band = Some(label.to_string());
    }

    fn scroll_results_into_view(&mut self) {
        self.results_scrolls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dashboard_is_pending() {
        let dashboard = Dashboard::new();
        assert!(dashboard.trigger.enabled);
        assert_eq!(dashboard.sources.len(), 5);
        assert!(dashboard.sources.iter().all(|s| s.state == StepState::Pending));
        assert_eq!(dashboard.fields.len(), 6);
        assert_eq!(dashboard.field("bill").map(|f| f.text.as_str()), Some("-- / 200"));
        assert!(dashboard.tier.is_none());
    }

    #[test]
    fn test_mark_and_reset_sources() {
        let mut dashboard = Dashboard::new();
        dashboard.mark_source(&SOURCE_STEPS[2], StepState::InProgress);
        let traffic = dashboard.source("traffic").unwrap();
        assert_eq!(traffic.state, StepState::InProgress);
        assert_eq!(traffic.dot, StatusDot::Active);

        dashboard.mark_source(&SOURCE_STEPS[2], StepState::Done);
        assert_eq!(dashboard.source("traffic").unwrap().dot, StatusDot::Done);

        dashboard.reset_sources();
        assert!(dashboard
            .sources
            .iter()
            .all(|s| s.state == StepState::Pending && s.dot == StatusDot::Idle));
    }

    #[test]
    fn test_set_ring_and_field() {
        let mut dashboard = Dashboard::new();
        dashboard.set_ring(Ring::Credit, 73.6, 737);
        assert_eq!(dashboard.ring(Ring::Credit).value, Some(737));
        assert_eq!(dashboard.ring(Ring::Civic).value, None);

        dashboard.set_field(&SCORE_FIELDS[5], "80 / 100", 80.0);
        let row = dashboard.field("community").unwrap();
        assert_eq!(row.text, "80 / 100");
        assert_eq!(row.bar_percent, 80.0);
    }

    #[test]
    fn test_dashboard_serializes_ring_names() {
        let json = serde_json::to_value(Ring::Combined).unwrap();
        assert_eq!(json, "combined");
        let json = serde_json::to_value(StepState::InProgress).unwrap();
        assert_eq!(json, "in-progress");
    }
}
