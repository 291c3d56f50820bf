// 📊 Scoring - Six bounded sub-scores and their aggregates
// Civic score, normalized credit ratio, combined score, tier and benefit labels

use crate::seed::{clamp, js_round, random_from_seed};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Citizen";
pub const DEFAULT_CREDIT: i64 = 742;

// ============================================================================
// SCORE FIELDS
// ============================================================================

/// One sub-score slot: `value = clamp(round(base + r * spread), 0, max)`
/// where `r = random_from_seed(seed, channel)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreField {
    pub key: &'static str,
    pub label: &'static str,
    pub max: i64,
    pub base: f64,
    pub spread: f64,
    pub channel: u32,
}

impl ScoreField {
    pub fn compute(&self, seed: u64) -> i64 {
        let raw = js_round(self.base + random_from_seed(seed, self.channel) * self.spread);
        clamp(raw, 0.0, self.max as f64) as i64
    }
}

/// Maxima sum to 1000.
pub const SCORE_FIELDS: [ScoreField; 6] = [
    ScoreField { key: "bill", label: "Bill Payments", max: 200, base: 150.0, spread: 50.0, channel: 1 },
    ScoreField { key: "traffic", label: "Traffic Compliance", max: 200, base: 140.0, spread: 60.0, channel: 2 },
    ScoreField { key: "social", label: "Social Participation", max: 200, base: 120.0, spread: 80.0, channel: 3 },
    ScoreField { key: "volunteer", label: "Volunteering", max: 150, base: 80.0, spread: 70.0, channel: 4 },
    ScoreField { key: "environment", label: "Environmental Contribution", max: 150, base: 90.0, spread: 60.0, channel: 5 },
    ScoreField { key: "community", label: "Religious and Community Contribution", max: 100, base: 60.0, spread: 40.0, channel: 6 },
];

pub fn score_field(key: &str) -> Option<&'static ScoreField> {
    SCORE_FIELDS.iter().find(|f| f.key == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub bill: i64,
    pub traffic: i64,
    pub social: i64,
    pub volunteer: i64,
    pub environment: i64,
    pub community: i64,
}

impl ScoreBreakdown {
    pub fn from_seed(seed: u64) -> Self {
        let [bill, traffic, social, volunteer, environment, community] =
            SCORE_FIELDS.map(|field| field.compute(seed));

        ScoreBreakdown { bill, traffic, social, volunteer, environment, community }
    }

    /// Values paired with their field definitions, in display order.
    pub fn entries(&self) -> [(&'static ScoreField, i64); 6] {
        [
            (&SCORE_FIELDS[0], self.bill),
            (&SCORE_FIELDS[1], self.traffic),
            (&SCORE_FIELDS[2], self.social),
            (&SCORE_FIELDS[3], self.volunteer),
            (&SCORE_FIELDS[4], self.environment),
            (&SCORE_FIELDS[5], self.community),
        ]
    }

    pub fn civic(&self) -> i64 {
        self.bill + self.traffic + self.social + self.volunteer + self.environment + self.community
    }
}

// ============================================================================
// LABELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitizenTier {
    EliteCitizen,
    ActiveContributor,
    BuildingTrust,
}

impl CitizenTier {
    pub fn from_civic(civic: i64) -> Self {
        if civic > 850 {
            CitizenTier::EliteCitizen
        } else if civic > 700 {
            CitizenTier::ActiveContributor
        } else {
            CitizenTier::BuildingTrust
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CitizenTier::EliteCitizen => "Elite Citizen",
            CitizenTier::ActiveContributor => "Active Contributor",
            CitizenTier::BuildingTrust => "Building Trust",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenefitBand {
    HighIncentives,
    StandardBenefits,
}

impl BenefitBand {
    pub fn from_combined(combined: i64) -> Self {
        if combined > 800 {
            BenefitBand::HighIncentives
        } else {
            BenefitBand::StandardBenefits
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BenefitBand::HighIncentives => "High Incentives",
            BenefitBand::StandardBenefits => "Standard Benefits",
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub seed: u64,
    pub credit_input: i64,
    pub breakdown: ScoreBreakdown,
    pub civic: i64,
    /// `(credit - 300) / 600`, deliberately unclamped
    pub normalized_credit: f64,
    pub credit_display: i64,
    pub combined: i64,
    pub tier: CitizenTier,
    pub benefit: BenefitBand,
}

impl ScoreReport {
    pub fn civic_percent(&self) -> f64 {
        (self.civic as f64 / 1000.0) * 100.0
    }

    pub fn credit_percent(&self) -> f64 {
        self.normalized_credit * 100.0
    }

    pub fn combined_percent(&self) -> f64 {
        (self.combined as f64 / 1000.0) * 100.0
    }
}

/// Computed in f64 so saturated inputs near `i64::MIN` cannot overflow.
pub fn normalize_credit(credit_input: i64) -> f64 {
    (credit_input as f64 - 300.0) / 600.0
}

pub fn combined_score(civic: i64, normalized_credit: f64) -> i64 {
    js_round((civic as f64 / 1000.0) * 600.0 + normalized_credit * 400.0) as i64
}

/// Derive every number the dashboard shows from a seed and a credit input.
pub fn compute_report(seed: u64, credit_input: i64) -> ScoreReport {
    let breakdown = ScoreBreakdown::from_seed(seed);
    let civic = breakdown.civic();
    let normalized_credit = normalize_credit(credit_input);
    let credit_display = js_round(normalized_credit * 1000.0) as i64;
    let combined = combined_score(civic, normalized_credit);

    ScoreReport {
        seed,
        credit_input,
        breakdown,
        civic,
        normalized_credit,
        credit_display,
        combined,
        tier: CitizenTier::from_civic(civic),
        benefit: BenefitBand::from_combined(combined),
    }
}

// ============================================================================
// INPUT DEFAULTS
// ============================================================================

/// Empty text falls back; anything else (whitespace included) is kept.
pub fn resolve_name<'a>(raw: &'a str, fallback: &'a str) -> &'a str {
    if raw.is_empty() {
        fallback
    } else {
        raw
    }
}

/// Leading-integer parse: skips leading whitespace, takes an optional sign
/// and the digits that follow, ignores the rest. A `0x`/`0X` prefix switches
/// to hexadecimal digits. No digits or a zero value yields `fallback`.
/// Out-of-range scores pass through untouched; overflow saturates.
pub fn parse_credit_input(raw: &str, fallback: i64) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits: Vec<i64> = rest
        .chars()
        .map_while(|c| c.to_digit(radix))
        .map(|d| d as i64)
        .collect();

    if digits.is_empty() {
        return fallback;
    }

    let magnitude = digits
        .iter()
        .fold(0i64, |acc, d| acc.saturating_mul(radix as i64).saturating_add(*d));
    let value = if negative { -magnitude } else { magnitude };

    if value == 0 {
        fallback
    } else {
        value
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_maxima_sum_to_1000() {
        let total: i64 = SCORE_FIELDS.iter().map(|f| f.max).sum();
        assert_eq!(total, 1000);
    }

    #[test]
    fn test_channels_are_one_through_six() {
        let channels: Vec<u32> = SCORE_FIELDS.iter().map(|f| f.channel).collect();
        assert_eq!(channels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_field_values_within_bounds() {
        for seed in (1..20_000u64).step_by(13) {
            let breakdown = ScoreBreakdown::from_seed(seed);
            for (field, value) in breakdown.entries() {
                assert!(value >= 0 && value <= field.max, "{} = {} (seed {})", field.key, value, seed);
            }
        }
    }

    #[test]
    fn test_field_formula_matches_generator() {
        let seed = 987_654;
        let bill = js_round(150.0 + random_from_seed(seed, 1) * 50.0) as i64;
        let community = js_round(60.0 + random_from_seed(seed, 6) * 40.0) as i64;
        let breakdown = ScoreBreakdown::from_seed(seed);
        assert_eq!(breakdown.bill, bill.min(200));
        assert_eq!(breakdown.community, community.min(100));
    }

    #[test]
    fn test_civic_is_exact_sum() {
        for seed in [1u64, 2, 77, 123_456, 2_147_483_649] {
            let report = compute_report(seed, 742);
            let b = report.breakdown;
            assert_eq!(
                report.civic,
                b.bill + b.traffic + b.social + b.volunteer + b.environment + b.community
            );
        }
    }

    #[test]
    fn test_combined_formula() {
        for seed in [5u64, 55, 555] {
            for credit in [300, 742, 900, 1200, -40] {
                let report = compute_report(seed, credit);
                let normalized = (credit - 300) as f64 / 600.0;
                let expected = js_round((report.civic as f64 / 1000.0) * 600.0 + normalized * 400.0) as i64;
                assert_eq!(report.combined, expected);
                assert_eq!(report.normalized_credit, normalized);
            }
        }
    }

    #[test]
    fn test_credit_display_for_742() {
        let report = compute_report(1, 742);
        assert_eq!(report.credit_display, 737);
    }

    #[test]
    fn test_credit_ratio_is_not_clamped() {
        assert!(normalize_credit(1200) > 1.0);
        assert!(normalize_credit(100) < 0.0);
        assert_eq!(compute_report(1, 1200).credit_display, 1500);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(CitizenTier::from_civic(851).label(), "Elite Citizen");
        assert_eq!(CitizenTier::from_civic(850).label(), "Active Contributor");
        assert_eq!(CitizenTier::from_civic(701).label(), "Active Contributor");
        assert_eq!(CitizenTier::from_civic(700).label(), "Building Trust");
    }

    #[test]
    fn test_benefit_boundaries() {
        assert_eq!(BenefitBand::from_combined(801).label(), "High Incentives");
        assert_eq!(BenefitBand::from_combined(800).label(), "Standard Benefits");
    }

    #[test]
    fn test_resolve_name() {
        assert_eq!(resolve_name("", DEFAULT_NAME), "Citizen");
        assert_eq!(resolve_name("Alice", DEFAULT_NAME), "Alice");
        assert_eq!(resolve_name("  ", DEFAULT_NAME), "  ");
    }

    #[test]
    fn test_parse_credit_input() {
        assert_eq!(parse_credit_input("", DEFAULT_CREDIT), 742);
        assert_eq!(parse_credit_input("abc", DEFAULT_CREDIT), 742);
        assert_eq!(parse_credit_input("0", DEFAULT_CREDIT), 742);
        assert_eq!(parse_credit_input("650", DEFAULT_CREDIT), 650);
        assert_eq!(parse_credit_input("  810 ", DEFAULT_CREDIT), 810);
        assert_eq!(parse_credit_input("742abc", DEFAULT_CREDIT), 742);
        assert_eq!(parse_credit_input("12.9", DEFAULT_CREDIT), 12);
        assert_eq!(parse_credit_input("-50", DEFAULT_CREDIT), -50);
        assert_eq!(parse_credit_input("+1200", DEFAULT_CREDIT), 1200);
        assert_eq!(parse_credit_input("-", DEFAULT_CREDIT), 742);
    }

    #[test]
    fn test_parse_credit_input_hex_prefix() {
        assert_eq!(parse_credit_input("0x1A", DEFAULT_CREDIT), 26);
        assert_eq!(parse_credit_input("0X2ee", DEFAULT_CREDIT), 750);
        assert_eq!(parse_credit_input("-0x10", DEFAULT_CREDIT), -16);
        assert_eq!(parse_credit_input("0x", DEFAULT_CREDIT), 742);
        assert_eq!(parse_credit_input("0xZZ", DEFAULT_CREDIT), 742);
        assert_eq!(parse_credit_input("0x0", DEFAULT_CREDIT), 742);
    }

    #[test]
    fn test_huge_credit_input_saturates() {
        let credit = parse_credit_input("99999999999999999999", DEFAULT_CREDIT);
        assert_eq!(credit, i64::MAX);
        let report = compute_report(1, credit);
        assert!(report.normalized_credit > 1.0);
        assert!(report.credit_display > 0);
        assert!(report.combined > 0);
    }

    #[test]
    fn test_huge_negative_credit_input_stays_negative() {
        let credit = parse_credit_input("-99999999999999999999", DEFAULT_CREDIT);
        assert_eq!(credit, -i64::MAX);
        let report = compute_report(1, credit);
        assert!(report.normalized_credit < 0.0);
        assert!(report.credit_display < 0);
        assert!(report.combined < 0);
        assert_eq!(report.tier, CitizenTier::from_civic(report.civic));
        assert_eq!(report.benefit, BenefitBand::StandardBenefits);
    }

    #[test]
    fn test_score_field_lookup() {
        assert_eq!(score_field("volunteer").map(|f| f.max), Some(150));
        assert!(score_field("unknown").is_none());
    }
}
