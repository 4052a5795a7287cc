//! Mapping from predicted clause types to risk severity and score.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Qualitative risk severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Badge colour used when rendering this severity.
    #[must_use]
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::High => "#f94144",
            Self::Medium => "#f8961e",
            Self::Low => "#43aa8b",
        }
    }
}

/// Severity and numeric score (0-100) for a clause type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub severity: Severity,
    pub score: u8,
}

impl RiskProfile {
    const fn new(severity: Severity, score: u8) -> Self {
        Self { severity, score }
    }
}

/// Profile for clause types missing from [`RISK_TABLE`].
pub const DEFAULT_RISK: RiskProfile = RiskProfile::new(Severity::Medium, 50);

/// Known clause types, keyed by normalized label.
pub const RISK_TABLE: &[(&str, RiskProfile)] = &[
    ("indemnity", RiskProfile::new(Severity::High, 90)),
    ("liability", RiskProfile::new(Severity::High, 88)),
    ("termination", RiskProfile::new(Severity::High, 82)),
    ("dispute resolution", RiskProfile::new(Severity::Medium, 65)),
    ("force majeure", RiskProfile::new(Severity::Medium, 60)),
    ("payment terms", RiskProfile::new(Severity::Medium, 58)),
    ("governing law", RiskProfile::new(Severity::Low, 35)),
    ("confidentiality", RiskProfile::new(Severity::Low, 30)),
];

/// Normalize a model label for lookup: lowercase with collapsed whitespace.
///
/// # Examples
/// ```
/// use contract_risk_analyzer::risk::normalize_label;
///
/// assert_eq!(normalize_label("  Dispute\tResolution "), "dispute resolution");
/// ```
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up the risk profile for a predicted clause type.
///
/// Unknown types get [`DEFAULT_RISK`].
#[must_use]
pub fn map_clause_type_to_risk(clause_type: &str) -> RiskProfile {
    let normalized = normalize_label(clause_type);
    RISK_TABLE
        .iter()
        .find(|(label, _)| *label == normalized)
        .map(|(_, profile)| *profile)
        .unwrap_or(DEFAULT_RISK)
}

/// Badge colour for a severity name.
///
/// Anything that is not "high" or "medium" renders as low.
#[must_use]
pub fn risk_badge_color(severity: &str) -> &'static str {
    severity
        .trim()
        .parse::<Severity>()
        .unwrap_or(Severity::Low)
        .badge_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_clause_has_expected_risk() {
        let profile = map_clause_type_to_risk("Liability");
        assert_eq!(profile.severity, Severity::High);
        assert!(profile.score >= 80);
    }

    #[test]
    fn test_full_table() {
        let expected = [
            ("Indemnity", Severity::High, 90),
            ("Termination", Severity::High, 82),
            ("Dispute Resolution", Severity::Medium, 65),
            ("Force Majeure", Severity::Medium, 60),
            ("Payment Terms", Severity::Medium, 58),
            ("Governing Law", Severity::Low, 35),
            ("Confidentiality", Severity::Low, 30),
        ];
        for (label, severity, score) in expected {
            assert_eq!(
                map_clause_type_to_risk(label),
                RiskProfile { severity, score },
                "label: {label}"
            );
        }
    }

    #[test]
    fn test_lookup_normalizes_label() {
        assert_eq!(
            map_clause_type_to_risk("  GOVERNING   law\n"),
            map_clause_type_to_risk("governing law")
        );
    }

    #[test]
    fn test_unknown_clause_uses_default_profile() {
        let profile = map_clause_type_to_risk("Unknown Clause");
        assert_eq!(profile.severity, Severity::Medium);
        assert_eq!(profile.score, 50);
        assert_eq!(map_clause_type_to_risk(""), DEFAULT_RISK);
    }

    #[test]
    fn test_badge_color_mapping() {
        assert_eq!(risk_badge_color("High"), "#f94144");
        assert_eq!(risk_badge_color("Medium"), "#f8961e");
        assert_eq!(risk_badge_color("Low"), "#43aa8b");
    }

    #[test]
    fn test_badge_color_is_case_insensitive() {
        assert_eq!(risk_badge_color(" HIGH "), "#f94144");
        assert_eq!(risk_badge_color("medium"), "#f8961e");
        assert_eq!(risk_badge_color("unknown"), "#43aa8b");
    }

    #[test]
    fn test_severity_display_and_parse() {
        assert_eq!(Severity::High.to_string(), "High");
        assert_eq!("low".parse::<Severity>().unwrap(), Severity::Low);
    }
}
