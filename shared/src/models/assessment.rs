//! Quality assessment models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inspection measurements taken from a lot sample.
///
/// Percentages are taken as entered: range checks live in
/// [`crate::validation::validate_measurement`] and are opt-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityMeasurement {
    pub moisture_pct: Decimal,
    pub group1_defect_pct: Decimal,
    pub group2_defect_pct: Decimal,
    pub below_screen12_pct: Decimal,
    pub pods_pct: Decimal,
    pub husks_pct: Decimal,
    pub stones_pct: Decimal,
    /// Reference price per kg; a lot without one stays unpriced
    #[serde(default)]
    pub reference_price: Option<Decimal>,
    /// Price offered to the supplier per kg, informational
    #[serde(default)]
    pub offered_price: Option<Decimal>,
    /// Manual adjustment added after formula pricing, may be negative
    #[serde(default)]
    pub discretion_adjustment: Decimal,
}

impl QualityMeasurement {
    /// Pods + husks + stones, unrounded. Saturates instead of overflowing.
    pub fn foreign_matter(&self) -> Decimal {
        self.pods_pct
            .saturating_add(self.husks_pct)
            .saturating_add(self.stones_pct)
    }

    /// Field name / value pairs for every percentage input
    pub fn percentages(&self) -> [(&'static str, Decimal); 7] {
        [
            ("moisture_pct", self.moisture_pct),
            ("group1_defect_pct", self.group1_defect_pct),
            ("group2_defect_pct", self.group2_defect_pct),
            ("below_screen12_pct", self.below_screen12_pct),
            ("pods_pct", self.pods_pct),
            ("husks_pct", self.husks_pct),
            ("stones_pct", self.stones_pct),
        ]
    }
}

/// Outcome of an assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Decision {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Pending => "Pending",
            Decision::Accepted => "Accepted",
            Decision::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values derived from a [`QualityMeasurement`]. Always recomputed as a
/// whole, never edited by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentResult {
    pub foreign_matter_pct: Decimal,
    pub clean_outturn_pct: Decimal,
    pub derived_outturn_pct: Option<Decimal>,
    pub rejection_reasons: Vec<String>,
    pub decision: Decision,
    pub final_price: Option<Decimal>,
}

impl AssessmentResult {
    pub fn is_rejected(&self) -> bool {
        self.decision == Decision::Rejected
    }

    pub fn is_accepted(&self) -> bool {
        self.decision == Decision::Accepted
    }
}

/// The single stored assessment of a lot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub lot_id: Uuid,
    pub assessed_by: Option<String>,
    pub measurement: QualityMeasurement,
    pub result: AssessmentResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of times the result has been recomputed after creation
    pub revision: u32,
}
