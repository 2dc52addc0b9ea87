//! Lot pricing and acceptance rules
//!
//! Turns a [`QualityMeasurement`] into an [`AssessmentResult`]: outturns,
//! rejection reasons, decision and the final per-kg price. Everything is
//! fixed-point; only stored fields are rounded (half-up, two places).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AssessmentResult, Decision, QualityMeasurement};
use crate::types::{excess, round2, zero2};

/// How a below-screen-12 breach interacts with the derived outturn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BelowScreenGate {
    /// Always compute the derived outturn; the breach only adds a reason
    #[default]
    Report,
    /// No derived outturn at all once the breach threshold is exceeded
    Reject,
}

/// Hard limits: anything strictly above one of these rejects the lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RejectionThresholds {
    pub below_screen12: Decimal,
    pub moisture: Decimal,
    pub group1: Decimal,
    pub group2: Decimal,
    pub pods: Decimal,
    pub husks: Decimal,
    pub stones: Decimal,
    /// Applies to pods + husks + stones
    pub foreign_matter: Decimal,
}

impl Default for RejectionThresholds {
    fn default() -> Self {
        Self {
            below_screen12: Decimal::from(3),
            moisture: Decimal::new(165, 1),
            group1: Decimal::from(10),
            group2: Decimal::from(25),
            pods: Decimal::from(6),
            husks: Decimal::from(6),
            stones: Decimal::from(6),
            foreign_matter: Decimal::from(6),
        }
    }
}

/// Tolerances subtracted before a measurement eats into the derived outturn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutturnTolerances {
    pub moisture: Decimal,
    pub group1: Decimal,
    pub group2: Decimal,
    pub below_screen12: Decimal,
}

impl Default for OutturnTolerances {
    fn default() -> Self {
        Self {
            moisture: Decimal::from(14),
            group1: Decimal::from(4),
            group2: Decimal::from(10),
            below_screen12: Decimal::ONE,
        }
    }
}

/// Premium paid for an exceptionally clean lot. Every limit must hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityBonus {
    pub amount: Decimal,
    pub max_group1: Decimal,
    pub max_group2: Decimal,
    pub max_moisture: Decimal,
    pub min_derived_outturn: Decimal,
    pub max_below_screen12: Decimal,
}

impl Default for QualityBonus {
    fn default() -> Self {
        Self {
            amount: Decimal::from(2000),
            max_group1: Decimal::ONE,
            max_group2: Decimal::from(5),
            max_moisture: Decimal::from(13),
            min_derived_outturn: Decimal::from(80),
            max_below_screen12: Decimal::ONE,
        }
    }
}

/// Per-point price adjustments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PriceRates {
    /// Penalty starts at this moisture (inclusive)
    pub moisture_from: Decimal,
    /// Fraction of the reference price lost per moisture point
    pub moisture_rate: Decimal,
    pub group1_from: Decimal,
    pub group1_rate: Decimal,
    pub group2_from: Decimal,
    pub group2_rate: Decimal,
    pub outturn_floor: Decimal,
    pub outturn_ceiling: Decimal,
    pub outturn_rate: Decimal,
    pub pods_rate: Decimal,
    pub husks_rate: Decimal,
    pub stones_rate: Decimal,
    pub below_screen12_from: Decimal,
    pub below_screen12_rate: Decimal,
}

impl Default for PriceRates {
    fn default() -> Self {
        Self {
            moisture_from: Decimal::from(14),
            moisture_rate: Decimal::new(2, 3),
            group1_from: Decimal::from(4),
            group1_rate: Decimal::from(50),
            group2_from: Decimal::from(10),
            group2_rate: Decimal::from(20),
            outturn_floor: Decimal::from(78),
            outturn_ceiling: Decimal::from(82),
            outturn_rate: Decimal::from(50),
            pods_rate: Decimal::from(10),
            husks_rate: Decimal::from(10),
            stones_rate: Decimal::from(20),
            below_screen12_from: Decimal::ONE,
            below_screen12_rate: Decimal::from(30),
        }
    }
}

/// Complete rule set. `Default` is the house pricing table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PricingPolicy {
    pub below_screen_gate: BelowScreenGate,
    pub thresholds: RejectionThresholds,
    pub tolerances: OutturnTolerances,
    pub bonus: QualityBonus,
    pub rates: PriceRates,
}

/// What moved the price away from the reference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    QualityBonus,
    Moisture,
    Group1Defects,
    Group2Defects,
    OutturnShortfall,
    OutturnPremium,
    Pods,
    Husks,
    Stones,
    BelowScreen12,
    Discretion,
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AdjustmentKind::QualityBonus => "Quality bonus",
            AdjustmentKind::Moisture => "Moisture",
            AdjustmentKind::Group1Defects => "Group 1 defects",
            AdjustmentKind::Group2Defects => "Group 2 defects",
            AdjustmentKind::OutturnShortfall => "Outturn shortfall",
            AdjustmentKind::OutturnPremium => "Outturn premium",
            AdjustmentKind::Pods => "Pods",
            AdjustmentKind::Husks => "Husks",
            AdjustmentKind::Stones => "Stones",
            AdjustmentKind::BelowScreen12 => "Below screen 12",
            AdjustmentKind::Discretion => "Discretion",
        };
        f.write_str(label)
    }
}

/// One signed line of the price computation, unrounded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceAdjustment {
    pub kind: AdjustmentKind,
    pub amount: Decimal,
}

/// Reference price, the adjustments applied to it, and the result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub reference_price: Decimal,
    pub adjustments: Vec<PriceAdjustment>,
    pub final_price: Decimal,
}

impl PriceBreakdown {
    pub fn adjustment(&self, kind: AdjustmentKind) -> Option<Decimal> {
        self.adjustments
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.amount)
    }
}

/// Evaluate a measurement with the default pricing table
pub fn evaluate(measurement: &QualityMeasurement) -> AssessmentResult {
    PricingPolicy::default().evaluate(measurement)
}

impl PricingPolicy {
    /// Compute every derived field of an assessment. Never fails; the worst
    /// outcome is a rejected or unpriced result.
    pub fn evaluate(&self, m: &QualityMeasurement) -> AssessmentResult {
        let derived_outturn_pct = self.derived_outturn(m);
        let rejection_reasons = self.rejection_reasons(m);

        let decision = if !rejection_reasons.is_empty() {
            Decision::Rejected
        } else if derived_outturn_pct.is_some() {
            Decision::Accepted
        } else {
            Decision::Pending
        };

        let final_price = if rejection_reasons.is_empty() {
            derived_outturn_pct
                .and_then(|derived| self.price_breakdown(m, derived))
                .map(|b| b.final_price)
        } else {
            None
        };

        AssessmentResult {
            foreign_matter_pct: round2(m.foreign_matter()),
            clean_outturn_pct: self.clean_outturn(m),
            derived_outturn_pct,
            rejection_reasons,
            decision,
            final_price,
        }
    }

    /// 100 less every defect and foreign matter percentage. Not clamped;
    /// saturates at the `Decimal` range for absurd inputs.
    pub fn clean_outturn(&self, m: &QualityMeasurement) -> Decimal {
        let losses = [
            m.group1_defect_pct,
            m.group2_defect_pct,
            m.pods_pct,
            m.husks_pct,
            m.stones_pct,
            m.below_screen12_pct,
        ];
        round2(
            losses
                .iter()
                .fold(Decimal::ONE_HUNDRED, |acc, loss| acc.saturating_sub(*loss)),
        )
    }

    /// 100 less the excess of each measurement over its tolerance, and all
    /// foreign matter. `None` only under [`BelowScreenGate::Reject`].
    pub fn derived_outturn(&self, m: &QualityMeasurement) -> Option<Decimal> {
        if self.below_screen_gate == BelowScreenGate::Reject
            && m.below_screen12_pct > self.thresholds.below_screen12
        {
            return None;
        }

        let t = &self.tolerances;
        let losses = [
            excess(m.moisture_pct, t.moisture),
            excess(m.group1_defect_pct, t.group1),
            excess(m.group2_defect_pct, t.group2),
            m.pods_pct,
            m.husks_pct,
            m.stones_pct,
            excess(m.below_screen12_pct, t.below_screen12),
        ];
        Some(round2(
            losses
                .iter()
                .fold(Decimal::ONE_HUNDRED, |acc, loss| acc.saturating_sub(*loss)),
        ))
    }

    /// Every hard limit the lot breaks, in a fixed order
    pub fn rejection_reasons(&self, m: &QualityMeasurement) -> Vec<String> {
        let t = &self.thresholds;
        let foreign_matter = m.foreign_matter();
        let mut reasons = Vec::new();

        if m.below_screen12_pct > t.below_screen12 {
            reasons.push(format!(
                "Below screen 12 {}% > {}%",
                m.below_screen12_pct, t.below_screen12
            ));
        }
        if m.moisture_pct > t.moisture {
            reasons.push(format!("Moisture {}% > {}%", m.moisture_pct, t.moisture));
        }
        if m.group1_defect_pct > t.group1 {
            reasons.push(format!(
                "Group 1 defects {}% > {}%",
                m.group1_defect_pct, t.group1
            ));
        }
        if m.group2_defect_pct > t.group2 {
            reasons.push(format!(
                "Group 2 defects {}% > {}%",
                m.group2_defect_pct, t.group2
            ));
        }
        if m.pods_pct > t.pods {
            reasons.push(format!("Pods {}% > {}%", m.pods_pct, t.pods));
        }
        if m.husks_pct > t.husks {
            reasons.push(format!("Husks {}% > {}%", m.husks_pct, t.husks));
        }
        if m.stones_pct > t.stones {
            reasons.push(format!("Stones {}% > {}%", m.stones_pct, t.stones));
        }
        if foreign_matter > t.foreign_matter {
            reasons.push(format!(
                "Pods+Husks+Stones {}% > {}%",
                round2(foreign_matter),
                t.foreign_matter
            ));
        }

        reasons
    }

    /// Whether the lot earns the quality bonus
    pub fn qualifies_for_bonus(&self, m: &QualityMeasurement, derived_outturn: Decimal) -> bool {
        let b = &self.bonus;
        m.group1_defect_pct <= b.max_group1
            && m.group2_defect_pct <= b.max_group2
            && m.moisture_pct <= b.max_moisture
            && derived_outturn >= b.min_derived_outturn
            && m.pods_pct.is_zero()
            && m.husks_pct.is_zero()
            && m.stones_pct.is_zero()
            && m.below_screen12_pct <= b.max_below_screen12
    }

    /// Price a lot from its stored derived outturn. `None` without a
    /// reference price, or when a term leaves the `Decimal` range.
    /// Rejection is not checked here; see [`Self::evaluate`].
    pub fn price_breakdown(
        &self,
        m: &QualityMeasurement,
        derived_outturn: Decimal,
    ) -> Option<PriceBreakdown> {
        let reference_price = m.reference_price?;
        let r = &self.rates;
        let mut adjustments = Vec::new();
        let mut push = |kind: AdjustmentKind, amount: Decimal| {
            if !amount.is_zero() {
                adjustments.push(PriceAdjustment { kind, amount });
            }
        };
        // (value - from) * rate
        let over = |value: Decimal, from: Decimal, rate: Decimal| -> Option<Decimal> {
            value.checked_sub(from)?.checked_mul(rate)
        };

        if self.qualifies_for_bonus(m, derived_outturn) {
            push(AdjustmentKind::QualityBonus, self.bonus.amount);
        }
        if m.moisture_pct >= r.moisture_from {
            let penalty = over(m.moisture_pct, r.moisture_from, reference_price)?
                .checked_mul(r.moisture_rate)?;
            push(AdjustmentKind::Moisture, -penalty);
        }
        if m.group1_defect_pct > r.group1_from {
            push(
                AdjustmentKind::Group1Defects,
                -over(m.group1_defect_pct, r.group1_from, r.group1_rate)?,
            );
        }
        if m.group2_defect_pct > r.group2_from {
            push(
                AdjustmentKind::Group2Defects,
                -over(m.group2_defect_pct, r.group2_from, r.group2_rate)?,
            );
        }
        if derived_outturn < r.outturn_floor {
            push(
                AdjustmentKind::OutturnShortfall,
                -over(r.outturn_floor, derived_outturn, r.outturn_rate)?,
            );
        } else if derived_outturn > r.outturn_ceiling {
            push(
                AdjustmentKind::OutturnPremium,
                over(derived_outturn, r.outturn_ceiling, r.outturn_rate)?,
            );
        }
        push(AdjustmentKind::Pods, -m.pods_pct.checked_mul(r.pods_rate)?);
        push(AdjustmentKind::Husks, -m.husks_pct.checked_mul(r.husks_rate)?);
        push(AdjustmentKind::Stones, -m.stones_pct.checked_mul(r.stones_rate)?);
        if m.below_screen12_pct > r.below_screen12_from {
            push(
                AdjustmentKind::BelowScreen12,
                -over(m.below_screen12_pct, r.below_screen12_from, r.below_screen12_rate)?,
            );
        }
        push(AdjustmentKind::Discretion, m.discretion_adjustment);

        let raw = adjustments
            .iter()
            .try_fold(reference_price, |price, a| price.checked_add(a.amount))?;
        let final_price = round2(raw).max(zero2());

        Some(PriceBreakdown {
            reference_price,
            adjustments,
            final_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn perfect_lot() -> QualityMeasurement {
        QualityMeasurement {
            moisture_pct: dec("12"),
            group1_defect_pct: dec("0.5"),
            group2_defect_pct: dec("3"),
            below_screen12_pct: dec("0.5"),
            pods_pct: Decimal::ZERO,
            husks_pct: Decimal::ZERO,
            stones_pct: Decimal::ZERO,
            reference_price: Some(dec("5000")),
            offered_price: None,
            discretion_adjustment: Decimal::ZERO,
        }
    }

    /// Derived outturn of exactly 75 without breaking any hard limit
    fn borderline_lot() -> QualityMeasurement {
        QualityMeasurement {
            moisture_pct: dec("16"),
            group1_defect_pct: dec("9"),
            group2_defect_pct: dec("25"),
            below_screen12_pct: dec("1"),
            pods_pct: dec("1"),
            husks_pct: dec("1"),
            stones_pct: dec("1"),
            reference_price: Some(dec("5000")),
            offered_price: None,
            discretion_adjustment: Decimal::ZERO,
        }
    }

    #[test]
    fn test_perfect_lot_gets_bonus_and_premium() {
        let result = evaluate(&perfect_lot());
        assert_eq!(result.decision, Decision::Accepted);
        assert!(result.rejection_reasons.is_empty());
        assert_eq!(result.derived_outturn_pct, Some(dec("100")));
        assert_eq!(result.clean_outturn_pct.to_string(), "96.00");
        assert_eq!(result.foreign_matter_pct.to_string(), "0.00");
        // 5000 + 2000 bonus + (100 - 82) * 50
        assert_eq!(result.final_price.map(|p| p.to_string()), Some("7900.00".to_string()));
    }

    #[test]
    fn test_perfect_lot_breakdown_lines() {
        let policy = PricingPolicy::default();
        let breakdown = policy.price_breakdown(&perfect_lot(), dec("100")).unwrap();
        assert_eq!(breakdown.adjustment(AdjustmentKind::QualityBonus), Some(dec("2000")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::OutturnPremium), Some(dec("900")));
        assert_eq!(breakdown.adjustments.len(), 2);
    }

    #[test]
    fn test_below_screen_breach_rejects() {
        let mut m = perfect_lot();
        m.below_screen12_pct = dec("4");
        let result = evaluate(&m);
        assert_eq!(result.decision, Decision::Rejected);
        assert!(result
            .rejection_reasons
            .contains(&"Below screen 12 4% > 3%".to_string()));
        assert_eq!(result.final_price, None);
        // Report gate still computes the outturn
        assert_eq!(result.derived_outturn_pct, Some(dec("97")));
    }

    #[test]
    fn test_reject_gate_drops_derived_outturn() {
        let policy = PricingPolicy {
            below_screen_gate: BelowScreenGate::Reject,
            ..PricingPolicy::default()
        };
        let mut m = perfect_lot();
        m.below_screen12_pct = dec("3.5");
        let result = policy.evaluate(&m);
        assert_eq!(result.derived_outturn_pct, None);
        assert_eq!(result.decision, Decision::Rejected);
        assert_eq!(result.final_price, None);

        m.below_screen12_pct = dec("3");
        assert!(policy.evaluate(&m).derived_outturn_pct.is_some());
    }

    #[test]
    fn test_borderline_outturn_shortfall() {
        let m = borderline_lot();
        let result = evaluate(&m);
        assert!(result.rejection_reasons.is_empty());
        assert_eq!(result.derived_outturn_pct, Some(dec("75")));

        let breakdown = PricingPolicy::default()
            .price_breakdown(&m, dec("75"))
            .unwrap();
        assert_eq!(breakdown.adjustment(AdjustmentKind::OutturnShortfall), Some(dec("-150")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::Moisture), Some(dec("-20")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::Group1Defects), Some(dec("-250")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::Group2Defects), Some(dec("-300")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::Stones), Some(dec("-20")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::BelowScreen12), None);
        // 5000 - 20 - 250 - 300 - 150 - 10 - 10 - 20
        assert_eq!(result.final_price, Some(dec("4240")));
    }

    #[test]
    fn test_missing_reference_price_is_unpriced() {
        let mut m = perfect_lot();
        m.reference_price = None;
        let result = evaluate(&m);
        assert_eq!(result.final_price, None);
        assert_eq!(result.decision, Decision::Accepted);
    }

    #[test]
    fn test_reason_order_and_format() {
        let m = QualityMeasurement {
            moisture_pct: dec("17.25"),
            group1_defect_pct: dec("11"),
            group2_defect_pct: dec("26"),
            below_screen12_pct: dec("3.5"),
            pods_pct: dec("2.5"),
            husks_pct: dec("2.5"),
            stones_pct: dec("7"),
            reference_price: Some(dec("5000")),
            offered_price: None,
            discretion_adjustment: Decimal::ZERO,
        };
        let reasons = evaluate(&m).rejection_reasons;
        assert_eq!(
            reasons,
            vec![
                "Below screen 12 3.5% > 3%",
                "Moisture 17.25% > 16.5%",
                "Group 1 defects 11% > 10%",
                "Group 2 defects 26% > 25%",
                "Stones 7% > 6%",
                "Pods+Husks+Stones 12.00% > 6%",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let m = QualityMeasurement {
            moisture_pct: dec("16.5"),
            group1_defect_pct: dec("10"),
            group2_defect_pct: dec("25"),
            below_screen12_pct: dec("3"),
            pods_pct: dec("2"),
            husks_pct: dec("2"),
            stones_pct: dec("2"),
            reference_price: Some(dec("5000")),
            offered_price: None,
            discretion_adjustment: Decimal::ZERO,
        };
        let result = evaluate(&m);
        assert!(result.rejection_reasons.is_empty());
        assert_eq!(result.decision, Decision::Accepted);
    }

    #[test]
    fn test_price_floors_at_zero() {
        let mut m = borderline_lot();
        m.reference_price = Some(dec("100"));
        m.discretion_adjustment = dec("-5000");
        let price = evaluate(&m).final_price.unwrap();
        assert_eq!(price.to_string(), "0.00");
    }

    #[test]
    fn test_discretion_is_added_last() {
        let mut m = perfect_lot();
        m.discretion_adjustment = dec("-150.255");
        // 7900 - 150.255 = 7749.745 -> 7749.75
        assert_eq!(evaluate(&m).final_price, Some(dec("7749.75")));
    }

    #[test]
    fn test_moisture_penalty_scales_with_reference_price() {
        let mut m = perfect_lot();
        m.moisture_pct = dec("15");
        m.reference_price = Some(dec("6000"));
        let breakdown = PricingPolicy::default()
            .price_breakdown(&m, evaluate(&m).derived_outturn_pct.unwrap())
            .unwrap();
        // (15 - 14) * 6000 * 0.002
        assert_eq!(breakdown.adjustment(AdjustmentKind::Moisture), Some(dec("-12")));
        assert_eq!(breakdown.adjustment(AdjustmentKind::QualityBonus), None);
    }

    #[test]
    fn test_moisture_at_fourteen_has_no_penalty_line() {
        let mut m = perfect_lot();
        m.moisture_pct = dec("14");
        let breakdown = PricingPolicy::default()
            .price_breakdown(&m, dec("100"))
            .unwrap();
        assert_eq!(breakdown.adjustment(AdjustmentKind::Moisture), None);
    }

    #[test]
    fn test_negative_clean_outturn_is_preserved() {
        let mut m = perfect_lot();
        m.group1_defect_pct = dec("60");
        m.group2_defect_pct = dec("50");
        assert_eq!(evaluate(&m).clean_outturn_pct, dec("-10.5"));
    }

    #[test]
    fn test_out_of_range_terms_leave_lot_unpriced() {
        // Stones penalty alone is beyond the Decimal range
        let mut m = perfect_lot();
        m.stones_pct = dec("-5000000000000000000000000000");
        let result = evaluate(&m);
        assert!(result.rejection_reasons.is_empty());
        assert_eq!(result.decision, Decision::Accepted);
        assert_eq!(result.final_price, None);

        // Reference plus bonus overflows
        let mut m = perfect_lot();
        m.reference_price = Some(Decimal::MAX);
        let result = evaluate(&m);
        assert_eq!(result.final_price, None);
        assert!(PricingPolicy::default().price_breakdown(&m, dec("100")).is_none());
    }

    #[test]
    fn test_extreme_percentages_saturate() {
        let m = QualityMeasurement {
            moisture_pct: Decimal::MAX,
            group1_defect_pct: Decimal::MAX,
            group2_defect_pct: Decimal::MAX,
            below_screen12_pct: Decimal::MAX,
            pods_pct: Decimal::MAX,
            husks_pct: Decimal::MAX,
            stones_pct: Decimal::MAX,
            reference_price: Some(Decimal::MAX),
            offered_price: None,
            discretion_adjustment: Decimal::MIN,
        };
        let result = evaluate(&m);
        assert_eq!(result.decision, Decision::Rejected);
        assert_eq!(result.rejection_reasons.len(), 8);
        assert_eq!(result.final_price, None);
        assert_eq!(result.clean_outturn_pct, Decimal::MIN);
        assert_eq!(m.foreign_matter(), Decimal::MAX);

        let mut negative = m;
        negative.group1_defect_pct = Decimal::MIN;
        negative.group2_defect_pct = Decimal::MIN;
        negative.below_screen12_pct = Decimal::MIN;
        negative.pods_pct = Decimal::MIN;
        negative.husks_pct = Decimal::MIN;
        negative.stones_pct = Decimal::MIN;
        negative.moisture_pct = dec("12");
        let result = evaluate(&negative);
        assert!(result.rejection_reasons.is_empty());
        assert_eq!(result.clean_outturn_pct, Decimal::MAX);
        assert_eq!(result.final_price, None);
    }

    #[test]
    fn test_policy_overrides_from_partial_json() {
        let policy: PricingPolicy = serde_json::from_str(
            r#"{ "below_screen_gate": "reject", "bonus": { "amount": "2500" } }"#,
        )
        .unwrap();
        assert_eq!(policy.below_screen_gate, BelowScreenGate::Reject);
        assert_eq!(policy.bonus.amount, dec("2500"));
        assert_eq!(policy.bonus.max_moisture, dec("13"));
        assert_eq!(policy.thresholds, RejectionThresholds::default());
    }
}
