//! Quality and payables summary for the finance dashboard

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{round2, round_half_up, AssessmentRecord, CoffeePurchase, Decision};

/// Counters and averages over all assessments
#[derive(Debug, Clone, Serialize)]
pub struct QualitySummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub pending: usize,
    pub assessed_today: usize,
    pub accepted_today: usize,
    pub rejected_today: usize,
    /// Accepted share of all assessments, in percent
    pub acceptance_rate: Decimal,
    /// Rejected share of all assessments, in percent to one place
    pub rejection_rate: Decimal,
    pub avg_clean_outturn: Option<Decimal>,
    pub avg_final_price: Option<Decimal>,
    /// Σ quantity × final_price; unpriced lots count as zero
    pub total_value: Decimal,
    pub recent_rejections: Vec<RejectionEntry>,
    /// Purchases with no assessment yet, or a pending one
    pub awaiting_assessment: Vec<Uuid>,
}

/// A rejected lot and why
#[derive(Debug, Clone, Serialize)]
pub struct RejectionEntry {
    pub lot_id: Uuid,
    pub supplier: Option<String>,
    pub reasons: Vec<String>,
}

fn average(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().sum();
    Some(round2(total / Decimal::from(values.len())))
}

/// Build the quality summary.
///
/// `records` is expected newest first, as returned by
/// [`super::AssessmentService::list`].
pub fn quality_summary(
    records: &[&AssessmentRecord],
    purchases: &[CoffeePurchase],
    today: NaiveDate,
    recent_rejections: usize,
) -> QualitySummary {
    let purchases_by_id: HashMap<Uuid, &CoffeePurchase> =
        purchases.iter().map(|p| (p.id, p)).collect();

    let count = |decision: Decision| {
        records
            .iter()
            .filter(|r| r.result.decision == decision)
            .count()
    };
    let todays: Vec<_> = records
        .iter()
        .filter(|r| r.created_at.date_naive() == today)
        .collect();
    let count_today = |decision: Decision| {
        todays
            .iter()
            .filter(|r| r.result.decision == decision)
            .count()
    };

    let total = records.len();
    let accepted = count(Decision::Accepted);
    let rejected = count(Decision::Rejected);
    let share = |n: usize| {
        if total == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(n * 100) / Decimal::from(total)
        }
    };
    let acceptance_rate = round2(share(accepted));
    let rejection_rate = round_half_up(share(rejected), 1);

    let clean_outturns: Vec<Decimal> = records.iter().map(|r| r.result.clean_outturn_pct).collect();
    let final_prices: Vec<Decimal> = records.iter().filter_map(|r| r.result.final_price).collect();

    let total_value = round2(
        records
            .iter()
            .filter_map(|r| {
                purchases_by_id
                    .get(&r.lot_id)
                    .map(|p| p.quantity_kg * r.result.final_price.unwrap_or(Decimal::ZERO))
            })
            .sum(),
    );

    let recent_rejections = records
        .iter()
        .filter(|r| r.result.is_rejected())
        .take(recent_rejections)
        .map(|r| RejectionEntry {
            lot_id: r.lot_id,
            supplier: purchases_by_id.get(&r.lot_id).map(|p| p.supplier.clone()),
            reasons: r.result.rejection_reasons.clone(),
        })
        .collect();

    let decisions: HashMap<Uuid, Decision> =
        records.iter().map(|r| (r.lot_id, r.result.decision)).collect();
    let awaiting_assessment = purchases
        .iter()
        .filter(|p| matches!(decisions.get(&p.id), None | Some(Decision::Pending)))
        .map(|p| p.id)
        .collect();

    QualitySummary {
        total,
        accepted,
        rejected,
        pending: count(Decision::Pending),
        assessed_today: todays.len(),
        accepted_today: count_today(Decision::Accepted),
        rejected_today: count_today(Decision::Rejected),
        acceptance_rate,
        rejection_rate,
        avg_clean_outturn: average(&clean_outturns),
        avg_final_price: average(&final_prices),
        total_value,
        recent_rejections,
        awaiting_assessment,
    }
}
