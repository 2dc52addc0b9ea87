//! Assessment lifecycle: one assessment per lot, recomputed on every edit

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_measurement, AssessmentRecord, AssessmentResult, PricingPolicy, QualityMeasurement};

/// Assessment service holding the current assessment of each lot
#[derive(Debug, Clone, Default)]
pub struct AssessmentService {
    policy: PricingPolicy,
    /// Refuse out-of-range measurements before evaluating
    strict: bool,
    records: HashMap<Uuid, AssessmentRecord>,
}

/// What a call to [`AssessmentService::record`] changed
#[derive(Debug, Clone)]
pub struct AssessmentOutcome {
    pub record: AssessmentRecord,
    /// Result before this call, `None` on first assessment
    pub previous: Option<AssessmentResult>,
}

impl AssessmentOutcome {
    pub fn is_new(&self) -> bool {
        self.previous.is_none()
    }

    /// Decision changed compared to the previous result
    pub fn decision_changed(&self) -> bool {
        self.previous
            .as_ref()
            .map_or(true, |p| p.decision != self.record.result.decision)
    }
}

impl AssessmentService {
    /// Create a new AssessmentService instance
    pub fn new(policy: PricingPolicy) -> Self {
        Self {
            policy,
            strict: false,
            records: HashMap::new(),
        }
    }

    /// Validate every measurement before recording it
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Evaluate a measurement without recording anything
    pub fn preview(&self, measurement: &QualityMeasurement) -> AppResult<AssessmentResult> {
        if self.strict {
            validate_measurement(measurement)?;
        }
        Ok(self.policy.evaluate(measurement))
    }

    /// Create the lot's assessment, or replace it with a full recomputation
    pub fn record(
        &mut self,
        lot_id: Uuid,
        measurement: QualityMeasurement,
        assessed_by: Option<String>,
    ) -> AppResult<AssessmentOutcome> {
        let result = self.preview(&measurement)?;
        let now = Utc::now();

        let outcome = match self.records.get_mut(&lot_id) {
            Some(existing) => {
                let previous = std::mem::replace(&mut existing.result, result);
                existing.measurement = measurement;
                if assessed_by.is_some() {
                    existing.assessed_by = assessed_by;
                }
                existing.updated_at = now;
                existing.revision += 1;

                tracing::debug!(
                    lot_id = %lot_id,
                    revision = existing.revision,
                    "assessment recomputed"
                );

                AssessmentOutcome {
                    record: existing.clone(),
                    previous: Some(previous),
                }
            }
            None => {
                let record = AssessmentRecord {
                    lot_id,
                    assessed_by,
                    measurement,
                    result,
                    created_at: now,
                    updated_at: now,
                    revision: 0,
                };
                self.records.insert(lot_id, record.clone());
                AssessmentOutcome {
                    record,
                    previous: None,
                }
            }
        };

        let result = &outcome.record.result;
        if result.is_rejected() {
            tracing::warn!(
                lot_id = %lot_id,
                reasons = %result.rejection_reasons.join("; "),
                "lot rejected"
            );
        } else {
            tracing::info!(
                lot_id = %lot_id,
                decision = %result.decision,
                final_price = ?result.final_price,
                "assessment recorded"
            );
        }

        Ok(outcome)
    }

    pub fn get(&self, lot_id: Uuid) -> AppResult<&AssessmentRecord> {
        self.records
            .get(&lot_id)
            .ok_or_else(|| AppError::NotFound(format!("Assessment for lot {}", lot_id)))
    }

    /// All assessments, newest first
    pub fn list(&self) -> Vec<&AssessmentRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.lot_id.cmp(&a.lot_id)));
        records
    }

    pub fn remove(&mut self, lot_id: Uuid) -> AppResult<AssessmentRecord> {
        self.records
            .remove(&lot_id)
            .ok_or_else(|| AppError::NotFound(format!("Assessment for lot {}", lot_id)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
