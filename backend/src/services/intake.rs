//! Intake workflow: purchases, assessments and their downstream effects
//!
//! Recording an assessment posts the payable change to the supplier and,
//! once the lot is accepted and priced, puts its quantity into stock.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::assessment::{AssessmentOutcome, AssessmentService};
use super::dashboard::{quality_summary, QualitySummary};
use super::inventory::{IntakeOutcome, InventoryService, SaleCoffeeType};
use super::payables::PayablesLedger;
use crate::error::{AppError, AppResult};
use shared::{validate_quantity, CoffeePurchase, PricingPolicy, QualityMeasurement};

/// Everything the workflow did for one assessment
#[derive(Debug, Clone)]
pub struct AssessedLot {
    pub outcome: AssessmentOutcome,
    /// Payable change posted to the supplier, if any
    pub payable_delta: Option<Decimal>,
    pub intake: IntakeOutcome,
}

/// Snapshot of balances and stock
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReport {
    pub quality: QualitySummary,
    pub supplier_balances: Vec<shared::SupplierAccount>,
    pub total_payable: Decimal,
    pub inventory: Vec<shared::InventoryBucket>,
    pub inventory_value: Decimal,
}

/// Purchases plus the three services that react to their assessments
#[derive(Debug, Clone, Default)]
pub struct IntakeWorkflow {
    purchases: HashMap<Uuid, CoffeePurchase>,
    assessments: AssessmentService,
    inventory: InventoryService,
    payables: PayablesLedger,
}

impl IntakeWorkflow {
    pub fn new(policy: PricingPolicy, strict: bool) -> Self {
        Self {
            purchases: HashMap::new(),
            assessments: AssessmentService::new(policy).strict(strict),
            inventory: InventoryService::new(),
            payables: PayablesLedger::new(),
        }
    }

    /// Register a delivered lot and make sure its supplier has an account
    pub fn register_purchase(&mut self, purchase: CoffeePurchase) -> AppResult<()> {
        if self.purchases.contains_key(&purchase.id) {
            return Err(AppError::DuplicateEntry(format!("purchase {}", purchase.id)));
        }
        validate_quantity(purchase.quantity_kg)
            .map_err(|m| AppError::invalid_amount("quantity_kg", m))?;

        self.payables.open_account(&purchase.supplier);
        tracing::info!(
            lot_id = %purchase.id,
            supplier = %purchase.supplier,
            quantity_kg = %purchase.quantity_kg,
            "purchase registered"
        );
        self.purchases.insert(purchase.id, purchase);
        Ok(())
    }

    /// Assess (or reassess) a registered lot and apply its side effects
    pub fn assess(
        &mut self,
        lot_id: Uuid,
        measurement: QualityMeasurement,
        assessed_by: Option<String>,
    ) -> AppResult<AssessedLot> {
        let purchase = self
            .purchases
            .get(&lot_id)
            .ok_or_else(|| AppError::NotFound(format!("Purchase {}", lot_id)))?;

        let outcome = self.assessments.record(lot_id, measurement, assessed_by)?;
        let payable_delta = self.payables.post_assessment(
            purchase,
            outcome.previous.as_ref(),
            &outcome.record.result,
        );
        let intake = self.inventory.apply_assessment(purchase, &outcome.record)?;

        Ok(AssessedLot {
            outcome,
            payable_delta,
            intake,
        })
    }

    pub fn record_sale(&mut self, coffee_type: SaleCoffeeType, quantity: Decimal) -> AppResult<()> {
        self.inventory.record_sale(coffee_type, quantity)?;
        Ok(())
    }

    pub fn record_payment(&mut self, supplier: &str, amount: Decimal, description: &str) -> AppResult<()> {
        self.payables.record_payment(supplier, amount, description)?;
        Ok(())
    }

    pub fn purchase(&self, lot_id: Uuid) -> Option<&CoffeePurchase> {
        self.purchases.get(&lot_id)
    }

    pub fn assessments(&self) -> &AssessmentService {
        &self.assessments
    }

    pub fn inventory(&self) -> &InventoryService {
        &self.inventory
    }

    pub fn payables(&self) -> &PayablesLedger {
        &self.payables
    }

    /// Quality summary, balances and stock as of `today`
    pub fn report(&self, today: NaiveDate, recent_rejections: usize) -> IntakeReport {
        let mut purchases: Vec<CoffeePurchase> = self.purchases.values().cloned().collect();
        purchases.sort_by(|a, b| a.purchase_date.cmp(&b.purchase_date).then(a.id.cmp(&b.id)));

        IntakeReport {
            quality: quality_summary(&self.assessments.list(), &purchases, today, recent_rejections),
            supplier_balances: self.payables.accounts().cloned().collect(),
            total_payable: self.payables.total_payable(),
            inventory: self.inventory.buckets().cloned().collect(),
            inventory_value: self.inventory.total_value(),
        }
    }
}
