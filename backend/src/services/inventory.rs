//! Inventory service: stock intake from accepted lots and deductions for sales

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    round2, validate_amount, validate_quantity, zero2, AssessmentRecord, CoffeeCategory,
    CoffeePurchase, CoffeeType, InsufficientStock, InventoryBucket, StockKey,
};

/// Sales are taken from green stock
pub const SALES_CATEGORY: CoffeeCategory = CoffeeCategory::Green;

/// Inventory service keeping one bucket per (category, type)
#[derive(Debug, Clone, Default)]
pub struct InventoryService {
    buckets: BTreeMap<StockKey, InventoryBucket>,
    /// Lots whose quantity is already in stock
    stocked_lots: HashSet<Uuid>,
}

/// Coffee type as written on a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleCoffeeType {
    Arabica,
    Robusta,
}

impl From<SaleCoffeeType> for CoffeeType {
    fn from(sale_type: SaleCoffeeType) -> Self {
        match sale_type {
            SaleCoffeeType::Arabica => CoffeeType::Arabica,
            SaleCoffeeType::Robusta => CoffeeType::Robusta,
        }
    }
}

/// What happened when an assessment reached the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOutcome {
    Stocked,
    AlreadyStocked,
    NotAccepted,
    Unpriced,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` at a total cost, re-weighting the average unit cost
    pub fn receive(
        &mut self,
        key: StockKey,
        quantity: Decimal,
        total_cost: Decimal,
    ) -> AppResult<&InventoryBucket> {
        validate_quantity(quantity).map_err(|m| AppError::invalid_amount("quantity", m))?;
        validate_amount(total_cost).map_err(|m| AppError::invalid_amount("total_cost", m))?;

        let bucket = self
            .buckets
            .entry(key)
            .or_insert_with(|| InventoryBucket::new(key));
        bucket.apply_change(quantity, total_cost)?;

        tracing::info!(
            bucket = %bucket,
            average_unit_cost = %bucket.average_unit_cost,
            "stock received"
        );
        Ok(&*bucket)
    }

    /// Take `quantity` out of stock; the average cost is unchanged
    pub fn issue(&mut self, key: StockKey, quantity: Decimal) -> AppResult<&InventoryBucket> {
        validate_quantity(quantity).map_err(|m| AppError::invalid_amount("quantity", m))?;

        let Some(bucket) = self.buckets.get_mut(&key) else {
            return Err(InsufficientStock {
                available: zero2(),
                requested: round2(quantity),
                unit: "kg".to_string(),
            }
            .into());
        };
        bucket.apply_change(-quantity, Decimal::ZERO)?;

        tracing::info!(bucket = %bucket, "stock issued");
        Ok(&*bucket)
    }

    /// Stock an accepted, priced lot at `final_price × quantity`. A lot is
    /// stocked at most once, however often it is reassessed.
    pub fn apply_assessment(
        &mut self,
        purchase: &CoffeePurchase,
        record: &AssessmentRecord,
    ) -> AppResult<IntakeOutcome> {
        if !record.result.is_accepted() {
            return Ok(IntakeOutcome::NotAccepted);
        }
        let Some(price) = record.result.final_price else {
            tracing::warn!(lot_id = %purchase.id, "accepted lot has no price, not stocked");
            return Ok(IntakeOutcome::Unpriced);
        };
        if self.stocked_lots.contains(&purchase.id) {
            return Ok(IntakeOutcome::AlreadyStocked);
        }

        let total_cost = round2(price * purchase.quantity_kg);
        self.receive(StockKey::from(purchase), purchase.quantity_kg, total_cost)?;
        self.stocked_lots.insert(purchase.id);
        Ok(IntakeOutcome::Stocked)
    }

    /// Deduct sold green coffee
    pub fn record_sale(
        &mut self,
        coffee_type: SaleCoffeeType,
        quantity: Decimal,
    ) -> AppResult<&InventoryBucket> {
        self.issue(StockKey::new(SALES_CATEGORY, coffee_type.into()), quantity)
    }

    pub fn bucket(&self, key: StockKey) -> Option<&InventoryBucket> {
        self.buckets.get(&key)
    }

    /// Buckets ordered by category then type
    pub fn buckets(&self) -> impl Iterator<Item = &InventoryBucket> {
        self.buckets.values()
    }

    pub fn is_stocked(&self, lot_id: Uuid) -> bool {
        self.stocked_lots.contains(&lot_id)
    }

    /// Value of everything on hand
    pub fn total_value(&self) -> Decimal {
        round2(self.buckets.values().map(|b| b.current_value).sum())
    }
}
