//! Inventory valuation models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::StockKey;
use crate::types::{round2, zero2};

/// Stock held for one (category, type) pair, valued at weighted-average cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryBucket {
    pub key: StockKey,
    pub quantity: Decimal,
    pub unit: String,
    /// Weighted average cost per unit
    pub average_unit_cost: Decimal,
    /// quantity × average_unit_cost
    pub current_value: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// Raised when an issue would take stock below zero
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Insufficient stock. Available: {available}{unit}, Requested: {requested}{unit}")]
pub struct InsufficientStock {
    pub available: Decimal,
    pub requested: Decimal,
    pub unit: String,
}

impl InventoryBucket {
    pub fn new(key: StockKey) -> Self {
        Self {
            key,
            quantity: zero2(),
            unit: "kg".to_string(),
            average_unit_cost: zero2(),
            current_value: zero2(),
            last_updated: Utc::now(),
        }
    }

    pub fn has_sufficient_stock(&self, quantity: Decimal) -> bool {
        self.quantity >= round2(quantity)
    }

    /// Apply a stock movement.
    ///
    /// A positive `quantity_change` is a receipt and `cost_change` is the
    /// total cost of that quantity; the average cost is re-weighted. A
    /// negative change is an issue: cost is ignored and the average stays.
    pub fn apply_change(
        &mut self,
        quantity_change: Decimal,
        cost_change: Decimal,
    ) -> Result<(), InsufficientStock> {
        let delta = round2(quantity_change);
        let new_quantity = round2(self.quantity + delta);

        if new_quantity < Decimal::ZERO {
            return Err(InsufficientStock {
                available: self.quantity,
                requested: -delta,
                unit: self.unit.clone(),
            });
        }

        if delta > Decimal::ZERO {
            let added_cost = round2(cost_change);
            self.average_unit_cost = if self.quantity <= Decimal::ZERO {
                if added_cost > Decimal::ZERO {
                    round2(added_cost / delta)
                } else {
                    self.average_unit_cost
                }
            } else {
                let existing_cost = round2(self.quantity * self.average_unit_cost);
                round2((existing_cost + added_cost) / (self.quantity + delta))
            };
        }

        self.quantity = new_quantity;
        self.refresh_value();
        Ok(())
    }

    fn refresh_value(&mut self) {
        self.quantity = round2(self.quantity);
        self.average_unit_cost = round2(self.average_unit_cost);
        self.current_value = round2(self.quantity * self.average_unit_cost);
        self.last_updated = Utc::now();
    }
}

impl std::fmt::Display for InventoryBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} - {}{}",
            self.key.category, self.key.coffee_type, self.quantity, self.unit
        )
    }
}
