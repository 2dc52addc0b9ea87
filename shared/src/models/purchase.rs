//! Supplier purchase and stock classification models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A delivered batch of coffee from one supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoffeePurchase {
    pub id: Uuid,
    pub supplier: String,
    pub quantity_kg: Decimal,
    pub category: CoffeeCategory,
    pub coffee_type: CoffeeType,
    pub purchase_date: NaiveDate,
}

/// Physical form of the coffee
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CoffeeCategory {
    Green,
    Parchment,
    Kiboko,
}

impl std::fmt::Display for CoffeeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoffeeCategory::Green => write!(f, "Green Coffee"),
            CoffeeCategory::Parchment => write!(f, "Parchment Coffee"),
            CoffeeCategory::Kiboko => write!(f, "Kiboko Coffee"),
        }
    }
}

/// Coffee species
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CoffeeType {
    Arabica,
    Robusta,
    Blend,
}

impl std::fmt::Display for CoffeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoffeeType::Arabica => write!(f, "Arabica"),
            CoffeeType::Robusta => write!(f, "Robusta"),
            CoffeeType::Blend => write!(f, "Blend"),
        }
    }
}

/// Stock bucket key: one bucket per (category, type)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StockKey {
    pub category: CoffeeCategory,
    pub coffee_type: CoffeeType,
}

impl StockKey {
    pub fn new(category: CoffeeCategory, coffee_type: CoffeeType) -> Self {
        Self {
            category,
            coffee_type,
        }
    }
}

impl From<&CoffeePurchase> for StockKey {
    fn from(purchase: &CoffeePurchase) -> Self {
        Self::new(purchase.category, purchase.coffee_type)
    }
}
