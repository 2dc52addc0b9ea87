//! Supplier payables models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::round2;

/// Running balance owed to a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierAccount {
    pub supplier: String,
    pub balance: Decimal,
}

/// A posting against a supplier account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierTransaction {
    pub id: Uuid,
    pub supplier: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// Lot the posting came from, if any
    pub lot_id: Option<Uuid>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Debit increases what is owed, credit (a payment) decreases it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl SupplierTransaction {
    /// Effect of this transaction on the account balance
    pub fn signed_amount(&self) -> Decimal {
        let amount = round2(self.amount);
        match self.kind {
            TransactionKind::Debit => amount,
            TransactionKind::Credit => -amount,
        }
    }
}
