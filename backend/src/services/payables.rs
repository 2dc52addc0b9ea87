//! Supplier payables ledger
//!
//! Every (re)assessment posts the change in what the lot is worth to its
//! supplier's account; payments are credits against the same account.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    round2, validate_quantity, zero2, AssessmentResult, CoffeePurchase, SupplierAccount,
    SupplierTransaction, TransactionKind,
};

/// Ledger of supplier accounts and their postings
#[derive(Debug, Clone, Default)]
pub struct PayablesLedger {
    accounts: BTreeMap<String, SupplierAccount>,
    transactions: Vec<SupplierTransaction>,
}

/// Amount owed for a lot: `final_price × quantity`, zero when unpriced
pub fn lot_payable(result: Option<&AssessmentResult>, quantity_kg: Decimal) -> Decimal {
    match result.and_then(|r| r.final_price) {
        Some(price) => round2(price * quantity_kg),
        None => zero2(),
    }
}

impl PayablesLedger {
    /// Create a new PayablesLedger instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an account with a zero balance if the supplier has none yet
    pub fn open_account(&mut self, supplier: &str) -> &SupplierAccount {
        self.accounts
            .entry(supplier.to_string())
            .or_insert_with(|| SupplierAccount {
                supplier: supplier.to_string(),
                balance: zero2(),
            })
    }

    /// Post the difference between the lot's previous and current payable.
    /// Returns the posted delta, `None` when nothing changed.
    pub fn post_assessment(
        &mut self,
        purchase: &CoffeePurchase,
        previous: Option<&AssessmentResult>,
        current: &AssessmentResult,
    ) -> Option<Decimal> {
        let before = lot_payable(previous, purchase.quantity_kg);
        let after = lot_payable(Some(current), purchase.quantity_kg);
        let delta = round2(after - before);
        if delta.is_zero() {
            return None;
        }

        let kind = if delta > Decimal::ZERO {
            TransactionKind::Debit
        } else {
            TransactionKind::Credit
        };
        self.post(
            &purchase.supplier,
            kind,
            delta.abs(),
            Some(purchase.id),
            format!("Assessment of lot {}", purchase.id),
        );

        tracing::info!(
            supplier = %purchase.supplier,
            lot_id = %purchase.id,
            delta = %delta,
            "payable adjusted"
        );
        Some(delta)
    }

    /// Record a payment made to a supplier
    pub fn record_payment(
        &mut self,
        supplier: &str,
        amount: Decimal,
        description: impl Into<String>,
    ) -> AppResult<&SupplierTransaction> {
        validate_quantity(amount).map_err(|_| {
            AppError::invalid_amount("amount", "Payment must be greater than zero")
        })?;
        if !self.accounts.contains_key(supplier) {
            return Err(AppError::NotFound(format!("Supplier account {}", supplier)));
        }

        tracing::info!(supplier = %supplier, amount = %amount, "payment recorded");
        Ok(self.post(supplier, TransactionKind::Credit, amount, None, description.into()))
    }

    /// Record a manual charge owed to a supplier
    pub fn record_debit(
        &mut self,
        supplier: &str,
        amount: Decimal,
        description: impl Into<String>,
    ) -> AppResult<&SupplierTransaction> {
        validate_quantity(amount).map_err(|_| {
            AppError::invalid_amount("amount", "Debit must be greater than zero")
        })?;
        Ok(self.post(supplier, TransactionKind::Debit, amount, None, description.into()))
    }

    fn post(
        &mut self,
        supplier: &str,
        kind: TransactionKind,
        amount: Decimal,
        lot_id: Option<Uuid>,
        description: String,
    ) -> &SupplierTransaction {
        let transaction = SupplierTransaction {
            id: Uuid::new_v4(),
            supplier: supplier.to_string(),
            kind,
            amount: round2(amount),
            lot_id,
            description,
            created_at: Utc::now(),
        };

        self.open_account(supplier);
        if let Some(account) = self.accounts.get_mut(supplier) {
            account.balance = round2(account.balance + transaction.signed_amount());
        }

        self.transactions.push(transaction);
        &self.transactions[self.transactions.len() - 1]
    }

    pub fn balance(&self, supplier: &str) -> Decimal {
        self.accounts
            .get(supplier)
            .map(|a| a.balance)
            .unwrap_or_else(zero2)
    }

    /// Sum of all supplier balances
    pub fn total_payable(&self) -> Decimal {
        round2(self.accounts.values().map(|a| a.balance).sum())
    }

    /// Accounts ordered by supplier name
    pub fn accounts(&self) -> impl Iterator<Item = &SupplierAccount> {
        self.accounts.values()
    }

    /// Postings for one supplier, oldest first
    pub fn transactions(&self, supplier: &str) -> Vec<&SupplierTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.supplier == supplier)
            .collect()
    }

    /// Most recent payments across all suppliers, newest first
    pub fn recent_payments(&self, limit: usize) -> Vec<&SupplierTransaction> {
        self.transactions
            .iter()
            .rev()
            .filter(|t| t.kind == TransactionKind::Credit && t.lot_id.is_none())
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{CoffeeCategory, CoffeeType, Decision};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn purchase(quantity: &str) -> CoffeePurchase {
        CoffeePurchase {
            id: Uuid::new_v4(),
            supplier: "Mbale Co-op".to_string(),
            quantity_kg: dec(quantity),
            category: CoffeeCategory::Parchment,
            coffee_type: CoffeeType::Arabica,
            purchase_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        }
    }

    fn result(final_price: Option<&str>) -> AssessmentResult {
        AssessmentResult {
            foreign_matter_pct: zero2(),
            clean_outturn_pct: dec("95"),
            derived_outturn_pct: Some(dec("98")),
            rejection_reasons: Vec::new(),
            decision: if final_price.is_some() {
                Decision::Accepted
            } else {
                Decision::Rejected
            },
            final_price: final_price.map(dec),
        }
    }

    #[test]
    fn test_lot_payable() {
        assert_eq!(lot_payable(Some(&result(Some("5000.50"))), dec("10")), dec("50005"));
        assert_eq!(lot_payable(Some(&result(None)), dec("10")), Decimal::ZERO);
        assert_eq!(lot_payable(None, dec("10")), Decimal::ZERO);
    }

    #[test]
    fn test_first_assessment_debits_full_payable() {
        let mut ledger = PayablesLedger::new();
        let p = purchase("100");
        let delta = ledger.post_assessment(&p, None, &result(Some("5000")));
        assert_eq!(delta, Some(dec("500000")));
        assert_eq!(ledger.balance("Mbale Co-op"), dec("500000"));
        assert_eq!(ledger.transactions("Mbale Co-op")[0].kind, TransactionKind::Debit);
    }

    #[test]
    fn test_reassessment_posts_only_the_difference() {
        let mut ledger = PayablesLedger::new();
        let p = purchase("100");
        let first = result(Some("5000"));
        ledger.post_assessment(&p, None, &first);

        let lower = result(Some("4800"));
        assert_eq!(ledger.post_assessment(&p, Some(&first), &lower), Some(dec("-20000")));
        assert_eq!(ledger.balance("Mbale Co-op"), dec("480000"));

        // Unchanged price posts nothing
        assert_eq!(ledger.post_assessment(&p, Some(&lower), &lower), None);
        assert_eq!(ledger.transactions("Mbale Co-op").len(), 2);
    }

    #[test]
    fn test_rejection_reverses_payable() {
        let mut ledger = PayablesLedger::new();
        let p = purchase("40");
        let accepted = result(Some("5000"));
        ledger.post_assessment(&p, None, &accepted);
        ledger.post_assessment(&p, Some(&accepted), &result(None));
        assert_eq!(ledger.balance("Mbale Co-op"), Decimal::ZERO);
    }

    #[test]
    fn test_payment_reduces_balance() {
        let mut ledger = PayablesLedger::new();
        let p = purchase("100");
        ledger.post_assessment(&p, None, &result(Some("5000")));
        ledger
            .record_payment("Mbale Co-op", dec("200000"), "Mobile money")
            .unwrap();
        assert_eq!(ledger.balance("Mbale Co-op"), dec("300000"));
        assert_eq!(ledger.total_payable(), dec("300000"));
        assert_eq!(ledger.recent_payments(5).len(), 1);
    }

    #[test]
    fn test_payment_to_unknown_supplier_fails() {
        let mut ledger = PayablesLedger::new();
        let err = ledger
            .record_payment("Nobody", dec("10"), "cash")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_non_positive_payment_fails() {
        let mut ledger = PayablesLedger::new();
        ledger.open_account("Mbale Co-op");
        assert!(ledger.record_payment("Mbale Co-op", dec("0"), "cash").is_err());
        assert!(ledger.record_debit("Mbale Co-op", dec("-5"), "fee").is_err());
    }
}
