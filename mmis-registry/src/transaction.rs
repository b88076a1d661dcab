//! Wallet transactions

use mmis_query::{EntityKind, RecordSchema, Searchable, SearchableEntity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::record::Record;
use crate::registry::Registry;

static TRANSACTION_SCHEMA: OnceLock<RecordSchema<Transaction>> = OnceLock::new();

/// What a transaction paid for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Stall rent.
    Rent,
    /// Market service charge.
    ServiceCharge,
    /// Wallet withdrawal.
    Withdrawal,
    /// Trading licence fee.
    License,
    /// Gate entry fee.
    GateFee,
    /// Proceeds from a sale.
    SaleRevenue,
}

impl TransactionType {
    /// Get the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Rent => "RENT",
            TransactionType::ServiceCharge => "SERVICE_CHARGE",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::License => "LICENSE",
            TransactionType::GateFee => "GATE_FEE",
            TransactionType::SaleRevenue => "SALE_REVENUE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Settled.
    Success,
    /// Awaiting the payment provider.
    Pending,
    /// Rejected by the payment provider.
    Failed,
}

impl TransactionStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

/// A wallet ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Transaction identifier, e.g. `TX-101`
    pub id: String,

    /// Time of the transaction, `YYYY-MM-DD HH:MM`
    pub date: String,

    /// Amount (UGX)
    pub amount: f64,

    /// What it paid for
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Settlement state
    pub status: TransactionStatus,

    /// Payment method, e.g. `MTN_MOMO`
    pub method: String,
}

impl Transaction {
    /// Create a transaction record.
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
        tx_type: TransactionType,
        status: TransactionStatus,
        method: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            amount,
            tx_type,
            status,
            method: method.into(),
        }
    }
}

impl Searchable for Transaction {
    fn to_searchable(&self) -> SearchableEntity {
        SearchableEntity::new(
            EntityKind::Transaction,
            &self.id,
            format!("{} ({})", self.id, self.tx_type),
            Self::SEARCH_CATEGORY,
            Self::NAVIGATION_TARGET,
        )
        .with_secondary(&self.date)
        .with_secondary(&self.method)
    }
}

impl Record for Transaction {
    const NAVIGATION_TARGET: &'static str = "My Wallet";
    const SEARCH_CATEGORY: &'static str = "Ledger Entries";

    fn schema() -> &'static RecordSchema<Self> {
        TRANSACTION_SCHEMA.get_or_init(|| {
            RecordSchema::new("transaction")
                .search_text("id", |t: &Transaction| t.id.as_str())
                .search_text("method", |t: &Transaction| t.method.as_str())
                .text("type", |t: &Transaction| t.tx_type.as_str())
                .text("status", |t: &Transaction| t.status.as_str())
                .numeric("amount", |t: &Transaction| t.amount)
                .temporal("date", |t: &Transaction| t.date.as_str())
        })
    }

    fn collection(registry: &Registry) -> &[Self] {
        &registry.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmis_query::{filter_and_sort, QuerySpec, SortConfig};
    use TransactionStatus::{Failed, Pending, Success};
    use TransactionType::{GateFee, License, Rent, ServiceCharge, Withdrawal};

    fn ledger() -> Vec<Transaction> {
        vec![
            Transaction::new("TX-101", "2024-05-15 14:30", 250_000.0, Rent, Success, "MTN_MOMO"),
            Transaction::new("TX-102", "2024-05-14 09:15", 5_000.0, ServiceCharge, Success, "CASH"),
            Transaction::new("TX-103", "2024-05-12 11:20", 1_200_000.0, Withdrawal, Pending, "BANK"),
            Transaction::new("TX-104", "2024-05-10 16:45", 450_000.0, License, Failed, "CARD"),
            Transaction::new("TX-105", "2024-05-08 10:00", 30_000.0, ServiceCharge, Success, "MTN_MOMO"),
            Transaction::new("TX-106", "2024-05-18 08:30", 15_000.0, GateFee, Pending, "CASH"),
        ]
    }

    fn ids(found: Vec<&Transaction>) -> Vec<&str> {
        found.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_default_view_is_newest_first() {
        let ledger = ledger();
        let spec = QuerySpec::new().with_sort(SortConfig::descending("date"));
        let found = filter_and_sort(&ledger, &spec, Transaction::schema()).unwrap();
        assert_eq!(ids(found), vec!["TX-106", "TX-101", "TX-102", "TX-103", "TX-104", "TX-105"]);
    }

    #[test]
    fn test_amount_and_date_ranges() {
        let ledger = ledger();
        let spec = QuerySpec::new()
            .between("amount", "10000", "500000")
            .between("date", "2024-05-10", "2024-05-15");
        let found = filter_and_sort(&ledger, &spec, Transaction::schema()).unwrap();
        assert_eq!(ids(found), vec!["TX-101", "TX-104"]);
    }

    #[test]
    fn test_method_search_and_type_filter() {
        let ledger = ledger();
        let spec = QuerySpec::new().text("momo").equals("type", "SERVICE_CHARGE");
        let found = filter_and_sort(&ledger, &spec, Transaction::schema()).unwrap();
        assert_eq!(ids(found), vec!["TX-105"]);
    }

    #[test]
    fn test_projection_name() {
        let entity = ledger()[3].to_searchable();
        assert_eq!(entity.display_name, "TX-104 (LICENSE)");
        assert_eq!(entity.navigation_target, "My Wallet");
    }
}
