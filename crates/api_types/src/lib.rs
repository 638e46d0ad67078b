//! Wire types for the remote `transactions` resource.
//!
//! The store is an external HTTP service (json-server compatible): it owns
//! persistence and assigns ids, the client mirrors it in memory. Field
//! names here follow the wire contract (`camelCase`, `type` for the kind
//! tag, `price` as a JSON number in major units).

mod money;

pub use money::{AmountError, Currency, Money, UnknownCurrency};

pub mod transaction {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    use super::Money;

    /// Whether a transaction increases or decreases the balance.
    ///
    /// The sign lives here; `price` itself is always non-negative.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionKind {
        Income,
        Outcome,
    }

    /// A single income or outcome record, as stored remotely.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        /// Assigned by the remote store on create; opaque to the client.
        pub id: u64,
        pub description: String,
        pub price: Money,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Stamped by the client at creation time and re-stamped on edit.
        pub created_at: DateTime<Utc>,
    }

    /// Request body for `POST transactions` and `PUT transactions/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionDraft {
        pub description: String,
        pub price: Money,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub created_at: DateTime<Utc>,
    }
}
