use api_types::{
    Money,
    transaction::{Transaction, TransactionDraft, TransactionKind},
};
use chrono::Utc;

use crate::client::{Client, ClientError};

/// Aggregate totals over the current list, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub income: Money,
    pub outcome: Money,
    pub total: Money,
}

/// Single source of truth for the transaction list shown by the UI, and
/// the only component that talks to the remote store.
///
/// The list is a write-through mirror: every mutation goes to the store
/// first and only the record the store confirms lands locally. After any
/// fetch, create, or edit the list is ordered by `created_at` descending.
/// A failed request never leaves a partially replaced list behind.
#[derive(Debug)]
pub struct TransactionStore {
    client: Client,
    transactions: Vec<Transaction>,
    query: Option<String>,
}

impl TransactionStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            transactions: Vec::new(),
            query: None,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The filter applied by the last successful fetch, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.transactions)
    }

    /// Replaces the whole list from the remote store.
    ///
    /// A non-empty query keeps only transactions whose description or
    /// category contains it case-insensitively, or whose price equals the
    /// query parsed as an amount. The filter runs locally over the full
    /// remote set.
    pub async fn fetch(
        &mut self,
        query: Option<&str>,
    ) -> std::result::Result<(), ClientError> {
        let mut items = self.client.transactions_list().await?;

        let query = query.map(str::trim).filter(|q| !q.is_empty());
        if let Some(query) = query {
            items.retain(|tx| matches_query(tx, query));
        }
        sort_newest_first(&mut items);

        tracing::debug!(count = items.len(), query, "transaction list replaced");
        self.transactions = items;
        self.query = query.map(str::to_string);
        Ok(())
    }

    /// Creates a transaction, stamping `created_at` client-side, and
    /// inserts the record the store returns.
    pub async fn create(
        &mut self,
        description: &str,
        price: Money,
        category: &str,
        kind: TransactionKind,
    ) -> std::result::Result<(), ClientError> {
        let draft = draft(description, price, category, kind);
        let created = self.client.transaction_create(&draft).await?;
        tracing::debug!(id = created.id, "transaction created");
        self.transactions.push(created);
        sort_newest_first(&mut self.transactions);
        Ok(())
    }

    /// Deletes after confirming the record still exists remotely.
    ///
    /// A record already gone is reported as [`ClientError::NotFound`] and
    /// the list stays unchanged.
    pub async fn delete(&mut self, id: u64) -> std::result::Result<(), ClientError> {
        if let Err(err) = self.client.transaction_get(id).await {
            tracing::warn!(id, ?err, "delete skipped, record missing remotely");
            return Err(err);
        }
        self.client.transaction_delete(id).await?;
        tracing::debug!(id, "transaction deleted");
        self.transactions.retain(|tx| tx.id != id);
        Ok(())
    }

    /// Replaces a record remotely (fresh `created_at`, same id) and swaps
    /// the confirmed result into the list. Missing records surface as
    /// [`ClientError::NotFound`], list unchanged.
    pub async fn edit(
        &mut self,
        id: u64,
        description: &str,
        price: Money,
        category: &str,
        kind: TransactionKind,
    ) -> std::result::Result<(), ClientError> {
        if let Err(err) = self.client.transaction_get(id).await {
            tracing::warn!(id, ?err, "edit skipped, record missing remotely");
            return Err(err);
        }
        let draft = draft(description, price, category, kind);
        let updated = self.client.transaction_replace(id, &draft).await?;
        tracing::debug!(id, "transaction replaced");
        self.transactions.retain(|tx| tx.id != id);
        self.transactions.push(updated);
        sort_newest_first(&mut self.transactions);
        Ok(())
    }
}

fn draft(
    description: &str,
    price: Money,
    category: &str,
    kind: TransactionKind,
) -> TransactionDraft {
    TransactionDraft {
        description: description.to_string(),
        price,
        category: category.to_string(),
        kind,
        created_at: Utc::now(),
    }
}

/// Newest first; ties keep their relative order (stable sort).
fn sort_newest_first(items: &mut [Transaction]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Case-insensitive substring match on description and category, or exact
/// amount match when the query parses as one.
fn matches_query(tx: &Transaction, query: &str) -> bool {
    let needle = query.to_lowercase();
    if tx.description.to_lowercase().contains(&needle)
        || tx.category.to_lowercase().contains(&needle)
    {
        return true;
    }
    query.parse::<Money>().is_ok_and(|amount| tx.price == amount)
}

fn summarize(items: &[Transaction]) -> Summary {
    let mut income = Money::ZERO;
    let mut outcome = Money::ZERO;
    for tx in items {
        match tx.kind {
            TransactionKind::Income => income += tx.price,
            TransactionKind::Outcome => outcome += tx.price,
        }
    }
    Summary {
        income,
        outcome,
        total: income - outcome,
    }
}
