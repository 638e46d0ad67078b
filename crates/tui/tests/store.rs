//! End-to-end tests for the transaction store against an in-process HTTP
//! mock of the remote `transactions` resource (json-server shaped: GET
//! list, GET/PUT/DELETE by id, POST assigns ids).

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{TimeZone, Utc};

use api_types::{
    Money,
    transaction::{Transaction, TransactionDraft, TransactionKind},
};
use dindin_tui::{
    client::{Client, ClientError},
    store::TransactionStore,
};

#[derive(Clone, Default)]
struct Fixture {
    items: Arc<Mutex<Vec<Transaction>>>,
    next_id: Arc<AtomicU64>,
    // When set, every route answers 500.
    fail: Arc<AtomicBool>,
}

impl Fixture {
    fn items(&self) -> Vec<Transaction> {
        self.items.lock().unwrap().clone()
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StatusCode> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }
}

async fn list(State(fixture): State<Fixture>) -> Result<Json<Vec<Transaction>>, StatusCode> {
    fixture.check()?;
    Ok(Json(fixture.items()))
}

async fn get_one(
    State(fixture): State<Fixture>,
    Path(id): Path<u64>,
) -> Result<Json<Transaction>, StatusCode> {
    fixture.check()?;
    fixture
        .items()
        .into_iter()
        .find(|tx| tx.id == id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create(
    State(fixture): State<Fixture>,
    Json(draft): Json<TransactionDraft>,
) -> Result<Json<Transaction>, StatusCode> {
    fixture.check()?;
    let tx = Transaction {
        id: fixture.next_id.fetch_add(1, Ordering::SeqCst),
        description: draft.description,
        price: draft.price,
        category: draft.category,
        kind: draft.kind,
        created_at: draft.created_at,
    };
    fixture.items.lock().unwrap().push(tx.clone());
    Ok(Json(tx))
}

async fn replace(
    State(fixture): State<Fixture>,
    Path(id): Path<u64>,
    Json(draft): Json<TransactionDraft>,
) -> Result<Json<Transaction>, StatusCode> {
    fixture.check()?;
    let mut items = fixture.items.lock().unwrap();
    let slot = items
        .iter_mut()
        .find(|tx| tx.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = Transaction {
        id,
        description: draft.description,
        price: draft.price,
        category: draft.category,
        kind: draft.kind,
        created_at: draft.created_at,
    };
    Ok(Json(slot.clone()))
}

async fn delete_one(
    State(fixture): State<Fixture>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    fixture.check()?;
    let mut items = fixture.items.lock().unwrap();
    let before = items.len();
    items.retain(|tx| tx.id != id);
    if items.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::OK)
}

async fn spawn_store(seed: Vec<Transaction>) -> (TransactionStore, Fixture) {
    let next = seed.iter().map(|tx| tx.id).max().unwrap_or(0) + 1;
    let fixture = Fixture {
        items: Arc::new(Mutex::new(seed)),
        next_id: Arc::new(AtomicU64::new(next)),
        fail: Arc::new(AtomicBool::new(false)),
    };

    let router = Router::new()
        .route("/transactions", get(list).post(create))
        .route(
            "/transactions/{id}",
            get(get_one).put(replace).delete(delete_one),
        )
        .with_state(fixture.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = Client::new(&format!("http://{addr}")).unwrap();
    (TransactionStore::new(client), fixture)
}

fn tx(id: u64, description: &str, cents: i64, category: &str, kind: TransactionKind) -> Transaction {
    Transaction {
        id,
        description: description.to_string(),
        price: Money::new(cents),
        category: category.to_string(),
        kind,
        // Seconds encode the id so seeds are distinguishable but ordered.
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, id as u32).unwrap(),
    }
}

fn ids(store: &TransactionStore) -> Vec<u64> {
    store.transactions().iter().map(|tx| tx.id).collect()
}

#[tokio::test]
async fn fetch_replaces_and_sorts_newest_first() {
    let seed = vec![
        tx(1, "old", 1_000, "misc", TransactionKind::Income),
        tx(3, "newest", 1_000, "misc", TransactionKind::Income),
        tx(2, "middle", 1_000, "misc", TransactionKind::Income),
    ];
    let (mut store, _fixture) = spawn_store(seed).await;

    store.fetch(None).await.unwrap();
    assert_eq!(ids(&store), vec![3, 2, 1]);
    assert_eq!(store.query(), None);
}

#[tokio::test]
async fn fetch_filters_on_description_and_category() {
    let seed = vec![
        tx(1, "Monthly Rent", 90_000, "Housing", TransactionKind::Outcome),
        tx(2, "Groceries", 12_000, "Food", TransactionKind::Outcome),
        tx(3, "Restaurant", 4_500, "Food", TransactionKind::Outcome),
    ];
    let (mut store, _fixture) = spawn_store(seed).await;

    store.fetch(Some("FOOD")).await.unwrap();
    assert_eq!(ids(&store), vec![3, 2]);
    assert_eq!(store.query(), Some("FOOD"));

    store.fetch(Some("rent")).await.unwrap();
    assert_eq!(ids(&store), vec![1]);
}

#[tokio::test]
async fn fetch_filters_on_exact_price() {
    let seed = vec![
        tx(1, "Lunch", 5_000, "Food", TransactionKind::Outcome),
        tx(2, "Dinner", 7_500, "Food", TransactionKind::Outcome),
    ];
    let (mut store, _fixture) = spawn_store(seed).await;

    store.fetch(Some("50")).await.unwrap();
    assert_eq!(ids(&store), vec![1]);
}

#[tokio::test]
async fn blank_query_means_no_filter() {
    let seed = vec![
        tx(1, "a", 100, "x", TransactionKind::Income),
        tx(2, "b", 200, "y", TransactionKind::Outcome),
    ];
    let (mut store, _fixture) = spawn_store(seed).await;

    store.fetch(Some("   ")).await.unwrap();
    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.query(), None);
}

#[tokio::test]
async fn failed_fetch_leaves_list_untouched() {
    let seed = vec![
        tx(1, "keep", 100, "x", TransactionKind::Income),
        tx(2, "me", 200, "y", TransactionKind::Outcome),
    ];
    let (mut store, fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();
    let before = store.transactions().to_vec();

    fixture.set_failing(true);
    let err = store.fetch(Some("keep")).await.unwrap_err();
    assert!(matches!(err, ClientError::Server(_)));
    assert_eq!(store.transactions(), before.as_slice());
    assert_eq!(store.query(), None);
}

#[tokio::test]
async fn create_inserts_exactly_one_confirmed_record() {
    let seed = vec![tx(1, "salary", 10_000, "work", TransactionKind::Income)];
    let (mut store, fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();

    store
        .create("coffee", Money::new(5_000), "food", TransactionKind::Outcome)
        .await
        .unwrap();

    // The store-assigned id lands first: its timestamp is fresher than the
    // seeded record's.
    assert_eq!(ids(&store), vec![2, 1]);
    let created = &store.transactions()[0];
    assert_eq!(created.kind, TransactionKind::Outcome);
    assert_eq!(created.price, Money::new(5_000));
    assert!(created.created_at > store.transactions()[1].created_at);

    // Write-through: the remote store holds it too.
    assert_eq!(fixture.items().len(), 2);
}

#[tokio::test]
async fn failed_create_adds_nothing() {
    let seed = vec![tx(1, "salary", 10_000, "work", TransactionKind::Income)];
    let (mut store, fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();

    fixture.set_failing(true);
    let err = store
        .create("coffee", Money::new(500), "food", TransactionKind::Outcome)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server(_)));
    assert_eq!(ids(&store), vec![1]);
}

#[tokio::test]
async fn delete_removes_entry_locally_and_remotely() {
    let seed = vec![
        tx(1, "a", 100, "x", TransactionKind::Income),
        tx(2, "b", 200, "y", TransactionKind::Outcome),
    ];
    let (mut store, fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();

    store.delete(2).await.unwrap();
    assert_eq!(ids(&store), vec![1]);
    assert_eq!(fixture.items().len(), 1);
}

#[tokio::test]
async fn delete_of_missing_id_reports_not_found_and_keeps_list() {
    let seed = vec![tx(1, "a", 100, "x", TransactionKind::Income)];
    let (mut store, fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();

    let err = store.delete(999).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
    assert_eq!(ids(&store), vec![1]);
    assert_eq!(fixture.items().len(), 1);
}

#[tokio::test]
async fn edit_replaces_only_the_matching_entry() {
    let seed = vec![
        tx(1, "Lunch", 5_000, "Food", TransactionKind::Outcome),
        tx(2, "Salary", 100_000, "Work", TransactionKind::Income),
    ];
    let (mut store, _fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();
    let untouched = store.transactions()[0].clone();
    assert_eq!(untouched.id, 2);
    let old_stamp = store
        .transactions()
        .iter()
        .find(|tx| tx.id == 1)
        .unwrap()
        .created_at;

    store
        .edit(1, "Team lunch", Money::new(6_500), "Food", TransactionKind::Outcome)
        .await
        .unwrap();

    assert_eq!(store.transactions().len(), 2);
    // Fresh timestamp moves the edited record to the top.
    let edited = &store.transactions()[0];
    assert_eq!(edited.id, 1);
    assert_eq!(edited.description, "Team lunch");
    assert_eq!(edited.price, Money::new(6_500));
    assert!(edited.created_at > old_stamp);
    // The other entry is bit-for-bit what it was.
    assert_eq!(store.transactions()[1], untouched);
}

#[tokio::test]
async fn edit_of_missing_id_reports_not_found_and_keeps_list() {
    let seed = vec![tx(1, "a", 100, "x", TransactionKind::Income)];
    let (mut store, _fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();
    let before = store.transactions().to_vec();

    let err = store
        .edit(42, "ghost", Money::new(100), "x", TransactionKind::Income)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
    assert_eq!(store.transactions(), before.as_slice());
}

#[tokio::test]
async fn summary_reflects_the_fetched_list() {
    let seed = vec![
        tx(1, "salary", 100_000, "work", TransactionKind::Income),
        tx(2, "rent", 60_000, "housing", TransactionKind::Outcome),
        tx(3, "gig", 20_000, "work", TransactionKind::Income),
    ];
    let (mut store, _fixture) = spawn_store(seed).await;
    store.fetch(None).await.unwrap();

    let summary = store.summary();
    assert_eq!(summary.income, Money::new(120_000));
    assert_eq!(summary.outcome, Money::new(60_000));
    assert_eq!(summary.total, Money::new(60_000));
}
