use api_types::transaction::{Transaction, TransactionDraft};
use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

/// Typed failure taxonomy for the remote store.
///
/// `NotFound` is the interesting one: delete/edit run an existence check
/// first, and a missing record must be distinguishable from a transport
/// failure so the caller can report it instead of silently skipping.
#[derive(Debug)]
pub enum ClientError {
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Thin wrapper over `reqwest` for the `transactions` resource.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// `GET transactions` — the full remote set.
    pub async fn transactions_list(&self) -> std::result::Result<Vec<Transaction>, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }

    /// `GET transactions/{id}` — existence check before delete/edit.
    pub async fn transaction_get(&self, id: u64) -> std::result::Result<Transaction, ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }

    /// `POST transactions` — the store assigns the id and returns the
    /// canonical record.
    pub async fn transaction_create(
        &self,
        draft: &TransactionDraft,
    ) -> std::result::Result<Transaction, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        let res = self
            .http
            .post(endpoint)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }

    /// `PUT transactions/{id}` — whole-record replace.
    pub async fn transaction_replace(
        &self,
        id: u64,
        draft: &TransactionDraft,
    ) -> std::result::Result<Transaction, ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let res = self
            .http
            .put(endpoint)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }

    /// `DELETE transactions/{id}` — response body is ignored.
    pub async fn transaction_delete(&self, id: u64) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for_response(res).await)
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }
}

async fn decode<T: DeserializeOwned>(
    res: reqwest::Response,
) -> std::result::Result<T, ClientError> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }
    Err(error_for_response(res).await)
}

async fn error_for_response(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        404 => ClientError::NotFound,
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}
