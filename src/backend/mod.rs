mod firebase;

pub use firebase::FirebaseBackend;

use crate::expense::{Expense, ExpenseData, ExpenseId, ExpenseUpdate};
use async_trait::async_trait;
use thiserror::Error;

/// A failure talking to the backend. The detail is for logs only.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The user-facing form of a [`RemoteError`]. One generic message per kind of
/// operation, whatever went wrong underneath.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperationError {
    #[error("Could not save data - please try again later!")]
    Save,
    #[error("Could not delete expense - please try again later!")]
    Delete,
    #[error("Could not fetch expenses!")]
    Fetch,
}

/// Create, read, update and delete expenses in a remote store.
///
/// Orchestrators only ever see this trait, so [`FirebaseBackend`] can be swapped for
/// a test double or another store.
#[async_trait]
pub trait ExpenseBackend: Send + Sync {
    /// Persist a new expense, returning the id the backend assigned it
    async fn create(&self, data: &ExpenseData) -> Result<ExpenseId, RemoteError>;

    /// Every stored expense, in the backend's own order
    async fn read_all(&self) -> Result<Vec<Expense>, RemoteError>;

    /// Merge `update` into the stored expense
    async fn update(&self, id: &ExpenseId, update: &ExpenseUpdate) -> Result<(), RemoteError>;

    async fn delete(&self, id: &ExpenseId) -> Result<(), RemoteError>;
}
