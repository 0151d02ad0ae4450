pub mod backend;
mod config;
pub mod date;
mod expense;
pub mod form;
pub mod manage;
pub mod overview;
pub mod store;
#[cfg(test)]
mod test_utils;

pub use backend::{ExpenseBackend, FirebaseBackend, RemoteError, RemoteOperationError};
pub use crate::config::BackendConfig;
pub use expense::{Expense, ExpenseData, ExpenseId, ExpenseUpdate};
pub use form::{ExpenseForm, Field, ValidationError};
pub use manage::{ManageError, ManageExpense, Mode, SubmitStatus};
pub use overview::{ExpensesOverview, ExpensesSummary, ExpensesView, FetchStatus, Period};
pub use store::{Action, ExpenseStore};

// This represents the number of decimal places that a currency can validly express.
// @todo Support the full range of currency precisions specified in ISO 4217.
const CURRENCY_PRECISION: u32 = 2;
