// Shared fixtures for unit tests

use crate::{
    backend::{ExpenseBackend, RemoteError},
    expense::{Expense, ExpenseData, ExpenseId, ExpenseUpdate},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Mutex;

pub fn expense(id: &str, description: &str) -> Expense {
    expense_on(id, description, NaiveDate::from_ymd_opt(2023, 9, 1).unwrap())
}

pub fn expense_on(id: &str, description: &str, date: NaiveDate) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        description: description.into(),
        amount: dec!(9.99),
        date,
    }
}

/// An in-memory backend that records what it was asked to do. A failing backend
/// rejects every request with a 503.
pub struct MemoryBackend {
    fail: bool,
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    expenses: Vec<Expense>,
    next_id: u32,
    calls: usize,
    last_update: Option<(ExpenseId, ExpenseUpdate)>,
    deleted: Vec<ExpenseId>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            fail: false,
            state: Mutex::new(MemoryState::default()),
        }
    }

    pub fn failing() -> Self {
        MemoryBackend {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let backend = Self::new();
        backend.state.lock().unwrap().expenses = expenses;
        backend
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn stored_ids(&self) -> Vec<ExpenseId> {
        let state = self.state.lock().unwrap();
        state.expenses.iter().map(|e| e.id.clone()).collect()
    }

    pub fn last_update(&self) -> Option<(ExpenseId, ExpenseUpdate)> {
        self.state.lock().unwrap().last_update.clone()
    }

    pub fn deleted_ids(&self) -> Vec<ExpenseId> {
        self.state.lock().unwrap().deleted.clone()
    }

    // Count the call and bail out if we're meant to fail
    fn begin(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;

        if self.fail {
            Err(RemoteError::Status(503))
        } else {
            Ok(state)
        }
    }
}

#[async_trait]
impl ExpenseBackend for MemoryBackend {
    async fn create(&self, data: &ExpenseData) -> Result<ExpenseId, RemoteError> {
        let mut state = self.begin()?;
        state.next_id += 1;

        let id = ExpenseId::new(format!("m{}", state.next_id));
        state.expenses.push(Expense::new(id.clone(), data.clone()));
        Ok(id)
    }

    async fn read_all(&self) -> Result<Vec<Expense>, RemoteError> {
        Ok(self.begin()?.expenses.clone())
    }

    async fn update(&self, id: &ExpenseId, update: &ExpenseUpdate) -> Result<(), RemoteError> {
        let mut state = self.begin()?;

        if let Some(e) = state.expenses.iter_mut().find(|e| &e.id == id) {
            *e = e.merged(update);
        }
        state.last_update = Some((id.clone(), update.clone()));
        Ok(())
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), RemoteError> {
        let mut state = self.begin()?;

        state.expenses.retain(|e| &e.id != id);
        state.deleted.push(id.clone());
        Ok(())
    }
}
