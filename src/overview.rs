use crate::{
    backend::{ExpenseBackend, RemoteOperationError},
    date,
    expense::{format_amount, Expense},
    store::ExpenseStore,
};
use chrono::NaiveDate;
use log::{debug, error};
use rust_decimal::Decimal;

// Recent expenses are those dated within this many days of today, inclusive
const RECENT_DAYS: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    /// Dated within the last 7 days, today included
    Recent,
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Fetching,
    Failed(RemoteOperationError),
}

/// The header shown above a listing
#[derive(Clone, Debug, PartialEq)]
pub struct ExpensesSummary {
    pub period: &'static str,
    pub total: Decimal,
}

/// A derived listing of expenses, most recent first
#[derive(Debug, PartialEq)]
pub struct ExpensesView<'s> {
    pub expenses: Vec<&'s Expense>,
    pub summary: ExpensesSummary,
    /// What to show instead of an empty list
    pub fallback_text: &'static str,
}

/// The recent/all expenses tabs.
///
/// Fetching loads the full collection into the store. The listings themselves are
/// never stored; [`Period::view`] recomputes them from the store's current contents.
pub struct ExpensesOverview<'a, B: ?Sized> {
    backend: &'a B,
    status: FetchStatus,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Recent => "Last 7 Days",
            Period::All => "Total",
        }
    }

    pub fn fallback_text(&self) -> &'static str {
        match self {
            Period::Recent => "No expenses registered for the last 7 days.",
            Period::All => "No registered expenses found!",
        }
    }

    pub fn contains(&self, expense: &Expense, today: NaiveDate) -> bool {
        match self {
            Period::Recent => date::is_within_last_days(expense.date, today, RECENT_DAYS),
            Period::All => true,
        }
    }

    /// Derive the listing for this period from the store's current contents
    pub fn view<'s>(&self, store: &'s ExpenseStore, today: NaiveDate) -> ExpensesView<'s> {
        let expenses: Vec<&Expense> = store
            .expenses()
            .iter()
            .filter(|e| self.contains(e, today))
            .collect();

        ExpensesView {
            summary: ExpensesSummary::new(*self, &expenses),
            expenses,
            fallback_text: self.fallback_text(),
        }
    }
}

impl ExpensesSummary {
    pub fn new(period: Period, expenses: &[&Expense]) -> Self {
        ExpensesSummary {
            period: period.label(),
            total: expenses.iter().map(|e| e.amount).sum(),
        }
    }

    pub fn formatted_total(&self) -> String {
        format_amount(self.total)
    }
}

impl<'s> ExpensesView<'s> {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Expenses dated within `[today - 7 days, today]`, in store order
pub fn recent_expenses(expenses: &[Expense], today: NaiveDate) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| Period::Recent.contains(e, today))
        .collect()
}

impl<'a, B: ExpenseBackend + ?Sized> ExpensesOverview<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        ExpensesOverview {
            backend,
            status: FetchStatus::Idle,
        }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_fetching(&self) -> bool {
        self.status == FetchStatus::Fetching
    }

    /// Replace the store's contents with everything the backend holds.
    ///
    /// On failure the store keeps whatever it had before.
    pub async fn fetch(&mut self, store: &mut ExpenseStore) -> Result<(), RemoteOperationError> {
        self.status = FetchStatus::Fetching;

        match self.backend.read_all().await {
            Ok(expenses) => {
                debug!("fetched {} expenses", expenses.len());

                store.set(expenses);
                self.status = FetchStatus::Idle;
                Ok(())
            }
            Err(e) => {
                error!("could not fetch expenses: {}", e);

                self.status = FetchStatus::Failed(RemoteOperationError::Fetch);
                Err(RemoteOperationError::Fetch)
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        if let FetchStatus::Failed(_) = self.status {
            self.status = FetchStatus::Idle;
        }
    }
}
