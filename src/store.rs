use crate::expense::{Expense, ExpenseId, ExpenseUpdate};
use log::{debug, trace, warn};

/// A discrete change to the expense list
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Prepend a persisted expense
    Add(Expense),
    /// Replace everything with a fetched collection (backend order)
    Set(Vec<Expense>),
    Update(ExpenseId, ExpenseUpdate),
    Delete(ExpenseId),
}

/// Compute the next expense list from the current one and an `Action`.
///
/// This never touches `state`. Updates and deletes for ids that aren't in the list
/// are no-ops.
pub fn reduce(state: &[Expense], action: Action) -> Vec<Expense> {
    match action {
        Action::Add(expense) => {
            trace!("add expense {} to {} existing", expense.id, state.len());

            let mut next = Vec::with_capacity(state.len() + 1);
            next.push(expense);
            next.extend_from_slice(state);
            next
        }
        // The backend lists oldest first, but we always show the newest first
        Action::Set(mut expenses) => {
            trace!("replace {} expenses with {}", state.len(), expenses.len());

            expenses.reverse();
            expenses
        }
        Action::Update(id, update) => match state.iter().position(|e| e.id == id) {
            Some(index) => {
                trace!("update expense {} at index {}", id, index);

                let mut next = state.to_vec();
                next[index] = state[index].merged(&update);
                next
            }
            None => {
                warn!("cannot update unknown expense {}", id);
                state.to_vec()
            }
        },
        Action::Delete(id) => {
            let next: Vec<Expense> = state.iter().filter(|e| e.id != id).cloned().collect();

            if next.len() == state.len() {
                warn!("cannot delete unknown expense {}", id);
            } else {
                trace!("delete expense {}", id);
            }

            next
        }
    }
}

/// The authoritative in-memory list of expenses, most recent first.
///
/// There is one store per application. It starts empty and is handed explicitly to
/// whichever orchestrator needs it.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn find(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Apply an `Action` and swap in the resulting list
    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        self.expenses = reduce(&self.expenses, action);
    }

    pub fn add(&mut self, expense: Expense) {
        self.dispatch(Action::Add(expense));
    }

    pub fn set(&mut self, expenses: Vec<Expense>) {
        self.dispatch(Action::Set(expenses));
    }

    pub fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) {
        self.dispatch(Action::Update(id, update));
    }

    pub fn delete(&mut self, id: ExpenseId) {
        self.dispatch(Action::Delete(id));
    }
}
