use crate::{
    backend::{ExpenseBackend, RemoteError, RemoteOperationError},
    expense::{Expense, ExpenseData, ExpenseId, ExpenseUpdate},
    form::{ExpenseForm, ValidationError},
    store::ExpenseStore,
};
use log::{debug, error, warn};
use thiserror::Error;

/// Whether the screen creates a new expense or edits an existing one
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Adding,
    Editing(ExpenseId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Failed(RemoteOperationError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteOperationError),
    #[error("there is no saved expense to delete")]
    NotEditing,
}

/// One instance of the manage expense screen. Each add, update or delete moves
/// through `Idle -> Submitting -> Idle | Failed`.
///
/// A successful `confirm`, `submit` or `delete` means the operation is complete and
/// the caller should close the screen. A failure leaves the screen open so the user
/// can retry or cancel.
///
/// The three operations treat the store differently. An add waits for the backend
/// to assign an id before prepending, and is discarded on failure. An update is
/// optimistic and is *not* rolled back on failure, so the store and the backend
/// disagree until the next fetch or a successful retry. A delete only touches the
/// store once the backend has confirmed it.
///
/// Operations borrow the screen mutably across the request, so a second submission
/// can't start while one is in flight.
pub struct ManageExpense<'a, B: ?Sized> {
    store: &'a mut ExpenseStore,
    backend: &'a B,
    mode: Mode,
    status: SubmitStatus,
}

impl Mode {
    pub fn from_id(id: Option<ExpenseId>) -> Self {
        match id {
            Some(id) => Mode::Editing(id),
            None => Mode::Adding,
        }
    }
}

impl<'a, B: ExpenseBackend + ?Sized> ManageExpense<'a, B> {
    /// Open the screen, editing `editing` if given, otherwise adding a new expense
    pub fn new(store: &'a mut ExpenseStore, backend: &'a B, editing: Option<ExpenseId>) -> Self {
        ManageExpense {
            store,
            backend,
            mode: Mode::from_id(editing),
            status: SubmitStatus::Idle,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            Mode::Adding => "Add Expense",
            Mode::Editing(_) => "Edit Expense",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            Mode::Adding => "Add",
            Mode::Editing(_) => "Update",
        }
    }

    /// The expense being edited, if it's still in the store
    pub fn selected_expense(&self) -> Option<&Expense> {
        match &self.mode {
            Mode::Adding => None,
            Mode::Editing(id) => self.store.find(id),
        }
    }

    /// A form pre-filled from the selected expense, or an empty one
    pub fn form(&self) -> ExpenseForm {
        self.selected_expense()
            .map(ExpenseForm::with_defaults)
            .unwrap_or_default()
    }

    /// Validate `form` and, if every field is valid, submit it. Invalid input never
    /// reaches the backend or the store.
    pub async fn confirm(&mut self, form: &mut ExpenseForm) -> Result<(), ManageError> {
        let data = form.submit()?;
        self.submit(data).await
    }

    /// Save a validated candidate, adding or updating depending on the mode
    pub async fn submit(&mut self, data: ExpenseData) -> Result<(), ManageError> {
        self.status = SubmitStatus::Submitting;

        let result = match self.mode.clone() {
            Mode::Adding => self.add(data).await,
            Mode::Editing(id) => self.update(id, data.into()).await,
        };

        self.finish(result.map_err(|e| {
            error!("could not save expense: {}", e);
            RemoteOperationError::Save
        }))
    }

    /// Delete the expense being edited
    pub async fn delete(&mut self) -> Result<(), ManageError> {
        let id = match &self.mode {
            Mode::Editing(id) => id.clone(),
            Mode::Adding => return Err(ManageError::NotEditing),
        };

        self.status = SubmitStatus::Submitting;
        debug!("deleting expense {}", id);

        let deleted = self.backend.delete(&id).await;
        let result = match deleted {
            Ok(()) => {
                self.store.delete(id);
                Ok(())
            }
            Err(e) => {
                error!("could not delete expense {}: {}", id, e);
                Err(RemoteOperationError::Delete)
            }
        };

        self.finish(result)
    }

    /// Leave the screen without saving
    pub fn cancel(self) {
        debug!("cancelled {:?}", self.mode);
    }

    /// Acknowledge a failure so the screen can be used again
    pub fn dismiss_error(&mut self) {
        if let SubmitStatus::Failed(_) = self.status {
            self.status = SubmitStatus::Idle;
        }
    }

    async fn add(&mut self, data: ExpenseData) -> Result<(), RemoteError> {
        debug!("creating expense {:?}", data.description);

        let id = self.backend.create(&data).await?;
        self.store.add(Expense::new(id, data));
        Ok(())
    }

    async fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> Result<(), RemoteError> {
        debug!("updating expense {}", id);

        self.store.update(id.clone(), update.clone());
        self.backend.update(&id, &update).await.map_err(|e| {
            warn!("keeping unsaved local changes to expense {}", id);
            e
        })
    }

    fn finish(&mut self, result: Result<(), RemoteOperationError>) -> Result<(), ManageError> {
        self.status = match result {
            Ok(()) => SubmitStatus::Idle,
            Err(e) => SubmitStatus::Failed(e),
        };

        result.map_err(ManageError::from)
    }
}
