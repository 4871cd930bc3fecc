//! Store-changing subcommands.
//!
//! Each action drives a [`FormController`] or the store directly and reports
//! what happened; printing is left to the binary.

use tracing::info;

use super::commands::{AddCommand, DeleteCommand, EditCommand};
use crate::error::{Error, Result};
use crate::form::FormController;
use crate::record::Record;
use crate::storage::RecordStore;

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    /// Label of the submit action that ran ("Add" or "Save").
    pub label: &'static str,
    /// The record written, or `None` if an edit target vanished before submit.
    pub record: Option<Record>,
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// `--yes` was not given; the store was left untouched.
    NeedsConfirmation(Record),
    /// This many records were removed.
    Deleted(usize),
}

/// Submit a new record in create mode.
///
/// # Errors
///
/// Returns an error if the store cannot allocate an id or persist.
pub fn add(store: &mut RecordStore, cmd: &AddCommand) -> Result<Submitted> {
    let mut form = FormController::new();
    cmd.apply(&mut form);
    let label = form.submit_label();

    let record = form.submit(store)?;
    Ok(Submitted { label, record })
}

/// Load a record into the form, overwrite the given fields and save it.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if `cmd.id` is not in the store, or an
/// error if persisting fails.
pub fn edit(store: &mut RecordStore, cmd: &EditCommand) -> Result<Submitted> {
    let mut form = FormController::new();
    form.begin_edit(store, cmd.id)?;
    cmd.apply(&mut form);
    let label = form.submit_label();

    let record = form.submit(store)?;
    Ok(Submitted { label, record })
}

/// Delete a record once confirmed.
///
/// Without `cmd.yes` the store and its file are not touched.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if `cmd.id` is not in the store, or an
/// error if persisting fails.
pub fn delete(store: &mut RecordStore, cmd: &DeleteCommand) -> Result<DeleteOutcome> {
    let record = store.get(cmd.id).ok_or_else(|| Error::not_found(cmd.id))?;

    if !cmd.yes {
        info!("Delete of record {} awaiting confirmation", cmd.id);
        return Ok(DeleteOutcome::NeedsConfirmation(record.clone()));
    }

    store.delete(cmd.id).map(DeleteOutcome::Deleted)
}
