//! Two-mode form controller.
//!
//! The controller owns the edit buffer and decides, on submit, whether the
//! buffer becomes a new record or overwrites an existing one. It never holds
//! on to the store; callers pass it in for each operation.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{Record, RecordFields, RecordId};
use crate::storage::RecordStore;

/// What the next submit will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Append a new record.
    #[default]
    Create,
    /// Overwrite the record with this id.
    Edit(RecordId),
}

impl Mode {
    /// Label for the submit action in this mode.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Add",
            Self::Edit(_) => "Save",
        }
    }
}

/// One of the four buffer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// First name.
    Name,
    /// Last name.
    LastName,
    /// Email address.
    Email,
    /// Password.
    Password,
}

/// Form state: the field buffer and the current mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    buffer: RecordFields,
    mode: Mode,
}

impl FormController {
    /// A controller with an empty buffer in create mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current buffer contents.
    #[must_use]
    pub fn buffer(&self) -> &RecordFields {
        &self.buffer
    }

    /// Label for the submit action.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    /// Read one buffer field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.buffer.name,
            Field::LastName => &self.buffer.last_name,
            Field::Email => &self.buffer.email,
            Field::Password => &self.buffer.password,
        }
    }

    /// Overwrite one buffer field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.buffer.name,
            Field::LastName => &mut self.buffer.last_name,
            Field::Email => &mut self.buffer.email,
            Field::Password => &mut self.buffer.password,
        };
        *slot = value.into();
    }

    /// Clear the buffer and switch to create mode.
    pub fn begin_create(&mut self) {
        self.buffer = RecordFields::default();
        self.mode = Mode::Create;
    }

    /// Load the record `id` from `store` into the buffer and switch to edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if `store` has no such record. The
    /// controller is left untouched in that case.
    pub fn begin_edit(&mut self, store: &RecordStore, id: RecordId) -> Result<()> {
        let Some(record) = store.get(id) else {
            warn!("Cannot edit record {}: not found", id);
            return Err(Error::not_found(id));
        };

        self.buffer = record.fields.clone();
        self.mode = Mode::Edit(id);
        debug!("Editing record {}", id);
        Ok(())
    }

    /// Hand the buffer to `store` according to the current mode.
    ///
    /// In create mode the buffer is appended; in edit mode it overwrites the
    /// target record. Returns the resulting record, or `None` if the edit
    /// target has since disappeared. The buffer is cleared and the mode reset
    /// to create whether or not the store managed to persist.
    ///
    /// # Errors
    ///
    /// Propagates the store's persist error. The store's in-memory collection
    /// already reflects the submit when this happens.
    pub fn submit(&mut self, store: &mut RecordStore) -> Result<Option<Record>> {
        let fields = std::mem::take(&mut self.buffer);
        let mode = std::mem::take(&mut self.mode);

        match mode {
            Mode::Create => store.append(fields).map(Some),
            Mode::Edit(id) => store.update(id, fields),
        }
    }
}
