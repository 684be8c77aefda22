//! Pending edit of a single configuration field
//!
//! ```text
//! Clean --set_value--> Dirty --submit--> Submitted --complete(true)--> Clean
//!                        ^                    |
//!                        +---complete(false)--+
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    #[default]
    Clean,
    Dirty,
    Submitted,
}

/// A locally edited value tracked against the last stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField<T> {
    stored: T,
    value: T,
    state: EditState,
}

impl<T: Clone + PartialEq> EditField<T> {
    pub fn new(stored: T) -> Self {
        Self {
            value: stored.clone(),
            stored,
            state: EditState::Clean,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn stored(&self) -> &T {
        &self.stored
    }

    /// Local edit. Returns the resulting state.
    ///
    /// # Errors
    ///
    /// Refused while a submission is in flight.
    pub fn set_value(&mut self, value: T) -> Result<EditState, DomainError> {
        if self.state == EditState::Submitted {
            return Err(DomainError::invalid_state_transition(
                "cannot edit a field while its submission is pending",
            ));
        }
        self.state = if value == self.stored {
            EditState::Clean
        } else {
            EditState::Dirty
        };
        self.value = value;
        Ok(self.state)
    }

    pub fn can_submit(&self) -> bool {
        self.state == EditState::Dirty
    }

    /// Mark the local value as sent and return it.
    pub fn submit(&mut self) -> Result<T, DomainError> {
        if self.state != EditState::Dirty {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot submit a field in state {:?}",
                self.state
            )));
        }
        self.state = EditState::Submitted;
        Ok(self.value.clone())
    }

    /// Resolve a submission. Success makes the value the stored value;
    /// failure keeps the local value for correction.
    pub fn complete(&mut self, success: bool) -> Result<EditState, DomainError> {
        if self.state != EditState::Submitted {
            return Err(DomainError::invalid_state_transition(
                "no submission is pending",
            ));
        }
        if success {
            self.stored = self.value.clone();
            self.state = EditState::Clean;
        } else {
            self.state = EditState::Dirty;
        }
        Ok(self.state)
    }

    /// Adopt a new stored value pushed from elsewhere. A clean field follows
    /// it; a dirty field keeps the local edit.
    pub fn sync_stored(&mut self, stored: T) {
        match self.state {
            EditState::Clean => {
                self.value = stored.clone();
                self.stored = stored;
            }
            EditState::Dirty => {
                self.state = if self.value == stored {
                    EditState::Clean
                } else {
                    EditState::Dirty
                };
                self.stored = stored;
            }
            EditState::Submitted => self.stored = stored,
        }
    }
}
