//! Rename box.

use easynpc_domain::{DomainError, EditField, EditState, NpcId, MAX_NPC_NAME_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEditor {
    npc_id: NpcId,
    field: EditField<String>,
}

impl NameEditor {
    pub fn new(npc_id: NpcId, stored: impl Into<String>) -> Self {
        Self {
            npc_id,
            field: EditField::new(stored.into()),
        }
    }

    pub fn npc_id(&self) -> NpcId {
        self.npc_id
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }

    pub fn state(&self) -> EditState {
        self.field.state()
    }

    /// Typed input. Anything past the maximum name length is cut off, as
    /// the box would.
    pub fn set_value(&mut self, value: &str) -> Result<EditState, DomainError> {
        let value: String = value.chars().take(MAX_NPC_NAME_LENGTH).collect();
        self.field.set_value(value)
    }

    pub fn can_submit(&self) -> bool {
        self.field.can_submit() && !self.field.value().trim().is_empty()
    }

    pub fn submit(&mut self) -> Result<String, DomainError> {
        if self.field.value().trim().is_empty() {
            return Err(DomainError::validation("NPC name cannot be blank"));
        }
        self.field.submit()
    }

    pub fn complete(&mut self, success: bool) -> Result<EditState, DomainError> {
        self.field.complete(success)
    }

    /// Follow a name changed elsewhere (e.g. a `ProfileChanged` broadcast).
    pub fn sync_stored(&mut self, stored: impl Into<String>) {
        self.field.sync_stored(stored.into());
    }
}
