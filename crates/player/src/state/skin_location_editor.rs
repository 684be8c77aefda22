//! Skin-location box: a player name or skin URL to apply to the NPC.

use easynpc_domain::{
    is_valid_player_name, is_valid_skin_url, DomainError, NpcId, SkinModel,
    MAX_SKIN_LOCATION_LENGTH,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinLocationEditor {
    npc_id: NpcId,
    model: SkinModel,
    value: String,
    last_submitted: String,
    pending: Option<String>,
    cooldown_secs: u64,
}

impl SkinLocationEditor {
    pub fn new(npc_id: NpcId, model: SkinModel) -> Self {
        Self {
            npc_id,
            model,
            value: String::new(),
            last_submitted: String::new(),
            pending: None,
            cooldown_secs: 0,
        }
    }

    pub fn npc_id(&self) -> NpcId {
        self.npc_id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Last location the engine accepted.
    pub fn last_submitted(&self) -> &str {
        &self.last_submitted
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(MAX_SKIN_LOCATION_LENGTH).collect();
    }

    /// Empty the box. Nothing is sent.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Whether the add button is enabled.
    pub fn can_add(&self) -> bool {
        if self.pending.is_some() || self.cooldown_secs > 0 || self.value == self.last_submitted {
            return false;
        }
        if self.model.accepts_player_skins() {
            !self.value.is_empty()
                && (is_valid_player_name(&self.value) || is_valid_skin_url(&self.value))
        } else {
            is_valid_skin_url(&self.value)
        }
    }

    /// Whether the clear button is enabled.
    pub fn can_clear(&self) -> bool {
        !self.value.is_empty()
    }

    /// Take the value for sending. It only becomes the last submission once
    /// [`complete`](Self::complete) reports success.
    ///
    /// An empty value is accepted when it differs from the last submission;
    /// it resets the NPC to its default skin.
    pub fn submit(&mut self) -> Result<String, DomainError> {
        if self.pending.is_some() {
            return Err(DomainError::invalid_state_transition(
                "a skin location submission is pending",
            ));
        }
        if self.cooldown_secs > 0 {
            return Err(DomainError::invalid_state_transition(format!(
                "skin location changes are on cooldown for {}s",
                self.cooldown_secs
            )));
        }
        if self.value == self.last_submitted {
            return Err(DomainError::validation("Skin location is unchanged"));
        }
        if !self.value.is_empty() && !self.can_add() {
            return Err(DomainError::validation(format!(
                "Not a valid skin location for {}",
                self.model
            )));
        }
        self.pending = Some(self.value.clone());
        Ok(self.value.clone())
    }

    /// Resolve the pending submission. On failure the typed value stays and
    /// can be resubmitted.
    pub fn complete(&mut self, success: bool) -> Result<(), DomainError> {
        let submitted = self.pending.take().ok_or_else(|| {
            DomainError::invalid_state_transition("no skin location submission is pending")
        })?;
        if success {
            self.last_submitted = submitted;
        }
        Ok(())
    }

    /// Seconds until the add button may be used again, as reported by the
    /// engine.
    pub fn cooldown_secs(&self) -> u64 {
        self.cooldown_secs
    }

    pub fn set_cooldown(&mut self, remaining_secs: u64) {
        self.cooldown_secs = remaining_secs;
    }

    /// Count the displayed cooldown down.
    pub fn tick(&mut self, elapsed_secs: u64) {
        self.cooldown_secs = self.cooldown_secs.saturating_sub(elapsed_secs);
    }
}
