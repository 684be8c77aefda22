//! Dialog configuration for an NPC
//!
//! A dialog is either a single `Basic` text or a `YesNo` prompt with two
//! buttons and an answer text per button.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of a single dialog text, in characters.
pub const MAX_DIALOG_TEXT_LENGTH: usize = 512;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    #[default]
    Basic,
    YesNo,
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogKind::Basic => write!(f, "basic"),
            DialogKind::YesNo => write!(f, "yes_no"),
        }
    }
}

/// Keys of the dialog text mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogTextKey {
    Main,
    YesButton,
    NoButton,
    YesAnswer,
    NoAnswer,
}

impl DialogTextKey {
    /// Whether a dialog of `kind` may carry this text.
    pub fn allowed_for(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::Basic => matches!(self, DialogTextKey::Main),
            DialogKind::YesNo => true,
        }
    }
}

/// Answer a player picked in a yes/no dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogAnswer {
    Yes,
    No,
}

impl DialogAnswer {
    /// Text shown after the answer was picked.
    pub fn answer_key(&self) -> DialogTextKey {
        match self {
            DialogAnswer::Yes => DialogTextKey::YesAnswer,
            DialogAnswer::No => DialogTextKey::NoAnswer,
        }
    }
}

/// Dialog kind plus its texts.
///
/// Blank texts are dropped on construction, so `text()` never returns an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogConfig {
    kind: DialogKind,
    #[serde(default)]
    texts: BTreeMap<DialogTextKey, String>,
}

impl DialogConfig {
    /// Build a validated dialog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when a text key is not allowed for
    /// the kind or a text exceeds 512 characters.
    pub fn new(
        kind: DialogKind,
        texts: impl IntoIterator<Item = (DialogTextKey, String)>,
    ) -> Result<Self, DomainError> {
        let dialog = Self {
            kind,
            texts: texts
                .into_iter()
                .filter(|(_, text)| !text.trim().is_empty())
                .collect(),
        };
        dialog.validate()?;
        Ok(dialog)
    }

    pub fn basic(main: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(DialogKind::Basic, [(DialogTextKey::Main, main.into())])
    }

    /// Check the invariants; used again when a deserialized dialog is applied.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (key, text) in &self.texts {
            if !key.allowed_for(self.kind) {
                return Err(DomainError::validation(format!(
                    "{} dialogs do not support the {:?} text",
                    self.kind, key
                )));
            }
            if text.chars().count() > MAX_DIALOG_TEXT_LENGTH {
                return Err(DomainError::validation(format!(
                    "Dialog text cannot exceed {} characters",
                    MAX_DIALOG_TEXT_LENGTH
                )));
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn text(&self, key: DialogTextKey) -> Option<&str> {
        self.texts
            .get(&key)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    pub fn texts(&self) -> &BTreeMap<DialogTextKey, String> {
        &self.texts
    }

    /// True when there is something to show.
    pub fn has_dialog(&self) -> bool {
        self.text(DialogTextKey::Main).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dialog_is_empty_basic() {
        let dialog = DialogConfig::default();
        assert_eq!(dialog.kind(), DialogKind::Basic);
        assert!(!dialog.has_dialog());
    }

    #[test]
    fn basic_dialog_has_main_text() {
        let dialog = DialogConfig::basic("Hello there").unwrap();
        assert!(dialog.has_dialog());
        assert_eq!(dialog.text(DialogTextKey::Main), Some("Hello there"));
    }

    #[test]
    fn basic_dialog_rejects_button_texts() {
        let err = DialogConfig::new(
            DialogKind::Basic,
            [
                (DialogTextKey::Main, "Hi".to_string()),
                (DialogTextKey::YesButton, "Sure".to_string()),
            ],
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn yes_no_dialog_accepts_all_texts() {
        let dialog = DialogConfig::new(
            DialogKind::YesNo,
            [
                (DialogTextKey::Main, "Trade?".to_string()),
                (DialogTextKey::YesButton, "Yes".to_string()),
                (DialogTextKey::NoButton, "No".to_string()),
                (DialogTextKey::YesAnswer, "Great".to_string()),
                (DialogTextKey::NoAnswer, "Maybe later".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            dialog.text(DialogAnswer::No.answer_key()),
            Some("Maybe later")
        );
    }

    #[test]
    fn blank_texts_are_dropped() {
        let dialog = DialogConfig::basic("   ").unwrap();
        assert!(dialog.texts().is_empty());
        assert!(!dialog.has_dialog());
    }

    #[test]
    fn rejects_overlong_text() {
        let text = "x".repeat(MAX_DIALOG_TEXT_LENGTH + 1);
        assert!(DialogConfig::basic(text).is_err());
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let dialog = DialogConfig::basic("Hi").unwrap();
        let json = serde_json::to_value(&dialog).unwrap();
        assert_eq!(json["kind"], "basic");
        assert_eq!(json["texts"]["main"], "Hi");
    }
}
