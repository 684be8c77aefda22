//! Client-side state of an open configuration screen.
//!
//! None of these types talk to the engine; `NpcConfigurationService` drives
//! their transitions from request outcomes.

mod name_editor;
mod skin_browser;
mod skin_location_editor;

pub use name_editor::NameEditor;
pub use skin_browser::{SkinBrowser, SKIN_LABEL_LENGTH};
pub use skin_location_editor::SkinLocationEditor;
