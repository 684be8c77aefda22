//! Skin vocabulary: models, kinds, submitted locations and references.
//!
//! A `SkinReference` is what a profile stores. A `SkinLocation` is what a
//! player types into the skin-location box; classifying it yields either a
//! reference or a validation error. Syntax is checked when a reference is
//! written to a profile, never when it is read.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::SkinId;

/// Longest skin location accepted from the location box.
pub const MAX_SKIN_LOCATION_LENGTH: usize = 255;

static PLAYER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,16}$").expect("valid regex"));

/// Returns true if `value` is a syntactically valid player name.
pub fn is_valid_player_name(value: &str) -> bool {
    PLAYER_NAME_RE.is_match(value)
}

/// Returns true if `value` is an absolute http(s) URL with a host.
pub fn is_valid_skin_url(value: &str) -> bool {
    parse_skin_url(value).is_some()
}

fn parse_skin_url(value: &str) -> Option<url::Url> {
    if value.len() > MAX_SKIN_LOCATION_LENGTH || value.chars().any(char::is_whitespace) {
        return None;
    }
    url::Url::parse(value)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}

// ============================================================================
// SkinModel
// ============================================================================

/// Skin model (category) of an NPC, fixed when the entity is spawned.
///
/// Each model owns its own skin set and its own list of built-in variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinModel {
    Humanoid,
    HumanoidSlim,
    Villager,
    Fairy,
    Skeleton,
    Zombie,
    Allay,
    Cat,
}

impl SkinModel {
    pub fn all() -> &'static [SkinModel] {
        &[
            SkinModel::Humanoid,
            SkinModel::HumanoidSlim,
            SkinModel::Villager,
            SkinModel::Fairy,
            SkinModel::Skeleton,
            SkinModel::Zombie,
            SkinModel::Allay,
            SkinModel::Cat,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SkinModel::Humanoid => "Humanoid",
            SkinModel::HumanoidSlim => "Humanoid Slim",
            SkinModel::Villager => "Villager",
            SkinModel::Fairy => "Fairy",
            SkinModel::Skeleton => "Skeleton",
            SkinModel::Zombie => "Zombie",
            SkinModel::Allay => "Allay",
            SkinModel::Cat => "Cat",
        }
    }

    /// Built-in variants, the first being the spawn default.
    pub fn default_variants(&self) -> &'static [&'static str] {
        match self {
            SkinModel::Humanoid => &["steve", "alex", "jaina", "kaya", "noah", "sunny", "zuri"],
            SkinModel::HumanoidSlim => &["alex", "jaina", "kaya", "sunny", "zuri"],
            SkinModel::Villager => &[
                "plains", "desert", "jungle", "savanna", "snow", "swamp", "taiga",
            ],
            SkinModel::Fairy => &["green", "red", "blue"],
            SkinModel::Skeleton => &["skeleton", "stray", "wither_skeleton"],
            SkinModel::Zombie => &["zombie", "drowned", "husk"],
            SkinModel::Allay => &["default"],
            SkinModel::Cat => &[
                "tabby",
                "black",
                "british_shorthair",
                "calico",
                "jellie",
                "persian",
                "ragdoll",
                "red",
                "siamese",
                "white",
            ],
        }
    }

    pub fn default_variant(&self) -> &'static str {
        self.default_variants().first().copied().unwrap_or("default")
    }

    pub fn has_variant(&self, variant: &str) -> bool {
        self.default_variants().contains(&variant)
    }

    /// Humanoid models can wear player skins; every other model needs a URL.
    pub fn accepts_player_skins(&self) -> bool {
        matches!(self, SkinModel::Humanoid | SkinModel::HumanoidSlim)
    }

    fn as_key(&self) -> &'static str {
        match self {
            SkinModel::Humanoid => "humanoid",
            SkinModel::HumanoidSlim => "humanoid_slim",
            SkinModel::Villager => "villager",
            SkinModel::Fairy => "fairy",
            SkinModel::Skeleton => "skeleton",
            SkinModel::Zombie => "zombie",
            SkinModel::Allay => "allay",
            SkinModel::Cat => "cat",
        }
    }
}

impl fmt::Display for SkinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for SkinModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        SkinModel::all()
            .iter()
            .copied()
            .find(|model| model.as_key() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown skin model: {}", s)))
    }
}

// ============================================================================
// SkinKind
// ============================================================================

/// Discriminant of a `SkinReference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinKind {
    PlayerSkin,
    SecureRemoteUrl,
    InsecureRemoteUrl,
    Custom,
    Default,
}

impl SkinKind {
    /// Kinds configured through the skin-location box.
    pub fn is_location_based(&self) -> bool {
        matches!(
            self,
            SkinKind::PlayerSkin | SkinKind::SecureRemoteUrl | SkinKind::InsecureRemoteUrl
        )
    }
}

impl fmt::Display for SkinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkinKind::PlayerSkin => "player_skin",
            SkinKind::SecureRemoteUrl => "secure_remote_url",
            SkinKind::InsecureRemoteUrl => "insecure_remote_url",
            SkinKind::Custom => "custom",
            SkinKind::Default => "default",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// SkinLocation
// ============================================================================

/// Classification of a string submitted through the skin-location box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinLocation {
    /// Empty box: clears the custom location
    Empty,
    /// A player name whose skin should be used
    PlayerName(String),
    /// A remote texture URL
    Url { url: String, secure: bool },
}

impl SkinLocation {
    /// Classify a submitted location for the given skin model.
    ///
    /// The value is taken verbatim: surrounding whitespace makes it invalid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the value is neither empty, a
    /// valid player name, nor a valid URL, or when a player name is given for
    /// a model that only accepts URLs.
    pub fn classify(value: &str, model: SkinModel) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Ok(SkinLocation::Empty);
        }
        if value.len() > MAX_SKIN_LOCATION_LENGTH {
            return Err(DomainError::validation(format!(
                "Skin location cannot exceed {} characters",
                MAX_SKIN_LOCATION_LENGTH
            )));
        }
        if is_valid_player_name(value) {
            if !model.accepts_player_skins() {
                return Err(DomainError::validation(format!(
                    "Skin model {} only accepts skin URLs",
                    model
                )));
            }
            return Ok(SkinLocation::PlayerName(value.to_string()));
        }
        if let Some(url) = parse_skin_url(value) {
            return Ok(SkinLocation::Url {
                url: value.to_string(),
                secure: url.scheme() == "https",
            });
        }
        Err(DomainError::validation(format!(
            "'{}' is neither a player name nor a skin URL",
            value
        )))
    }

    /// The location string as submitted (empty for `Empty`).
    pub fn as_str(&self) -> &str {
        match self {
            SkinLocation::Empty => "",
            SkinLocation::PlayerName(name) => name,
            SkinLocation::Url { url, .. } => url,
        }
    }

    /// The reference this location stands for; `None` for `Empty`.
    pub fn to_reference(&self) -> Option<SkinReference> {
        match self {
            SkinLocation::Empty => None,
            SkinLocation::PlayerName(name) => Some(SkinReference::PlayerName {
                name: name.clone(),
                skin_id: SkinId::from_location(name),
            }),
            SkinLocation::Url { url, secure } => Some(SkinReference::RemoteUrl {
                url: url.clone(),
                secure: *secure,
                skin_id: SkinId::from_location(url),
            }),
        }
    }
}

// ============================================================================
// SkinReference
// ============================================================================

/// The skin a profile renders with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkinReference {
    PlayerName { name: String, skin_id: SkinId },
    RemoteUrl { url: String, secure: bool, skin_id: SkinId },
    Custom { skin_id: SkinId },
    Default { variant: String },
}

impl SkinReference {
    /// The spawn default for a model.
    pub fn default_for(model: SkinModel) -> Self {
        SkinReference::Default {
            variant: model.default_variant().to_string(),
        }
    }

    pub fn kind(&self) -> SkinKind {
        match self {
            SkinReference::PlayerName { .. } => SkinKind::PlayerSkin,
            SkinReference::RemoteUrl { secure: true, .. } => SkinKind::SecureRemoteUrl,
            SkinReference::RemoteUrl { secure: false, .. } => SkinKind::InsecureRemoteUrl,
            SkinReference::Custom { .. } => SkinKind::Custom,
            SkinReference::Default { .. } => SkinKind::Default,
        }
    }

    /// Active-skin pointer used to highlight the selected entry in a skin set.
    pub fn skin_id(&self) -> Option<SkinId> {
        match self {
            SkinReference::PlayerName { skin_id, .. }
            | SkinReference::RemoteUrl { skin_id, .. }
            | SkinReference::Custom { skin_id } => Some(*skin_id),
            SkinReference::Default { .. } => None,
        }
    }

    /// Location string for location-based kinds.
    pub fn location(&self) -> Option<&str> {
        match self {
            SkinReference::PlayerName { name, .. } => Some(name),
            SkinReference::RemoteUrl { url, .. } => Some(url),
            SkinReference::Custom { .. } | SkinReference::Default { .. } => None,
        }
    }

    /// Check that the value syntax matches the kind for the given model.
    pub fn validate_for(&self, model: SkinModel) -> Result<(), DomainError> {
        match self {
            SkinReference::PlayerName { name, .. } => {
                if !model.accepts_player_skins() {
                    return Err(DomainError::validation(format!(
                        "Skin model {} cannot use player skins",
                        model
                    )));
                }
                if !is_valid_player_name(name) {
                    return Err(DomainError::validation(format!(
                        "Invalid player name: {}",
                        name
                    )));
                }
                Ok(())
            }
            SkinReference::RemoteUrl { url, secure, .. } => {
                let Some(parsed) = parse_skin_url(url) else {
                    return Err(DomainError::validation(format!("Invalid skin URL: {}", url)));
                };
                if *secure != (parsed.scheme() == "https") {
                    return Err(DomainError::validation(
                        "Skin URL security must match its scheme",
                    ));
                }
                Ok(())
            }
            SkinReference::Custom { .. } => Ok(()),
            SkinReference::Default { variant } => {
                if model.has_variant(variant) {
                    Ok(())
                } else {
                    Err(DomainError::validation(format!(
                        "Unknown {} variant: {}",
                        model, variant
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_name_pattern() {
        assert!(is_valid_player_name("Notch"));
        assert!(is_valid_player_name("jeb_"));
        assert!(is_valid_player_name("abc"));
        assert!(!is_valid_player_name("ab"));
        assert!(!is_valid_player_name("seventeen_chars__"));
        assert!(!is_valid_player_name("has space"));
        assert!(!is_valid_player_name("dash-name"));
    }

    #[test]
    fn url_pattern() {
        assert!(is_valid_skin_url("https://example.com/skin.png"));
        assert!(is_valid_skin_url("http://textures.minecraft.net/texture/abc"));
        assert!(!is_valid_skin_url("ftp://example.com/skin.png"));
        assert!(!is_valid_skin_url("example.com/skin.png"));
        assert!(!is_valid_skin_url("https://exa mple.com"));
    }

    #[test]
    fn classify_accepts_exactly_one_form() {
        let model = SkinModel::Humanoid;
        assert_eq!(SkinLocation::classify("", model).unwrap(), SkinLocation::Empty);
        assert_eq!(
            SkinLocation::classify("Notch", model).unwrap(),
            SkinLocation::PlayerName("Notch".into())
        );
        assert_eq!(
            SkinLocation::classify("https://example.com/a.png", model).unwrap(),
            SkinLocation::Url {
                url: "https://example.com/a.png".into(),
                secure: true
            }
        );
        assert!(SkinLocation::classify("not a name!", model).is_err());
        assert!(SkinLocation::classify(" Notch", model).is_err());
    }

    #[test]
    fn scheme_case_does_not_affect_security() {
        let model = SkinModel::Villager;
        assert_eq!(
            SkinLocation::classify("HTTPS://example.com/a.png", model).unwrap(),
            SkinLocation::Url {
                url: "HTTPS://example.com/a.png".into(),
                secure: true
            }
        );
        let reference = SkinLocation::classify("HTTPS://example.com/a.png", model)
            .unwrap()
            .to_reference()
            .unwrap();
        assert_eq!(reference.kind(), SkinKind::SecureRemoteUrl);
        assert!(reference.validate_for(model).is_ok());
        assert_eq!(
            SkinLocation::classify("Http://example.com/a.png", model).unwrap(),
            SkinLocation::Url {
                url: "Http://example.com/a.png".into(),
                secure: false
            }
        );
    }

    #[test]
    fn classify_rejects_player_names_for_url_only_models() {
        let err = SkinLocation::classify("Notch", SkinModel::Villager).unwrap_err();
        assert!(err.to_string().contains("only accepts skin URLs"));
        assert!(SkinLocation::classify("https://example.com/v.png", SkinModel::Villager).is_ok());
    }

    #[test]
    fn http_urls_are_insecure() {
        let reference = SkinLocation::classify("http://example.com/a.png", SkinModel::Fairy)
            .unwrap()
            .to_reference()
            .unwrap();
        assert_eq!(reference.kind(), SkinKind::InsecureRemoteUrl);
        assert!(reference.skin_id().is_some());
    }

    #[test]
    fn empty_location_has_no_reference() {
        assert!(SkinLocation::Empty.to_reference().is_none());
    }

    #[test]
    fn validate_default_variant() {
        let ok = SkinReference::default_for(SkinModel::Cat);
        assert!(ok.validate_for(SkinModel::Cat).is_ok());
        let bad = SkinReference::Default {
            variant: "purple".into(),
        };
        assert!(bad.validate_for(SkinModel::Cat).is_err());
    }

    #[test]
    fn validate_rejects_mismatched_syntax() {
        let reference = SkinReference::PlayerName {
            name: "https://example.com".into(),
            skin_id: SkinId::new(),
        };
        assert!(reference.validate_for(SkinModel::Humanoid).is_err());

        let insecure_marked_secure = SkinReference::RemoteUrl {
            url: "http://example.com/a.png".into(),
            secure: true,
            skin_id: SkinId::new(),
        };
        assert!(insecure_marked_secure
            .validate_for(SkinModel::Humanoid)
            .is_err());
    }

    #[test]
    fn skin_model_parses_from_key() {
        assert_eq!("humanoid_slim".parse::<SkinModel>().unwrap(), SkinModel::HumanoidSlim);
        assert_eq!(SkinModel::Villager.to_string(), "villager");
        assert!("dragon".parse::<SkinModel>().is_err());
    }

    #[test]
    fn reference_serializes_with_kind_tag() {
        let json = serde_json::to_value(SkinReference::default_for(SkinModel::Humanoid)).unwrap();
        assert_eq!(json["kind"], "default");
        assert_eq!(json["variant"], "steve");
    }
}
