//! Equipment slots and item references

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Largest stack an equipment slot holds.
pub const MAX_STACK_COUNT: u8 = 64;

static ITEM_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_.-]+:[a-z0-9_.-]+(/[a-z0-9_.-]+)*$").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Head,
    Chest,
    Legs,
    Feet,
}

impl EquipmentSlot {
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Head,
            EquipmentSlot::Chest,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
        ]
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentSlot::MainHand => "main_hand",
            EquipmentSlot::OffHand => "off_hand",
            EquipmentSlot::Head => "head",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Feet => "feet",
        };
        write!(f, "{}", name)
    }
}

/// A namespaced item id with a stack count, e.g. `minecraft:iron_sword x1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ItemReferenceRaw", into = "ItemReferenceRaw")]
pub struct ItemReference {
    item_id: String,
    count: u8,
}

#[derive(Serialize, Deserialize)]
struct ItemReferenceRaw {
    item_id: String,
    #[serde(default = "default_count")]
    count: u8,
}

fn default_count() -> u8 {
    1
}

impl ItemReference {
    pub fn new(item_id: impl Into<String>, count: u8) -> Result<Self, DomainError> {
        let item_id = item_id.into();
        if !ITEM_ID_RE.is_match(&item_id) {
            return Err(DomainError::validation(format!(
                "Invalid item id '{}', expected namespace:path",
                item_id
            )));
        }
        if count == 0 || count > MAX_STACK_COUNT {
            return Err(DomainError::validation(format!(
                "Item count must be between 1 and {}",
                MAX_STACK_COUNT
            )));
        }
        Ok(Self { item_id, count })
    }

    /// A single item.
    pub fn single(item_id: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(item_id, 1)
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn namespace(&self) -> &str {
        self.item_id
            .split_once(':')
            .map(|(namespace, _)| namespace)
            .unwrap_or_default()
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

impl fmt::Display for ItemReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.item_id, self.count)
    }
}

impl FromStr for ItemReference {
    type Err = DomainError;

    /// Parses `namespace:path` or `namespace:path xN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.rsplit_once(" x") {
            Some((id, count)) => {
                let count = count
                    .parse::<u8>()
                    .map_err(|_| DomainError::parse(format!("Invalid item count in '{}'", s)))?;
                Self::new(id.trim(), count)
            }
            None => Self::single(s),
        }
    }
}

impl TryFrom<ItemReferenceRaw> for ItemReference {
    type Error = DomainError;

    fn try_from(raw: ItemReferenceRaw) -> Result<Self, Self::Error> {
        Self::new(raw.item_id, raw.count)
    }
}

impl From<ItemReference> for ItemReferenceRaw {
    fn from(item: ItemReference) -> Self {
        Self {
            item_id: item.item_id,
            count: item.count,
        }
    }
}
