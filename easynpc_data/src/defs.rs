use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;

use crate::catalog::ItemRef;
use crate::dialogue::DialogueLine;
use crate::enums::{
    Direction, EquipmentSlot, GuardTextKind, Language, Locale, Race, Sex, Town, TradeMessageKind, TradeMode,
};

/// Map coordinate of an NPC or a warp target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// RGB colour with one byte per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// A text authored once in German and once in English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub german: String,
    pub english: String,
}

impl LocalizedText {
    pub fn new(german: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            german: german.into(),
            english: english.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::German => &self.german,
            Locale::English => &self.english,
        }
    }
}

/// One successfully parsed statement of an easyNPC script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NpcDataItem {
    Identity(IdentityField),
    Appearance(AppearanceField),
    /// `item` is `None` when the slot is explicitly left empty (item id 0).
    Equipment {
        slot: EquipmentSlot,
        item: Option<ItemRef>,
    },
    Trade(TradeEntry),
    Guard(GuardField),
    /// Text the NPC says on its own from time to time.
    CycleText(LocalizedText),
    Dialogue(DialogueLine),
    /// Comment text after the leading `--`, kept for writing the script back out.
    Comment(String),
    EmptyLine,
}

impl NpcDataItem {
    pub fn as_identity(&self) -> Option<&IdentityField> {
        match self {
            NpcDataItem::Identity(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_dialogue(&self) -> Option<&DialogueLine> {
        match self {
            NpcDataItem::Dialogue(line) => Some(line),
            _ => None,
        }
    }
}

/// Identity statements: who the NPC is and how it presents itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(IdentityKind), derive(Hash))]
pub enum IdentityField {
    Name(String),
    Sex(Sex),
    Race(Race),
    Direction(Direction),
    Position(Position),
    Author(String),
    Job(String),
    Affiliation(Town),
    DefaultLanguage(Language),
    /// One of possibly several languages the NPC understands.
    Language(Language),
    LookAt { locale: Locale, text: String },
    UseMessage { locale: Locale, text: String },
    /// Reply used when the player talks in a language the NPC does not know.
    WrongLanguage { locale: Locale, text: String },
    AutoIntroduce(bool),
}

impl IdentityField {
    /// Key under which a redefinition replaces an earlier value, or `None`
    /// for fields that may appear any number of times.
    pub fn slot(&self) -> Option<(IdentityKind, Option<Locale>)> {
        match self {
            IdentityField::Author(_) | IdentityField::Language(_) => None,
            IdentityField::LookAt { locale, .. }
            | IdentityField::UseMessage { locale, .. }
            | IdentityField::WrongLanguage { locale, .. } => Some((self.into(), Some(*locale))),
            _ => Some((self.into(), None)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppearanceField {
    HairId(u8),
    BeardId(u8),
    SkinColor(Color),
    HairColor(Color),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TradeEntry {
    /// A plain list of traded items (`sellItems = 1, 2, 3`).
    Simple { mode: TradeMode, items: Vec<ItemRef> },
    Complex(ComplexTradeItem),
    Message { kind: TradeMessageKind, text: LocalizedText },
}

/// A single traded item with optional overrides for name, price and stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexTradeItem {
    pub mode: TradeMode,
    pub item: ItemRef,
    pub german_name: Option<String>,
    pub english_name: Option<String>,
    pub price: Option<u32>,
    pub stack_size: Option<u16>,
    pub quality: Option<u16>,
    /// Item data key/value pairs in source order.
    pub data: Vec<(String, String)>,
}

impl ComplexTradeItem {
    pub fn new(mode: TradeMode, item: ItemRef) -> Self {
        Self {
            mode,
            item,
            german_name: None,
            english_name: None,
            price: None,
            stack_size: None,
            quality: None,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GuardField {
    /// Monitored area around the NPC, in tiles per direction.
    Range { north: u8, south: u8, west: u8, east: u8 },
    WarpTarget(Position),
    Text { kind: GuardTextKind, text: LocalizedText },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_valued_identity_fields_share_a_slot() {
        let a = IdentityField::Name("Bob".into());
        let b = IdentityField::Name("Rob".into());
        assert_eq!(a.slot(), b.slot());
        assert!(a.slot().is_some());
    }

    #[test]
    fn localized_identity_fields_are_keyed_by_locale() {
        let de = IdentityField::LookAt {
            locale: Locale::German,
            text: "Ein Wächter".into(),
        };
        let us = IdentityField::LookAt {
            locale: Locale::English,
            text: "A guard".into(),
        };
        assert_ne!(de.slot(), us.slot());
    }

    #[test]
    fn multi_valued_identity_fields_have_no_slot() {
        assert_eq!(IdentityField::Author("a".into()).slot(), None);
        assert_eq!(IdentityField::Language(Language::Common).slot(), None);
    }
}
