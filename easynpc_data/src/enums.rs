//! Closed enumerations used throughout easyNPC scripts.
//!
//! Every enumeration parses its tokens case-insensitively and prints the
//! canonical spelling, which is also what error messages list as the legal
//! vocabulary.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A closed set of script tokens.
///
/// Implemented for every enumeration that derives `EnumString`, `EnumIter`
/// and `IntoStaticStr`.
pub trait Token: Copy + FromStr + IntoEnumIterator + Into<&'static str> {
    /// Resolve a token, ignoring ASCII case and surrounding whitespace.
    fn from_token(token: &str) -> Option<Self> {
        token.trim().parse().ok()
    }

    /// Canonical spelling of this value.
    fn token(self) -> &'static str {
        self.into()
    }

    /// Every canonical token, comma-joined.
    ///
    /// ```
    /// use easynpc_data::{Sex, Token};
    /// assert_eq!(Sex::vocabulary(), "male, female");
    /// ```
    fn vocabulary() -> String {
        Self::iter().map(Token::token).collect::<Vec<_>>().join(", ")
    }
}

impl<T> Token for T where T: Copy + FromStr + IntoEnumIterator + Into<&'static str> {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Race {
    Human,
    Dwarf,
    Halfling,
    Elf,
    Orc,
    Lizardman,
    Gnome,
    Fairy,
    Goblin,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sex {
    Male,
    Female,
}

/// Facing direction of the NPC on the map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

/// Town (faction) an NPC or player belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Town {
    Cadomyr,
    Runewick,
    Galmair,
    Free,
}

/// In-game language an NPC can speak.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    Common,
    Human,
    Dwarf,
    Elf,
    Lizard,
    Orc,
    Halfling,
    Fairy,
    Gnome,
    Goblin,
    Ancient,
}

/// Client locale of a player; texts are authored once per locale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[strum(to_string = "german", serialize = "de")]
    German,
    #[strum(to_string = "english", serialize = "us", serialize = "en")]
    English,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Head,
    Chest,
    Coat,
    Hands,
    MainHand,
    SecondHand,
    Trousers,
    #[strum(to_string = "feet", serialize = "shoes")]
    Feet,
}

/// Character attributes readable and writable from dialogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CharacterAttribute {
    Sex,
    Age,
    Weight,
    BodyHeight,
    Attitude,
    Luck,
    Strength,
    Perception,
    Dexterity,
    Constitution,
    Intelligence,
    Essence,
    Willpower,
    Agility,
    FoodLevel,
    Hitpoints,
    Mana,
    PoisonLevel,
    MentalCapacity,
}

/// Where an item is searched for when counting a player's items.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemLocation {
    All,
    Belt,
    Body,
    Backpack,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MagicType {
    Mage,
    Priest,
    Bard,
    Druid,
    NoMagic,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TalkMode {
    Busy,
    Idle,
}

/// Conversation state of the NPC towards the current speaker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TalkState {
    Begin,
    End,
    Idle,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ArenaTask {
    RequestMonster,
    GetStats,
    GetRanking,
}

/// Which trade list a simple or complex trade entry belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum TradeMode {
    Sell,
    BuyPrimary,
    BuySecondary,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum TradeMessageKind {
    NotEnoughMoney,
    Finished,
    FinishedWithoutTrading,
    WrongItem,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum GuardTextKind {
    WarpedMonster,
    WarpedPlayer,
    HitPlayer,
}

/// Operators usable in dialogue conditions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum CompareOperator {
    #[strum(to_string = "=", serialize = "==")]
    Equal,
    #[strum(to_string = "<")]
    Less,
    #[strum(to_string = ">")]
    Greater,
    #[strum(to_string = "<=")]
    LesserOrEqual,
    #[strum(to_string = ">=")]
    GreaterOrEqual,
    #[strum(to_string = "!=", serialize = "~=")]
    NotEqual,
}

impl CompareOperator {
    /// True for the spellings that can only mean a comparison. A plain `=`
    /// doubles as assignment after the dialogue arrow.
    pub fn is_compare_only(token: &str) -> bool {
        matches!(token.trim(), "==" | "!=" | "~=" | "<" | ">" | "<=" | ">=")
    }
}

/// Operators usable in dialogue consequences.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum CalculationOperator {
    #[strum(to_string = "=")]
    Set,
    #[strum(to_string = "+=")]
    Add,
    #[strum(to_string = "-=")]
    Subtract,
}
