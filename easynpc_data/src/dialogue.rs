//! Dialogue lines and the condition/consequence node types they carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemRef;
use crate::defs::Position;
use crate::enums::{
    ArenaTask, CalculationOperator, CharacterAttribute, CompareOperator, ItemLocation, Language, Locale, MagicType,
    Race, Sex, TalkMode, TalkState, Town,
};

/// A trigger phrase with the conditions that must all hold and the
/// consequences executed in order when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub trigger: String,
    pub conditions: Vec<Condition>,
    pub consequences: Vec<Consequence>,
}

impl DialogueLine {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            conditions: Vec::new(),
            consequences: Vec::new(),
        }
    }

    /// Answers the NPC speaks when this line fires.
    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.consequences.iter().filter_map(|c| match c {
            Consequence::Answer(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Numeric operand of a condition or consequence.
///
/// Expressions are kept verbatim; evaluating them is the job of the
/// generated server script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvancedNumber {
    Literal(i64),
    /// `%NUMBER`: the number the player said in the trigger.
    SaidNumber,
    Expression(String),
}

impl AdvancedNumber {
    pub fn as_literal(&self) -> Option<i64> {
        match self {
            AdvancedNumber::Literal(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for AdvancedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvancedNumber::Literal(value) => write!(f, "{value}"),
            AdvancedNumber::SaidNumber => write!(f, "%NUMBER"),
            AdvancedNumber::Expression(expr) => write!(f, "expr({expr})"),
        }
    }
}

/// A test that must hold for a dialogue line to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    IsAdmin,
    Attribute {
        attribute: CharacterAttribute,
        op: CompareOperator,
        value: AdvancedNumber,
    },
    /// Percent chance, 0 to 100.
    Chance(u8),
    Item {
        item: ItemRef,
        location: ItemLocation,
        op: CompareOperator,
        value: AdvancedNumber,
    },
    MagicType(MagicType),
    Money {
        op: CompareOperator,
        value: AdvancedNumber,
    },
    /// Compares the number the player said.
    Number {
        op: CompareOperator,
        value: AdvancedNumber,
    },
    QuestStatus {
        quest: u16,
        op: CompareOperator,
        value: AdvancedNumber,
    },
    Race {
        race: Race,
        negated: bool,
    },
    Rank {
        op: CompareOperator,
        value: AdvancedNumber,
    },
    Sex {
        sex: Sex,
        negated: bool,
    },
    Skill {
        skill: String,
        op: CompareOperator,
        value: AdvancedNumber,
    },
    State {
        op: CompareOperator,
        value: AdvancedNumber,
    },
    TalkMode(TalkMode),
    TalkState(TalkState),
    Town {
        town: Town,
        negated: bool,
    },
    /// Client locale of the player (`english` / `german`).
    Locale(Locale),
    /// In-game language the player is speaking.
    Language(Language),
}

/// An effect applied, in order, when a dialogue line fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Consequence {
    Arena(ArenaTask),
    Attribute {
        attribute: CharacterAttribute,
        op: CalculationOperator,
        value: AdvancedNumber,
    },
    DeleteItem {
        item: ItemRef,
        amount: AdvancedNumber,
    },
    GemCraft,
    Inform(String),
    Introduce,
    Item {
        item: ItemRef,
        amount: AdvancedNumber,
        quality: Option<u16>,
    },
    Money {
        op: CalculationOperator,
        value: AdvancedNumber,
    },
    QuestStatus {
        quest: u16,
        op: CalculationOperator,
        value: AdvancedNumber,
    },
    RankPoints {
        op: CalculationOperator,
        value: AdvancedNumber,
    },
    Repair,
    Rune {
        class: u8,
        number: u8,
    },
    Skill {
        skill: String,
        op: CalculationOperator,
        value: AdvancedNumber,
    },
    State {
        op: CalculationOperator,
        value: AdvancedNumber,
    },
    Town(Town),
    Trade,
    /// Treasure map level, 1 to 9.
    Treasure(u8),
    Warp(Position),
    TalkState(TalkState),
    /// Text the NPC says in reply.
    Answer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_number_display() {
        assert_eq!(AdvancedNumber::Literal(-3).to_string(), "-3");
        assert_eq!(AdvancedNumber::SaidNumber.to_string(), "%NUMBER");
        assert_eq!(
            AdvancedNumber::Expression("%NUMBER * 2".into()).to_string(),
            "expr(%NUMBER * 2)"
        );
    }

    #[test]
    fn answers_are_filtered_from_consequences() {
        let mut line = DialogueLine::new("hello");
        line.consequences.push(Consequence::Introduce);
        line.consequences.push(Consequence::Answer("Greetings.".into()));
        assert_eq!(line.answers().collect::<Vec<_>>(), vec!["Greetings."]);
    }
}
