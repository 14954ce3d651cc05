//! Shared data model for parsed easyNPC scripts.
//!
//! `easynpc_script` fills these types from script text; code generators and
//! editors consume them read-only.

pub mod catalog;
pub mod defs;
pub mod dialogue;
pub mod enums;

pub use catalog::{Item, ItemCatalog, ItemRef, Skill, SkillCatalog};
pub use defs::*;
pub use dialogue::{AdvancedNumber, Condition, Consequence, DialogueLine};
pub use enums::*;
