//! easynpc_script: parser and validator for easyNPC scripts.
//!
//! An easyNPC script describes one non-player character, one statement per
//! line:
//!
//! ```text
//! name = "Guard Bob"
//! race = human
//! colorHair = 120, 80, 20
//! itemMainHand = 2763
//! sellItems = 15, 23
//! guardRange = 5, 5, 5, 5
//! "hello", chance(50) -> attrib(strength > 10) inform("hi"), "Greetings."
//! ```
//!
//! Parsing never stops at the first problem. Every line produces either a
//! data item or at least one error, and both end up in a [`ParsedNpc`].
//!
//! ```
//! use easynpc_data::{ItemCatalog, SkillCatalog};
//! use easynpc_script::{ParseContext, parse_script};
//!
//! let items = ItemCatalog::default();
//! let skills = SkillCatalog::default();
//! let doc = parse_script("name = \"Guard Bob\"\nrace = centaur", &ParseContext::new(&items, &skills));
//! assert_eq!(doc.name(), Some("Guard Bob"));
//! assert_eq!(doc.errors().len(), 1);
//! ```

mod catalog;
mod document;
mod error;
mod parser;

pub use catalog::{CatalogError, load_item_catalog, load_skill_catalog, parse_item_catalog, parse_skill_catalog};
pub use document::{DataEntry, ParsedNpc, SourceLine};
pub use error::{EnglishMessages, MessageCatalog, ParseError, ParseErrorKind};
pub use parser::{AppearanceKey, GuardKey, IdentityKey, ParseContext, StatementKind, TradeKey};

use parser::Orchestrator;

/// Parse a whole script.
pub fn parse_script(source: &str, cx: &ParseContext<'_>) -> ParsedNpc {
    parse_lines(SourceLine::split(source), cx)
}

/// Parse pre-split lines, e.g. from an editor buffer.
pub fn parse_lines<'s>(lines: impl IntoIterator<Item = SourceLine<'s>>, cx: &ParseContext<'_>) -> ParsedNpc {
    let mut orchestrator = Orchestrator::new(cx);
    for line in lines {
        orchestrator.feed(line);
    }
    orchestrator.finish()
}

/// Whether some statement kind claims this line. Side-effect free, meant
/// for syntax highlighting.
pub fn can_parse_line(text: &str) -> bool {
    StatementKind::detect(text).is_some()
}
