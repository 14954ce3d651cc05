//! The parsed NPC document and the source lines it is built from.

use std::collections::HashMap;

use easynpc_data::{DialogueLine, IdentityField, IdentityKind, Locale, NpcDataItem};
use serde::Serialize;

use crate::error::{MessageCatalog, ParseError, ParseErrorKind};

/// One line of script text with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }

    /// Split a whole script into numbered lines (`\n` or `\r\n`).
    pub fn split(source: &'a str) -> impl Iterator<Item = SourceLine<'a>> {
        source
            .lines()
            .enumerate()
            .map(|(idx, text)| SourceLine::new(idx + 1, text))
    }

    /// 1-based character column of a byte offset into this line.
    pub fn column_of(&self, byte_offset: usize) -> usize {
        let end = byte_offset.min(self.text.len());
        self.text
            .get(..end)
            .map_or(end, |prefix| prefix.chars().count())
            + 1
    }
}

/// A data item together with the line it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataEntry {
    pub line: usize,
    pub item: NpcDataItem,
}

/// Output of one parse pass: every parsed item and every error, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedNpc {
    items: Vec<DataEntry>,
    errors: Vec<ParseError>,
    #[serde(skip)]
    identity_slots: HashMap<(IdentityKind, Option<Locale>), usize>,
}

impl ParsedNpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. A single-valued identity field that was already set
    /// is overwritten in its original slot.
    pub fn add_data(&mut self, line: usize, item: NpcDataItem) {
        let slot = item.as_identity().and_then(IdentityField::slot);
        if let Some(slot) = slot {
            if let Some(&idx) = self.identity_slots.get(&slot) {
                self.items[idx] = DataEntry { line, item };
                return;
            }
            self.identity_slots.insert(slot, self.items.len());
        }
        self.items.push(DataEntry { line, item });
    }

    pub fn add_error(&mut self, line: usize, kind: ParseErrorKind, messages: &dyn MessageCatalog) {
        self.push_error(line, None, kind, messages);
    }

    /// Variant for front ends that know the column of the offending text.
    pub fn add_error_at(&mut self, line: usize, column: usize, kind: ParseErrorKind, messages: &dyn MessageCatalog) {
        self.push_error(line, Some(column), kind, messages);
    }

    fn push_error(&mut self, line: usize, column: Option<usize>, kind: ParseErrorKind, messages: &dyn MessageCatalog) {
        let message = messages.describe(&kind);
        self.errors.push(ParseError {
            line,
            column,
            kind,
            message,
        });
    }

    pub fn data_entries(&self) -> &[DataEntry] {
        &self.items
    }

    pub fn data_items(&self) -> impl Iterator<Item = &NpcDataItem> {
        self.items.iter().map(|entry| &entry.item)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// True when at least one error that is not a warning was recorded.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|err| !err.is_warning())
    }

    pub fn name(&self) -> Option<&str> {
        self.data_items().find_map(|item| match item.as_identity() {
            Some(IdentityField::Name(name)) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn dialogue_lines(&self) -> impl Iterator<Item = &DialogueLine> {
        self.data_items().filter_map(NpcDataItem::as_dialogue)
    }
}
