//! Parse orchestrator for easyNPC scripts.
//!
//! Each source line is classified into a [`StatementKind`] by a cheap
//! keyword test and then handed to the extractor for that kind. Extractors
//! either produce one data item or report errors; nothing escapes a line.

use std::mem;

use easynpc_data::{EquipmentSlot, ItemCatalog, NpcDataItem, SkillCatalog, Token};
use log::{debug, trace};
use pest::error::LineColLocation;
use pest_derive::Parser as PestParser;

use crate::document::{ParsedNpc, SourceLine};
use crate::error::{EnglishMessages, MessageCatalog, ParseErrorKind};

mod appearance;
mod conditions;
mod consequences;
mod cycle_text;
mod dialogue;
mod equipment;
mod guard;
mod helpers;
mod identity;
mod operand;
mod statement;
mod trade;

pub use appearance::AppearanceKey;
pub use guard::GuardKey;
pub use identity::IdentityKey;
pub use trade::TradeKey;

use dialogue::DialogueBuilder;

#[derive(PestParser)]
#[grammar = "src/grammar.pest"]
struct DslParser;

/// Read-only inputs of a parse pass.
///
/// Catalogs are borrowed, so any number of passes (also on different
/// threads) can share one set of catalogs.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub items: &'a ItemCatalog,
    pub skills: &'a SkillCatalog,
    pub messages: &'a dyn MessageCatalog,
}

impl<'a> ParseContext<'a> {
    /// Context with the built-in English messages.
    pub fn new(items: &'a ItemCatalog, skills: &'a SkillCatalog) -> Self {
        Self {
            items,
            skills,
            messages: &EnglishMessages,
        }
    }

    pub fn with_messages(mut self, messages: &'a dyn MessageCatalog) -> Self {
        self.messages = messages;
        self
    }
}

/// What kind of statement a line holds, decided from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Empty,
    Comment,
    Identity(IdentityKey),
    Appearance(AppearanceKey),
    Equipment(EquipmentSlot),
    Trade(TradeKey),
    Guard(GuardKey),
    CycleText,
    Dialogue,
}

impl StatementKind {
    /// Classify a line without parsing it. `None` means no statement kind
    /// claims the line.
    ///
    /// ```
    /// use easynpc_script::{IdentityKey, StatementKind};
    /// assert_eq!(StatementKind::detect("name = \"Bob\""), Some(StatementKind::Identity(IdentityKey::Name)));
    /// assert_eq!(StatementKind::detect("   "), Some(StatementKind::Empty));
    /// assert_eq!(StatementKind::detect("dance = 1"), None);
    /// ```
    pub fn detect(text: &str) -> Option<StatementKind> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Some(StatementKind::Empty);
        }
        if trimmed.starts_with("--") {
            return Some(StatementKind::Comment);
        }
        let keyword = leading_keyword(trimmed);
        if !keyword.is_empty() {
            if let Ok(key) = keyword.parse::<IdentityKey>() {
                return Some(StatementKind::Identity(key));
            }
            if let Ok(key) = keyword.parse::<AppearanceKey>() {
                return Some(StatementKind::Appearance(key));
            }
            if let Some(slot) = equipment_slot(keyword) {
                return Some(StatementKind::Equipment(slot));
            }
            if let Ok(key) = keyword.parse::<TradeKey>() {
                return Some(StatementKind::Trade(key));
            }
            if let Ok(key) = keyword.parse::<GuardKey>() {
                return Some(StatementKind::Guard(key));
            }
            if keyword.eq_ignore_ascii_case("cycletext") {
                return Some(StatementKind::CycleText);
            }
        }
        dialogue::detect(trimmed).then_some(StatementKind::Dialogue)
    }
}

/// Leading identifier of a statement (`hairID` in `hairID = 3`).
fn leading_keyword(text: &str) -> &str {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

/// `itemHead`, `itemMainHand`, `itemShoes`, ...
fn equipment_slot(keyword: &str) -> Option<EquipmentSlot> {
    let prefix = keyword.get(..4)?;
    if !prefix.eq_ignore_ascii_case("item") {
        return None;
    }
    EquipmentSlot::from_token(&keyword[4..])
}

/// A problem found while extracting one statement or clause.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Issue {
    pub kind: ParseErrorKind,
    pub column: Option<usize>,
}

impl Issue {
    pub fn new(kind: ParseErrorKind) -> Self {
        Self { kind, column: None }
    }

    pub fn at(column: usize, kind: ParseErrorKind) -> Self {
        Self {
            kind,
            column: Some(column),
        }
    }
}

fn pest_column(err: &pest::error::Error<Rule>) -> usize {
    match err.line_col {
        LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
    }
}

/// Error sink for the line currently being parsed.
pub(crate) struct LineScope<'a, 's> {
    cx: &'a ParseContext<'a>,
    doc: &'a mut ParsedNpc,
    line: SourceLine<'s>,
    failures: usize,
}

impl<'a, 's> LineScope<'a, 's> {
    fn new(cx: &'a ParseContext<'a>, doc: &'a mut ParsedNpc, line: SourceLine<'s>) -> Self {
        Self {
            cx,
            doc,
            line,
            failures: 0,
        }
    }

    pub fn cx(&self) -> &'a ParseContext<'a> {
        self.cx
    }

    pub fn line(&self) -> SourceLine<'s> {
        self.line
    }

    /// Keyword as written in the source line.
    pub fn keyword(&self) -> &'s str {
        leading_keyword(self.line.text)
    }

    pub fn report(&mut self, issue: Issue) {
        if !issue.kind.is_warning() {
            self.failures += 1;
        }
        trace!("line {}: {}", self.line.number, issue.kind);
        let messages = self.cx.messages;
        match issue.column {
            Some(column) => self.doc.add_error_at(self.line.number, column, issue.kind, messages),
            None => self.doc.add_error(self.line.number, issue.kind, messages),
        }
    }

    /// Report the error of a failed extraction step and turn it into `None`.
    pub fn accept<T>(&mut self, result: Result<T, Issue>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(issue) => {
                self.report(issue);
                None
            },
        }
    }

    /// Store the extracted item. An extractor that produced nothing must
    /// have said why; if it did not, a generic error stands in.
    fn commit(mut self, item: Option<NpcDataItem>, keyword: &str) {
        match item {
            Some(item) => self.doc.add_data(self.line.number, item),
            None if self.failures == 0 => self.report(Issue::new(ParseErrorKind::MalformedStatement {
                keyword: keyword.to_string(),
                expected: "a complete statement",
            })),
            None => {},
        }
    }
}

/// The orchestrator is scanning between statements, or attaching the
/// clauses of the current dialogue line.
enum OrchestratorState {
    Scanning,
    InDialogue(DialogueBuilder),
}

pub(crate) struct Orchestrator<'c> {
    cx: &'c ParseContext<'c>,
    doc: ParsedNpc,
    state: OrchestratorState,
}

impl<'c> Orchestrator<'c> {
    pub fn new(cx: &'c ParseContext<'c>) -> Self {
        Self {
            cx,
            doc: ParsedNpc::new(),
            state: OrchestratorState::Scanning,
        }
    }

    pub fn feed(&mut self, line: SourceLine<'_>) {
        let Some(kind) = StatementKind::detect(line.text) else {
            debug!("line {}: no statement kind matches", line.number);
            self.doc.add_error(
                line.number,
                ParseErrorKind::UnparseableLine {
                    text: line.text.trim().to_string(),
                },
                self.cx.messages,
            );
            return;
        };
        debug!("line {}: {:?}", line.number, kind);
        let keyword = leading_keyword(line.text);
        let mut scope = LineScope::new(self.cx, &mut self.doc, line);
        let item = match kind {
            StatementKind::Empty => Some(NpcDataItem::EmptyLine),
            StatementKind::Comment => {
                let text = line.text.trim().trim_start_matches("--").trim();
                Some(NpcDataItem::Comment(text.to_string()))
            },
            StatementKind::Identity(key) => identity::parse(key, &mut scope),
            StatementKind::Appearance(key) => appearance::parse(key, &mut scope),
            StatementKind::Equipment(slot) => equipment::parse(slot, &mut scope),
            StatementKind::Trade(key) => trade::parse(key, &mut scope),
            StatementKind::Guard(key) => guard::parse(key, &mut scope),
            StatementKind::CycleText => cycle_text::parse(&mut scope),
            StatementKind::Dialogue => match dialogue::open(&mut scope) {
                Some((builder, conditions, consequences)) => {
                    self.state = OrchestratorState::InDialogue(builder);
                    if let OrchestratorState::InDialogue(builder) = &mut self.state {
                        for clause in &conditions {
                            builder.condition(clause, &mut scope);
                        }
                        for clause in &consequences {
                            builder.after_arrow(clause, &mut scope);
                        }
                    }
                    match mem::replace(&mut self.state, OrchestratorState::Scanning) {
                        OrchestratorState::InDialogue(builder) => Some(builder.finish()),
                        OrchestratorState::Scanning => None,
                    }
                },
                None => None,
            },
        };
        scope.commit(item, keyword);
    }

    pub fn finish(self) -> ParsedNpc {
        self.doc
    }
}
