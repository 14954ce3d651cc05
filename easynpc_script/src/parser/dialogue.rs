//! Dialogue lines: `"trigger", condition, ... -> consequence, ..., "answer"`.
//!
//! Clauses before the arrow are conditions. After the arrow a quoted string
//! is an answer, and keywords shared by both sides become a condition when
//! they use a compare-only operator and a consequence otherwise.

use easynpc_data::{CompareOperator, Condition, Consequence, DialogueLine, NpcDataItem};
use log::warn;
use pest::Parser;
use pest::iterators::Pair;

use super::conditions::{self, ConditionKeyword};
use super::consequences::{self, ConsequenceKeyword};
use super::helpers::unquote;
use super::{DslParser, Issue, LineScope, Rule, pest_column};
use crate::document::SourceLine;
use crate::error::ParseErrorKind;

const EXPECTED: &str = "`\"trigger\", conditions -> consequences`";

/// Shape test only: a quoted trigger and an arrow.
pub(super) fn detect(text: &str) -> bool {
    text.starts_with('"') && text.contains("->")
}

/// `operator operand`, either after a clause or inside its parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Comparison<'i> {
    pub operator: &'i str,
    pub operator_column: usize,
    pub operand: &'i str,
    /// Column of the operand.
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Arg<'i> {
    /// A quoted string, quotes included.
    Text { raw: &'i str, column: usize },
    Operand { text: &'i str, column: usize },
    /// `strength > 10` inside `attrib(...)`.
    Compare {
        subject: &'i str,
        column: usize,
        comparison: Comparison<'i>,
    },
}

impl Arg<'_> {
    pub fn column(&self) -> usize {
        match self {
            Arg::Text { column, .. } | Arg::Operand { column, .. } | Arg::Compare { column, .. } => *column,
        }
    }

    /// The argument as a name or token, unquoting strings.
    pub fn token(&self) -> String {
        match self {
            Arg::Text { raw, .. } => unquote(raw),
            Arg::Operand { text, .. } => text.to_string(),
            Arg::Compare { subject, .. } => subject.to_string(),
        }
    }

    /// Raw operand text; `None` for strings and inner comparisons.
    pub fn operand(&self) -> Option<&str> {
        match self {
            Arg::Operand { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct KeywordClause<'i> {
    pub keyword: &'i str,
    pub column: usize,
    pub args: Option<Vec<Arg<'i>>>,
    pub comparison: Option<Comparison<'i>>,
}

impl<'i> KeywordClause<'i> {
    pub fn invalid(&self, reason: &'static str) -> Issue {
        Issue::at(
            self.column,
            ParseErrorKind::InvalidClause {
                keyword: self.keyword.to_string(),
                reason,
            },
        )
    }

    pub fn args(&self) -> &[Arg<'i>] {
        self.args.as_deref().unwrap_or(&[])
    }

    /// Operator written after the clause or inside its parentheses.
    fn operator(&self) -> Option<&'i str> {
        self.comparison
            .as_ref()
            .map(|cmp| cmp.operator)
            .or_else(|| self.inner_comparison().map(|cmp| cmp.operator))
    }

    fn inner_comparison(&self) -> Option<Comparison<'i>> {
        self.args().iter().find_map(|arg| match arg {
            Arg::Compare { comparison, .. } => Some(*comparison),
            _ => None,
        })
    }

    fn compares(&self) -> bool {
        self.operator().is_some_and(CompareOperator::is_compare_only)
    }

    /// The one comparison of this clause, wherever it was written.
    pub fn operation(&self) -> Result<Comparison<'i>, Issue> {
        match (self.comparison, self.inner_comparison()) {
            (Some(cmp), None) | (None, Some(cmp)) => Ok(cmp),
            (Some(_), Some(_)) => Err(self.invalid("has more than one operator")),
            (None, None) => Err(self.invalid("needs an operator and a value")),
        }
    }

    /// Keywords such as `isAdmin` or `trade` stand alone.
    pub fn bare(&self) -> Result<(), Issue> {
        if self.args.is_some() || self.comparison.is_some() {
            return Err(self.invalid("takes no arguments"));
        }
        Ok(())
    }

    /// Exactly `count` parenthesised arguments.
    pub fn expect_args(&self, count: usize, reason: &'static str) -> Result<&[Arg<'i>], Issue> {
        let args = self.args();
        if args.len() != count {
            return Err(self.invalid(reason));
        }
        Ok(args)
    }

    /// No parentheses, only `keyword op value`.
    pub fn without_args(&self) -> Result<Comparison<'i>, Issue> {
        if self.args.is_some() {
            return Err(self.invalid("takes no parenthesised arguments"));
        }
        self.operation()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Clause<'i> {
    Answer { raw: &'i str, column: usize },
    Keyword(KeywordClause<'i>),
}

impl<'i> Clause<'i> {
    fn from_pair(line: SourceLine<'i>, pair: Pair<'i, Rule>) -> Option<Self> {
        let inner = pair.into_inner().next()?;
        let column = line.column_of(inner.as_span().start());
        match inner.as_rule() {
            Rule::answer => Some(Clause::Answer {
                raw: inner.as_str(),
                column,
            }),
            Rule::keyword_clause => {
                let mut clause = KeywordClause {
                    keyword: "",
                    column,
                    args: None,
                    comparison: None,
                };
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::keyword => clause.keyword = part.as_str(),
                        Rule::arguments => {
                            clause.args = Some(part.into_inner().filter_map(|p| arg_from_pair(line, p)).collect())
                        },
                        Rule::comparison => clause.comparison = comparison_from_pair(line, part),
                        _ => {},
                    }
                }
                Some(Clause::Keyword(clause))
            },
            _ => None,
        }
    }
}

fn arg_from_pair<'i>(line: SourceLine<'i>, pair: Pair<'i, Rule>) -> Option<Arg<'i>> {
    let column = line.column_of(pair.as_span().start());
    match pair.as_rule() {
        Rule::text => Some(Arg::Text {
            raw: pair.as_str(),
            column,
        }),
        Rule::operand => Some(Arg::Operand {
            text: pair.as_str(),
            column,
        }),
        Rule::inner_comparison => {
            let mut inner = pair.into_inner();
            let subject = inner.next()?.as_str();
            let comparison = comparison_from_pair(line, inner.next()?)?;
            Some(Arg::Compare {
                subject,
                column,
                comparison,
            })
        },
        _ => None,
    }
}

fn comparison_from_pair<'i>(line: SourceLine<'i>, pair: Pair<'i, Rule>) -> Option<Comparison<'i>> {
    let mut inner = pair.into_inner();
    let operator = inner.next()?;
    let operand = inner.next()?;
    Some(Comparison {
        operator: operator.as_str(),
        operator_column: line.column_of(operator.as_span().start()),
        operand: operand.as_str(),
        column: line.column_of(operand.as_span().start()),
    })
}

/// Parse the line and split its clauses at the arrow.
pub(super) fn open<'s>(scope: &mut LineScope<'_, 's>) -> Option<(DialogueBuilder, Vec<Clause<'s>>, Vec<Clause<'s>>)> {
    let line = scope.line();
    let mut pairs = match DslParser::parse(Rule::dialogue_line, line.text) {
        Ok(pairs) => pairs,
        Err(err) => {
            scope.report(Issue::at(
                pest_column(&err),
                ParseErrorKind::MalformedStatement {
                    keyword: "dialogue".to_string(),
                    expected: EXPECTED,
                },
            ));
            return None;
        },
    };
    let root = pairs.next()?;
    let mut trigger = String::new();
    let mut conditions = Vec::new();
    let mut consequences = Vec::new();
    let mut past_arrow = false;
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::trigger => trigger = unquote(pair.as_str().trim()),
            Rule::arrow => past_arrow = true,
            Rule::clause => {
                let Some(clause) = Clause::from_pair(line, pair) else {
                    warn!("line {}: skipping clause without content", line.number);
                    continue;
                };
                if past_arrow {
                    consequences.push(clause);
                } else {
                    conditions.push(clause);
                }
            },
            _ => {},
        }
    }
    Some((DialogueBuilder::new(trigger), conditions, consequences))
}

/// Attaches the clauses of one dialogue line. A clause that fails is
/// reported and dropped; its siblings are kept.
#[derive(Debug)]
pub(super) struct DialogueBuilder {
    line: DialogueLine,
}

impl DialogueBuilder {
    fn new(trigger: String) -> Self {
        Self {
            line: DialogueLine::new(trigger),
        }
    }

    /// A clause written before the arrow.
    pub fn condition(&mut self, clause: &Clause<'_>, scope: &mut LineScope<'_, '_>) {
        match clause {
            Clause::Answer { column, .. } => scope.report(Issue::at(
                *column,
                ParseErrorKind::InvalidClause {
                    keyword: "answer".to_string(),
                    reason: "answers belong after `->`",
                },
            )),
            Clause::Keyword(kc) => match kc.keyword.parse::<ConditionKeyword>() {
                Ok(keyword) => self.push_condition(keyword, kc, scope),
                Err(_) if kc.keyword.parse::<ConsequenceKeyword>().is_ok() => {
                    scope.report(kc.invalid("is a consequence and belongs after `->`"))
                },
                Err(_) => unknown(kc, scope),
            },
        }
    }

    /// A clause written after the arrow.
    pub fn after_arrow(&mut self, clause: &Clause<'_>, scope: &mut LineScope<'_, '_>) {
        let kc = match clause {
            Clause::Answer { raw, .. } => {
                self.line.consequences.push(Consequence::Answer(unquote(raw)));
                return;
            },
            Clause::Keyword(kc) => kc,
        };
        let as_condition = kc.keyword.parse::<ConditionKeyword>().ok();
        let as_consequence = kc.keyword.parse::<ConsequenceKeyword>().ok();
        match (as_condition, as_consequence) {
            (Some(keyword), Some(_)) if kc.compares() => self.push_condition(keyword, kc, scope),
            (_, Some(keyword)) => self.push_consequence(keyword, kc, scope),
            (Some(keyword), None) => self.push_condition(keyword, kc, scope),
            (None, None) => unknown(kc, scope),
        }
    }

    fn push_condition(&mut self, keyword: ConditionKeyword, kc: &KeywordClause<'_>, scope: &mut LineScope<'_, '_>) {
        let built: Result<Condition, Issue> = conditions::build(keyword, kc, scope.cx());
        match built {
            Ok(condition) => self.line.conditions.push(condition),
            Err(issue) => dropped(kc, issue, scope),
        }
    }

    fn push_consequence(
        &mut self,
        keyword: ConsequenceKeyword,
        kc: &KeywordClause<'_>,
        scope: &mut LineScope<'_, '_>,
    ) {
        match consequences::build(keyword, kc, scope.cx()) {
            Ok(consequence) => self.line.consequences.push(consequence),
            Err(issue) => dropped(kc, issue, scope),
        }
    }

    pub fn finish(self) -> NpcDataItem {
        NpcDataItem::Dialogue(self.line)
    }
}

fn unknown(kc: &KeywordClause<'_>, scope: &mut LineScope<'_, '_>) {
    let issue = Issue::at(
        kc.column,
        ParseErrorKind::UnknownKeyword {
            keyword: kc.keyword.to_string(),
        },
    );
    dropped(kc, issue, scope);
}

fn dropped(kc: &KeywordClause<'_>, issue: Issue, scope: &mut LineScope<'_, '_>) {
    warn!("line {}: dropping `{}` clause: {}", scope.line().number, kc.keyword, issue.kind);
    scope.report(issue);
}
