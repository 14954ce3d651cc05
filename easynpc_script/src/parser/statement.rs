//! A flat view over `key = value, ...` statements.

use pest::Parser;
use pest::iterators::Pair;

use super::{DslParser, Issue, Rule, pest_column};
use crate::document::SourceLine;
use crate::error::ParseErrorKind;

/// How a value was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Shape<'i> {
    /// A quoted string; `text` keeps the quotes.
    Text,
    Number,
    /// A bare identifier.
    Word,
    /// `name(arg, ...)`, used by complex trade entries.
    Call { name: &'i str, args: Vec<Field<'i>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Field<'i> {
    pub text: &'i str,
    pub column: usize,
    pub shape: Shape<'i>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Statement<'i> {
    pub keyword: &'i str,
    pub fields: Vec<Field<'i>>,
}

impl<'i> Statement<'i> {
    /// Parse a line that was already claimed by a statement kind.
    ///
    /// `expected` describes the statement's shape for the error message.
    pub fn parse(line: SourceLine<'i>, keyword: &str, expected: &'static str) -> Result<Self, Issue> {
        let mut pairs = DslParser::parse(Rule::assignment, line.text).map_err(|err| {
            Issue::at(
                pest_column(&err),
                ParseErrorKind::MalformedStatement {
                    keyword: keyword.to_string(),
                    expected,
                },
            )
        })?;
        let mut inner = pairs
            .next()
            .map(Pair::into_inner)
            .into_iter()
            .flatten()
            .filter(|p| !matches!(p.as_rule(), Rule::EOI));
        let keyword = inner.next().map_or("", |p| p.as_str());
        let fields = inner
            .next()
            .map(|values| values.into_inner().map(|p| Field::from_pair(line, p)).collect())
            .unwrap_or_default();
        Ok(Statement { keyword, fields })
    }

    /// Check the field count, reporting at the first surplus field or at the line end.
    pub fn expect_fields(&self, count: usize, expected: &'static str) -> Result<&[Field<'i>], Issue> {
        if self.fields.len() == count {
            return Ok(&self.fields);
        }
        let column = self
            .fields
            .get(count)
            .or_else(|| self.fields.last())
            .map_or(1, |f| f.column);
        Err(self.malformed(column, expected))
    }

    pub fn malformed(&self, column: usize, expected: &'static str) -> Issue {
        Issue::at(
            column,
            ParseErrorKind::MalformedStatement {
                keyword: self.keyword.to_string(),
                expected,
            },
        )
    }
}

impl<'i> Field<'i> {
    fn from_pair(line: SourceLine<'i>, pair: Pair<'i, Rule>) -> Self {
        let text = pair.as_str();
        let column = line.column_of(pair.as_span().start());
        let shape = match pair.as_rule() {
            Rule::string => Shape::Text,
            Rule::number => Shape::Number,
            Rule::call => {
                let mut inner = pair.into_inner();
                let name = inner.next().map_or("", |p| p.as_str());
                let args = inner.map(|p| Field::from_pair(line, p)).collect();
                Shape::Call { name, args }
            },
            _ => Shape::Word,
        };
        Field { text, column, shape }
    }
}
