use easynpc_data::{ItemRef, LocalizedText, Position, Token};

use super::statement::{Field, Shape, Statement};
use super::{Issue, LineScope, ParseContext};
use crate::error::ParseErrorKind;

/// Decode a quoted string literal. Supports `\n`, `\t`, `\r`, `\"` and `\\`;
/// other escapes are kept verbatim.
pub(super) fn parse_string(s: &str) -> Result<String, &'static str> {
    let Some(body) = s.strip_prefix('"') else {
        return Err("missing opening quote");
    };
    let mut out = String::new();
    let mut escape = false;
    for (i, ch) in body.char_indices() {
        if escape {
            match ch {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '"' => out.push('"'),
                '\\' => out.push('\\'),
                other => {
                    out.push('\\');
                    out.push(other);
                },
            }
            escape = false;
            continue;
        }
        match ch {
            '\\' => escape = true,
            '"' if i + 1 == body.len() => return Ok(out),
            '"' => return Err("text after closing quote"),
            _ => out.push(ch),
        }
    }
    Err("missing closing quote")
}

pub(super) fn unquote(s: &str) -> String {
    parse_string(s).unwrap_or_else(|_| s.to_string())
}

/// Localised texts with an escaped quote are usually an authoring slip.
pub(super) fn quote_warning(raw: &str, field: &'static str, column: usize) -> Option<Issue> {
    raw.contains("\\\"").then(|| {
        Issue::at(
            column,
            ParseErrorKind::SuspiciousQuote {
                field,
                text: raw.to_string(),
            },
        )
    })
}

/// Parse an integer of at most `digits` digits and check it against `min..=max`.
pub(super) fn int_in(
    text: &str,
    column: usize,
    field: &'static str,
    digits: usize,
    min: i64,
    max: i64,
) -> Result<i64, Issue> {
    let t = text.trim();
    let unsigned = t.strip_prefix('-').unwrap_or(t);
    let malformed = || {
        Issue::at(
            column,
            ParseErrorKind::MalformedNumber {
                field,
                text: t.to_string(),
            },
        )
    };
    if unsigned.is_empty() || unsigned.len() > digits || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let value: i64 = t.parse().map_err(|_| malformed())?;
    if !(min..=max).contains(&value) {
        return Err(Issue::at(
            column,
            ParseErrorKind::ValueOutOfRange {
                field,
                value: t.to_string(),
                min,
                max,
            },
        ));
    }
    Ok(value)
}

pub(super) fn field_int(field: &Field<'_>, name: &'static str, digits: usize, min: i64, max: i64) -> Result<i64, Issue> {
    if !matches!(field.shape, Shape::Number) {
        return Err(Issue::at(
            field.column,
            ParseErrorKind::MalformedNumber {
                field: name,
                text: field.text.to_string(),
            },
        ));
    }
    int_in(field.text, field.column, name, digits, min, max)
}

pub(super) fn field_u8(field: &Field<'_>, name: &'static str) -> Result<u8, Issue> {
    field_int(field, name, 3, 0, 255).map(|v| v as u8)
}

/// A quoted text field, decoded.
pub(super) fn field_text(field: &Field<'_>, keyword: &str, expected: &'static str) -> Result<String, Issue> {
    match field.shape {
        Shape::Text => Ok(unquote(field.text)),
        _ => Err(Issue::at(
            field.column,
            ParseErrorKind::MalformedStatement {
                keyword: keyword.to_string(),
                expected,
            },
        )),
    }
}

/// A bare word or a quoted text, as written for enumerated values.
pub(super) fn field_word(field: &Field<'_>, keyword: &str, expected: &'static str) -> Result<String, Issue> {
    match field.shape {
        Shape::Word => Ok(field.text.to_string()),
        Shape::Text => Ok(unquote(field.text)),
        _ => Err(Issue::at(
            field.column,
            ParseErrorKind::MalformedStatement {
                keyword: keyword.to_string(),
                expected,
            },
        )),
    }
}

/// Resolve a token of a closed enumeration; the error lists every legal token.
pub(super) fn resolve<T: Token>(token: &str, field: &'static str, column: usize) -> Result<T, Issue> {
    T::from_token(token).ok_or_else(|| {
        Issue::at(
            column,
            ParseErrorKind::UnknownEnumerator {
                field,
                token: token.trim().to_string(),
                expected: T::vocabulary(),
            },
        )
    })
}

/// Three coordinates within the map's `i16` range.
pub(super) fn position(fields: &[Field<'_>]) -> Result<Position, Issue> {
    let coord = |idx: usize, name: &'static str| -> Result<i32, Issue> {
        let field = &fields[idx];
        field_int(field, name, 5, i16::MIN.into(), i16::MAX.into()).map(|v| v as i32)
    };
    Ok(Position {
        x: coord(0, "x coordinate")?,
        y: coord(1, "y coordinate")?,
        z: coord(2, "z coordinate")?,
    })
}

/// Parse a 1-4 digit item id and look it up in the catalog.
pub(super) fn resolve_item(cx: &ParseContext<'_>, text: &str, column: usize, context: &str) -> Result<ItemRef, Issue> {
    let id = int_in(text, column, "item id", 4, 0, 9999)? as u16;
    cx.items.resolve(id).map(ItemRef::from).ok_or_else(|| {
        Issue::at(
            column,
            ParseErrorKind::UnknownItem {
                id,
                text: context.trim().to_string(),
            },
        )
    })
}

/// `"German", "English"`, flagging escaped quotes in either text.
pub(super) fn localized_pair(
    stmt: &Statement<'_>,
    expected: &'static str,
    scope: &mut LineScope<'_, '_>,
) -> Option<LocalizedText> {
    let fields = scope.accept(stmt.expect_fields(2, expected))?;
    let german = scope.accept(field_text(&fields[0], stmt.keyword, expected))?;
    let english = scope.accept(field_text(&fields[1], stmt.keyword, expected))?;
    for field in fields {
        if let Some(warning) = quote_warning(field.text, "localized text", field.column) {
            scope.report(warning);
        }
    }
    Some(LocalizedText::new(german, english))
}
