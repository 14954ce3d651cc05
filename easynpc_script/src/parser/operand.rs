//! Operands and operators of dialogue clauses.

use easynpc_data::{AdvancedNumber, CalculationOperator, CompareOperator, Token};

use super::Issue;
use super::dialogue::Comparison;
use super::helpers::resolve;
use crate::error::ParseErrorKind;

/// Classify an operand: integer literal, `%NUMBER`, `expr(...)` or a bare
/// arithmetic expression over numbers and `%NAME` variables.
///
/// Expressions are stored verbatim, never evaluated.
pub(super) fn parse_operand(text: &str, column: usize, field: &'static str) -> Result<AdvancedNumber, Issue> {
    let t = text.trim();
    if let Ok(value) = t.parse::<i64>() {
        return Ok(AdvancedNumber::Literal(value));
    }
    if t.eq_ignore_ascii_case("%number") {
        return Ok(AdvancedNumber::SaidNumber);
    }
    if let Some(body) = expr_body(t) {
        if !body.trim().is_empty() {
            return Ok(AdvancedNumber::Expression(body.trim().to_string()));
        }
    } else if is_arithmetic(t) {
        return Ok(AdvancedNumber::Expression(t.to_string()));
    }
    Err(Issue::at(
        column,
        ParseErrorKind::MalformedNumber {
            field,
            text: t.to_string(),
        },
    ))
}

fn expr_body(t: &str) -> Option<&str> {
    let head = t.get(..5)?;
    if !head.eq_ignore_ascii_case("expr(") || !t.ends_with(')') {
        return None;
    }
    t.get(5..t.len() - 1)
}

/// At least one operator, and every term a number or a `%NAME` variable.
fn is_arithmetic(t: &str) -> bool {
    let body = t.strip_prefix('-').unwrap_or(t);
    if !body.contains(['+', '-', '*', '/']) {
        return false;
    }
    body.split(['+', '-', '*', '/', '(', ')'])
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .all(|term| {
            term.bytes().all(|b| b.is_ascii_digit())
                || term
                    .strip_prefix('%')
                    .is_some_and(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'))
        })
}

/// Operator and operand of a condition.
pub(super) fn compare(cmp: &Comparison<'_>) -> Result<(CompareOperator, AdvancedNumber), Issue> {
    let op = resolve::<CompareOperator>(cmp.operator, "compare operator", cmp.operator_column)?;
    let value = parse_operand(cmp.operand, cmp.column, "compared value")?;
    Ok((op, value))
}

/// Operator and operand of a consequence.
pub(super) fn calculate(keyword: &str, cmp: &Comparison<'_>) -> Result<(CalculationOperator, AdvancedNumber), Issue> {
    let op = CalculationOperator::from_token(cmp.operator).ok_or_else(|| {
        Issue::at(
            cmp.operator_column,
            ParseErrorKind::InvalidClause {
                keyword: keyword.to_string(),
                reason: "expects `=`, `+=` or `-=`",
            },
        )
    })?;
    let value = parse_operand(cmp.operand, cmp.column, "value")?;
    Ok((op, value))
}

/// `=`/`==` test for equality, `!=`/`~=` for inequality.
pub(super) fn negated(keyword: &str, cmp: &Comparison<'_>) -> Result<bool, Issue> {
    match cmp.operator {
        "=" | "==" => Ok(false),
        "!=" | "~=" => Ok(true),
        _ => Err(Issue::at(
            cmp.operator_column,
            ParseErrorKind::InvalidClause {
                keyword: keyword.to_string(),
                reason: "can only be compared with `=` or `!=`",
            },
        )),
    }
}

/// Plain assignment or equality test: `talkstate = end`, `magictype = mage`.
pub(super) fn equals(keyword: &str, cmp: &Comparison<'_>) -> Result<(), Issue> {
    match cmp.operator {
        "=" | "==" => Ok(()),
        _ => Err(Issue::at(
            cmp.operator_column,
            ParseErrorKind::InvalidClause {
                keyword: keyword.to_string(),
                reason: "expects `=`",
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operand(text: &str) -> Result<AdvancedNumber, Issue> {
        parse_operand(text, 1, "value")
    }

    #[test]
    fn literals_take_the_fast_path() {
        assert_eq!(operand("10"), Ok(AdvancedNumber::Literal(10)));
        assert_eq!(operand("-250"), Ok(AdvancedNumber::Literal(-250)));
    }

    #[test]
    fn said_number_is_case_insensitive() {
        assert_eq!(operand("%NUMBER"), Ok(AdvancedNumber::SaidNumber));
        assert_eq!(operand("%number"), Ok(AdvancedNumber::SaidNumber));
    }

    #[test]
    fn expressions_are_kept_verbatim() {
        assert_eq!(
            operand("expr(%NUMBER * 10 + 5)"),
            Ok(AdvancedNumber::Expression("%NUMBER * 10 + 5".into()))
        );
        assert_eq!(
            operand("%NUMBER*2"),
            Ok(AdvancedNumber::Expression("%NUMBER*2".into()))
        );
        assert_eq!(
            operand("(%QUESTSTATUS + 1) / 2"),
            Ok(AdvancedNumber::Expression("(%QUESTSTATUS + 1) / 2".into()))
        );
    }

    #[test]
    fn everything_else_is_malformed() {
        for bad in ["strength", "expr()", "10 + strength", "%", "1.5"] {
            let issue = operand(bad).expect_err(bad);
            assert!(matches!(issue.kind, ParseErrorKind::MalformedNumber { .. }), "{bad}");
        }
    }

    #[test]
    fn negation_follows_the_operator() {
        let cmp = |operator| Comparison {
            operator,
            operator_column: 6,
            operand: "elf",
            column: 8,
        };
        assert_eq!(negated("race", &cmp("=")), Ok(false));
        assert_eq!(negated("race", &cmp("~=")), Ok(true));
        assert!(negated("race", &cmp(">")).is_err());
        assert!(equals("talkstate", &cmp("+=")).is_err());
    }

    #[test]
    fn calculation_rejects_compare_operators() {
        let cmp = Comparison {
            operator: "<",
            operator_column: 7,
            operand: "5",
            column: 9,
        };
        let issue = calculate("money", &cmp).expect_err("`<` is not a calculation");
        assert_eq!(issue.column, Some(7));
        assert!(matches!(issue.kind, ParseErrorKind::InvalidClause { .. }));
    }
}
