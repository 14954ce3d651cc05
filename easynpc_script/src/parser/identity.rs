use easynpc_data::{Direction, IdentityField, Language, Locale, NpcDataItem, Race, Sex, Town};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::helpers::{field_text, field_word, position, quote_warning, resolve};
use super::statement::Statement;
use super::{Issue, LineScope};
use crate::error::ParseErrorKind;

/// Keywords of identity statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum IdentityKey {
    Name,
    Race,
    Sex,
    Direction,
    Position,
    Author,
    Job,
    Affiliation,
    DefaultLanguage,
    Language,
    #[strum(serialize = "lookatDE")]
    LookAtDe,
    #[strum(serialize = "lookatUS")]
    LookAtUs,
    #[strum(serialize = "useMsgDE")]
    UseMsgDe,
    #[strum(serialize = "useMsgUS")]
    UseMsgUs,
    #[strum(serialize = "wrongLangDE")]
    WrongLangDe,
    #[strum(serialize = "wrongLangUS")]
    WrongLangUs,
    #[strum(serialize = "autointroduce")]
    AutoIntroduce,
}

impl IdentityKey {
    fn expected(self) -> &'static str {
        match self {
            IdentityKey::Position => "`x, y, z`",
            IdentityKey::Race
            | IdentityKey::Sex
            | IdentityKey::Direction
            | IdentityKey::Affiliation
            | IdentityKey::DefaultLanguage
            | IdentityKey::Language
            | IdentityKey::AutoIntroduce => "a single token",
            _ => "a single quoted text",
        }
    }

    fn localized(self) -> Option<Locale> {
        match self {
            IdentityKey::LookAtDe | IdentityKey::UseMsgDe | IdentityKey::WrongLangDe => Some(Locale::German),
            IdentityKey::LookAtUs | IdentityKey::UseMsgUs | IdentityKey::WrongLangUs => Some(Locale::English),
            _ => None,
        }
    }
}

pub(super) fn parse(key: IdentityKey, scope: &mut LineScope<'_, '_>) -> Option<NpcDataItem> {
    let stmt = scope.accept(Statement::parse(scope.line(), scope.keyword(), key.expected()))?;
    let field = scope.accept(extract(key, &stmt))?;
    if key.localized().is_some() {
        if let Some(warning) = quote_warning(stmt.fields[0].text, "localized text", stmt.fields[0].column) {
            scope.report(warning);
        }
    }
    Some(NpcDataItem::Identity(field))
}

fn extract(key: IdentityKey, stmt: &Statement<'_>) -> Result<IdentityField, Issue> {
    let expected = key.expected();
    let arity = if key == IdentityKey::Position { 3 } else { 1 };
    let fields = stmt.expect_fields(arity, expected)?;
    let first = &fields[0];
    let text = || field_text(first, stmt.keyword, expected);
    let word = || field_word(first, stmt.keyword, expected);

    Ok(match key {
        IdentityKey::Name => IdentityField::Name(text()?),
        IdentityKey::Author => IdentityField::Author(text()?),
        IdentityKey::Job => IdentityField::Job(text()?),
        IdentityKey::Race => IdentityField::Race(resolve::<Race>(&word()?, "race", first.column)?),
        IdentityKey::Sex => IdentityField::Sex(resolve::<Sex>(&word()?, "sex", first.column)?),
        IdentityKey::Direction => {
            IdentityField::Direction(resolve::<Direction>(&word()?, "direction", first.column)?)
        },
        IdentityKey::Affiliation => IdentityField::Affiliation(resolve::<Town>(&word()?, "town", first.column)?),
        IdentityKey::DefaultLanguage => {
            IdentityField::DefaultLanguage(resolve::<Language>(&word()?, "language", first.column)?)
        },
        IdentityKey::Language => IdentityField::Language(resolve::<Language>(&word()?, "language", first.column)?),
        IdentityKey::Position => IdentityField::Position(position(fields)?),
        IdentityKey::AutoIntroduce => IdentityField::AutoIntroduce(switch(&word()?, first.column)?),
        IdentityKey::LookAtDe | IdentityKey::LookAtUs => IdentityField::LookAt {
            locale: locale(key),
            text: text()?,
        },
        IdentityKey::UseMsgDe | IdentityKey::UseMsgUs => IdentityField::UseMessage {
            locale: locale(key),
            text: text()?,
        },
        IdentityKey::WrongLangDe | IdentityKey::WrongLangUs => IdentityField::WrongLanguage {
            locale: locale(key),
            text: text()?,
        },
    })
}

fn locale(key: IdentityKey) -> Locale {
    key.localized().unwrap_or(Locale::English)
}

fn switch(token: &str, column: usize) -> Result<bool, Issue> {
    match token.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(Issue::at(
            column,
            ParseErrorKind::UnknownEnumerator {
                field: "autointroduce",
                token: token.to_string(),
                expected: "on, off, true, false, yes, no".to_string(),
            },
        )),
    }
}
