use easynpc_data::{
    CharacterAttribute, Condition, ItemLocation, Language, Locale, MagicType, Race, Sex, TalkMode, TalkState, Town,
};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::dialogue::{Arg, KeywordClause};
use super::helpers::{int_in, resolve, resolve_item};
use super::operand::{compare, equals, negated};
use super::{Issue, ParseContext};
use crate::error::ParseErrorKind;

/// Keywords that can start a condition clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(super) enum ConditionKeyword {
    IsAdmin,
    Attrib,
    Chance,
    Item,
    MagicType,
    Money,
    #[strum(serialize = "%number")]
    Number,
    QuestStatus,
    Race,
    Rank,
    Sex,
    Skill,
    State,
    TalkMode,
    TalkState,
    Town,
    English,
    German,
    Language,
}

pub(super) fn build(keyword: ConditionKeyword, kc: &KeywordClause<'_>, cx: &ParseContext<'_>) -> Result<Condition, Issue> {
    use ConditionKeyword as K;

    match keyword {
        K::IsAdmin => kc.bare().map(|()| Condition::IsAdmin),
        K::English => kc.bare().map(|()| Condition::Locale(Locale::English)),
        K::German => kc.bare().map(|()| Condition::Locale(Locale::German)),
        K::Chance => {
            let args = kc.expect_args(1, "expects a percentage: `chance(25)`")?;
            if kc.comparison.is_some() {
                return Err(kc.invalid("takes no operator"));
            }
            let percent = number_arg(kc, &args[0], "chance", 3, 0, 100)?;
            Ok(Condition::Chance(percent as u8))
        },
        K::Attrib => {
            let args = kc.expect_args(1, "expects an attribute: `attrib(strength) > 10`")?;
            let attribute = resolve::<CharacterAttribute>(&args[0].token(), "attribute", args[0].column())?;
            let (op, value) = compare(&kc.operation()?)?;
            Ok(Condition::Attribute { attribute, op, value })
        },
        K::Item => {
            let args = kc.args();
            if args.is_empty() || args.len() > 2 {
                return Err(kc.invalid("expects an item id and a location: `item(23, all) > 2`"));
            }
            let id = args[0]
                .operand()
                .ok_or_else(|| kc.invalid("expects an item id"))?;
            let item = resolve_item(cx, id, args[0].column(), id)?;
            let location = match args.get(1) {
                Some(arg) => resolve::<ItemLocation>(&arg.token(), "item location", arg.column())?,
                None => ItemLocation::All,
            };
            let (op, value) = compare(&kc.operation()?)?;
            Ok(Condition::Item {
                item,
                location,
                op,
                value,
            })
        },
        K::MagicType => {
            let cmp = kc.without_args()?;
            equals(kc.keyword, &cmp)?;
            Ok(Condition::MagicType(resolve::<MagicType>(cmp.operand, "magic type", cmp.column)?))
        },
        K::Money => compare(&kc.without_args()?).map(|(op, value)| Condition::Money { op, value }),
        K::Number => compare(&kc.without_args()?).map(|(op, value)| Condition::Number { op, value }),
        K::Rank => compare(&kc.without_args()?).map(|(op, value)| Condition::Rank { op, value }),
        K::State => compare(&kc.without_args()?).map(|(op, value)| Condition::State { op, value }),
        K::QuestStatus => {
            let args = kc.expect_args(1, "expects a quest id: `queststatus(101) = 2`")?;
            let quest = number_arg(kc, &args[0], "quest id", 5, 0, u16::MAX.into())? as u16;
            let (op, value) = compare(&kc.operation()?)?;
            Ok(Condition::QuestStatus { quest, op, value })
        },
        K::Skill => {
            let args = kc.expect_args(1, "expects a skill name: `skill(mining) > 20`")?;
            let skill = resolve_skill(cx, &args[0])?;
            let (op, value) = compare(&kc.operation()?)?;
            Ok(Condition::Skill { skill, op, value })
        },
        K::Race => {
            let cmp = kc.without_args()?;
            let negated = negated(kc.keyword, &cmp)?;
            let race = resolve::<Race>(cmp.operand, "race", cmp.column)?;
            Ok(Condition::Race { race, negated })
        },
        K::Sex => {
            let cmp = kc.without_args()?;
            let negated = negated(kc.keyword, &cmp)?;
            let sex = resolve::<Sex>(cmp.operand, "sex", cmp.column)?;
            Ok(Condition::Sex { sex, negated })
        },
        K::Town => {
            let cmp = kc.without_args()?;
            let negated = negated(kc.keyword, &cmp)?;
            let town = resolve::<Town>(cmp.operand, "town", cmp.column)?;
            Ok(Condition::Town { town, negated })
        },
        K::TalkMode => {
            let cmp = kc.without_args()?;
            equals(kc.keyword, &cmp)?;
            Ok(Condition::TalkMode(resolve::<TalkMode>(cmp.operand, "talk mode", cmp.column)?))
        },
        K::TalkState => {
            let cmp = kc.without_args()?;
            equals(kc.keyword, &cmp)?;
            Ok(Condition::TalkState(resolve::<TalkState>(cmp.operand, "talk state", cmp.column)?))
        },
        K::Language => {
            let cmp = kc.without_args()?;
            equals(kc.keyword, &cmp)?;
            Ok(Condition::Language(resolve::<Language>(cmp.operand, "language", cmp.column)?))
        },
    }
}

/// A plain numeric argument such as the `101` in `queststatus(101)`.
pub(super) fn number_arg(
    kc: &KeywordClause<'_>,
    arg: &Arg<'_>,
    field: &'static str,
    digits: usize,
    min: i64,
    max: i64,
) -> Result<i64, Issue> {
    match arg.operand() {
        Some(text) => int_in(text, arg.column(), field, digits, min, max),
        None => Err(kc.invalid("expects a number argument")),
    }
}

/// Skill names resolve case-insensitively; the catalog spelling is stored.
pub(super) fn resolve_skill(cx: &ParseContext<'_>, arg: &Arg<'_>) -> Result<String, Issue> {
    let name = arg.token();
    cx.skills
        .resolve(&name)
        .map(|skill| skill.name.clone())
        .ok_or_else(|| Issue::at(arg.column(), ParseErrorKind::UnknownSkill { name }))
}
