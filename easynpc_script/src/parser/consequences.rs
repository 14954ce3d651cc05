use easynpc_data::{AdvancedNumber, ArenaTask, CharacterAttribute, Consequence, ItemRef, Position, TalkState, Town};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::conditions::{number_arg, resolve_skill};
use super::dialogue::{Arg, KeywordClause};
use super::helpers::{resolve, resolve_item, unquote};
use super::operand::{calculate, equals, parse_operand};
use super::{Issue, ParseContext};

/// Keywords that can start a consequence clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(super) enum ConsequenceKeyword {
    Arena,
    Attrib,
    DeleteItem,
    GemCraft,
    Inform,
    Introduce,
    Item,
    Money,
    QuestStatus,
    RankPoints,
    Repair,
    Rune,
    Skill,
    State,
    Town,
    Trade,
    Treasure,
    Warp,
    TalkState,
}

pub(super) fn build(
    keyword: ConsequenceKeyword,
    kc: &KeywordClause<'_>,
    cx: &ParseContext<'_>,
) -> Result<Consequence, Issue> {
    use ConsequenceKeyword as K;

    match keyword {
        K::GemCraft => kc.bare().map(|()| Consequence::GemCraft),
        K::Introduce => kc.bare().map(|()| Consequence::Introduce),
        K::Repair => kc.bare().map(|()| Consequence::Repair),
        K::Trade => kc.bare().map(|()| Consequence::Trade),
        K::Arena => {
            let args = no_operator(kc, 1, "expects a task: `arena(getStats)`")?;
            Ok(Consequence::Arena(resolve::<ArenaTask>(&args[0].token(), "arena task", args[0].column())?))
        },
        K::Inform => {
            let args = no_operator(kc, 1, "expects a quoted text: `inform(\"...\")`")?;
            match &args[0] {
                Arg::Text { raw, .. } => Ok(Consequence::Inform(unquote(raw))),
                _ => Err(kc.invalid("expects a quoted text: `inform(\"...\")`")),
            }
        },
        K::Treasure => {
            let args = no_operator(kc, 1, "expects a level: `treasure(3)`")?;
            let level = number_arg(kc, &args[0], "treasure level", 1, 1, 9)?;
            Ok(Consequence::Treasure(level as u8))
        },
        K::Rune => {
            let args = no_operator(kc, 2, "expects a class and a number: `rune(1, 5)`")?;
            let class = number_arg(kc, &args[0], "rune class", 3, 0, 255)? as u8;
            let number = number_arg(kc, &args[1], "rune number", 3, 0, 255)? as u8;
            Ok(Consequence::Rune { class, number })
        },
        K::Warp => {
            let args = no_operator(kc, 3, "expects coordinates: `warp(x, y, z)`")?;
            let coord = |idx: usize, name: &'static str| -> Result<i32, Issue> {
                number_arg(kc, &args[idx], name, 5, i16::MIN.into(), i16::MAX.into()).map(|v| v as i32)
            };
            Ok(Consequence::Warp(Position {
                x: coord(0, "x coordinate")?,
                y: coord(1, "y coordinate")?,
                z: coord(2, "z coordinate")?,
            }))
        },
        K::DeleteItem => {
            let args = no_operator(kc, 2, "expects an item id and an amount: `deleteItem(23, 1)`")?;
            let item = item_arg(kc, cx, &args[0])?;
            let amount = amount_arg(kc, &args[1])?;
            Ok(Consequence::DeleteItem { item, amount })
        },
        K::Item => {
            let args = kc.args();
            if kc.comparison.is_some() || !(2..=3).contains(&args.len()) {
                return Err(kc.invalid("expects an item id, an amount and an optional quality: `item(23, 1, 333)`"));
            }
            let item = item_arg(kc, cx, &args[0])?;
            let amount = amount_arg(kc, &args[1])?;
            let quality = match args.get(2) {
                Some(arg) => Some(number_arg(kc, arg, "item quality", 3, 0, 999)? as u16),
                None => None,
            };
            Ok(Consequence::Item { item, amount, quality })
        },
        K::Attrib => {
            let args = kc.expect_args(1, "expects an attribute: `attrib(hitpoints) += 1000`")?;
            let attribute = resolve::<CharacterAttribute>(&args[0].token(), "attribute", args[0].column())?;
            let (op, value) = calculate(kc.keyword, &kc.operation()?)?;
            Ok(Consequence::Attribute { attribute, op, value })
        },
        K::Skill => {
            let args = kc.expect_args(1, "expects a skill name: `skill(mining) += 1`")?;
            let skill = resolve_skill(cx, &args[0])?;
            let (op, value) = calculate(kc.keyword, &kc.operation()?)?;
            Ok(Consequence::Skill { skill, op, value })
        },
        K::QuestStatus => {
            let args = kc.expect_args(1, "expects a quest id: `queststatus(101) = 3`")?;
            let quest = number_arg(kc, &args[0], "quest id", 5, 0, u16::MAX.into())? as u16;
            let (op, value) = calculate(kc.keyword, &kc.operation()?)?;
            Ok(Consequence::QuestStatus { quest, op, value })
        },
        K::Money => calculate(kc.keyword, &kc.without_args()?).map(|(op, value)| Consequence::Money { op, value }),
        K::RankPoints => {
            calculate(kc.keyword, &kc.without_args()?).map(|(op, value)| Consequence::RankPoints { op, value })
        },
        K::State => calculate(kc.keyword, &kc.without_args()?).map(|(op, value)| Consequence::State { op, value }),
        K::Town => {
            let cmp = kc.without_args()?;
            equals(kc.keyword, &cmp)?;
            Ok(Consequence::Town(resolve::<Town>(cmp.operand, "town", cmp.column)?))
        },
        K::TalkState => {
            let cmp = kc.without_args()?;
            equals(kc.keyword, &cmp)?;
            Ok(Consequence::TalkState(resolve::<TalkState>(cmp.operand, "talk state", cmp.column)?))
        },
    }
}

/// `count` arguments in parentheses and no trailing operator.
fn no_operator<'c, 'i>(kc: &'c KeywordClause<'i>, count: usize, reason: &'static str) -> Result<&'c [Arg<'i>], Issue> {
    if kc.comparison.is_some() {
        return Err(kc.invalid(reason));
    }
    kc.expect_args(count, reason)
}

fn item_arg(kc: &KeywordClause<'_>, cx: &ParseContext<'_>, arg: &Arg<'_>) -> Result<ItemRef, Issue> {
    let id = arg.operand().ok_or_else(|| kc.invalid("expects an item id"))?;
    resolve_item(cx, id, arg.column(), id)
}

fn amount_arg(kc: &KeywordClause<'_>, arg: &Arg<'_>) -> Result<AdvancedNumber, Issue> {
    let text = arg.operand().ok_or_else(|| kc.invalid("expects an amount"))?;
    parse_operand(text, arg.column(), "amount")
}

#[cfg(test)]
mod tests {
    use easynpc_data::{CalculationOperator, Item, ItemCatalog, Skill, SkillCatalog};

    use super::*;
    use crate::error::ParseErrorKind;
    use crate::{ParseContext, parse_script};

    /// Consequences and errors of a single `"t" -> <clause>` line.
    fn consequences(clause: &str) -> (Vec<Consequence>, Vec<ParseErrorKind>) {
        let items = ItemCatalog::new([Item {
            id: 23,
            name: "hammer".into(),
        }]);
        let skills = SkillCatalog::new([Skill {
            name: "mining".into(),
            group: None,
        }]);
        let cx = ParseContext::new(&items, &skills);
        let doc = parse_script(&format!("\"t\" -> {clause}"), &cx);
        let found = doc
            .dialogue_lines()
            .flat_map(|line| line.consequences.clone())
            .collect();
        let errors = doc.errors().iter().map(|e| e.kind.clone()).collect();
        (found, errors)
    }

    fn single(clause: &str) -> Consequence {
        let (mut found, errors) = consequences(clause);
        assert!(errors.is_empty(), "{clause}: {errors:?}");
        assert_eq!(found.len(), 1, "{clause}");
        found.remove(0)
    }

    fn rejected(clause: &str) -> ParseErrorKind {
        let (found, mut errors) = consequences(clause);
        assert!(found.is_empty(), "{clause} should be dropped");
        assert_eq!(errors.len(), 1, "{clause}");
        errors.remove(0)
    }

    fn hammer() -> ItemRef {
        ItemRef {
            id: 23,
            name: "hammer".into(),
        }
    }

    #[test]
    fn standalone_actions() {
        assert_eq!(single("introduce"), Consequence::Introduce);
        assert_eq!(single("trade"), Consequence::Trade);
        assert_eq!(single("repair"), Consequence::Repair);
        assert_eq!(single("gemcraft"), Consequence::GemCraft);
        assert!(matches!(rejected("trade(1)"), ParseErrorKind::InvalidClause { .. }));
    }

    #[test]
    fn arena_tasks() {
        assert_eq!(single("arena(getRanking)"), Consequence::Arena(ArenaTask::GetRanking));
        assert!(matches!(rejected("arena(fight)"), ParseErrorKind::UnknownEnumerator { .. }));
    }

    #[test]
    fn items_are_granted_and_removed() {
        assert_eq!(
            single("item(23, 5, 333)"),
            Consequence::Item {
                item: hammer(),
                amount: AdvancedNumber::Literal(5),
                quality: Some(333),
            }
        );
        assert_eq!(
            single("deleteItem(23, %NUMBER)"),
            Consequence::DeleteItem {
                item: hammer(),
                amount: AdvancedNumber::SaidNumber,
            }
        );
        assert_eq!(
            rejected("item(4711, 1)"),
            ParseErrorKind::UnknownItem {
                id: 4711,
                text: "4711".into()
            }
        );
        assert!(matches!(rejected("item(23, 1, 1000)"), ParseErrorKind::MalformedNumber { .. }));
    }

    #[test]
    fn calculations() {
        assert_eq!(
            single("attrib(hitpoints) += 1000"),
            Consequence::Attribute {
                attribute: CharacterAttribute::Hitpoints,
                op: CalculationOperator::Add,
                value: AdvancedNumber::Literal(1000),
            }
        );
        assert_eq!(
            single("skill(Mining) = 10"),
            Consequence::Skill {
                skill: "mining".into(),
                op: CalculationOperator::Set,
                value: AdvancedNumber::Literal(10),
            }
        );
        assert_eq!(
            single("rankpoints -= 5"),
            Consequence::RankPoints {
                op: CalculationOperator::Subtract,
                value: AdvancedNumber::Literal(5),
            }
        );
        assert_eq!(
            single("state = expr(%STATE + 1)"),
            Consequence::State {
                op: CalculationOperator::Set,
                value: AdvancedNumber::Expression("%STATE + 1".into()),
            }
        );
    }

    #[test]
    fn compare_only_operators_turn_shared_keywords_into_conditions() {
        let (found, errors) = consequences("state > 3");
        assert!(found.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn treasure_rune_and_warp() {
        assert_eq!(single("treasure(9)"), Consequence::Treasure(9));
        assert!(matches!(rejected("treasure(0)"), ParseErrorKind::ValueOutOfRange { .. }));
        assert_eq!(single("rune(1, 14)"), Consequence::Rune { class: 1, number: 14 });
        assert_eq!(
            single("warp(702, 290, -3)"),
            Consequence::Warp(Position { x: 702, y: 290, z: -3 })
        );
        assert!(matches!(rejected("warp(1, 2)"), ParseErrorKind::InvalidClause { .. }));
    }

    #[test]
    fn assignments_of_tokens() {
        assert_eq!(single("town = free"), Consequence::Town(Town::Free));
        assert_eq!(single("talkstate = end"), Consequence::TalkState(TalkState::End));
        assert!(matches!(rejected("talkstate += end"), ParseErrorKind::InvalidClause { .. }));
    }

    #[test]
    fn inform_needs_a_string() {
        assert_eq!(
            single("inform(\"Du hast Post.\")"),
            Consequence::Inform("Du hast Post.".into())
        );
        assert!(matches!(rejected("inform(5)"), ParseErrorKind::InvalidClause { .. }));
    }
}
