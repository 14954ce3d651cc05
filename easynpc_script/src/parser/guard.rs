use easynpc_data::{GuardField, GuardTextKind, NpcDataItem};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::LineScope;
use super::helpers::{field_u8, localized_pair, position};
use super::statement::Statement;

/// Keywords of guard statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum GuardKey {
    GuardRange,
    GuardWarpTarget,
    WarpedMonsterMsg,
    WarpedPlayerMsg,
    HitPlayerMsg,
}

const RANGE: &str = "`north, south, west, east`";
const TARGET: &str = "`x, y, z`";
const TEXT: &str = "a German and an English text";

pub(super) fn parse(key: GuardKey, scope: &mut LineScope<'_, '_>) -> Option<NpcDataItem> {
    let expected = match key {
        GuardKey::GuardRange => RANGE,
        GuardKey::GuardWarpTarget => TARGET,
        _ => TEXT,
    };
    let stmt = scope.accept(Statement::parse(scope.line(), scope.keyword(), expected))?;
    let field = match key {
        GuardKey::GuardRange => {
            let fields = scope.accept(stmt.expect_fields(4, RANGE))?;
            let mut tiles = [0u8; 4];
            let names = ["guard range north", "guard range south", "guard range west", "guard range east"];
            let mut ok = true;
            for ((slot, field), name) in tiles.iter_mut().zip(fields).zip(names) {
                match scope.accept(field_u8(field, name)) {
                    Some(value) => *slot = value,
                    None => ok = false,
                }
            }
            if !ok {
                return None;
            }
            let [north, south, west, east] = tiles;
            GuardField::Range {
                north,
                south,
                west,
                east,
            }
        },
        GuardKey::GuardWarpTarget => {
            let fields = scope.accept(stmt.expect_fields(3, TARGET))?;
            GuardField::WarpTarget(scope.accept(position(fields))?)
        },
        GuardKey::WarpedMonsterMsg => text(GuardTextKind::WarpedMonster, &stmt, scope)?,
        GuardKey::WarpedPlayerMsg => text(GuardTextKind::WarpedPlayer, &stmt, scope)?,
        GuardKey::HitPlayerMsg => text(GuardTextKind::HitPlayer, &stmt, scope)?,
    };
    Some(NpcDataItem::Guard(field))
}

fn text(kind: GuardTextKind, stmt: &Statement<'_>, scope: &mut LineScope<'_, '_>) -> Option<GuardField> {
    let text = localized_pair(stmt, TEXT, scope)?;
    Some(GuardField::Text { kind, text })
}

#[cfg(test)]
mod tests {
    use easynpc_data::{ItemCatalog, LocalizedText, Position, SkillCatalog};

    use super::*;
    use crate::error::ParseErrorKind;
    use crate::{ParseContext, ParsedNpc, parse_script};

    fn run(source: &str) -> ParsedNpc {
        let items = ItemCatalog::default();
        let skills = SkillCatalog::default();
        parse_script(source, &ParseContext::new(&items, &skills))
    }

    #[test]
    fn range_has_four_sides() {
        let doc = run("guardRange = 5, 5, 5, 5");
        assert!(doc.errors().is_empty());
        assert_eq!(
            doc.data_items().next(),
            Some(&NpcDataItem::Guard(GuardField::Range {
                north: 5,
                south: 5,
                west: 5,
                east: 5
            }))
        );
    }

    #[test]
    fn range_sides_are_bytes() {
        let doc = run("guardRange = 5, 256, 5, -1");
        assert_eq!(doc.data_entries().len(), 0);
        assert_eq!(doc.errors().len(), 2);
        assert!(
            doc.errors()
                .iter()
                .all(|e| matches!(e.kind, ParseErrorKind::ValueOutOfRange { .. }))
        );
    }

    #[test]
    fn warp_target_is_a_position() {
        let doc = run("guardWarpTarget = 100, -20, 1");
        assert_eq!(
            doc.data_items().next(),
            Some(&NpcDataItem::Guard(GuardField::WarpTarget(Position { x: 100, y: -20, z: 1 })))
        );
    }

    #[test]
    fn guard_texts_are_bilingual() {
        let doc = run("hitPlayerMsg = \"Verschwinde!\", \"Get lost!\"");
        assert_eq!(
            doc.data_items().next(),
            Some(&NpcDataItem::Guard(GuardField::Text {
                kind: GuardTextKind::HitPlayer,
                text: LocalizedText::new("Verschwinde!", "Get lost!"),
            }))
        );
    }

    #[test]
    fn guard_text_needs_both_locales() {
        let doc = run("warpedPlayerMsg = \"Raus hier!\"");
        assert!(matches!(doc.errors()[0].kind, ParseErrorKind::MalformedStatement { .. }));
    }
}
