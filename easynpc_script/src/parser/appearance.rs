use easynpc_data::{AppearanceField, Color, NpcDataItem};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::helpers::field_u8;
use super::statement::{Field, Statement};
use super::{Issue, LineScope};

/// Keywords of appearance statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum AppearanceKey {
    #[strum(serialize = "hairID")]
    HairId,
    #[strum(serialize = "beardID")]
    BeardId,
    #[strum(serialize = "colorHair")]
    ColorHair,
    #[strum(serialize = "colorSkin")]
    ColorSkin,
}

pub(super) fn parse(key: AppearanceKey, scope: &mut LineScope<'_, '_>) -> Option<NpcDataItem> {
    let expected = match key {
        AppearanceKey::HairId | AppearanceKey::BeardId => "a single id from 0 to 255",
        AppearanceKey::ColorHair | AppearanceKey::ColorSkin => "`red, green, blue`",
    };
    let stmt = scope.accept(Statement::parse(scope.line(), scope.keyword(), expected))?;
    let field = match key {
        AppearanceKey::HairId => {
            let fields = scope.accept(stmt.expect_fields(1, expected))?;
            AppearanceField::HairId(scope.accept(field_u8(&fields[0], "hair id"))?)
        },
        AppearanceKey::BeardId => {
            let fields = scope.accept(stmt.expect_fields(1, expected))?;
            AppearanceField::BeardId(scope.accept(field_u8(&fields[0], "beard id"))?)
        },
        AppearanceKey::ColorHair => {
            let fields = scope.accept(stmt.expect_fields(3, expected))?;
            AppearanceField::HairColor(color(fields, ColorNames::HAIR, scope)?)
        },
        AppearanceKey::ColorSkin => {
            let fields = scope.accept(stmt.expect_fields(3, expected))?;
            AppearanceField::SkinColor(color(fields, ColorNames::SKIN, scope)?)
        },
    };
    Some(NpcDataItem::Appearance(field))
}

struct ColorNames([&'static str; 3]);

impl ColorNames {
    const HAIR: ColorNames = ColorNames([
        "hair color red component",
        "hair color green component",
        "hair color blue component",
    ]);
    const SKIN: ColorNames = ColorNames([
        "skin color red component",
        "skin color green component",
        "skin color blue component",
    ]);
}

/// Every component is checked so that all bad components get reported.
fn color(fields: &[Field<'_>], names: ColorNames, scope: &mut LineScope<'_, '_>) -> Option<Color> {
    let components: Vec<Result<u8, Issue>> = fields.iter().zip(names.0).map(|(f, name)| field_u8(f, name)).collect();
    let mut values = [0u8; 3];
    let mut ok = true;
    for (slot, component) in values.iter_mut().zip(components) {
        match component {
            Ok(value) => *slot = value,
            Err(issue) => {
                scope.report(issue);
                ok = false;
            },
        }
    }
    let [red, green, blue] = values;
    ok.then_some(Color { red, green, blue })
}

#[cfg(test)]
mod tests {
    use easynpc_data::{ItemCatalog, SkillCatalog};

    use super::*;
    use crate::error::ParseErrorKind;
    use crate::{ParseContext, ParsedNpc, parse_script};

    fn run(source: &str) -> ParsedNpc {
        let items = ItemCatalog::default();
        let skills = SkillCatalog::default();
        parse_script(source, &ParseContext::new(&items, &skills))
    }

    #[test]
    fn hair_and_beard_ids() {
        let doc = run("hairID = 3\nbeardid = 0");
        assert!(doc.errors().is_empty());
        let items: Vec<_> = doc.data_items().cloned().collect();
        assert_eq!(
            items,
            vec![
                NpcDataItem::Appearance(AppearanceField::HairId(3)),
                NpcDataItem::Appearance(AppearanceField::BeardId(0)),
            ]
        );
    }

    #[test]
    fn colors_keep_component_order() {
        let doc = run("colorSkin = 245, 180, 137");
        assert_eq!(
            doc.data_items().next(),
            Some(&NpcDataItem::Appearance(AppearanceField::SkinColor(Color {
                red: 245,
                green: 180,
                blue: 137
            })))
        );
    }

    #[test]
    fn out_of_range_component_drops_the_statement() {
        let doc = run("colorHair = 999, 0, 0");
        assert_eq!(doc.data_entries().len(), 0);
        assert_eq!(doc.errors().len(), 1);
        match &doc.errors()[0].kind {
            ParseErrorKind::ValueOutOfRange { field, value, .. } => {
                assert_eq!(*field, "hair color red component");
                assert_eq!(value, "999");
            },
            other => panic!("expected a range error, got {other:?}"),
        }
        assert_eq!(doc.errors()[0].column, Some(13));
    }

    #[test]
    fn every_bad_component_is_reported() {
        let doc = run("colorSkin = 256, 12, 300");
        assert_eq!(doc.data_entries().len(), 0);
        assert_eq!(doc.errors().len(), 2);
    }

    #[test]
    fn ids_wider_than_three_digits_are_malformed() {
        let doc = run("hairID = 0003");
        assert!(matches!(doc.errors()[0].kind, ParseErrorKind::MalformedNumber { .. }));
    }

    #[test]
    fn missing_component_is_a_shape_error() {
        let doc = run("colorHair = 1, 2");
        assert!(matches!(doc.errors()[0].kind, ParseErrorKind::MalformedStatement { .. }));
    }
}
