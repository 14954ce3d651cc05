use easynpc_data::{EquipmentSlot, NpcDataItem};

use super::LineScope;
use super::helpers::{field_int, resolve_item};
use super::statement::Statement;

const EXPECTED: &str = "a single item id, 0 for an empty slot";

/// `itemHead = 42`. Id 0 leaves the slot empty.
pub(super) fn parse(slot: EquipmentSlot, scope: &mut LineScope<'_, '_>) -> Option<NpcDataItem> {
    let line = scope.line();
    let stmt = scope.accept(Statement::parse(line, scope.keyword(), EXPECTED))?;
    let fields = scope.accept(stmt.expect_fields(1, EXPECTED))?;
    let field = &fields[0];
    let id = scope.accept(field_int(field, "item id", 4, 0, 9999))?;
    if id == 0 {
        return Some(NpcDataItem::Equipment { slot, item: None });
    }
    let item = scope.accept(resolve_item(scope.cx(), field.text, field.column, line.text))?;
    Some(NpcDataItem::Equipment {
        slot,
        item: Some(item),
    })
}
