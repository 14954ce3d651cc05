use easynpc_data::NpcDataItem;

use super::LineScope;
use super::helpers::localized_pair;
use super::statement::Statement;

const EXPECTED: &str = "a German and an English text";

/// `cycletext "Hallo!", "Hello!"`
pub(super) fn parse(scope: &mut LineScope<'_, '_>) -> Option<NpcDataItem> {
    let stmt = scope.accept(Statement::parse(scope.line(), scope.keyword(), EXPECTED))?;
    localized_pair(&stmt, EXPECTED, scope).map(NpcDataItem::CycleText)
}
