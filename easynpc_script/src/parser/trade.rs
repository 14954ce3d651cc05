//! Trade lists, single traded items and trader messages.

use easynpc_data::{ComplexTradeItem, ItemRef, NpcDataItem, TradeEntry, TradeMessageKind, TradeMode};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::helpers::{field_int, field_text, localized_pair, resolve, resolve_item};
use super::statement::{Field, Shape, Statement};
use super::{Issue, LineScope};
use crate::error::ParseErrorKind;

/// Keywords of trade statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum TradeKey {
    SellItems,
    BuyPrimaryItems,
    BuySecondaryItems,
    SellItem,
    BuyPrimaryItem,
    BuySecondaryItem,
    TradeNotEnoughMoneyMsg,
    TradeFinishedMsg,
    TradeFinishedWithoutTradingMsg,
    TradeWrongItemMsg,
}

enum TradeShape {
    List(TradeMode),
    Single(TradeMode),
    Message(TradeMessageKind),
}

impl TradeKey {
    fn shape(self) -> TradeShape {
        match self {
            TradeKey::SellItems => TradeShape::List(TradeMode::Sell),
            TradeKey::BuyPrimaryItems => TradeShape::List(TradeMode::BuyPrimary),
            TradeKey::BuySecondaryItems => TradeShape::List(TradeMode::BuySecondary),
            TradeKey::SellItem => TradeShape::Single(TradeMode::Sell),
            TradeKey::BuyPrimaryItem => TradeShape::Single(TradeMode::BuyPrimary),
            TradeKey::BuySecondaryItem => TradeShape::Single(TradeMode::BuySecondary),
            TradeKey::TradeNotEnoughMoneyMsg => TradeShape::Message(TradeMessageKind::NotEnoughMoney),
            TradeKey::TradeFinishedMsg => TradeShape::Message(TradeMessageKind::Finished),
            TradeKey::TradeFinishedWithoutTradingMsg => TradeShape::Message(TradeMessageKind::FinishedWithoutTrading),
            TradeKey::TradeWrongItemMsg => TradeShape::Message(TradeMessageKind::WrongItem),
        }
    }
}

/// Properties of a single traded item: `price(10)`, `de("Apfel")`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum TradeProperty {
    De,
    Us,
    Price,
    Stack,
    Quality,
    Data,
}

const LIST: &str = "a list of item ids";
const SINGLE: &str = "`id, de(\"..\"), us(\"..\"), price(n), stack(n), quality(n), data(\"key\", \"value\")`";
const MESSAGE: &str = "a German and an English text";

pub(super) fn parse(key: TradeKey, scope: &mut LineScope<'_, '_>) -> Option<NpcDataItem> {
    let expected = match key.shape() {
        TradeShape::List(_) => LIST,
        TradeShape::Single(_) => SINGLE,
        TradeShape::Message(_) => MESSAGE,
    };
    let stmt = scope.accept(Statement::parse(scope.line(), scope.keyword(), expected))?;
    let entry = match key.shape() {
        TradeShape::List(mode) => item_list(mode, &stmt, scope)?,
        TradeShape::Single(mode) => TradeEntry::Complex(single_item(mode, &stmt, scope)?),
        TradeShape::Message(kind) => {
            let text = localized_pair(&stmt, MESSAGE, scope)?;
            TradeEntry::Message { kind, text }
        },
    };
    Some(NpcDataItem::Trade(entry))
}

/// `sellItems = 1, 2, 3`. One bad id drops the whole list, but every bad id
/// is reported.
fn item_list(mode: TradeMode, stmt: &Statement<'_>, scope: &mut LineScope<'_, '_>) -> Option<TradeEntry> {
    let cx = scope.cx();
    let text = scope.line().text;
    let mut items = Vec::with_capacity(stmt.fields.len());
    let mut ok = true;
    for field in &stmt.fields {
        let resolved = match field.shape {
            Shape::Number => resolve_item(cx, field.text, field.column, text),
            _ => Err(stmt.malformed(field.column, LIST)),
        };
        match resolved {
            Ok(item) => items.push(item),
            Err(issue) => {
                scope.report(issue);
                ok = false;
            },
        }
    }
    ok.then_some(TradeEntry::Simple { mode, items })
}

fn single_item(mode: TradeMode, stmt: &Statement<'_>, scope: &mut LineScope<'_, '_>) -> Option<ComplexTradeItem> {
    let (first, properties) = match stmt.fields.split_first() {
        Some(split) => split,
        None => {
            scope.report(stmt.malformed(1, SINGLE));
            return None;
        },
    };
    let item = match first.shape {
        Shape::Number => resolve_item(scope.cx(), first.text, first.column, scope.line().text),
        _ => Err(stmt.malformed(first.column, SINGLE)),
    };
    let item = scope.accept(item);
    let mut ok = item.is_some();
    let placeholder = || ItemRef {
        id: 0,
        name: String::new(),
    };
    let mut entry = ComplexTradeItem::new(mode, item.unwrap_or_else(placeholder));
    for field in properties {
        if let Err(issue) = apply_property(&mut entry, field, stmt) {
            scope.report(issue);
            ok = false;
        }
    }
    ok.then_some(entry)
}

fn apply_property(entry: &mut ComplexTradeItem, field: &Field<'_>, stmt: &Statement<'_>) -> Result<(), Issue> {
    let Shape::Call { name, args } = &field.shape else {
        return Err(stmt.malformed(field.column, SINGLE));
    };
    let property = resolve::<TradeProperty>(name, "trade item property", field.column)?;
    let arity = if property == TradeProperty::Data { 2 } else { 1 };
    if args.len() != arity {
        return Err(Issue::at(
            field.column,
            ParseErrorKind::MalformedStatement {
                keyword: name.to_string(),
                expected: if arity == 2 { "a key and a value" } else { "a single value" },
            },
        ));
    }
    let arg = &args[0];
    match property {
        TradeProperty::De => entry.german_name = Some(field_text(arg, name, "a quoted name")?),
        TradeProperty::Us => entry.english_name = Some(field_text(arg, name, "a quoted name")?),
        TradeProperty::Price => entry.price = Some(field_int(arg, "price", 9, 0, 999_999_999)? as u32),
        TradeProperty::Stack => entry.stack_size = Some(field_int(arg, "stack size", 4, 1, 1000)? as u16),
        TradeProperty::Quality => entry.quality = Some(field_int(arg, "quality", 3, 0, 999)? as u16),
        TradeProperty::Data => {
            let key = field_text(arg, name, "a quoted key")?;
            let value = field_text(&args[1], name, "a quoted value")?;
            entry.data.push((key, value));
        },
    }
    Ok(())
}
