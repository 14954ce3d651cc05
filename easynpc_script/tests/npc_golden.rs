use easynpc_data::NpcDataItem;
use easynpc_script::{ParseContext, ParsedNpc, parse_item_catalog, parse_script, parse_skill_catalog};

fn parse_guard_bob(source: &str) -> ParsedNpc {
    let items = parse_item_catalog(include_str!("fixtures/items.toml")).expect("item catalog");
    let skills = parse_skill_catalog(include_str!("fixtures/skills.toml")).expect("skill catalog");
    parse_script(source, &ParseContext::new(&items, &skills))
}

#[test]
fn guard_bob_golden() {
    let doc = parse_guard_bob(include_str!("fixtures/guard_bob.npc"));
    assert!(doc.errors().is_empty(), "unexpected errors: {:#?}", doc.errors());

    let actual: Vec<NpcDataItem> = doc.data_items().cloned().collect();
    let expected: Vec<NpcDataItem> = ron::from_str(include_str!("fixtures/guard_bob.ron")).expect("parse expected");
    assert_eq!(actual, expected);
}

#[test]
fn guard_bob_keeps_line_numbers() {
    let source = include_str!("fixtures/guard_bob.npc");
    let doc = parse_guard_bob(source);
    let lines: Vec<usize> = doc.data_entries().iter().map(|entry| entry.line).collect();
    let expected: Vec<usize> = (1..=source.lines().count()).collect();
    assert_eq!(lines, expected);
}

#[test]
fn guard_bob_dump_survives_ron() {
    let doc = parse_guard_bob(include_str!("fixtures/guard_bob.npc"));
    let items: Vec<NpcDataItem> = doc.data_items().cloned().collect();
    let text = ron::ser::to_string_pretty(&items, ron::ser::PrettyConfig::default()).expect("serialize");
    let back: Vec<NpcDataItem> = ron::from_str(&text).expect("deserialize");
    assert_eq!(back, items);
}
