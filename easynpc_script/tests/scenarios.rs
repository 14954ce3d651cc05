use easynpc_data::{
    AdvancedNumber, CharacterAttribute, CompareOperator, Condition, Consequence, GuardField, IdentityField, Item,
    ItemCatalog, NpcDataItem, Skill, SkillCatalog, Token,
};
use easynpc_script::{ParseContext, ParseErrorKind, ParsedNpc, can_parse_line, parse_script};

fn catalogs() -> (ItemCatalog, SkillCatalog) {
    let items = ItemCatalog::new([
        Item {
            id: 15,
            name: "apple".into(),
        },
        Item {
            id: 23,
            name: "hammer".into(),
        },
    ]);
    let skills = SkillCatalog::new([Skill {
        name: "mining".into(),
        group: None,
    }]);
    (items, skills)
}

fn run(source: &str) -> ParsedNpc {
    let (items, skills) = catalogs();
    parse_script(source, &ParseContext::new(&items, &skills))
}

#[test]
fn name_becomes_an_identity_item() {
    let doc = run("name = \"Guard Bob\"");
    assert!(doc.errors().is_empty());
    assert_eq!(
        doc.data_items().collect::<Vec<_>>(),
        vec![&NpcDataItem::Identity(IdentityField::Name("Guard Bob".into()))]
    );
}

#[test]
fn hair_color_out_of_range_is_one_error() {
    let doc = run("colorHair = 999, 0, 0");
    assert_eq!(doc.data_entries().len(), 0);
    assert_eq!(doc.errors().len(), 1);
    assert!(matches!(doc.errors()[0].kind, ParseErrorKind::ValueOutOfRange { .. }));
    assert!(doc.errors()[0].message.contains("red"));
}

#[test]
fn unknown_equipment_item_names_id_and_text() {
    let doc = run("itemHead = 42");
    assert_eq!(doc.data_entries().len(), 0);
    assert_eq!(
        doc.errors().iter().map(|e| e.kind.clone()).collect::<Vec<_>>(),
        vec![ParseErrorKind::UnknownItem {
            id: 42,
            text: "itemHead = 42".into()
        }]
    );
}

#[test]
fn dialogue_after_arrow_compare_is_a_condition() {
    let doc = run(r#""hello" -> attrib(strength > 10) inform("hi")"#);
    assert!(doc.errors().is_empty(), "{:?}", doc.errors());
    let lines: Vec<_> = doc.dialogue_lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].trigger, "hello");
    assert_eq!(
        lines[0].conditions,
        vec![Condition::Attribute {
            attribute: CharacterAttribute::Strength,
            op: CompareOperator::Greater,
            value: AdvancedNumber::Literal(10),
        }]
    );
    assert_eq!(lines[0].consequences, vec![Consequence::Inform("hi".into())]);
}

#[test]
fn guard_range_on_all_sides() {
    let doc = run("guardRange = 5, 5, 5, 5");
    assert_eq!(
        doc.data_items().next(),
        Some(&NpcDataItem::Guard(GuardField::Range {
            north: 5,
            south: 5,
            west: 5,
            east: 5,
        }))
    );
}

#[test]
fn empty_and_comment_lines_are_kept_in_place() {
    let doc = run("name = \"A\"\n\n-- note\nrace = elf");
    assert!(doc.errors().is_empty());
    let entries: Vec<_> = doc.data_entries().iter().map(|e| (e.line, e.item.clone())).collect();
    assert_eq!(entries[1], (2, NpcDataItem::EmptyLine));
    assert_eq!(entries[2], (3, NpcDataItem::Comment("note".into())));
    assert_eq!(entries.len(), 4);
}

const MIXED: &str = r#"name = "Mixed"
race = centaur
colorSkin = 1, 2
what is this
itemCoat = 23
"x", skill(juggling) > 5 -> "no"
sellItems = 15, 99
-- end"#;

#[test]
fn every_line_yields_an_item_or_an_error() {
    let doc = run(MIXED);
    for number in 1..=MIXED.lines().count() {
        let has_item = doc.data_entries().iter().any(|e| e.line == number);
        let has_error = doc.errors().iter().any(|e| e.line == number);
        assert!(has_item || has_error, "line {number} vanished");
    }
}

#[test]
fn parsing_is_repeatable() {
    assert_eq!(run(MIXED), run(MIXED));
}

#[test]
fn a_bad_line_does_not_disturb_its_neighbours() {
    let clean = run("name = \"Bob\"\nrace = elf\nhairID = 3");
    let dirty = run("name = \"Bob\"\nrace = elf\ncolorHair = 1,\nhairID = 3");
    let items = |doc: &ParsedNpc| doc.data_items().cloned().collect::<Vec<_>>();
    assert_eq!(items(&clean), items(&dirty));
    assert_eq!(dirty.errors().len(), 1);
    assert_eq!(dirty.errors()[0].line, 3);
}

#[test]
fn errors_render_with_line_and_column() {
    let doc = run("name = \"Bob\"\nrace = centaur");
    let rendered = doc.errors()[0].to_string();
    assert!(rendered.starts_with("2:8: "), "{rendered}");
}

#[test]
fn redefined_single_fields_overwrite_in_place() {
    let doc = run("name = \"Bob\"\nrace = elf\nname = \"Rob\"");
    let items: Vec<_> = doc.data_items().cloned().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], NpcDataItem::Identity(IdentityField::Name("Rob".into())));
    assert_eq!(doc.name(), Some("Rob"));
}

#[test]
fn every_vocabulary_token_is_accepted_back() {
    for race in easynpc_data::Race::vocabulary().split(", ") {
        let doc = run(&format!("race = {race}"));
        assert!(doc.errors().is_empty(), "{race}: {:?}", doc.errors());
    }
    for slot in easynpc_data::EquipmentSlot::vocabulary().split(", ") {
        let line = format!("item{}{} = 0", slot[..1].to_ascii_uppercase(), &slot[1..]);
        assert!(can_parse_line(&line), "{line}");
        assert!(run(&line).errors().is_empty(), "{line}");
    }
}

#[test]
fn highlighting_query_agrees_with_the_parser() {
    assert!(can_parse_line("guardRange = 1, 1, 1, 1"));
    assert!(can_parse_line("-- comment"));
    assert!(can_parse_line(""));
    assert!(!can_parse_line("what is this"));
}

#[test]
fn escaped_quotes_in_bilingual_texts_are_stored_with_a_warning() {
    for source in [
        r#"tradeFinishedMsg = "a \"b\"", "c""#,
        r#"hitPlayerMsg = "a", "b \"c\"""#,
        r#"cycletext "a \"b\"", "c""#,
    ] {
        let doc = run(source);
        assert_eq!(doc.data_entries().len(), 1, "{source}");
        assert_eq!(doc.errors().len(), 1, "{source}");
        assert!(doc.errors()[0].is_warning(), "{source}");
        assert!(matches!(doc.errors()[0].kind, ParseErrorKind::SuspiciousQuote { .. }));
    }
}

#[test]
fn a_stray_carriage_return_at_the_end_is_ignored() {
    let doc = run("race = elf\nname = \"Bob\"\r");
    assert!(doc.errors().is_empty(), "{:?}", doc.errors());
    assert_eq!(doc.name(), Some("Bob"));

    let doc = run("\"hi\" -> \"hello\"\r");
    assert!(doc.errors().is_empty(), "{:?}", doc.errors());
}
