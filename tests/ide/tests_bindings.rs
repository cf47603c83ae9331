#![allow(clippy::unwrap_used)]

//! Binding lookup against real parse trees.

use bsl::TextSize;
use bsl::ide::{find_all_bindings, find_nearest_binding};
use bsl::parser::parse;
use bsl::syntax::NamedNode;
use rstest::rstest;

use crate::helpers::editor::attached_service;

const SOURCE: &str = "x = 1;\nДля Каждого x Из Список Цикл\n    y = x;\nКонецЦикла;\nX = 3;\n";

fn offset(needle: &str) -> TextSize {
    TextSize::new(SOURCE.find(needle).unwrap() as u32)
}

#[test]
fn test_all_bindings_in_document_order() {
    let tree = parse(SOURCE);
    let root = NamedNode::root(&tree);
    let bindings = find_all_bindings(&root, SOURCE, "x");

    assert_eq!(bindings.len(), 3);
    assert!(
        bindings
            .windows(2)
            .all(|pair| pair[0].statement_range.start() < pair[1].statement_range.start())
    );
    assert_eq!(
        bindings.iter().map(|b| b.is_loop).collect::<Vec<_>>(),
        vec![false, true, false]
    );
}

#[test]
fn test_names_match_ignoring_case() {
    let tree = parse(SOURCE);
    let root = NamedNode::root(&tree);
    assert_eq!(find_all_bindings(&root, SOURCE, "X").len(), 3);
    assert_eq!(find_all_bindings(&root, SOURCE, "y").len(), 1);
    assert!(find_all_bindings(&root, SOURCE, "z").is_empty());
}

#[test]
fn test_nearest_binding_windows() {
    let tree = parse(SOURCE);
    let root = NamedNode::root(&tree);

    // Inside the loop body the loop variable wins over `x = 1;`
    let inside = find_nearest_binding(&root, SOURCE, "x", offset("y = x")).unwrap();
    assert!(inside.is_loop);

    // In the middle of `x = 1;` nothing is bound yet
    assert!(find_nearest_binding(&root, SOURCE, "x", TextSize::new(3)).is_none());

    // After the loop its window is closed, so the plain assignment is back
    let after = find_nearest_binding(&root, SOURCE, "x", offset("X = 3")).unwrap();
    assert!(!after.is_loop);
    assert_eq!(after.statement_range.start(), TextSize::new(0));

    // At the very end the last assignment wins
    let end = TextSize::new(SOURCE.len() as u32);
    let last = find_nearest_binding(&root, SOURCE, "x", end).unwrap();
    assert_eq!(last.statement_range.start(), offset("X = 3"));
}

#[test]
fn test_binding_ranges_are_tight() {
    let tree = parse(SOURCE);
    let root = NamedNode::root(&tree);
    let bindings = find_all_bindings(&root, SOURCE, "y");
    let binding = &bindings[0];

    let slice = |r: bsl::TextRange| &SOURCE[usize::from(r.start())..usize::from(r.end())];
    assert_eq!(slice(binding.statement_range), "y = x;");
    assert_eq!(slice(binding.variable_range), "y");
    assert_eq!(slice(binding.expression_range.unwrap()), "x");
}

const NESTED_LOOPS: &str = "\
Для Каждого x Из Внешний Цикл
    Для Каждого x Из x.Дети Цикл
        y = x;
    КонецЦикла;
    z = x;
КонецЦикла;
";

#[rstest]
#[case::inner_body("y = x", "Для Каждого x Из x.Дети")]
#[case::outer_body_after_inner("z = x", "Для Каждого x Из Внешний")]
fn test_innermost_enclosing_loop_wins(#[case] at: &str, #[case] expected_start: &str) {
    let tree = parse(NESTED_LOOPS);
    let root = NamedNode::root(&tree);
    let offset = TextSize::new(NESTED_LOOPS.find(at).unwrap() as u32);

    let binding = find_nearest_binding(&root, NESTED_LOOPS, "x", offset).unwrap();
    assert!(binding.is_loop);
    assert_eq!(
        binding.statement_range.start(),
        TextSize::new(NESTED_LOOPS.find(expected_start).unwrap() as u32)
    );
}

#[rstest]
#[case::inner_body("y = x", "x", &["дети", "[]"])]
#[case::outer_body_after_inner("z = x", "внешний", &["[]"])]
fn test_nested_loop_types(#[case] at: &str, #[case] base: &str, #[case] chain: &[&str]) {
    let (service, _editor) = attached_service(NESTED_LOOPS);
    let offset = TextSize::new(NESTED_LOOPS.find(at).unwrap() as u32);
    assert_eq!(
        service.infer_type("x", offset).unwrap(),
        bsl::ChainDescriptor::with_chain(base, chain.iter().copied())
    );
}
