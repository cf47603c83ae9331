#![allow(clippy::unwrap_used)]

//! Whole-module parsing through the public parser API.

use crate::helpers::source_fixtures::*;
use bsl::parser::{BslEngine, ParseEngine, SyntaxKind, SyntaxNode, parse};
use rstest::rstest;

fn count(root: &SyntaxNode, kind: SyntaxKind) -> usize {
    root.descendants().filter(|n| n.kind() == kind).count()
}

#[test]
fn test_russian_procedure_module() {
    let parse = parse(PROCEDURE_MODULE);
    assert!(parse.ok(), "errors: {:?}", parse.errors);

    let root = parse.syntax();
    assert_eq!(root.text().to_string(), PROCEDURE_MODULE);
    assert_eq!(count(&root, SyntaxKind::PROCEDURE_DEF), 1);
    assert_eq!(count(&root, SyntaxKind::PARAM), 2);
    assert_eq!(count(&root, SyntaxKind::FOR_EACH_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::ASSIGNMENT_STMT), 3);
}

#[test]
fn test_english_module() {
    let parse = parse(ENGLISH_MODULE);
    assert!(parse.ok(), "errors: {:?}", parse.errors);

    let root = parse.syntax();
    assert_eq!(count(&root, SyntaxKind::IF_STMT), 1);
    assert_eq!(count(&root, SyntaxKind::ELSIF_CLAUSE), 1);
    assert_eq!(count(&root, SyntaxKind::UNARY_EXPR), 1);
}

#[rstest]
#[case("ЕСЛИ а ТОГДА КОНЕЦЕСЛИ;")]
#[case("если а тогда конецесли;")]
#[case("if а then endif;")]
#[case("If а Then EndIf;")]
fn test_keywords_ignore_case_and_language(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{source}: {:?}", parse.errors);
    assert_eq!(count(&parse.syntax(), SyntaxKind::IF_STMT), 1);
}

#[test]
fn test_recovery_keeps_later_statements() {
    let parse = parse("x = ;\n)));\ny = Pet.id;");
    assert!(!parse.ok());
    let root = parse.syntax();
    assert!(
        root.descendants()
            .any(|n| n.kind() == SyntaxKind::ASSIGNMENT_STMT && n.text().to_string() == "y = Pet.id;")
    );
}

#[test]
fn test_engine_parse_matches_free_function() {
    let engine = BslEngine::new();
    let a = engine.parse(PROCEDURE_MODULE);
    let b = parse(PROCEDURE_MODULE);
    assert_eq!(a.green, b.green);
}
