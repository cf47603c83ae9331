#![allow(clippy::unwrap_used)]

//! Type inference through the service, on real BSL sources.

use crate::helpers::editor::{attached_service, offset_after};
use crate::helpers::source_fixtures::PROCEDURE_MODULE;
use bsl::{ChainDescriptor, TextRange, TextSize};
use rstest::rstest;

#[rstest]
#[case(r#"x = Pet.Получить("category");"#, "pet", &["category"])]
#[case(r#"x = Pet.Получить("category").Получить("id");"#, "pet", &["category", "id"])]
#[case(r#"x = Pet.Get("category").get("id");"#, "pet", &["category", "id"])]
#[case(r#"x = Данные["id"];"#, "данные", &["id"])]
#[case("x = Данные[0];", "данные", &["[]"])]
#[case("x = Данные[Индекс];", "данные", &["[]"])]
#[case("x = Pet.Category.Name;", "pet", &["category", "name"])]
#[case("x = (Pet).id;", "pet", &["id"])]
#[case("x = Pet;", "pet", &[])]
#[case("x = Pet.Получить(0);", "pet", &["[]"])]
#[case("x = Pet.Количество();", "pet", &["количество"])]
#[case("x = a Или b.c;", "b", &["c"])]
#[case(r#"x = 1 + Данные["id"];"#, "данные", &["id"])]
fn test_infer_assignment_chains(
    #[case] source: &str,
    #[case] base: &str,
    #[case] chain: &[&str],
) {
    let (service, _editor) = attached_service(source);
    let end = offset_after(source, ";");
    let descriptor = service.infer_type("x", end).unwrap();
    assert_eq!(descriptor, ChainDescriptor::with_chain(base, chain.iter().copied()));
}

#[rstest]
#[case("x = 1;")]
#[case(r#"x = "строка";"#)]
#[case("x = Новый Структура;")]
fn test_unsupported_expressions_have_no_type(#[case] source: &str) {
    let (service, _editor) = attached_service(source);
    assert!(service.infer_type("x", offset_after(source, ";")).is_none());
}

#[test]
fn test_schema_annotation_overrides_expression() {
    let source = "// @schema Order\nx = СложноеВыражение(1, 2).Поле;\n";
    let (service, _editor) = attached_service(source);
    let descriptor = service
        .infer_type("x", offset_after(source, ".Поле;"))
        .unwrap();
    assert_eq!(descriptor, ChainDescriptor::new("order"));
}

#[test]
fn test_schema_annotation_on_same_line() {
    let source = "x = Получить(); // @schema Заказ\n";
    let (service, _editor) = attached_service(source);
    let descriptor = service.infer_type("x", offset_after(source, ";")).unwrap();
    assert_eq!(descriptor, ChainDescriptor::new("заказ"));
}

#[test]
fn test_loop_variable_is_array_element() {
    let (service, _editor) = attached_service(PROCEDURE_MODULE);
    let offset = offset_after(PROCEDURE_MODULE, "Метка");
    let descriptor = service.infer_type("Тег", offset).unwrap();
    assert_eq!(descriptor, ChainDescriptor::with_chain("pet", ["tags", "[]"]));
}

#[test]
fn test_module_bindings() {
    let (service, _editor) = attached_service(PROCEDURE_MODULE);
    let end = offset_after(PROCEDURE_MODULE, "Данные[0];");

    assert_eq!(
        service.infer_type("категория", end).unwrap(),
        ChainDescriptor::with_chain("pet", ["category"])
    );
    assert_eq!(
        service.infer_type("Метка", end).unwrap(),
        ChainDescriptor::with_chain("тег", ["label"])
    );
    assert_eq!(
        service.infer_type("Первый", end).unwrap(),
        ChainDescriptor::with_chain("данные", ["[]"])
    );
}

#[test]
fn test_unbound_before_assignment() {
    let source = "y = 1;\nx = Pet.id;";
    let (service, _editor) = attached_service(source);
    assert!(service.infer_type("x", offset_after(source, "y = 1;")).is_none());
}

#[rstest]
#[case(r#"Pet.Получить("category")"#, "pet", &["category"])]
#[case(r#"Pet.Получить("category").Получить("id")"#, "pet", &["category", "id"])]
#[case("Данные[0].Имя", "данные", &["[]", "имя"])]
fn test_resolve_chain_from_text(
    #[case] fragment: &str,
    #[case] base: &str,
    #[case] chain: &[&str],
) {
    let (service, _editor) = attached_service("");
    let descriptor = service.resolve_chain_from_text(fragment).unwrap();
    assert_eq!(descriptor, ChainDescriptor::with_chain(base, chain.iter().copied()));
}

#[rstest]
#[case("Pet.Получить(")]
#[case("Pet.")]
#[case("")]
fn test_malformed_fragment_has_no_result(#[case] fragment: &str) {
    let (service, _editor) = attached_service("");
    assert!(service.resolve_chain_from_text(fragment).is_none());
}

#[rstest]
#[case(r#"x = Pet.Получить("category").Получить("id");"#, r#"Pet.Получить("category").Получить("id")"#)]
#[case("Для Каждого Тег Из Pet.tags Цикл\nКонецЦикла;", "Pet.tags")]
#[case("x = a Или b.c;", "a Или b.c")]
fn test_resolve_chain_is_repeatable(#[case] source: &str, #[case] expression: &str) {
    let (service, _editor) = attached_service(source);
    let start = source.find(expression).unwrap();
    let range = TextRange::at(
        TextSize::new(start as u32),
        TextSize::new(expression.len() as u32),
    );

    let first = service.resolve_chain(range);
    assert!(first.is_some());
    assert_eq!(service.resolve_chain(range), first);
}

#[rstest]
#[case::parentheses(10_000)]
#[case::at_the_limit(256)]
fn test_deeply_nested_expression_does_not_abort(#[case] depth: usize) {
    let source = format!("x = {}a{};", "(".repeat(depth), ")".repeat(depth));
    let (service, _editor) = attached_service(&source);
    let end = TextSize::new(source.len() as u32);
    assert!(service.infer_type("x", end).is_none());
    assert!(service.export_tokens().is_some());
}

#[test]
fn test_moderately_nested_expression_resolves() {
    let source = format!("x = {}Pet.id{};", "(".repeat(100), ")".repeat(100));
    let (service, _editor) = attached_service(&source);
    let end = TextSize::new(source.len() as u32);
    assert_eq!(
        service.infer_type("x", end).unwrap(),
        ChainDescriptor::with_chain("pet", ["id"])
    );
}

#[rstest]
#[case::inside_body(
    "Для Каждого Тег Из Pet.tags Цикл\n    // @schema Order\n    Метка = Тег.label;\nКонецЦикла;",
    "pet",
    &["tags", "[]"]
)]
#[case::on_header(
    "Для Каждого Тег Из Pet.tags Цикл // @schema Tag\n    Метка = Тег.label;\nКонецЦикла;",
    "tag",
    &[]
)]
#[case::above_header(
    "// @schema Tag\nДля Каждого Тег Из Pet.tags Цикл\n    Метка = Тег.label;\nКонецЦикла;",
    "tag",
    &[]
)]
fn test_loop_annotation_only_counts_on_header(
    #[case] source: &str,
    #[case] base: &str,
    #[case] chain: &[&str],
) {
    let (service, _editor) = attached_service(source);
    let offset = offset_after(source, "Метка");
    let descriptor = service.infer_type("Тег", offset).unwrap();
    assert_eq!(descriptor, ChainDescriptor::with_chain(base, chain.iter().copied()));
}
