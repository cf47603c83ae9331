#![allow(clippy::unwrap_used)]

//! AstService lifecycle, degradation and schema autocomplete.

use crate::helpers::editor::{TestEditor, attached_service, offset_after};
use crate::helpers::source_fixtures::{PETSTORE_SCHEMA, PROCEDURE_MODULE};
use bsl::ide::{AstService, EditorHandle, LogLevel, LogTag, ServiceConfig, SubscriptionId};
use bsl::parser::parse;
use bsl::{AstError, LineCol, TextEdit, TextSize};

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn test_detach_and_reattach_leaves_one_subscription() {
    let (mut service, editor) = attached_service("x = 1;");
    assert_eq!(editor.active_subscriptions(), vec![SubscriptionId(1)]);

    service.detach();
    assert!(editor.active_subscriptions().is_empty());
    assert!(service.tree().is_none());

    service.attach(Box::new(editor.clone()));
    service.attach(Box::new(editor.clone()));
    assert_eq!(editor.active_subscriptions(), vec![SubscriptionId(3)]);
}

#[test]
fn test_switching_editors() {
    let (mut service, first) = attached_service("a = 1;");
    let second = TestEditor::new("b = Pet.id;");
    service.attach(Box::new(second.clone()));

    assert!(first.active_subscriptions().is_empty());
    assert_eq!(second.active_subscriptions().len(), 1);
    assert_eq!(service.text(), Some("b = Pet.id;"));
}

#[test]
fn test_edits_keep_text_and_tree_in_step() {
    let (mut service, editor) = attached_service(PROCEDURE_MODULE);

    let at = PROCEDURE_MODULE.find("category").unwrap() as u32;
    editor.edit(&mut service, TextEdit::new(at, "category".len() as u32, "tags"));
    let at = service.text().unwrap().find("КонецПроцедуры").unwrap() as u32;
    editor.edit(&mut service, TextEdit::insert(at, "    Ещё = Категория;\n"));

    let text = editor.current_text();
    assert_eq!(service.text(), Some(text.as_str()));
    assert_eq!(service.parse().unwrap(), &parse(&text));

    let end = offset_after(&text, "Ещё = Категория;");
    assert_eq!(
        service.infer_type("Категория", end).unwrap(),
        bsl::ChainDescriptor::with_chain("pet", ["tags"])
    );
}

#[test]
fn test_incremental_and_full_services_agree() {
    let full_config = ServiceConfig {
        incremental: false,
        ..ServiceConfig::default()
    };
    let (mut incremental, inc_editor) = attached_service("Значение = 10;\nИтог = Значение + 1;");
    let full_editor = TestEditor::new("Значение = 10;\nИтог = Значение + 1;");
    let mut full = AstService::new(full_config);
    full.attach(Box::new(full_editor.clone()));

    // "10" -> "105"
    let edit = TextEdit::insert("Значение = 10".len() as u32, "5");
    inc_editor.edit(&mut incremental, edit.clone());
    full_editor.edit(&mut full, edit);

    assert_eq!(incremental.parse(), full.parse());
    assert_eq!(incremental.export_tokens(), full.export_tokens());
}

#[test]
fn test_force_reparse_picks_up_silent_changes() {
    let (mut service, editor) = attached_service("x = 1;");
    editor.0.borrow_mut().text = "y = Pet;".to_string();
    service.force_reparse();
    assert_eq!(service.text(), Some("y = Pet;"));
    assert!(service.infer_type("y", TextSize::new(8)).is_some());
}

// =============================================================================
// DEGRADATION
// =============================================================================

#[test]
fn test_queries_before_attach() {
    let service = AstService::default();
    assert!(service.infer_type("x", TextSize::new(0)).is_none());
    assert!(service.export_tokens().is_none());
    assert!(service.find_nearest_binding("x", TextSize::new(0)).is_none());
    assert!(service.position_to_offset(LineCol::new(1, 1)).is_none());
}

#[test]
fn test_missing_engine_is_logged() {
    let config = ServiceConfig::from_json(r#"{"debug": true}"#).unwrap();
    let mut service = AstService::with_engine(config, None);
    service.attach(Box::new(TestEditor::new("x = Pet;")));

    assert!(service.tree().is_none());
    assert!(service.infer_type("x", TextSize::new(8)).is_none());
    assert_eq!(service.export_tokens_json(), "");

    let entries = service.debug_log().entries();
    assert!(entries.iter().all(|e| e.tag == LogTag::Ast));
    assert!(
        entries
            .iter()
            .any(|e| e.level == LogLevel::Warn && e.message == AstError::EngineUnavailable.to_string())
    );
}

#[test]
fn test_debug_log_is_off_by_default() {
    let (service, _editor) = attached_service("x = Pet;");
    service.infer_type("x", TextSize::new(8));
    assert!(service.debug_log().entries().is_empty());

    service.set_debug(true);
    service.infer_type("x", TextSize::new(8));
    let entries = service.debug_log().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].method, "infer_type");
}

#[test]
fn test_position_to_offset_uses_snapshot() {
    let (service, _editor) = attached_service("а = 1;\nб = 2;");
    // "а = 1;" is 7 bytes, so line 2 starts at 8
    assert_eq!(service.position_to_offset(LineCol::new(2, 1)), Some(TextSize::new(8)));
    assert_eq!(service.position_to_offset(LineCol::new(2, 3)), Some(TextSize::new(11)));
}

// =============================================================================
// SCHEMA AUTOCOMPLETE
// =============================================================================

#[test]
fn test_schema_properties_follow_inferred_type() {
    let (mut service, _editor) = attached_service(PROCEDURE_MODULE);
    let types = service.schemas_mut().load_schema_file(PETSTORE_SCHEMA);
    assert_eq!(types, vec!["Pet", "Category", "Tag"]);

    let in_loop = offset_after(PROCEDURE_MODULE, "Метка");
    assert_eq!(service.schema_properties("Тег", in_loop), vec!["label"]);

    let end = offset_after(PROCEDURE_MODULE, "Данные[0];");
    assert_eq!(service.schema_properties("Категория", end), vec!["id", "name"]);
    assert!(service.schema_properties("Первый", end).is_empty());
}

#[test]
fn test_annotated_variable_uses_named_type() {
    let source = "// @schema Category\nx = ЗагрузитьИзСервиса();\n";
    let (mut service, _editor) = attached_service(source);
    service.schemas_mut().load_schema_file(PETSTORE_SCHEMA);

    let end = offset_after(source, "();");
    assert_eq!(service.schema_properties("x", end), vec!["id", "name"]);
}

#[test]
fn test_schema_errors_are_descriptions() {
    let (mut service, _editor) = attached_service("");
    let err = service
        .schemas_mut()
        .set_variable_schema("Pet", PETSTORE_SCHEMA, "Owner")
        .unwrap_err();
    assert_eq!(err.error_description, r#"type "Owner" is not defined in the schema"#);
    assert!(service.schemas().is_empty());
}
