#![allow(clippy::unwrap_used)]

//! Token export as the compiler bridge receives it.

use crate::helpers::editor::attached_service;
use bsl::ide::{EOF_TERMINAL, Token};

fn tok(terminal: &str, value: &str, line: u32, column: u32) -> Token {
    Token {
        terminal: terminal.to_string(),
        value: value.to_string(),
        line,
        column,
    }
}

fn export(source: &str) -> Vec<Token> {
    let (service, _editor) = attached_service(source);
    service.export_tokens().unwrap()
}

#[test]
fn test_simple_assignment() {
    assert_eq!(
        export("x = 1;"),
        vec![
            tok("Лит_Идентификатор", "x", 1, 1),
            tok("Оп_Равно", "=", 1, 3),
            tok("Лит_Число", "1", 1, 5),
            tok("Разд_ТочкаСЗапятой", ";", 1, 6),
            tok(EOF_TERMINAL, "", 1, 1),
        ]
    );
}

#[test]
fn test_multiline_if() {
    let tokens = export("Если а Тогда\n    б = 1;\nКонецЕсли;");
    assert_eq!(
        tokens,
        vec![
            tok("Ключ_Если", "Если", 1, 1),
            tok("Лит_Идентификатор", "а", 1, 6),
            tok("Ключ_Тогда", "Тогда", 1, 8),
            tok("Лит_Идентификатор", "б", 2, 5),
            tok("Оп_Равно", "=", 2, 7),
            tok("Лит_Число", "1", 2, 9),
            tok("Разд_ТочкаСЗапятой", ";", 2, 10),
            tok("Ключ_КонецЕсли", "КонецЕсли", 3, 1),
            tok("Разд_ТочкаСЗапятой", ";", 3, 10),
            tok(EOF_TERMINAL, "", 3, 1),
        ]
    );
}

#[test]
fn test_member_call_punctuation() {
    let tokens = export(r#"x = Pet.Получить("id");"#);
    let terminals: Vec<&str> = tokens.iter().map(|t| t.terminal.as_str()).collect();
    assert_eq!(
        terminals,
        vec![
            "Лит_Идентификатор",
            "Оп_Равно",
            "Лит_Идентификатор",
            "Разд_Точка",
            "Лит_Идентификатор",
            "Разд_СкобкаЛевая",
            "Лит_Строка",
            "Разд_СкобкаПравая",
            "Разд_ТочкаСЗапятой",
            EOF_TERMINAL,
        ]
    );
    assert_eq!(tokens[6].value, r#""id""#);
}

#[test]
fn test_comments_are_dropped() {
    assert_eq!(export("// только комментарий"), vec![tok(EOF_TERMINAL, "", 1, 1)]);

    let tokens = export("x = 1; // a = b;\n");
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens.last().unwrap(), &tok(EOF_TERMINAL, "", 2, 1));
}

#[test]
fn test_two_char_operators() {
    let tokens = export("Если а <> б Тогда КонецЕсли;");
    assert!(tokens.contains(&tok("Оп_НеРавно", "<>", 1, 8)));
}

#[test]
fn test_columns_are_utf16_units() {
    let tokens = export("Имя = 1;");
    assert_eq!(tokens[1], tok("Оп_Равно", "=", 1, 5));
}

#[test]
fn test_empty_document_has_no_tokens() {
    let (service, _editor) = attached_service("");
    assert!(service.export_tokens().is_none());
    assert_eq!(service.export_tokens_json(), "");
}

#[test]
fn test_json_wire_shape() {
    let (service, _editor) = attached_service("x = 1;");
    let json = service.export_tokens_json();
    assert!(json.starts_with(r#"[{"t":"Лит_Идентификатор","v":"x","l":1,"p":1}"#));
    assert!(json.ends_with(r#"{"t":"Спец_КонецФайла","v":"","l":1,"p":1}]"#));

    let parsed: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 5);
}
