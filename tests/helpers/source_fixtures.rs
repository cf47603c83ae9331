//! Common source fixtures for tests.

pub const PETSTORE_SCHEMA: &str = r##"{
    "openapi": "3.0.0",
    "components": {
        "schemas": {
            "Pet": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "category": { "$ref": "#/components/schemas/Category" },
                    "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
                }
            },
            "Category": {
                "type": "object",
                "properties": { "id": { "type": "integer" }, "name": { "type": "string" } }
            },
            "Tag": {
                "type": "object",
                "properties": { "label": { "type": "string" } }
            }
        }
    }
}"##;

pub const PROCEDURE_MODULE: &str = r#"&НаКлиенте
Процедура Обработать(Знач Pet, Данные) Экспорт
    Категория = Pet.Получить("category");
    Для Каждого Тег Из Pet.tags Цикл
        Метка = Тег.label;
    КонецЦикла;
    Первый = Данные[0];
КонецПроцедуры
"#;

pub const ENGLISH_MODULE: &str = r#"Procedure Run()
    If x > 0 Then
        y = x;
    ElsIf x = 0 Then
        y = 1;
    Else
        y = -x;
    EndIf;
EndProcedure
"#;
