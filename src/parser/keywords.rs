//! Keyword table for BSL.
//!
//! Every keyword has a Russian and an English spelling. Matching is
//! case-insensitive, so the table is keyed by the lowercased spelling.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::syntax_kind::SyntaxKind;

/// (russian, english, kind)
pub const KEYWORDS: &[(&str, &str, SyntaxKind)] = &[
    ("если", "if", SyntaxKind::IF_KW),
    ("тогда", "then", SyntaxKind::THEN_KW),
    ("иначеесли", "elsif", SyntaxKind::ELSIF_KW),
    ("иначе", "else", SyntaxKind::ELSE_KW),
    ("конецесли", "endif", SyntaxKind::ENDIF_KW),
    ("для", "for", SyntaxKind::FOR_KW),
    ("каждого", "each", SyntaxKind::EACH_KW),
    ("из", "in", SyntaxKind::IN_KW),
    ("по", "to", SyntaxKind::TO_KW),
    ("пока", "while", SyntaxKind::WHILE_KW),
    ("цикл", "do", SyntaxKind::DO_KW),
    ("конеццикла", "enddo", SyntaxKind::ENDDO_KW),
    ("процедура", "procedure", SyntaxKind::PROCEDURE_KW),
    ("конецпроцедуры", "endprocedure", SyntaxKind::ENDPROCEDURE_KW),
    ("функция", "function", SyntaxKind::FUNCTION_KW),
    ("конецфункции", "endfunction", SyntaxKind::ENDFUNCTION_KW),
    ("перем", "var", SyntaxKind::VAR_KW),
    ("перейти", "goto", SyntaxKind::GOTO_KW),
    ("возврат", "return", SyntaxKind::RETURN_KW),
    ("продолжить", "continue", SyntaxKind::CONTINUE_KW),
    ("прервать", "break", SyntaxKind::BREAK_KW),
    ("или", "or", SyntaxKind::OR_KW),
    ("и", "and", SyntaxKind::AND_KW),
    ("не", "not", SyntaxKind::NOT_KW),
    ("попытка", "try", SyntaxKind::TRY_KW),
    ("исключение", "except", SyntaxKind::EXCEPT_KW),
    ("вызватьисключение", "raise", SyntaxKind::RAISE_KW),
    ("конецпопытки", "endtry", SyntaxKind::ENDTRY_KW),
    ("новый", "new", SyntaxKind::NEW_KW),
    ("экспорт", "export", SyntaxKind::EXPORT_KW),
    ("знач", "val", SyntaxKind::VAL_KW),
    ("добавитьобработчик", "addhandler", SyntaxKind::ADD_HANDLER_KW),
    ("удалитьобработчик", "removehandler", SyntaxKind::REMOVE_HANDLER_KW),
    ("выполнить", "execute", SyntaxKind::EXECUTE_KW),
    ("истина", "true", SyntaxKind::TRUE_KW),
    ("ложь", "false", SyntaxKind::FALSE_KW),
    ("null", "null", SyntaxKind::NULL_KW),
    ("неопределено", "undefined", SyntaxKind::UNDEFINED_KW),
];

static KEYWORD_MAP: Lazy<FxHashMap<&'static str, SyntaxKind>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for &(ru, en, kind) in KEYWORDS {
        map.insert(ru, kind);
        map.insert(en, kind);
    }
    map
});

/// Look up the keyword kind for an identifier, ignoring case.
pub fn keyword_kind(ident: &str) -> Option<SyntaxKind> {
    // Longest keyword is "добавитьобработчик" (18 chars)
    if ident.chars().count() > 18 {
        return None;
    }
    KEYWORD_MAP.get(ident.to_lowercase().as_str()).copied()
}
