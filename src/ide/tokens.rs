//! Token stream export for the external compiler.
//!
//! The named-node tree has no punctuation in it, so the stream is rebuilt by
//! interleaving the tree's leaves with punctuation scanned out of the gaps
//! between them. The terminal vocabulary and the record shape are a wire
//! contract with the compiler and must not change.

use serde::{Deserialize, Serialize};

use crate::base::{LineIndex, TextSize};
use crate::parser::SyntaxKind;
use crate::syntax::TreeNode;

/// Terminal of the synthetic end-of-file token
pub const EOF_TERMINAL: &str = "Спец_КонецФайла";

/// Terminal for identifiers not covered by the node table
pub const IDENTIFIER_TERMINAL: &str = "Лит_Идентификатор";

/// One lexical token as the compiler expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "t")]
    pub terminal: String,
    #[serde(rename = "v")]
    pub value: String,
    #[serde(rename = "l")]
    pub line: u32,
    #[serde(rename = "p")]
    pub column: u32,
}

/// Node kinds exported whole, without descending into them
pub fn node_terminal(kind: SyntaxKind) -> Option<&'static str> {
    use SyntaxKind::*;
    let terminal = match kind {
        IF_KW => "Ключ_Если",
        THEN_KW => "Ключ_Тогда",
        ELSIF_KW => "Ключ_ИначеЕсли",
        ELSE_KW => "Ключ_Иначе",
        ENDIF_KW => "Ключ_КонецЕсли",
        FOR_KW => "Ключ_Для",
        EACH_KW => "Ключ_Каждого",
        IN_KW => "Ключ_Из",
        TO_KW => "Ключ_По",
        WHILE_KW => "Ключ_Пока",
        DO_KW => "Ключ_Цикл",
        ENDDO_KW => "Ключ_КонецЦикла",
        PROCEDURE_KW => "Ключ_Процедура",
        ENDPROCEDURE_KW => "Ключ_КонецПроцедуры",
        FUNCTION_KW => "Ключ_Функция",
        ENDFUNCTION_KW => "Ключ_КонецФункции",
        VAR_KW => "Ключ_Перем",
        GOTO_KW => "Ключ_Перейти",
        RETURN_KW => "Ключ_Возврат",
        CONTINUE_KW => "Ключ_Продолжить",
        BREAK_KW => "Ключ_Прервать",
        OR_KW => "Ключ_Или",
        AND_KW => "Ключ_И",
        NOT_KW => "Ключ_Не",
        TRY_KW => "Ключ_Попытка",
        EXCEPT_KW => "Ключ_Исключение",
        RAISE_KW => "Ключ_ВызватьИсключение",
        ENDTRY_KW => "Ключ_КонецПопытки",
        NEW_KW => "Ключ_Новый",
        EXPORT_KW => "Ключ_Экспорт",
        VAL_KW => "Ключ_Знач",
        ADD_HANDLER_KW => "Ключ_ДобавитьОбработчик",
        REMOVE_HANDLER_KW => "Ключ_УдалитьОбработчик",
        EXECUTE_KW => "Ключ_Выполнить",
        TRUE_KW => "Лит_Истина",
        FALSE_KW => "Лит_Ложь",
        NULL_KW => "Лит_Null",
        UNDEFINED_KW => "Лит_Неопределено",
        NUMBER => "Лит_Число",
        STRING | MULTILINE_STRING_START | MULTILINE_STRING_CONTINUE => "Лит_Строка",
        DATE => "Лит_Дата",
        VARIABLE_NAME => IDENTIFIER_TERMINAL,
        // The whole annotation is one removable token
        ANNOTATION => "Спец_Директива",
        _ => return None,
    };
    Some(terminal)
}

/// One- and two-character punctuation
pub fn punct_terminal(text: &str) -> Option<&'static str> {
    let terminal = match text {
        "=" => "Оп_Равно",
        "<>" => "Оп_НеРавно",
        "<" => "Оп_Меньше",
        "<=" => "Оп_МеньшеРавно",
        ">" => "Оп_Больше",
        ">=" => "Оп_БольшеРавно",
        "+" => "Оп_Плюс",
        "-" => "Оп_Минус",
        "*" => "Оп_Умножить",
        "/" => "Оп_Делить",
        "%" => "Оп_Остаток",
        "(" => "Разд_СкобкаЛевая",
        ")" => "Разд_СкобкаПравая",
        "[" => "Разд_КвадратнаяЛевая",
        "]" => "Разд_КвадратнаяПравая",
        "." => "Разд_Точка",
        "," => "Разд_Запятая",
        ";" => "Разд_ТочкаСЗапятой",
        ":" => "Разд_Двоеточие",
        "~" => "Разд_Тильда",
        "?" => "Разд_Тернарный",
        _ => return None,
    };
    Some(terminal)
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic()
        || c == '_'
        || ('а'..='я').contains(&c)
        || ('А'..='Я').contains(&c)
        || matches!(c, 'ё' | 'Ё')
}

#[derive(Debug, Clone, Copy)]
struct Leaf {
    kind: SyntaxKind,
    start: usize,
    end: usize,
}

/// Tree leaves in document order.
///
/// Atomic nodes (those with a node terminal) are taken whole. Any other node
/// that has no child at all and a non-empty span is a leaf itself.
fn collect_leaves<N: TreeNode>(root: &N) -> Vec<Leaf> {
    enum Step<N> {
        Enter(N),
        Leave,
    }

    struct Open {
        leaf: Leaf,
        has_child: bool,
    }

    let mut leaves = Vec::new();
    let mut open: Vec<Open> = Vec::new();
    let mut work = vec![Step::Enter(root.clone())];

    while let Some(step) = work.pop() {
        match step {
            Step::Enter(node) => {
                let range = node.range();
                let leaf = Leaf {
                    kind: node.kind(),
                    start: usize::from(range.start()),
                    end: usize::from(range.end()),
                };
                if node_terminal(leaf.kind).is_some() {
                    leaves.push(leaf);
                    if let Some(parent) = open.last_mut() {
                        parent.has_child = true;
                    }
                    continue;
                }
                open.push(Open {
                    leaf,
                    has_child: false,
                });
                work.push(Step::Leave);
                work.extend(node.children().into_iter().rev().map(Step::Enter));
            }
            Step::Leave => {
                let Some(node) = open.pop() else { continue };
                if !node.has_child && node.leaf.start < node.leaf.end {
                    leaves.push(node.leaf);
                }
                if let Some(parent) = open.last_mut() {
                    parent.has_child = true;
                }
            }
        }
    }

    leaves
}

struct Emitter<'t> {
    text: &'t str,
    index: LineIndex,
    tokens: Vec<Token>,
}

impl Emitter<'_> {
    fn push(&mut self, terminal: &str, start: usize, value: &str) {
        let pos = self.index.line_col(self.text, TextSize::new(start as u32));
        self.tokens.push(Token {
            terminal: terminal.to_string(),
            value: value.to_string(),
            line: pos.line,
            column: pos.col,
        });
    }

    /// Emit punctuation found in `text[from..to]`, skipping everything else
    fn scan_gap(&mut self, from: usize, to: usize) {
        let text = self.text;
        let to = to.min(text.len());
        let mut pos = from;
        while pos < to {
            let Some(c) = text[pos..].chars().next() else { break };
            if matches!(c, ' ' | '\t' | '\n' | '\r') {
                pos += 1;
                continue;
            }
            if pos + 2 <= to {
                if let Some(pair) = text.get(pos..pos + 2) {
                    if let Some(terminal) = punct_terminal(pair) {
                        self.push(terminal, pos, pair);
                        pos += 2;
                        continue;
                    }
                }
            }
            let single = &text[pos..pos + c.len_utf8()];
            if let Some(terminal) = punct_terminal(single) {
                self.push(terminal, pos, single);
            }
            pos += c.len_utf8();
        }
    }
}

/// Rebuild the full token stream of `text` from its named-node tree.
///
/// Comments and preprocessor lines are dropped. The stream always ends with
/// an end-of-file token on the last line, column 1.
pub fn export_tokens<N: TreeNode>(root: &N, text: &str) -> Vec<Token> {
    let mut emitter = Emitter {
        text,
        index: LineIndex::new(text),
        tokens: Vec::new(),
    };

    let mut prev_end = 0;
    for leaf in collect_leaves(root) {
        emitter.scan_gap(prev_end, leaf.start);
        prev_end = leaf.end;

        if matches!(leaf.kind, SyntaxKind::LINE_COMMENT | SyntaxKind::PREPROC) {
            continue;
        }

        let value = text.get(leaf.start..leaf.end).unwrap_or("");
        let terminal = node_terminal(leaf.kind)
            .or_else(|| punct_terminal(value))
            .or_else(|| {
                value
                    .chars()
                    .next()
                    .filter(|&c| is_identifier_start(c))
                    .map(|_| IDENTIFIER_TERMINAL)
            });
        match terminal {
            Some(terminal) => emitter.push(terminal, leaf.start, value),
            // Degenerate leaf, e.g. an empty parameter list
            None => emitter.scan_gap(leaf.start, leaf.end),
        }
    }
    emitter.scan_gap(prev_end, text.len());

    let line = emitter.index.line_count() as u32;
    emitter.tokens.push(Token {
        terminal: EOF_TERMINAL.to_string(),
        value: String::new(),
        line,
        column: 1,
    });
    emitter.tokens
}
