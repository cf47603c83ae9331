//! Module items and statements.

use super::expressions::{
    at_expression_start, parse_argument_list, parse_expression, parse_postfix_expression,
    parse_root_expression,
};
use super::*;

/// Recovery set for an unrecognized statement
const STATEMENT_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ENDIF_KW,
    SyntaxKind::ENDDO_KW,
    SyntaxKind::EXCEPT_KW,
    SyntaxKind::ENDTRY_KW,
    SyntaxKind::ENDPROCEDURE_KW,
    SyntaxKind::ENDFUNCTION_KW,
    SyntaxKind::PROCEDURE_KW,
    SyntaxKind::FUNCTION_KW,
];

/// ModuleItems = (Annotation* MethodDef | Statement)*
pub fn parse_module_items<P: BslParser>(p: &mut P) {
    while !p.at_eof() {
        let pos_before = p.get_pos();

        match p.current_kind() {
            SyntaxKind::AMP | SyntaxKind::PROCEDURE_KW | SyntaxKind::FUNCTION_KW => {
                parse_method_or_annotations(p);
            }
            _ => parse_statement(p),
        }

        // Safety: if we didn't make progress, force-skip a token
        if p.get_pos() == pos_before && !p.at_eof() {
            p.error_recover(
                format!("stuck on token: {:?}", p.current_kind()),
                STATEMENT_RECOVERY,
            );
        }
    }
}

/// Annotation* (ProcedureDef | FunctionDef)?
///
/// Annotations not followed by a method stay at module level.
fn parse_method_or_annotations<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();

    while p.at(SyntaxKind::AMP) {
        parse_annotation(p);
    }

    let (kind, end_kw) = match p.current_kind() {
        SyntaxKind::PROCEDURE_KW if !p.at_eof() => {
            (SyntaxKind::PROCEDURE_DEF, SyntaxKind::ENDPROCEDURE_KW)
        }
        SyntaxKind::FUNCTION_KW if !p.at_eof() => {
            (SyntaxKind::FUNCTION_DEF, SyntaxKind::ENDFUNCTION_KW)
        }
        _ => return,
    };

    p.start_node_at(checkpoint, kind);

    p.bump(); // Процедура / Функция
    super::parse_name(p, SyntaxKind::NAME);
    if p.at(SyntaxKind::L_PAREN) {
        parse_param_list(p);
    } else {
        p.error("expected parameter list".to_string());
    }
    p.eat(SyntaxKind::EXPORT_KW);

    parse_block(p);
    p.expect(end_kw);

    p.finish_node();
}

/// Annotation = '&' Name ArgList?
fn parse_annotation<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::ANNOTATION);
    p.bump(); // &
    if p.at_name() {
        p.bump_as(SyntaxKind::IDENT);
    } else {
        p.error("expected annotation name".to_string());
    }
    if p.at(SyntaxKind::L_PAREN) {
        parse_argument_list(p);
    }
    p.finish_node();
}

/// ParamList = '(' (Param (',' Param)*)? ')'
/// Param = 'Знач'? Name ('=' Expression)?
fn parse_param_list<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAM_LIST);
    p.bump(); // (

    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            p.start_node(SyntaxKind::PARAM);
            p.eat(SyntaxKind::VAL_KW);
            super::parse_name(p, SyntaxKind::NAME);
            if p.eat(SyntaxKind::EQ) {
                parse_expression(p);
            }
            p.finish_node();

            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// Block = Statement*
///
/// Stops at any block-closing keyword without consuming it.
pub fn parse_block<P: BslParser>(p: &mut P) {
    if !p.enter_nesting() {
        return;
    }
    p.start_node(SyntaxKind::BLOCK);

    while !p.at_eof() && !p.at_any(BLOCK_END) {
        let pos_before = p.get_pos();
        parse_statement(p);
        if p.get_pos() == pos_before && !p.at_eof() && !p.at_any(BLOCK_END) {
            p.error_recover(
                format!("stuck on token: {:?}", p.current_kind()),
                STATEMENT_RECOVERY,
            );
        }
    }

    p.finish_node();
    p.exit_nesting();
}

/// Statement terminator: ';' is required unless the block ends here.
fn finish_statement<P: BslParser>(p: &mut P) {
    if p.eat(SyntaxKind::SEMICOLON) {
        return;
    }
    if !p.at_eof() && !p.at_any(BLOCK_END) {
        p.error("expected ';'".to_string());
    }
}

pub fn parse_statement<P: BslParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::SEMICOLON => p.bump(),
        SyntaxKind::IF_KW => parse_if(p),
        SyntaxKind::WHILE_KW => parse_while(p),
        SyntaxKind::FOR_KW if p.nth(1) == SyntaxKind::EACH_KW => parse_for_each(p),
        SyntaxKind::FOR_KW => parse_for(p),
        SyntaxKind::TRY_KW => parse_try(p),
        SyntaxKind::VAR_KW => parse_var(p),
        SyntaxKind::RETURN_KW => parse_return(p),
        SyntaxKind::BREAK_KW => parse_keyword_statement(p, SyntaxKind::BREAK_STMT),
        SyntaxKind::CONTINUE_KW => parse_keyword_statement(p, SyntaxKind::CONTINUE_STMT),
        SyntaxKind::RAISE_KW => parse_raise(p),
        SyntaxKind::GOTO_KW => parse_goto(p),
        SyntaxKind::TILDE => parse_label(p),
        SyntaxKind::EXECUTE_KW => parse_execute(p),
        SyntaxKind::ADD_HANDLER_KW | SyntaxKind::REMOVE_HANDLER_KW => parse_handler(p),
        SyntaxKind::IDENT
        | SyntaxKind::L_PAREN
        | SyntaxKind::NEW_KW
        | SyntaxKind::QUESTION => parse_assignment_or_call(p),
        _ => {
            p.error_recover(
                format!("unexpected token: {:?}", p.current_kind()),
                STATEMENT_RECOVERY,
            );
            p.eat(SyntaxKind::SEMICOLON);
        }
    }
}

/// AssignmentStmt = Postfix '=' Expression ';'
/// CallStmt = Postfix ';'
fn parse_assignment_or_call<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_postfix_expression(p);

    if p.at(SyntaxKind::EQ) {
        p.start_node_at(checkpoint, SyntaxKind::ASSIGNMENT_STMT);
        p.bump(); // =
        parse_root_expression(p, SyntaxKind::EXPRESSION);
    } else {
        p.start_node_at(checkpoint, SyntaxKind::CALL_STMT);
    }

    finish_statement(p);
    p.finish_node();
}

/// IfStmt = 'Если' Expression 'Тогда' Block ElsIfClause* ElseClause? 'КонецЕсли' ';'?
fn parse_if<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::IF_STMT);

    p.bump(); // Если
    parse_root_expression(p, SyntaxKind::EXPRESSION);
    p.expect(SyntaxKind::THEN_KW);
    parse_block(p);

    while p.at(SyntaxKind::ELSIF_KW) {
        p.start_node(SyntaxKind::ELSIF_CLAUSE);
        p.bump();
        parse_root_expression(p, SyntaxKind::EXPRESSION);
        p.expect(SyntaxKind::THEN_KW);
        parse_block(p);
        p.finish_node();
    }

    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        parse_block(p);
        p.finish_node();
    }

    p.expect(SyntaxKind::ENDIF_KW);
    finish_statement(p);
    p.finish_node();
}

/// WhileStmt = 'Пока' Expression 'Цикл' Block 'КонецЦикла' ';'?
fn parse_while<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHILE_STMT);

    p.bump(); // Пока
    parse_root_expression(p, SyntaxKind::EXPRESSION);
    parse_loop_body(p);

    p.finish_node();
}

/// ForStmt = 'Для' VariableName '=' Expression 'По' Expression 'Цикл' Block 'КонецЦикла' ';'?
fn parse_for<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_STMT);

    p.bump(); // Для
    super::parse_name(p, SyntaxKind::VARIABLE_NAME);
    p.expect(SyntaxKind::EQ);
    parse_root_expression(p, SyntaxKind::EXPRESSION);
    p.expect(SyntaxKind::TO_KW);
    parse_root_expression(p, SyntaxKind::EXPRESSION);
    parse_loop_body(p);

    p.finish_node();
}

/// ForEachStmt = 'Для' 'Каждого' VariableName 'Из' Collection 'Цикл' Block 'КонецЦикла' ';'?
fn parse_for_each<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_EACH_STMT);

    p.bump(); // Для
    p.bump(); // Каждого
    super::parse_name(p, SyntaxKind::VARIABLE_NAME);
    p.expect(SyntaxKind::IN_KW);
    parse_root_expression(p, SyntaxKind::COLLECTION);
    parse_loop_body(p);

    p.finish_node();
}

fn parse_loop_body<P: BslParser>(p: &mut P) {
    p.expect(SyntaxKind::DO_KW);
    parse_block(p);
    p.expect(SyntaxKind::ENDDO_KW);
    finish_statement(p);
}

/// TryStmt = 'Попытка' Block ('Исключение' Block)? 'КонецПопытки' ';'?
fn parse_try<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::TRY_STMT);

    p.bump(); // Попытка
    parse_block(p);

    if p.at(SyntaxKind::EXCEPT_KW) {
        p.start_node(SyntaxKind::EXCEPT_CLAUSE);
        p.bump();
        parse_block(p);
        p.finish_node();
    } else {
        p.error("expected Исключение".to_string());
    }

    p.expect(SyntaxKind::ENDTRY_KW);
    finish_statement(p);
    p.finish_node();
}

/// VarStmt = 'Перем' VariableName 'Экспорт'? (',' VariableName 'Экспорт'?)* ';'
fn parse_var<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::VAR_STMT);

    p.bump(); // Перем
    loop {
        super::parse_name(p, SyntaxKind::VARIABLE_NAME);
        p.eat(SyntaxKind::EXPORT_KW);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }

    finish_statement(p);
    p.finish_node();
}

/// ReturnStmt = 'Возврат' Expression? ';'
fn parse_return<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::RETURN_STMT);

    p.bump(); // Возврат
    if at_expression_start(p) {
        parse_root_expression(p, SyntaxKind::EXPRESSION);
    }

    finish_statement(p);
    p.finish_node();
}

/// BreakStmt = 'Прервать' ';' | ContinueStmt = 'Продолжить' ';'
fn parse_keyword_statement<P: BslParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    finish_statement(p);
    p.finish_node();
}

/// RaiseStmt = 'ВызватьИсключение' (ArgList | Expression)? ';'
fn parse_raise<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::RAISE_STMT);

    p.bump(); // ВызватьИсключение
    if p.at(SyntaxKind::L_PAREN) {
        parse_argument_list(p);
    } else if at_expression_start(p) {
        parse_root_expression(p, SyntaxKind::EXPRESSION);
    }

    finish_statement(p);
    p.finish_node();
}

/// GotoStmt = 'Перейти' '~' LabelName ';'
fn parse_goto<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::GOTO_STMT);

    p.bump(); // Перейти
    p.expect(SyntaxKind::TILDE);
    super::parse_name(p, SyntaxKind::LABEL_NAME);

    finish_statement(p);
    p.finish_node();
}

/// LabelStmt = '~' LabelName ':'
fn parse_label<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::LABEL_STMT);

    p.bump(); // ~
    super::parse_name(p, SyntaxKind::LABEL_NAME);
    p.expect(SyntaxKind::COLON);

    p.finish_node();
}

/// ExecuteStmt = 'Выполнить' (ArgList | Expression) ';'
fn parse_execute<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::EXECUTE_STMT);

    p.bump(); // Выполнить
    if p.at(SyntaxKind::L_PAREN) {
        parse_argument_list(p);
    } else {
        parse_root_expression(p, SyntaxKind::EXPRESSION);
    }

    finish_statement(p);
    p.finish_node();
}

/// HandlerStmt = ('ДобавитьОбработчик' | 'УдалитьОбработчик') Expression ',' Expression ';'
fn parse_handler<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::HANDLER_STMT);

    p.bump();
    parse_expression(p);
    p.expect(SyntaxKind::COMMA);
    parse_expression(p);

    finish_statement(p);
    p.finish_node();
}
