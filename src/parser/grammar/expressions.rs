//! Expression parsing for BSL
//!
//! This module implements the expression precedence chain:
//!
//! ```text
//! OrExpression → AndExpression → NotExpression → CompareExpression
//!     → AdditiveExpression → MultiplicativeExpression → UnaryExpression
//!     → PostfixExpression → PrimaryExpression
//! ```
//!
//! Only statement-level expressions get an `EXPRESSION` (or `COLLECTION`)
//! wrapper; operands, index values and arguments are bare.

use super::*;

/// Whether the current token can begin an expression
pub fn at_expression_start<P: BslParser>(p: &P) -> bool {
    p.at_any(&[
        SyntaxKind::IDENT,
        SyntaxKind::NUMBER,
        SyntaxKind::STRING,
        SyntaxKind::MULTILINE_STRING_START,
        SyntaxKind::DATE,
        SyntaxKind::TRUE_KW,
        SyntaxKind::FALSE_KW,
        SyntaxKind::NULL_KW,
        SyntaxKind::UNDEFINED_KW,
        SyntaxKind::L_PAREN,
        SyntaxKind::NEW_KW,
        SyntaxKind::QUESTION,
        SyntaxKind::NOT_KW,
        SyntaxKind::PLUS,
        SyntaxKind::MINUS,
    ])
}

/// Parse a statement-level expression wrapped in a node of `kind`.
///
/// Returns false (and records an error) when no expression is present; no
/// wrapper node is created in that case.
pub fn parse_root_expression<P: BslParser>(p: &mut P, kind: SyntaxKind) -> bool {
    if !at_expression_start(p) {
        p.error("expected expression".to_string());
        return false;
    }
    p.start_node(kind);
    parse_expression(p);
    p.finish_node();
    true
}

/// Parse an expression, returning true if any tokens were consumed
pub fn parse_expression<P: BslParser>(p: &mut P) -> bool {
    let start_pos = p.get_pos();
    if p.enter_nesting() {
        parse_or_expression(p);
        p.exit_nesting();
    }
    p.get_pos() > start_pos
}

/// OrExpression = AndExpression ('Или' AndExpression)*
fn parse_or_expression<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_and_expression(p);

    while p.at(SyntaxKind::OR_KW) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        parse_and_expression(p);
        p.finish_node();
    }
}

/// AndExpression = NotExpression ('И' NotExpression)*
fn parse_and_expression<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_not_expression(p);

    while p.at(SyntaxKind::AND_KW) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        parse_not_expression(p);
        p.finish_node();
    }
}

/// NotExpression = 'Не' NotExpression | CompareExpression
fn parse_not_expression<P: BslParser>(p: &mut P) {
    if p.at(SyntaxKind::NOT_KW) {
        if !p.enter_nesting() {
            return;
        }
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        parse_not_expression(p);
        p.finish_node();
        p.exit_nesting();
    } else {
        parse_compare_expression(p);
    }
}

const COMPARE_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ,
    SyntaxKind::NEQ,
    SyntaxKind::LT,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT,
    SyntaxKind::GT_EQ,
];

/// CompareExpression = AdditiveExpression (CompareOp AdditiveExpression)*
fn parse_compare_expression<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_additive_expression(p);

    while p.at_any(COMPARE_OPS) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        parse_operator(p, SyntaxKind::COMPARE_OP);
        parse_additive_expression(p);
        p.finish_node();
    }
}

/// AdditiveExpression = MultiplicativeExpression (('+' | '-') MultiplicativeExpression)*
fn parse_additive_expression<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_multiplicative_expression(p);

    while p.at(SyntaxKind::PLUS) || p.at(SyntaxKind::MINUS) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        parse_operator(p, SyntaxKind::ARITH_OP);
        parse_multiplicative_expression(p);
        p.finish_node();
    }
}

/// MultiplicativeExpression = UnaryExpression (('*' | '/' | '%') UnaryExpression)*
fn parse_multiplicative_expression<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_unary_expression(p);

    while p.at_any(&[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT]) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        parse_operator(p, SyntaxKind::ARITH_OP);
        parse_unary_expression(p);
        p.finish_node();
    }
}

/// UnaryExpression = ('+' | '-') UnaryExpression | PostfixExpression
fn parse_unary_expression<P: BslParser>(p: &mut P) {
    if p.at(SyntaxKind::PLUS) || p.at(SyntaxKind::MINUS) {
        if !p.enter_nesting() {
            return;
        }
        p.start_node(SyntaxKind::UNARY_EXPR);
        parse_operator(p, SyntaxKind::ARITH_OP);
        parse_unary_expression(p);
        p.finish_node();
        p.exit_nesting();
    } else {
        parse_postfix_expression(p);
    }
}

/// Operator tokens are wrapped so they show up as leaves in the named view
fn parse_operator<P: BslParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.finish_node();
}

/// PostfixExpression = PrimaryExpression ('.' PropertyName | Index | ArgList)*
pub fn parse_postfix_expression<P: BslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_primary_expression(p);

    loop {
        match p.current_kind() {
            SyntaxKind::DOT if !p.at_eof() => {
                p.start_node_at(checkpoint, SyntaxKind::MEMBER_EXPR);
                p.bump(); // .
                super::parse_name(p, SyntaxKind::PROPERTY_NAME);
                p.finish_node();
            }
            SyntaxKind::L_BRACKET if !p.at_eof() => {
                p.start_node_at(checkpoint, SyntaxKind::MEMBER_EXPR);
                parse_index(p);
                p.finish_node();
            }
            SyntaxKind::L_PAREN if !p.at_eof() => {
                p.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                parse_argument_list(p);
                p.finish_node();
            }
            _ => break,
        }
    }
}

/// Index = '[' Expression ']'
fn parse_index<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::INDEX);
    p.bump(); // [
    if !parse_expression(p) {
        p.error("expected index expression".to_string());
    }
    p.expect(SyntaxKind::R_BRACKET);
    p.finish_node();
}

/// PrimaryExpression = Literal | VariableName | ParenthesizedExpr | NewExpr | TernaryExpr
fn parse_primary_expression<P: BslParser>(p: &mut P) {
    if p.at_eof() {
        p.error("expected expression".to_string());
        return;
    }

    match p.current_kind() {
        SyntaxKind::NUMBER
        | SyntaxKind::DATE
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW
        | SyntaxKind::UNDEFINED_KW => p.bump(),

        // Adjacent string literals concatenate: "а" "б"
        SyntaxKind::STRING | SyntaxKind::MULTILINE_STRING_START => {
            while p.at(SyntaxKind::STRING) || p.at(SyntaxKind::MULTILINE_STRING_START) {
                let multiline = p.at(SyntaxKind::MULTILINE_STRING_START);
                p.bump();
                if multiline {
                    while p.at(SyntaxKind::MULTILINE_STRING_CONTINUE) {
                        p.bump();
                    }
                }
            }
        }

        SyntaxKind::IDENT => {
            p.start_node(SyntaxKind::VARIABLE_NAME);
            p.bump();
            p.finish_node();
        }

        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PARENTHESIZED_EXPR);
            p.bump(); // (
            if !parse_expression(p) {
                p.error("expected expression".to_string());
            }
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }

        SyntaxKind::NEW_KW => parse_new_expression(p),

        SyntaxKind::QUESTION => parse_ternary_expression(p),

        _ => {
            // Unknown - don't consume
            p.error(format!("expected expression, found {:?}", p.current_kind()));
        }
    }
}

/// NewExpr = 'Новый' TypeName ArgList? | 'Новый' ArgList
fn parse_new_expression<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::NEW_EXPR);

    p.bump(); // Новый
    if p.at_name() {
        super::parse_name(p, SyntaxKind::TYPE_NAME);
    }
    if p.at(SyntaxKind::L_PAREN) {
        parse_argument_list(p);
    }

    p.finish_node();
}

/// TernaryExpr = '?' '(' Expression ',' Expression ',' Expression ')'
fn parse_ternary_expression<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::TERNARY_EXPR);

    p.bump(); // ?
    p.expect(SyntaxKind::L_PAREN);
    parse_expression(p);
    p.expect(SyntaxKind::COMMA);
    parse_expression(p);
    p.expect(SyntaxKind::COMMA);
    parse_expression(p);
    p.expect(SyntaxKind::R_PAREN);

    p.finish_node();
}

/// ArgList = '(' (Expression? (',' Expression?)*)? ')'
///
/// Arguments may be omitted: `Метод(, 2)`.
pub fn parse_argument_list<P: BslParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARG_LIST);

    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            if at_expression_start(p) {
                parse_expression(p);
            } else if !p.at_any(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]) {
                p.error(format!("unexpected token in arguments: {:?}", p.current_kind()));
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);

    p.finish_node();
}
