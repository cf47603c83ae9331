//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Node kinds follow the statement/expression structure of BSL modules.

/// All syntax kinds (tokens and nodes) in BSL
///
/// Tokens are leaf elements (identifiers, keywords, literals, punctuation).
/// Nodes are composite (statements, expressions, definitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace, comments and preprocessor lines)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT, // // ...
    PREPROC,      // #Область ...

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    NUMBER,                    // 42, 3.14
    STRING,                    // "text"
    MULTILINE_STRING_START,    // "first line
    MULTILINE_STRING_CONTINUE, // |next line"
    DATE,                      // '20240101'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    DOT,       // .
    COMMA,     // ,
    SEMICOLON, // ;
    COLON,     // :
    TILDE,     // ~
    QUESTION,  // ?
    AMP,       // &
    EQ,        // =
    NEQ,       // <>
    LT,        // <
    LT_EQ,     // <=
    GT,        // >
    GT_EQ,     // >=
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    PERCENT,   // %

    // =========================================================================
    // KEYWORDS (bilingual, case-insensitive)
    // =========================================================================
    IF_KW,
    THEN_KW,
    ELSIF_KW,
    ELSE_KW,
    ENDIF_KW,
    FOR_KW,
    EACH_KW,
    IN_KW,
    TO_KW,
    WHILE_KW,
    DO_KW,
    ENDDO_KW,
    PROCEDURE_KW,
    ENDPROCEDURE_KW,
    FUNCTION_KW,
    ENDFUNCTION_KW,
    VAR_KW,
    GOTO_KW,
    RETURN_KW,
    CONTINUE_KW,
    BREAK_KW,
    OR_KW,
    AND_KW,
    NOT_KW,
    TRY_KW,
    EXCEPT_KW,
    RAISE_KW,
    ENDTRY_KW,
    NEW_KW,
    EXPORT_KW,
    VAL_KW,
    ADD_HANDLER_KW,
    REMOVE_HANDLER_KW,
    EXECUTE_KW,
    // Literal keywords
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    UNDEFINED_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    MODULE,
    BLOCK,
    ANNOTATION,
    VAR_STMT,
    PROCEDURE_DEF,
    FUNCTION_DEF,
    PARAM_LIST,
    PARAM,
    NAME,

    // Statements
    ASSIGNMENT_STMT,
    CALL_STMT,
    IF_STMT,
    ELSIF_CLAUSE,
    ELSE_CLAUSE,
    WHILE_STMT,
    FOR_STMT,
    FOR_EACH_STMT,
    TRY_STMT,
    EXCEPT_CLAUSE,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    RAISE_STMT,
    GOTO_STMT,
    LABEL_STMT,
    LABEL_NAME,
    EXECUTE_STMT,
    HANDLER_STMT,

    // Expressions
    EXPRESSION,
    COLLECTION,
    VARIABLE_NAME,
    PROPERTY_NAME,
    TYPE_NAME,
    MEMBER_EXPR,
    INDEX,
    CALL_EXPR,
    ARG_LIST,
    PARENTHESIZED_EXPR,
    BINARY_EXPR,
    UNARY_EXPR,
    COMPARE_OP,
    ARITH_OP,
    NEW_EXPR,
    TERNARY_EXPR,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (skipped by the parser)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::PREPROC)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IF_KW as u16) && (self as u16) <= (Self::UNDEFINED_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::PERCENT as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NUMBER
                | Self::STRING
                | Self::MULTILINE_STRING_START
                | Self::MULTILINE_STRING_CONTINUE
                | Self::DATE
        )
    }

    /// Check if this is a composite node kind
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::MODULE as u16) && (self as u16) <= (Self::ERROR as u16)
    }

    /// Whether elements of this kind appear in the named-node view.
    ///
    /// Every node is named. Of the tokens, only keywords, literals, comments and
    /// preprocessor lines are; punctuation, whitespace and bare identifiers are
    /// anonymous (identifiers are always wrapped in a name node).
    pub fn is_named(self) -> bool {
        self.is_node()
            || self.is_keyword()
            || self.is_literal()
            || matches!(self, Self::LINE_COMMENT | Self::PREPROC)
    }

    /// Whether this kind wraps an expression at statement level
    pub fn is_expression_root(self) -> bool {
        matches!(self, Self::EXPRESSION | Self::COLLECTION)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BslLanguage {}

impl rowan::Language for BslLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<BslLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<BslLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<BslLanguage>;
