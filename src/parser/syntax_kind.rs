//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Node kinds follow the rule names of the Modelica 3.x concrete grammar so
//! structural queries can name them (`//class_definition`, `//connect_clause`).

/// All syntax kinds (tokens and nodes) in Modelica
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (classes, elements, equations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,            // identifier or 'quoted identifier'
    UNSIGNED_INTEGER, // 42
    UNSIGNED_REAL,    // 3.14, 1e-3
    STRING,           // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    L_BRACE,   // {
    R_BRACE,   // }
    SEMICOLON, // ;
    COMMA,     // ,
    DOT,       // .
    COLON,     // :
    EQ,        // =
    COLON_EQ,  // :=
    EQ_EQ,     // ==
    NEQ,       // <>
    LT,        // <
    LT_EQ,     // <=
    GT,        // >
    GT_EQ,     // >=
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    CARET,     // ^
    DOT_PLUS,  // .+
    DOT_MINUS, // .-
    DOT_STAR,  // .*
    DOT_SLASH, // ./
    DOT_CARET, // .^

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ALGORITHM_KW,
    AND_KW,
    ANNOTATION_KW,
    BLOCK_KW,
    BREAK_KW,
    CLASS_KW,
    CONNECT_KW,
    CONNECTOR_KW,
    CONSTANT_KW,
    CONSTRAINEDBY_KW,
    DER_KW,
    DISCRETE_KW,
    EACH_KW,
    ELSE_KW,
    ELSEIF_KW,
    ELSEWHEN_KW,
    ENCAPSULATED_KW,
    END_KW,
    ENUMERATION_KW,
    EQUATION_KW,
    EXPANDABLE_KW,
    EXTENDS_KW,
    EXTERNAL_KW,
    FALSE_KW,
    FINAL_KW,
    FLOW_KW,
    FOR_KW,
    FUNCTION_KW,
    IF_KW,
    IMPORT_KW,
    IMPURE_KW,
    IN_KW,
    INITIAL_KW,
    INNER_KW,
    INPUT_KW,
    LOOP_KW,
    MODEL_KW,
    NOT_KW,
    OPERATOR_KW,
    OR_KW,
    OUTER_KW,
    OUTPUT_KW,
    PACKAGE_KW,
    PARAMETER_KW,
    PARTIAL_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    PURE_KW,
    RECORD_KW,
    REDECLARE_KW,
    REPLACEABLE_KW,
    RETURN_KW,
    STREAM_KW,
    THEN_KW,
    TRUE_KW,
    TYPE_KW,
    WHEN_KW,
    WHILE_KW,
    WITHIN_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    // Root
    STORED_DEFINITION,
    WITHIN_CLAUSE,

    // Classes
    CLASS_DEFINITION,
    CLASS_PREFIXES,
    LONG_CLASS_SPECIFIER,
    SHORT_CLASS_SPECIFIER,
    DER_CLASS_SPECIFIER,
    END_CLAUSE,
    ENUM_LIST,
    ENUMERATION_LITERAL,
    SHORT_CLASS_DEFINITION,

    // Composition
    COMPOSITION,
    ELEMENT_LIST,
    ELEMENT,
    IMPORT_CLAUSE,
    IMPORT_LIST,
    EXTENDS_CLAUSE,
    CONSTRAINING_CLAUSE,
    EXTERNAL_CLAUSE,
    EXTERNAL_FUNCTION_CALL,

    // Components
    COMPONENT_CLAUSE,
    COMPONENT_CLAUSE1,
    TYPE_PREFIX,
    TYPE_SPECIFIER,
    COMPONENT_LIST,
    COMPONENT_DECLARATION,
    COMPONENT_DECLARATION1,
    DECLARATION,
    CONDITION_ATTRIBUTE,

    // Modifications
    MODIFICATION,
    CLASS_MODIFICATION,
    ARGUMENT_LIST,
    ARGUMENT,
    ELEMENT_MODIFICATION,
    ELEMENT_REDECLARATION,
    ELEMENT_REPLACEABLE,

    // Equations and algorithms
    EQUATION_SECTION,
    ALGORITHM_SECTION,
    EQUATION,
    STATEMENT,
    IF_EQUATION,
    FOR_EQUATION,
    WHEN_EQUATION,
    IF_STATEMENT,
    FOR_STATEMENT,
    WHILE_STATEMENT,
    WHEN_STATEMENT,
    FOR_INDICES,
    FOR_INDEX,
    CONNECT_CLAUSE,

    // Expressions
    EXPRESSION,
    COMPONENT_REFERENCE,
    FUNCTION_CALL_ARGS,
    FUNCTION_ARGUMENT,
    NAMED_ARGUMENT,
    OUTPUT_EXPRESSION_LIST,
    ARRAY_CONSTRUCTOR,
    ARRAY_CONCATENATION,
    ARRAY_SUBSCRIPTS,
    SUBSCRIPT,

    // Comments and names
    COMMENT,
    STRING_COMMENT,
    ANNOTATION_CLAUSE,
    NAME,

    // Root of a single-rule parse
    FRAGMENT,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

/// Rule names for node kinds, in declaration order.
const NODE_RULE_NAMES: &[(SyntaxKind, &str)] = &[
    (SyntaxKind::STORED_DEFINITION, "stored_definition"),
    (SyntaxKind::WITHIN_CLAUSE, "within_clause"),
    (SyntaxKind::CLASS_DEFINITION, "class_definition"),
    (SyntaxKind::CLASS_PREFIXES, "class_prefixes"),
    (SyntaxKind::LONG_CLASS_SPECIFIER, "long_class_specifier"),
    (SyntaxKind::SHORT_CLASS_SPECIFIER, "short_class_specifier"),
    (SyntaxKind::DER_CLASS_SPECIFIER, "der_class_specifier"),
    (SyntaxKind::END_CLAUSE, "end_clause"),
    (SyntaxKind::ENUM_LIST, "enum_list"),
    (SyntaxKind::ENUMERATION_LITERAL, "enumeration_literal"),
    (SyntaxKind::SHORT_CLASS_DEFINITION, "short_class_definition"),
    (SyntaxKind::COMPOSITION, "composition"),
    (SyntaxKind::ELEMENT_LIST, "element_list"),
    (SyntaxKind::ELEMENT, "element"),
    (SyntaxKind::IMPORT_CLAUSE, "import_clause"),
    (SyntaxKind::IMPORT_LIST, "import_list"),
    (SyntaxKind::EXTENDS_CLAUSE, "extends_clause"),
    (SyntaxKind::CONSTRAINING_CLAUSE, "constraining_clause"),
    (SyntaxKind::EXTERNAL_CLAUSE, "external_clause"),
    (SyntaxKind::EXTERNAL_FUNCTION_CALL, "external_function_call"),
    (SyntaxKind::COMPONENT_CLAUSE, "component_clause"),
    (SyntaxKind::COMPONENT_CLAUSE1, "component_clause1"),
    (SyntaxKind::TYPE_PREFIX, "type_prefix"),
    (SyntaxKind::TYPE_SPECIFIER, "type_specifier"),
    (SyntaxKind::COMPONENT_LIST, "component_list"),
    (SyntaxKind::COMPONENT_DECLARATION, "component_declaration"),
    (SyntaxKind::COMPONENT_DECLARATION1, "component_declaration1"),
    (SyntaxKind::DECLARATION, "declaration"),
    (SyntaxKind::CONDITION_ATTRIBUTE, "condition_attribute"),
    (SyntaxKind::MODIFICATION, "modification"),
    (SyntaxKind::CLASS_MODIFICATION, "class_modification"),
    (SyntaxKind::ARGUMENT_LIST, "argument_list"),
    (SyntaxKind::ARGUMENT, "argument"),
    (SyntaxKind::ELEMENT_MODIFICATION, "element_modification"),
    (SyntaxKind::ELEMENT_REDECLARATION, "element_redeclaration"),
    (SyntaxKind::ELEMENT_REPLACEABLE, "element_replaceable"),
    (SyntaxKind::EQUATION_SECTION, "equation_section"),
    (SyntaxKind::ALGORITHM_SECTION, "algorithm_section"),
    (SyntaxKind::EQUATION, "equation"),
    (SyntaxKind::STATEMENT, "statement"),
    (SyntaxKind::IF_EQUATION, "if_equation"),
    (SyntaxKind::FOR_EQUATION, "for_equation"),
    (SyntaxKind::WHEN_EQUATION, "when_equation"),
    (SyntaxKind::IF_STATEMENT, "if_statement"),
    (SyntaxKind::FOR_STATEMENT, "for_statement"),
    (SyntaxKind::WHILE_STATEMENT, "while_statement"),
    (SyntaxKind::WHEN_STATEMENT, "when_statement"),
    (SyntaxKind::FOR_INDICES, "for_indices"),
    (SyntaxKind::FOR_INDEX, "for_index"),
    (SyntaxKind::CONNECT_CLAUSE, "connect_clause"),
    (SyntaxKind::EXPRESSION, "expression"),
    (SyntaxKind::COMPONENT_REFERENCE, "component_reference"),
    (SyntaxKind::FUNCTION_CALL_ARGS, "function_call_args"),
    (SyntaxKind::FUNCTION_ARGUMENT, "function_argument"),
    (SyntaxKind::NAMED_ARGUMENT, "named_argument"),
    (SyntaxKind::OUTPUT_EXPRESSION_LIST, "output_expression_list"),
    (SyntaxKind::ARRAY_CONSTRUCTOR, "array_constructor"),
    (SyntaxKind::ARRAY_CONCATENATION, "array_concatenation"),
    (SyntaxKind::ARRAY_SUBSCRIPTS, "array_subscripts"),
    (SyntaxKind::SUBSCRIPT, "subscript"),
    (SyntaxKind::COMMENT, "comment"),
    (SyntaxKind::STRING_COMMENT, "string_comment"),
    (SyntaxKind::ANNOTATION_CLAUSE, "annotation_clause"),
    (SyntaxKind::NAME, "name"),
    (SyntaxKind::FRAGMENT, "fragment"),
    (SyntaxKind::ERROR, "error"),
];

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ALGORITHM_KW as u16) && (self as u16) <= (Self::WITHIN_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::DOT_CARET as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IDENT | Self::UNSIGNED_INTEGER | Self::UNSIGNED_REAL | Self::STRING
        )
    }

    /// Check if this is a composite node kind
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::STORED_DEFINITION as u16) && (self as u16) <= (Self::ERROR as u16)
    }

    /// Grammar rule name of a node kind (`class_definition`, `connect_clause`, ...)
    pub fn rule_name(self) -> Option<&'static str> {
        NODE_RULE_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
    }

    /// Look up a node kind by its grammar rule name
    pub fn from_rule_name(name: &str) -> Option<Self> {
        NODE_RULE_NAMES
            .iter()
            .find(|(_, rule)| *rule == name)
            .map(|(kind, _)| *kind)
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
pub enum ModelicaLanguage {}

impl rowan::Language for ModelicaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ModelicaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ModelicaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ModelicaLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<ModelicaLanguage>;
