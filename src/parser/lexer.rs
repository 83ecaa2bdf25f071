//! Logos-based lexer for Modelica
//!
//! Fast tokenization using the logos crate. The lexer is lossless: trivia is
//! emitted as tokens and anything unrecognised becomes an `ERROR` token.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consume a block comment up to its closing `*/`
///
/// An unterminated comment runs to the end of input and lexes as `ERROR`.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"'([^'\\]|\\(.|\n))*'")]
    QuotedIdent,

    #[regex(r"[0-9]+")]
    UnsignedInteger,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    UnsignedReal,

    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token(":=")]
    ColonEq,
    #[token("==")]
    EqEq,
    #[token("<>")]
    Neq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token(".+")]
    DotPlus,
    #[token(".-")]
    DotMinus,
    #[token(".*")]
    DotStar,
    #[token("./")]
    DotSlash,
    #[token(".^")]
    DotCaret,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,

    // =========================================================================
    // KEYWORDS (reserved words; logos prefers tokens over the ident regex)
    // =========================================================================
    #[token("algorithm")]
    AlgorithmKw,
    #[token("and")]
    AndKw,
    #[token("annotation")]
    AnnotationKw,
    #[token("block")]
    BlockKw,
    #[token("break")]
    BreakKw,
    #[token("class")]
    ClassKw,
    #[token("connect")]
    ConnectKw,
    #[token("connector")]
    ConnectorKw,
    #[token("constant")]
    ConstantKw,
    #[token("constrainedby")]
    ConstrainedbyKw,
    #[token("der")]
    DerKw,
    #[token("discrete")]
    DiscreteKw,
    #[token("each")]
    EachKw,
    #[token("else")]
    ElseKw,
    #[token("elseif")]
    ElseifKw,
    #[token("elsewhen")]
    ElsewhenKw,
    #[token("encapsulated")]
    EncapsulatedKw,
    #[token("end")]
    EndKw,
    #[token("enumeration")]
    EnumerationKw,
    #[token("equation")]
    EquationKw,
    #[token("expandable")]
    ExpandableKw,
    #[token("extends")]
    ExtendsKw,
    #[token("external")]
    ExternalKw,
    #[token("false")]
    FalseKw,
    #[token("final")]
    FinalKw,
    #[token("flow")]
    FlowKw,
    #[token("for")]
    ForKw,
    #[token("function")]
    FunctionKw,
    #[token("if")]
    IfKw,
    #[token("import")]
    ImportKw,
    #[token("impure")]
    ImpureKw,
    #[token("in")]
    InKw,
    #[token("initial")]
    InitialKw,
    #[token("inner")]
    InnerKw,
    #[token("input")]
    InputKw,
    #[token("loop")]
    LoopKw,
    #[token("model")]
    ModelKw,
    #[token("not")]
    NotKw,
    #[token("operator")]
    OperatorKw,
    #[token("or")]
    OrKw,
    #[token("outer")]
    OuterKw,
    #[token("output")]
    OutputKw,
    #[token("package")]
    PackageKw,
    #[token("parameter")]
    ParameterKw,
    #[token("partial")]
    PartialKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("pure")]
    PureKw,
    #[token("record")]
    RecordKw,
    #[token("redeclare")]
    RedeclareKw,
    #[token("replaceable")]
    ReplaceableKw,
    #[token("return")]
    ReturnKw,
    #[token("stream")]
    StreamKw,
    #[token("then")]
    ThenKw,
    #[token("true")]
    TrueKw,
    #[token("type")]
    TypeKw,
    #[token("when")]
    WhenKw,
    #[token("while")]
    WhileKw,
    #[token("within")]
    WithinKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident | QuotedIdent => SyntaxKind::IDENT,
            UnsignedInteger => SyntaxKind::UNSIGNED_INTEGER,
            UnsignedReal => SyntaxKind::UNSIGNED_REAL,
            String => SyntaxKind::STRING,

            // Multi-char punctuation
            ColonEq => SyntaxKind::COLON_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            Neq => SyntaxKind::NEQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            DotPlus => SyntaxKind::DOT_PLUS,
            DotMinus => SyntaxKind::DOT_MINUS,
            DotStar => SyntaxKind::DOT_STAR,
            DotSlash => SyntaxKind::DOT_SLASH,
            DotCaret => SyntaxKind::DOT_CARET,

            // Single-char punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Semicolon => SyntaxKind::SEMICOLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Colon => SyntaxKind::COLON,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Caret => SyntaxKind::CARET,

            // Keywords
            AlgorithmKw => SyntaxKind::ALGORITHM_KW,
            AndKw => SyntaxKind::AND_KW,
            AnnotationKw => SyntaxKind::ANNOTATION_KW,
            BlockKw => SyntaxKind::BLOCK_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ConnectKw => SyntaxKind::CONNECT_KW,
            ConnectorKw => SyntaxKind::CONNECTOR_KW,
            ConstantKw => SyntaxKind::CONSTANT_KW,
            ConstrainedbyKw => SyntaxKind::CONSTRAINEDBY_KW,
            DerKw => SyntaxKind::DER_KW,
            DiscreteKw => SyntaxKind::DISCRETE_KW,
            EachKw => SyntaxKind::EACH_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ElseifKw => SyntaxKind::ELSEIF_KW,
            ElsewhenKw => SyntaxKind::ELSEWHEN_KW,
            EncapsulatedKw => SyntaxKind::ENCAPSULATED_KW,
            EndKw => SyntaxKind::END_KW,
            EnumerationKw => SyntaxKind::ENUMERATION_KW,
            EquationKw => SyntaxKind::EQUATION_KW,
            ExpandableKw => SyntaxKind::EXPANDABLE_KW,
            ExtendsKw => SyntaxKind::EXTENDS_KW,
            ExternalKw => SyntaxKind::EXTERNAL_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            FinalKw => SyntaxKind::FINAL_KW,
            FlowKw => SyntaxKind::FLOW_KW,
            ForKw => SyntaxKind::FOR_KW,
            FunctionKw => SyntaxKind::FUNCTION_KW,
            IfKw => SyntaxKind::IF_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            ImpureKw => SyntaxKind::IMPURE_KW,
            InKw => SyntaxKind::IN_KW,
            InitialKw => SyntaxKind::INITIAL_KW,
            InnerKw => SyntaxKind::INNER_KW,
            InputKw => SyntaxKind::INPUT_KW,
            LoopKw => SyntaxKind::LOOP_KW,
            ModelKw => SyntaxKind::MODEL_KW,
            NotKw => SyntaxKind::NOT_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            OrKw => SyntaxKind::OR_KW,
            OuterKw => SyntaxKind::OUTER_KW,
            OutputKw => SyntaxKind::OUTPUT_KW,
            PackageKw => SyntaxKind::PACKAGE_KW,
            ParameterKw => SyntaxKind::PARAMETER_KW,
            PartialKw => SyntaxKind::PARTIAL_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            PureKw => SyntaxKind::PURE_KW,
            RecordKw => SyntaxKind::RECORD_KW,
            RedeclareKw => SyntaxKind::REDECLARE_KW,
            ReplaceableKw => SyntaxKind::REPLACEABLE_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            StreamKw => SyntaxKind::STREAM_KW,
            ThenKw => SyntaxKind::THEN_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TypeKw => SyntaxKind::TYPE_KW,
            WhenKw => SyntaxKind::WHEN_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            WithinKw => SyntaxKind::WITHIN_KW,
        }
    }
}
