//! Token definitions for feedmei source text
//!
//! Every source character (or greedy run of characters, for numbers and
//! identifiers) becomes exactly one [`Token`]. Single-character tokens are
//! resolved through [`punctuation_table`], so adding an instruction means
//! adding one table row rather than another match arm in the scanner.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Line/column of a token in its source file (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Closed set of token kinds.
///
/// The comparison kinds (`Greater` .. `NotEqual`) and `FunctionDeclaration`
/// are spelled with ASCII letters, which is why they can shadow the first
/// letter of what a reader might take for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    MoveLeft,
    MoveRight,
    Increment,
    Decrement,
    /// Recognised but never given semantics
    FunctionDeclaration,
    Identifier,
    LeftParen,
    RightParen,
    Number,
    PrintChar,
    PrintInt,
    ReadChar,
    ReadInt,
    Newline,
    StartLoop,
    EndLoop,
    Cleanse,
    Continue,
    /// Starts a line comment, despite the name
    Break,
    Terminate,
    IfStart,
    Greater,
    Less,
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    NotEqual,
    EndIf,
    MentionCell,
    Putch,
    EscapeCode,
    Multiply,
    Divide,
    Modulo,
    /// Any character with no meaning of its own (whitespace included)
    Unknown,
}

impl TokenKind {
    /// True for the six kinds the conditional evaluator understands.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Greater
                | TokenKind::Less
                | TokenKind::Equal
                | TokenKind::GreaterOrEqual
                | TokenKind::LessOrEqual
                | TokenKind::NotEqual
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::MoveLeft => "move-left",
            TokenKind::MoveRight => "move-right",
            TokenKind::Increment => "increment",
            TokenKind::Decrement => "decrement",
            TokenKind::FunctionDeclaration => "function-declaration",
            TokenKind::Identifier => "identifier",
            TokenKind::LeftParen => "left-paren",
            TokenKind::RightParen => "right-paren",
            TokenKind::Number => "number",
            TokenKind::PrintChar => "print-char",
            TokenKind::PrintInt => "print-int",
            TokenKind::ReadChar => "read-char",
            TokenKind::ReadInt => "read-int",
            TokenKind::Newline => "newline",
            TokenKind::StartLoop => "start-loop",
            TokenKind::EndLoop => "end-loop",
            TokenKind::Cleanse => "cleanse",
            TokenKind::Continue => "continue",
            TokenKind::Break => "break",
            TokenKind::Terminate => "terminate",
            TokenKind::IfStart => "if-start",
            TokenKind::Greater => "greater",
            TokenKind::Less => "less",
            TokenKind::Equal => "equal",
            TokenKind::GreaterOrEqual => "greater-or-equal",
            TokenKind::LessOrEqual => "less-or-equal",
            TokenKind::NotEqual => "not-equal",
            TokenKind::EndIf => "end-if",
            TokenKind::MentionCell => "mention-cell",
            TokenKind::Putch => "putch",
            TokenKind::EscapeCode => "escape-code",
            TokenKind::Multiply => "multiply",
            TokenKind::Divide => "divide",
            TokenKind::Modulo => "modulo",
            TokenKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A scanned token. `lexeme` is the exact source text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// First character of the lexeme. Lexemes are never empty.
    pub fn first_char(&self) -> Option<char> {
        self.lexeme.chars().next()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.lexeme.escape_default())
    }
}

/// Single-character instruction table.
///
/// Built on first use and shared for the life of the process.
pub fn punctuation_table() -> &'static FxHashMap<char, TokenKind> {
    static TABLE: OnceLock<FxHashMap<char, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use TokenKind::*;
        [
            ('<', MoveLeft),
            ('>', MoveRight),
            ('+', Increment),
            ('-', Decrement),
            ('f', FunctionDeclaration),
            ('(', LeftParen),
            (')', RightParen),
            ('.', PrintChar),
            ('=', PrintInt),
            (';', Break),
            (':', Terminate),
            ('?', Continue),
            ('\n', Newline),
            ('[', StartLoop),
            (']', EndLoop),
            ('#', Cleanse),
            (',', ReadChar),
            ('&', ReadInt),
            ('{', IfStart),
            ('}', EndIf),
            ('g', Greater),
            ('l', Less),
            ('e', Equal),
            ('G', GreaterOrEqual),
            ('L', LessOrEqual),
            ('n', NotEqual),
            ('$', MentionCell),
            ('@', Putch),
            ('\\', EscapeCode),
            ('*', Multiply),
            ('/', Divide),
            ('%', Modulo),
        ]
        .into_iter()
        .collect()
    })
}
