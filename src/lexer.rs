//! Lossless tokenizer for the Drools rule language.
//!
//! The lexer walks a `[start, end)` window of a text buffer once, left to
//! right, classifying each position against a fixed priority order:
//! whitespace, comment, string, number, keyword, identifier, operator,
//! punctuation, and finally a one-character bad token. The produced tokens
//! cover the window exactly, with no gaps or overlaps, so concatenating
//! their source spans reproduces the input.
//!
//! The cursor API is restartable: `restart` re-positions the lexer at any
//! valid offset inside the buffer, which is what incremental editors need to
//! re-lex only a changed subrange.

use crate::catalog::KEYWORDS;
use serde::{Deserialize, Serialize};

/// Lexical classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Whitespace,
    Comment,
    String,
    Number,
    Keyword,
    Identifier,
    Operator,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Dollar,
    Bad,
}

impl TokenKind {
    /// Check if this is a bracket token
    pub fn is_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen
                | TokenKind::RightParen
                | TokenKind::LeftBrace
                | TokenKind::RightBrace
                | TokenKind::LeftBracket
                | TokenKind::RightBracket
        )
    }

    /// Check if this token carries no syntactic meaning
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

/// A token with its byte offsets into the source, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// The source text covered by this token
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Tokens are never empty; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Restartable single-pass lexer over a text window
pub struct Lexer<'a> {
    buffer: &'a str,
    end_offset: usize,
    offset: usize,
    token_kind: Option<TokenKind>,
    token_start: usize,
    token_end: usize,
}

impl<'a> Lexer<'a> {
    /// Lex the whole buffer
    pub fn new(buffer: &'a str) -> Self {
        Self::with_range(buffer, 0, buffer.len())
    }

    /// Lex the `[start_offset, end_offset)` window of the buffer.
    ///
    /// Both offsets must lie on character boundaries.
    pub fn with_range(buffer: &'a str, start_offset: usize, end_offset: usize) -> Self {
        debug_assert!(buffer.is_char_boundary(start_offset));
        debug_assert!(buffer.is_char_boundary(end_offset));
        debug_assert!(start_offset <= end_offset && end_offset <= buffer.len());

        let mut lexer = Self {
            buffer,
            end_offset,
            offset: start_offset,
            token_kind: None,
            token_start: start_offset,
            token_end: start_offset,
        };
        lexer.advance();
        lexer
    }

    /// Re-position the lexer at an arbitrary offset for incremental re-lexing
    pub fn restart(&mut self, start_offset: usize) {
        debug_assert!(self.buffer.is_char_boundary(start_offset));
        self.offset = start_offset;
        self.advance();
    }

    /// Kind of the current token, or `None` past the end of the window
    pub fn token_kind(&self) -> Option<TokenKind> {
        self.token_kind
    }

    /// Start offset of the current token
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// End offset (exclusive) of the current token
    pub fn token_end(&self) -> usize {
        self.token_end
    }

    /// The current token, or `None` past the end of the window
    pub fn token(&self) -> Option<Token> {
        self.token_kind.map(|kind| Token {
            kind,
            start: self.token_start,
            end: self.token_end,
        })
    }

    /// End offset of the lexed window
    pub fn buffer_end(&self) -> usize {
        self.end_offset
    }

    /// The underlying buffer
    pub fn buffer(&self) -> &'a str {
        self.buffer
    }

    /// Move to the next token, or signal end-of-stream via `token_kind()`
    pub fn advance(&mut self) {
        if self.offset >= self.end_offset {
            self.token_kind = None;
            return;
        }

        let rest = &self.buffer[self.offset..self.end_offset];
        let (kind, len) = classify(rest);
        debug_assert!(len > 0);

        self.token_start = self.offset;
        self.token_end = self.offset + len;
        self.token_kind = Some(kind);
        self.offset = self.token_end;
    }
}

impl<'a> IntoIterator for Lexer<'a> {
    type Item = Token;
    type IntoIter = Tokens<'a>;

    fn into_iter(self) -> Tokens<'a> {
        Tokens { lexer: self }
    }
}

/// Lazy token iterator over a lexer window
pub struct Tokens<'a> {
    lexer: Lexer<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.lexer.token()?;
        self.lexer.advance();
        Some(token)
    }
}

/// Lex a whole buffer into a vector of tokens
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).into_iter().collect()
}

/// Classify the token starting at the beginning of `rest`.
///
/// Returns the kind and byte length; `rest` is non-empty. First match in the
/// fixed priority order wins.
fn classify(rest: &str) -> (TokenKind, usize) {
    // Safe: rest is non-empty
    let first = match rest.chars().next() {
        Some(c) => c,
        None => return (TokenKind::Bad, 1),
    };

    if first.is_whitespace() {
        return (TokenKind::Whitespace, scan_whitespace(rest));
    }

    if rest.starts_with("//") || rest.starts_with("/*") {
        return (TokenKind::Comment, scan_comment(rest));
    }

    if first == '"' {
        return (TokenKind::String, scan_string(rest));
    }

    if first.is_ascii_digit() {
        if let Some(len) = scan_number(rest) {
            return (TokenKind::Number, len);
        }
    }

    if first.is_ascii_alphabetic() {
        if let Some(len) = scan_keyword(rest) {
            return (TokenKind::Keyword, len);
        }
    }

    if first.is_ascii_alphabetic() || first == '_' {
        return (TokenKind::Identifier, scan_identifier(rest));
    }

    if first.is_ascii() && is_operator_byte(first as u8) {
        return (TokenKind::Operator, scan_operator(rest));
    }

    let punct = match first {
        '(' => Some(TokenKind::LeftParen),
        ')' => Some(TokenKind::RightParen),
        '{' => Some(TokenKind::LeftBrace),
        '}' => Some(TokenKind::RightBrace),
        '[' => Some(TokenKind::LeftBracket),
        ']' => Some(TokenKind::RightBracket),
        ';' => Some(TokenKind::Semicolon),
        ',' => Some(TokenKind::Comma),
        '.' => Some(TokenKind::Dot),
        ':' => Some(TokenKind::Colon),
        '$' => Some(TokenKind::Dollar),
        _ => None,
    };
    if let Some(kind) = punct {
        return (kind, 1);
    }

    // One full character, so multi-byte input still advances
    (TokenKind::Bad, first.len_utf8())
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn followed_by_word(bytes: &[u8], index: usize) -> bool {
    index < bytes.len() && is_word_byte(bytes[index])
}

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'=' | b'<' | b'>' | b'!' | b'&' | b'|'
    )
}

fn scan_whitespace(rest: &str) -> usize {
    rest.char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(rest.len())
}

/// Line comments run to the newline; block comments to `*/`. Either form
/// unterminated consumes to the end of the window.
fn scan_comment(rest: &str) -> usize {
    if let Some(body) = rest.strip_prefix("//") {
        return match body.find('\n') {
            Some(i) => 2 + i,
            None => rest.len(),
        };
    }
    match rest[2..].find("*/") {
        Some(i) => 2 + i + 2,
        None => rest.len(),
    }
}

/// A quoted literal with backslash escapes. Unterminated strings consume to
/// the end of the window and are still emitted as strings.
fn scan_string(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i = (i + 2).min(bytes.len()),
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Whether a lexed string literal ends with a genuine closing quote.
///
/// An unterminated literal consumes to the end of its window, so the last
/// character may be anything; and a trailing `\"` is an escaped quote, not
/// a terminator, which the trailing-backslash parity distinguishes.
pub fn is_closed_string(literal: &str) -> bool {
    if literal.len() < 2 || !literal.ends_with('"') {
        return false;
    }
    let body = &literal.as_bytes()[1..literal.len() - 1];
    let trailing_backslashes = body.iter().rev().take_while(|&&b| b == b'\\').count();
    trailing_backslashes % 2 == 0
}

/// `\d+(\.\d+)?` with word boundaries on both sides. If the fractional part
/// is present but runs into a word character, the integer part alone is
/// taken, mirroring greedy-match backtracking.
fn scan_number(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_end = i;

    let mut end = int_end;
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            end = j;
        }
    }

    if !followed_by_word(bytes, end) {
        return Some(end);
    }
    if end > int_end {
        // The boundary after the integer part is the dot, which always holds
        return Some(int_end);
    }
    None
}

/// Longest keyword match ending at a word boundary
fn scan_keyword(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut best = 0;
    for keyword in KEYWORDS {
        if keyword.len() > best
            && rest.starts_with(keyword)
            && !followed_by_word(bytes, keyword.len())
        {
            best = keyword.len();
        }
    }
    (best > 0).then_some(best)
}

fn scan_identifier(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() && is_word_byte(bytes[i]) {
        i += 1;
    }
    i
}

fn scan_operator(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() && is_operator_byte(bytes[i]) {
        i += 1;
    }
    i
}
