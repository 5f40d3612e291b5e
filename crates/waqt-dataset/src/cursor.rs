//! Character cursor and tokenizer shared by the table and city-list parsers.
//!
//! Dataset files are JavaScript-ish literals written by hand over the years.
//! The tokenizer only distinguishes what the row grammars need: quoted
//! strings, bare words and structural punctuation. Everything else is a word.

/// End-of-file sentinel character.
pub const EOF_CHAR: char = '\0';

/// A cursor over dataset text that tracks byte position and line number.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    chars: std::str::Chars<'src>,
    pos: usize,
    line: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, chars: source.chars(), pos: 0, line: 1 }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// 1-based line of the next character.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Peek at the next character without consuming it.
    #[inline]
    pub fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    /// Consume and return the next character.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Consume characters while the predicate returns true.
    #[inline]
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while !self.is_eof() && predicate(self.first()) {
            self.bump();
        }
    }

    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'src> {
    /// Contents of a `"..."` or `'...'` literal, quotes stripped.
    Str(&'src str),
    /// A string literal that never closed before end of line.
    Unterminated,
    /// Bare run of non-structural characters; a trailing `:` is dropped.
    Word(&'src str),
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Colon,
    Comma,
    Semicolon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub line: u32,
}

impl<'src> Token<'src> {
    /// The text of a string or word token.
    pub fn value(&self) -> Option<&'src str> {
        match self.kind {
            TokenKind::Str(s) | TokenKind::Word(s) => Some(s),
            _ => None,
        }
    }
}

fn is_structural(c: char) -> bool {
    matches!(c, '"' | '\'' | '[' | ']' | '{' | '}' | ',' | ';')
}

/// Streaming tokenizer over dataset text.
pub struct Tokenizer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { cursor: Cursor::new(source) }
    }

    fn string(&mut self, quote: char) -> TokenKind<'src> {
        let start = self.cursor.pos;
        loop {
            match self.cursor.first() {
                c if c == quote => {
                    let text = self.cursor.slice_from(start);
                    self.cursor.bump();
                    return TokenKind::Str(text);
                }
                '\n' => return TokenKind::Unterminated,
                EOF_CHAR if self.cursor.is_eof() => return TokenKind::Unterminated,
                '\\' => {
                    self.cursor.bump();
                    self.cursor.bump();
                }
                _ => {
                    self.cursor.bump();
                }
            }
        }
    }

    fn word(&mut self) -> TokenKind<'src> {
        let start = self.cursor.pos;
        self.cursor.eat_while(|c| !c.is_whitespace() && !is_structural(c));
        let text = self.cursor.slice_from(start);
        match text.strip_suffix(':') {
            Some("") => TokenKind::Colon,
            Some(stripped) => TokenKind::Word(stripped),
            None => TokenKind::Word(text),
        }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        self.cursor.eat_while(char::is_whitespace);
        if self.cursor.is_eof() {
            return None;
        }
        let line = self.cursor.line();
        let punct = match self.cursor.first() {
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            _ => None,
        };
        let kind = match (punct, self.cursor.first()) {
            (Some(kind), _) => {
                self.cursor.bump();
                kind
            }
            (None, quote @ ('"' | '\'')) => {
                self.cursor.bump();
                self.string(quote)
            }
            (None, _) => self.word(),
        };
        Some(Token { kind, line })
    }
}
