use fgj_ast::Span;
use crate::token::{Token, TokenKind};

/// The lexer/tokenizer for FGJ source text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current_pos: usize,
    current_char: Option<char>,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer from source code.
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let current_char = chars.next().map(|(_, c)| c);
        Self {
            source,
            chars,
            current_pos: 0,
            current_char,
            line: 1,
        }
    }

    /// Tokenizes the entire source code and returns all tokens.
    ///
    /// The last token is always `Eof`. Lexical errors are reported in-band as
    /// `Error` tokens whose value is the message.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Gets the next token from the source.
    pub fn next_token(&mut self) -> Token {
        if let Some(error_token) = self.skip_whitespace_and_comments() {
            return error_token;
        }

        let start = self.current_pos;
        let line = self.line;

        match self.current_char {
            None => Token::new(TokenKind::Eof, Span::new(start, start), line, String::new()),
            Some(ch) => match ch {
                'a'..='z' | 'A'..='Z' | '_' => self.read_identifier_or_keyword(),

                '{' => self.single(TokenKind::LBrace, ch),
                '}' => self.single(TokenKind::RBrace, ch),
                '(' => self.single(TokenKind::LParen, ch),
                ')' => self.single(TokenKind::RParen, ch),
                '=' => self.single(TokenKind::Eq, ch),
                '.' => self.single(TokenKind::Dot, ch),
                ',' => self.single(TokenKind::Comma, ch),
                ';' => self.single(TokenKind::Semicolon, ch),
                '<' => self.single(TokenKind::Lt, ch),
                '>' => self.single(TokenKind::Gt, ch),

                _ => {
                    self.advance();
                    Token::new(
                        TokenKind::Error,
                        Span::new(start, self.current_pos),
                        line,
                        format!("unexpected character '{}'", ch),
                    )
                }
            },
        }
    }

    // Helper methods

    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        let start = self.current_pos;
        let line = self.line;
        self.advance();
        Token::new(kind, Span::new(start, self.current_pos), line, ch.to_string())
    }

    fn advance(&mut self) {
        if self.current_char == Some('\n') {
            self.line += 1;
        }
        if let Some((pos, ch)) = self.chars.next() {
            self.current_pos = pos;
            self.current_char = Some(ch);
        } else {
            self.current_pos = self.source.len();
            self.current_char = None;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next().map(|(_, c)| c)
    }

    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            match self.current_char {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek() == Some('/') {
                        self.skip_single_line_comment();
                    } else if self.peek() == Some('*') {
                        let start = self.current_pos;
                        let line = self.line;
                        if !self.skip_multi_line_comment() {
                            return Some(Token::new(
                                TokenKind::Error,
                                Span::new(start, self.current_pos),
                                line,
                                "unterminated comment".to_string(),
                            ));
                        }
                    } else {
                        let start = self.current_pos;
                        let line = self.line;
                        self.advance();
                        return Some(Token::new(
                            TokenKind::Error,
                            Span::new(start, self.current_pos),
                            line,
                            "invalid character after '/'".to_string(),
                        ));
                    }
                }
                _ => break,
            }
        }
        None
    }

    fn skip_single_line_comment(&mut self) {
        // Skip //
        self.advance();
        self.advance();

        while let Some(ch) = self.current_char {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_multi_line_comment(&mut self) -> bool {
        // Skip /*
        self.advance();
        self.advance();

        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek() == Some('/') {
                self.advance(); // *
                self.advance(); // /
                return true;
            }
            self.advance();
        }
        false // Unterminated
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let start = self.current_pos;
        let line = self.line;
        let mut value = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match value.as_str() {
            "class" => TokenKind::Class,
            "extends" => TokenKind::Extends,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "return" => TokenKind::Return,
            "new" => TokenKind::New,
            _ => TokenKind::Identifier,
        };

        Token::new(kind, Span::new(start, self.current_pos), line, value)
    }
}
