use std::iter::Peekable;
use std::slice::Iter;

use crate::diagnostics::Position;

use super::{LexerTokenKind, Token};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' format / offset within the file (in bytes) */
    pub byte_offset: usize,

    bytes: Peekable<Iter<'a, u8>>,
}

impl<'a> Lexer<'a> {
    pub fn new(bytes: &'a [u8]) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            byte_offset: 0,

            bytes: bytes.iter().peekable(),
        }
    }

    /// Where the next byte would be read from, the end of input once everything is consumed
    pub fn current_position(&self) -> Position {
        Position::new(self.byte_offset, self.cur_line, self.cur_col)
    }

    fn consume_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.next()?;
        self.cur_col += 1;
        if byte == b'\n' {
            self.cur_line += 1;
            self.cur_col = 1;
        }
        self.byte_offset += 1;
        Some(byte)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let position = self.current_position();
        let byte = self.consume_byte()?;

        let kind = match LexerTokenKind::from_byte(byte) {
            Some(kind) => kind,
            None => {
                // Simplify the comment stream down to a single token
                let mut len = 1;
                while let Some(&&next) = self.bytes.peek() {
                    if LexerTokenKind::from_byte(next).is_some() {
                        break;
                    }
                    self.consume_byte();
                    len += 1;
                }
                LexerTokenKind::Comment(len)
            }
        };

        Some(Token { kind, position })
    }

    pub fn collect_tokens(&mut self) -> Vec<Token> {
        let mut v = vec![];
        while let Some(token) = self.next_token() {
            v.push(token);
        }
        v
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<LexerTokenKind> {
        Lexer::new(source.as_bytes())
            .collect_tokens()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_every_instruction() {
        assert_eq!(
            kinds("><+-.,[]"),
            vec![
                LexerTokenKind::MoveRight,
                LexerTokenKind::MoveLeft,
                LexerTokenKind::Increment,
                LexerTokenKind::Decrement,
                LexerTokenKind::Write,
                LexerTokenKind::Read,
                LexerTokenKind::LoopStart,
                LexerTokenKind::LoopEnd,
            ]
        );
    }

    #[test]
    fn groups_comments() {
        assert_eq!(
            kinds("+ hello +"),
            vec![
                LexerTokenKind::Increment,
                LexerTokenKind::Comment(7),
                LexerTokenKind::Increment,
            ]
        );
    }

    #[test]
    fn accepts_non_utf8_comments() {
        let tokens = Lexer::new(&[0xff, 0xfe, b'+']).collect_tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, LexerTokenKind::Comment(2));
        assert_eq!(tokens[1].position.offset, 2);
    }

    #[test]
    fn tracks_lines_and_columns() {
        let tokens = Lexer::new(b"+\n  [").collect_tokens();
        let open = tokens.last().unwrap();
        assert_eq!(open.kind, LexerTokenKind::LoopStart);
        assert_eq!(open.position, Position::new(4, 2, 3));
    }

    #[test]
    fn current_position_after_last_token() {
        let mut lexer = Lexer::new(b"+-\n");
        let tokens = lexer.collect_tokens();
        assert_eq!(tokens[1].position, Position::new(1, 1, 2));
        assert_eq!(tokens[2].kind, LexerTokenKind::Comment(1));
        assert_eq!(lexer.current_position(), Position::new(3, 2, 1));
        assert!(lexer.next_token().is_none());
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert!(kinds("").is_empty());
    }
}
