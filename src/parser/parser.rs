use std::iter::Peekable;
use std::mem;

use crate::diagnostics::{Position, Span};
use crate::lexer::{LexerTokenKind, Token};

use super::{AstKind, BasicBlock, ParseError, Program};

/// Where the parser was started, decides what an unmatched `]` means.
#[derive(Debug, Clone, Copy)]
enum Scope {
    /// A whole program, a stray `]` is an error
    Program,
    /// The body of a loop whose `[` came before the tokens, the first unmatched `]` ends it
    LoopBody,
}

pub struct Parser<'a> {
    tokens: Peekable<std::slice::Iter<'a, Token>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens: tokens.iter().peekable(),
        }
    }

    /// Consume the rest of a run of `kind`, the first token has already been taken.
    fn collapse_run(&mut self, kind: LexerTokenKind) -> usize {
        let mut count = 1;
        while self.tokens.next_if(|token| token.kind == kind).is_some() {
            count += 1;
        }
        count
    }

    /// Returns the instructions parsed and, when the scope was ended by a `]`, its position.
    fn parse_block(&mut self, scope: Scope) -> Result<(Vec<AstKind>, Option<Position>), ParseError> {
        let mut instructions = vec![];
        // bodies of the loops we are currently inside, with the position of their `[`
        let mut open_loops: Vec<(Vec<AstKind>, Position)> = vec![];

        while let Some(token) = self.tokens.next() {
            let instruction = match token.kind {
                LexerTokenKind::MoveRight => AstKind::ShiftRight(self.collapse_run(token.kind)),
                LexerTokenKind::MoveLeft => AstKind::ShiftLeft(self.collapse_run(token.kind)),
                LexerTokenKind::Increment => AstKind::DerefIncrement(self.collapse_run(token.kind)),
                LexerTokenKind::Decrement => AstKind::DerefDecrement(self.collapse_run(token.kind)),
                LexerTokenKind::Write => AstKind::Write,
                LexerTokenKind::Read => AstKind::Read,
                LexerTokenKind::LoopStart => {
                    open_loops.push((mem::take(&mut instructions), token.position));
                    continue;
                }
                LexerTokenKind::LoopEnd => match open_loops.pop() {
                    Some((parent, start)) => {
                        let body = mem::replace(&mut instructions, parent);
                        AstKind::Loop(BasicBlock::new(
                            body,
                            Some(Span {
                                start,
                                end: token.position,
                            }),
                        ))
                    }
                    None => match scope {
                        Scope::Program => {
                            return Err(ParseError::UnmatchedClose {
                                position: token.position,
                            })
                        }
                        Scope::LoopBody => return Ok((instructions, Some(token.position))),
                    },
                },
                // comments don't make it into the AST
                LexerTokenKind::Comment(_) => continue,
            };
            instructions.push(instruction);
        }

        // report the innermost loop that was left open
        if let Some((_, position)) = open_loops.pop() {
            return Err(ParseError::UnmatchedOpen { position });
        }

        Ok((instructions, None))
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let (instructions, _) = self.parse_block(Scope::Program)?;
        Ok(BasicBlock::new(instructions, None))
    }

    /// Parse the tokens following a `[` up to its matching `]`, returning the body and the
    /// position of that `]`. `end_of_input` is reported when the tokens run out first.
    pub fn parse_loop_body(&mut self, end_of_input: Position) -> Result<(BasicBlock, Position), ParseError> {
        let (instructions, close) = self.parse_block(Scope::LoopBody)?;
        let close = close.ok_or(ParseError::MissingLoopEnd {
            position: end_of_input,
        })?;
        Ok((BasicBlock::new(instructions, None), close))
    }
}
