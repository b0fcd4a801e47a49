use std::fmt;
use std::mem;

use thiserror::Error;

use crate::diagnostics::{Position, Span};
use crate::lexer::lexer::Lexer;

use self::parser::Parser;

pub mod parser;

/// A single instruction after runs have been collapsed.
///
/// The counts of the shift and deref variants are the length of the run they replace
/// and are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstKind {
    ShiftRight(usize),
    ShiftLeft(usize),

    DerefIncrement(usize),
    DerefDecrement(usize),

    Write,
    Read,

    Loop(BasicBlock),
}

#[derive(Clone, PartialEq, Eq, Default)]
pub struct BasicBlock {
    pub instructions: Vec<AstKind>,
    /// Brackets around the block, `None` for the top-level program
    pub span: Option<Span>,
}

pub type Program = BasicBlock;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unmatched '[' at {position}, this loop is never closed")]
    UnmatchedOpen { position: Position },

    #[error("unmatched ']' at {position}, there is no open loop to close")]
    UnmatchedClose { position: Position },

    #[error("reached the end of input at {position} while looking for the ']' closing this loop")]
    MissingLoopEnd { position: Position },
}

impl BasicBlock {
    pub fn new(instructions: Vec<AstKind>, span: Option<Span>) -> Self {
        Self { instructions, span }
    }

    /// Number of source bytes between the brackets of this block.
    pub fn consumed_len(&self) -> Option<usize> {
        self.span.map(|span| span.inner_len())
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![self.instructions.iter()],
        }
    }

    /// Total number of instructions, loops included, at every depth
    pub fn instruction_count(&self) -> usize {
        self.walk()
            .filter(|event| matches!(event, Event::Instruction(..)))
            .count()
    }

    /// Deepest loop nesting, 0 for a program without loops
    pub fn max_depth(&self) -> usize {
        self.walk()
            .filter_map(|event| match event {
                Event::Instruction(AstKind::Loop(_), depth) => Some(depth + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// One line per instruction, prefixed with its loop depth rather than indented.
impl fmt::Debug for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "Block {}-{}", span.start, span.end)?,
            None => write!(f, "Block")?,
        }

        for event in self.walk() {
            match event {
                Event::Instruction(AstKind::Loop(body), depth) => {
                    write!(f, "\n{} Loop", depth)?;
                    if let Some(span) = body.span {
                        write!(f, " {}-{}", span.start, span.end)?;
                    }
                }
                Event::Instruction(instruction, depth) => write!(f, "\n{} {:?}", depth, instruction)?,
                Event::LoopEnd(_) => {}
            }
        }
        Ok(())
    }
}

// Nesting is only limited by memory, so the default recursive drop could blow the stack.
impl Drop for BasicBlock {
    fn drop(&mut self) {
        let mut pending = vec![mem::take(&mut self.instructions)];
        while let Some(instructions) = pending.pop() {
            for instruction in instructions {
                if let AstKind::Loop(mut body) = instruction {
                    pending.push(mem::take(&mut body.instructions));
                }
            }
        }
    }
}

/// A step of a depth-first walk over a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// An instruction and the number of loops around it
    Instruction(&'a AstKind, usize),
    /// The body of a loop at the given depth has finished
    LoopEnd(usize),
}

/// Depth-first walk over a block using an explicit stack.
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, AstKind>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let current = self.stack.last_mut()?;
            match current.next() {
                Some(instruction) => {
                    if let AstKind::Loop(body) = instruction {
                        self.stack.push(body.instructions.iter());
                    }
                    return Some(Event::Instruction(instruction, depth));
                }
                None => {
                    self.stack.pop();
                    if !self.stack.is_empty() {
                        return Some(Event::LoopEnd(depth - 1));
                    }
                }
            }
        }
    }
}

/// Parse a whole program, every bracket has to be matched.
pub fn parse(source: &[u8]) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).collect_tokens();
    Parser::new(&tokens).parse_program()
}

/// Parse a loop body, `suffix` starts right after the opening `[`.
///
/// Returns the body and how many bytes it spans, which is the offset of the matching `]`
/// within `suffix`. Positions in errors are relative to `suffix`.
pub fn resolve_loop_body(suffix: &[u8]) -> Result<(BasicBlock, usize), ParseError> {
    let mut lexer = Lexer::new(suffix);
    let tokens = lexer.collect_tokens();

    let (body, close) = Parser::new(&tokens).parse_loop_body(lexer.current_position())?;
    Ok((body, close.offset))
}
