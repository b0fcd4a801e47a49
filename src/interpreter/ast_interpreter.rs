use std::io::{Read, Write};

use crate::parser::{AstKind, BasicBlock, Program};

use super::{Runtime, RuntimeError};

pub struct AstInterpreter {}

impl AstInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    /// Run the program to completion.
    ///
    /// Loops are tracked on an explicit stack of `(block, next instruction)` frames so
    /// nesting depth isn't bounded by the call stack.
    pub fn interpret<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        program: &Program,
    ) -> Result<(), RuntimeError> {
        let mut frames: Vec<(&BasicBlock, usize)> = vec![(program, 0)];

        while let Some(frame) = frames.last_mut() {
            let block = frame.0;
            let pc = frame.1;

            match block.instructions.get(pc) {
                Some(instruction) => {
                    frame.1 += 1;
                    match instruction {
                        AstKind::ShiftRight(n) => runtime.shift_right(*n),
                        AstKind::ShiftLeft(n) => runtime.shift_left(*n),
                        AstKind::DerefIncrement(n) => runtime.add(*n)?,
                        AstKind::DerefDecrement(n) => runtime.sub(*n)?,
                        AstKind::Write => runtime.write()?,
                        AstKind::Read => runtime.read()?,
                        AstKind::Loop(body) => {
                            if !runtime.value_is_zero()? {
                                frames.push((body, 0));
                            }
                        }
                    }
                }
                None => {
                    frames.pop();
                    // the top-level program doesn't repeat, loop bodies do while the cell is non-zero
                    if !frames.is_empty() && !runtime.value_is_zero()? {
                        frames.push((block, 0));
                    }
                }
            }
        }

        runtime.flush()
    }
}

impl Default for AstInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
