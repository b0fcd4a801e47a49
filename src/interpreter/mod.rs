pub mod ast_interpreter;

use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("cursor ({cursor}) out of bounds (tape has {tape_size} cells)")]
    CursorOutOfBounds { cursor: usize, tape_size: usize },

    #[error("IO Error")]
    Io(
        #[from]
        io::Error,
    ),
}

/// Runs instructions under the same contract as the generated C program:
/// a zeroed tape of `u8` cells, wrapping arithmetic and a cursor starting at cell 0.
pub struct Runtime<R, W> {
    /// Index of the current cell
    cursor: usize,

    /// Our statically allocated tape
    tape: Vec<u8>,

    input: R,
    output: W,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(tape_size: usize, input: R, output: W) -> Self {
        Self {
            cursor: 0,
            tape: vec![0; tape_size],
            input,
            output,
        }
    }

    pub fn reset(&mut self) {
        self.tape.iter_mut().for_each(|cell| *cell = 0);
        self.cursor = 0;
    }

    /// Read one byte into the current cell, the cell is left alone at end of input
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        self.check_cursor()?;
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    self.tape[self.cursor] = byte[0];
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Write the current cell to the output
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        self.check_cursor()?;
        self.output.write_all(&self.tape[self.cursor..=self.cursor])?;
        Ok(())
    }

    pub fn add(&mut self, by: usize) -> Result<(), RuntimeError> {
        self.check_cursor()?;
        // only the low byte matters once we wrap around
        self.tape[self.cursor] = self.tape[self.cursor].wrapping_add(by as u8);
        Ok(())
    }

    pub fn sub(&mut self, by: usize) -> Result<(), RuntimeError> {
        self.check_cursor()?;
        self.tape[self.cursor] = self.tape[self.cursor].wrapping_sub(by as u8);
        Ok(())
    }

    pub fn shift_right(&mut self, by: usize) {
        // we don't check that the cursor is valid on shifts
        // only once a cell is read/written
        self.cursor = self.cursor.wrapping_add(by);
    }

    pub fn shift_left(&mut self, by: usize) {
        self.cursor = self.cursor.wrapping_sub(by);
    }

    /// is the value under the cursor zero?
    pub fn value_is_zero(&self) -> Result<bool, RuntimeError> {
        self.check_cursor()?;
        Ok(self.tape[self.cursor] == 0)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.output.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn check_cursor(&self) -> Result<(), RuntimeError> {
        if self.cursor >= self.tape.len() {
            return Err(RuntimeError::CursorOutOfBounds {
                cursor: self.cursor,
                tape_size: self.tape.len(),
            });
        }
        Ok(())
    }
}
