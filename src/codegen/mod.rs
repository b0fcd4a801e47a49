pub mod c;

use std::fmt;
use std::io;

use crate::parser::Program;

/// Read-only settings threaded through code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationContext {
    /// Indentation depth of the top-level program body
    pub depth: usize,
    pub verbose: bool,
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self {
            depth: 1,
            verbose: false,
        }
    }
}

/// The generated source, one entry per line without the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmittedProgram {
    pub lines: Vec<String>,
}

impl EmittedProgram {
    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        for line in self.lines.iter() {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}

impl fmt::Display for EmittedProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.lines.iter() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub trait CodeGen {
    fn generate(&self, program: &Program) -> EmittedProgram;
}
