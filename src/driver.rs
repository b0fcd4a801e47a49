//! Glue between the command line and the compiler: reading the source, writing the
//! generated C file and handing it to a backend.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use thiserror::Error;

use crate::backend::{BackendCompiler, BackendError};
use crate::codegen::c::CCodegen;
use crate::codegen::{CodeGen, EmittedProgram, TranslationContext};
use crate::config::{CompileFlags, Config, ConfigError};
use crate::interpreter::ast_interpreter::AstInterpreter;
use crate::interpreter::{Runtime, RuntimeError};
use crate::parser::{self, ParseError, Program};

#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(
        #[from]
        ParseError,
    ),

    #[error("invalid configuration: {0}")]
    Config(
        #[from]
        ConfigError,
    ),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("backend error: {0}")]
    Backend(
        #[from]
        BackendError,
    ),

    #[error("runtime error: {0}")]
    Runtime(
        #[from]
        RuntimeError,
    ),
}

/// Run `f`, printing how long it took when `verbose` is set.
pub fn stage<T>(verbose: bool, name: &str, f: impl FnOnce() -> T) -> T {
    if !verbose {
        return f();
    }

    eprintln!("{} {}", "Starting".blue(), name.blue());
    let now = Instant::now();
    let result = f();
    eprintln!("{} {} {} {:.2?}", "Finished".green(), name.green(), "in".green(), now.elapsed());
    result
}

pub fn read_source(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

pub fn parse(source: &[u8], verbose: bool) -> Result<Program, Error> {
    let program = stage(verbose, "parsing", || parser::parse(source))?;
    if verbose {
        eprintln!(
            "{} {} bytes, {} instructions, max loop depth {}",
            "Source:".blue(),
            source.len(),
            program.instruction_count(),
            program.max_depth()
        );
    }
    Ok(program)
}

/// The pure part of the pipeline, source bytes in and C source out.
pub fn translate(source: &[u8], config: &Config) -> Result<EmittedProgram, Error> {
    let verbose = config.verbose();
    let program = parse(source, verbose)?;

    let context = TranslationContext {
        depth: 1,
        verbose,
    };
    let codegen = CCodegen::new(config.tape_size(), context);
    Ok(stage(verbose, "code generation", || codegen.generate(&program)))
}

/// Compile `input` into the executable named by the config, returning its path.
///
/// Nothing is written when the source doesn't parse.
pub fn compile_file(input: &Path, config: &Config, backend: &dyn BackendCompiler) -> Result<PathBuf, Error> {
    let verbose = config.verbose();
    let source = read_source(input)?;
    let emitted = translate(&source, config)?;

    let intermediate = config.intermediate();
    stage(verbose, "writing C source", || write_emitted(&emitted, &intermediate))?;

    let executable = config.output().to_owned();
    let compiled = stage(verbose, backend.name(), || backend.compile(&intermediate, &executable));

    if config.flags().contains(CompileFlags::REMOVE_INTERMEDIATE) {
        let removed = fs::remove_file(&intermediate);
        // the backend's diagnostics matter more than a leftover C file
        compiled?;
        removed.map_err(|source| Error::Io {
            path: intermediate.clone(),
            source,
        })?;
    } else {
        compiled?;
    }

    Ok(executable)
}

/// Run `input` with the built-in interpreter instead of compiling it.
pub fn interpret_file<R: Read, W: Write>(input: &Path, config: &Config, stdin: R, stdout: W) -> Result<(), Error> {
    let verbose = config.verbose();
    let source = read_source(input)?;
    let program = parse(&source, verbose)?;

    let mut runtime = Runtime::new(config.tape_size(), stdin, stdout);
    stage(verbose, "interpreter", || AstInterpreter::new().interpret(&mut runtime, &program))?;
    Ok(())
}

fn write_emitted(emitted: &EmittedProgram, path: &Path) -> Result<(), Error> {
    let io_error = |source| Error::Io {
        path: path.to_owned(),
        source,
    };
    let mut file = fs::File::create(path).map_err(io_error)?;
    emitted.write_to(&mut file).map_err(io_error)
}
