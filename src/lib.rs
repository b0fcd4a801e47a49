//! cbfc translates Brainf**k into C and hands the result to a C compiler.
//!
//!  - the source is lexed into [lexer::Token]s, comments included
//!  - the [parser] collapses runs of `+ - > <` and resolves loops into a tree
//!  - [codegen] renders the tree as an indented C program around a zeroed tape
//!  - the [driver] writes the C file and invokes a [backend::BackendCompiler]
//!
//! The [interpreter] runs the same tree under the generated program's runtime contract.

pub mod backend;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod interpreter;
pub mod lexer;
pub mod parser;

pub use crate::codegen::EmittedProgram;
pub use crate::config::{CompileFlags, Config};
pub use crate::driver::{compile_file, translate, Error};
pub use crate::parser::{parse, resolve_loop_body, AstKind, BasicBlock, ParseError, Program};
