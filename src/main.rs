extern crate clap;

use std::{
    collections::HashSet,
    io::{self},
    path::PathBuf,
    process::ExitCode,
};

use cbfc::{
    backend::system::SystemCompiler,
    config::{CompileFlags, Config, DEFAULT_OUTPUT, DEFAULT_TAPE_SIZE},
    driver::{self, Error},
    lexer::lexer::Lexer,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;

/// CBFC -- C Brainf**k Compiler. Compiles Brainf**k code to a decently optimized C source
/// file, then compiles that source file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to compile
    #[arg()]
    file: PathBuf,

    /// The output executable, the C source is written next to it with a `.c` suffix
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Produce verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Size of the tape in cells
    #[arg(short = 's', long, default_value_t = DEFAULT_TAPE_SIZE)]
    tapesize: usize,

    /// Remove the C source file after compilation
    #[arg(short, long)]
    remove: bool,

    /// Compile with tcc instead of gcc (might be necessary for some large files, but
    /// execution time might be slower)
    #[arg(short, long)]
    tcc: bool,

    /// Print intermediate stages
    #[arg(long, value_enum)]
    dump: Vec<Dump>,

    /// Run the program with the built-in interpreter instead of compiling it
    #[arg(short, long)]
    interpret: bool,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Dump {
    /// Output the lexer tokens
    Tokens,
    /// Output the ast
    Ast,
    /// Output the generated C source
    Source,
}

impl Args {
    fn flags(&self) -> CompileFlags {
        let mut flags = CompileFlags::empty();
        flags.set(CompileFlags::VERBOSE, self.verbose);
        flags.set(CompileFlags::REMOVE_INTERMEDIATE, self.remove);
        flags.set(CompileFlags::ALT_BACKEND, self.tcc);
        flags
    }
}

fn dump(args: &Args, dumps: &HashSet<Dump>, config: &Config) -> Result<(), Error> {
    let source = driver::read_source(&args.file)?;

    if dumps.contains(&Dump::Tokens) {
        for token in Lexer::new(&source) {
            print!("{}", token.kind.symbol());
        }
        println!();
    }

    if dumps.contains(&Dump::Ast) {
        println!("{:#?}", driver::parse(&source, config.verbose())?);
    }

    if dumps.contains(&Dump::Source) {
        print!("{}", driver::translate(&source, config)?);
    }

    Ok(())
}

fn run(args: Args) -> Result<(), Error> {
    let config = Config::new(args.tapesize, args.flags(), args.output.clone())?;
    let dumps: HashSet<Dump> = HashSet::from_iter(args.dump.iter().cloned());

    if config.verbose() {
        eprintln!("{} {}", "Compiling".blue(), args.file.display());
    }

    if !dumps.is_empty() {
        return dump(&args, &dumps, &config);
    }

    if args.interpret {
        return driver::interpret_file(&args.file, &config, io::stdin().lock(), io::stdout().lock());
    }

    let backend = SystemCompiler::from_flags(config.flags());
    let executable = driver::compile_file(&args.file, &config, &backend)?;

    if config.verbose() {
        eprintln!("{} {}", "Wrote".green(), executable.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{0:}: {1:}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}
