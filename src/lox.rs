use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::error::Diagnostics;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;
use crate::token::Token;

/// Worst failure class seen while running a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    CompileError,
    RuntimeError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,

            ExitStatus::CompileError => 65,

            ExitStatus::RuntimeError => 70,
        }
    }
}

pub fn run_file(path: &Path) -> anyhow::Result<ExitStatus> {
    let source: String = fs::read_to_string(path)
        .with_context(|| format!("could not read script {}", path.display()))?;

    let mut interpreter = Interpreter::new(io::stdout());

    Ok(run(&source, &mut interpreter))
}

pub fn run_prompt() -> anyhow::Result<()> {
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        // Each prompt line is a fresh compile-and-run; globals do not
        // persist between lines.
        let mut interpreter = Interpreter::new(io::stdout());
        run(&line, &mut interpreter);
    }

    Ok(())
}

/// Runs one program through the full pipeline.  Compile diagnostics and
/// runtime errors are written to stderr; `print` output goes through the
/// interpreter's sink.
pub fn run<W: Write>(source: &str, interpreter: &mut Interpreter<W>) -> ExitStatus {
    let mut diagnostics = Diagnostics::new();

    let mut tokens: Vec<Token> = Vec::new();
    for result in Scanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),

            Err(e) => diagnostics.report(e),
        }
    }

    let statements: Vec<Stmt> = Parser::new(tokens, &mut diagnostics).parse();

    // Any scan or parse error suppresses resolution and execution.
    if diagnostics.had_error() {
        report_all(&diagnostics);
        return ExitStatus::CompileError;
    }

    let locals = Resolver::new(&mut diagnostics).resolve(&statements);

    if diagnostics.had_error() {
        report_all(&diagnostics);
        return ExitStatus::CompileError;
    }

    interpreter.update_locals(locals);

    match interpreter.interpret(&statements) {
        Ok(()) => ExitStatus::Success,

        Err(e) => {
            eprintln!("{}", e);
            ExitStatus::RuntimeError
        }
    }
}

fn report_all(diagnostics: &Diagnostics) {
    info!("Reporting {} diagnostic(s)", diagnostics.errors().len());

    for error in diagnostics.errors() {
        eprintln!("{}", error);
    }
}
