//! A tree-walk interpreter for Lox, a small dynamically typed language with
//! lexical scoping, first-class functions, closures and single-inheritance
//! classes. The language is the one described in the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob
//! Nystrom.
//!
//! Source text flows through four stages:
//!
//! ## Scanning
//! The [`scanner`](scanner) converts a string of characters into a flat list
//! of tokens in a single left-to-right pass. Lexical errors (an unexpected
//! character, an unterminated string) are reported as they are found and the
//! scan continues, so one run surfaces every problem in the source.
//!
//! ## Parsing
//! The [`parser`](parser) is a hand-written recursive descent parser that
//! turns the token list into a tree of [`expressions`](expr::Expr) and
//! [`statements`](stmt::Stmt). On a syntax error it reports, discards tokens
//! until the next statement boundary and keeps parsing, a technique called
//! panic-mode recovery.
//!
//! ## Resolving
//! The [`resolver`](resolver) is a static pass over the finished tree. For
//! every use of a local variable it records how many scopes separate the use
//! from the declaration; the interpreter later walks exactly that many
//! environments instead of searching by name. That distance table is what
//! makes closures behave: a function captures its defining environment by
//! reference and the recorded distances stay valid no matter where the
//! function ends up being called. The same pass rejects code that is
//! syntactically fine but semantically meaningless, like `return` at the top
//! level or `this` outside a class.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) walks the tree and evaluates it against
//! a chain of [`environments`](environment::Environment), one per active
//! scope. Runtime values are [`objects`](object::Object): nil, booleans,
//! numbers, strings, functions, classes and instances. Runtime errors carry
//! the offending token and unwind to the top of the interpreter, which
//! reports them and exits with code 70.
//!
//! The [`Lox`] driver ties the stages together behind four subcommands:
//! `tokenize`, `parse` and `evaluate` stop the pipeline early and print the
//! intermediate result, `run` executes the program.

use std::io::Write;
use std::str::FromStr;
use std::{fs, process};

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use ast::ASTPrinter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The subcommands of the interpreter binary. Each runs a prefix of the
/// pipeline and prints that stage's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Scan only; print one token per line.
    Tokenize,
    /// Scan and parse a single expression; print its AST.
    Parse,
    /// Scan, parse and evaluate a single expression; print its value.
    Evaluate,
    /// The full pipeline: scan, parse, resolve, interpret.
    Run,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokenize" => Ok(Command::Tokenize),
            "parse" => Ok(Command::Parse),
            "evaluate" => Ok(Command::Evaluate),
            "run" => Ok(Command::Run),
            _ => Err(()),
        }
    }
}

/// The interpreter driver. Program output (tokens, ASTs, values and
/// everything `print` writes) goes to the writer handed to [`Lox::new`];
/// diagnostics go to stderr.
pub struct Lox<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Lox<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(out),
        }
    }

    /// Reads the file at `path` and runs it under the given subcommand,
    /// exiting the process with the documented code if anything failed:
    /// 1 for an unreadable file, 65 for scan, parse or resolve errors,
    /// 70 for a runtime error.
    pub fn run_file(&mut self, command: Command, path: &str) {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => {
                eprintln!("Error reading file: {error}");
                process::exit(1);
            },
        };

        match command {
            Command::Tokenize => self.tokenize(&source),
            Command::Parse => self.parse(&source),
            Command::Evaluate => self.evaluate(&source),
            Command::Run => self.run(&source),
        }

        if error::did_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    /// Scans the source and prints every token, even when some of the input
    /// did not scan; the error flag still forces exit code 65 afterwards.
    pub fn tokenize(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens();

        for token in &tokens {
            writeln!(self.interpreter.out(), "{token}").expect("output stream to be writable");
        }
    }

    /// Parses the source as a single expression and prints its AST.
    pub fn parse(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens();
        if error::did_error() {
            return;
        }

        let Some(expression) = Parser::new(tokens).parse_expression() else { return; };

        let string = ASTPrinter.print(&expression);
        writeln!(self.interpreter.out(), "{string}").expect("output stream to be writable");
    }

    /// Evaluates the source as a single expression and prints its value.
    pub fn evaluate(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens();
        if error::did_error() {
            return;
        }

        let Some(expression) = Parser::new(tokens).parse_expression() else { return; };

        self.interpreter.interpret_expression(&expression);
    }

    /// Runs the source through the whole pipeline. Each stage only starts
    /// if the previous one produced no errors.
    pub fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens();
        if error::did_error() {
            return;
        }

        let statements = Parser::new(tokens).parse();
        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);
        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
