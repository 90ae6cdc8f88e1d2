use std::{
  fs,
  io::{self, Write},
};

use diagnostic::{diagnostic::Diagnostic, diagnostic_code::DiagnosticCode, DiagnosticEngine};
use logger::{LogType, Logger};
use parser::Parser;
use scanner::Scanner;

use crate::interpreter::Interpreter;

/// Result of running one program against the diagnostic engine, distinct
/// enough for the driver to pick an exit code (§6: 65 for any syntax error,
/// 70 for a runtime error, 0 otherwise).
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
  Ok,
  SyntaxError,
  RuntimeError,
  /// The script path couldn't be read. Kept distinct from `SyntaxError`
  /// because it's a driver failure, not a property of the program text, and
  /// maps to its own exit code (66) outside the spec's 0/64/65/70 table.
  FileNotFound,
}

/// Orchestrates REPL and file execution. Grounded in the teacher's `Runner`
/// (`interputer/src/runner.rs`), trimmed of the non-spec `exit` REPL
/// shortcut and the stage-by-stage debug printing, and split so file mode
/// can tell a syntax failure apart from a runtime one.
pub struct Runner;

impl Runner {
  pub fn new() -> Self {
    Self
  }

  /// Prompts `> `, reads one line at a time, and executes each as a
  /// complete program. The syntax-error flag resets every iteration; the
  /// globals environment persists across the whole session. EOF on stdin
  /// exits normally.
  pub fn run_interactive_mode(&mut self, engine: &mut DiagnosticEngine) {
    Logger::log(LogType::Info("starting REPL session"), 0);
    let mut interpreter = Interpreter::new();

    loop {
      engine.clear();

      print!("> ");
      io::stdout().flush().ok();

      let mut line = String::new();
      let bytes_read = io::stdin().read_line(&mut line).unwrap_or(0);

      if bytes_read == 0 {
        println!();
        break;
      }

      self.run_source(&mut interpreter, &line, engine);
    }
  }

  /// Reads `path` and executes its contents as a single program.
  pub fn run_file(&mut self, path: &str, engine: &mut DiagnosticEngine) -> Outcome {
    let source = match fs::read_to_string(path) {
      Ok(source) => source,
      Err(err) => {
        Logger::log(LogType::Error(&format!("could not read file '{}': {}", path, err)), 0);
        engine.emit(Diagnostic::new(DiagnosticCode::FileNotFound, format!("could not read file: {}", path)));
        engine.print_lox();
        return Outcome::FileNotFound;
      },
    };

    let mut interpreter = Interpreter::new();
    self.run_source(&mut interpreter, &source, engine)
  }

  fn run_source(&mut self, interpreter: &mut Interpreter, source: &str, engine: &mut DiagnosticEngine) -> Outcome {
    let mut scanner = Scanner::new(source.to_string());
    scanner.scan(engine);

    if engine.has_errors() {
      engine.print_lox();
      return Outcome::SyntaxError;
    }

    let mut parser = Parser::new(scanner.tokens);
    let statements = parser.parse(engine);

    if engine.has_errors() {
      engine.print_lox();
      return Outcome::SyntaxError;
    }

    interpreter.run(&statements, engine);

    if engine.has_errors() {
      for diagnostic in engine.get_diagnostics() {
        engine.print_lox_runtime(diagnostic);
      }
      return Outcome::RuntimeError;
    }

    Outcome::Ok
  }
}
