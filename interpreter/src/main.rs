use colored::*;
use diagnostic::DiagnosticEngine;
use interpreter::runner::{Outcome, Runner};

fn main() {
  let args: Vec<String> = std::env::args().collect();

  let mut diagnostic = DiagnosticEngine::new();
  let mut runner = Runner::new();

  let exit_code = match args.len() {
    1 => {
      eprintln!("{}", "Running the interactive mode".cyan().bold());
      runner.run_interactive_mode(&mut diagnostic);
      0
    },
    2 => {
      eprintln!("{}", format!("Running file: {}", args[1]).cyan().bold());
      match runner.run_file(&args[1], &mut diagnostic) {
        Outcome::Ok => 0,
        Outcome::SyntaxError => 65,
        Outcome::RuntimeError => 70,
        Outcome::FileNotFound => 66,
      }
    },
    _ => {
      eprintln!("Usage: jlox [script]");
      64
    },
  };

  std::process::exit(exit_code);
}
