#[cfg(test)]
mod interpreter_tests {
  use diagnostic::DiagnosticEngine;
  use interpreter::{interpreter::Interpreter, value::Value};
  use parser::Parser;
  use scanner::Scanner;

  fn run(source: &str) -> (Interpreter, DiagnosticEngine) {
    let mut engine = DiagnosticEngine::new();
    let mut scanner = Scanner::new(source.to_string());
    scanner.scan(&mut engine);
    let mut parser = Parser::new(scanner.tokens);
    let statements = parser.parse(&mut engine);
    let mut interpreter = Interpreter::new();
    interpreter.run(&statements, &mut engine);
    (interpreter, engine)
  }

  fn number(value: &Value) -> f64 {
    match value {
      Value::Number(n) => *n,
      other => panic!("expected Number, got {other:?}"),
    }
  }

  #[test]
  fn arithmetic_respects_precedence() {
    let (interpreter, engine) = run("var result = 1 + 2 * 3;");
    assert!(!engine.has_errors());
    assert_eq!(number(&interpreter.global("result").unwrap()), 7.0);
  }

  #[test]
  fn blocks_shadow_then_restore_outer_binding() {
    let (interpreter, engine) = run("var a = 1; { var a = 2; } var inner_saw = a;");
    assert!(!engine.has_errors());
    assert_eq!(number(&interpreter.global("inner_saw").unwrap()), 1.0);
  }

  #[test]
  fn while_loop_counts_up() {
    let (interpreter, engine) = run("var i = 0; while (i < 3) { i = i + 1; }");
    assert!(!engine.has_errors());
    assert_eq!(number(&interpreter.global("i").unwrap()), 3.0);
  }

  #[test]
  fn string_plus_number_coerces_to_string() {
    let (interpreter, engine) = run(r#"var greeting = "hi" + 2;"#);
    assert!(!engine.has_errors());
    match interpreter.global("greeting").unwrap() {
      Value::String(s) => assert_eq!(s, "hi2"),
      other => panic!("expected String, got {other:?}"),
    }
  }

  #[test]
  fn functions_return_values_through_call_expressions() {
    let (interpreter, engine) = run("fun add(a, b) { return a + b; } var sum = add(3, 4);");
    assert!(!engine.has_errors());
    assert_eq!(number(&interpreter.global("sum").unwrap()), 7.0);
  }

  #[test]
  fn closures_capture_their_declaration_environment() {
    let source = r#"
      fun make_counter() {
        var count = 0;
        fun increment() {
          count = count + 1;
          return count;
        }
        return increment;
      }
      var counter = make_counter();
      var first = counter();
      var second = counter();
    "#;
    let (interpreter, engine) = run(source);
    assert!(!engine.has_errors());
    assert_eq!(number(&interpreter.global("first").unwrap()), 1.0);
    assert_eq!(number(&interpreter.global("second").unwrap()), 2.0);
  }

  fn boolean(value: &Value) -> bool {
    match value {
      Value::Bool(b) => *b,
      other => panic!("expected Bool, got {other:?}"),
    }
  }

  #[test]
  fn nil_equals_nil_but_not_false() {
    let (interpreter, engine) = run("var a = nil == nil; var b = nil == false;");
    assert!(!engine.has_errors());
    assert!(boolean(&interpreter.global("a").unwrap()));
    assert!(!boolean(&interpreter.global("b").unwrap()));
  }

  #[test]
  fn division_by_zero_reports_runtime_error_on_line_one() {
    let (_interpreter, engine) = run("print 1 / 0;");
    assert!(engine.has_errors());
    let diagnostics = engine.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Cannot divide by zero.");
  }

  #[test]
  fn calling_a_non_callable_is_a_runtime_error() {
    let (_interpreter, engine) = run(r#"var x = "not a function"; x();"#);
    assert!(engine.has_errors());
    assert_eq!(engine.get_diagnostics()[0].message, "Can only call functions and classes.");
  }

  #[test]
  fn wrong_arity_reports_expected_and_got_counts() {
    let (_interpreter, engine) = run("fun f(a, b) { return a + b; } f(1);");
    assert!(engine.has_errors());
    assert_eq!(engine.get_diagnostics()[0].message, "Expected 2 arguments but got 1.");
  }

  #[test]
  fn returning_outside_a_function_is_a_runtime_error() {
    let (_interpreter, engine) = run("return 1;");
    assert!(engine.has_errors());
    assert_eq!(engine.get_diagnostics()[0].message, "Can't return from top-level code.");
  }

  #[test]
  fn reading_an_undefined_variable_is_a_runtime_error() {
    let (_interpreter, engine) = run("print undeclared;");
    assert!(engine.has_errors());
    assert_eq!(engine.get_diagnostics()[0].message, "Undefined variable 'undeclared'.");
  }

  #[test]
  fn clock_native_is_callable_with_no_arguments() {
    let (interpreter, engine) = run("var t = clock();");
    assert!(!engine.has_errors());
    assert!(number(&interpreter.global("t").unwrap()) >= 0.0);
  }
}
