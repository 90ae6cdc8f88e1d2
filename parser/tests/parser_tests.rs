#[cfg(test)]
mod parser_tests {
  use diagnostic::DiagnosticEngine;
  use parser::{Expr, Parser, Stmt};
  use scanner::Scanner;

  fn parse(source: &str) -> (Vec<Stmt>, DiagnosticEngine) {
    let mut engine = DiagnosticEngine::new();
    let mut scanner = Scanner::new(source.to_string());
    scanner.scan(&mut engine);
    let mut parser = Parser::new(scanner.tokens);
    let statements = parser.parse(&mut engine);
    (statements, engine)
  }

  #[test]
  fn variable_declaration_with_initializer() {
    let (statements, engine) = parse("var a = 1 + 2;");
    assert!(!engine.has_errors());
    assert_eq!(statements.len(), 1);
    match &statements[0] {
      Stmt::Var(name, Some(Expr::Binary { .. })) => assert_eq!(name.lexeme, "a"),
      other => panic!("expected initialized var decl, got {:?}", other),
    }
  }

  #[test]
  fn variable_declaration_without_initializer() {
    let (statements, engine) = parse("var a;");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Var(name, None) => assert_eq!(name.lexeme, "a"),
      other => panic!("expected uninitialized var decl, got {:?}", other),
    }
  }

  #[test]
  fn assignment_rewrites_variable_into_assignment_node() {
    let (statements, engine) = parse("a = 5;");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Expression(Expr::Assignment { name, .. }) => assert_eq!(name.lexeme, "a"),
      other => panic!("expected assignment expression, got {:?}", other),
    }
  }

  #[test]
  fn invalid_assignment_target_reports_error_but_keeps_parsing() {
    let (statements, engine) = parse("1 = 2; var a = 3;");
    assert!(engine.has_errors());
    // parsing continues past the bad assignment target to the next statement.
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[1], Stmt::Var(_, Some(_))));
  }

  #[test]
  fn multiplication_binds_tighter_than_addition() {
    let (statements, engine) = parse("1 + 2 * 3;");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Expression(Expr::Binary { operator, rhs, .. }) => {
        assert_eq!(operator.lexeme, "+");
        assert!(matches!(**rhs, Expr::Binary { .. }));
      },
      other => panic!("expected top-level '+', got {:?}", other),
    }
  }

  #[test]
  fn and_or_produce_dedicated_logical_nodes() {
    let (statements, engine) = parse("true and false or true;");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Expression(Expr::Logical { operator, .. }) => assert_eq!(operator.lexeme, "or"),
      other => panic!("expected top-level logical 'or', got {:?}", other),
    }
  }

  #[test]
  fn for_loop_desugars_to_a_while_wrapped_block() {
    let (statements, engine) = parse("for (var i = 0; i < 3; i = i + 1) print i;");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Block(outer) => {
        assert!(matches!(outer[0], Stmt::Var(..)));
        match &outer[1] {
          Stmt::While(_, body) => match &**body {
            Stmt::Block(inner) => {
              assert!(matches!(inner[0], Stmt::Print(_)));
              assert!(matches!(inner[1], Stmt::Expression(_)));
            },
            other => panic!("expected while body block, got {:?}", other),
          },
          other => panic!("expected desugared while, got {:?}", other),
        }
      },
      other => panic!("expected desugared for as a block, got {:?}", other),
    }
  }

  #[test]
  fn for_loop_with_no_condition_defaults_to_true() {
    let (statements, engine) = parse("for (;;) print 1;");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::While(Expr::Literal(token), _) => assert_eq!(token.lexeme, "true"),
      other => panic!("expected while(true), got {:?}", other),
    }
  }

  #[test]
  fn function_declaration_parses_params_and_body() {
    let (statements, engine) = parse("fun add(a, b) { return a + b; }");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Function(name, params, body) => {
        assert_eq!(name.lexeme, "add");
        assert_eq!(params.iter().map(|p| p.lexeme.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0], Stmt::Return(_, Some(_))));
      },
      other => panic!("expected function declaration, got {:?}", other),
    }
  }

  #[test]
  fn call_expression_parses_arguments() {
    let (statements, engine) = parse("add(1, 2, 3);");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::Expression(Expr::Call { arguments, .. }) => assert_eq!(arguments.len(), 3),
      other => panic!("expected call expression, got {:?}", other),
    }
  }

  #[test]
  fn missing_semicolon_reports_error_and_synchronizes_to_next_statement() {
    let (statements, engine) = parse("var a = 1\nvar b = 2;");
    assert!(engine.has_errors());
    // the malformed first declaration is discarded by synchronize(); the
    // second one still parses.
    assert_eq!(statements.len(), 1);
    match &statements[0] {
      Stmt::Var(name, _) => assert_eq!(name.lexeme, "b"),
      other => panic!("expected recovery to the next var decl, got {:?}", other),
    }
  }

  #[test]
  fn unclosed_grouping_reports_missing_closing_paren() {
    let (_, engine) = parse("var a = (1 + 2;");
    assert!(engine.has_errors());
  }

  #[test]
  fn block_and_if_else_parse_nested_statements() {
    let (statements, engine) = parse("if (true) { print 1; } else { print 2; }");
    assert!(!engine.has_errors());
    match &statements[0] {
      Stmt::If(_, then_branch, Some(else_branch)) => {
        assert!(matches!(**then_branch, Stmt::Block(_)));
        assert!(matches!(**else_branch, Stmt::Block(_)));
      },
      other => panic!("expected if/else with block branches, got {:?}", other),
    }
  }
}
