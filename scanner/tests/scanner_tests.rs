#[cfg(test)]
mod tests {
  use diagnostic::DiagnosticEngine;
  use scanner::{token::TokenKind, Scanner};

  fn scan(source: &str) -> (Vec<TokenKind>, DiagnosticEngine) {
    let mut engine = DiagnosticEngine::new();
    let mut scanner = Scanner::new(source.to_string());
    scanner.scan(&mut engine);
    (scanner.tokens.into_iter().map(|t| t.kind).collect(), engine)
  }

  #[test]
  fn always_ends_with_a_single_eof() {
    let (kinds, engine) = scan("var a = 1;");
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Eof).count(), 1);
    assert!(!engine.has_errors());
  }

  #[test]
  fn empty_source_still_ends_in_eof() {
    let (kinds, _) = scan("");
    assert_eq!(kinds, vec![TokenKind::Eof]);
  }

  #[test]
  fn two_char_operators_prefer_the_longer_match() {
    let (kinds, _) = scan("!= == <= >=");
    assert_eq!(
      kinds,
      vec![
        TokenKind::BangEqual,
        TokenKind::EqualEqual,
        TokenKind::LessEqual,
        TokenKind::GreaterEqual,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn line_comments_are_skipped_and_dont_emit_tokens() {
    let (kinds, _) = scan("// a whole comment\nvar b;");
    assert_eq!(
      kinds,
      vec![TokenKind::Var, TokenKind::Identifier, TokenKind::Semicolon, TokenKind::Eof]
    );
  }

  #[test]
  fn keywords_are_recognized_and_other_identifiers_are_not() {
    let (kinds, _) = scan("for while orchard");
    assert_eq!(
      kinds,
      vec![TokenKind::For, TokenKind::While, TokenKind::Identifier, TokenKind::Eof]
    );
  }

  #[test]
  fn number_literal_with_fractional_part() {
    let mut engine = DiagnosticEngine::new();
    let mut scanner = Scanner::new("3.14".to_string());
    scanner.scan(&mut engine);
    assert_eq!(scanner.tokens[0].lexeme, "3.14");
  }

  #[test]
  fn trailing_dot_is_not_consumed_into_the_number() {
    let (kinds, _) = scan("5.");
    assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]);
  }

  #[test]
  fn unterminated_string_reports_a_lexical_error_and_emits_no_token() {
    let (kinds, engine) = scan("\"abc");
    assert_eq!(kinds, vec![TokenKind::Eof]);
    assert!(engine.has_errors());
  }

  #[test]
  fn unexpected_character_is_reported_but_scanning_continues() {
    let (kinds, engine) = scan("@ var x;");
    assert!(engine.has_errors());
    assert_eq!(
      kinds,
      vec![TokenKind::Var, TokenKind::Identifier, TokenKind::Semicolon, TokenKind::Eof]
    );
  }
}
