use diagnostic::{
  diagnostic::{Anchor, Diagnostic},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};

use crate::{
  token::{Literal, Token, TokenKind},
  Scanner,
};

impl Scanner {
  /// Main scan loop: `start = current`, consume exactly one lexeme, repeat
  /// until the source is exhausted, then push a trailing `EOF` token.
  /// Grounded in `scanner/src/utils.rs::get_tokens`, trimmed to the closed
  /// algorithm in `spec.md` §4.1.
  pub fn get_tokens(&mut self, engine: &mut DiagnosticEngine) {
    while !self.is_at_end() {
      self.start = self.current;
      let c = self.advance();

      let token = match c {
        '(' => Some(TokenKind::LeftParen),
        ')' => Some(TokenKind::RightParen),
        '{' => Some(TokenKind::LeftBrace),
        '}' => Some(TokenKind::RightBrace),
        ',' => Some(TokenKind::Comma),
        '.' => Some(TokenKind::Dot),
        '-' => Some(TokenKind::Minus),
        '+' => Some(TokenKind::Plus),
        ';' => Some(TokenKind::Semicolon),
        '*' => Some(TokenKind::Star),

        '/' => {
          if self.match_char('/') {
            while self.peek().map_or(false, |c| c != '\n') {
              self.advance();
            }
            None
          } else {
            Some(TokenKind::Slash)
          }
        },

        '!' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenKind::BangEqual)
          } else {
            Some(TokenKind::Bang)
          }
        },
        '=' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenKind::EqualEqual)
          } else {
            Some(TokenKind::Equal)
          }
        },
        '<' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenKind::LessEqual)
          } else {
            Some(TokenKind::Less)
          }
        },
        '>' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenKind::GreaterEqual)
          } else {
            Some(TokenKind::Greater)
          }
        },

        ' ' | '\r' | '\t' => None,
        '\n' => {
          self.line += 1;
          self.column = 0;
          None
        },

        '"' => self.tokenize_string(engine),

        '0'..='9' => Some(self.tokenize_number()),
        'a'..='z' | 'A'..='Z' | '_' => Some(self.tokenize_identifier()),

        _other => {
          self.emit_error(engine, DiagnosticCode::InvalidCharacter, "Unexpected character.".to_string());
          None
        },
      };

      if let Some(kind) = token {
        self.add_token(kind);
      }
    }

    self.tokens.push(Token::new(
      TokenKind::Eof,
      String::new(),
      Literal::None,
      self.line,
      self.column,
    ));
  }

  /// Consumes a `"`-delimited string literal. No escape processing, per
  /// `spec.md` §4.1. Embedded newlines increment the line counter; reaching
  /// EOF before the closing quote is a lexical error and no token is emitted.
  fn tokenize_string(&mut self, engine: &mut DiagnosticEngine) -> Option<TokenKind> {
    while let Some(c) = self.peek() {
      if c == '"' {
        break;
      }
      if c == '\n' {
        self.line += 1;
        self.column = 0;
      }
      self.advance();
    }

    if self.is_at_end() {
      self.emit_error(
        engine,
        DiagnosticCode::UnterminatedString,
        "Unterminated string.".to_string(),
      );
      return None;
    }

    // Consume the closing quote.
    self.advance();
    Some(TokenKind::String)
  }

  /// Consumes digits, then an optional `.` fractional part (only if followed
  /// by another digit — a trailing bare `.` stays its own token).
  fn tokenize_number(&mut self) -> TokenKind {
    while self.peek().map_or(false, |c| c.is_ascii_digit()) {
      self.advance();
    }

    if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
      self.advance();
      while self.peek().map_or(false, |c| c.is_ascii_digit()) {
        self.advance();
      }
    }

    TokenKind::Number
  }

  /// Maximal-munch identifier/keyword scan.
  fn tokenize_identifier(&mut self) -> TokenKind {
    while self
      .peek()
      .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
    {
      self.advance();
    }

    match self.get_current_lexeme() {
      "and" => TokenKind::And,
      "class" => TokenKind::Class,
      "else" => TokenKind::Else,
      "false" => TokenKind::False,
      "for" => TokenKind::For,
      "fun" => TokenKind::Fun,
      "if" => TokenKind::If,
      "nil" => TokenKind::Nil,
      "or" => TokenKind::Or,
      "print" => TokenKind::Print,
      "return" => TokenKind::Return,
      "super" => TokenKind::Super,
      "this" => TokenKind::This,
      "true" => TokenKind::True,
      "var" => TokenKind::Var,
      "while" => TokenKind::While,
      _ => TokenKind::Identifier,
    }
  }

  fn add_token(&mut self, kind: TokenKind) {
    let lexeme = self.get_current_lexeme().to_string();
    let literal = match kind {
      TokenKind::String => Literal::String(lexeme[1..lexeme.len() - 1].to_string()),
      TokenKind::Number => Literal::Number(lexeme.parse::<f64>().unwrap_or(0.0)),
      _ => Literal::None,
    };

    self
      .tokens
      .push(Token::new(kind, lexeme, literal, self.line, self.column));
  }

  fn emit_error(&self, engine: &mut DiagnosticEngine, code: DiagnosticCode, message: String) {
    let diagnostic = Diagnostic::new(code, message).with_anchor(Anchor::Line(self.line));
    engine.emit(diagnostic);
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  fn advance(&mut self) -> char {
    let c = self.peek().unwrap();
    self.current += c.len_utf8();
    self.column += 1;
    c
  }

  fn peek(&self) -> Option<char> {
    self.source[self.current..].chars().next()
  }

  fn peek_next(&self) -> Option<char> {
    let mut chars = self.source[self.current..].chars();
    chars.next()?;
    chars.next()
  }

  fn get_current_lexeme(&self) -> &str {
    &self.source[self.start..self.current]
  }

  fn match_char(&self, expected: char) -> bool {
    self.peek() == Some(expected)
  }
}
