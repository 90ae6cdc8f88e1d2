use diagnostic::{
  diagnostic::{Anchor, Diagnostic},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};
use scanner::token::{Literal, Token, TokenKind};

pub mod expr;
pub mod stmt;

pub use expr::Expr;
pub use stmt::Stmt;

/// Signals that a parse error was already reported to the diagnostic engine
/// and the caller should unwind to the nearest recovery point. Carries no
/// payload: the error itself is a side effect on `engine`, this type only
/// drives `?`-based control flow up to `declaration`, where panic-mode
/// recovery happens.
#[derive(Debug)]
pub struct ParseError;

/// Recursive-descent parser with one token of lookahead. Grounded in the
/// teacher's `Parser { tokens, current }` shape (`parser/src/lib.rs`),
/// replacing its `panic!()`-based error signaling with `Result` propagation
/// so panic-mode recovery actually recovers instead of aborting the process.
pub struct Parser {
  tokens: Vec<Token>,
  current: usize,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Self {
    Self { tokens, current: 0 }
  }

  /// Parses the whole token stream into a (possibly partial) statement
  /// sequence. Each failed declaration synchronizes and parsing continues,
  /// so a single pass can surface more than one syntax error.
  pub fn parse(&mut self, engine: &mut DiagnosticEngine) -> Vec<Stmt> {
    let mut statements = Vec::new();
    while !self.is_at_end() {
      match self.declaration(engine) {
        Ok(stmt) => statements.push(stmt),
        Err(ParseError) => self.synchronize(),
      }
    }
    statements
  }

  // ---- declarations -------------------------------------------------------

  fn declaration(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    if self.match_kind(&[TokenKind::Var]) {
      self.var_declaration(engine)
    } else if self.match_kind(&[TokenKind::Fun]) {
      self.function(engine)
    } else {
      self.statement(engine)
    }
  }

  fn var_declaration(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    let name = self.consume(
      TokenKind::Identifier,
      DiagnosticCode::ExpectedIdentifier,
      "Expect variable name.",
      engine,
    )?;

    let initializer = if self.match_kind(&[TokenKind::Equal]) {
      Some(self.expression(engine)?)
    } else {
      None
    };

    self.consume(
      TokenKind::Semicolon,
      DiagnosticCode::MissingSemicolon,
      "Expect ';' after variable declaration.",
      engine,
    )?;

    Ok(Stmt::Var(name, initializer))
  }

  fn function(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    let name = self.consume(
      TokenKind::Identifier,
      DiagnosticCode::ExpectedIdentifier,
      "Expect function name.",
      engine,
    )?;

    self.consume(
      TokenKind::LeftParen,
      DiagnosticCode::UnexpectedToken,
      "Expect '(' after function name.",
      engine,
    )?;

    let mut params = Vec::new();
    if !self.check(TokenKind::RightParen) {
      loop {
        if params.len() >= 255 {
          let token = self.peek().clone();
          self.error(
            &token,
            DiagnosticCode::TooManyParameters,
            "Can't have more than 255 parameters.",
            engine,
          );
        }
        params.push(self.consume(
          TokenKind::Identifier,
          DiagnosticCode::ExpectedIdentifier,
          "Expect parameter name.",
          engine,
        )?);
        if !self.match_kind(&[TokenKind::Comma]) {
          break;
        }
      }
    }

    self.consume(
      TokenKind::RightParen,
      DiagnosticCode::MissingClosingParen,
      "Expect ')' after parameters.",
      engine,
    )?;
    self.consume(
      TokenKind::LeftBrace,
      DiagnosticCode::UnexpectedToken,
      "Expect '{' before function body.",
      engine,
    )?;

    let body = self.block(engine)?;
    Ok(Stmt::Function(name, params, body))
  }

  // ---- statements ----------------------------------------------------------

  fn statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    if self.match_kind(&[TokenKind::Print]) {
      self.print_statement(engine)
    } else if self.match_kind(&[TokenKind::LeftBrace]) {
      Ok(Stmt::Block(self.block(engine)?))
    } else if self.match_kind(&[TokenKind::If]) {
      self.if_statement(engine)
    } else if self.match_kind(&[TokenKind::While]) {
      self.while_statement(engine)
    } else if self.match_kind(&[TokenKind::For]) {
      self.for_statement(engine)
    } else if self.match_kind(&[TokenKind::Return]) {
      self.return_statement(engine)
    } else {
      self.expression_statement(engine)
    }
  }

  fn print_statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    let value = self.expression(engine)?;
    self.consume(
      TokenKind::Semicolon,
      DiagnosticCode::MissingSemicolon,
      "Expect ';' after value.",
      engine,
    )?;
    Ok(Stmt::Print(value))
  }

  fn return_statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    let keyword = self.previous().clone();
    let value = if self.check(TokenKind::Semicolon) {
      None
    } else {
      Some(self.expression(engine)?)
    };
    self.consume(
      TokenKind::Semicolon,
      DiagnosticCode::MissingSemicolon,
      "Expect ';' after return value.",
      engine,
    )?;
    Ok(Stmt::Return(keyword, value))
  }

  fn block(&mut self, engine: &mut DiagnosticEngine) -> Result<Vec<Stmt>, ParseError> {
    let mut statements = Vec::new();
    while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
      statements.push(self.declaration(engine)?);
    }
    self.consume(
      TokenKind::RightBrace,
      DiagnosticCode::MissingClosingBrace,
      "Expect '}' after block.",
      engine,
    )?;
    Ok(statements)
  }

  fn if_statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    self.consume(
      TokenKind::LeftParen,
      DiagnosticCode::UnexpectedToken,
      "Expect '(' after 'if'.",
      engine,
    )?;
    let condition = self.expression(engine)?;
    self.consume(
      TokenKind::RightParen,
      DiagnosticCode::MissingClosingParen,
      "Expect ')' after if condition.",
      engine,
    )?;

    let then_branch = Box::new(self.statement(engine)?);
    let else_branch = if self.match_kind(&[TokenKind::Else]) {
      Some(Box::new(self.statement(engine)?))
    } else {
      None
    };

    Ok(Stmt::If(condition, then_branch, else_branch))
  }

  fn while_statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    self.consume(
      TokenKind::LeftParen,
      DiagnosticCode::UnexpectedToken,
      "Expect '(' after 'while'.",
      engine,
    )?;
    let condition = self.expression(engine)?;
    self.consume(
      TokenKind::RightParen,
      DiagnosticCode::MissingClosingParen,
      "Expect ')' after condition.",
      engine,
    )?;
    let body = Box::new(self.statement(engine)?);
    Ok(Stmt::While(condition, body))
  }

  /// Desugars `for (init; cond; incr) body` into `While` wrapped in `Block`s.
  /// No dedicated `For` AST node.
  fn for_statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    self.consume(
      TokenKind::LeftParen,
      DiagnosticCode::UnexpectedToken,
      "Expect '(' after 'for'.",
      engine,
    )?;

    let initializer = if self.match_kind(&[TokenKind::Semicolon]) {
      None
    } else if self.match_kind(&[TokenKind::Var]) {
      Some(self.var_declaration(engine)?)
    } else {
      Some(self.expression_statement(engine)?)
    };

    let condition = if !self.check(TokenKind::Semicolon) {
      Some(self.expression(engine)?)
    } else {
      None
    };
    self.consume(
      TokenKind::Semicolon,
      DiagnosticCode::MissingSemicolon,
      "Expect ';' after loop condition.",
      engine,
    )?;

    let increment = if !self.check(TokenKind::RightParen) {
      Some(self.expression(engine)?)
    } else {
      None
    };
    self.consume(
      TokenKind::RightParen,
      DiagnosticCode::MissingClosingParen,
      "Expect ')' after for clauses.",
      engine,
    )?;

    let mut body = self.statement(engine)?;

    if let Some(increment) = increment {
      body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
    }

    let condition =
      condition.unwrap_or_else(|| Expr::Literal(Token::new(TokenKind::True, "true".to_string(), Literal::None, 0, 0)));
    body = Stmt::While(condition, Box::new(body));

    if let Some(initializer) = initializer {
      body = Stmt::Block(vec![initializer, body]);
    }

    Ok(body)
  }

  fn expression_statement(&mut self, engine: &mut DiagnosticEngine) -> Result<Stmt, ParseError> {
    let expr = self.expression(engine)?;
    self.consume(
      TokenKind::Semicolon,
      DiagnosticCode::MissingSemicolon,
      "Expect ';' after expression.",
      engine,
    )?;
    Ok(Stmt::Expression(expr))
  }

  // ---- expressions, by ascending precedence --------------------------------

  fn expression(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    self.assignment(engine)
  }

  /// Parses the left side at `or` precedence; if `=` follows and the left
  /// side is a `Variable`, rewrites into `Assignment`. Otherwise reports
  /// "Invalid assignment target." but returns the already-parsed left
  /// expression rather than aborting.
  fn assignment(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let expr = self.or(engine)?;

    if self.match_kind(&[TokenKind::Equal]) {
      let equals = self.previous().clone();
      let value = self.assignment(engine)?;

      if let Expr::Variable(name) = expr {
        return Ok(Expr::Assignment {
          name,
          value: Box::new(value),
        });
      }

      self.error(
        &equals,
        DiagnosticCode::InvalidAssignmentTarget,
        "Invalid assignment target.",
        engine,
      );
      return Ok(expr);
    }

    Ok(expr)
  }

  fn or(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.and(engine)?;
    while self.match_kind(&[TokenKind::Or]) {
      let operator = self.previous().clone();
      let rhs = self.and(engine)?;
      expr = Expr::Logical {
        lhs: Box::new(expr),
        operator,
        rhs: Box::new(rhs),
      };
    }
    Ok(expr)
  }

  fn and(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.equality(engine)?;
    while self.match_kind(&[TokenKind::And]) {
      let operator = self.previous().clone();
      let rhs = self.equality(engine)?;
      expr = Expr::Logical {
        lhs: Box::new(expr),
        operator,
        rhs: Box::new(rhs),
      };
    }
    Ok(expr)
  }

  fn equality(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.comparison(engine)?;
    while self.match_kind(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
      let operator = self.previous().clone();
      let rhs = self.comparison(engine)?;
      expr = Expr::Binary {
        lhs: Box::new(expr),
        operator,
        rhs: Box::new(rhs),
      };
    }
    Ok(expr)
  }

  fn comparison(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.term(engine)?;
    while self.match_kind(&[
      TokenKind::Greater,
      TokenKind::GreaterEqual,
      TokenKind::Less,
      TokenKind::LessEqual,
    ]) {
      let operator = self.previous().clone();
      let rhs = self.term(engine)?;
      expr = Expr::Binary {
        lhs: Box::new(expr),
        operator,
        rhs: Box::new(rhs),
      };
    }
    Ok(expr)
  }

  fn term(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.factor(engine)?;
    while self.match_kind(&[TokenKind::Minus, TokenKind::Plus]) {
      let operator = self.previous().clone();
      let rhs = self.factor(engine)?;
      expr = Expr::Binary {
        lhs: Box::new(expr),
        operator,
        rhs: Box::new(rhs),
      };
    }
    Ok(expr)
  }

  fn factor(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.unary(engine)?;
    while self.match_kind(&[TokenKind::Slash, TokenKind::Star]) {
      let operator = self.previous().clone();
      let rhs = self.unary(engine)?;
      expr = Expr::Binary {
        lhs: Box::new(expr),
        operator,
        rhs: Box::new(rhs),
      };
    }
    Ok(expr)
  }

  fn unary(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    if self.match_kind(&[TokenKind::Bang, TokenKind::Minus]) {
      let operator = self.previous().clone();
      let rhs = self.unary(engine)?;
      return Ok(Expr::Unary {
        operator,
        rhs: Box::new(rhs),
      });
    }
    self.call(engine)
  }

  fn call(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut expr = self.primary(engine)?;

    loop {
      if self.match_kind(&[TokenKind::LeftParen]) {
        expr = self.finish_call(expr, engine)?;
      } else {
        break;
      }
    }

    Ok(expr)
  }

  fn finish_call(&mut self, callee: Expr, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    let mut arguments = Vec::new();
    if !self.check(TokenKind::RightParen) {
      loop {
        if arguments.len() >= 255 {
          let token = self.peek().clone();
          self.error(
            &token,
            DiagnosticCode::TooManyArguments,
            "Can't have more than 255 arguments.",
            engine,
          );
        }
        arguments.push(self.expression(engine)?);
        if !self.match_kind(&[TokenKind::Comma]) {
          break;
        }
      }
    }

    let paren = self.consume(
      TokenKind::RightParen,
      DiagnosticCode::MissingClosingParen,
      "Expect ')' after arguments.",
      engine,
    )?;

    Ok(Expr::Call {
      callee: Box::new(callee),
      paren,
      arguments,
    })
  }

  fn primary(&mut self, engine: &mut DiagnosticEngine) -> Result<Expr, ParseError> {
    if self.match_kind(&[
      TokenKind::False,
      TokenKind::True,
      TokenKind::Nil,
      TokenKind::Number,
      TokenKind::String,
    ]) {
      return Ok(Expr::Literal(self.previous().clone()));
    }

    if self.match_kind(&[TokenKind::Identifier]) {
      return Ok(Expr::Variable(self.previous().clone()));
    }

    if self.match_kind(&[TokenKind::LeftParen]) {
      let expr = self.expression(engine)?;
      self.consume(
        TokenKind::RightParen,
        DiagnosticCode::MissingClosingParen,
        "Expect ')' after expression.",
        engine,
      )?;
      return Ok(Expr::Grouping(Box::new(expr)));
    }

    let token = self.peek().clone();
    Err(self.error(&token, DiagnosticCode::ExpectedExpression, "Expect expression.", engine))
  }

  // ---- panic-mode recovery --------------------------------------------------

  /// Discards tokens until a plausible statement boundary: the previous
  /// token was `;`, or the lookahead begins a new declaration/statement.
  fn synchronize(&mut self) {
    self.advance();

    while !self.is_at_end() {
      if self.previous().kind == TokenKind::Semicolon {
        return;
      }

      match self.peek().kind {
        TokenKind::Class
        | TokenKind::Fun
        | TokenKind::Var
        | TokenKind::For
        | TokenKind::If
        | TokenKind::While
        | TokenKind::Print
        | TokenKind::Return => return,
        _ => {},
      }

      self.advance();
    }
  }

  // ---- token-stream primitives ----------------------------------------------

  fn match_kind(&mut self, kinds: &[TokenKind]) -> bool {
    for kind in kinds {
      if self.check(*kind) {
        self.advance();
        return true;
      }
    }
    false
  }

  fn check(&self, kind: TokenKind) -> bool {
    !self.is_at_end() && self.peek().kind == kind
  }

  fn advance(&mut self) -> &Token {
    if !self.is_at_end() {
      self.current += 1;
    }
    self.previous()
  }

  fn is_at_end(&self) -> bool {
    self.peek().kind == TokenKind::Eof
  }

  fn peek(&self) -> &Token {
    &self.tokens[self.current]
  }

  fn previous(&self) -> &Token {
    &self.tokens[self.current - 1]
  }

  fn consume(
    &mut self,
    kind: TokenKind,
    code: DiagnosticCode,
    message: &str,
    engine: &mut DiagnosticEngine,
  ) -> Result<Token, ParseError> {
    if self.check(kind) {
      return Ok(self.advance().clone());
    }
    let token = self.peek().clone();
    Err(self.error(&token, code, message, engine))
  }

  fn error(&self, token: &Token, code: DiagnosticCode, message: &str, engine: &mut DiagnosticEngine) -> ParseError {
    let anchor = Anchor::Token {
      line: token.line,
      lexeme: token.lexeme.clone(),
      is_eof: token.is_eof(),
    };
    engine.emit(Diagnostic::new(code, message.to_string()).with_anchor(anchor));
    ParseError
  }
}
