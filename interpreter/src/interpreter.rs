use std::{cell::RefCell, mem, rc::Rc};

use diagnostic::{
  diagnostic::{Anchor, Diagnostic},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};
use parser::{Expr, Stmt};
use scanner::token::{Literal, Token, TokenKind};

use crate::{
  environment::Environment,
  function::{define_globals, LoxCallable, LoxFunction},
  value::{is_equal, is_truthy, stringify, InterpreterError, Value},
};

/// Walks statements against a current environment, starting at globals.
/// Grounded in the teacher's `Interpreter` (`interputer/src/interpreter.rs`),
/// trimmed of classes/superclasses/ternary/break/continue and rewritten so
/// block/function-call environments are restored on every exit path
/// (including error unwind), per the environment-restoration invariant.
pub struct Interpreter {
  globals: Rc<RefCell<Environment>>,
  environment: Rc<RefCell<Environment>>,
  pub(crate) call_depth: usize,
}

impl Interpreter {
  pub fn new() -> Self {
    let globals = Rc::new(RefCell::new(Environment::new()));
    define_globals(&globals);
    Self {
      environment: Rc::clone(&globals),
      globals,
      call_depth: 0,
    }
  }

  /// Looks up a global by name, for embedders and tests that need to
  /// inspect the result of a run without going through `print`.
  pub fn global(&self, name: &str) -> Option<Value> {
    self.globals.borrow().get(name)
  }

  /// Executes a top-level program (one REPL line, or a whole file). Each
  /// statement that fails aborts the remainder of this run; the caller
  /// inspects `engine.has_errors()` to decide whether anything printed is
  /// trustworthy.
  pub fn run(&mut self, statements: &[Stmt], engine: &mut DiagnosticEngine) {
    for stmt in statements {
      if self.execute(stmt, engine).is_err() {
        break;
      }
    }
  }

  fn execute(&mut self, stmt: &Stmt, engine: &mut DiagnosticEngine) -> Result<(), InterpreterError> {
    match stmt {
      Stmt::Expression(expr) => {
        self.evaluate(expr, engine)?;
        Ok(())
      },
      Stmt::Print(expr) => {
        let value = self.evaluate(expr, engine)?;
        println!("{}", stringify(&value));
        Ok(())
      },
      Stmt::Var(name, initializer) => {
        let value = match initializer {
          Some(expr) => self.evaluate(expr, engine)?,
          None => Value::Nil,
        };
        self.environment.borrow_mut().define(name.lexeme.clone(), value);
        Ok(())
      },
      Stmt::Block(statements) => {
        let child = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(&self.environment))));
        self.execute_block(statements, child, engine)
      },
      Stmt::If(condition, then_branch, else_branch) => {
        let condition = self.evaluate(condition, engine)?;
        if is_truthy(&condition) {
          self.execute(then_branch, engine)
        } else if let Some(else_branch) = else_branch {
          self.execute(else_branch, engine)
        } else {
          Ok(())
        }
      },
      Stmt::While(condition, body) => {
        while is_truthy(&self.evaluate(condition, engine)?) {
          self.execute(body, engine)?;
        }
        Ok(())
      },
      Stmt::Function(name, params, body) => {
        let function = LoxFunction {
          name: name.lexeme.clone(),
          params: params.clone(),
          body: Rc::new(body.clone()),
          closure: Rc::clone(&self.environment),
        };
        self
          .environment
          .borrow_mut()
          .define(name.lexeme.clone(), Value::Callable(Rc::new(function)));
        Ok(())
      },
      Stmt::Return(keyword, value) => {
        let value = match value {
          Some(expr) => self.evaluate(expr, engine)?,
          None => Value::Nil,
        };
        if self.call_depth == 0 {
          return Err(self.runtime_error(engine, DiagnosticCode::ReturnOutsideFunction, keyword, "Can't return from top-level code."));
        }
        Err(InterpreterError::Return(value))
      },
    }
  }

  /// Swaps in `env` for the duration of `statements`, restoring the previous
  /// environment on every exit path — normal completion or error unwind.
  /// Used for block statements and for function-call activation records.
  pub fn execute_block(&mut self, statements: &[Stmt], env: Rc<RefCell<Environment>>, engine: &mut DiagnosticEngine) -> Result<(), InterpreterError> {
    let previous = mem::replace(&mut self.environment, env);
    let mut result = Ok(());
    for stmt in statements {
      if let Err(err) = self.execute(stmt, engine) {
        result = Err(err);
        break;
      }
    }
    self.environment = previous;
    result
  }

  fn evaluate(&mut self, expr: &Expr, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    match expr {
      Expr::Literal(token) => Ok(self.literal_value(token)),
      Expr::Grouping(inner) => self.evaluate(inner, engine),
      Expr::Variable(name) => self.lookup_variable(name, engine),
      Expr::Assignment { name, value } => {
        let value = self.evaluate(value, engine)?;
        if self.environment.borrow_mut().assign(&name.lexeme, value.clone()) {
          Ok(value)
        } else {
          Err(self.runtime_error(engine, DiagnosticCode::UndeclaredVariable, name, &format!("Undefined variable '{}'.", name.lexeme)))
        }
      },
      Expr::Unary { operator, rhs } => self.evaluate_unary(operator, rhs, engine),
      Expr::Binary { lhs, operator, rhs } => self.evaluate_binary(lhs, operator, rhs, engine),
      Expr::Logical { lhs, operator, rhs } => self.evaluate_logical(lhs, operator, rhs, engine),
      Expr::Call { callee, paren, arguments } => self.evaluate_call(callee, paren, arguments, engine),
    }
  }

  fn literal_value(&self, token: &Token) -> Value {
    match token.kind {
      TokenKind::Number => match &token.literal {
        Literal::Number(n) => Value::Number(*n),
        _ => unreachable!("scanner always attaches a Number literal to a Number token"),
      },
      TokenKind::String => match &token.literal {
        Literal::String(s) => Value::String(s.clone()),
        _ => unreachable!("scanner always attaches a String literal to a String token"),
      },
      TokenKind::True => Value::Bool(true),
      TokenKind::False => Value::Bool(false),
      TokenKind::Nil => Value::Nil,
      _ => unreachable!("parser only emits Literal nodes for literal-kind tokens"),
    }
  }

  fn lookup_variable(&self, name: &Token, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    match self.environment.borrow().get(&name.lexeme) {
      Some(value) => Ok(value),
      None => Err(self.runtime_error(engine, DiagnosticCode::UndeclaredVariable, name, &format!("Undefined variable '{}'.", name.lexeme))),
    }
  }

  fn evaluate_logical(&mut self, lhs: &Expr, operator: &Token, rhs: &Expr, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    let left = self.evaluate(lhs, engine)?;
    let left_truthy = is_truthy(&left);

    match operator.kind {
      TokenKind::Or if left_truthy => Ok(left),
      TokenKind::And if !left_truthy => Ok(left),
      _ => self.evaluate(rhs, engine),
    }
  }

  fn evaluate_unary(&mut self, operator: &Token, rhs: &Expr, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    let right = self.evaluate(rhs, engine)?;
    match operator.kind {
      TokenKind::Bang => Ok(Value::Bool(!is_truthy(&right))),
      TokenKind::Minus => match right {
        Value::Number(n) => Ok(Value::Number(-n)),
        _ => Err(self.runtime_error(engine, DiagnosticCode::TypeMismatch, operator, "Operand must be a number.")),
      },
      _ => unreachable!("parser only emits Unary nodes for '!' and '-'"),
    }
  }

  fn evaluate_binary(&mut self, lhs: &Expr, operator: &Token, rhs: &Expr, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    let left = self.evaluate(lhs, engine)?;
    let right = self.evaluate(rhs, engine)?;

    match operator.kind {
      TokenKind::Plus => match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!("{}{}", stringify(&left), stringify(&right)))),
        _ => Err(self.runtime_error(engine, DiagnosticCode::TypeMismatch, operator, "Operands must be two numbers or two strings.")),
      },
      TokenKind::Minus => self.numeric_binary(operator, left, right, engine, |a, b| a - b),
      TokenKind::Star => self.numeric_binary(operator, left, right, engine, |a, b| a * b),
      TokenKind::Slash => match (&left, &right) {
        (Value::Number(_), Value::Number(b)) if *b == 0.0 => Err(self.runtime_error(engine, DiagnosticCode::DivisionByZero, operator, "Cannot divide by zero.")),
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
        _ => Err(self.runtime_error(engine, DiagnosticCode::TypeMismatch, operator, "Operands must be numbers.")),
      },
      TokenKind::Greater => self.comparison(operator, left, right, engine, |a, b| a > b),
      TokenKind::GreaterEqual => self.comparison(operator, left, right, engine, |a, b| a >= b),
      TokenKind::Less => self.comparison(operator, left, right, engine, |a, b| a < b),
      TokenKind::LessEqual => self.comparison(operator, left, right, engine, |a, b| a <= b),
      TokenKind::EqualEqual => Ok(Value::Bool(is_equal(&left, &right))),
      TokenKind::BangEqual => Ok(Value::Bool(!is_equal(&left, &right))),
      _ => unreachable!("parser only emits Binary nodes for the operators above"),
    }
  }

  fn numeric_binary(&self, operator: &Token, left: Value, right: Value, engine: &mut DiagnosticEngine, op: impl Fn(f64, f64) -> f64) -> Result<Value, InterpreterError> {
    match (left, right) {
      (Value::Number(a), Value::Number(b)) => Ok(Value::Number(op(a, b))),
      _ => Err(self.runtime_error(engine, DiagnosticCode::TypeMismatch, operator, "Operands must be numbers.")),
    }
  }

  fn comparison(&self, operator: &Token, left: Value, right: Value, engine: &mut DiagnosticEngine, op: impl Fn(f64, f64) -> bool) -> Result<Value, InterpreterError> {
    match (left, right) {
      (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(op(a, b))),
      _ => Err(self.runtime_error(engine, DiagnosticCode::TypeMismatch, operator, "Operands must be numbers.")),
    }
  }

  fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr], engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    let callee_value = self.evaluate(callee, engine)?;

    let mut argument_values = Vec::with_capacity(arguments.len());
    for argument in arguments {
      argument_values.push(self.evaluate(argument, engine)?);
    }

    let callable = match callee_value {
      Value::Callable(callable) => callable,
      _ => return Err(self.runtime_error(engine, DiagnosticCode::NotCallable, paren, "Can only call functions and classes.")),
    };

    if argument_values.len() != callable.arity() {
      let message = format!("Expected {} arguments but got {}.", callable.arity(), argument_values.len());
      return Err(self.runtime_error(engine, DiagnosticCode::WrongNumberOfArguments, paren, &message));
    }

    callable.call(self, argument_values, engine)
  }

  fn runtime_error(&self, engine: &mut DiagnosticEngine, code: DiagnosticCode, token: &Token, message: &str) -> InterpreterError {
    engine.emit(Diagnostic::new(code, message.to_string()).with_anchor(Anchor::Line(token.line)));
    InterpreterError::Runtime
  }
}
