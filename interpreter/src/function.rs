use std::{
  cell::RefCell,
  fmt,
  rc::Rc,
  time::{SystemTime, UNIX_EPOCH},
};

use diagnostic::DiagnosticEngine;
use parser::Stmt;
use scanner::token::Token;

use crate::{
  environment::Environment,
  interpreter::Interpreter,
  value::{InterpreterError, Value},
};

/// Anything `Call` can invoke. Grounded in the teacher's `LoxCallable`
/// (`interputer/src/function/mod.rs`), with the trait and both impls agreeing
/// on `Result<Value, InterpreterError>` throughout — the teacher's own
/// `LoxFunction::call` returned that type while the trait declared
/// `Result<LoxValue, ()>`, which the teacher's code only compiled past by
/// never actually implementing the trait signature consistently.
pub trait LoxCallable: fmt::Debug {
  fn arity(&self) -> usize;
  fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError>;
  /// Text used by `stringify` and `Debug`: `<fn NAME>` or `<native fn>`.
  fn describe(&self) -> String;
}

/// A user-declared function. Captures its defining environment at
/// declaration time (`closure`) so nested functions see the right lexical
/// scope rather than always reaching back to globals — the fix for the
/// closures open question.
pub struct LoxFunction {
  pub name: String,
  pub params: Vec<Token>,
  pub body: Rc<Vec<Stmt>>,
  pub closure: Rc<RefCell<Environment>>,
}

impl fmt::Debug for LoxFunction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "LoxFunction({})", self.name)
  }
}

impl LoxCallable for LoxFunction {
  fn arity(&self) -> usize {
    self.params.len()
  }

  fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>, engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    let call_env = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(&self.closure))));

    for (param, argument) in self.params.iter().zip(arguments.into_iter()) {
      call_env.borrow_mut().define(param.lexeme.clone(), argument);
    }

    interpreter.call_depth += 1;
    let result = match interpreter.execute_block(&self.body, call_env, engine) {
      Ok(()) => Ok(Value::Nil),
      Err(InterpreterError::Return(value)) => Ok(value),
      Err(err) => Err(err),
    };
    interpreter.call_depth -= 1;
    result
  }

  fn describe(&self) -> String {
    format!("<fn {}>", self.name)
  }
}

/// The `clock` native, returning wall time in seconds as a double (current
/// wall time in milliseconds / 1000, per the interpreter's globals setup).
#[derive(Debug)]
pub struct ClockFunction;

impl LoxCallable for ClockFunction {
  fn arity(&self) -> usize {
    0
  }

  fn call(&self, _interpreter: &mut Interpreter, _arguments: Vec<Value>, _engine: &mut DiagnosticEngine) -> Result<Value, InterpreterError> {
    let millis = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_millis() as f64)
      .unwrap_or(0.0);
    Ok(Value::Number(millis / 1000.0))
  }

  fn describe(&self) -> String {
    "<native fn>".to_string()
  }
}

pub fn define_globals(globals: &Rc<RefCell<Environment>>) {
  globals.borrow_mut().define("clock".to_string(), Value::Callable(Rc::new(ClockFunction)));
}
