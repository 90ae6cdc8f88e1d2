/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

/// Unique identifier for each type of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
  // Lexical errors
  UnterminatedString,
  InvalidCharacter,

  // Syntax errors
  UnexpectedToken,
  ExpectedExpression,
  MissingClosingParen,
  MissingClosingBrace,
  MissingSemicolon,
  InvalidAssignmentTarget,
  ExpectedIdentifier,
  TooManyArguments,
  TooManyParameters,

  // Runtime errors
  UndeclaredVariable,
  TypeMismatch,
  DivisionByZero,
  NotCallable,
  WrongNumberOfArguments,
  ReturnOutsideFunction,

  // Host/driver errors
  FileNotFound,
  InvalidArguments,
  IoError,
}

impl DiagnosticCode {
  pub fn code(&self) -> String {
    match self {
      Self::UnterminatedString => "E0001".to_string(),
      Self::InvalidCharacter => "E0002".to_string(),

      Self::UnexpectedToken => "E0100".to_string(),
      Self::ExpectedExpression => "E0101".to_string(),
      Self::MissingClosingBrace => "E0102".to_string(),
      Self::MissingClosingParen => "E0103".to_string(),
      Self::MissingSemicolon => "E0104".to_string(),
      Self::InvalidAssignmentTarget => "E0105".to_string(),
      Self::ExpectedIdentifier => "E0106".to_string(),
      Self::TooManyArguments => "E0107".to_string(),
      Self::TooManyParameters => "E0108".to_string(),

      Self::UndeclaredVariable => "E0200".to_string(),
      Self::TypeMismatch => "E0201".to_string(),
      Self::DivisionByZero => "E0202".to_string(),
      Self::NotCallable => "E0203".to_string(),
      Self::WrongNumberOfArguments => "E0204".to_string(),
      Self::ReturnOutsideFunction => "E0205".to_string(),

      Self::FileNotFound => "E0400".to_string(),
      Self::InvalidArguments => "E0401".to_string(),
      Self::IoError => "E0402".to_string(),
    }
  }

  pub fn severity(&self) -> Severity {
    Severity::Error
  }
}
