use std::fmt;

use scanner::token::Token;

/// Tagged-variant expression AST. Grounded in the teacher's richest `Expr`
/// generation (`parser/src/expr.rs`), trimmed to the operators this language
/// has and given a dedicated `Logical` variant (the teacher instead folds
/// `and`/`or` into `Binary` dispatched by lexeme string).
#[derive(Debug, Clone)]
pub enum Expr {
  Literal(Token),
  Variable(Token),
  Unary {
    operator: Token,
    rhs: Box<Expr>,
  },
  Binary {
    lhs: Box<Expr>,
    operator: Token,
    rhs: Box<Expr>,
  },
  Logical {
    lhs: Box<Expr>,
    operator: Token,
    rhs: Box<Expr>,
  },
  Assignment {
    name: Token,
    value: Box<Expr>,
  },
  Call {
    callee: Box<Expr>,
    paren: Token,
    arguments: Vec<Expr>,
  },
  Grouping(Box<Expr>),
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Literal(token) => write!(f, "{}", token.lexeme),
      Expr::Variable(token) => write!(f, "{}", token.lexeme),
      Expr::Unary { operator, rhs } => write!(f, "({} {})", operator.lexeme, rhs),
      Expr::Binary { lhs, operator, rhs } => write!(f, "({} {} {})", operator.lexeme, lhs, rhs),
      Expr::Logical { lhs, operator, rhs } => write!(f, "({} {} {})", operator.lexeme, lhs, rhs),
      Expr::Grouping(expr) => write!(f, "(group {})", expr),
      Expr::Assignment { name, value } => write!(f, "({} = {})", name.lexeme, value),
      Expr::Call {
        callee, arguments, ..
      } => {
        let args = arguments
          .iter()
          .map(|a| format!("{}", a))
          .collect::<Vec<_>>()
          .join(", ");
        write!(f, "{}({})", callee, args)
      },
    }
  }
}

impl Expr {
  /// ASCII tree pretty-printer, in the teacher's style.
  pub fn print_tree(&self) {
    self.build_tree("", true);
  }

  pub(crate) fn build_tree(&self, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    let extension = if is_last { "    " } else { "│   " };

    match self {
      Expr::Literal(token) => {
        println!("{}{}Literal({})", prefix, connector, token.lexeme);
      },
      Expr::Variable(token) => {
        println!("{}{}Variable({})", prefix, connector, token.lexeme);
      },
      Expr::Binary { lhs, operator, rhs } => {
        println!("{}{}Binary({})", prefix, connector, operator.lexeme);
        let new_prefix = format!("{}{}", prefix, extension);
        lhs.build_tree(&new_prefix, false);
        rhs.build_tree(&new_prefix, true);
      },
      Expr::Logical { lhs, operator, rhs } => {
        println!("{}{}Logical({})", prefix, connector, operator.lexeme);
        let new_prefix = format!("{}{}", prefix, extension);
        lhs.build_tree(&new_prefix, false);
        rhs.build_tree(&new_prefix, true);
      },
      Expr::Unary { operator, rhs } => {
        println!("{}{}Unary({})", prefix, connector, operator.lexeme);
        rhs.build_tree(&format!("{}{}", prefix, extension), true);
      },
      Expr::Grouping(expr) => {
        println!("{}{}Grouping", prefix, connector);
        expr.build_tree(&format!("{}{}", prefix, extension), true);
      },
      Expr::Assignment { name, value } => {
        println!("{}{}Assignment({})", prefix, connector, name.lexeme);
        value.build_tree(&format!("{}{}", prefix, extension), true);
      },
      Expr::Call {
        callee,
        paren: _,
        arguments,
      } => {
        println!("{}{}Call", prefix, connector);
        let new_prefix = format!("{}{}", prefix, extension);

        println!("{}├── callee:", new_prefix);
        callee.build_tree(&format!("{}│   ", new_prefix), true);

        if !arguments.is_empty() {
          println!("{}└── arguments:", new_prefix);
          let arg_prefix = format!("{}    ", new_prefix);
          for (i, arg) in arguments.iter().enumerate() {
            arg.build_tree(&arg_prefix, i == arguments.len() - 1);
          }
        }
      },
    }
  }
}
