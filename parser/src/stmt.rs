use std::fmt;

use scanner::token::Token;

use crate::expr::Expr;

/// Tagged-variant statement AST. Grounded in the teacher's richest `Stmt`
/// generation (`parser/src/stmt.rs`) for the `Display`/tree-printer idiom,
/// with a `Print` variant restored (the middle `parser/src/stmt/mod.rs`
/// generation has it, the richest one doesn't) and a `Return` variant added
/// for the closure/return redesign (`SPEC_FULL.md` §3). `Function`'s
/// parameter list is `Vec<Token>` directly, not `Vec<Expr>` of identifier
/// expressions. No dedicated `For` node — `for` desugars to `While`.
#[derive(Debug, Clone)]
pub enum Stmt {
  Expression(Expr),
  Print(Expr),
  Var(Token, Option<Expr>),
  Block(Vec<Stmt>),
  If(Expr, Box<Stmt>, Option<Box<Stmt>>),
  While(Expr, Box<Stmt>),
  Function(Token, Vec<Token>, Vec<Stmt>),
  Return(Token, Option<Expr>),
}

impl fmt::Display for Stmt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stmt::Expression(expr) => write!(f, "ExprStmt({})", expr),
      Stmt::Print(expr) => write!(f, "PrintStmt({})", expr),
      Stmt::Var(name, Some(expr)) => write!(f, "VarDecl({}, {})", name.lexeme, expr),
      Stmt::Var(name, None) => write!(f, "VarDecl({}, <uninitialized>)", name.lexeme),
      Stmt::Block(stmts) => {
        write!(f, "BlockStmt([")?;
        for (i, stmt) in stmts.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{}", stmt)?;
        }
        write!(f, "])")
      },
      Stmt::If(condition, then_branch, Some(else_branch)) => write!(
        f,
        "IfStmt(cond: {}, then: {}, else: {})",
        condition, then_branch, else_branch
      ),
      Stmt::If(condition, then_branch, None) => {
        write!(f, "IfStmt(cond: {}, then: {}, else: <nil>)", condition, then_branch)
      },
      Stmt::While(condition, body) => write!(f, "WhileStmt(cond: {}, body: {})", condition, body),
      Stmt::Function(name, params, _body) => {
        let params_str = params.iter().map(|p| p.lexeme.clone()).collect::<Vec<_>>().join(", ");
        write!(f, "FunctionStmt({}, [{}])", name.lexeme, params_str)
      },
      Stmt::Return(token, Some(value)) => write!(f, "ReturnStmt({}, {})", token.lexeme, value),
      Stmt::Return(token, None) => write!(f, "ReturnStmt({})", token.lexeme),
    }
  }
}

impl Stmt {
  /// ASCII tree pretty-printer, in the teacher's style.
  pub fn print_tree(&self) {
    self.build_tree("", true);
  }

  fn build_tree(&self, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    let extension = if is_last { "    " } else { "│   " };

    match self {
      Stmt::Expression(expr) => {
        println!("{}{}ExprStmt", prefix, connector);
        expr.build_tree(&format!("{}{}", prefix, extension), true);
      },

      Stmt::Print(expr) => {
        println!("{}{}Print", prefix, connector);
        expr.build_tree(&format!("{}{}", prefix, extension), true);
      },

      Stmt::Var(name, value) => {
        println!("{}{}VarDecl({})", prefix, connector, name.lexeme);
        if let Some(expr) = value {
          expr.build_tree(&format!("{}{}", prefix, extension), true);
        } else {
          println!("{}{}└── <uninitialized>", prefix, extension);
        }
      },

      Stmt::Block(stmts) => {
        println!("{}{}Block", prefix, connector);
        let new_prefix = format!("{}{}", prefix, extension);
        for (i, stmt) in stmts.iter().enumerate() {
          stmt.build_tree(&new_prefix, i == stmts.len() - 1);
        }
      },

      Stmt::If(condition, then_branch, else_branch) => {
        println!("{}{}If", prefix, connector);
        let new_prefix = format!("{}{}", prefix, extension);

        println!("{}├── condition:", new_prefix);
        condition.build_tree(&format!("{}│   ", new_prefix), true);

        let has_else = else_branch.is_some();
        println!("{}{}then:", new_prefix, if has_else { "├── " } else { "└── " });
        then_branch.build_tree(
          &format!("{}{}", new_prefix, if has_else { "│   " } else { "    " }),
          true,
        );

        if let Some(else_stmt) = else_branch {
          println!("{}└── else:", new_prefix);
          else_stmt.build_tree(&format!("{}    ", new_prefix), true);
        }
      },

      Stmt::While(condition, body) => {
        println!("{}{}While", prefix, connector);
        let new_prefix = format!("{}{}", prefix, extension);

        println!("{}├── condition:", new_prefix);
        condition.build_tree(&format!("{}│   ", new_prefix), true);

        println!("{}└── body:", new_prefix);
        body.build_tree(&format!("{}    ", new_prefix), true);
      },

      Stmt::Function(name, params, body) => {
        let params_str = params.iter().map(|p| p.lexeme.clone()).collect::<Vec<_>>().join(", ");

        println!("{}{}Function({}, [{}])", prefix, connector, name.lexeme, params_str);
        let new_prefix = format!("{}{}", prefix, extension);
        println!("{}└── body:", new_prefix);
        for (i, stmt) in body.iter().enumerate() {
          stmt.build_tree(&format!("{}    ", new_prefix), i == body.len() - 1);
        }
      },

      Stmt::Return(_, value) => {
        println!("{}{}Return", prefix, connector);
        if let Some(expr) = value {
          expr.build_tree(&format!("{}{}", prefix, extension), true);
        } else {
          println!("{}{}└── <nil>", prefix, extension);
        }
      },
    }
  }
}
