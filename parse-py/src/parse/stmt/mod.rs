pub mod compound;

use super::operator::AUGMENTED_ASSIGNMENT_MAPPING;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::AnnAssignStmt;
use crate::ast::stmt::AssertStmt;
use crate::ast::stmt::AssignStmt;
use crate::ast::stmt::AugAssignStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DelStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::GlobalStmt;
use crate::ast::stmt::NonlocalStmt;
use crate::ast::stmt::PassStmt;
use crate::ast::stmt::RaiseStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::TypeAliasStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::EXPR_STARTS;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Statements until `end`, which is not consumed.
  pub fn stmts(&mut self, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut stmts = Vec::new();
    loop {
      let t = self.peek();
      if t.typ == end {
        break;
      };
      if t.typ == TT::Indent {
        return Err(t.error(SyntaxErrorType::UnexpectedIndent));
      };
      stmts.extend(self.stmt_line()?);
    }
    Ok(stmts)
  }

  /// The body of a compound statement, starting at its `:`. Either an indented block or simple statements on the same line.
  pub fn block(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::Colon)?;
    if !self.consume_if(TT::Newline).is_match() {
      return self.simple_stmts();
    };
    let indent = self.consume_if(TT::Indent);
    if !indent.is_match() {
      return Err(indent.error(SyntaxErrorType::ExpectedIndentedBlock));
    };
    let body = self.stmts(TT::Dedent)?;
    self.require(TT::Dedent)?;
    Ok(body)
  }

  /// One compound statement, or a line of simple statements separated by `;`.
  pub fn stmt_line(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    let (t0, t1) = self.peek_2();
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t0.typ {
      TT::At | TT::KeywordClass | TT::KeywordDef => self.definition()?,
      TT::KeywordAsync => match t1.typ {
        TT::KeywordDef => self.definition()?,
        TT::KeywordFor => self.for_stmt()?.into_wrapped(),
        TT::KeywordWith => self.with_stmt()?.into_wrapped(),
        _ => return Err(t1.error(SyntaxErrorType::ExpectedSyntax("`def`, `for` or `with` after `async`"))),
      },
      TT::KeywordFor => self.for_stmt()?.into_wrapped(),
      TT::KeywordIf => self.if_stmt()?.into_wrapped(),
      TT::KeywordTry => self.try_stmt()?.into_wrapped(),
      TT::KeywordWhile => self.while_stmt()?.into_wrapped(),
      TT::KeywordWith => self.with_stmt()?.into_wrapped(),
      TT::Identifier if self.str(t0.loc) == "match" => match self.match_stmt()? {
        Some(stmt) => stmt.into_wrapped(),
        None => return self.simple_stmts(),
      },
      _ => return self.simple_stmts(),
    };
    Ok(vec![stmt])
  }

  pub fn simple_stmts(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut stmts = vec![self.simple_stmt()?];
    while self.consume_if(TT::Semicolon).is_match() {
      if self.peek().typ == TT::Newline {
        break;
      };
      stmts.push(self.simple_stmt()?);
    }
    self.require(TT::Newline)?;
    Ok(stmts)
  }

  fn simple_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let (t0, t1, t2) = self.peek_3();
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t0.typ {
      TT::KeywordAssert => self.assert_stmt()?.into_wrapped(),
      TT::KeywordBreak => self.with_loc(|p| { p.consume(); Ok(BreakStmt {}) })?.into_wrapped(),
      TT::KeywordContinue => self.with_loc(|p| { p.consume(); Ok(ContinueStmt {}) })?.into_wrapped(),
      TT::KeywordDel => self.del_stmt()?.into_wrapped(),
      TT::KeywordFrom => self.import_from_stmt()?.into_wrapped(),
      TT::KeywordGlobal => self.with_loc(|p| { p.consume(); Ok(GlobalStmt { names: p.name_list()? }) })?.into_wrapped(),
      TT::KeywordImport => self.import_stmt()?.into_wrapped(),
      TT::KeywordNonlocal => self.with_loc(|p| { p.consume(); Ok(NonlocalStmt { names: p.name_list()? }) })?.into_wrapped(),
      TT::KeywordPass => self.with_loc(|p| { p.consume(); Ok(PassStmt {}) })?.into_wrapped(),
      TT::KeywordRaise => self.raise_stmt()?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt()?.into_wrapped(),
      // `type` is only a keyword when followed by an alias name and `=` or type parameters.
      TT::Identifier
        if t1.typ == TT::Identifier
          && matches!(t2.typ, TT::Equals | TT::BracketOpen)
          && self.str(t0.loc) == "type" => self.type_alias_stmt()?.into_wrapped(),
      _ => self.expr_or_assign_stmt()?,
    };
    Ok(stmt)
  }

  fn name_list(&mut self) -> SyntaxResult<Vec<String>> {
    let mut names = vec![self.require_identifier()?];
    while self.consume_if(TT::Comma).is_match() {
      names.push(self.require_identifier()?);
    }
    Ok(names)
  }

  fn assert_stmt(&mut self) -> SyntaxResult<Node<AssertStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordAssert)?;
      let test = p.expr()?;
      let message = p.consume_if(TT::Comma).and_then(|| p.expr())?;
      Ok(AssertStmt { test, message })
    })
  }

  fn del_stmt(&mut self) -> SyntaxResult<Node<DelStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDel)?;
      let mut targets = vec![p.target()?];
      while p.consume_if(TT::Comma).is_match() {
        if !EXPR_STARTS.contains(&p.peek().typ) {
          break;
        };
        targets.push(p.target()?);
      }
      Ok(DelStmt { targets })
    })
  }

  fn raise_stmt(&mut self) -> SyntaxResult<Node<RaiseStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordRaise)?;
      if !EXPR_STARTS.contains(&p.peek().typ) {
        return Ok(RaiseStmt {
          exception: None,
          cause: None,
        });
      };
      let exception = Some(p.expr()?);
      let cause = p.consume_if(TT::KeywordFrom).and_then(|| p.expr())?;
      Ok(RaiseStmt { exception, cause })
    })
  }

  fn return_stmt(&mut self) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let value = if EXPR_STARTS.contains(&p.peek().typ) {
        Some(p.star_exprs()?)
      } else {
        None
      };
      Ok(ReturnStmt { value })
    })
  }

  fn type_alias_stmt(&mut self) -> SyntaxResult<Node<TypeAliasStmt>> {
    self.with_loc(|p| {
      p.consume();
      let name = p.require_identifier()?;
      let type_parameters = p.type_params()?;
      p.require(TT::Equals)?;
      let value = p.expr()?;
      Ok(TypeAliasStmt {
        name,
        type_parameters,
        value,
      })
    })
  }

  /// Expression statements and every form of assignment, which all start with an expression.
  fn expr_or_assign_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    let first = self.yield_or_star_exprs()?;
    let t = self.peek();
    if t.typ == TT::Colon {
      self.consume();
      if !first.stx.is_single_target() {
        return Err(first.error(SyntaxErrorType::InvalidAssignmentTarget));
      };
      let annotation = self.expr()?;
      let value = self
        .consume_if(TT::Equals)
        .and_then(|| self.yield_or_star_exprs())?;
      return Ok(
        Node::new(self.since_checkpoint(&start), AnnAssignStmt {
          target: first,
          annotation,
          value,
        })
        .into_wrapped(),
      );
    };
    if let Some(&operator) = AUGMENTED_ASSIGNMENT_MAPPING.get(&t.typ) {
      self.consume();
      if !first.stx.is_single_target() {
        return Err(first.error(SyntaxErrorType::InvalidAssignmentTarget));
      };
      let value = self.yield_or_star_exprs()?;
      return Ok(
        Node::new(self.since_checkpoint(&start), AugAssignStmt {
          operator,
          target: first,
          value,
        })
        .into_wrapped(),
      );
    };
    if t.typ != TT::Equals {
      return Ok(Node::new(self.since_checkpoint(&start), ExprStmt { expr: first }).into_wrapped());
    };
    let mut targets = Vec::new();
    let mut value = first;
    while self.consume_if(TT::Equals).is_match() {
      targets.push(value);
      value = self.yield_or_star_exprs()?;
    }
    if let Some(invalid) = targets.iter().find(|t| !t.stx.is_assignment_target()) {
      return Err(invalid.error(SyntaxErrorType::InvalidAssignmentTarget));
    };
    Ok(Node::new(self.since_checkpoint(&start), AssignStmt { targets, value }).into_wrapped())
  }
}
