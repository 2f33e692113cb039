use crate::ast::node::Node;
use crate::ast::stmt::ExceptHandler;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::MatchCase;
use crate::ast::stmt::MatchStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithItem;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::parse::Parser;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn else_block(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    if self.consume_if(TT::KeywordElse).is_match() {
      self.block()
    } else {
      Ok(Vec::new())
    }
  }

  /// Also parses `elif` clauses, which become a nested `if` in `alternate`.
  pub fn if_stmt(&mut self) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require_predicate(|t| t == TT::KeywordIf || t == TT::KeywordElif, "`if` or `elif`")?;
      let test = p.named_expr()?;
      let consequent = p.block()?;
      let alternate = match p.peek().typ {
        TT::KeywordElif => vec![p.if_stmt()?.into_wrapped()],
        _ => p.else_block()?,
      };
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn while_stmt(&mut self) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      let test = p.named_expr()?;
      let body = p.block()?;
      let orelse = p.else_block()?;
      Ok(WhileStmt { test, body, orelse })
    })
  }

  pub fn for_stmt(&mut self) -> SyntaxResult<Node<ForStmt>> {
    self.with_loc(|p| {
      let async_ = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFor)?;
      let target = p.target_list()?;
      p.require(TT::KeywordIn)?;
      let iterable = p.star_exprs()?;
      let body = p.block()?;
      let orelse = p.else_block()?;
      Ok(ForStmt {
        async_,
        target,
        iterable,
        body,
        orelse,
      })
    })
  }

  pub fn try_stmt(&mut self) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordTry)?;
      let body = p.block()?;
      let mut star = false;
      let mut handlers = Vec::new();
      while p.peek().typ == TT::KeywordExcept {
        let start = p.checkpoint();
        p.consume();
        star |= p.consume_if(TT::Asterisk).is_match();
        let type_expr = match p.peek().typ {
          TT::Colon => None,
          _ => Some(p.expr()?),
        };
        let name = match type_expr {
          Some(_) => p.consume_if(TT::KeywordAs).and_then(|| p.require_identifier())?,
          None => None,
        };
        let body = p.block()?;
        handlers.push(Node::new(p.since_checkpoint(&start), ExceptHandler {
          type_expr,
          name,
          body,
        }));
      }
      let orelse = if handlers.is_empty() {
        Vec::new()
      } else {
        p.else_block()?
      };
      let finally = p.consume_if(TT::KeywordFinally);
      if handlers.is_empty() && !finally.is_match() {
        return Err(finally.error(SyntaxErrorType::TryStatementHasNoHandlers));
      };
      let finalbody = if finally.is_match() { p.block()? } else { Vec::new() };
      Ok(TryStmt {
        body,
        handlers,
        orelse,
        finalbody,
        star,
      })
    })
  }

  fn with_item(&mut self) -> SyntaxResult<WithItem> {
    let context = self.expr()?;
    let target = self.consume_if(TT::KeywordAs).and_then(|| self.target())?;
    Ok(WithItem { context, target })
  }

  fn with_items(&mut self) -> SyntaxResult<Vec<Node<WithItem>>> {
    // `with (a as b, c):` groups items, but `with (a, b) as c:` starts with a tuple.
    if self.peek().typ == TT::ParenthesisOpen {
      let grouped = self.rewindable(|p| {
        p.consume();
        let items = p.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| p.with_item())?;
        Ok((!items.is_empty() && p.peek().typ == TT::Colon).then_some(items))
      });
      if let Some(items) = grouped {
        return Ok(items);
      };
    };
    let mut items = vec![self.with_loc(|p| p.with_item())?];
    while self.consume_if(TT::Comma).is_match() {
      items.push(self.with_loc(|p| p.with_item())?);
    }
    Ok(items)
  }

  pub fn with_stmt(&mut self) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      let async_ = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordWith)?;
      let items = p.with_items()?;
      let body = p.block()?;
      Ok(WithStmt {
        async_,
        items,
        body,
      })
    })
  }

  // Patterns are kept as source text: everything up to the guard or the `:` outside brackets.
  fn case_pattern(&mut self) -> SyntaxResult<String> {
    let mut depth = 0usize;
    let mut range: Option<Loc> = None;
    loop {
      let t = self.peek();
      match t.typ {
        TT::Colon | TT::KeywordIf if depth == 0 => break,
        TT::EOF | TT::Invalid | TT::Newline | TT::Indent | TT::Dedent => {
          return Err(t.error(SyntaxErrorType::ExpectedSyntax("pattern")));
        }
        typ if typ.is_open_bracket() => depth += 1,
        typ if typ.is_close_bracket() => depth = depth.saturating_sub(1),
        _ => {}
      };
      self.consume();
      range = Some(t.loc.add_option(range));
    }
    match range {
      Some(range) => Ok(self.string(range)),
      None => Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("pattern"))),
    }
  }

  fn match_case(&mut self) -> SyntaxResult<MatchCase> {
    self.consume();
    let pattern = self.case_pattern()?;
    let guard = self
      .consume_if(TT::KeywordIf)
      .and_then(|| self.named_expr())?;
    let body = self.block()?;
    Ok(MatchCase {
      pattern,
      guard,
      body,
    })
  }

  /// `match` is a soft keyword: this returns None without consuming anything if the line isn't a match statement header.
  pub fn match_stmt(&mut self) -> SyntaxResult<Option<Node<MatchStmt>>> {
    let start = self.checkpoint();
    let subject = self.rewindable(|p| {
      p.consume();
      let subject = p.star_named_exprs()?;
      let header = p.consume_if(TT::Colon).is_match()
        && p.consume_if(TT::Newline).is_match()
        && p.consume_if(TT::Indent).is_match()
        && p.peek_soft_keyword("case");
      Ok(header.then_some(subject))
    });
    let Some(subject) = subject else {
      return Ok(None);
    };
    let cases = self.repeat_while_with_loc(|p| p.peek_soft_keyword("case"), |p| p.match_case())?;
    self.require(TT::Dedent)?;
    Ok(Some(Node::new(self.since_checkpoint(&start), MatchStmt {
      subject,
      cases,
    })))
  }
}
