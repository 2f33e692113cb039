use crate::ast::expr::ComprehensionExpr;
use crate::ast::expr::ComprehensionFor;
use crate::ast::expr::ComprehensionKind;
use crate::ast::expr::DictEntry;
use crate::ast::expr::DictExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::ListExpr;
use crate::ast::expr::SetExpr;
use crate::ast::expr::TupleExpr;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::parse::Parser;
use crate::parse::ParserCheckpoint;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn peek_comprehension_for(&mut self) -> bool {
    let (a, b) = self.peek_2();
    a.typ == TT::KeywordFor || (a.typ == TT::KeywordAsync && b.typ == TT::KeywordFor)
  }

  fn comprehension_for(&mut self) -> SyntaxResult<ComprehensionFor> {
    let async_ = self.consume_if(TT::KeywordAsync).is_match();
    self.require(TT::KeywordFor)?;
    let target = self.target_list()?;
    self.require(TT::KeywordIn)?;
    let iterable = self.or_test()?;
    let conditions = self.repeat_while(
      |p| p.peek().typ == TT::KeywordIf,
      |p| {
        p.consume();
        p.or_test()
      },
    )?;
    Ok(ComprehensionFor {
      async_,
      target,
      iterable,
      conditions,
    })
  }

  pub fn comprehension_fors(&mut self) -> SyntaxResult<Vec<Node<ComprehensionFor>>> {
    self.repeat_while_with_loc(|p| p.peek_comprehension_for(), |p| p.comprehension_for())
  }

  // Finishes a comprehension whose element has been parsed, consuming `close`.
  fn comprehension(
    &mut self,
    start: &ParserCheckpoint,
    close: TT,
    kind: ComprehensionKind,
    element: Node<Expr>,
    value: Option<Node<Expr>>,
  ) -> SyntaxResult<Node<Expr>> {
    let generators = self.comprehension_fors()?;
    self.require(close)?;
    Ok(
      Node::new(self.since_checkpoint(start), ComprehensionExpr {
        kind,
        element,
        value,
        generators,
      })
      .into_wrapped(),
    )
  }

  // Remaining comma-separated elements up to and including `close`.
  fn display_elements(&mut self, close: TT, elements: &mut Vec<Node<Expr>>) -> SyntaxResult<()> {
    while !self.consume_if(close).is_match() {
      elements.push(self.star_named_expr()?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(close)?;
        break;
      };
    }
    Ok(())
  }

  /// A parenthesized expression, tuple, yield, or generator expression.
  pub fn paren_display(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    self.require(TT::ParenthesisOpen)?;
    if self.consume_if(TT::ParenthesisClose).is_match() {
      return Ok(
        Node::new(self.since_checkpoint(&start), TupleExpr {
          elements: Vec::new(),
        })
        .into_wrapped(),
      );
    };
    if self.peek().typ == TT::KeywordYield {
      let expr = self.yield_expr()?;
      self.require(TT::ParenthesisClose)?;
      return Ok(expr);
    };
    let first = self.star_named_expr()?;
    if self.peek_comprehension_for() {
      return self.comprehension(
        &start,
        TT::ParenthesisClose,
        ComprehensionKind::Generator,
        first,
        None,
      );
    };
    if !self.consume_if(TT::Comma).is_match() {
      // Parentheses only group; the inner expression keeps its own location.
      self.require(TT::ParenthesisClose)?;
      return Ok(first);
    };
    let mut elements = vec![first];
    self.display_elements(TT::ParenthesisClose, &mut elements)?;
    Ok(Node::new(self.since_checkpoint(&start), TupleExpr { elements }).into_wrapped())
  }

  pub fn list_display(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    self.require(TT::BracketOpen)?;
    let mut elements = Vec::new();
    if self.peek().typ != TT::BracketClose {
      let first = self.star_named_expr()?;
      if self.peek_comprehension_for() {
        return self.comprehension(&start, TT::BracketClose, ComprehensionKind::List, first, None);
      };
      elements.push(first);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BracketClose)?;
        return Ok(Node::new(self.since_checkpoint(&start), ListExpr { elements }).into_wrapped());
      };
    };
    self.display_elements(TT::BracketClose, &mut elements)?;
    Ok(Node::new(self.since_checkpoint(&start), ListExpr { elements }).into_wrapped())
  }

  fn dict_entry(&mut self) -> SyntaxResult<DictEntry> {
    if self.consume_if(TT::AsteriskAsterisk).is_match() {
      let value = self.bitwise_or()?;
      return Ok(DictEntry { key: None, value });
    };
    let key = self.expr()?;
    self.require(TT::Colon)?;
    let value = self.expr()?;
    Ok(DictEntry {
      key: Some(key),
      value,
    })
  }

  /// A dict or set display or comprehension. `{}` is an empty dict.
  pub fn brace_display(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    self.require(TT::BraceOpen)?;
    let mut entries = Vec::new();
    if !matches!(self.peek().typ, TT::BraceClose | TT::AsteriskAsterisk) {
      let entry_start = self.checkpoint();
      let first = self.star_named_expr()?;
      if !self.consume_if(TT::Colon).is_match() {
        if self.peek_comprehension_for() {
          return self.comprehension(&start, TT::BraceClose, ComprehensionKind::Set, first, None);
        };
        let mut elements = vec![first];
        if self.consume_if(TT::Comma).is_match() {
          self.display_elements(TT::BraceClose, &mut elements)?;
        } else {
          self.require(TT::BraceClose)?;
        };
        return Ok(Node::new(self.since_checkpoint(&start), SetExpr { elements }).into_wrapped());
      };
      let value = self.expr()?;
      if self.peek_comprehension_for() {
        return self.comprehension(
          &start,
          TT::BraceClose,
          ComprehensionKind::Dict,
          first,
          Some(value),
        );
      };
      entries.push(Node::new(self.since_checkpoint(&entry_start), DictEntry {
        key: Some(first),
        value,
      }));
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BraceClose)?;
        return Ok(Node::new(self.since_checkpoint(&start), DictExpr { entries }).into_wrapped());
      };
    };
    entries.extend(self.list_with_loc(TT::Comma, TT::BraceClose, |p| p.dict_entry())?);
    Ok(Node::new(self.since_checkpoint(&start), DictExpr { entries }).into_wrapped())
  }
}
