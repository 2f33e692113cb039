pub mod display;
pub mod lit;

use super::operator::BINARY_OPERATOR_MAPPING;
use super::operator::COMPARISON_OPERATOR_MAPPING;
use super::operator::UNARY_OPERATOR_MAPPING;
use super::Parser;
use crate::ast::expr::AttributeExpr;
use crate::ast::expr::AwaitExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::BoolOpExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::CompareExpr;
use crate::ast::expr::ComprehensionExpr;
use crate::ast::expr::ComprehensionKind;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::LambdaExpr;
use crate::ast::expr::LitBoolExpr;
use crate::ast::expr::LitEllipsisExpr;
use crate::ast::expr::LitNoneExpr;
use crate::ast::expr::NamedExpr;
use crate::ast::expr::SliceExpr;
use crate::ast::expr::StarredExpr;
use crate::ast::expr::SubscriptExpr;
use crate::ast::expr::TupleExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::Unpack;
use crate::ast::expr::YieldExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::EXPR_STARTS;
use crate::token::TT;

impl<'a> Parser<'a> {
  // Items separated by commas. Becomes a tuple if there is at least one comma.
  fn expr_list<F>(&mut self, item: F) -> SyntaxResult<Node<Expr>>
  where
    F: Fn(&mut Self) -> SyntaxResult<Node<Expr>>,
  {
    let start = self.checkpoint();
    let first = item(self)?;
    if self.peek().typ != TT::Comma {
      return Ok(first);
    };
    let mut elements = vec![first];
    while self.consume_if(TT::Comma).is_match() {
      if !EXPR_STARTS.contains(&self.peek().typ) {
        break;
      };
      elements.push(item(self)?);
    }
    Ok(Node::new(self.since_checkpoint(&start), TupleExpr { elements }).into_wrapped())
  }

  /// An expression list as found in expression statements and on the right side of assignments, e.g. `a, *b`.
  pub fn star_exprs(&mut self) -> SyntaxResult<Node<Expr>> {
    self.expr_list(|p| p.star_expr())
  }

  pub fn star_named_exprs(&mut self) -> SyntaxResult<Node<Expr>> {
    self.expr_list(|p| p.star_named_expr())
  }

  pub fn yield_or_star_exprs(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ == TT::KeywordYield {
      self.yield_expr()
    } else {
      self.star_exprs()
    }
  }

  fn starred(&mut self) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::Asterisk)?;
          let value = p.bitwise_or()?;
          Ok(StarredExpr { value })
        })?
        .into_wrapped(),
    )
  }

  pub fn star_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ == TT::Asterisk {
      self.starred()
    } else {
      self.expr()
    }
  }

  pub fn star_named_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ == TT::Asterisk {
      self.starred()
    } else {
      self.named_expr()
    }
  }

  /// Targets of `for` and comprehensions, which stop before `in`.
  pub fn target_list(&mut self) -> SyntaxResult<Node<Expr>> {
    let target = self.expr_list(|p| {
      if p.peek().typ == TT::Asterisk {
        p.starred()
      } else {
        p.bitwise_or()
      }
    })?;
    if !target.stx.is_assignment_target() {
      return Err(target.error(SyntaxErrorType::InvalidAssignmentTarget));
    };
    Ok(target)
  }

  /// A single assignment target, as in `with ... as target` and `del`.
  pub fn target(&mut self) -> SyntaxResult<Node<Expr>> {
    let target = self.bitwise_or()?;
    if !target.stx.is_assignment_target() {
      return Err(target.error(SyntaxErrorType::InvalidAssignmentTarget));
    };
    Ok(target)
  }

  pub fn named_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let (a, b) = self.peek_2();
    if a.typ != TT::Identifier || b.typ != TT::ColonEquals {
      return self.expr();
    };
    Ok(
      self
        .with_loc(|p| {
          let target = p.with_loc(|p| {
            let name = p.require_identifier()?;
            Ok(IdExpr { name })
          })?;
          p.require(TT::ColonEquals)?;
          let value = p.expr()?;
          Ok(NamedExpr { target, value })
        })?
        .into_wrapped(),
    )
  }

  /// A single expression, including conditional expressions and lambdas, but not tuples.
  pub fn expr(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ == TT::KeywordLambda {
      return self.nested(|p| p.lambda_expr());
    };
    let start = self.checkpoint();
    let consequent = self.or_test()?;
    if !self.consume_if(TT::KeywordIf).is_match() {
      return Ok(consequent);
    };
    let test = self.or_test()?;
    self.require(TT::KeywordElse)?;
    let alternate = self.nested(|p| p.expr())?;
    Ok(
      Node::new(self.since_checkpoint(&start), CondExpr {
        test,
        consequent,
        alternate,
      })
      .into_wrapped(),
    )
  }

  fn lambda_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordLambda)?;
          let parameters = p.params(TT::Colon, false)?;
          let body = p.expr()?;
          Ok(LambdaExpr { parameters, body })
        })?
        .into_wrapped(),
    )
  }

  pub fn yield_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordYield)?;
          if p.consume_if(TT::KeywordFrom).is_match() {
            let value = p.expr()?;
            return Ok(YieldExpr {
              value: Some(value),
              delegate: true,
            });
          };
          let value = if EXPR_STARTS.contains(&p.peek().typ) {
            Some(p.star_exprs()?)
          } else {
            None
          };
          Ok(YieldExpr {
            value,
            delegate: false,
          })
        })?
        .into_wrapped(),
    )
  }

  fn bool_op<F>(&mut self, operator: OperatorName, keyword: TT, operand: F) -> SyntaxResult<Node<Expr>>
  where
    F: Fn(&mut Self) -> SyntaxResult<Node<Expr>>,
  {
    let start = self.checkpoint();
    let first = operand(self)?;
    if self.peek().typ != keyword {
      return Ok(first);
    };
    let mut values = vec![first];
    while self.consume_if(keyword).is_match() {
      values.push(operand(self)?);
    }
    Ok(Node::new(self.since_checkpoint(&start), BoolOpExpr { operator, values }).into_wrapped())
  }

  /// A disjunction: everything except conditional expressions and lambdas.
  pub fn or_test(&mut self) -> SyntaxResult<Node<Expr>> {
    self.bool_op(OperatorName::LogicalOr, TT::KeywordOr, |p| p.and_test())
  }

  fn and_test(&mut self) -> SyntaxResult<Node<Expr>> {
    self.bool_op(OperatorName::LogicalAnd, TT::KeywordAnd, |p| p.not_test())
  }

  fn not_test(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ != TT::KeywordNot {
      return self.comparison();
    };
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordNot)?;
          let argument = p.nested(|p| p.not_test())?;
          Ok(UnaryExpr {
            operator: OperatorName::LogicalNot,
            argument,
          })
        })?
        .into_wrapped(),
    )
  }

  fn comparison_operator(&mut self) -> Option<OperatorName> {
    let (a, b) = self.peek_2();
    let (name, len) = match (a.typ, b.typ) {
      (TT::KeywordNot, TT::KeywordIn) => (OperatorName::NotIn, 2),
      (TT::KeywordIs, TT::KeywordNot) => (OperatorName::IsNot, 2),
      (typ, _) => (*COMPARISON_OPERATOR_MAPPING.get(&typ)?, 1),
    };
    for _ in 0..len {
      self.consume();
    }
    Some(name)
  }

  fn comparison(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let left = self.bitwise_or()?;
    let mut operators = Vec::new();
    let mut comparators = Vec::new();
    while let Some(operator) = self.comparison_operator() {
      operators.push(operator);
      comparators.push(self.bitwise_or()?);
    }
    if operators.is_empty() {
      return Ok(left);
    };
    Ok(
      Node::new(self.since_checkpoint(&start), CompareExpr {
        left,
        operators,
        comparators,
      })
      .into_wrapped(),
    )
  }

  pub fn bitwise_or(&mut self) -> SyntaxResult<Node<Expr>> {
    self.binary(OPERATORS[&OperatorName::BitwiseOr].precedence)
  }

  // Precedence climbing over the left-associative binary operators.
  fn binary(&mut self, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.factor()?;
    loop {
      let t = self.peek();
      let Some(operator) = BINARY_OPERATOR_MAPPING.get(&t.typ) else {
        break;
      };
      if operator.precedence < min_prec {
        break;
      };
      self.consume();
      let right = self.binary(operator.precedence + 1)?;
      let loc = left.loc + right.loc;
      left = Node::new(loc, BinaryExpr {
        operator: operator.name,
        left,
        right,
      })
      .into_wrapped();
    }
    Ok(left)
  }

  fn factor(&mut self) -> SyntaxResult<Node<Expr>> {
    let Some(&operator) = UNARY_OPERATOR_MAPPING.get(&self.peek().typ) else {
      return self.power();
    };
    Ok(
      self
        .with_loc(|p| {
          p.consume();
          let argument = p.nested(|p| p.factor())?;
          Ok(UnaryExpr { operator, argument })
        })?
        .into_wrapped(),
    )
  }

  // `-2 ** 2` is `-(2 ** 2)` but `2 ** -2` is `2 ** (-2)`.
  fn power(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let left = self.await_primary()?;
    if !self.consume_if(TT::AsteriskAsterisk).is_match() {
      return Ok(left);
    };
    let right = self.nested(|p| p.factor())?;
    Ok(
      Node::new(self.since_checkpoint(&start), BinaryExpr {
        operator: OperatorName::Exponentiation,
        left,
        right,
      })
      .into_wrapped(),
    )
  }

  fn await_primary(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ != TT::KeywordAwait {
      return self.primary();
    };
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordAwait)?;
          let value = p.primary()?;
          Ok(AwaitExpr { value })
        })?
        .into_wrapped(),
    )
  }

  fn primary(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let mut expr = self.atom()?;
    loop {
      expr = match self.peek().typ {
        TT::Dot => {
          self.consume();
          let attr = self.require_identifier()?;
          Node::new(self.since_checkpoint(&start), AttributeExpr { value: expr, attr }).into_wrapped()
        }
        TT::ParenthesisOpen => {
          let arguments = self.nested(|p| {
            p.consume();
            p.call_args()
          })?;
          Node::new(self.since_checkpoint(&start), CallExpr {
            callee: expr,
            arguments,
          })
          .into_wrapped()
        }
        TT::BracketOpen => {
          let index = self.nested(|p| {
            p.consume();
            let index = p.subscript()?;
            p.require(TT::BracketClose)?;
            Ok(index)
          })?;
          Node::new(self.since_checkpoint(&start), SubscriptExpr { value: expr, index }).into_wrapped()
        }
        _ => break,
      };
    }
    Ok(expr)
  }

  /// Arguments after the opening parenthesis, up to and including the closing one.
  pub fn call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    let args = self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| p.call_arg())?;
    // Positional arguments end at the first keyword or `**`; `*` ends at the first `**`.
    let mut seen_keyword = false;
    let mut seen_mapping = false;
    for arg in args.iter() {
      match (&arg.stx.keyword, arg.stx.unpack) {
        (Some(_), _) => seen_keyword = true,
        (None, Unpack::Mapping) => {
          seen_keyword = true;
          seen_mapping = true;
        }
        (None, Unpack::Iterable) if seen_mapping => {
          return Err(arg.error(SyntaxErrorType::UnpackingFollowsKeywordUnpacking))
        }
        (None, Unpack::None) if seen_keyword => {
          return Err(arg.error(SyntaxErrorType::PositionalArgumentFollowsKeyword))
        }
        (None, _) => {}
      };
    }
    Ok(args)
  }

  fn call_arg(&mut self) -> SyntaxResult<CallArg> {
    let (a, b) = self.peek_2();
    let unpack = match a.typ {
      TT::Asterisk => Unpack::Iterable,
      TT::AsteriskAsterisk => Unpack::Mapping,
      TT::Identifier if b.typ == TT::Equals => {
        let name = self.require_identifier()?;
        self.require(TT::Equals)?;
        return Ok(CallArg {
          keyword: Some(name),
          unpack: Unpack::None,
          value: self.expr()?,
        });
      }
      _ => {
        let start = self.checkpoint();
        let mut value = self.named_expr()?;
        // A lone generator argument doesn't need its own parentheses: `sum(x for x in xs)`.
        if self.peek_comprehension_for() {
          let generators = self.comprehension_fors()?;
          value = Node::new(self.since_checkpoint(&start), ComprehensionExpr {
            kind: ComprehensionKind::Generator,
            element: value,
            value: None,
            generators,
          })
          .into_wrapped();
        };
        return Ok(CallArg {
          keyword: None,
          unpack: Unpack::None,
          value,
        });
      }
    };
    self.consume();
    let value = self.expr()?;
    Ok(CallArg {
      keyword: None,
      unpack,
      value,
    })
  }

  /// The contents of `[...]` after a primary.
  fn subscript(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let first = self.slice_item()?;
    if self.peek().typ != TT::Comma {
      return Ok(first);
    };
    let mut elements = vec![first];
    while self.consume_if(TT::Comma).is_match() {
      if self.peek().typ == TT::BracketClose {
        break;
      };
      elements.push(self.slice_item()?);
    }
    Ok(Node::new(self.since_checkpoint(&start), TupleExpr { elements }).into_wrapped())
  }

  fn slice_bound(&mut self) -> SyntaxResult<Option<Node<Expr>>> {
    Ok(match self.peek().typ {
      TT::Colon | TT::Comma | TT::BracketClose => None,
      _ => Some(self.expr()?),
    })
  }

  fn slice_item(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let lower = match self.peek().typ {
      TT::Colon => None,
      _ => {
        let value = self.star_named_expr()?;
        if self.peek().typ != TT::Colon {
          return Ok(value);
        };
        Some(value)
      }
    };
    self.require(TT::Colon)?;
    let upper = self.slice_bound()?;
    let step = if self.consume_if(TT::Colon).is_match() {
      self.slice_bound()?
    } else {
      None
    };
    Ok(Node::new(self.since_checkpoint(&start), SliceExpr { lower, upper, step }).into_wrapped())
  }

  fn atom(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    let expr: Node<Expr> = match t.typ {
      TT::Identifier => {
        self.consume();
        Node::new(t.loc, IdExpr {
          name: self.string(t.loc),
        })
        .into_wrapped()
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        self.consume();
        Node::new(t.loc, LitBoolExpr {
          value: t.typ == TT::LiteralTrue,
        })
        .into_wrapped()
      }
      TT::LiteralNone => {
        self.consume();
        Node::new(t.loc, LitNoneExpr {}).into_wrapped()
      }
      TT::DotDotDot => {
        self.consume();
        Node::new(t.loc, LitEllipsisExpr {}).into_wrapped()
      }
      TT::LiteralNumber => self.lit_num()?,
      TT::LiteralString => self.lit_str()?,
      TT::ParenthesisOpen => self.nested(|p| p.paren_display())?,
      TT::BracketOpen => self.nested(|p| p.list_display())?,
      TT::BraceOpen => self.nested(|p| p.brace_display())?,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    };
    Ok(expr)
  }
}
