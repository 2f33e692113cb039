use super::Parser;
use crate::ast::func::ClassOrFuncName;
use crate::ast::func::Decorator;
use crate::ast::func::FuncDef;
use crate::ast::func::Param;
use crate::ast::func::ParamKind;
use crate::ast::func::TypeParam;
use crate::ast::func::TypeParamKind;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn class_or_func_name(&mut self) -> SyntaxResult<Node<ClassOrFuncName>> {
    self.with_loc(|p| {
      let name = p.require_identifier()?;
      Ok(ClassOrFuncName { name })
    })
  }

  pub fn decorators(&mut self) -> SyntaxResult<Vec<Node<Decorator>>> {
    self.repeat_while_with_loc(
      |p| p.peek().typ == TT::At,
      |p| {
        p.require(TT::At)?;
        let expression = p.named_expr()?;
        p.require(TT::Newline)?;
        Ok(Decorator { expression })
      },
    )
  }

  /// A function or class definition, with any decorators. Its location starts at the first decorator.
  pub fn definition(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    let decorators = self.decorators()?;
    let t = self.peek();
    let stmt: Node<Stmt> = match t.typ {
      TT::KeywordClass => {
        let stx = self.class_def(decorators)?;
        Node::new(self.since_checkpoint(&start), stx).into_wrapped()
      }
      TT::KeywordAsync | TT::KeywordDef => {
        let stx = self.func_def(decorators)?;
        Node::new(self.since_checkpoint(&start), stx).into_wrapped()
      }
      _ => {
        return Err(t.error(SyntaxErrorType::ExpectedSyntax(
          "function or class definition",
        )))
      }
    };
    Ok(stmt)
  }

  fn func_def(&mut self, decorators: Vec<Node<Decorator>>) -> SyntaxResult<FuncDef> {
    let async_ = self.consume_if(TT::KeywordAsync).is_match();
    self.require(TT::KeywordDef)?;
    let name = self.class_or_func_name()?;
    let type_parameters = self.type_params()?;
    self.require(TT::ParenthesisOpen)?;
    let parameters = self.params(TT::ParenthesisClose, true)?;
    let returns = self
      .consume_if(TT::HyphenChevronRight)
      .and_then(|| self.expr())?;
    let body = self.block()?;
    Ok(FuncDef {
      decorators,
      async_,
      name,
      type_parameters,
      parameters,
      returns,
      body,
    })
  }

  /// An optional `[T, *Ts, **P]` list.
  pub fn type_params(&mut self) -> SyntaxResult<Vec<Node<TypeParam>>> {
    if !self.consume_if(TT::BracketOpen).is_match() {
      return Ok(Vec::new());
    };
    let params = self.list_with_loc(TT::Comma, TT::BracketClose, |p| p.type_param())?;
    if params.is_empty() {
      return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("type parameter")));
    };
    Ok(params)
  }

  fn type_param(&mut self) -> SyntaxResult<TypeParam> {
    let kind = if self.consume_if(TT::Asterisk).is_match() {
      TypeParamKind::TypeVarTuple
    } else if self.consume_if(TT::AsteriskAsterisk).is_match() {
      TypeParamKind::ParamSpec
    } else {
      TypeParamKind::TypeVar
    };
    let name = self.require_identifier()?;
    let bound = if kind == TypeParamKind::TypeVar && self.consume_if(TT::Colon).is_match() {
      Some(self.expr()?)
    } else {
      None
    };
    let default_value = self.consume_if(TT::Equals).and_then(|| self.star_expr())?;
    Ok(TypeParam {
      name,
      kind,
      bound,
      default_value,
    })
  }

  fn param(&mut self, kind: ParamKind, annotations: bool) -> SyntaxResult<Param> {
    let name = self.require_identifier()?;
    let annotation = if annotations && self.consume_if(TT::Colon).is_match() {
      // `*args: *Ts`
      Some(if kind == ParamKind::VarPositional {
        self.star_expr()?
      } else {
        self.expr()?
      })
    } else {
      None
    };
    let default_value = match kind {
      ParamKind::VarPositional | ParamKind::VarKeyword => None,
      _ => self.consume_if(TT::Equals).and_then(|| self.expr())?,
    };
    Ok(Param {
      name,
      kind,
      annotation,
      default_value,
    })
  }

  /// Parameters up to and including `close`: `)` for functions, `:` for lambdas, which also can't have annotations.
  pub fn params(&mut self, close: TT, annotations: bool) -> SyntaxResult<Vec<Node<Param>>> {
    let mut params: Vec<Node<Param>> = Vec::new();
    let mut kind = ParamKind::Regular;
    let mut seen_default = false;
    let mut seen_var_keyword = false;
    while !self.consume_if(close).is_match() {
      let t = self.peek();
      if seen_var_keyword {
        return Err(t.error(SyntaxErrorType::ExpectedSyntax("end of parameters")));
      };
      match t.typ {
        TT::Slash => {
          self.consume();
          if kind != ParamKind::Regular
            || params.is_empty()
            || params.iter().any(|p| p.stx.kind == ParamKind::PositionalOnly)
          {
            return Err(t.error(SyntaxErrorType::ExpectedSyntax("parameter before `/`")));
          };
          for param in params.iter_mut() {
            param.stx.kind = ParamKind::PositionalOnly;
          }
        }
        TT::Asterisk if kind != ParamKind::KeywordOnly => {
          self.consume();
          // A bare `*` only marks the start of keyword-only parameters.
          if self.peek().typ != TT::Comma {
            params.push(self.with_loc(|p| p.param(ParamKind::VarPositional, annotations))?);
          };
          kind = ParamKind::KeywordOnly;
        }
        TT::AsteriskAsterisk => {
          self.consume();
          params.push(self.with_loc(|p| p.param(ParamKind::VarKeyword, annotations))?);
          seen_var_keyword = true;
        }
        _ => {
          let param = self.with_loc(|p| p.param(kind, annotations))?;
          if kind == ParamKind::Regular {
            match param.stx.default_value {
              Some(_) => seen_default = true,
              None if seen_default => {
                return Err(param.error(SyntaxErrorType::NonDefaultArgumentFollowsDefault))
              }
              None => {}
            };
          };
          params.push(param);
        }
      };
      if !self.consume_if(TT::Comma).is_match() {
        self.require(close)?;
        break;
      };
    }
    Ok(params)
  }
}
