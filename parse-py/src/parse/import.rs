use super::Parser;
use crate::ast::import::ImportAlias;
use crate::ast::import::ImportFromNames;
use crate::ast::import::ImportFromStmt;
use crate::ast::import::ImportStmt;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn dotted_name(&mut self) -> SyntaxResult<String> {
    let mut name = self.require_identifier()?;
    while self.consume_if(TT::Dot).is_match() {
      name.push('.');
      name.push_str(&self.require_identifier()?);
    }
    Ok(name)
  }

  fn import_alias(&mut self, dotted: bool) -> SyntaxResult<ImportAlias> {
    let name = if dotted {
      self.dotted_name()?
    } else {
      self.require_identifier()?
    };
    let alias = self
      .consume_if(TT::KeywordAs)
      .and_then(|| self.require_identifier())?;
    Ok(ImportAlias { name, alias })
  }

  /// `import a.b as c, d`
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<ImportStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      let mut names = vec![p.with_loc(|p| p.import_alias(true))?];
      while p.consume_if(TT::Comma).is_match() {
        names.push(p.with_loc(|p| p.import_alias(true))?);
      }
      Ok(ImportStmt { names })
    })
  }

  /// `from ..m import a as b, c`, `from m import (a, b,)`, or `from m import *`
  pub fn import_from_stmt(&mut self) -> SyntaxResult<Node<ImportFromStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFrom)?;
      let mut level = 0;
      loop {
        if p.consume_if(TT::Dot).is_match() {
          level += 1;
        } else if p.consume_if(TT::DotDotDot).is_match() {
          level += 3;
        } else {
          break;
        };
      }
      let module = if p.peek().typ == TT::Identifier {
        Some(p.dotted_name()?)
      } else {
        None
      };
      if module.is_none() && level == 0 {
        return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("module name")));
      };
      p.require(TT::KeywordImport)?;
      let names = if p.consume_if(TT::Asterisk).is_match() {
        ImportFromNames::All
      } else if p.consume_if(TT::ParenthesisOpen).is_match() {
        let names = p.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| p.import_alias(false))?;
        if names.is_empty() {
          return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("imported name")));
        };
        ImportFromNames::Specific(names)
      } else {
        let mut names = vec![p.with_loc(|p| p.import_alias(false))?];
        while p.consume_if(TT::Comma).is_match() {
          names.push(p.with_loc(|p| p.import_alias(false))?);
        }
        ImportFromNames::Specific(names)
      };
      Ok(ImportFromStmt {
        level,
        module,
        names,
      })
    })
  }
}
