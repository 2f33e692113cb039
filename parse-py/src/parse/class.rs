use super::Parser;
use crate::ast::class::ClassDef;
use crate::ast::func::Decorator;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn class_def(&mut self, decorators: Vec<Node<Decorator>>) -> SyntaxResult<ClassDef> {
    self.require(TT::KeywordClass)?;
    let name = self.class_or_func_name()?;
    let type_parameters = self.type_params()?;
    let arguments = if self.consume_if(TT::ParenthesisOpen).is_match() {
      self.call_args()?
    } else {
      Vec::new()
    };
    let body = self.block()?;
    Ok(ClassDef {
      decorators,
      name,
      type_parameters,
      arguments,
      body,
    })
  }
}
