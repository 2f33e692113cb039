use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::Module;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_module(&mut self) -> SyntaxResult<Node<Module>> {
    let body = self.stmts(TT::EOF)?;
    self.require(TT::EOF)?;
    Ok(Node::new(self.source_range(), Module { body }))
  }
}
