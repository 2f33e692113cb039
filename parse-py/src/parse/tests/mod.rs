
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::lex::Lexer;
use crate::parse;
use crate::token::TT;

pub(crate) fn body(source: &str) -> Vec<Node<Stmt>> {
  match parse(source) {
    Ok(module) => module.stx.body,
    Err(err) => panic!("failed to parse {:?}: {:?}", source, err),
  }
}

#[test]
fn test_parser() {
  let lexer = Lexer::new("x = 1\n");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::Identifier);

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::Identifier);

  // Lookahead doesn't move the position but fills the buffer.
  let (a, b) = p.peek_2();
  assert_eq!((a.typ, b.typ), (TT::Equals, TT::LiteralNumber));
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 3);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 3);
  assert_eq!(p.peek().typ, TT::Identifier);
}

#[test]
fn test_since_checkpoint_skips_structural_tokens() {
  let mut p = Parser::new(Lexer::new("if x:\n  y\nz\n"));
  let cp = p.checkpoint();
  for _ in 0..8 {
    p.consume();
  }
  // Consumed through the DEDENT before `z`, but the range ends at `y`.
  assert_eq!(p.since_checkpoint(&cp), crate::loc::Loc(0, 9));
  assert_eq!(p.peek().typ, TT::Identifier);
}
