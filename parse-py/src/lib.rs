use ast::node::Node;
use ast::stx::Module;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;
use std::panic::resume_unwind;
use std::thread;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod token;

// Room for the deepest nesting the parser accepts, independent of the caller's stack.
const PARSER_STACK_SIZE: usize = 16 * 1024 * 1024;

fn parse_on_current_thread(source: &str) -> SyntaxResult<Node<Module>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  let result = parser.parse_module();
  match (result, parser.lexer_error()) {
    (Ok(_), Some(lex_err)) => Err(lex_err.clone()),
    (Err(err), Some(lex_err)) if lex_err.loc.0 <= err.loc.0 => Err(lex_err.clone()),
    (result, _) => result,
  }
}

/// Parses a Python module. Lexical errors take priority over parse errors at or after them.
///
/// Parsing runs on a worker thread with its own fixed stack, so nesting up to the parser's limit
/// is accepted regardless of the calling thread's stack size.
pub fn parse(source: &str) -> SyntaxResult<Node<Module>> {
  thread::scope(|s| {
    let worker = thread::Builder::new()
      .name("parse-py".into())
      .stack_size(PARSER_STACK_SIZE)
      .spawn_scoped(s, || parse_on_current_thread(source));
    match worker {
      Ok(handle) => match handle.join() {
        Ok(result) => result,
        Err(payload) => resume_unwind(payload),
      },
      // Threads may be unavailable, e.g. on wasm.
      Err(_) => parse_on_current_thread(source),
    }
  })
}
