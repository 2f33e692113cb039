use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod class;
pub mod drive;
pub mod expr;
pub mod func;
pub mod import;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f()?) } else { None })
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

// Structural tokens don't contribute to the source range of the nodes that contain them.
fn is_significant(t: &Token) -> bool {
  !matches!(t.typ, TT::Newline | TT::Indent | TT::Dedent)
}

/// Nesting depth of brackets and recursive operators at which parsing fails.
pub const MAX_NESTING: usize = 200;

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<Token>,
  next_tok_i: usize,
  nesting: usize,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, so that every function shares `<'a>` and lookahead state without redeclaring them.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
      nesting: 0,
    }
  }

  /// Runs `f` one nesting level deeper, failing with `NestingTooDeep` at the next token once `MAX_NESTING` levels are open.
  pub fn nested<T, F: FnOnce(&mut Self) -> SyntaxResult<T>>(&mut self, f: F) -> SyntaxResult<T> {
    if self.nesting + 1 >= MAX_NESTING {
      return Err(self.peek().error(SyntaxErrorType::NestingTooDeep));
    };
    self.nesting += 1;
    let res = f(self);
    self.nesting -= 1;
    res
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  /// The lexical error that stopped tokenization, if any. It takes priority over any parse error at or after it.
  pub fn lexer_error(&self) -> Option<&SyntaxError> {
    self.lexer.error()
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.lexer.source()[loc.0..loc.1]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  /// The range covered by the significant tokens consumed since `checkpoint`.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let consumed = &self.buf[checkpoint.next_tok_i..self.next_tok_i];
    let start = consumed.iter().find(|t| is_significant(t));
    let end = consumed.iter().rev().find(|t| is_significant(t));
    match (start, end) {
      (Some(start), Some(end)) => Loc(start.loc.0, end.loc.1),
      _ => {
        let at = self.buf[..self.next_tok_i].last().map_or(0, |t| t.loc.1);
        Loc(at, at)
      }
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, keep: K) -> (bool, Token) {
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer);
      self.buf.push(token);
    }
    let t = self.buf[self.next_tok_i].clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume(&mut self) -> Token {
    self.forward(|_| true).1
  }

  pub fn peek(&mut self) -> Token {
    self.forward(|_| false).1
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(|_| true);
    let b = self.forward(|_| true);
    self.restore_checkpoint(cp);
    (a.1, b.1)
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(|_| true);
    let b = self.forward(|_| true);
    let c = self.forward(|_| true);
    self.restore_checkpoint(cp);
    (a.1, b.1, c.1)
  }

  /// Whether the next token is the identifier `word`, which is a keyword only in some positions (e.g. `match`, `case`, `type`).
  pub fn peek_soft_keyword(&mut self, word: &str) -> bool {
    let t = self.peek();
    t.typ == TT::Identifier && self.str(t.loc) == word
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let (matched, t) = self.forward(|t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn require_predicate<P: FnOnce(TT) -> bool>(
    &mut self,
    pred: P,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    let t = self.consume();
    if !pred(t.typ) {
      Err(t.error(SyntaxErrorType::ExpectedSyntax(expected)))
    } else {
      Ok(t)
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.consume();
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  /// Requires an identifier and returns its name.
  pub fn require_identifier(&mut self) -> SyntaxResult<String> {
    let t = self.require_predicate(|t| t == TT::Identifier, "identifier")?;
    Ok(self.string(t.loc))
  }
}
