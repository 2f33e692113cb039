use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  // Special token used to represent invalid source code. The lexer records the actual error and stops producing tokens after this one.
  Invalid,
  // Structural tokens derived from line breaks and indentation. NEWLINE ends a logical line; INDENT and DEDENT always have an empty loc.
  Dedent,
  Indent,
  Newline,

  Ampersand,
  AmpersandEquals,
  Asterisk,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  AsteriskEquals,
  At,
  AtEquals,
  Bar,
  BarEquals,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  CaretEquals,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronLeftEquals,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  ColonEquals,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsEquals,
  ExclamationEquals,
  Hyphen,
  HyphenChevronRight,
  HyphenEquals,
  Identifier,
  KeywordAnd,
  KeywordAs,
  KeywordAssert,
  KeywordAsync,
  KeywordAwait,
  KeywordBreak,
  KeywordClass,
  KeywordContinue,
  KeywordDef,
  KeywordDel,
  KeywordElif,
  KeywordElse,
  KeywordExcept,
  KeywordFinally,
  KeywordFor,
  KeywordFrom,
  KeywordGlobal,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordIs,
  KeywordLambda,
  KeywordNonlocal,
  KeywordNot,
  KeywordOr,
  KeywordPass,
  KeywordRaise,
  KeywordReturn,
  KeywordTry,
  KeywordWhile,
  KeywordWith,
  KeywordYield,
  LiteralFalse,
  LiteralNone,
  LiteralNumber,
  LiteralString,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  Semicolon,
  Slash,
  SlashEquals,
  SlashSlash,
  SlashSlashEquals,
  Tilde,
}

impl TT {
  pub fn is_open_bracket(self) -> bool {
    matches!(self, TT::ParenthesisOpen | TT::BracketOpen | TT::BraceOpen)
  }

  pub fn is_close_bracket(self) -> bool {
    matches!(self, TT::ParenthesisClose | TT::BracketClose | TT::BraceClose)
  }

  pub fn closing_bracket(self) -> Option<TT> {
    match self {
      TT::ParenthesisOpen => Some(TT::ParenthesisClose),
      TT::BracketOpen => Some(TT::BracketClose),
      TT::BraceOpen => Some(TT::BraceClose),
      _ => None,
    }
  }
}

// Tokens that can begin an expression, used to decide whether a trailing comma ends a tuple or list of items.
pub static EXPR_STARTS: Lazy<HashSet<TT>> = Lazy::new(|| {
  let mut set = HashSet::<TT>::new();
  set.insert(TT::Identifier);
  set.insert(TT::LiteralFalse);
  set.insert(TT::LiteralNone);
  set.insert(TT::LiteralNumber);
  set.insert(TT::LiteralString);
  set.insert(TT::LiteralTrue);
  set.insert(TT::DotDotDot);
  set.insert(TT::ParenthesisOpen);
  set.insert(TT::BracketOpen);
  set.insert(TT::BraceOpen);
  set.insert(TT::Hyphen);
  set.insert(TT::Plus);
  set.insert(TT::Tilde);
  set.insert(TT::Asterisk);
  set.insert(TT::KeywordAwait);
  set.insert(TT::KeywordLambda);
  set.insert(TT::KeywordNot);
  set
});

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
