use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the lexer and parser.
///
/// Diagnostic codes (prefix `PY`) are assigned per variant and are stable. `PY0001` is retired.
/// - `PY0002`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PY0003`: [`SyntaxErrorType::InvalidAssignmentTarget`]
/// - `PY0004`: [`SyntaxErrorType::InconsistentDedent`]
/// - `PY0005`: [`SyntaxErrorType::InconsistentTabs`]
/// - `PY0006`: [`SyntaxErrorType::UnexpectedIndent`]
/// - `PY0007`: [`SyntaxErrorType::ExpectedIndentedBlock`]
/// - `PY0008`: [`SyntaxErrorType::UnterminatedString`]
/// - `PY0009`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `PY0010`: [`SyntaxErrorType::UnmatchedBracket`]
/// - `PY0011`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PY0012`: [`SyntaxErrorType::TryStatementHasNoHandlers`]
/// - `PY0013`: [`SyntaxErrorType::UnexpectedEnd`]
/// - `PY0014`: [`SyntaxErrorType::InvalidCharacter`]
/// - `PY0015`: [`SyntaxErrorType::NonDefaultArgumentFollowsDefault`]
/// - `PY0016`: [`SyntaxErrorType::NestingTooDeep`]
/// - `PY0017`: [`SyntaxErrorType::PositionalArgumentFollowsKeyword`]
/// - `PY0018`: [`SyntaxErrorType::UnpackingFollowsKeywordUnpacking`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedSyntax(&'static str),
  InvalidAssignmentTarget,
  InconsistentDedent,
  InconsistentTabs,
  UnexpectedIndent,
  ExpectedIndentedBlock,
  UnterminatedString,
  MalformedLiteralNumber,
  UnmatchedBracket,
  RequiredTokenNotFound(TT),
  TryStatementHasNoHandlers,
  UnexpectedEnd,
  InvalidCharacter,
  NonDefaultArgumentFollowsDefault,
  NestingTooDeep,
  PositionalArgumentFollowsKeyword,
  UnpackingFollowsKeywordUnpacking,
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  pub fn code(&self) -> &'static str {
    self.typ.code()
  }

  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }

  /// 1-based line of the error within `source`.
  pub fn line(&self, source: &str) -> usize {
    self.loc.start_line(source)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} [token={:?}]", self.typ, self.actual_token)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::ExpectedSyntax(_) => "PY0002",
      SyntaxErrorType::InvalidAssignmentTarget => "PY0003",
      SyntaxErrorType::InconsistentDedent => "PY0004",
      SyntaxErrorType::InconsistentTabs => "PY0005",
      SyntaxErrorType::UnexpectedIndent => "PY0006",
      SyntaxErrorType::ExpectedIndentedBlock => "PY0007",
      SyntaxErrorType::UnterminatedString => "PY0008",
      SyntaxErrorType::MalformedLiteralNumber => "PY0009",
      SyntaxErrorType::UnmatchedBracket => "PY0010",
      SyntaxErrorType::RequiredTokenNotFound(_) => "PY0011",
      SyntaxErrorType::TryStatementHasNoHandlers => "PY0012",
      SyntaxErrorType::UnexpectedEnd => "PY0013",
      SyntaxErrorType::InvalidCharacter => "PY0014",
      SyntaxErrorType::NonDefaultArgumentFollowsDefault => "PY0015",
      SyntaxErrorType::NestingTooDeep => "PY0016",
      SyntaxErrorType::PositionalArgumentFollowsKeyword => "PY0017",
      SyntaxErrorType::UnpackingFollowsKeywordUnpacking => "PY0018",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidAssignmentTarget => "invalid assignment target".into(),
      SyntaxErrorType::InconsistentDedent => {
        "unindent does not match any outer indentation level".into()
      }
      SyntaxErrorType::InconsistentTabs => "inconsistent use of tabs and spaces in indentation".into(),
      SyntaxErrorType::UnexpectedIndent => "unexpected indent".into(),
      SyntaxErrorType::ExpectedIndentedBlock => "expected an indented block".into(),
      SyntaxErrorType::UnterminatedString => "unterminated string literal".into(),
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".into(),
      SyntaxErrorType::UnmatchedBracket => "unmatched bracket".into(),
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected token {:?}", token),
      SyntaxErrorType::TryStatementHasNoHandlers => {
        "try statement requires an except or finally block".into()
      }
      SyntaxErrorType::UnexpectedEnd => actual_token
        .map(|tok| format!("unexpected end before {:?}", tok))
        .unwrap_or_else(|| "unexpected end of input".into()),
      SyntaxErrorType::InvalidCharacter => "invalid character in source".into(),
      SyntaxErrorType::NonDefaultArgumentFollowsDefault => {
        "parameter without a default follows parameter with a default".into()
      }
      SyntaxErrorType::NestingTooDeep => "too deeply nested".into(),
      SyntaxErrorType::PositionalArgumentFollowsKeyword => {
        "positional argument follows keyword argument".into()
      }
      SyntaxErrorType::UnpackingFollowsKeywordUnpacking => {
        "iterable argument unpacking follows keyword argument unpacking".into()
      }
    }
  }
}
