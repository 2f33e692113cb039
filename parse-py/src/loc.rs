use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use memchr::memchr_iter;
use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }

  /// 1-based line and column (in chars) of the start of this location within `source`.
  ///
  /// Offsets past the end of `source` are clamped to its end.
  pub fn start_line_col(&self, source: &str) -> (usize, usize) {
    let offset = min(self.0, source.len());
    let before = &source.as_bytes()[..offset];
    let line = memchr_iter(b'\n', before).count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    let col = source
      .get(line_start..offset)
      .map_or(offset - line_start, |s| s.chars().count())
      + 1;
    (line, col)
  }

  pub fn start_line(&self, source: &str) -> usize {
    self.start_line_col(source).0
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}
