use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::DIGIT_BIN;
use crate::char::DIGIT_HEX;
use crate::char::DIGIT_OCT;
use crate::char::STRING_PREFIX;
use crate::char::WHITESPACE;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr2;
use memchr::memchr3;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

// Contains the match length.
#[derive(Copy, Clone)]
struct Match(usize);

impl Match {
  pub fn len(&self) -> usize {
    self.0
  }
}

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
}

impl PatternMatcher {
  pub fn new<D: AsRef<str>>(patterns: Vec<(TT, D)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let byte_syns: Vec<Vec<u8>> = syns.iter().map(|s| s.as_ref().as_bytes().to_vec()).collect();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(StartKind::Anchored)
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(byte_syns)
      .expect("operator patterns form a valid automaton");
    PatternMatcher {
      patterns: tts,
      matcher,
    }
  }

  pub fn find(&self, lexer: &Lexer) -> LexResult<(TT, Match)> {
    self
      .matcher
      .find(Input::new(&lexer.source[lexer.next..]).anchored(Anchored::Yes))
      .map(|m| (self.patterns[m.pattern().as_usize()], Match(m.end())))
      .ok_or(LexNotFound)
  }
}

#[derive(Debug)]
struct LexNotFound;

type LexResult<T> = Result<T, LexNotFound>;

// Indentation width measured twice: with tabs advancing to the next multiple of 8, and with tabs counting as 1. The two must order consistently against every enclosing level.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
struct IndentLevel {
  tab8: usize,
  tab1: usize,
}

/// Python tokenizer.
///
/// Unlike a context-free tokenizer, it tracks enclosing brackets (inside which line breaks are
/// insignificant) and the indentation stack (which turns leading whitespace into INDENT/DEDENT).
/// The first error is recorded and reported through [`Lexer::error`]; the offending token is
/// returned as [`TT::Invalid`] and every later call returns [`TT::EOF`].
pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  indents: Vec<IndentLevel>,
  pending_dedents: usize,
  brackets: Vec<(TT, Loc)>,
  at_line_start: bool,
  line_has_tokens: bool,
  error: Option<SyntaxError>,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: if code.starts_with('\u{FEFF}') { '\u{FEFF}'.len_utf8() } else { 0 },
      indents: vec![IndentLevel::default()],
      pending_dedents: 0,
      brackets: Vec::new(),
      at_line_start: true,
      line_has_tokens: false,
      error: None,
    }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  /// The error that produced the [`TT::Invalid`] token, if any.
  pub fn error(&self) -> Option<&SyntaxError> {
    self.error.as_ref()
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  fn remaining(&self) -> usize {
    self.end() - self.next
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn peek_or_eof(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  fn rest_starts_with(&self, pat: &str) -> bool {
    self.source[self.next..].starts_with(pat)
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  fn while_not_2_chars(&self, a: char, b: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii());
    Match(memchr2(a as u8, b as u8, self.source[self.next..].as_bytes()).unwrap_or(self.remaining()))
  }

  fn while_not_3_chars(&self, a: char, b: char, c: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii() && c.is_ascii());
    Match(
      memchr3(a as u8, b as u8, c as u8, self.source[self.next..].as_bytes())
        .unwrap_or(self.remaining()),
    )
  }

  fn while_chars(&self, chars: &CharFilter) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if chars.has(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn while_pred(&self, pred: impl Fn(char) -> bool) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if pred(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn consume(&mut self, m: Match) -> Match {
    self.next += m.len();
    m
  }

  fn skip_expect(&mut self, n: usize) {
    debug_assert!(self.next + n <= self.end());
    self.next += n;
  }

  /// Consumes `\n`, `\r\n`, or `\r` if present.
  fn skip_line_break(&mut self) -> bool {
    if self.rest_starts_with("\r\n") {
      self.skip_expect(2);
      true
    } else if self.rest_starts_with("\n") || self.rest_starts_with("\r") {
      self.skip_expect(1);
      true
    } else {
      false
    }
  }

  fn empty_token(&self, typ: TT) -> Token {
    Token {
      loc: Loc(self.next, self.next),
      typ,
    }
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

#[rustfmt::skip]
pub static OPERATORS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::Ampersand, "&");
  map.insert(TT::AmpersandEquals, "&=");
  map.insert(TT::Asterisk, "*");
  map.insert(TT::AsteriskAsterisk, "**");
  map.insert(TT::AsteriskAsteriskEquals, "**=");
  map.insert(TT::AsteriskEquals, "*=");
  map.insert(TT::At, "@");
  map.insert(TT::AtEquals, "@=");
  map.insert(TT::Bar, "|");
  map.insert(TT::BarEquals, "|=");
  map.insert(TT::BraceClose, "}");
  map.insert(TT::BraceOpen, "{");
  map.insert(TT::BracketClose, "]");
  map.insert(TT::BracketOpen, "[");
  map.insert(TT::Caret, "^");
  map.insert(TT::CaretEquals, "^=");
  map.insert(TT::ChevronLeft, "<");
  map.insert(TT::ChevronLeftChevronLeft, "<<");
  map.insert(TT::ChevronLeftChevronLeftEquals, "<<=");
  map.insert(TT::ChevronLeftEquals, "<=");
  map.insert(TT::ChevronRight, ">");
  map.insert(TT::ChevronRightChevronRight, ">>");
  map.insert(TT::ChevronRightChevronRightEquals, ">>=");
  map.insert(TT::ChevronRightEquals, ">=");
  map.insert(TT::Colon, ":");
  map.insert(TT::ColonEquals, ":=");
  map.insert(TT::Comma, ",");
  map.insert(TT::Dot, ".");
  map.insert(TT::DotDotDot, "...");
  map.insert(TT::Equals, "=");
  map.insert(TT::EqualsEquals, "==");
  map.insert(TT::ExclamationEquals, "!=");
  map.insert(TT::Hyphen, "-");
  map.insert(TT::HyphenChevronRight, "->");
  map.insert(TT::HyphenEquals, "-=");
  map.insert(TT::ParenthesisClose, ")");
  map.insert(TT::ParenthesisOpen, "(");
  map.insert(TT::Percent, "%");
  map.insert(TT::PercentEquals, "%=");
  map.insert(TT::Plus, "+");
  map.insert(TT::PlusEquals, "+=");
  map.insert(TT::Semicolon, ";");
  map.insert(TT::Slash, "/");
  map.insert(TT::SlashEquals, "/=");
  map.insert(TT::SlashSlash, "//");
  map.insert(TT::SlashSlashEquals, "//=");
  map.insert(TT::Tilde, "~");
  map
});

pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::KeywordAnd, "and");
  map.insert(TT::KeywordAs, "as");
  map.insert(TT::KeywordAssert, "assert");
  map.insert(TT::KeywordAsync, "async");
  map.insert(TT::KeywordAwait, "await");
  map.insert(TT::KeywordBreak, "break");
  map.insert(TT::KeywordClass, "class");
  map.insert(TT::KeywordContinue, "continue");
  map.insert(TT::KeywordDef, "def");
  map.insert(TT::KeywordDel, "del");
  map.insert(TT::KeywordElif, "elif");
  map.insert(TT::KeywordElse, "else");
  map.insert(TT::KeywordExcept, "except");
  map.insert(TT::KeywordFinally, "finally");
  map.insert(TT::KeywordFor, "for");
  map.insert(TT::KeywordFrom, "from");
  map.insert(TT::KeywordGlobal, "global");
  map.insert(TT::KeywordIf, "if");
  map.insert(TT::KeywordImport, "import");
  map.insert(TT::KeywordIn, "in");
  map.insert(TT::KeywordIs, "is");
  map.insert(TT::KeywordLambda, "lambda");
  map.insert(TT::KeywordNonlocal, "nonlocal");
  map.insert(TT::KeywordNot, "not");
  map.insert(TT::KeywordOr, "or");
  map.insert(TT::KeywordPass, "pass");
  map.insert(TT::KeywordRaise, "raise");
  map.insert(TT::KeywordReturn, "return");
  map.insert(TT::KeywordTry, "try");
  map.insert(TT::KeywordWhile, "while");
  map.insert(TT::KeywordWith, "with");
  map.insert(TT::KeywordYield, "yield");
  map.insert(TT::LiteralFalse, "False");
  map.insert(TT::LiteralNone, "None");
  map.insert(TT::LiteralTrue, "True");
  map
});

pub static KEYWORD_STRS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  HashMap::<&'static str, TT>::from_iter(KEYWORDS_MAPPING.iter().map(|(&tt, &s)| (s, tt)))
});

static SIG: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new(OPERATORS_MAPPING.iter().map(|(&k, &v)| (k, v)).collect())
});

// Indentation levels open at once, counting the unindented module level.
const MAX_INDENT: usize = 100;

// Valid string prefixes, lowercased. `u` cannot combine with anything.
const STRING_PREFIXES: [&str; 8] = ["r", "u", "b", "f", "br", "rb", "fr", "rf"];

fn is_string_prefix(ident: &str) -> bool {
  ident.len() <= 2
    && ident.chars().all(|c| STRING_PREFIX.has(c))
    && STRING_PREFIXES.contains(&ident.to_ascii_lowercase().as_str())
}

/// Handles leading whitespace of a physical line, skipping blank and comment-only lines.
/// Returns an INDENT or DEDENT token if the indentation level changed.
fn lex_indentation(lexer: &mut Lexer<'_>) -> SyntaxResult<Option<Token>> {
  let (start, level) = loop {
    let start = lexer.next;
    let mut level = IndentLevel::default();
    while let Some(c) = lexer.peek_or_eof(0) {
      match c {
        ' ' => {
          level.tab8 += 1;
          level.tab1 += 1;
        }
        '\t' => {
          level.tab8 = (level.tab8 / 8 + 1) * 8;
          level.tab1 += 1;
        }
        '\x0c' => {
          level = IndentLevel::default();
        }
        _ => break,
      };
      lexer.skip_expect(1);
    }
    match lexer.peek_or_eof(0) {
      None => return Ok(None),
      Some('#') => {
        lexer.consume(lexer.while_not_2_chars('\n', '\r'));
        if !lexer.skip_line_break() {
          return Ok(None);
        }
      }
      Some('\n') | Some('\r') => {
        lexer.skip_line_break();
      }
      Some(_) => break (start, level),
    };
  };
  lexer.at_line_start = false;

  let loc = Loc(start, lexer.next);
  let current = lexer.indents.last().copied().unwrap_or_default();
  if level.tab8 == current.tab8 {
    if level.tab1 != current.tab1 {
      return Err(loc.error(SyntaxErrorType::InconsistentTabs, None));
    }
    return Ok(None);
  }
  if level.tab8 > current.tab8 {
    if level.tab1 <= current.tab1 {
      return Err(loc.error(SyntaxErrorType::InconsistentTabs, None));
    }
    if lexer.indents.len() >= MAX_INDENT {
      return Err(loc.error(SyntaxErrorType::NestingTooDeep, None));
    }
    lexer.indents.push(level);
    return Ok(Some(lexer.empty_token(TT::Indent)));
  }
  let mut popped = 0;
  while lexer.indents.last().is_some_and(|l| l.tab8 > level.tab8) {
    lexer.indents.pop();
    popped += 1;
  }
  match lexer.indents.last() {
    Some(l) if l.tab8 == level.tab8 && l.tab1 == level.tab1 => {}
    Some(l) if l.tab8 == level.tab8 => {
      return Err(loc.error(SyntaxErrorType::InconsistentTabs, None))
    }
    _ => return Err(loc.error(SyntaxErrorType::InconsistentDedent, None)),
  };
  lexer.pending_dedents = popped - 1;
  Ok(Some(lexer.empty_token(TT::Dedent)))
}

/// Skips whitespace, comments, explicit line joins, and line breaks inside brackets.
fn skip_insignificant(lexer: &mut Lexer<'_>) -> SyntaxResult<()> {
  loop {
    lexer.consume(lexer.while_chars(&WHITESPACE));
    match lexer.peek_or_eof(0) {
      Some('#') => {
        lexer.consume(lexer.while_not_2_chars('\n', '\r'));
      }
      Some('\\') => {
        let loc = Loc(lexer.next, lexer.next + 1);
        lexer.skip_expect(1);
        if lexer.at_end() {
          return Err(loc.error(SyntaxErrorType::UnexpectedEnd, None));
        };
        if !lexer.skip_line_break() {
          // Only a line break may follow a line continuation character.
          return Err(loc.error(SyntaxErrorType::InvalidCharacter, None));
        };
      }
      Some('\n') | Some('\r') if !lexer.brackets.is_empty() => {
        lexer.skip_line_break();
      }
      _ => return Ok(()),
    };
  }
}

fn lex_identifier(lexer: &mut Lexer<'_>, start: usize) -> SyntaxResult<TT> {
  lexer.consume(lexer.while_pred(is_id_continue));
  let ident = &lexer.source[start..lexer.next];
  if matches!(lexer.peek_or_eof(0), Some('"') | Some('\'')) && is_string_prefix(ident) {
    return lex_string(lexer, start);
  };
  Ok(KEYWORD_STRS.get(ident).copied().unwrap_or(TT::Identifier))
}

/// Consumes digits matching `filter` with single `_` separators between them.
/// Returns false if no digit was found or a separator was misplaced.
fn lex_digits(lexer: &mut Lexer<'_>, filter: &CharFilter, leading_separator: bool) -> bool {
  let mut seen_digit = false;
  let mut last_separator = false;
  if leading_separator && lexer.peek_or_eof(0) == Some('_') {
    lexer.skip_expect(1);
    last_separator = true;
  };
  loop {
    match lexer.peek_or_eof(0) {
      Some(c) if filter.has(c) => {
        lexer.skip_expect(1);
        seen_digit = true;
        last_separator = false;
      }
      Some('_') if seen_digit && !last_separator => {
        lexer.skip_expect(1);
        last_separator = true;
      }
      _ => break,
    };
  }
  seen_digit && !last_separator
}

fn lex_number(lexer: &mut Lexer<'_>, start: usize) -> SyntaxResult<TT> {
  let malformed =
    |lexer: &Lexer<'_>| Loc(start, lexer.next).error(SyntaxErrorType::MalformedLiteralNumber, None);

  let radix = match (lexer.peek_or_eof(0), lexer.peek_or_eof(1)) {
    (Some('0'), Some('x' | 'X')) => Some(&*DIGIT_HEX),
    (Some('0'), Some('o' | 'O')) => Some(&*DIGIT_OCT),
    (Some('0'), Some('b' | 'B')) => Some(&*DIGIT_BIN),
    _ => None,
  };
  if let Some(filter) = radix {
    lexer.skip_expect(2);
    if !lex_digits(lexer, filter, true) {
      return Err(malformed(lexer));
    };
    if lexer.peek_or_eof(0).is_some_and(|c| c.is_ascii_alphanumeric()) {
      lexer.skip_expect(1);
      return Err(malformed(lexer));
    };
    return Ok(TT::LiteralNumber);
  };

  let mut is_float = false;
  if lexer.peek_or_eof(0).is_some_and(|c| c.is_ascii_digit()) && !lex_digits(lexer, &DIGIT, false) {
    return Err(malformed(lexer));
  };
  let int_end = lexer.next;
  if lexer.peek_or_eof(0) == Some('.') {
    lexer.skip_expect(1);
    is_float = true;
    if lexer.peek_or_eof(0).is_some_and(|c| c.is_ascii_digit()) && !lex_digits(lexer, &DIGIT, false) {
      return Err(malformed(lexer));
    };
  };
  if matches!(lexer.peek_or_eof(0), Some('e' | 'E')) {
    let has_exponent = match lexer.peek_or_eof(1) {
      Some(c) if c.is_ascii_digit() => true,
      Some('+' | '-') => lexer.peek_or_eof(2).is_some_and(|c| c.is_ascii_digit()),
      _ => false,
    };
    if has_exponent {
      lexer.skip_expect(1);
      if matches!(lexer.peek_or_eof(0), Some('+' | '-')) {
        lexer.skip_expect(1);
      };
      if !lex_digits(lexer, &DIGIT, false) {
        return Err(malformed(lexer));
      };
      is_float = true;
    };
  };
  let imaginary = matches!(lexer.peek_or_eof(0), Some('j' | 'J'));
  if imaginary {
    lexer.skip_expect(1);
  };
  // Leading zeros are only permitted in an integer made entirely of zeros.
  let int_part = &lexer.source[start..int_end];
  if !is_float
    && !imaginary
    && int_part.starts_with('0')
    && int_part.chars().any(|c| c != '0' && c != '_')
  {
    return Err(malformed(lexer));
  };
  Ok(TT::LiteralNumber)
}

#[derive(Clone, Copy)]
enum StringScan {
  // Literal text; `formatted` enables replacement fields.
  Text {
    quote: char,
    triple: bool,
    formatted: bool,
  },
  // Expression part of a replacement field, with its unclosed inner brackets.
  Field { brackets: usize },
  // Format spec following a top-level `:` in a replacement field.
  FormatSpec,
}

fn doubled_quote(quote: char) -> &'static str {
  if quote == '"' {
    "\"\""
  } else {
    "''"
  }
}

fn open_string(lexer: &mut Lexer<'_>, formatted: bool) -> Option<StringScan> {
  let quote = match lexer.peek_or_eof(0) {
    Some(q @ ('"' | '\'')) => q,
    _ => return None,
  };
  lexer.skip_expect(1);
  let triple = lexer.rest_starts_with(doubled_quote(quote));
  if triple {
    lexer.skip_expect(2);
  };
  Some(StringScan::Text {
    quote,
    triple,
    formatted,
  })
}

fn skip_escape(lexer: &mut Lexer<'_>) {
  lexer.skip_expect(1);
  if let Some(c) = lexer.peek_or_eof(0) {
    lexer.skip_expect(c.len_utf8());
  };
}

// Scanning is the same for raw strings: a backslash always prevents the next character from terminating the literal.
// Quotes inside the replacement fields of an f-string belong to nested literals, so any quote may be reused there.
fn lex_string(lexer: &mut Lexer<'_>, start: usize) -> SyntaxResult<TT> {
  let formatted = lexer.source[start..lexer.next].contains(['f', 'F']);
  let unterminated =
    |lexer: &Lexer<'_>| Loc(start, lexer.next).error(SyntaxErrorType::UnterminatedString, None);
  let Some(outer) = open_string(lexer, formatted) else {
    return Err(Loc(start, lexer.next).error(SyntaxErrorType::ExpectedSyntax("string"), None));
  };
  let mut stack = vec![outer];
  while let Some(&top) = stack.last() {
    let Some(c) = lexer.peek_or_eof(0) else {
      return Err(unterminated(lexer));
    };
    let top_i = stack.len() - 1;
    match top {
      StringScan::Text {
        quote,
        triple,
        formatted,
      } => match c {
        '\\' => skip_escape(lexer),
        '\n' if !triple => return Err(unterminated(lexer)),
        '\n' => lexer.skip_expect(1),
        '{' | '}' if formatted => {
          lexer.skip_expect(1);
          if lexer.peek_or_eof(0) == Some(c) {
            lexer.skip_expect(1);
          } else if c == '{' {
            stack.push(StringScan::Field { brackets: 0 });
          };
        }
        _ if c == quote => {
          lexer.skip_expect(1);
          if !triple {
            stack.pop();
          } else if lexer.rest_starts_with(doubled_quote(quote)) {
            lexer.skip_expect(2);
            stack.pop();
          };
        }
        _ if !formatted => {
          lexer.consume(lexer.while_not_3_chars('\\', '\n', quote));
        }
        _ => lexer.skip_expect(c.len_utf8()),
      },
      StringScan::Field { brackets } => match c {
        '"' | '\'' => stack.extend(open_string(lexer, false)),
        c if is_id_start(c) => {
          let ident_start = lexer.next;
          lexer.consume(lexer.while_pred(is_id_continue));
          let ident = &lexer.source[ident_start..lexer.next];
          if matches!(lexer.peek_or_eof(0), Some('"') | Some('\'')) && is_string_prefix(ident) {
            let formatted = ident.contains(['f', 'F']);
            stack.extend(open_string(lexer, formatted));
          };
        }
        '(' | '[' | '{' => {
          lexer.skip_expect(1);
          stack[top_i] = StringScan::Field {
            brackets: brackets + 1,
          };
        }
        ')' | ']' | '}' if brackets > 0 => {
          lexer.skip_expect(1);
          stack[top_i] = StringScan::Field {
            brackets: brackets - 1,
          };
        }
        '}' => {
          lexer.skip_expect(1);
          stack.pop();
        }
        ':' if brackets == 0 => {
          lexer.skip_expect(1);
          stack[top_i] = StringScan::FormatSpec;
        }
        '\\' => skip_escape(lexer),
        _ => lexer.skip_expect(c.len_utf8()),
      },
      StringScan::FormatSpec => match c {
        '{' => {
          lexer.skip_expect(1);
          stack.push(StringScan::Field { brackets: 0 });
        }
        // Closes the replacement field the format spec belongs to.
        '}' => {
          lexer.skip_expect(1);
          stack.pop();
        }
        '\\' => skip_escape(lexer),
        _ => lexer.skip_expect(c.len_utf8()),
      },
    };
  }
  Ok(TT::LiteralString)
}

fn lex_significant(lexer: &mut Lexer<'_>) -> SyntaxResult<Token> {
  let start = lexer.next;
  let Some(c) = lexer.peek_or_eof(0) else {
    return Ok(lexer.empty_token(TT::EOF));
  };
  let typ = if is_id_start(c) {
    lex_identifier(lexer, start)?
  } else if c.is_ascii_digit()
    || (c == '.' && lexer.peek_or_eof(1).is_some_and(|c| c.is_ascii_digit()))
  {
    lex_number(lexer, start)?
  } else if c == '"' || c == '\'' {
    lex_string(lexer, start)?
  } else {
    let Ok((tt, mat)) = SIG.find(lexer) else {
      return Err(Loc(start, start + c.len_utf8()).error(SyntaxErrorType::InvalidCharacter, None));
    };
    lexer.consume(mat);
    let loc = Loc(start, lexer.next);
    if tt.is_open_bracket() {
      lexer.brackets.push((tt, loc));
    } else if tt.is_close_bracket() {
      match lexer.brackets.pop() {
        Some((open, _)) if open.closing_bracket() == Some(tt) => {}
        _ => return Err(loc.error(SyntaxErrorType::UnmatchedBracket, Some(tt))),
      };
    };
    tt
  };
  Ok(Token {
    loc: Loc(start, lexer.next),
    typ,
  })
}

fn lex_next_fallible(lexer: &mut Lexer<'_>) -> SyntaxResult<Token> {
  if lexer.pending_dedents > 0 {
    lexer.pending_dedents -= 1;
    return Ok(lexer.empty_token(TT::Dedent));
  };
  loop {
    if lexer.at_line_start && lexer.brackets.is_empty() {
      if let Some(token) = lex_indentation(lexer)? {
        return Ok(token);
      };
      lexer.at_line_start = false;
    };
    skip_insignificant(lexer)?;

    if lexer.at_end() {
      if let Some(&(open, loc)) = lexer.brackets.last() {
        return Err(loc.error(SyntaxErrorType::UnmatchedBracket, Some(open)));
      };
      if lexer.line_has_tokens {
        lexer.line_has_tokens = false;
        return Ok(lexer.empty_token(TT::Newline));
      };
      if lexer.indents.len() > 1 {
        lexer.indents.pop();
        return Ok(lexer.empty_token(TT::Dedent));
      };
      return Ok(Token {
        loc: lexer.eof_range(),
        typ: TT::EOF,
      });
    };

    let cp = lexer.checkpoint();
    if lexer.skip_line_break() {
      lexer.at_line_start = true;
      if lexer.line_has_tokens {
        lexer.line_has_tokens = false;
        return Ok(Token {
          loc: lexer.since_checkpoint(cp),
          typ: TT::Newline,
        });
      };
      continue;
    };

    let token = lex_significant(lexer)?;
    lexer.line_has_tokens = true;
    return Ok(token);
  }
}

pub fn lex_next(lexer: &mut Lexer<'_>) -> Token {
  if lexer.error.is_some() {
    return Token {
      loc: lexer.eof_range(),
      typ: TT::EOF,
    };
  };
  match lex_next_fallible(lexer) {
    Ok(token) => token,
    Err(err) => {
      let loc = err.loc;
      lexer.error = Some(err);
      Token {
        loc,
        typ: TT::Invalid,
      }
    }
  }
}
