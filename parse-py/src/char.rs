use ahash::HashSet;
use ahash::HashSetExt;
use core::ops::RangeInclusive;
use once_cell::sync::Lazy;

#[derive(Clone)]
pub struct CharFilter {
  chars: HashSet<char>,
}

impl CharFilter {
  pub fn new() -> CharFilter {
    CharFilter {
      chars: HashSet::new(),
    }
  }

  pub fn add_char(&mut self, c: char) {
    self.chars.insert(c);
  }

  pub fn add_chars(&mut self, chars: RangeInclusive<char>) {
    for c in chars {
      self.chars.insert(c);
    }
  }

  pub fn add_chars_from_slice(&mut self, chars: &str) {
    for c in chars.chars() {
      self.chars.insert(c);
    }
  }

  pub fn has(&self, c: char) -> bool {
    self.chars.contains(&c)
  }
}

pub const PYTHON_WHITESPACE: [char; 3] = [
  '\x09', // Horizontal tab
  '\x0c', // Form feed
  '\x20', // Space
];

pub static DIGIT: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='9');
  filter
});

pub static DIGIT_BIN: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='1');
  filter
});

pub static DIGIT_HEX: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='9');
  filter.add_chars('a'..='f');
  filter.add_chars('A'..='F');
  filter
});

pub static DIGIT_OCT: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='7');
  filter
});

pub static ID_START_ASCII: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('a'..='z');
  filter.add_chars('A'..='Z');
  filter.add_char('_');
  filter
});

pub static ID_CONTINUE_ASCII: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = ID_START_ASCII.clone();
  filter.add_chars('0'..='9');
  filter
});

pub static WHITESPACE: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  for c in PYTHON_WHITESPACE {
    filter.add_char(c);
  }
  filter
});

// Characters that may prefix a string literal, in any case combination: r, b, u, f.
pub static STRING_PREFIX: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars_from_slice("rRbBuUfF");
  filter
});

// WARNING: Non-ASCII identifiers are approximated with Unicode alphabetic/alphanumeric instead of XID_Start/XID_Continue.
#[inline]
pub fn is_id_start(c: char) -> bool {
  if c.is_ascii() {
    ID_START_ASCII.has(c)
  } else {
    c.is_alphabetic()
  }
}

#[inline]
pub fn is_id_continue(c: char) -> bool {
  if c.is_ascii() {
    ID_CONTINUE_ASCII.has(c)
  } else {
    c.is_alphanumeric()
  }
}
