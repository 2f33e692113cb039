use crate::ast::expr::Expr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::Parser;
use crate::token::TT;
use std::iter::Peekable;
use std::str::Chars;

/// A single string literal token, decoded.
#[derive(Debug, PartialEq, Eq)]
pub struct StringPart {
  pub value: String,
  pub bytes: bool,
  pub formatted: bool,
}

fn take_hex(chars: &mut Peekable<Chars<'_>>, n: usize) -> Option<u32> {
  let digits: String = chars.clone().take(n).collect();
  if digits.len() != n || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
    return None;
  };
  for _ in 0..n {
    chars.next();
  }
  u32::from_str_radix(&digits, 16).ok()
}

// Unrecognized and malformed escapes are kept as written.
fn unescape(inner: &str, bytes: bool) -> String {
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    };
    let Some(e) = chars.next() else {
      out.push('\\');
      break;
    };
    match e {
      '\n' => {}
      '\r' => {
        chars.next_if_eq(&'\n');
      }
      '\\' | '\'' | '"' => out.push(e),
      'a' => out.push('\x07'),
      'b' => out.push('\x08'),
      'f' => out.push('\x0c'),
      'n' => out.push('\n'),
      'r' => out.push('\r'),
      't' => out.push('\t'),
      'v' => out.push('\x0b'),
      '0'..='7' => {
        let mut value = e.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
          match chars.peek().and_then(|c| c.to_digit(8)) {
            Some(d) => {
              value = value * 8 + d;
              chars.next();
            }
            None => break,
          };
        }
        out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
      }
      'x' | 'u' | 'U' => {
        let width = match e {
          'x' => 2,
          _ if bytes => 0,
          'u' => 4,
          _ => 8,
        };
        match (width > 0).then(|| take_hex(&mut chars, width)).flatten() {
          Some(value) => out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)),
          None => {
            out.push('\\');
            out.push(e);
          }
        };
      }
      _ => {
        out.push('\\');
        out.push(e);
      }
    };
  }
  out
}

/// Decodes the raw source of a string literal token, including its prefix and quotes.
pub fn decode_string_literal(raw: &str) -> StringPart {
  let prefix_len = raw.find(|c: char| c == '\'' || c == '"').unwrap_or(raw.len());
  let prefix = raw[..prefix_len].to_ascii_lowercase();
  let body = &raw[prefix_len..];
  let quote_len = if body.len() >= 6 && (body.starts_with("'''") || body.starts_with("\"\"\"")) {
    3
  } else {
    1
  };
  let inner = body
    .get(quote_len..body.len().saturating_sub(quote_len))
    .unwrap_or("");
  let bytes = prefix.contains('b');
  let formatted = prefix.contains('f');
  let value = if prefix.contains('r') || formatted {
    inner.to_string()
  } else {
    unescape(inner, bytes)
  };
  StringPart {
    value,
    bytes,
    formatted,
  }
}

impl<'a> Parser<'a> {
  pub fn lit_num(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.require(TT::LiteralNumber)?;
    let value = self.str(t.loc).replace('_', "");
    Ok(Node::new(t.loc, LitNumExpr { value }).into_wrapped())
  }

  /// Adjacent string literals, concatenated into one.
  pub fn lit_str(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let mut value = String::new();
    let mut bytes = None;
    let mut formatted = false;
    while self.peek().typ == TT::LiteralString {
      let t = self.consume();
      let part = decode_string_literal(self.str(t.loc));
      match bytes {
        None => bytes = Some(part.bytes),
        Some(b) if b != part.bytes => {
          return Err(t.error(SyntaxErrorType::ExpectedSyntax(
            "string literal of the same kind as the previous one",
          )));
        }
        Some(_) => {}
      };
      formatted |= part.formatted;
      value.push_str(&part.value);
    }
    Ok(
      Node::new(self.since_checkpoint(&start), LitStrExpr {
        value,
        bytes: bytes.unwrap_or(false),
        formatted,
      })
      .into_wrapped(),
    )
  }
}
