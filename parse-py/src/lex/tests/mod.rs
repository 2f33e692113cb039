use crate::error::SyntaxErrorType;
use crate::lex::lex_next;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer);
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = lex_next(&mut lexer);
  assert_eq!(EOF, t.typ, "in {:?}", code);
}

fn check_error(code: &str, expected: SyntaxErrorType) {
  let mut lexer = Lexer::new(code);
  loop {
    let t = lex_next(&mut lexer);
    match t.typ {
      Invalid => break,
      EOF => panic!("expected {:?} lexing {:?}", expected, code),
      _ => {}
    };
  }
  assert_eq!(lexer.error().map(|e| e.typ), Some(expected));
  // Nothing is produced after the first error.
  assert_eq!(lex_next(&mut lexer).typ, EOF);
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass, Newline]);
  check("async def", [KeywordAsync, KeywordDef, Newline]);
  check("None True False", [LiteralNone, LiteralTrue, LiteralFalse, Newline]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier, Newline]);
  check("_private __dunder__", [Identifier, Identifier, Newline]);
  check("classy", [Identifier, Newline]);
  check("café", [Identifier, Newline]);
  check("match type", [Identifier, Identifier, Newline]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber, Newline]);
  check("929", [LiteralNumber, Newline]);
  check(".929", [LiteralNumber, Newline]);
  check("1_000_000", [LiteralNumber, Newline]);
  check("0x_ff 0o17 0b1010", [LiteralNumber, LiteralNumber, LiteralNumber, Newline]);
  check("1.5e-3 2E10 3j 4.j", [LiteralNumber, LiteralNumber, LiteralNumber, LiteralNumber, Newline]);
  check("000", [LiteralNumber, Newline]);
  check("x.y", [Identifier, Dot, Identifier, Newline]);
  check("...", [DotDotDot, Newline]);
}

#[test]
fn test_lex_malformed_numbers() {
  check_error("0123", SyntaxErrorType::MalformedLiteralNumber);
  check_error("1__0", SyntaxErrorType::MalformedLiteralNumber);
  check_error("1_", SyntaxErrorType::MalformedLiteralNumber);
  check_error("0x", SyntaxErrorType::MalformedLiteralNumber);
  check_error("0b102", SyntaxErrorType::MalformedLiteralNumber);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString, Newline]);
  check("\"it's\"", [LiteralString, Newline]);
  check("'a\\'b'", [LiteralString, Newline]);
  check("r'\\d+' b'\\x00' f'{x}' Rb'' fR\"\"", [
    LiteralString,
    LiteralString,
    LiteralString,
    LiteralString,
    LiteralString,
    Newline,
  ]);
  check("'''multi\nline'''", [LiteralString, Newline]);
  check("\"\"\"has \" and \"\" inside\"\"\"", [LiteralString, Newline]);
  check("ur''", [Identifier, LiteralString, Newline]);
}

#[test]
fn test_lex_f_string_replacement_fields() {
  check("x = f\"{'a' if b else \"c\"}\"", [Identifier, Equals, LiteralString, Newline]);
  check("f'{d['k']}' + f'{x!r:>{width}}'", [LiteralString, Plus, LiteralString, Newline]);
  check("f\"{f\"{f\"{x}\"}\"}\"", [LiteralString, Newline]);
  check("f\"{ {'k': \"}\"}['k'] }\"", [LiteralString, Newline]);
  check("f'{{' + '}}'", [LiteralString, Plus, LiteralString, Newline]);
  check("f'''{\n  x\n}'''", [LiteralString, Newline]);
  check("rb'{' f'}}'", [LiteralString, LiteralString, Newline]);
  // Outside a replacement field the quote still closes the literal.
  check("f'a' 'b'", [LiteralString, LiteralString, Newline]);
}

#[test]
fn test_lex_unterminated_strings() {
  check_error("'hello world\n'", SyntaxErrorType::UnterminatedString);
  check_error("'''never closed", SyntaxErrorType::UnterminatedString);
  check_error("x = 'abc", SyntaxErrorType::UnterminatedString);
  check_error("f'{x'", SyntaxErrorType::UnterminatedString);
  check_error("f\"{'a'\n", SyntaxErrorType::UnterminatedString);
}

#[test]
fn test_lex_operators() {
  check("a //= b ** c", [Identifier, SlashSlashEquals, Identifier, AsteriskAsterisk, Identifier, Newline]);
  check("x := y -> z", [Identifier, ColonEquals, Identifier, HyphenChevronRight, Identifier, Newline]);
  check("a != b <= c >>= d", [
    Identifier,
    ExclamationEquals,
    Identifier,
    ChevronLeftEquals,
    Identifier,
    ChevronRightChevronRightEquals,
    Identifier,
    Newline,
  ]);
  check("@decorator", [At, Identifier, Newline]);
  check_error("a ? b", SyntaxErrorType::InvalidCharacter);
  check_error("a ! b", SyntaxErrorType::InvalidCharacter);
}

#[test]
fn test_lex_comments_and_blank_lines() {
  check("# only a comment", []);
  check("\n\n   \n# c\n", []);
  check("x = 1  # trailing\n\n\ny\n", [Identifier, Equals, LiteralNumber, Newline, Identifier, Newline]);
}

#[test]
fn test_lex_indentation() {
  check("if x:\n  y\nz\n", [
    KeywordIf,
    Identifier,
    Colon,
    Newline,
    Indent,
    Identifier,
    Newline,
    Dedent,
    Identifier,
    Newline,
  ]);
  check("class A:\n    def f(self):\n        pass\n", [
    KeywordClass,
    Identifier,
    Colon,
    Newline,
    Indent,
    KeywordDef,
    Identifier,
    ParenthesisOpen,
    Identifier,
    ParenthesisClose,
    Colon,
    Newline,
    Indent,
    KeywordPass,
    Newline,
    Dedent,
    Dedent,
  ]);
  // Comment-only lines never change indentation.
  check("if x:\n    y\n# flush-left comment\n    z\n", [
    KeywordIf,
    Identifier,
    Colon,
    Newline,
    Indent,
    Identifier,
    Newline,
    Identifier,
    Newline,
    Dedent,
  ]);
}

#[test]
fn test_lex_missing_final_newline() {
  check("if x:\n  y", [KeywordIf, Identifier, Colon, Newline, Indent, Identifier, Newline, Dedent]);
}

#[test]
fn test_lex_implicit_and_explicit_line_joining() {
  check("f(a,\n  b)\n", [
    Identifier,
    ParenthesisOpen,
    Identifier,
    Comma,
    Identifier,
    ParenthesisClose,
    Newline,
  ]);
  check("x = 1 + \\\n    2\n", [Identifier, Equals, LiteralNumber, Plus, LiteralNumber, Newline]);
  check("[1, # comment\n 2]", [BracketOpen, LiteralNumber, Comma, LiteralNumber, BracketClose, Newline]);
}

#[test]
fn test_lex_indentation_errors() {
  check_error("if x:\n    y\n  z\n", SyntaxErrorType::InconsistentDedent);
  check_error("if x:\n\ty\n        z\n", SyntaxErrorType::InconsistentTabs);
  check_error("x = \\ y", SyntaxErrorType::InvalidCharacter);
}

#[test]
fn test_lex_indentation_limit() {
  let nested_ifs = |n: usize| {
    let mut code: String = (0..n).map(|i| format!("{}if x:\n", " ".repeat(i))).collect();
    code.push_str(&" ".repeat(n));
    code.push_str("pass\n");
    code
  };
  let code = nested_ifs(99);
  let mut lexer = Lexer::new(&code);
  let mut indents = 0;
  loop {
    match lex_next(&mut lexer).typ {
      EOF => break,
      Invalid => panic!("unexpected error {:?}", lexer.error()),
      Indent => indents += 1,
      _ => {}
    };
  }
  assert_eq!(indents, 99);
  check_error(&nested_ifs(100), SyntaxErrorType::NestingTooDeep);
}

#[test]
fn test_lex_unmatched_brackets() {
  check_error("f(a, b", SyntaxErrorType::UnmatchedBracket);
  check_error("a)", SyntaxErrorType::UnmatchedBracket);
  check_error("[1, 2)", SyntaxErrorType::UnmatchedBracket);
}

#[test]
fn test_lex_crlf() {
  check("x = 1\r\ny = 2\r\n", [
    Identifier,
    Equals,
    LiteralNumber,
    Newline,
    Identifier,
    Equals,
    LiteralNumber,
    Newline,
  ]);
}
