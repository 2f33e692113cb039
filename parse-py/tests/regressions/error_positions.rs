use parse_py::error::SyntaxErrorType;
use parse_py::parse;

#[test]
fn unterminated_string_reports_its_line() {
  let source = "x = 1\ny = 'oops\n";
  let err = parse(source).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
  assert_eq!(err.code(), "PY0008");
  assert_eq!(err.line(source), 2);
}

#[test]
fn missing_colon_reports_the_header_line() {
  let source = "import os\n\ndef f()\n    return 1\n";
  let err = parse(source).unwrap_err();
  assert_eq!(err.code(), "PY0011");
  assert_eq!(err.line(source), 3);
}

#[test]
fn unexpected_indent_reports_the_indented_line() {
  let source = "a = 1\n\n    b = 2\n";
  let err = parse(source).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedIndent);
  assert_eq!(err.line(source), 3);
}

#[test]
fn unclosed_bracket_reports_the_opening_bracket() {
  let source = "x = [\n  1,\n  2,\n";
  let err = parse(source).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnmatchedBracket);
  assert_eq!(err.line(source), 1);
}
