use parse_py::ast::stmt::Stmt;
use parse_py::parse;

#[test]
fn empty_and_comment_only_modules_parse() {
  assert!(parse("").unwrap().stx.body.is_empty());
  assert!(parse("\n\n# just a comment\n").unwrap().stx.body.is_empty());
  assert!(parse("\u{FEFF}").unwrap().stx.body.is_empty());
}

#[test]
fn semicolons_and_missing_final_newline() {
  let module = parse("a = 1; b = 2;\nc = 3").unwrap();
  assert_eq!(module.stx.body.len(), 3);
}

#[test]
fn bracketed_and_backslash_continuations() {
  let module = parse("x = (1 +\n     2)\ny = 1 + \\\n    2\ndef f(a,\n      b):\n  pass\n").unwrap();
  assert_eq!(module.stx.body.len(), 3);
  assert!(matches!(*module.stx.body[2].stx, Stmt::FuncDef(_)));
}

#[test]
fn crlf_and_tabs() {
  let module = parse("if x:\r\n\tpass\r\nelse:\r\n\tpass\r\n").unwrap();
  assert_eq!(module.stx.body.len(), 1);
}

#[test]
fn nested_blocks_close_at_end_of_input() {
  let module = parse("class A:\n  def f(self):\n    if x:\n      return 1").unwrap();
  assert_eq!(module.stx.body.len(), 1);
}
