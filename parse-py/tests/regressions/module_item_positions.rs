use parse_py::ast::stmt::Stmt;
use parse_py::parse;

#[test]
fn definition_spans_cover_decorators_and_bodies() {
  let source = "@cache\ndef f():\n    return 1\n\nclass C:\n    pass\n";
  let module = parse(source).unwrap();
  let body = &module.stx.body;
  assert_eq!(body.len(), 2);
  let f = &source[body[0].loc.0..body[0].loc.1];
  assert_eq!(f, "@cache\ndef f():\n    return 1");
  let c = &source[body[1].loc.0..body[1].loc.1];
  assert_eq!(c, "class C:\n    pass");
}

#[test]
fn definition_names_have_their_own_spans() {
  let source = "async def  fetch(): ...\n";
  let module = parse(source).unwrap();
  let Stmt::FuncDef(f) = &*module.stx.body[0].stx else {
    panic!("expected function");
  };
  assert_eq!(&source[f.stx.name.loc.0..f.stx.name.loc.1], "fetch");
}

#[test]
fn statements_keep_source_order() {
  let module = parse("import a\ndef b(): pass\nc = 1\nclass D: pass\n").unwrap();
  let kinds: Vec<&str> = module
    .stx
    .body
    .iter()
    .map(|s| match *s.stx {
      Stmt::Import(_) => "import",
      Stmt::FuncDef(_) => "def",
      Stmt::Assign(_) => "assign",
      Stmt::ClassDef(_) => "class",
      _ => "other",
    })
    .collect();
  assert_eq!(kinds, vec!["import", "def", "assign", "class"]);
}
