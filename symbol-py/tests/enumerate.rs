use parse_py::error::SyntaxErrorType;
use parse_py::loc::Loc;
use symbol_py::enumerate;
use symbol_py::DeclKind;
use symbol_py::Declaration;
use symbol_py::Enumeration;
use symbol_py::SourceUnit;
use symbol_py::Visibility;

const FIXTURE: &str = r#"__all__ = ["PublicClass", "public_function"]

import os, sys
from math import sqrt
from collections import deque, defaultdict


def public_function(value):
    return value + 1


async def async_function():
    return 1


class PublicClass:
    def method(self):
        return "ok"


class _PrivateClass:
    pass
"#;

fn enumerate_str(source: &str) -> Enumeration {
  enumerate(&SourceUnit::new(source)).unwrap()
}

fn find<'a>(decls: &'a [Declaration], name: &str) -> &'a Declaration {
  decls
    .iter()
    .find(|d| d.name == name)
    .unwrap_or_else(|| panic!("no declaration named {}", name))
}

fn names(decls: &[Declaration]) -> Vec<&str> {
  decls.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn test_fixture_declarations_in_source_order() {
  let e = enumerate_str(FIXTURE);
  assert_eq!(names(&e.declarations), vec![
    "public_function",
    "async_function",
    "PublicClass",
    "_PrivateClass"
  ]);
  assert_eq!(
    e.exports,
    Some(vec!["PublicClass".to_string(), "public_function".to_string()])
  );
}

#[test]
fn test_fixture_kinds_and_visibility() {
  let e = enumerate_str(FIXTURE);
  let d = &e.declarations;

  let f = find(d, "public_function");
  assert_eq!(f.kind, DeclKind::Function);
  assert_eq!(f.visibility, Visibility::Public);
  assert!(f.exported);

  let f = find(d, "async_function");
  assert_eq!(f.kind, DeclKind::AsyncFunction);
  assert_eq!(f.visibility, Visibility::Public);
  assert!(!f.exported);

  let c = find(d, "PublicClass");
  assert_eq!(c.kind, DeclKind::Class);
  assert_eq!(c.visibility, Visibility::Public);
  assert_eq!(names(&c.members), vec!["method"]);
  assert_eq!(c.members[0].kind, DeclKind::Function);
  assert_eq!(c.members[0].visibility, Visibility::Public);
  assert!(!c.members[0].exported);

  let c = find(d, "_PrivateClass");
  assert_eq!(c.kind, DeclKind::Class);
  assert_eq!(c.visibility, Visibility::Private);
  assert!(!c.exported);
  assert!(c.members.is_empty());
}

#[test]
fn test_explicit_export_list() {
  let source = FIXTURE.replace("__all__ = [\"PublicClass\", \"public_function\"]\n", "");
  let unit = SourceUnit::new(source).with_exports(["PublicClass", "public_function"]);
  let e = enumerate(&unit).unwrap();
  assert_eq!(e.declarations.len(), 4);
  let exported: Vec<&str> = e
    .declarations
    .iter()
    .filter(|d| d.exported)
    .map(|d| d.name.as_str())
    .collect();
  assert_eq!(exported, vec!["public_function", "PublicClass"]);
  assert_eq!(find(&e.declarations, "_PrivateClass").visibility, Visibility::Private);
  assert_eq!(find(&e.declarations, "async_function").visibility, Visibility::Public);
}

#[test]
fn test_explicit_export_list_overrides_dunder_all() {
  let unit = SourceUnit::new("__all__ = ['a']\ndef a(): pass\ndef _b(): pass\n").with_exports(["_b"]);
  let e = enumerate(&unit).unwrap();
  assert_eq!(e.exports, Some(vec!["_b".to_string()]));
  assert!(!find(&e.declarations, "a").exported);
  let b = find(&e.declarations, "_b");
  assert!(b.exported);
  assert_eq!(b.visibility, Visibility::Public);
}

#[test]
fn test_empty_explicit_export_list() {
  let unit = SourceUnit::new("__all__ = ['_a']\ndef _a(): pass\n").with_exports(Vec::<String>::new());
  let e = enumerate(&unit).unwrap();
  assert_eq!(e.exports, Some(vec![]));
  assert_eq!(e.declarations[0].visibility, Visibility::Private);
}

#[test]
fn test_fixture_imports() {
  let e = enumerate_str(FIXTURE);
  let imports: Vec<(&str, Option<&str>)> = e
    .imports
    .iter()
    .map(|i| (i.module.as_str(), i.name.as_deref()))
    .collect();
  assert_eq!(imports, vec![
    ("os", None),
    ("sys", None),
    ("math", Some("sqrt")),
    ("collections", Some("deque")),
    ("collections", Some("defaultdict")),
  ]);
  let lines: Vec<usize> = e.imports.iter().map(|i| i.line).collect();
  assert_eq!(lines, vec![3, 3, 4, 5, 5]);
}

#[test]
fn test_count_matches_top_level_definitions() {
  let source = "\
def a(): pass
class B:
  def c(self): pass
  class D: pass
async def e(): pass
if x:
  def f(): pass
try:
  class G: pass
except E:
  pass
def h():
  def i(): pass
x = lambda: 1
";
  let e = enumerate_str(source);
  assert_eq!(names(&e.declarations), vec!["a", "B", "e", "h"]);
  let b = find(&e.declarations, "B");
  assert_eq!(names(&b.members), vec!["c", "D"]);
  assert_eq!(b.members[1].kind, DeclKind::Class);
  assert!(find(&e.declarations, "h").members.is_empty());
}

#[test]
fn test_member_visibility_is_independent_of_exports() {
  let source = "\
__all__ = ['A', '_m']
class A:
  def _m(self): pass
  def __init__(self): pass
  def __m(self): pass
  class _Inner:
    def visible(self): pass
";
  let e = enumerate_str(source);
  let a = find(&e.declarations, "A");
  let vis: Vec<(&str, Visibility)> = a.members.iter().map(|m| (m.name.as_str(), m.visibility)).collect();
  assert_eq!(vis, vec![
    ("_m", Visibility::Private),
    ("__init__", Visibility::Public),
    ("__m", Visibility::Private),
    ("_Inner", Visibility::Private),
  ]);
  assert!(a.members.iter().all(|m| !m.exported));
  let inner = find(&a.members, "_Inner");
  assert_eq!(inner.members[0].visibility, Visibility::Public);
}

#[test]
fn test_shadowing_keeps_first_position() {
  let source = "\
def f(): pass
class C: pass
async def f(): pass
f = 1
";
  let e = enumerate_str(source);
  assert_eq!(names(&e.declarations), vec!["f", "C"]);
  let f = &e.declarations[0];
  assert_eq!(f.kind, DeclKind::AsyncFunction);
  assert_eq!(f.line, 3);
}

#[test]
fn test_decorators_bases_and_locations() {
  let source = "\
x = 1
@a.b.c(1)
@d
class K(Base, pkg.Mixin, *more, metaclass=M, **kw):
  pass
";
  let e = enumerate_str(source);
  let k = &e.declarations[0];
  assert_eq!(k.decorators, vec!["a.b.c".to_string(), "d".to_string()]);
  assert_eq!(k.bases, vec![
    "Base".to_string(),
    "pkg.Mixin".to_string(),
    "*more".to_string()
  ]);
  assert_eq!(k.line, 4);
  // From the first `@` to the end of the body.
  assert_eq!(k.loc, Loc(6, source.len() - 1));
  assert!(source[k.loc.0..k.loc.1].ends_with("pass"));
}

#[test]
fn test_non_dotted_decorators_keep_source_text() {
  let e = enumerate_str("@handlers[0]\ndef f(): pass\n");
  assert_eq!(e.declarations[0].decorators, vec!["handlers[0]".to_string()]);
}

#[test]
fn test_relative_and_star_imports() {
  let e = enumerate_str("from . import a\nfrom ...pkg import b as c\nfrom .m import *\nimport x.y as z\n");
  let i = &e.imports;
  assert_eq!((i[0].module.as_str(), i[0].name.as_deref()), (".", Some("a")));
  assert_eq!((i[1].module.as_str(), i[1].name.as_deref(), i[1].alias.as_deref()), (
    "...pkg",
    Some("b"),
    Some("c")
  ));
  assert_eq!((i[2].module.as_str(), i[2].name.as_deref()), (".m", Some("*")));
  assert_eq!((i[3].module.as_str(), i[3].name.as_deref(), i[3].alias.as_deref()), (
    "x.y",
    None,
    Some("z")
  ));
  // Only direct module-body imports are listed.
  let e = enumerate_str("try:\n  import a\nexcept ImportError:\n  a = None\ndef f():\n  import b\n");
  assert!(e.imports.is_empty());
}

#[test]
fn test_idempotent() {
  let unit = SourceUnit::new(FIXTURE);
  let first = enumerate(&unit).unwrap();
  let second = enumerate(&unit).unwrap();
  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}

#[test]
fn test_empty_module() {
  let e = enumerate_str("");
  assert!(e.declarations.is_empty());
  assert!(e.imports.is_empty());
  assert_eq!(e.exports, None);
}

#[test]
fn test_malformed_input_is_parse_error() {
  let cases = [
    ("x = 'abc\n", SyntaxErrorType::UnterminatedString),
    ("if x:\n    y\n  z\n", SyntaxErrorType::InconsistentDedent),
    ("def f()\n  pass\n", SyntaxErrorType::RequiredTokenNotFound(parse_py::token::TT::Colon)),
    ("f(a, b\n", SyntaxErrorType::UnmatchedBracket),
    ("def ok(): pass\nclass\n", SyntaxErrorType::ExpectedSyntax("identifier")),
  ];
  for (source, typ) in cases {
    let err = enumerate(&SourceUnit::new(source)).unwrap_err();
    assert_eq!(err.typ, typ, "in {:?}", source);
  }
}

#[test]
fn test_serialized_shape() {
  let e = enumerate_str("async def _f():\n  pass\n");
  let value = serde_json::to_value(&e).unwrap();
  assert_eq!(value["exports"], serde_json::Value::Null);
  let decl = &value["declarations"][0];
  assert_eq!(decl["name"], "_f");
  assert_eq!(decl["kind"], "async-function");
  assert_eq!(decl["visibility"], "private");
  assert_eq!(decl["exported"], false);
  assert_eq!(decl["loc"], serde_json::json!([0, 22]));
  assert_eq!(decl["line"], 1);
}

#[test]
fn test_deep_nesting_is_parse_error_not_overflow() {
  let nested = |n: usize| format!("x = {}1{}\ndef f(): pass\n", "(".repeat(n), ")".repeat(n));
  let e = enumerate_str(&nested(199));
  assert_eq!(names(&e.declarations), vec!["f"]);
  let err = enumerate(&SourceUnit::new(nested(10_000))).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::NestingTooDeep);
  assert_eq!(err.code(), "PY0016");

  let lists = format!("__all__ = {}[]{}\n", "[".repeat(198), "]".repeat(198));
  assert_eq!(enumerate_str(&lists).exports, None);
}

#[test]
fn test_f_string_reusing_its_quote() {
  let e = enumerate_str("x = f\"{'a' if b else \"c\"}\"\ndef f(): pass\n");
  assert_eq!(names(&e.declarations), vec!["f"]);
  assert_eq!(e.declarations[0].line, 2);
}

#[test]
fn test_misordered_call_arguments_are_parse_errors() {
  let cases = [
    ("f(a=1, b)\n", SyntaxErrorType::PositionalArgumentFollowsKeyword),
    ("f(**a, *b)\n", SyntaxErrorType::UnpackingFollowsKeywordUnpacking),
    ("@dec(k=1, v)\ndef g(): pass\n", SyntaxErrorType::PositionalArgumentFollowsKeyword),
  ];
  for (source, typ) in cases {
    let err = enumerate(&SourceUnit::new(source)).unwrap_err();
    assert_eq!(err.typ, typ, "in {:?}", source);
  }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_send_and_sync() {
  assert_send_sync::<SourceUnit>();
  assert_send_sync::<Enumeration>();
  assert_send_sync::<Declaration>();
  assert_send_sync::<symbol_py::Import>();
  assert_send_sync::<symbol_py::ParseError>();
}

#[test]
fn test_concurrent_enumeration_agrees() {
  let unit = SourceUnit::new(FIXTURE);
  let expected = enumerate(&unit).unwrap();
  let results: Vec<Enumeration> = std::thread::scope(|s| {
    let handles: Vec<_> = (0..8).map(|_| s.spawn(|| enumerate(&unit).unwrap())).collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });
  assert_eq!(results.len(), 8);
  for result in results {
    assert_eq!(result, expected);
  }
}
