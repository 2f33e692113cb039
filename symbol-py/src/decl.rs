use ahash::HashMap;
use ahash::HashMapExt;
use parse_py::ast::class::ClassDef;
use parse_py::ast::expr::Expr;
use parse_py::ast::expr::Unpack;
use parse_py::ast::func::Decorator;
use parse_py::ast::func::FuncDef;
use parse_py::ast::node::Node;
use parse_py::ast::stmt::Stmt;
use parse_py::loc::Loc;
use serde::Serialize;
use serde::Serializer;
use tracing::trace;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
  Function,
  AsyncFunction,
  Class,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
  Public,
  Private,
}

/// A function, async function, or class defined directly in a module or class body.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Declaration {
  pub name: String,
  pub kind: DeclKind,
  pub visibility: Visibility,
  /// Whether the name appears in the module's effective export list. Always false for class members.
  pub exported: bool,
  /// Dotted decorator names, e.g. `functools.cache` for both `@functools.cache` and `@functools.cache()`.
  pub decorators: Vec<String>,
  /// Source text of each positional base of a class. Empty for functions.
  pub bases: Vec<String>,
  /// Spans the whole definition, starting at the first decorator.
  #[serde(serialize_with = "serialize_loc")]
  pub loc: Loc,
  /// 1-based line of the declared name.
  pub line: usize,
  pub members: Vec<Declaration>,
}

fn serialize_loc<S: Serializer>(loc: &Loc, serializer: S) -> Result<S::Ok, S::Error> {
  (loc.0, loc.1).serialize(serializer)
}

/// Whether a name is private by the leading underscore convention. Dunder names like `__init__` are not.
pub fn is_private_name(name: &str) -> bool {
  let dunder = name.len() > 4 && name.starts_with("__") && name.ends_with("__");
  name.starts_with('_') && !dunder
}

/// Membership in the export list overrides the naming convention.
pub fn visibility(name: &str, exports: Option<&[String]>) -> Visibility {
  let exported = exports.is_some_and(|e| e.iter().any(|n| n == name));
  if is_private_name(name) && !exported {
    Visibility::Private
  } else {
    Visibility::Public
  }
}

fn dotted_name(expr: &Expr) -> Option<String> {
  match expr {
    Expr::Id(n) => Some(n.stx.name.clone()),
    Expr::Attribute(n) => {
      let mut name = dotted_name(&n.stx.value.stx)?;
      name.push('.');
      name.push_str(&n.stx.attr);
      Some(name)
    }
    _ => None,
  }
}

pub(crate) struct DeclCollector<'a> {
  source: &'a str,
}

impl<'a> DeclCollector<'a> {
  pub fn new(source: &'a str) -> DeclCollector<'a> {
    DeclCollector { source }
  }

  fn text(&self, loc: Loc) -> String {
    self.source.get(loc.0..loc.1).unwrap_or_default().to_string()
  }

  fn decorator_name(&self, decorator: &Node<Decorator>) -> String {
    let expr = &decorator.stx.expression;
    let target = match expr.stx.as_ref() {
      Expr::Call(call) => &call.stx.callee,
      _ => expr,
    };
    dotted_name(&target.stx).unwrap_or_else(|| self.text(target.loc))
  }

  fn declaration(&self, name: &str, name_loc: Loc, exports: Option<&[String]>) -> (Visibility, bool, usize) {
    let exported = exports.is_some_and(|e| e.iter().any(|n| n == name));
    (visibility(name, exports), exported, name_loc.start_line(self.source))
  }

  fn func(&self, loc: Loc, def: &FuncDef, exports: Option<&[String]>) -> Declaration {
    let name = def.name.stx.name.clone();
    let (visibility, exported, line) = self.declaration(&name, def.name.loc, exports);
    Declaration {
      kind: if def.async_ {
        DeclKind::AsyncFunction
      } else {
        DeclKind::Function
      },
      visibility,
      exported,
      decorators: def.decorators.iter().map(|d| self.decorator_name(d)).collect(),
      bases: Vec::new(),
      loc,
      line,
      members: Vec::new(),
      name,
    }
  }

  fn class(&self, loc: Loc, def: &ClassDef, exports: Option<&[String]>) -> Declaration {
    let name = def.name.stx.name.clone();
    let (visibility, exported, line) = self.declaration(&name, def.name.loc, exports);
    Declaration {
      kind: DeclKind::Class,
      visibility,
      exported,
      decorators: def.decorators.iter().map(|d| self.decorator_name(d)).collect(),
      bases: def
        .arguments
        .iter()
        .filter(|a| a.stx.keyword.is_none() && a.stx.unpack != Unpack::Mapping)
        .map(|a| self.text(a.loc))
        .collect(),
      loc,
      line,
      // The export list never reaches into class bodies.
      members: self.body(&def.body, None),
      name,
    }
  }

  /// The definitions directly in `body`, in source order. A rebound name keeps its first position with its last definition.
  pub fn body(&self, body: &[Node<Stmt>], exports: Option<&[String]>) -> Vec<Declaration> {
    let mut decls: Vec<Declaration> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for stmt in body {
      let decl = match stmt.stx.as_ref() {
        Stmt::FuncDef(n) => self.func(stmt.loc, &n.stx, exports),
        Stmt::ClassDef(n) => self.class(stmt.loc, &n.stx, exports),
        _ => continue,
      };
      trace!(name = %decl.name, kind = ?decl.kind, visibility = ?decl.visibility, line = decl.line, "declaration");
      match index.get(&decl.name) {
        Some(&i) => {
          trace!(name = %decl.name, "shadows earlier definition");
          decls[i] = decl;
        }
        None => {
          index.insert(decl.name.clone(), decls.len());
          decls.push(decl);
        }
      };
    }
    decls
  }
}
