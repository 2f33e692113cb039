use parse_py::ast::import::ImportFromNames;
use parse_py::ast::import::ImportFromStmt;
use parse_py::ast::import::ImportStmt;
use parse_py::ast::node::Node;
use parse_py::ast::stmt::Stmt;
use serde::Serialize;

/// One name bound by an `import` or `from ... import` statement.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Import {
  /// Dotted module path. Relative imports keep their leading dots, so `from . import x` has module `.`.
  pub module: String,
  /// The imported member for `from` imports, `*` for star imports, and None for plain `import`.
  pub name: Option<String>,
  pub alias: Option<String>,
  pub line: usize,
}

fn plain(source: &str, stmt: &ImportStmt, out: &mut Vec<Import>) {
  for alias in &stmt.names {
    out.push(Import {
      module: alias.stx.name.clone(),
      name: None,
      alias: alias.stx.alias.clone(),
      line: alias.loc.start_line(source),
    });
  }
}

fn from(source: &str, loc_line: usize, stmt: &ImportFromStmt, out: &mut Vec<Import>) {
  let mut module = ".".repeat(stmt.level);
  if let Some(m) = &stmt.module {
    module.push_str(m);
  };
  match &stmt.names {
    ImportFromNames::All => out.push(Import {
      module,
      name: Some("*".to_string()),
      alias: None,
      line: loc_line,
    }),
    ImportFromNames::Specific(names) => {
      for alias in names {
        out.push(Import {
          module: module.clone(),
          name: Some(alias.stx.name.clone()),
          alias: alias.stx.alias.clone(),
          line: alias.loc.start_line(source),
        });
      }
    }
  };
}

/// The imports made directly by statements in `body`, in source order.
pub(crate) fn collect_imports(source: &str, body: &[Node<Stmt>]) -> Vec<Import> {
  let mut imports = Vec::new();
  for stmt in body {
    match stmt.stx.as_ref() {
      Stmt::Import(n) => plain(source, &n.stx, &mut imports),
      Stmt::ImportFrom(n) => from(source, n.loc.start_line(source), &n.stx, &mut imports),
      _ => {}
    };
  }
  imports
}
