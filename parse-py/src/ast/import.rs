use super::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// `a.b.c as d`, or `x as y` within `from m import ...`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportAlias {
  // Dotted for `import`, always a single identifier for `from ... import`.
  #[drive(skip)]
  pub name: String,
  #[drive(skip)]
  pub alias: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportStmt {
  pub names: Vec<Node<ImportAlias>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportFromNames {
  // `from m import *`.
  All,
  Specific(Vec<Node<ImportAlias>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportFromStmt {
  // Number of leading dots.
  #[drive(skip)]
  pub level: usize,
  #[drive(skip)]
  pub module: Option<String>,
  pub names: ImportFromNames,
}
