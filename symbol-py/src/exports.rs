use ahash::HashSet;
use ahash::HashSetExt;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use parse_py::ast::class::ClassDef;
use parse_py::ast::expr::CallArg;
use parse_py::ast::expr::Expr;
use parse_py::ast::expr::Unpack;
use parse_py::ast::func::FuncDef;
use parse_py::ast::node::Node;
use parse_py::ast::stmt::AnnAssignStmt;
use parse_py::ast::stmt::AssignStmt;
use parse_py::ast::stmt::AugAssignStmt;
use parse_py::ast::stmt::ExprStmt;
use parse_py::ast::stx::Module;
use parse_py::operator::OperatorName;
use tracing::debug;

const ALL: &str = "__all__";

type AnnAssignStmtNode = Node<AnnAssignStmt>;
type AssignStmtNode = Node<AssignStmt>;
type AugAssignStmtNode = Node<AugAssignStmt>;
type ClassDefNode = Node<ClassDef>;
type ExprStmtNode = Node<ExprStmt>;
type FuncDefNode = Node<FuncDef>;

fn is_all(expr: &Expr) -> bool {
  matches!(expr, Expr::Id(n) if n.stx.name == ALL)
}

// Whether `__all__` is bound anywhere within a (possibly destructuring) target.
fn binds_all(expr: &Expr) -> bool {
  match expr {
    Expr::Id(n) => n.stx.name == ALL,
    Expr::Starred(n) => binds_all(&n.stx.value.stx),
    Expr::List(n) => n.stx.elements.iter().any(|e| binds_all(&e.stx)),
    Expr::Tuple(n) => n.stx.elements.iter().any(|e| binds_all(&e.stx)),
    _ => false,
  }
}

fn lit_str(expr: &Expr) -> Option<String> {
  match expr {
    Expr::LitStr(n) if !n.stx.bytes && !n.stx.formatted => Some(n.stx.value.clone()),
    _ => None,
  }
}

/// The names of a list or tuple display made only of plain string literals.
fn lit_str_seq(expr: &Expr) -> Option<Vec<String>> {
  let elements = match expr {
    Expr::List(n) => &n.stx.elements,
    Expr::Tuple(n) => &n.stx.elements,
    _ => return None,
  };
  elements.iter().map(|e| lit_str(&e.stx)).collect()
}

fn single_positional(args: &[Node<CallArg>]) -> Option<&Expr> {
  match args {
    [arg] if arg.stx.keyword.is_none() && arg.stx.unpack == Unpack::None => Some(&arg.stx.value.stx),
    _ => None,
  }
}

#[derive(Default, Visitor)]
#[visitor(
  AnnAssignStmtNode(enter),
  AssignStmtNode(enter),
  AugAssignStmtNode(enter),
  ClassDefNode(enter, exit),
  ExprStmtNode(enter),
  FuncDefNode(enter, exit)
)]
struct ExportsVisitor {
  // Number of enclosing function or class definitions.
  depth: usize,
  names: Option<Vec<String>>,
}

impl ExportsVisitor {
  // Any binding we can't evaluate statically leaves the list unknown.
  fn assign(&mut self, value: &Expr) {
    self.names = lit_str_seq(value);
  }

  fn append(&mut self, extra: Option<Vec<String>>) {
    match (self.names.as_mut(), extra) {
      (Some(names), Some(extra)) => names.extend(extra),
      _ => self.names = None,
    };
  }

  fn enter_func_def_node(&mut self, _: &FuncDefNode) {
    self.depth += 1;
  }

  fn exit_func_def_node(&mut self, _: &FuncDefNode) {
    self.depth -= 1;
  }

  fn enter_class_def_node(&mut self, _: &ClassDefNode) {
    self.depth += 1;
  }

  fn exit_class_def_node(&mut self, _: &ClassDefNode) {
    self.depth -= 1;
  }

  fn enter_assign_stmt_node(&mut self, node: &AssignStmtNode) {
    if self.depth > 0 {
      return;
    };
    let targets = &node.stx.targets;
    if targets.iter().any(|t| is_all(&t.stx)) {
      self.assign(&node.stx.value.stx);
    } else if targets.iter().any(|t| binds_all(&t.stx)) {
      self.names = None;
    };
  }

  fn enter_ann_assign_stmt_node(&mut self, node: &AnnAssignStmtNode) {
    if self.depth > 0 || !is_all(&node.stx.target.stx) {
      return;
    };
    // A bare annotation binds nothing.
    if let Some(value) = &node.stx.value {
      self.assign(&value.stx);
    };
  }

  fn enter_aug_assign_stmt_node(&mut self, node: &AugAssignStmtNode) {
    if self.depth > 0 || !is_all(&node.stx.target.stx) {
      return;
    };
    if node.stx.operator == OperatorName::Addition {
      self.append(lit_str_seq(&node.stx.value.stx));
    } else {
      self.names = None;
    };
  }

  fn enter_expr_stmt_node(&mut self, node: &ExprStmtNode) {
    if self.depth > 0 {
      return;
    };
    let Expr::Call(call) = node.stx.expr.stx.as_ref() else {
      return;
    };
    let Expr::Attribute(callee) = call.stx.callee.stx.as_ref() else {
      return;
    };
    if !is_all(&callee.stx.value.stx) {
      return;
    };
    let arg = single_positional(&call.stx.arguments);
    match callee.stx.attr.as_str() {
      "append" => self.append(arg.and_then(lit_str).map(|n| vec![n])),
      "extend" => self.append(arg.and_then(lit_str_seq)),
      _ => {}
    };
  }
}

/// Evaluates the module's `__all__` statements, outside of any function or class body, in source order.
///
/// Returns None if `__all__` is never bound, or if its final value can't be determined without running code.
pub fn discover_exports(module: &Node<Module>) -> Option<Vec<String>> {
  let mut visitor = ExportsVisitor::default();
  module.drive(&mut visitor);
  let mut seen = HashSet::new();
  let names: Option<Vec<String>> = visitor
    .names
    .map(|names| names.into_iter().filter(|n| seen.insert(n.clone())).collect());
  debug!(exports = ?names, "discovered export list");
  names
}

#[cfg(test)]
mod tests {
  use super::discover_exports;
  use parse_py::parse;

  fn exports(source: &str) -> Option<Vec<String>> {
    discover_exports(&parse(source).unwrap())
  }

  fn names(names: &[&str]) -> Option<Vec<String>> {
    Some(names.iter().map(|n| n.to_string()).collect())
  }

  #[test]
  fn test_literal_assignment() {
    assert_eq!(exports("__all__ = ['a', \"b\"]\n"), names(&["a", "b"]));
    assert_eq!(exports("__all__ = ('a',)\n"), names(&["a"]));
    assert_eq!(exports("__all__ = []\n"), names(&[]));
    assert_eq!(exports("__all__: list[str] = ['a']\n"), names(&["a"]));
    assert_eq!(exports("x = __all__ = ['a']\n"), names(&["a"]));
    assert_eq!(exports("x = 1\n"), None);
  }

  #[test]
  fn test_later_statements_modify_list() {
    assert_eq!(
      exports("__all__ = ['a']\n__all__ += ['b']\n__all__.append('c')\n__all__.extend(('d', 'e'))\n"),
      names(&["a", "b", "c", "d", "e"])
    );
    assert_eq!(exports("__all__ = ['a']\n__all__ = ['b']\n"), names(&["b"]));
    // Appending to a list that was never bound isn't meaningful.
    assert_eq!(exports("__all__ += ['a']\n"), None);
  }

  #[test]
  fn test_non_literal_values_make_list_unknown() {
    assert_eq!(exports("__all__ = names()\n"), None);
    assert_eq!(exports("__all__ = ['a', b]\n"), None);
    assert_eq!(exports("__all__ = [f'a']\n"), None);
    assert_eq!(exports("__all__ = ['a']\n__all__ += other.__all__\n"), None);
    assert_eq!(exports("__all__ = ['a']\n__all__.append(name)\n"), None);
    assert_eq!(exports("__all__ = ['a']\n__all__, x = y\n"), None);
    assert_eq!(exports("__all__ = ['a']\n__all__ *= 2\n"), None);
    // Until the next literal assignment.
    assert_eq!(exports("__all__ = names()\n__all__ = ['z']\n"), names(&["z"]));
  }

  #[test]
  fn test_duplicates_kept_once() {
    assert_eq!(exports("__all__ = ['a', 'b', 'a']\n__all__ += ['b', 'c']\n"), names(&["a", "b", "c"]));
  }

  #[test]
  fn test_only_module_level_statements() {
    assert_eq!(exports("def f():\n  __all__ = ['x']\n"), None);
    assert_eq!(exports("class A:\n  __all__ = ['x']\n"), None);
    assert_eq!(exports("__all__ = ['a']\ndef f():\n  __all__.append('x')\n"), names(&["a"]));
    assert_eq!(
      exports("try:\n  __all__ = ['a']\nexcept ImportError:\n  __all__ = ['b']\n"),
      names(&["b"])
    );
    assert_eq!(exports("if flag:\n  __all__ = ['a']\nelse:\n  __all__ = ['b', 'c']\n"), names(&["b", "c"]));
    // Unrelated method calls and expressions are ignored.
    assert_eq!(exports("__all__ = ['a']\n__all__.sort()\nprint(__all__)\n"), names(&["a"]));
  }
}
