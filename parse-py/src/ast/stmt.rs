use super::class::ClassDef;
use super::expr::Expr;
use super::func::FuncDef;
use super::func::TypeParam;
use super::import::ImportFromStmt;
use super::import::ImportStmt;
use super::node::Node;
use crate::operator::OperatorName;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  AnnAssign(Node<AnnAssignStmt>),
  Assert(Node<AssertStmt>),
  Assign(Node<AssignStmt>),
  AugAssign(Node<AugAssignStmt>),
  Break(Node<BreakStmt>),
  ClassDef(Node<ClassDef>),
  Continue(Node<ContinueStmt>),
  Del(Node<DelStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  FuncDef(Node<FuncDef>),
  Global(Node<GlobalStmt>),
  If(Node<IfStmt>),
  Import(Node<ImportStmt>),
  ImportFrom(Node<ImportFromStmt>),
  Match(Node<MatchStmt>),
  Nonlocal(Node<NonlocalStmt>),
  Pass(Node<PassStmt>),
  Raise(Node<RaiseStmt>),
  Return(Node<ReturnStmt>),
  Try(Node<TryStmt>),
  TypeAlias(Node<TypeAliasStmt>),
  While(Node<WhileStmt>),
  With(Node<WithStmt>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AnnAssignStmt {
  pub target: Node<Expr>,
  pub annotation: Node<Expr>,
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AssertStmt {
  pub test: Node<Expr>,
  pub message: Option<Node<Expr>>,
}

/// `a = b = value` has two targets.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AssignStmt {
  pub targets: Vec<Node<Expr>>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AugAssignStmt {
  #[drive(skip)]
  pub operator: OperatorName,
  pub target: Node<Expr>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BreakStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ContinueStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DelStmt {
  pub targets: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForStmt {
  #[drive(skip)]
  pub async_: bool,
  pub target: Node<Expr>,
  pub iterable: Node<Expr>,
  pub body: Vec<Node<Stmt>>,
  pub orelse: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct GlobalStmt {
  #[drive(skip)]
  pub names: Vec<String>,
}

/// `elif` chains nest as a single `If` inside `alternate`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Vec<Node<Stmt>>,
  pub alternate: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MatchCase {
  // Patterns are not interpreted; this is the pattern's source text.
  #[drive(skip)]
  pub pattern: String,
  pub guard: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MatchStmt {
  pub subject: Node<Expr>,
  pub cases: Vec<Node<MatchCase>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NonlocalStmt {
  #[drive(skip)]
  pub names: Vec<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PassStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct RaiseStmt {
  pub exception: Option<Node<Expr>>,
  pub cause: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExceptHandler {
  pub type_expr: Option<Node<Expr>>,
  #[drive(skip)]
  pub name: Option<String>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TryStmt {
  pub body: Vec<Node<Stmt>>,
  pub handlers: Vec<Node<ExceptHandler>>,
  pub orelse: Vec<Node<Stmt>>,
  pub finalbody: Vec<Node<Stmt>>,
  // `except*`.
  #[drive(skip)]
  pub star: bool,
}

/// `type Alias[T] = value`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeAliasStmt {
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Vec<Node<TypeParam>>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WhileStmt {
  pub test: Node<Expr>,
  pub body: Vec<Node<Stmt>>,
  pub orelse: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WithItem {
  pub context: Node<Expr>,
  pub target: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WithStmt {
  #[drive(skip)]
  pub async_: bool,
  pub items: Vec<Node<WithItem>>,
  pub body: Vec<Node<Stmt>>,
}
