use super::expr::Expr;
use super::node::Node;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrFuncName {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Decorator {
  pub expression: Node<Expr>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
  // Before `/`.
  PositionalOnly,
  Regular,
  // `*args`.
  VarPositional,
  // After `*` or `*args`.
  KeywordOnly,
  // `**kwargs`.
  VarKeyword,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Param {
  #[drive(skip)]
  pub name: String,
  #[drive(skip)]
  pub kind: ParamKind,
  // Always None for lambda parameters.
  pub annotation: Option<Node<Expr>>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeParamKind {
  TypeVar,
  TypeVarTuple,
  ParamSpec,
}

/// An entry of a PEP 695 type parameter list, e.g. `T: int = str` in `def f[T: int = str]()`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeParam {
  #[drive(skip)]
  pub name: String,
  #[drive(skip)]
  pub kind: TypeParamKind,
  pub bound: Option<Node<Expr>>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDef {
  pub decorators: Vec<Node<Decorator>>,
  #[drive(skip)]
  pub async_: bool,
  pub name: Node<ClassOrFuncName>,
  pub type_parameters: Vec<Node<TypeParam>>,
  pub parameters: Vec<Node<Param>>,
  pub returns: Option<Node<Expr>>,
  pub body: Vec<Node<Stmt>>,
}
