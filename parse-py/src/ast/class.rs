use super::expr::CallArg;
use super::func::ClassOrFuncName;
use super::func::Decorator;
use super::func::TypeParam;
use super::node::Node;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDef {
  pub decorators: Vec<Node<Decorator>>,
  pub name: Node<ClassOrFuncName>,
  pub type_parameters: Vec<Node<TypeParam>>,
  // Bases and keywords such as `metaclass=...`, in written order.
  pub arguments: Vec<Node<CallArg>>,
  pub body: Vec<Node<Stmt>>,
}
