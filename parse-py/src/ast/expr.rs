use super::func::Param;
use super::node::Node;
use crate::operator::OperatorName;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Attribute(Node<AttributeExpr>),
  Await(Node<AwaitExpr>),
  Binary(Node<BinaryExpr>),
  BoolOp(Node<BoolOpExpr>),
  Call(Node<CallExpr>),
  Compare(Node<CompareExpr>),
  Comprehension(Node<ComprehensionExpr>),
  Cond(Node<CondExpr>),
  Dict(Node<DictExpr>),
  Id(Node<IdExpr>),
  Lambda(Node<LambdaExpr>),
  List(Node<ListExpr>),
  Named(Node<NamedExpr>),
  Set(Node<SetExpr>),
  Slice(Node<SliceExpr>),
  Starred(Node<StarredExpr>),
  Subscript(Node<SubscriptExpr>),
  Tuple(Node<TupleExpr>),
  Unary(Node<UnaryExpr>),
  Yield(Node<YieldExpr>),

  // Literals.
  LitBool(Node<LitBoolExpr>),
  LitEllipsis(Node<LitEllipsisExpr>),
  LitNone(Node<LitNoneExpr>),
  LitNum(Node<LitNumExpr>),
  LitStr(Node<LitStrExpr>),
}

impl Expr {
  /// Whether this expression may appear on the left of `=`, in `del`, or as a `for` target.
  pub fn is_assignment_target(&self) -> bool {
    match self {
      Expr::Attribute(_) | Expr::Id(_) | Expr::Subscript(_) => true,
      Expr::Starred(n) => n.stx.value.stx.is_assignment_target(),
      Expr::List(n) => n.stx.elements.iter().all(|e| e.stx.is_assignment_target()),
      Expr::Tuple(n) => n.stx.elements.iter().all(|e| e.stx.is_assignment_target()),
      _ => false,
    }
  }

  /// Whether this expression is a valid target of an annotated assignment, which must be a single target.
  pub fn is_single_target(&self) -> bool {
    matches!(self, Expr::Attribute(_) | Expr::Id(_) | Expr::Subscript(_))
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unpack {
  None,
  Iterable,
  Mapping,
}

/// An argument in a call or a class header: `x`, `*xs`, `**kw`, or `name=x`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub keyword: Option<String>,
  #[drive(skip)]
  pub unpack: Unpack,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AttributeExpr {
  pub value: Node<Expr>,
  #[drive(skip)]
  pub attr: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AwaitExpr {
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

/// A chain of `and` or `or`, flattened: `a or b or c` has three values.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BoolOpExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub values: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

/// `a < b <= c` is one expression with two operators.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CompareExpr {
  pub left: Node<Expr>,
  #[drive(skip)]
  pub operators: Vec<OperatorName>,
  pub comparators: Vec<Node<Expr>>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComprehensionKind {
  Dict,
  Generator,
  List,
  Set,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComprehensionFor {
  #[drive(skip)]
  pub async_: bool,
  pub target: Node<Expr>,
  pub iterable: Node<Expr>,
  pub conditions: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComprehensionExpr {
  #[drive(skip)]
  pub kind: ComprehensionKind,
  // The key for a dict comprehension.
  pub element: Node<Expr>,
  pub value: Option<Node<Expr>>,
  pub generators: Vec<Node<ComprehensionFor>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DictEntry {
  // None for `**mapping`.
  pub key: Option<Node<Expr>>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DictExpr {
  pub entries: Vec<Node<DictEntry>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LambdaExpr {
  pub parameters: Vec<Node<Param>>,
  pub body: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ListExpr {
  pub elements: Vec<Node<Expr>>,
}

/// `name := value`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NamedExpr {
  pub target: Node<IdExpr>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SetExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SliceExpr {
  pub lower: Option<Node<Expr>>,
  pub upper: Option<Node<Expr>>,
  pub step: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct StarredExpr {
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SubscriptExpr {
  pub value: Node<Expr>,
  pub index: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TupleExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct YieldExpr {
  pub value: Option<Node<Expr>>,
  // `yield from`.
  #[drive(skip)]
  pub delegate: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitEllipsisExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNoneExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  // Kept as written, minus `_` separators.
  #[drive(skip)]
  pub value: String,
}

/// One or more adjacent string literals, concatenated.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  // Escapes are decoded unless the literal is raw. Formatted strings keep their replacement fields as written.
  #[drive(skip)]
  pub value: String,
  #[drive(skip)]
  pub bytes: bool,
  #[drive(skip)]
  pub formatted: bool,
}
