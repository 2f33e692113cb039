use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseXor,
  Division,
  Equality,
  Exponentiation,
  FloorDivision,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Is,
  IsNot,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MatrixMultiplication,
  Multiplication,
  NotIn,
  Remainder,
  Subtraction,
  UnaryNegation,
  UnaryPlus,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  pub associativity: Associativity,
  pub precedence: u8,
}

const PRECEDENCE_LEVEL_14: &[(OperatorName, Associativity)] =
  &[(OperatorName::Exponentiation, Associativity::Right)];

const PRECEDENCE_LEVEL_13: &[(OperatorName, Associativity)] = &[
  (OperatorName::BitwiseNot, Associativity::Right),
  (OperatorName::UnaryNegation, Associativity::Right),
  (OperatorName::UnaryPlus, Associativity::Right),
];

const PRECEDENCE_LEVEL_12: &[(OperatorName, Associativity)] = &[
  (OperatorName::Division, Associativity::Left),
  (OperatorName::FloorDivision, Associativity::Left),
  (OperatorName::MatrixMultiplication, Associativity::Left),
  (OperatorName::Multiplication, Associativity::Left),
  (OperatorName::Remainder, Associativity::Left),
];

const PRECEDENCE_LEVEL_11: &[(OperatorName, Associativity)] = &[
  (OperatorName::Addition, Associativity::Left),
  (OperatorName::Subtraction, Associativity::Left),
];

const PRECEDENCE_LEVEL_10: &[(OperatorName, Associativity)] = &[
  (OperatorName::BitwiseLeftShift, Associativity::Left),
  (OperatorName::BitwiseRightShift, Associativity::Left),
];

const PRECEDENCE_LEVEL_9: &[(OperatorName, Associativity)] =
  &[(OperatorName::BitwiseAnd, Associativity::Left)];

const PRECEDENCE_LEVEL_8: &[(OperatorName, Associativity)] =
  &[(OperatorName::BitwiseXor, Associativity::Left)];

const PRECEDENCE_LEVEL_7: &[(OperatorName, Associativity)] =
  &[(OperatorName::BitwiseOr, Associativity::Left)];

// Comparisons chain (`a < b < c`) instead of associating.
const PRECEDENCE_LEVEL_6: &[(OperatorName, Associativity)] = &[
  (OperatorName::Equality, Associativity::Left),
  (OperatorName::GreaterThan, Associativity::Left),
  (OperatorName::GreaterThanOrEqual, Associativity::Left),
  (OperatorName::In, Associativity::Left),
  (OperatorName::Inequality, Associativity::Left),
  (OperatorName::Is, Associativity::Left),
  (OperatorName::IsNot, Associativity::Left),
  (OperatorName::LessThan, Associativity::Left),
  (OperatorName::LessThanOrEqual, Associativity::Left),
  (OperatorName::NotIn, Associativity::Left),
];

const PRECEDENCE_LEVEL_5: &[(OperatorName, Associativity)] =
  &[(OperatorName::LogicalNot, Associativity::Right)];

const PRECEDENCE_LEVEL_4: &[(OperatorName, Associativity)] =
  &[(OperatorName::LogicalAnd, Associativity::Left)];

const PRECEDENCE_LEVEL_3: &[(OperatorName, Associativity)] =
  &[(OperatorName::LogicalOr, Associativity::Left)];

const PRECEDENCE_LEVELS: &[&[(OperatorName, Associativity)]] = &[
  PRECEDENCE_LEVEL_14,
  PRECEDENCE_LEVEL_13,
  PRECEDENCE_LEVEL_12,
  PRECEDENCE_LEVEL_11,
  PRECEDENCE_LEVEL_10,
  PRECEDENCE_LEVEL_9,
  PRECEDENCE_LEVEL_8,
  PRECEDENCE_LEVEL_7,
  PRECEDENCE_LEVEL_6,
  PRECEDENCE_LEVEL_5,
  PRECEDENCE_LEVEL_4,
  PRECEDENCE_LEVEL_3,
];

pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  let mut map = HashMap::<OperatorName, Operator>::new();
  for (i, ops) in PRECEDENCE_LEVELS.iter().enumerate() {
    let precedence = (PRECEDENCE_LEVELS.len() - i + 2) as u8;
    for &(name, associativity) in ops.iter() {
      map.insert(name, Operator {
        name,
        associativity,
        precedence,
      });
    }
  }
  map
});
