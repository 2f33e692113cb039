use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;

// Binary operators looser than unary and tighter than comparisons. `**` is handled separately, as it binds tighter than a unary operand on its left.
pub static BINARY_OPERATOR_MAPPING: Lazy<HashMap<TT, &'static Operator>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static Operator>::new();
  map.insert(TT::Ampersand, &OPERATORS[&OperatorName::BitwiseAnd]);
  map.insert(TT::Asterisk, &OPERATORS[&OperatorName::Multiplication]);
  map.insert(TT::At, &OPERATORS[&OperatorName::MatrixMultiplication]);
  map.insert(TT::Bar, &OPERATORS[&OperatorName::BitwiseOr]);
  map.insert(TT::Caret, &OPERATORS[&OperatorName::BitwiseXor]);
  map.insert(TT::ChevronLeftChevronLeft, &OPERATORS[&OperatorName::BitwiseLeftShift]);
  map.insert(TT::ChevronRightChevronRight, &OPERATORS[&OperatorName::BitwiseRightShift]);
  map.insert(TT::Hyphen, &OPERATORS[&OperatorName::Subtraction]);
  map.insert(TT::Percent, &OPERATORS[&OperatorName::Remainder]);
  map.insert(TT::Plus, &OPERATORS[&OperatorName::Addition]);
  map.insert(TT::Slash, &OPERATORS[&OperatorName::Division]);
  map.insert(TT::SlashSlash, &OPERATORS[&OperatorName::FloorDivision]);
  map
});

pub static UNARY_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  map.insert(TT::Hyphen, OperatorName::UnaryNegation);
  map.insert(TT::Plus, OperatorName::UnaryPlus);
  map.insert(TT::Tilde, OperatorName::BitwiseNot);
  map
});

// Single-token comparisons. `not in` and `is not` span two tokens.
pub static COMPARISON_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  map.insert(TT::ChevronLeft, OperatorName::LessThan);
  map.insert(TT::ChevronLeftEquals, OperatorName::LessThanOrEqual);
  map.insert(TT::ChevronRight, OperatorName::GreaterThan);
  map.insert(TT::ChevronRightEquals, OperatorName::GreaterThanOrEqual);
  map.insert(TT::EqualsEquals, OperatorName::Equality);
  map.insert(TT::ExclamationEquals, OperatorName::Inequality);
  map.insert(TT::KeywordIn, OperatorName::In);
  map.insert(TT::KeywordIs, OperatorName::Is);
  map
});

pub static AUGMENTED_ASSIGNMENT_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  map.insert(TT::AmpersandEquals, OperatorName::BitwiseAnd);
  map.insert(TT::AsteriskAsteriskEquals, OperatorName::Exponentiation);
  map.insert(TT::AsteriskEquals, OperatorName::Multiplication);
  map.insert(TT::AtEquals, OperatorName::MatrixMultiplication);
  map.insert(TT::BarEquals, OperatorName::BitwiseOr);
  map.insert(TT::CaretEquals, OperatorName::BitwiseXor);
  map.insert(TT::ChevronLeftChevronLeftEquals, OperatorName::BitwiseLeftShift);
  map.insert(TT::ChevronRightChevronRightEquals, OperatorName::BitwiseRightShift);
  map.insert(TT::HyphenEquals, OperatorName::Subtraction);
  map.insert(TT::PercentEquals, OperatorName::Remainder);
  map.insert(TT::PlusEquals, OperatorName::Addition);
  map.insert(TT::SlashEquals, OperatorName::Division);
  map.insert(TT::SlashSlashEquals, OperatorName::FloorDivision);
  map
});
