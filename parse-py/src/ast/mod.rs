pub mod class;
pub mod expr;
pub mod func;
pub mod import;
pub mod node;
pub mod stmt;
pub mod stx;
