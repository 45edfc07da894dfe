//! AST lowering - converts the concrete syntax tree into the AST
//!
//! This crate handles:
//! - One conversion rule per CST node kind, rejecting everything else
//! - Folding attribute chains into dotted names
//! - Specialising `range(...)` calls
//! - Re-parsing `#$` pragma comments through the front end
//! - Recording intrinsics bound by `numpy` and `math` imports

pub mod error;
mod escape;
mod expr;
pub mod lower;
mod pragma;

pub use error::LowerError;
pub use lower::{LoweredModule, LoweringContext, lower_source_file};
