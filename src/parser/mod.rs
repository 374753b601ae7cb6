//! The HGVS grammar: token primitives, ordered-choice/packrat infrastructure,
//! one submodule per production group, and the top-level parse driver.

pub mod allele_set;
pub mod combinators;
pub mod driver;
pub mod error;
pub mod loc;
pub mod raw_var;
pub mod tokens;
pub mod var;

pub use driver::{parse, parse_with_limits, ParseFailure};
pub use error::ParseError;
