//! Parser for the HGVS variant nomenclature.
//!
//! `parser::parse` turns a variant description into a [`ast::Var`] tree;
//! `facade::check_syntax` wraps that in the thin `{valid, messages}` report
//! the original SOAP `checkSyntax` operation returns. Everything else that
//! consumes a parsed variant — position conversion, semantic checking,
//! GenBank retrieval, batch scheduling — lives outside this crate; see
//! [`downstream`] for the seam those collaborators attach to.

pub mod ast;
pub mod config;
pub mod downstream;
pub mod facade;
pub mod parser;

pub use ast::Var;
pub use facade::{check_syntax, FacadeError, Message, SyntaxCheckResult};
pub use parser::{parse, ParseFailure};
