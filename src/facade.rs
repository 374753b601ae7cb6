//! The syntax-check façade: the thin operation the original SOAP/RPC
//! `checkSyntax` method wraps around the parser
//! (`examples/original_source/mutalyzer/services/rpc.py`).
//!
//! Grammar-level failures are never raised as errors here — they are
//! reported inside the returned [`SyntaxCheckResult`], matching the source
//! method's contract that only a missing/empty variant argument raises a
//! fault (`EARG`).

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::parser::driver::parse;

/// Raised only when no variant description was supplied at all — the one
/// case the original `checkSyntax` raises a SOAP fault for (`EARG`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FacadeError {
    #[error("the variant argument is not provided")]
    EmptyVariant,
}

/// One message attached to a [`SyntaxCheckResult`], mirroring the
/// `{errorcode, message}` pairs the original service returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub code: String,
    pub description: String,
}

impl Message {
    fn eparse(description: impl Into<String>) -> Self {
        Self {
            code: "EPARSE".to_owned(),
            description: description.into(),
        }
    }
}

/// The result of a syntax check: whether the variant description parses,
/// and any diagnostic messages collected along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxCheckResult {
    pub valid: bool,
    pub messages: Vec<Message>,
}

/// Attempts to parse `variant`, returning `{valid, messages}` rather than
/// raising for grammar-level problems. Returns `Err(FacadeError::EmptyVariant)`
/// only when `variant` is empty, matching the original `EARG` short-circuit.
pub fn check_syntax(variant: &str) -> Result<SyntaxCheckResult, FacadeError> {
    debug!("check_syntax: received request, input_len={}", variant.len());

    if variant.is_empty() {
        return Err(FacadeError::EmptyVariant);
    }

    let result = match parse(variant) {
        Ok(_) => SyntaxCheckResult {
            valid: true,
            messages: Vec::new(),
        },
        Err(failure) => SyntaxCheckResult {
            valid: false,
            messages: vec![Message::eparse(failure.to_string())],
        },
    };

    debug!("check_syntax: finished processing, valid={}", result.valid);
    Ok(result)
}
