//! The parse entry point: runs the top-level `Var` rule against an entire
//! input string and enforces full consumption.
//!
//! Whitespace policy: **no whitespace is skipped anywhere** in this grammar.
//! Real-world HGVS descriptions are whitespace-free and the original
//! `pyparsing` grammar never calls `.leaveWhitespace()` selectively across
//! this subset of productions, so a single strict, zero-ambiguity policy is
//! used throughout rather than threading a skip-whitespace combinator into
//! every sequence.
//!
//! Each call to [`parse`] owns a fresh [`PackratCache`]; it is dropped when
//! the call returns and is never shared across calls or threads, so there is
//! no interior mutability escaping this module's boundary.

use log::{debug, warn};

use crate::ast::Var;
use crate::config::ParserLimits;

use super::combinators::PackratCache;
use super::error::ParseError;
use super::var::var;

/// A failed parse: a 0-based character offset into the original input, a
/// human-readable message, and the echoed input itself (the original CLI
/// test harness in `Parser.py` renders this as input line + caret; here it
/// is returned as data so callers can render it however they like).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub position: usize,
    pub message: String,
    pub input: String,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl std::error::Error for ParseFailure {}

/// Parses `input` against the top-level `Var` grammar using
/// [`ParserLimits::default`]. See [`parse_with_limits`] to override limits.
pub fn parse(input: &str) -> Result<Var, ParseFailure> {
    parse_with_limits(input, &ParserLimits::default())
}

/// Parses `input`, enforcing `limits.max_input_len` before attempting any
/// grammar rule.
pub fn parse_with_limits(input: &str, limits: &ParserLimits) -> Result<Var, ParseFailure> {
    debug!("parse: input_len={}", input.len());

    if input.len() > limits.max_input_len {
        let err = ParseError::InputTooLong {
            limit: limits.max_input_len,
            actual: input.len(),
        };
        warn!("parse: {err} (position 0)");
        return Err(ParseFailure {
            position: 0,
            message: err.to_string(),
            input: input.to_owned(),
        });
    }

    let cache = PackratCache::new();
    match var(&cache, input) {
        Ok((rest, tree)) if rest.is_empty() => Ok(tree),
        Ok((rest, _)) => {
            let position = input.len() - rest.len();
            let err = ParseError::TrailingInput {
                position,
                remainder: rest.to_owned(),
            };
            warn!("parse: {err}");
            Err(ParseFailure {
                position,
                message: err.to_string(),
                input: input.to_owned(),
            })
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            // `VerboseError`'s first (deepest) entry is the remaining input at
            // the point furthest into the string any grammar rule reached
            // before giving up; its length converts back to a byte offset.
            let position = e
                .errors
                .first()
                .map(|(remaining, _)| input.len() - remaining.len())
                .unwrap_or(0);
            let err = ParseError::NoMatch { position };
            warn!("parse: {err}");
            Err(ParseFailure {
                position,
                message: err.to_string(),
                input: input.to_owned(),
            })
        }
        Err(nom::Err::Incomplete(_)) => {
            // Every combinator used by this grammar is a `complete` one; this
            // variant is requested only by streaming parsers and is
            // unreachable here.
            let err = ParseError::NoMatch { position: 0 };
            warn!("parse: {err}");
            Err(ParseFailure {
                position: 0,
                message: err.to_string(),
                input: input.to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("AB026906.1:c.274G>T")]
    #[case("NM_002001.2:c.[12del]")]
    #[case("NM_002001.2:c.[(12del);(12del)]")]
    #[case("NM_002001.2:c.[((12del)?;12del)?]")]
    #[case("NC_000001.10:g.159272155del")]
    #[case("AB026906.1:c.[274G>T;120del;124_125insATG]")]
    fn accepts_valid_descriptions(#[case] input: &str) {
        assert!(parse(input).is_ok(), "expected {input:?} to parse");
    }

    #[test]
    fn rejects_garbage_input() {
        let result = parse("0:abcd");
        assert!(result.is_err());
    }

    #[test]
    fn reports_position_for_trailing_input() {
        let result = parse("AB026906.1:c.274G>Tjunk");
        let failure = result.unwrap_err();
        assert_eq!(failure.position, "AB026906.1:c.274G>T".len());
    }

    #[test]
    fn reports_real_position_for_a_non_trailing_failure() {
        // A well-formed reference with nothing after it: every alternative of
        // `var` consumes the whole string down to the trailing `RawVar`/
        // `SingleAlleleVarSet`/etc. and then fails on the empty remainder, so
        // the reported position is the end of the input, not a hardcoded 0.
        let input = "AB026906.1:c.";
        let failure = parse(input).unwrap_err();
        assert_eq!(failure.position, input.len());
    }

    #[test]
    fn rejects_input_over_the_length_limit() {
        let huge = "A".repeat(20);
        let limits = ParserLimits::new(10);
        let result = parse_with_limits(&huge, &limits);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().position, 0);
    }

    #[test]
    fn parse_is_deterministic() {
        let input = "AB026906.1:c.274G>T";
        assert_eq!(parse(input), parse(input));
    }
}
