//! Ordered-choice and memoization infrastructure shared by the grammar rules.
//!
//! `spec.md` §4.C calls the `^` operator "the critical disambiguation
//! operator": every alternative is tried and the one consuming the most
//! input wins, with source order breaking ties. `nom::branch::alt` is
//! first-match and is used directly where productions are prefix-disjoint;
//! [`longest_match`] is used everywhere the grammar source uses `^`.

use std::cell::RefCell;

use ahash::AHashMap;
use nom::error::ParseError;
use nom::IResult;
use nom_language::error::VerboseError;

/// The error type threaded through every grammar rule. `VerboseError`
/// carries the input slice remaining at the point of failure, which
/// [`super::driver::parse_with_limits`] turns back into a byte offset for
/// [`super::driver::ParseFailure::position`] instead of reporting `0`
/// regardless of where the grammar actually gave up.
pub(crate) type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Picks the remaining-input length recorded by the deepest entry of a
/// `VerboseError`, i.e. how close this failed attempt got to the end of the
/// input before giving up. `None` for `Incomplete`, which the `complete`
/// combinators used throughout this grammar never produce.
fn failure_depth(err: &nom::Err<VerboseError<&str>>) -> Option<usize> {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.errors.first().map(|(rest, _)| rest.len()),
        nom::Err::Incomplete(_) => None,
    }
}

/// Ordered choice with longest-match semantics (`^` in the grammar source).
///
/// All alternatives are attempted against `input`; the one whose remainder
/// is shortest (i.e. consumed the most input) is kept. Ties are broken by
/// position in `alts` — the first alternative in source order wins. If every
/// alternative fails, the error that got furthest into `input` is returned
/// rather than a generic one anchored at the start.
pub fn longest_match<'a, O>(
    alts: Vec<Box<dyn Fn(&'a str) -> PResult<'a, O> + 'a>>,
) -> impl Fn(&'a str) -> PResult<'a, O> + 'a {
    move |input: &'a str| {
        let mut best: Option<(&'a str, O)> = None;
        let mut deepest_err: Option<nom::Err<VerboseError<&'a str>>> = None;
        for alt in &alts {
            match alt(input) {
                Ok((rest, value)) => {
                    let consumed = input.len() - rest.len();
                    let is_better = match &best {
                        None => true,
                        Some((best_rest, _)) => consumed > input.len() - best_rest.len(),
                    };
                    if is_better {
                        best = Some((rest, value));
                    }
                }
                Err(e) => {
                    let replace = match (&deepest_err, failure_depth(&e)) {
                        (None, _) => true,
                        (Some(prev), Some(candidate)) => {
                            failure_depth(prev).map_or(true, |prev_len| candidate < prev_len)
                        }
                        (Some(_), None) => false,
                    };
                    if replace {
                        deepest_err = Some(e);
                    }
                }
            }
        }
        match best {
            Some((rest, value)) => Ok((rest, value)),
            None => Err(deepest_err.unwrap_or_else(|| {
                nom::Err::Error(VerboseError::from_error_kind(input, nom::error::ErrorKind::Alt))
            })),
        }
    }
}

/// Builds the `Vec<Box<dyn Fn...>>` that [`longest_match`] expects from a
/// bare list of parser expressions, mirroring the grammar source's `^`.
macro_rules! longest_alt {
    ($($parser:expr),+ $(,)?) => {
        $crate::parser::combinators::longest_match(vec![$(Box::new($parser)),+])
    };
}
pub(crate) use longest_alt;

/// One packrat cache slot: either the rule matched (and consumed up to the
/// given remaining length) or it definitively failed at this position.
#[derive(Clone)]
enum CacheEntry<T> {
    Success(usize, T),
    Failure,
}

/// Per-call memoization table for a single recursive rule, keyed by
/// remaining-input length (a stable proxy for byte offset, since every
/// sub-slice seen during one `parse` call is a suffix of the same original
/// string). Discarded when the owning [`PackratCache`] is dropped — i.e. at
/// the end of the `parse` call that created it (`spec.md` §5).
struct Memo<T>(RefCell<AHashMap<usize, CacheEntry<T>>>);

impl<T: Clone> Memo<T> {
    fn new() -> Self {
        Self(RefCell::new(AHashMap::default()))
    }

    fn get_or_insert_with<'a>(
        &self,
        input: &'a str,
        f: impl FnOnce(&'a str) -> PResult<'a, T>,
    ) -> PResult<'a, T> {
        let key = input.len();
        if let Some(entry) = self.0.borrow().get(&key) {
            return match entry {
                CacheEntry::Success(rest_len, value) => {
                    let consumed = input.len() - rest_len;
                    Ok((&input[consumed..], value.clone()))
                }
                CacheEntry::Failure => Err(nom::Err::Error(VerboseError::from_error_kind(
                    input,
                    nom::error::ErrorKind::Fail,
                ))),
            };
        }
        match f(input) {
            Ok((rest, value)) => {
                self.0
                    .borrow_mut()
                    .insert(key, CacheEntry::Success(rest.len(), value.clone()));
                Ok((rest, value))
            }
            Err(e) => {
                self.0.borrow_mut().insert(key, CacheEntry::Failure);
                Err(e)
            }
        }
    }
}

/// Packrat cache for the mutually-recursive core of the grammar:
/// `Nest -> SimpleAlleleVarSet -> UAlleleVarSet -> CAlleleVarSet ->
/// ExtendedRawVar -> RawVar (Dup/Ins/Indel/Inv/Conv) -> Nest`.
///
/// Without memoization, inputs like deeply nested `(...(...)?...)?`
/// parenthesized allele sets can blow up exponentially under the longest-
/// match ordered choice above, since every ambiguous branch point re-tries
/// every alternative. One cache is created per top-level [`crate::parse`]
/// call and never shared across calls or threads.
pub struct PackratCache {
    simple_allele_var_set: Memo<crate::ast::SimpleAlleleVarSet>,
    extended_raw_var: Memo<crate::ast::ExtendedRawVar>,
}

impl PackratCache {
    pub fn new() -> Self {
        Self {
            simple_allele_var_set: Memo::new(),
            extended_raw_var: Memo::new(),
        }
    }

    pub fn simple_allele_var_set<'a>(
        &self,
        input: &'a str,
        f: impl FnOnce(&'a str) -> PResult<'a, crate::ast::SimpleAlleleVarSet>,
    ) -> PResult<'a, crate::ast::SimpleAlleleVarSet> {
        self.simple_allele_var_set.get_or_insert_with(input, f)
    }

    pub fn extended_raw_var<'a>(
        &self,
        input: &'a str,
        f: impl FnOnce(&'a str) -> PResult<'a, crate::ast::ExtendedRawVar>,
    ) -> PResult<'a, crate::ast::ExtendedRawVar> {
        self.extended_raw_var.get_or_insert_with(input, f)
    }
}

impl Default for PackratCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::bytes::complete::tag;
    use pretty_assertions::assert_eq;

    fn short(input: &str) -> PResult<'_, &str> {
        tag("a")(input)
    }

    fn long(input: &str) -> PResult<'_, &str> {
        tag("ab")(input)
    }

    #[test]
    fn longest_match_prefers_greater_consumption() {
        let parser = longest_alt!(short, long);
        assert_eq!(parser("abc").unwrap(), ("c", "ab"));
    }

    #[test]
    fn longest_match_breaks_ties_by_source_order() {
        fn a(input: &str) -> PResult<'_, &str> {
            tag("x")(input)
        }
        fn b(input: &str) -> PResult<'_, &str> {
            tag("x")(input)
        }
        let parser = longest_alt!(a, b);
        assert_eq!(parser("x").unwrap(), ("", "x"));
    }

    #[test]
    fn longest_match_fails_when_all_alternatives_fail() {
        let parser = longest_alt!(short, long);
        assert!(parser("z").is_err());
    }

    #[test]
    fn memo_reuses_cached_success() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let memo: Memo<&str> = Memo::new();
        let parse_a = |input: &str| {
            calls.set(calls.get() + 1);
            tag::<_, _, VerboseError<&str>>("a")(input)
        };
        assert_eq!(memo.get_or_insert_with("abc", parse_a).unwrap(), ("bc", "a"));
        assert_eq!(memo.get_or_insert_with("abc", parse_a).unwrap(), ("bc", "a"));
        assert_eq!(calls.get(), 1);
    }
}
