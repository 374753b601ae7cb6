//! Grammar rules for allele-set composition: `CAlleleVarSet`, `UAlleleVarSet`,
//! `SimpleAlleleVarSet`, `MosaicSet`, `ChimeronSet`, `SingleAlleleVarSet`.
//!
//! These sit on the packrat-memoized cycle together with [`super::raw_var`];
//! every function here takes the shared [`super::combinators::PackratCache`]
//! and threads it down.

use nom::{
    bytes::complete::tag,
    combinator::{map, opt},
    multi::many0,
    sequence::preceded,
};

use crate::ast::{
    AlleleSep, CAlleleVarSet, ChimeronSet, MosaicSet, SimpleAlleleVarSet, SingleAlleleVarSet,
    UAlleleVarSet,
};

use super::combinators::{longest_alt, PResult, PackratCache};
use super::raw_var::extended_raw_var;

/// `ExtendedRawVar (';' ExtendedRawVar)*`.
fn c_allele_var_set<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, CAlleleVarSet> {
    let (rest, first) = extended_raw_var(cache, input)?;
    let (rest, others) = many0(preceded(tag(";"), |i| extended_raw_var(cache, i)))(rest)?;
    let mut items = vec![first];
    items.extend(others);
    Ok((rest, CAlleleVarSet(items)))
}

/// `(CAlleleVarSet ^ '(' CAlleleVarSet ')') '?'?` — as with `RangeLoc`, the
/// parentheses mark uncertainty and are not retained on the node.
fn u_allele_var_set<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, UAlleleVarSet> {
    let (rest, set) = longest_alt!(
        |i| c_allele_var_set(cache, i),
        |i| {
            let (r, (_, set, _)) =
                nom::sequence::tuple((tag("("), |i2| c_allele_var_set(cache, i2), tag(")")))(i)?;
            Ok((r, set))
        },
    )(input)?;
    let (rest, q) = opt(tag("?"))(rest)?;
    Ok((
        rest,
        UAlleleVarSet {
            set,
            uncertain: q.is_some(),
        },
    ))
}

/// `'[' UAlleleVarSet ']' ^ ExtendedRawVar`.
pub fn simple_allele_var_set<'a>(
    cache: &PackratCache,
    input: &'a str,
) -> PResult<'a, SimpleAlleleVarSet> {
    longest_alt!(
        |i| {
            let (rest, (_, set, _)) = nom::sequence::tuple((
                tag("["),
                |i| u_allele_var_set(cache, i),
                tag("]"),
            ))(i)?;
            Ok((rest, SimpleAlleleVarSet::Bracketed(set)))
        },
        |i| map(|i2| extended_raw_var(cache, i2), |v| SimpleAlleleVarSet::Single(Box::new(v)))(i),
    )(input)
}

/// `'[' SimpleAlleleVarSet ('/' SimpleAlleleVarSet)* ']' ^ SimpleAlleleVarSet`.
fn mosaic_set<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, MosaicSet> {
    longest_alt!(
        |i| {
            let (rest, (_, first, others, _)) = nom::sequence::tuple((
                tag("["),
                |i| simple_allele_var_set(cache, i),
                many0(preceded(tag("/"), |i| simple_allele_var_set(cache, i))),
                tag("]"),
            ))(i)?;
            let mut items = vec![first];
            items.extend(others);
            Ok((rest, MosaicSet(items)))
        },
        |i| map(|i2| simple_allele_var_set(cache, i2), |v| MosaicSet(vec![v]))(i),
    )(input)
}

/// `'[' MosaicSet ('//' MosaicSet)* ']' ^ MosaicSet`.
fn chimeron_set<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, ChimeronSet> {
    longest_alt!(
        |i| {
            let (rest, (_, first, others, _)) = nom::sequence::tuple((
                tag("["),
                |i| mosaic_set(cache, i),
                many0(preceded(tag("//"), |i| mosaic_set(cache, i))),
                tag("]"),
            ))(i)?;
            let mut items = vec![first];
            items.extend(others);
            Ok((rest, ChimeronSet(items)))
        },
        |i| map(|i2| mosaic_set(cache, i2), |v| ChimeronSet(vec![v]))(i),
    )(input)
}

fn allele_sep(input: &str) -> PResult<'_, AlleleSep> {
    longest_alt!(
        map(tag(";"), |_| AlleleSep::Semicolon),
        map(tag("^"), |_| AlleleSep::Caret),
    )(input)
}

/// `'[' ChimeronSet ((';'|'^') ChimeronSet)* ('(;)' ChimeronSet)* ']' ^
/// ChimeronSet`.
pub fn single_allele_var_set<'a>(
    cache: &PackratCache,
    input: &'a str,
) -> PResult<'a, SingleAlleleVarSet> {
    longest_alt!(
        |i| {
            let (rest, (_, first, rest_pairs, unknown_phase, _)) = nom::sequence::tuple((
                tag("["),
                |i| chimeron_set(cache, i),
                many0(|i| {
                    let (r, (sep, set)) =
                        nom::sequence::pair(allele_sep, |i2| chimeron_set(cache, i2))(i)?;
                    Ok((r, (sep, set)))
                }),
                many0(preceded(tag("(;)"), |i| chimeron_set(cache, i))),
                tag("]"),
            ))(i)?;
            Ok((
                rest,
                SingleAlleleVarSet::Bracketed {
                    first,
                    rest: rest_pairs,
                    unknown_phase,
                },
            ))
        },
        |i| map(|i2| chimeron_set(cache, i2), SingleAlleleVarSet::Bare)(i),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExtendedRawVar;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_allele_var_set_bare_single() {
        let cache = PackratCache::new();
        let (rest, parsed) = simple_allele_var_set(&cache, "12del").unwrap();
        assert_eq!(rest, "");
        match parsed {
            SimpleAlleleVarSet::Single(_) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn simple_allele_var_set_bracketed() {
        let cache = PackratCache::new();
        let (rest, parsed) = simple_allele_var_set(&cache, "[12del]").unwrap();
        assert_eq!(rest, "");
        match parsed {
            SimpleAlleleVarSet::Bracketed(set) => {
                assert_eq!(set.set.0.len(), 1);
                assert!(!set.uncertain);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn c_allele_var_set_multiple_entries() {
        let cache = PackratCache::new();
        let (rest, parsed) = c_allele_var_set(&cache, "12del;34dup").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.0.len(), 2);
    }

    #[test]
    fn nested_bracketed_allele_set_with_uncertainty() {
        let cache = PackratCache::new();
        let (rest, parsed) = simple_allele_var_set(&cache, "[(12del);(12del)]").unwrap();
        assert_eq!(rest, "");
        match parsed {
            SimpleAlleleVarSet::Bracketed(set) => {
                assert_eq!(set.set.0.len(), 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn single_allele_var_set_bare_wraps_single_chimeron() {
        let cache = PackratCache::new();
        let (rest, parsed) = single_allele_var_set(&cache, "12del").unwrap();
        assert_eq!(rest, "");
        match parsed {
            SingleAlleleVarSet::Bare(set) => assert_eq!(set.0.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn extended_raw_var_reexport_reachable() {
        let cache = PackratCache::new();
        let (_, v) = extended_raw_var(&cache, "=").unwrap();
        assert_eq!(v, ExtendedRawVar::Identity);
    }
}
