//! Top-level grammar rules: `SingleVar`, `MultiVar`, `MultiTranscriptVar`,
//! `UnkEffectVar`, `SplicingVar`, `NoRnaVar`, and their union `Var`.

use nom::{
    bytes::complete::tag,
    combinator::{map, opt},
    multi::{many0, many1},
    sequence::{pair, preceded, tuple},
};

use crate::ast::{
    MultiTranscriptVar, MultiVar, NoRnaVar, SplicingVar, UnkEffectForm, UnkEffectVar, Var,
};

use super::combinators::{longest_alt, PResult, PackratCache};
use super::loc::{ref_one, reference};
use super::raw_var::{extended_raw_var, raw_var, trans_loc};
use super::allele_set::single_allele_var_set;

/// `RefOne RawVar ^ TransLoc` — a bare `TransLoc` with no leading reference
/// is legal here; `spec.md` §9 open question 2 calls this out explicitly as
/// preserved grammar behavior rather than a bug.
fn single_var<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, crate::ast::SingleVar> {
    longest_alt!(
        |i| {
            let (rest, (reference, raw_var_val)) =
                pair(ref_one, |i2| raw_var(cache, i2))(i)?;
            Ok((
                rest,
                crate::ast::SingleVar::WithRef {
                    reference,
                    raw_var: raw_var_val,
                },
            ))
        },
        map(trans_loc, crate::ast::SingleVar::BareTransLoc),
    )(input)
}

/// `Ref SingleAlleleVarSet` (`SingleAlleleVars`), or `Ref SingleAlleleVarSet
/// (';' Ref? SingleAlleleVarSet)+` (`MultiAlleleVars`).
fn multi_var<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, MultiVar> {
    let (rest, (ref_val, first)) =
        pair(reference, |i| single_allele_var_set(cache, i))(input)?;
    let (rest, more) = many0(|i| {
        let (r, (_, ref_opt, set)) = tuple((
            tag(";"),
            opt(reference),
            |i2| single_allele_var_set(cache, i2),
        ))(i)?;
        Ok((r, (ref_opt, set)))
    })(rest)?;
    if more.is_empty() {
        Ok((
            rest,
            MultiVar::Single {
                reference: ref_val,
                set: first,
            },
        ))
    } else {
        Ok((
            rest,
            MultiVar::Multi {
                reference: ref_val,
                first,
                rest: more,
            },
        ))
    }
}

/// `Ref '[' ExtendedRawVar (';' ExtendedRawVar)* (',' ExtendedRawVar
/// (';' ExtendedRawVar)*)+ ']'`.
fn multi_transcript_var<'a>(
    cache: &PackratCache,
    input: &'a str,
) -> PResult<'a, MultiTranscriptVar> {
    fn group<'b>(
        cache: &PackratCache,
        input: &'b str,
    ) -> PResult<'b, Vec<crate::ast::ExtendedRawVar>> {
        let (rest, first) = extended_raw_var(cache, input)?;
        let (rest, others) = many0(preceded(tag(";"), |i| extended_raw_var(cache, i)))(rest)?;
        let mut items = vec![first];
        items.extend(others);
        Ok((rest, items))
    }

    let (rest, reference) = reference(input)?;
    let (rest, _) = tag("[")(rest)?;
    let (rest, first_group) = group(cache, rest)?;
    let (rest, more_groups) = many1(preceded(tag(","), |i| group(cache, i)))(rest)?;
    let (rest, _) = tag("]")(rest)?;
    let mut groups = vec![first_group];
    groups.extend(more_groups);
    Ok((rest, MultiTranscriptVar { reference, groups }))
}

/// `Ref ('(=)' ^ '?')`.
fn unk_effect_var(input: &str) -> PResult<'_, UnkEffectVar> {
    let (rest, reference_val) = reference(input)?;
    let (rest, form) = longest_alt!(
        map(tag("(=)"), |_| UnkEffectForm::Parenthesized),
        map(tag("?"), |_| UnkEffectForm::QuestionMark),
    )(rest)?;
    Ok((
        rest,
        UnkEffectVar {
            reference: reference_val,
            form,
        },
    ))
}

/// `Ref ('spl?' ^ '(spl?)')`.
fn splicing_var(input: &str) -> PResult<'_, SplicingVar> {
    let (rest, reference_val) = reference(input)?;
    let (rest, parenthesized) = longest_alt!(
        map(tag("(spl?)"), |_| true),
        map(tag("spl?"), |_| false),
    )(rest)?;
    Ok((
        rest,
        SplicingVar {
            reference: reference_val,
            parenthesized,
        },
    ))
}

/// `Ref '0' '?'?`.
fn no_rna_var(input: &str) -> PResult<'_, NoRnaVar> {
    let (rest, (reference_val, _, q)) = tuple((reference, tag("0"), opt(tag("?"))))(input)?;
    Ok((
        rest,
        NoRnaVar {
            reference: reference_val,
            uncertain: q.is_some(),
        },
    ))
}

/// `SingleVar ^ MultiVar ^ MultiTranscriptVar ^ UnkEffectVar ^ NoRnaVar ^
/// SplicingVar`.
pub fn var<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, Var> {
    longest_alt!(
        map(|i| single_var(cache, i), Var::Single),
        map(|i| multi_var(cache, i), Var::Multi),
        map(|i| multi_transcript_var(cache, i), Var::MultiTranscript),
        map(unk_effect_var, Var::UnkEffect),
        map(no_rna_var, Var::NoRna),
        map(splicing_var, Var::Splicing),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_var_with_ref() {
        let cache = PackratCache::new();
        let (rest, parsed) = var(&cache, "AB026906.1:c.274G>T").unwrap();
        assert_eq!(rest, "");
        match parsed {
            Var::Single(crate::ast::SingleVar::WithRef { raw_var, .. }) => {
                assert_eq!(raw_var.mutation_type(), Some(crate::ast::MutationType::Subst));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn multi_var_single_set() {
        let cache = PackratCache::new();
        let (rest, parsed) = var(&cache, "NM_002001.2:c.[12del]").unwrap();
        assert_eq!(rest, "");
        assert!(matches!(parsed, Var::Multi(MultiVar::Single { .. })));
    }

    #[test]
    fn no_rna_var_parses() {
        let (rest, parsed) = no_rna_var("NM_002001.2:r.0").unwrap();
        assert_eq!(rest, "");
        assert!(!parsed.uncertain);
    }

    #[test]
    fn unk_effect_var_question_mark() {
        let (rest, parsed) = unk_effect_var("NM_002001.2:c.?").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.form, UnkEffectForm::QuestionMark);
    }
}
