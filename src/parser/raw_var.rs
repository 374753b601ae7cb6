//! Grammar rules for single mutation events: `RawVar` and its eight shapes,
//! `VarSsr`, `TransLoc`, `Nest`, and `ExtendedRawVar`.
//!
//! `Nest` and `ExtendedRawVar` sit on the mutually-recursive cycle described
//! in [`super::combinators::PackratCache`], so every function that can reach
//! a `Nest` takes the cache explicitly and threads it down to its callees.

use nom::{
    bytes::complete::tag,
    character::complete::{char as nom_char, one_of},
    combinator::{map, opt},
    sequence::tuple,
};

use crate::ast::{
    ChromBand, ExtendedRawVar, IndelLoc, InsArg, Nest, Number, RawVar, SeqOrCount, TransLoc,
    VarSsr,
};

use super::combinators::{longest_alt, PResult, PackratCache};
use super::loc::{far_loc, loc, pt_loc, range_loc};
use super::tokens::{name, nt, nt_string, number};

/// `NtString ^ Number` — a deleted/duplicated/inverted run described either
/// literally or by its length.
fn seq_or_count(input: &str) -> PResult<'_, SeqOrCount> {
    longest_alt!(
        map(nt_string, SeqOrCount::Seq),
        map(number, SeqOrCount::Count),
    )(input)
}

/// `NtString ^ Number ^ RangeLoc ^ FarLoc` — material inserted by `Ins`/`Indel`.
fn ins_arg(input: &str) -> PResult<'_, InsArg> {
    longest_alt!(
        map(nt_string, InsArg::Seq),
        map(number, InsArg::Count),
        map(range_loc, InsArg::Range),
        map(far_loc, InsArg::Far),
    )(input)
}

/// `PtLoc Nt '>' Nt`.
fn subst(input: &str) -> PResult<'_, RawVar> {
    let (rest, (loc, arg1, _, arg2)) = tuple((pt_loc, nt, nom_char('>'), nt))(input)?;
    Ok((rest, RawVar::Subst { loc, arg1, arg2 }))
}

/// `Loc 'del' SeqOrCount?`.
fn del(input: &str) -> PResult<'_, RawVar> {
    let (rest, (loc, _, arg1)) = tuple((loc, tag("del"), opt(seq_or_count)))(input)?;
    Ok((rest, RawVar::Del { loc, arg1 }))
}

/// `Loc 'dup' SeqOrCount? Nest?`.
fn dup<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    let (rest, (loc, _, arg1)) = tuple((loc, tag("dup"), opt(seq_or_count)))(input)?;
    let (rest, nest_val) = opt(|i| nest(cache, i))(rest)?;
    Ok((
        rest,
        RawVar::Dup {
            loc,
            arg1,
            nest: nest_val,
        },
    ))
}

/// `PtLoc NtString '(' Number '_' Number ')'` — the abbreviated short
/// sequence repeat form.
fn abbreviated_ssr(input: &str) -> PResult<'_, VarSsr> {
    let (rest, (loc, unit, _, min, _, max, _)) = tuple((
        pt_loc,
        nt_string,
        nom_char('('),
        number,
        nom_char('_'),
        number,
        nom_char(')'),
    ))(input)?;
    Ok((rest, VarSsr::Abbreviated { loc, unit, min, max }))
}

/// `PtLoc NtString '[' Number ']'`.
fn point_repeat(input: &str) -> PResult<'_, VarSsr> {
    let (rest, (loc, unit, _, count, _)) = tuple((
        pt_loc,
        nt_string,
        nom_char('['),
        number,
        nom_char(']'),
    ))(input)?;
    Ok((rest, VarSsr::PointRepeat { loc, unit, count }))
}

/// `RangeLoc '[' Number ']'`.
fn range_repeat(input: &str) -> PResult<'_, VarSsr> {
    let (rest, (loc, _, count, _)) =
        tuple((range_loc, nom_char('['), number, nom_char(']')))(input)?;
    Ok((rest, VarSsr::RangeRepeat { loc, count }))
}

/// `(PtLoc NtString '[' Number ']') ^ (RangeLoc '[' Number ']') ^ AbrSSR`.
fn var_ssr(input: &str) -> PResult<'_, RawVar> {
    map(
        longest_alt!(point_repeat, range_repeat, abbreviated_ssr),
        RawVar::VarSsr,
    )(input)
}

/// `RangeLoc 'ins' InsArg Nest?`.
fn ins<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    let (rest, (loc, _, arg1)) = tuple((range_loc, tag("ins"), ins_arg))(input)?;
    let (rest, nest_val) = opt(|i| nest(cache, i))(rest)?;
    Ok((
        rest,
        RawVar::Ins {
            loc,
            arg1,
            nest: nest_val,
        },
    ))
}

/// `(RangeLoc ^ PtLoc) 'del' SeqOrCount? 'ins' InsArg Nest?`.
fn indel<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    let (rest, loc_val) = longest_alt!(
        map(range_loc, IndelLoc::Range),
        map(pt_loc, IndelLoc::Point),
    )(input)?;
    let (rest, (_, del_arg, _, ins_arg_val)) =
        tuple((tag("del"), opt(seq_or_count), tag("ins"), ins_arg))(rest)?;
    let (rest, nest_val) = opt(|i| nest(cache, i))(rest)?;
    Ok((
        rest,
        RawVar::Indel {
            loc: loc_val,
            del_arg,
            ins_arg: ins_arg_val,
            nest: nest_val,
        },
    ))
}

/// `RangeLoc 'inv' SeqOrCount? Nest?`.
fn inv<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    let (rest, (loc, _, arg1)) = tuple((range_loc, tag("inv"), opt(seq_or_count)))(input)?;
    let (rest, nest_val) = opt(|i| nest(cache, i))(rest)?;
    Ok((
        rest,
        RawVar::Inv {
            loc,
            arg1,
            nest: nest_val,
        },
    ))
}

/// `RangeLoc 'con' FarLoc Nest?`.
fn conv<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    let (rest, (loc, _, far)) = tuple((range_loc, tag("con"), far_loc))(input)?;
    let (rest, nest_val) = opt(|i| nest(cache, i))(rest)?;
    Ok((
        rest,
        RawVar::Conv {
            loc,
            far,
            nest: nest_val,
        },
    ))
}

/// `(p|q) Number '.' Number`.
fn chrom_band(input: &str) -> PResult<'_, ChromBand> {
    let (rest, (arm, major, _, minor)) =
        tuple((one_of("pq"), number, nom_char('.'), number))(input)?;
    Ok((rest, ChromBand { arm, major, minor }))
}

/// Bare chromosome designation, e.g. `1`, `X`, `MT`.
fn chrom(input: &str) -> PResult<'_, String> {
    name(input)
}

/// `t '(' Chrom ';' Chrom ')' '(' ChromBand ';' ChromBand ')' '(' FarLoc ')'`.
pub fn trans_loc(input: &str) -> PResult<'_, TransLoc> {
    let (rest, (_, _, chrom1, _, chrom2, _, _, band1, _, band2, _, _, far, _)) = tuple((
        tag("t"),
        nom_char('('),
        chrom,
        nom_char(';'),
        chrom,
        nom_char(')'),
        nom_char('('),
        chrom_band,
        nom_char(';'),
        chrom_band,
        nom_char(')'),
        nom_char('('),
        far_loc,
        nom_char(')'),
    ))(input)?;
    Ok((
        rest,
        TransLoc {
            chrom1,
            chrom2,
            band1,
            band2,
            far,
        },
    ))
}

/// `Subst ^ Del ^ Dup ^ VarSsr ^ Ins ^ Indel ^ Inv ^ Conv` — the eight
/// "CRawVar" shapes, excluding `TransLoc`.
fn crawvar<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    longest_alt!(
        subst,
        del,
        |i| dup(cache, i),
        var_ssr,
        |i| ins(cache, i),
        |i| indel(cache, i),
        |i| inv(cache, i),
        |i| conv(cache, i),
    )(input)
}

/// `(CRawVar ^ '(' CRawVar ')') '?'?` — the parenthesization and trailing
/// `?` mark this one raw variant as uncertain, the same way parentheses
/// mark an uncertain `RangeLoc`; neither is retained on the node.
fn raw_var_core<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    let (rest, value) = longest_alt!(
        |i| crawvar(cache, i),
        |i| {
            let (r, (_, v, _)) = tuple((nom_char('('), |i2| crawvar(cache, i2), nom_char(')')))(i)?;
            Ok((r, v))
        },
    )(input)?;
    let (rest, _) = opt(tag("?"))(rest)?;
    Ok((rest, value))
}

/// `(CRawVar ^ '(' CRawVar ')') '?'? ^ TransLoc`.
pub fn raw_var<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, RawVar> {
    longest_alt!(
        |i| raw_var_core(cache, i),
        map(trans_loc, RawVar::TransLoc),
    )(input)
}

/// `'{' SimpleAlleleVarSet '}'`.
pub fn nest<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, Nest> {
    let (rest, _) = nom_char('{')(input)?;
    let (rest, set) = cache.simple_allele_var_set(rest, |i| {
        super::allele_set::simple_allele_var_set(cache, i)
    })?;
    let (rest, _) = nom_char('}')(rest)?;
    Ok((rest, Nest(Box::new(set))))
}

/// `RawVar ^ '=' ^ '?'`.
pub fn extended_raw_var<'a>(cache: &PackratCache, input: &'a str) -> PResult<'a, ExtendedRawVar> {
    cache.extended_raw_var(input, |i| {
        longest_alt!(
            map(|x| raw_var(cache, x), ExtendedRawVar::RawVar),
            map(tag("="), |_| ExtendedRawVar::Identity),
            map(tag("?"), |_| ExtendedRawVar::Unknown),
        )(i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Loc, Nt, PtLoc, SeqOrCount};
    use pretty_assertions::assert_eq;

    fn pt(n: &str) -> PtLoc {
        PtLoc::Point {
            main_sign: None,
            main: crate::ast::NumOrUnknown::Number(Number(n.to_owned())),
            offset: None,
        }
    }

    #[test]
    fn subst_parses_base_change() {
        assert_eq!(
            subst("274G>T").unwrap(),
            (
                "",
                RawVar::Subst {
                    loc: pt("274"),
                    arg1: Nt('G'),
                    arg2: Nt('T'),
                }
            )
        );
    }

    #[test]
    fn del_with_no_argument() {
        assert_eq!(
            del("12del").unwrap(),
            (
                "",
                RawVar::Del {
                    loc: Loc::Point(pt("12")),
                    arg1: None,
                }
            )
        );
    }

    #[test]
    fn del_with_sequence_argument() {
        assert_eq!(
            del("12delA").unwrap(),
            (
                "",
                RawVar::Del {
                    loc: Loc::Point(pt("12")),
                    arg1: Some(SeqOrCount::Seq(crate::ast::NtString("A".to_owned()))),
                }
            )
        );
    }

    #[test]
    fn raw_var_accepts_parenthesized_uncertain_form() {
        let cache = PackratCache::new();
        let (rest, parsed) = raw_var(&cache, "(12del)?").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            parsed,
            RawVar::Del {
                loc: Loc::Point(pt("12")),
                arg1: None,
            }
        );
    }

    #[test]
    fn dup_without_nest() {
        let cache = PackratCache::new();
        let (rest, parsed) = dup(&cache, "12dup").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            parsed,
            RawVar::Dup {
                loc: Loc::Point(pt("12")),
                arg1: None,
                nest: None,
            }
        );
    }

    #[test]
    fn extended_raw_var_unknown_effect() {
        let cache = PackratCache::new();
        let (rest, parsed) = extended_raw_var(&cache, "?x").unwrap();
        assert_eq!(rest, "x");
        assert_eq!(parsed, ExtendedRawVar::Unknown);
    }

    #[test]
    fn extended_raw_var_identity() {
        let cache = PackratCache::new();
        let (rest, parsed) = extended_raw_var(&cache, "=").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed, ExtendedRawVar::Identity);
    }

    #[test]
    fn nest_wraps_single_raw_var() {
        let cache = PackratCache::new();
        let (rest, parsed) = nest(&cache, "{12del}").unwrap();
        assert_eq!(rest, "");
        match *parsed.0 {
            crate::ast::SimpleAlleleVarSet::Single(_) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }
}
