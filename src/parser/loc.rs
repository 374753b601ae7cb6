//! Grammar rules for locations and references: `PtLoc`, `Extent`,
//! `RangeLoc`, `Loc`, `RefSeqAcc`, `GeneSymbol`, `RefType`, `Ref`, `RefOne`,
//! `FarLoc`.

use nom::{
    bytes::complete::tag,
    character::complete::{char as nom_char, one_of},
    combinator::{map, opt},
    sequence::{pair, preceded, tuple},
};

use crate::ast::{
    EndLoc, Extent, FarLoc, GeneSuffix, GeneSymbol, Loc, MainSign, Offset, OffsetDirection, PtLoc,
    Ref, RefOne, RefOrGene, RefSeqAcc, RefSeqAccForm, RefType, Sign,
};

use super::combinators::{longest_alt, PResult};
use super::tokens::{accno_text, name, number, number_or_unknown};

/// `_vN` (transcript variant) or `_iN` (protein isoform).
fn gene_suffix(input: &str) -> PResult<'_, GeneSuffix> {
    longest_alt!(
        map(preceded(tag("_v"), number), GeneSuffix::TransVar),
        map(preceded(tag("_i"), number), GeneSuffix::ProtIso),
    )(input)
}

/// `'(' Name (TransVar ^ ProtIso)? ')'`.
pub fn gene_symbol(input: &str) -> PResult<'_, GeneSymbol> {
    let (rest, (_, gene_name, suffix, _)) =
        tuple((nom_char('('), name, opt(gene_suffix), nom_char(')')))(input)?;
    Ok((
        rest,
        GeneSymbol {
            name: gene_name,
            suffix,
        },
    ))
}

/// `(Optional("GI") ^ Optional("GI:"))? Number` — the `GI`/`GI:` prefix is
/// suppressed, all three forms produce the same node.
fn gi(input: &str) -> PResult<'_, RefSeqAccForm> {
    let (rest, _) = longest_alt!(
        map(tag("GI:"), |_| ()),
        map(tag("GI"), |_| ()),
        map(nom::combinator::success(()), |_| ()),
    )(input)?;
    let (rest, num) = number(rest)?;
    Ok((rest, RefSeqAccForm::Gi { number: num }))
}

/// `(letters/underscores)(digits) ('.' Number)?`.
fn accno(input: &str) -> PResult<'_, RefSeqAccForm> {
    let (rest, accession) = accno_text(input)?;
    let (rest, version) = opt(preceded(nom_char('.'), number))(rest)?;
    Ok((
        rest,
        RefSeqAccForm::AccNo {
            accession: accession.to_owned(),
            version,
        },
    ))
}

pub fn ref_seq_acc(input: &str) -> PResult<'_, RefSeqAcc> {
    let (rest, form) = longest_alt!(gi, accno)(input)?;
    let (rest, gene_symbol) = opt(gene_symbol)(rest)?;
    Ok((rest, RefSeqAcc { form, gene_symbol }))
}

/// `RefSeqAcc ^ GeneSymbol`, wrapped in the shared `RefOrGene` union.
pub fn ref_or_gene(input: &str) -> PResult<'_, RefOrGene> {
    longest_alt!(
        map(ref_seq_acc, RefOrGene::RefSeqAcc),
        map(gene_symbol, RefOrGene::GeneSymbol),
    )(input)
}

/// `(c|g|m|n|r) '.'`.
pub fn ref_type(input: &str) -> PResult<'_, RefType> {
    let (rest, (letter, _)) = pair(one_of("cgmnr"), nom_char('.'))(input)?;
    Ok((rest, RefType::from_letter(letter).expect("one_of cgmnr")))
}

/// `(+|-) (u|d)? (Number ^ '?')`.
fn offset(input: &str) -> PResult<'_, Offset> {
    let (rest, sign_ch) = one_of("+-")(input)?;
    let sign = if sign_ch == '+' { Sign::Plus } else { Sign::Minus };
    let (rest, direction_ch) = opt(one_of("ud"))(rest)?;
    let direction = direction_ch.map(|c| {
        if c == 'u' {
            OffsetDirection::Upstream
        } else {
            OffsetDirection::Downstream
        }
    });
    let (rest, value) = number_or_unknown(rest)?;
    Ok((
        rest,
        Offset {
            sign,
            direction,
            value,
        },
    ))
}

/// `((-|*)? Number Offset?) ^ '?'`.
pub fn pt_loc(input: &str) -> PResult<'_, PtLoc> {
    longest_alt!(
        map(tag("?"), |_| PtLoc::Unknown),
        map(
            tuple((opt(one_of("-*")), number_or_unknown, opt(offset))),
            |(sign_ch, main, offset)| PtLoc::Point {
                main_sign: sign_ch.map(|c| if c == '-' { MainSign::Minus } else { MainSign::Star }),
                main,
                offset,
            }
        ),
    )(input)
}

/// `Optional('o') (RefSeqAcc ^ GeneSymbol) ':' RefType?`, feeding `EndLoc`.
fn opt_ref(input: &str) -> PResult<'_, (bool, RefOrGene, Option<RefType>)> {
    let (rest, outside) = opt(nom_char('o'))(input)?;
    let (rest, far_ref) = ref_or_gene(rest)?;
    let (rest, _) = nom_char(':')(rest)?;
    let (rest, rt) = opt(ref_type)(rest)?;
    Ok((rest, (outside.is_some(), far_ref, rt)))
}

/// `PtLoc '_' (OptRef)? PtLoc`.
pub fn extent(input: &str) -> PResult<'_, Extent> {
    let (rest, start) = pt_loc(input)?;
    let (rest, _) = nom_char('_')(rest)?;
    let (rest, opt_ref_val) = opt(opt_ref)(rest)?;
    let (rest, end_pt) = pt_loc(rest)?;
    let (outside, far_ref, ref_type) = match opt_ref_val {
        Some((o, r, rt)) => (o, Some(r), rt),
        None => (false, None, None),
    };
    Ok((
        rest,
        Extent {
            start,
            end: EndLoc {
                outside,
                far_ref,
                ref_type,
                pt_loc: end_pt,
            },
        },
    ))
}

/// `Extent ^ '(' Extent ')'` — parentheses are not retained.
pub fn range_loc(input: &str) -> PResult<'_, Extent> {
    longest_alt!(
        extent,
        map(
            tuple((nom_char('('), extent, nom_char(')'))),
            |(_, e, _)| e
        ),
    )(input)
}

/// `PtLoc ^ RangeLoc`.
pub fn loc(input: &str) -> PResult<'_, Loc> {
    longest_alt!(
        map(pt_loc, Loc::Point),
        map(range_loc, Loc::Range),
    )(input)
}

/// `((RefSeqAcc ^ GeneSymbol) ':')? RefType?`.
pub fn reference(input: &str) -> PResult<'_, Ref> {
    let (rest, reference) = opt(|i| {
        let (r, (reference, _)) = pair(ref_or_gene, nom_char(':'))(i)?;
        Ok((r, reference))
    })(input)?;
    let (rest, ref_type_val) = opt(ref_type)(rest)?;
    Ok((
        rest,
        Ref {
            reference,
            ref_type: ref_type_val,
        },
    ))
}

/// `RefSeqAcc ':' RefType?` — reference is mandatory.
pub fn ref_one(input: &str) -> PResult<'_, RefOne> {
    let (rest, (reference, _, ref_type_val)) =
        tuple((ref_seq_acc, nom_char(':'), opt(ref_type)))(input)?;
    Ok((
        rest,
        RefOne {
            reference,
            ref_type: ref_type_val,
        },
    ))
}

/// `(RefSeqAcc ^ GeneSymbol) (':' RefType? Extent)?`.
pub fn far_loc(input: &str) -> PResult<'_, FarLoc> {
    let (rest, reference) = ref_or_gene(input)?;
    let (rest, remote) = opt(|i| {
        let (r, (_, rt, ext)) = tuple((nom_char(':'), opt(ref_type), extent))(i)?;
        Ok((r, (rt, ext)))
    })(rest)?;
    Ok((rest, FarLoc { reference, remote }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NumOrUnknown, RefSeqAccForm};
    use pretty_assertions::assert_eq;

    #[test]
    fn pt_loc_plain_number() {
        assert_eq!(
            pt_loc("274G").unwrap(),
            (
                "G",
                PtLoc::Point {
                    main_sign: None,
                    main: NumOrUnknown::Number(crate::ast::Number("274".to_owned())),
                    offset: None,
                }
            )
        );
    }

    #[test]
    fn pt_loc_bare_unknown() {
        assert_eq!(pt_loc("?del").unwrap(), ("del", PtLoc::Unknown));
    }

    #[test]
    fn pt_loc_with_offset_and_direction() {
        let (rest, parsed) = pt_loc("123+45").unwrap();
        assert_eq!(rest, "");
        match parsed {
            PtLoc::Point { offset: Some(o), .. } => {
                assert_eq!(o.sign, Sign::Plus);
                assert_eq!(o.direction, None);
                assert_eq!(o.value, NumOrUnknown::Number(crate::ast::Number("45".to_owned())));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn ref_seq_acc_accno_with_version() {
        let (rest, parsed) = ref_seq_acc("AB026906.1:c.").unwrap();
        assert_eq!(rest, ":c.");
        assert_eq!(
            parsed.form,
            RefSeqAccForm::AccNo {
                accession: "AB026906".to_owned(),
                version: Some(crate::ast::Number("1".to_owned())),
            }
        );
    }

    #[test]
    fn ref_seq_acc_gi_bare() {
        let (rest, parsed) = ref_seq_acc("12345:").unwrap();
        assert_eq!(rest, ":");
        assert_eq!(
            parsed.form,
            RefSeqAccForm::Gi {
                number: crate::ast::Number("12345".to_owned())
            }
        );
    }

    #[test]
    fn ref_seq_acc_gi_prefixed() {
        let (rest, parsed) = ref_seq_acc("GI:12345:").unwrap();
        assert_eq!(rest, ":");
        assert_eq!(
            parsed.form,
            RefSeqAccForm::Gi {
                number: crate::ast::Number("12345".to_owned())
            }
        );
    }

    #[test]
    fn extent_parses_start_and_end() {
        let (rest, parsed) = extent("42_100").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            parsed.start,
            PtLoc::Point {
                main_sign: None,
                main: NumOrUnknown::Number(crate::ast::Number("42".to_owned())),
                offset: None
            }
        );
        assert_eq!(
            parsed.end.pt_loc,
            PtLoc::Point {
                main_sign: None,
                main: NumOrUnknown::Number(crate::ast::Number("100".to_owned())),
                offset: None
            }
        );
    }

    #[test]
    fn range_loc_strips_parens() {
        let (rest, parsed) = range_loc("(42_100)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(parsed.start, extent("42_100").unwrap().1.start);
    }
}
