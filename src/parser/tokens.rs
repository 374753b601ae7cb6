//! Character-class recognizers — the grammar's lexical layer.
//!
//! These produce text-bearing leaves (`Number`, `Nt`, `NtString`) or raw
//! `String`s; the rules in sibling modules attach them to named fields.

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{alphanumeric1, digit1, one_of},
    combinator::recognize,
    multi::many1,
    sequence::pair,
};
use nom_language::error::VerboseError;

use crate::ast::{Nt, NtString, Number};

use super::combinators::PResult;

/// IUPAC nucleotide alphabet, case-insensitive. Case of the matched
/// character is preserved in the returned node.
pub const IUPAC_NT: &str = "acgturykmswbdhvinACGTURYKMSWBDHVIN";

pub fn number(input: &str) -> PResult<'_, Number> {
    let (rest, digits) = digit1(input)?;
    Ok((rest, Number(digits.to_owned())))
}

/// `Number`, or the literal `?`.
pub fn number_or_unknown(input: &str) -> PResult<'_, crate::ast::NumOrUnknown> {
    use crate::ast::NumOrUnknown;
    if let Ok((rest, _)) = tag::<_, _, VerboseError<&str>>("?")(input) {
        return Ok((rest, NumOrUnknown::Unknown));
    }
    let (rest, n) = number(input)?;
    Ok((rest, NumOrUnknown::Number(n)))
}

/// `[a-zA-Z0-9]+`.
pub fn name(input: &str) -> PResult<'_, String> {
    let (rest, text) = alphanumeric1(input)?;
    Ok((rest, text.to_owned()))
}

pub fn nt(input: &str) -> PResult<'_, Nt> {
    let (rest, c) = one_of(IUPAC_NT)(input)?;
    Ok((rest, Nt(c)))
}

pub fn nt_string(input: &str) -> PResult<'_, NtString> {
    let (rest, text) = take_while1(|c: char| IUPAC_NT.contains(c))(input)?;
    Ok((rest, NtString(text.to_owned())))
}

/// `AccNo`'s accession part: letters/underscores followed by digits,
/// e.g. `NM_002001`, `NC_000001`, `LRG_1`.
pub fn accno_text(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        many1(one_of("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_")),
        digit1,
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_parses_digits() {
        assert_eq!(number("274G").unwrap(), ("G", Number("274".to_owned())));
    }

    #[test]
    fn nt_accepts_case_and_iupac_codes() {
        assert_eq!(nt("G>T").unwrap(), (">T", Nt('G')));
        assert_eq!(nt("n").unwrap(), ("", Nt('n')));
        assert!(nt("x").is_err());
    }

    #[test]
    fn nt_string_is_greedy() {
        assert_eq!(
            nt_string("ATGdel").unwrap(),
            ("del", NtString("ATG".to_owned()))
        );
    }

    #[test]
    fn accno_text_matches_underscored_accessions() {
        assert_eq!(accno_text("NM_002001.2").unwrap(), (".2", "NM_002001"));
    }
}
