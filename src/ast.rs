//! Data structures for representing parsed HGVS variant descriptions.
//!
//! Every node kind here corresponds to a grammar rule. Named fields mirror the
//! captures a downstream consumer (position converter, checker, describer)
//! relies on; renaming a field is a breaking change for those consumers even
//! though they live outside this crate.

/// Unsigned integer literal, kept as decimal text so callers can parse it
/// into whatever width they need.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(pub String);

impl Number {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single IUPAC nucleotide code. Case is preserved as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nt(pub char);

/// Non-empty run of `Nt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NtString(pub String);

/// Sign prefixing the main number of a `PtLoc`: `-` (before the CDS) or `*`
/// (after the stop codon).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainSign {
    Minus,
    Star,
}

/// Sign of an `Offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// Optional upstream/downstream qualifier inside an `Offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetDirection {
    Upstream,
    Downstream,
}

/// A `Number`, or the literal `?` standing in for "unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumOrUnknown {
    Number(Number),
    Unknown,
}

/// `(+|-) (u|d)? (Number|?)`, attached to a `PtLoc`'s main position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offset {
    pub sign: Sign,
    pub direction: Option<OffsetDirection>,
    pub value: NumOrUnknown,
}

/// Point location. Either the bare `?` (wholly unknown position) or a
/// structured position with optional main sign and offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtLoc {
    Unknown,
    Point {
        main_sign: Option<MainSign>,
        main: NumOrUnknown,
        offset: Option<Offset>,
    },
}

/// Either a `RefSeqAcc` or a `GeneSymbol`, wherever the grammar allows both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefOrGene {
    RefSeqAcc(RefSeqAcc),
    GeneSymbol(GeneSymbol),
}

/// The two shapes a `RefSeqAcc` can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefSeqAccForm {
    /// `GI`/`GI:`-prefixed (or bare) numeric GenInfo identifier. The prefix
    /// itself is not retained; it carries no information once recognized.
    Gi { number: Number },
    /// Letters/underscores followed by digits, e.g. `NM_002001`, with an
    /// optional `.Version` suffix.
    AccNo {
        accession: String,
        version: Option<Number>,
    },
}

/// A reference sequence accession, optionally annotated with a gene symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSeqAcc {
    pub form: RefSeqAccForm,
    pub gene_symbol: Option<GeneSymbol>,
}

/// `_vN` (transcript variant) or `_iN` (protein isoform) suffix of a gene
/// symbol; the two are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneSuffix {
    TransVar(Number),
    ProtIso(Number),
}

/// `(Name(_vN|_iN)?)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneSymbol {
    pub name: String,
    pub suffix: Option<GeneSuffix>,
}

/// Single-letter coordinate-system designation: coding, genomic,
/// mitochondrial, non-coding transcript, or RNA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefType {
    Coding,
    Genomic,
    Mitochondrial,
    NonCoding,
    Rna,
}

impl RefType {
    pub fn letter(self) -> char {
        match self {
            RefType::Coding => 'c',
            RefType::Genomic => 'g',
            RefType::Mitochondrial => 'm',
            RefType::NonCoding => 'n',
            RefType::Rna => 'r',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'c' => Some(RefType::Coding),
            'g' => Some(RefType::Genomic),
            'm' => Some(RefType::Mitochondrial),
            'n' => Some(RefType::NonCoding),
            'r' => Some(RefType::Rna),
            _ => None,
        }
    }
}

/// `((RefSeqAcc|GeneSymbol) ':')? RefType?` — the reference prefix that heads
/// most top-level variant forms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ref {
    pub reference: Option<RefOrGene>,
    pub ref_type: Option<RefType>,
}

/// Like `Ref`, but the reference is mandatory. Used where a bare position
/// would otherwise be ambiguous (`SingleVar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefOne {
    pub reference: RefSeqAcc,
    pub ref_type: Option<RefType>,
}

/// The end side of an `Extent`: an optional `o` (outside) flag, an optional
/// far reference with its own `RefType`, and the end `PtLoc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndLoc {
    pub outside: bool,
    pub far_ref: Option<RefOrGene>,
    pub ref_type: Option<RefType>,
    pub pt_loc: PtLoc,
}

/// A two-point range, `start '_' end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extent {
    pub start: PtLoc,
    pub end: EndLoc,
}

/// An `Extent`, possibly written with surrounding parentheses. The
/// parentheses carry no semantic meaning once parsed.
pub type RangeLoc = Extent;

/// Either a point or a range location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loc {
    Point(PtLoc),
    Range(RangeLoc),
}

/// A far (trans-reference) location: a reference, optionally followed by its
/// own `RefType` and `Extent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarLoc {
    pub reference: RefOrGene,
    pub remote: Option<(Option<RefType>, Extent)>,
}

/// `(p|q) Number '.' Number` — a cytogenetic chromosome band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromBand {
    pub arm: char,
    pub major: Number,
    pub minor: Number,
}

/// `t(Chrom;Chrom)(ChromBand;ChromBand)(FarLoc)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransLoc {
    pub chrom1: String,
    pub chrom2: String,
    pub band1: ChromBand,
    pub band2: ChromBand,
    pub far: FarLoc,
}

/// Canonical mutation-type discriminator every `RawVar` (other than
/// `VarSsr`/`TransLoc`, which classify themselves) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Subst,
    Del,
    Dup,
    Ins,
    DelIns,
    Inv,
    Con,
}

/// `NtString` or bare `Number`, used wherever the grammar allows either a
/// literal sequence or just its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqOrCount {
    Seq(NtString),
    Count(Number),
}

/// The argument of an `Ins`/`Indel`'s inserted material: a literal sequence,
/// a bare count, a range copied from elsewhere, or a far reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsArg {
    Seq(NtString),
    Count(Number),
    Range(RangeLoc),
    Far(FarLoc),
}

/// `Indel`'s location: either a range or (in the abbreviated form) a bare
/// point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndelLoc {
    Range(RangeLoc),
    Point(PtLoc),
}

/// The three shapes of a short sequence repeat variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarSsr {
    /// `PtLoc NtString '[' Number ']'`
    PointRepeat {
        loc: PtLoc,
        unit: NtString,
        count: Number,
    },
    /// `RangeLoc '[' Number ']'`
    RangeRepeat { loc: RangeLoc, count: Number },
    /// `PtLoc NtString '(' Number '_' Number ')'` — tried last; it is a
    /// strict prefix of the other two shapes under naive matching.
    Abbreviated {
        loc: PtLoc,
        unit: NtString,
        min: Number,
        max: Number,
    },
}

/// A single mutation event. Represented as a tagged union — one case per
/// kind — rather than via inheritance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawVar {
    Subst {
        loc: PtLoc,
        arg1: Nt,
        arg2: Nt,
    },
    Del {
        loc: Loc,
        arg1: Option<SeqOrCount>,
    },
    Dup {
        loc: Loc,
        arg1: Option<SeqOrCount>,
        nest: Option<Nest>,
    },
    VarSsr(VarSsr),
    Ins {
        loc: RangeLoc,
        arg1: InsArg,
        nest: Option<Nest>,
    },
    Indel {
        loc: IndelLoc,
        del_arg: Option<SeqOrCount>,
        ins_arg: InsArg,
        nest: Option<Nest>,
    },
    Inv {
        loc: RangeLoc,
        arg1: Option<SeqOrCount>,
        nest: Option<Nest>,
    },
    Conv {
        loc: RangeLoc,
        far: FarLoc,
        nest: Option<Nest>,
    },
    TransLoc(TransLoc),
}

impl RawVar {
    /// The canonical `MutationType`, per invariant 1. `VarSsr` and
    /// `TransLoc` are classified separately (testable property 7) and
    /// return `None` here.
    pub fn mutation_type(&self) -> Option<MutationType> {
        match self {
            RawVar::Subst { .. } => Some(MutationType::Subst),
            RawVar::Del { .. } => Some(MutationType::Del),
            RawVar::Dup { .. } => Some(MutationType::Dup),
            RawVar::Ins { .. } => Some(MutationType::Ins),
            RawVar::Indel { .. } => Some(MutationType::DelIns),
            RawVar::Inv { .. } => Some(MutationType::Inv),
            RawVar::Conv { .. } => Some(MutationType::Con),
            RawVar::VarSsr(_) | RawVar::TransLoc(_) => None,
        }
    }
}

/// `{ SimpleAlleleVarSet }`, embedded inside an `Ins`/`Dup`/`Inv`/`Conv`/
/// `Indel` to describe the involved material as itself a variant
/// expression. Recursive, but the resulting tree is acyclic: every `Nest`
/// introduces fresh nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nest(pub Box<SimpleAlleleVarSet>);

/// A `RawVar`, or one of the two special literals `=` (no change) and `?`
/// (unknown effect) that carry no location context of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedRawVar {
    RawVar(RawVar),
    Identity,
    Unknown,
}

/// `ExtendedRawVar (';' ExtendedRawVar)*` — one or more variants understood
/// to sit on the same allele.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CAlleleVarSet(pub Vec<ExtendedRawVar>);

/// A `CAlleleVarSet`, optionally parenthesized, optionally followed by a
/// trailing `?` marking the whole set as uncertain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UAlleleVarSet {
    pub set: CAlleleVarSet,
    pub uncertain: bool,
}

/// `'[' UAlleleVarSet ']'`, or a single `ExtendedRawVar` written without
/// brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleAlleleVarSet {
    Bracketed(UAlleleVarSet),
    Single(Box<ExtendedRawVar>),
}

/// `'[' SimpleAlleleVarSet ('/' SimpleAlleleVarSet)* ']'`, or a single
/// `SimpleAlleleVarSet` written without brackets. Denotes subpopulations of
/// cells bearing different variant combinations (mosaicism).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicSet(pub Vec<SimpleAlleleVarSet>);

/// `'[' MosaicSet ('//' MosaicSet)* ']'`, or a single `MosaicSet` written
/// without brackets. Denotes chimerism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChimeronSet(pub Vec<MosaicSet>);

/// Separator between successive `ChimeronSet`s inside a bracketed
/// `SingleAlleleVarSet`: `;` (distinct alleles) or `^` (alternative
/// interpretations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlleleSep {
    Semicolon,
    Caret,
}

/// `'[' ChimeronSet ((';'|'^') ChimeronSet)* ('(;)' ChimeronSet)* ']'`, or a
/// single `ChimeronSet` written without brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleAlleleVarSet {
    Bracketed {
        first: ChimeronSet,
        rest: Vec<(AlleleSep, ChimeronSet)>,
        unknown_phase: Vec<ChimeronSet>,
    },
    Bare(ChimeronSet),
}

/// `Ref RawVar`, or a bare `TransLoc` with no leading `Ref` (see `spec.md`
/// §9 open question 2 — preserved as written, flagged to callers via this
/// variant rather than silently requiring a `Ref`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleVar {
    WithRef { reference: RefOne, raw_var: RawVar },
    BareTransLoc(TransLoc),
}

/// `Ref SingleAlleleVarSet`, or `Ref SingleAlleleVarSet (';' Ref?
/// SingleAlleleVarSet)+` for multiple alleles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiVar {
    Single {
        reference: Ref,
        set: SingleAlleleVarSet,
    },
    Multi {
        reference: Ref,
        first: SingleAlleleVarSet,
        rest: Vec<(Option<Ref>, SingleAlleleVarSet)>,
    },
}

/// `Ref '[' ExtendedRawVar (';' ExtendedRawVar)* (',' ExtendedRawVar
/// (';' ExtendedRawVar)*)+ ']'` — per-transcript groups of variants,
/// comma-separated, each group semicolon-separated internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiTranscriptVar {
    pub reference: Ref,
    pub groups: Vec<Vec<ExtendedRawVar>>,
}

/// `(=)` or `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnkEffectForm {
    Parenthesized,
    QuestionMark,
}

/// `Ref ('(=)' | '?')`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnkEffectVar {
    pub reference: Ref,
    pub form: UnkEffectForm,
}

/// `Ref ('spl?' | '(spl?)')`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicingVar {
    pub reference: Ref,
    pub parenthesized: bool,
}

/// `Ref '0' '?'?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoRnaVar {
    pub reference: Ref,
    pub uncertain: bool,
}

/// The top-level parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Var {
    Single(SingleVar),
    Multi(MultiVar),
    MultiTranscript(MultiTranscriptVar),
    UnkEffect(UnkEffectVar),
    Splicing(SplicingVar),
    NoRna(NoRnaVar),
}
