use criterion::{criterion_group, criterion_main, Criterion};
use hgvs_nomenclature::parse;

/// A chain of `Dup`s nested through their trailing `Nest` (`'{' … '}'`),
/// each level re-entering the packrat-memoized cycle described in
/// [`hgvs_nomenclature`]'s combinator module (`Nest -> SimpleAlleleVarSet ->
/// UAlleleVarSet -> CAlleleVarSet -> ExtendedRawVar -> RawVar -> Nest`). At
/// every level `crawvar`'s eight-way ordered choice is retried in full
/// (`subst`/`del`/`var_ssr`/`ins`/`indel`/`inv`/`conv` all fail before `dup`
/// matches), so the per-level parse cost stays constant only because the
/// cache remembers each nested `SimpleAlleleVarSet` by its remaining-length
/// key (`spec.md` §4.C/§5).
fn nested_allele_set(depth: usize) -> String {
    let mut inner = "12del".to_owned();
    for _ in 0..depth {
        inner = format!("12dup{{{inner}}}");
    }
    format!("NM_002001.2:c.{inner}")
}

fn criterion_benchmark(c: &mut Criterion) {
    let shallow = nested_allele_set(4);
    let deep = nested_allele_set(9);

    c.bench_function("parse shallow nested allele set", |b| {
        b.iter(|| parse(&shallow).unwrap())
    });
    c.bench_function("parse deeply nested allele set", |b| {
        b.iter(|| parse(&deep).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
