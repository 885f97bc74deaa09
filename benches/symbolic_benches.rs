use RustedSymbolMath::symbolic::polynomial::MVPolynomial;
use RustedSymbolMath::symbolic::substitution::{SubstituteTerms, SubstitutionMode};
use RustedSymbolMath::symbolic::symbolic_context::SymbolicContext;
use RustedSymbolMath::symbolic::symbolic_matrix::Matrix;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn symbol_matrix(n: usize) -> Matrix {
    let cells: Vec<String> = (0..n * n).map(|pos| format!("a{} + b{}", pos, pos % n)).collect();
    let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
    Matrix::from_strs(n, n, &refs).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse nested products", |b| {
        b.iter(|| MVPolynomial::parse(black_box("1 + (a + cos)(a - cos) + (a+1)(a-1) - sin sin")))
    });
}

fn bench_determinant(c: &mut Criterion) {
    let ctx = SymbolicContext::new();
    let m = symbol_matrix(4);
    c.bench_function("symbolic determinant 4x4", |b| {
        b.iter(|| black_box(&m).determinant(&ctx))
    });
}

fn bench_rotation_product(c: &mut Criterion) {
    let rules = SubstituteTerms::new(SubstitutionMode::ApplyIfReducing)
        .with_rule("i i", "1 - j j - k k")
        .unwrap()
        .with_rule("j j", "1 - i i - k k")
        .unwrap()
        .with_rule("cos cos", "1 - sin sin")
        .unwrap();
    let ctx = SymbolicContext::new().with_rules(rules);
    let l = Matrix::init3x3("0", "-k", "j", "k", "0", "-i", "-j", "i", "0").unwrap();
    let ll = l.multiply(&l, &ctx).unwrap();
    let r = Matrix::identity(3)
        .add(&l.multiply_polynomial(&MVPolynomial::parse("sin").unwrap()))
        .unwrap()
        .add(&ll.multiply_polynomial(&MVPolynomial::parse("1 - cos").unwrap()))
        .unwrap();
    let rt = r.transpose();
    c.bench_function("rotation R*Rt with rules", |b| {
        b.iter(|| black_box(&r).multiply(black_box(&rt), &ctx))
    });
}

criterion_group!(benches, bench_parse, bench_determinant, bench_rotation_product);
criterion_main!(benches);
