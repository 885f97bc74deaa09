//! # Multivariate polynomial
//!
//! `MVPolynomial` is a finite map Term -> coefficient, i.e. a sum of scaled monomials.
//! Coefficients are f64; anything closer to zero than [`EPSILON`] is dropped at construction,
//! so a stored coefficient is never (numerically) zero and the zero polynomial is the empty map.
//!
//! Terms are stored in the monomial order of [`Term`] (degree descending, then lexicographic
//! descending), so iteration starts with the leading term. Every operation takes `&self` and
//! returns a new value.
//!
//! ## Division
//! [`MVPolynomial::divide`] is a greedy single leading-term reduction: it keeps dividing the
//! leading term of the remainder by the leading term of the divisor and stops at the first
//! leading term that is not divisible. This is exact for divisors whose leading term divides
//! every leading term met on the way (e.g. univariate division, or exact multiples), but it is
//! not a complete multivariate division algorithm: a nonzero remainder does not prove that the
//! divisor does not divide the dividend.
//!
//! # Example
//! ```
//! use RustedSymbolMath::symbolic::polynomial::MVPolynomial;
//! let a = MVPolynomial::parse("x x + 2x + 3").unwrap();
//! let b = MVPolynomial::parse("x + 2").unwrap();
//! let division = a.multiply(&b).divide(&b);
//! assert_eq!(division.quotient, a);
//! assert!(division.remainder.is_zero());
//! ```

use crate::symbolic::parse_poly::parse_polynomial;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use crate::symbolic::term::Term;
use approx::AbsDiffEq;
use itertools::iproduct;
use num_traits::{One, Zero};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// coefficients below this magnitude are treated as zero
pub const EPSILON: f64 = 1e-10;

pub fn is_zero_coefficient(k: f64) -> bool {
    k.abs() < EPSILON
}

#[derive(Clone, Debug, Default)]
pub struct MVPolynomial {
    terms: BTreeMap<Term, f64>,
    /// diagnostic annotation, e.g. which substitution produced this value
    note: Option<String>,
}

/// result of [`MVPolynomial::divide`]
#[derive(Clone, Debug, PartialEq)]
pub struct Division {
    pub quotient: MVPolynomial,
    pub remainder: MVPolynomial,
}

impl MVPolynomial {
    ////////////////////////////////CONSTRUCTORS//////////////////////////////////////
    pub fn zero() -> MVPolynomial {
        MVPolynomial::default()
    }

    pub fn constant(k: f64) -> MVPolynomial {
        MVPolynomial::from_term(Term::unit(), k)
    }

    pub fn from_term(term: Term, k: f64) -> MVPolynomial {
        let mut p = MVPolynomial::zero();
        p.accumulate(term, k);
        p
    }

    /// sum of (term, coefficient) pairs; repeated terms are added up
    pub fn from_terms<I>(terms: I) -> MVPolynomial
    where
        I: IntoIterator<Item = (Term, f64)>,
    {
        let mut p = MVPolynomial::zero();
        for (term, k) in terms {
            p.accumulate(term, k);
        }
        p
    }

    /// parse an expression like `"3 x x a + 2 x b - (a + 1)(a - 1)"`
    pub fn parse(text: &str) -> Result<MVPolynomial> {
        parse_polynomial(text)
    }

    // construction-time accumulation; keeps the no-zero-coefficient invariant
    pub(crate) fn accumulate(&mut self, term: Term, k: f64) {
        if is_zero_coefficient(k) {
            return;
        }
        let sum = self.terms.get(&term).copied().unwrap_or(0.0) + k;
        if is_zero_coefficient(sum) {
            self.terms.remove(&term);
        } else {
            self.terms.insert(term, sum);
        }
    }

    pub(crate) fn accumulate_scaled(&mut self, other: &MVPolynomial, k: f64) {
        for (term, &c) in &other.terms {
            self.accumulate(term.clone(), c * k);
        }
    }

    ////////////////////////////////ACCESSORS//////////////////////////////////////
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// number of stored monomials
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coefficient(&self, term: &Term) -> f64 {
        self.terms.get(term).copied().unwrap_or(0.0)
    }

    /// (term, coefficient) pairs, leading term first
    pub fn iter(&self) -> impl Iterator<Item = (&Term, f64)> {
        self.terms.iter().map(|(t, &k)| (t, k))
    }

    pub fn leading_term(&self) -> Option<(&Term, f64)> {
        self.terms.iter().next().map(|(t, &k)| (t, k))
    }

    /// sum of all coefficients; the numeric value when every symbol evaluates to 1,
    /// or simply the value of a constant polynomial
    pub fn scalar_sum(&self) -> f64 {
        self.terms.values().sum()
    }

    /// rough expression size: every monomial counts 1 plus its degree
    pub fn approx_size(&self) -> usize {
        self.terms.keys().map(|t| 1 + t.degree()).sum()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn with_note(&self, note: &str) -> MVPolynomial {
        MVPolynomial {
            terms: self.terms.clone(),
            note: Some(note.to_string()),
        }
    }

    /// equality against "no value": only the zero polynomial equals None
    pub fn eq_option(&self, other: Option<&MVPolynomial>) -> bool {
        match other {
            Some(other) => self == other,
            None => self.is_zero(),
        }
    }

    ////////////////////////////////ARITHMETIC//////////////////////////////////////
    pub fn add(&self, other: &MVPolynomial) -> MVPolynomial {
        self.add_scaled(other, 1.0)
    }

    pub fn subtract(&self, other: &MVPolynomial) -> MVPolynomial {
        self.add_scaled(other, -1.0)
    }

    /// self + k * other
    pub fn add_scaled(&self, other: &MVPolynomial, k: f64) -> MVPolynomial {
        let mut out = MVPolynomial {
            terms: self.terms.clone(),
            note: None,
        };
        out.accumulate_scaled(other, k);
        out
    }

    pub fn add_scalar(&self, k: f64) -> MVPolynomial {
        let mut out = MVPolynomial {
            terms: self.terms.clone(),
            note: None,
        };
        out.accumulate(Term::unit(), k);
        out
    }

    pub fn scale(&self, k: f64) -> MVPolynomial {
        self.multiply_term(&Term::unit(), k)
    }

    pub fn negate(&self) -> MVPolynomial {
        self.scale(-1.0)
    }

    /// self * k * term
    pub fn multiply_term(&self, term: &Term, k: f64) -> MVPolynomial {
        let mut out = MVPolynomial::zero();
        if is_zero_coefficient(k) {
            return out;
        }
        for (t, &c) in &self.terms {
            out.accumulate(t.multiply(term), c * k);
        }
        out
    }

    /// distributes over the Cartesian product of both operands' monomials
    pub fn multiply(&self, other: &MVPolynomial) -> MVPolynomial {
        let mut out = MVPolynomial::zero();
        for ((t1, &c1), (t2, &c2)) in iproduct!(self.terms.iter(), other.terms.iter()) {
            out.accumulate(t1.multiply(t2), c1 * c2);
        }
        out
    }

    /// Greedy leading-term division, see the module docs for the limits of this contract.
    /// A zero divisor leaves everything in the remainder.
    pub fn divide(&self, divisor: &MVPolynomial) -> Division {
        let mut quotient = MVPolynomial::zero();
        let mut remainder = MVPolynomial {
            terms: self.terms.clone(),
            note: None,
        };
        let Some((d_term, d_coeff)) = divisor.leading_term() else {
            return Division {
                quotient,
                remainder,
            };
        };
        let mut previous: Option<Term> = None;
        loop {
            let Some((r_term, r_coeff)) = remainder.leading_term().map(|(t, k)| (t.clone(), k))
            else {
                break;
            };
            // leading terms must strictly descend; this only trips on orders that are not multiplicative
            if previous.as_ref().is_some_and(|p| r_term <= *p) {
                log::debug!("division stopped: leading term {} did not descend", r_term);
                break;
            }
            let Some(q_term) = r_term.divide(d_term) else {
                break;
            };
            let q_coeff = r_coeff / d_coeff;
            quotient.accumulate(q_term.clone(), q_coeff);
            remainder = remainder.subtract(&divisor.multiply_term(&q_term, q_coeff));
            previous = Some(r_term);
        }
        Division {
            quotient,
            remainder,
        }
    }

    ////////////////////////////////SUBSTITUTION//////////////////////////////////////
    /// Replace every monomial divisible by `pattern` with `replacement * (monomial / pattern)`,
    /// keeping its coefficient. Returns None if no monomial matched.
    pub fn try_substitute(&self, pattern: &Term, replacement: &MVPolynomial) -> Option<MVPolynomial> {
        let mut out = MVPolynomial::zero();
        let mut matched = 0;
        for (term, &k) in &self.terms {
            match term.divide(pattern) {
                Some(rest) => {
                    matched += 1;
                    out.accumulate_scaled(&replacement.multiply_term(&rest, k), 1.0);
                }
                None => out.accumulate(term.clone(), k),
            }
        }
        if matched == 0 {
            return None;
        }
        out.note = Some(format!("Substituted: {} -> {}", pattern, replacement));
        Some(out)
    }

    /// like [`MVPolynomial::try_substitute`] but gives back an unchanged copy when nothing matched
    pub fn substitute(&self, pattern: &Term, replacement: &MVPolynomial) -> MVPolynomial {
        self.try_substitute(pattern, replacement)
            .unwrap_or_else(|| self.clone())
    }

    /// textual form of [`MVPolynomial::substitute`]: `p.substitute_str("cos cos", "1 - sin sin")`
    pub fn substitute_str(&self, pattern: &str, replacement: &str) -> Result<MVPolynomial> {
        let pattern = Term::parse(pattern)?;
        let replacement = MVPolynomial::parse(replacement)?;
        Ok(self.substitute(&pattern, &replacement))
    }
}

/// Σ a[i] * b[i]
pub fn dot_product(a: &[MVPolynomial], b: &[MVPolynomial]) -> Result<MVPolynomial> {
    if a.len() != b.len() {
        return Err(SymbolicError::InvalidDimension(format!(
            "different vector lengths {} and {}",
            a.len(),
            b.len()
        )));
    }
    let mut out = MVPolynomial::zero();
    for (x, y) in a.iter().zip(b) {
        out.accumulate_scaled(&x.multiply(y), 1.0);
    }
    Ok(out)
}

/// at most 3 decimals, trailing zeros trimmed
pub(crate) fn format_coefficient(k: f64) -> String {
    let s = format!("{:.3}", k);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

impl fmt::Display for MVPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (idx, (term, &k)) in self.terms.iter().enumerate() {
            let sign = match (idx == 0, k < 0.0) {
                (true, true) => "-",
                (true, false) => "",
                (false, true) => " - ",
                (false, false) => " + ",
            };
            let value = format_coefficient(k.abs());
            let value = if term.is_unit() || value != "1" {
                value
            } else {
                String::new()
            };
            write!(f, "{}{}{}", sign, value, term)?;
        }
        Ok(())
    }
}

impl FromStr for MVPolynomial {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self> {
        MVPolynomial::parse(s)
    }
}

impl AbsDiffEq for MVPolynomial {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        let keys: BTreeSet<&Term> = self.terms.keys().chain(other.terms.keys()).collect();
        keys.into_iter().all(|term| {
            f64::abs_diff_eq(&self.coefficient(term), &other.coefficient(term), epsilon)
        })
    }
}

impl PartialEq for MVPolynomial {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

////////////////////////////////OPERATORS//////////////////////////////////////
/// By-value `+`. Note: where `std::ops::Add` is imported, method-call syntax `a.add(&b)` on an
/// owned `a` picks this impl (and fails to type-check) before the inherent
/// [`MVPolynomial::add`]; write `&a + &b` or `MVPolynomial::add(&a, &b)` there.
impl Add for MVPolynomial {
    type Output = MVPolynomial;

    fn add(self, rhs: Self) -> Self::Output {
        MVPolynomial::add(&self, &rhs)
    }
}

impl<'a> Add<&'a MVPolynomial> for &'a MVPolynomial {
    type Output = MVPolynomial;

    fn add(self, rhs: &'a MVPolynomial) -> Self::Output {
        MVPolynomial::add(self, rhs)
    }
}

/// By-value `-`; the inherent method is named `subtract`, so it does not clash with `sub`.
impl Sub for MVPolynomial {
    type Output = MVPolynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(&rhs)
    }
}

impl<'a> Sub<&'a MVPolynomial> for &'a MVPolynomial {
    type Output = MVPolynomial;

    fn sub(self, rhs: &'a MVPolynomial) -> Self::Output {
        self.subtract(rhs)
    }
}

impl Mul for MVPolynomial {
    type Output = MVPolynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl<'a> Mul<&'a MVPolynomial> for &'a MVPolynomial {
    type Output = MVPolynomial;

    fn mul(self, rhs: &'a MVPolynomial) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<f64> for MVPolynomial {
    type Output = MVPolynomial;

    fn mul(self, k: f64) -> Self::Output {
        self.scale(k)
    }
}

impl Neg for MVPolynomial {
    type Output = MVPolynomial;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Zero for MVPolynomial {
    fn zero() -> Self {
        MVPolynomial::default()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for MVPolynomial {
    fn one() -> Self {
        MVPolynomial::constant(1.0)
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//  TESTS
//////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    // no glob import: `std::ops::Add` in scope turns `a.add(&b)` into the by-value operator
    use super::{MVPolynomial, SymbolicError, Term, dot_product, format_coefficient};
    use approx::{AbsDiffEq, assert_abs_diff_eq};
    use num_traits::{One, Zero};

    fn p(s: &str) -> MVPolynomial {
        MVPolynomial::parse(s).unwrap()
    }

    #[test]
    fn test_multiply_and_substitute() {
        let s1 = p("a b + 2 c");
        let s2 = p("1 - cos cos").substitute_str("cos cos", "1 - sin sin").unwrap();
        assert_eq!(s2, p("sin sin"));
        let s12 = s1.multiply(&s2);
        let expected = p("a*b*sin*sin + 2c*sin*sin");
        assert_eq!(s12, expected);
        assert!(expected.substitute_str("a b", "-2c").unwrap().is_zero());
    }

    #[test]
    fn test_add_subtract_scale() {
        let a = p("x x + 2x + 3");
        let b = p("x + 2");
        assert_eq!(a, a.subtract(&b).add(&b));
        assert_eq!(a.add(&a), a.scale(2.0));
        assert!(a.add(&a.scale(-1.0)).is_zero());
        assert_eq!(a.add_scalar(-3.0), p("x x + 2 x"));
        assert_eq!(-(b.clone()), p("-x - 2"));
        assert_eq!(&a + &b, p("x x + 3x + 5"));
        assert_eq!(a.clone() - b.clone(), p("x x + x + 1"));
    }

    #[test]
    fn test_add_with_operator_traits_in_scope() {
        use std::ops::{Add, Sub};
        let a = p("a + b");
        let b = p("a - b");
        assert_eq!(MVPolynomial::add(&a, &b), p("2a"));
        assert_eq!(&a + &b, p("2a"));
        // method syntax on owned values resolves to the operator traits here
        assert_eq!(a.clone().add(b.clone()), p("2a"));
        assert_eq!(a.clone().sub(b.clone()), p("2b"));
        assert_eq!(a.subtract(&b), p("2b"));
    }

    #[test]
    fn test_zero_coefficients_are_dropped() {
        let q = p("x - x + 1 + y");
        assert_eq!(q.len(), 2);
        let r = p("x + y").add(&p("-x"));
        assert_eq!(r.len(), 1);
        assert!(MVPolynomial::constant(1e-12).is_zero());
        assert!(p("a").multiply_term(&Term::unit(), 0.0).is_zero());
    }

    #[test]
    fn test_division() {
        let a = p("x x + 2x + 3");
        let b = p("x + 2");
        let ab = a.multiply(&b);
        let division = ab.divide(&b);
        assert_eq!(division.quotient, a);
        assert!(division.remainder.is_zero());
        // remainder when not divisible
        let division = p("x x + 1").divide(&p("x"));
        assert_eq!(division.quotient, p("x"));
        assert_eq!(division.remainder, p("1"));
        // zero divisor
        let division = a.divide(&MVPolynomial::zero());
        assert!(division.quotient.is_zero());
        assert_eq!(division.remainder, a);
    }

    #[test]
    fn test_division_is_greedy() {
        // x y + y: leading term x*y is reduced by y, then the remainder y is reduced too
        let d = p("x y + y").divide(&p("y"));
        assert_eq!(d.quotient, p("x + 1"));
        assert!(d.remainder.is_zero());
        // leading term z*z is not divisible by b: stops immediately, although b divides a later term
        let d = p("z z + a b").divide(&p("b"));
        assert!(d.quotient.is_zero());
        assert_eq!(d.remainder, p("z z + a b"));
    }

    #[test]
    fn test_substitute_no_match_keeps_value() {
        let q = p("x + y");
        assert!(q.try_substitute(&Term::parse("z").unwrap(), &p("1")).is_none());
        let same = q.substitute(&Term::parse("z").unwrap(), &p("1"));
        assert_eq!(same, q);
        assert!(same.note().is_none());
        let changed = q.substitute(&Term::parse("x").unwrap(), &p("2"));
        assert_eq!(changed, p("y + 2"));
        assert_eq!(changed.note(), Some("Substituted: x -> 2"));
    }

    #[test]
    fn test_substitute_keeps_quotient_monomial() {
        let q = p("3 a sin sin sin");
        let r = q.substitute_str("sin sin", "1 - cos cos").unwrap();
        assert_eq!(r, p("3 a sin - 3 a sin cos cos"));
    }

    #[test]
    fn test_rotation_polynomial_identity() {
        let rot = p("1 - cos").multiply(&p("L L")).add(&p("I + L sin"));
        let rot_t = p("1 - cos").multiply(&p(" L L")).add(&p("I - L sin"));
        let prod = rot_t.multiply(&rot);
        let prod = prod.substitute_str("L L L L", "- L L").unwrap();
        let prod = prod.substitute_str("sin sin", "1 - cos cos").unwrap();
        let prod = prod.substitute_str("I L", "L").unwrap();
        let prod = prod.substitute_str("I I", "I").unwrap();
        assert_eq!(prod, p("I"));
    }

    #[test]
    fn test_scalar_sum_and_size() {
        let q = p("2 a b - 0.5 c + 3");
        assert_abs_diff_eq!(q.scalar_sum(), 4.5, epsilon = 1e-12);
        assert_eq!(q.approx_size(), 3 + 2 + 1);
        assert_eq!(MVPolynomial::zero().approx_size(), 0);
    }

    #[test]
    fn test_leading_term_and_iteration_order() {
        let q = p("b + a a + 3 + a");
        let order: Vec<String> = q.iter().map(|(t, _)| t.to_string()).collect();
        assert_eq!(order, vec!["a*a", "b", "a", ""]);
        let (t, k) = q.leading_term().unwrap();
        assert_eq!(t.to_string(), "a*a");
        assert_abs_diff_eq!(k, 1.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(p("2 a b - c + 3").to_string(), "2a*b - c + 3");
        assert_eq!(p("-x x + 0.25 y").to_string(), "-x*x + 0.25y");
        assert_eq!(MVPolynomial::zero().to_string(), "0");
        assert_eq!(p("-1").to_string(), "-1");
        assert_eq!(format_coefficient(1.0 / 3.0), "0.333");
        assert_eq!(format_coefficient(2.5000), "2.5");
        let q = p("2 a b - 0.5 sin cos + 7");
        assert_eq!(p(&q.to_string()), q);
    }

    #[test]
    fn test_equality_epsilon_and_option() {
        let a = p("x + 1");
        let b = MVPolynomial::from_terms(vec![
            (Term::parse("x").unwrap(), 1.0 + 1e-12),
            (Term::unit(), 1.0),
        ]);
        assert_eq!(a, b);
        assert_ne!(a, p("x + 1.001"));
        assert!(MVPolynomial::zero().eq_option(None));
        assert!(!a.eq_option(None));
        assert!(a.eq_option(Some(&b)));
    }

    #[test]
    fn test_dot_product() {
        let a = vec![p("x"), p("y")];
        let b = vec![p("x"), p("-y")];
        assert_eq!(dot_product(&a, &b).unwrap(), p("x x - y y"));
        assert!(matches!(
            dot_product(&a, &b[..1]),
            Err(SymbolicError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_distributivity() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        let symbols = ["a", "b", "c"];
        let random = |rng: &mut StdRng| {
            let mut out = MVPolynomial::zero();
            for _ in 0..rng.random_range(1..5) {
                let degree: usize = rng.random_range(0..3);
                let mut product = Vec::with_capacity(degree);
                for _ in 0..degree {
                    product.push(symbols[rng.random_range(0..symbols.len())]);
                }
                let k: f64 = rng.random_range(-3.0..3.0);
                out.accumulate(Term::from_symbols(product), k);
            }
            out
        };
        for _ in 0..30 {
            let (x, y, z) = (random(&mut rng), random(&mut rng), random(&mut rng));
            let left = x.multiply(&y.add(&z));
            let right = x.multiply(&y).add(&x.multiply(&z));
            assert!(left.abs_diff_eq(&right, 1e-9));
        }
    }

    #[test]
    fn test_num_traits() {
        let one = <MVPolynomial as One>::one();
        let q = p("a + b");
        assert_eq!(q.multiply(&one), q);
        assert!(<MVPolynomial as Zero>::zero().is_zero());
    }
}
