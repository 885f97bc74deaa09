#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// errors shared by the whole symbolic module
pub mod symbolic_errors;
/// canonical monomial: a commutative product of named symbols
pub mod term;
///____________________________________________________________________________________________________________________________
/// # Multivariate polynomials
/// a module
/// 1) turns a String expression into a polynomial
/// 2) adds, multiplies and divides polynomials
/// 3) differentiates and integrates polynomials with respect to a symbol
///# Example#
/// ```
/// use RustedSymbolMath::symbolic::polynomial::MVPolynomial;
/// let p = MVPolynomial::parse("(x + 1)(x - 1)").unwrap();
/// println!("p = {}", p);
/// assert_eq!(p, MVPolynomial::parse("x x - 1").unwrap());
/// // differentiate with respect to x
/// let dp_dx = p.derive("x");
/// assert_eq!(dp_dx, MVPolynomial::parse("2x").unwrap());
/// // and integrate back
/// assert_eq!(dp_dx.integrate("x"), MVPolynomial::parse("x x").unwrap());
/// // greedy division
/// let division = p.divide(&MVPolynomial::parse("x + 1").unwrap());
/// assert_eq!(division.quotient, MVPolynomial::parse("x - 1").unwrap());
/// assert!(division.remainder.is_zero());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod polynomial;
pub mod polynomial_calculus;
/// a module turns a String expression into a multivariate polynomial
pub mod parse_poly;
/// rewrite rules `pattern -> replacement` used to simplify polynomials and matrices
pub mod substitution;
/// default rules and operation trace passed to matrix computations
pub mod symbolic_context;
///________________________________________________________________________________________________________________________________________________
///
/// matrix of polynomials: algebra, determinant, text form
/// Example#
/// ```
/// use RustedSymbolMath::symbolic::symbolic_matrix::Matrix;
/// use RustedSymbolMath::symbolic::symbolic_context::SymbolicContext;
/// use RustedSymbolMath::symbolic::substitution::{SubstituteTerms, SubstitutionMode};
/// let rules = SubstituteTerms::new(SubstitutionMode::ApplyIfReducing)
///     .with_rule("sin sin", "1 - cos cos")
///     .unwrap();
/// let ctx = SymbolicContext::new().with_rules(rules);
/// // rotation about z
/// let r = Matrix::init3x3("cos", "-sin", "0", "sin", "cos", "0", "0", "0", "1").unwrap();
/// let rrt = r.multiply(&r.transpose(), &ctx).unwrap();
/// assert_eq!(rrt, Matrix::identity(3));
/// assert_eq!(r.determinant(&ctx).unwrap().scalar_sum(), 1.0);
/// println!("{}", r);
/// println!("{}", r.pretty());
/// ```
pub mod symbolic_matrix;
pub mod matrix_determinant;
pub mod matrix_text;
