//! symbolic partial derivative and antiderivative of multivariate polynomials
use crate::symbolic::polynomial::MVPolynomial;

impl MVPolynomial {
    /// Partial derivative with respect to `symbol`: x^n -> n*x^(n-1) for every monomial,
    /// monomials without the symbol vanish.
    /// # Example
    /// ```
    /// use RustedSymbolMath::symbolic::polynomial::MVPolynomial;
    /// let poly = MVPolynomial::parse("3 x x a + 2 x b + 9 c").unwrap();
    /// assert_eq!(poly.derive("x"), MVPolynomial::parse("6 a x + 2 b").unwrap());
    /// ```
    pub fn derive(&self, symbol: &str) -> MVPolynomial {
        let mut out = MVPolynomial::zero();
        for (term, k) in self.iter() {
            let n = term.count(symbol);
            if let Some(lowered) = term.without_symbol(symbol) {
                out.accumulate(lowered, k * n as f64);
            }
        }
        out
    }

    /// Antiderivative with respect to `symbol` (integration constant 0):
    /// x^n -> x^(n+1)/(n+1) for every monomial.
    pub fn integrate(&self, symbol: &str) -> MVPolynomial {
        let mut out = MVPolynomial::zero();
        for (term, k) in self.iter() {
            let raised = term.with_symbol(symbol);
            let n = raised.count(symbol);
            out.accumulate(raised, k / n as f64);
        }
        out
    }
}
