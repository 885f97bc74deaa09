//! # Term
//!
//! Canonical commutative monomial: a product of named symbols without numeric factor.
//! The symbols are kept sorted ascending, so `a*b` and `b*a` are the same Term and
//! equality/hashing work on the canonical form directly. The empty Term is the scalar unit "1".
//!
//! Terms are ordered by the monomial order used throughout the crate: higher degree first,
//! then the symbol sequence in descending lexicographic order. The first Term of a polynomial
//! under this order is its *leading term*.

use crate::symbolic::parse_poly::is_identifier;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Term {
    symbols: Vec<String>,
}

impl Term {
    /// the scalar unit (empty product)
    pub fn unit() -> Term {
        Term::default()
    }

    /// build a Term from symbol names, in any order
    pub fn from_symbols<I, S>(symbols: I) -> Term
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        symbols.sort();
        Term { symbols }
    }

    /// Parse whitespace- or `*`-separated identifiers, e.g. `"cos cos"` or `"a*b*a"`.
    /// Empty text gives the unit term.
    pub fn parse(text: &str) -> Result<Term> {
        let mut symbols = Vec::new();
        for chunk in text.split(|c: char| c.is_whitespace() || c == '*') {
            if chunk.is_empty() {
                continue;
            }
            if !is_identifier(chunk) {
                return Err(SymbolicError::InvalidTerm(text.to_string()));
            }
            symbols.push(chunk.to_string());
        }
        Ok(Term::from_symbols(symbols))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn degree(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_unit(&self) -> bool {
        self.symbols.is_empty()
    }

    /// how many times `symbol` occurs in the product
    pub fn count(&self, symbol: &str) -> usize {
        self.symbols.iter().filter(|s| s.as_str() == symbol).count()
    }

    pub fn multiply(&self, other: &Term) -> Term {
        if other.is_unit() {
            return self.clone();
        }
        let mut symbols = Vec::with_capacity(self.degree() + other.degree());
        symbols.extend_from_slice(&self.symbols);
        symbols.extend_from_slice(&other.symbols);
        symbols.sort();
        Term { symbols }
    }

    /// Multiset quotient `self / divisor`.
    /// None if some symbol of the divisor is missing (or occurs too rarely) in self.
    pub fn divide(&self, divisor: &Term) -> Option<Term> {
        let mut rest = self.symbols.clone();
        for s in &divisor.symbols {
            let pos = rest.iter().position(|x| x == s)?;
            rest.remove(pos);
        }
        Some(Term { symbols: rest })
    }

    /// the term with one more occurrence of `symbol`
    pub fn with_symbol(&self, symbol: &str) -> Term {
        self.multiply(&Term {
            symbols: vec![symbol.to_string()],
        })
    }

    /// the term with one occurrence of `symbol` removed
    pub fn without_symbol(&self, symbol: &str) -> Option<Term> {
        let pos = self.symbols.iter().position(|s| s == symbol)?;
        let mut symbols = self.symbols.clone();
        symbols.remove(pos);
        Some(Term { symbols })
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .degree()
            .cmp(&self.degree())
            .then_with(|| other.symbols.cmp(&self.symbols))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Term {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self> {
        Term::parse(s)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbols.join("*"))
    }
}
