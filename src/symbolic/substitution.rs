//! # Term substitution rules
//!
//! A rule `pattern -> replacement` rewrites every monomial divisible by the pattern, e.g. with
//! `sin sin -> 1 - cos cos` the monomial `3 a sin sin sin` becomes `3 a sin - 3 a sin cos cos`.
//! A rule set applies its rules one after another, in the order they were added.
//!
//! In [`SubstitutionMode::ApplyIfReducing`] a rule's result is kept only if its
//! [`MVPolynomial::approx_size`] does not exceed the size before that rule. Without this guard a
//! rule like `sin sin -> 1 - cos cos` keeps inflating expressions that merely contain `sin sin`
//! as a factor, instead of simplifying them.
//!
//! # Example
//! ```
//! use RustedSymbolMath::symbolic::polynomial::MVPolynomial;
//! use RustedSymbolMath::symbolic::substitution::{SubstituteTerms, SubstitutionMode};
//! let rules = SubstituteTerms::new(SubstitutionMode::ApplyIfReducing)
//!     .with_rule("cos cos", "1 - sin sin")
//!     .unwrap();
//! let poly = MVPolynomial::parse("2 a a - cos cos - sin sin").unwrap();
//! assert_eq!(rules.apply(&poly), MVPolynomial::parse("2 a a - 1").unwrap());
//! ```

use crate::symbolic::polynomial::MVPolynomial;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use crate::symbolic::symbolic_matrix::Matrix;
use crate::symbolic::term::Term;
use log::debug;
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_until},
    combinator::rest,
    sequence::separated_pair,
};
use std::fmt;

/// single rewrite rule
#[derive(Debug, Clone, PartialEq)]
pub struct SubstituteTerm {
    pub pattern: Term,
    pub replacement: MVPolynomial,
}

impl SubstituteTerm {
    pub fn new(pattern: Term, replacement: MVPolynomial) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    /// `SubstituteTerm::parse("i i", "1 - j j - k k")`
    pub fn parse(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Term::parse(pattern)?,
            replacement: MVPolynomial::parse(replacement)?,
        })
    }

    pub fn apply(&self, poly: &MVPolynomial) -> Option<MVPolynomial> {
        poly.try_substitute(&self.pattern, &self.replacement)
    }
}

impl fmt::Display for SubstituteTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'->'{}'", self.pattern, self.replacement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display, strum_macros::EnumIter)]
pub enum SubstitutionMode {
    /// every rule is applied unconditionally
    ApplyAll,
    /// a rule's result is kept only if the expression does not grow
    #[default]
    ApplyIfReducing,
}

/// ordered rule set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstituteTerms {
    pub rules: Vec<SubstituteTerm>,
    pub mode: SubstitutionMode,
}

impl SubstituteTerms {
    pub fn new(mode: SubstitutionMode) -> Self {
        Self {
            rules: Vec::new(),
            mode,
        }
    }

    /// builder: parse and append a rule
    pub fn with_rule(mut self, pattern: &str, replacement: &str) -> Result<Self> {
        self.rules.push(SubstituteTerm::parse(pattern, replacement)?);
        Ok(self)
    }

    pub fn push(&mut self, rule: SubstituteTerm) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules in order. None if no rule changed the polynomial.
    pub fn try_apply(&self, poly: &MVPolynomial) -> Option<MVPolynomial> {
        let mut current: Option<MVPolynomial> = None;
        for rule in &self.rules {
            let before = current.as_ref().unwrap_or(poly);
            let Some(candidate) = rule.apply(before) else {
                continue;
            };
            let accept = match self.mode {
                SubstitutionMode::ApplyAll => true,
                SubstitutionMode::ApplyIfReducing => {
                    candidate.approx_size() <= before.approx_size()
                }
            };
            if accept {
                current = Some(candidate);
            } else {
                debug!(
                    "rule {} rejected: size {} -> {}",
                    rule,
                    before.approx_size(),
                    candidate.approx_size()
                );
            }
        }
        current
    }

    pub fn apply(&self, poly: &MVPolynomial) -> MVPolynomial {
        self.try_apply(poly).unwrap_or_else(|| poly.clone())
    }

    /// cell by cell, see [`Matrix::substitute`]
    pub fn apply_matrix(&self, matrix: &Matrix) -> Matrix {
        matrix.substitute(self)
    }

    /// Read a rule document: one `pattern -> replacement` entry per line or per `;`,
    /// lines starting with `//` or `#` are comments.
    /// ```
    /// use RustedSymbolMath::symbolic::substitution::{SubstituteTerms, SubstitutionMode};
    /// let rules = SubstituteTerms::parse_rules(
    ///     "// unit axis\n i i -> 1 - j j - k k; j j -> 1 - i i - k k\n cos cos -> 1 - sin sin",
    ///     SubstitutionMode::ApplyIfReducing,
    /// ).unwrap();
    /// assert_eq!(rules.len(), 3);
    /// ```
    pub fn parse_rules(document: &str, mode: SubstitutionMode) -> Result<Self> {
        let mut rules = SubstituteTerms::new(mode);
        for entry in filter_comments(document)
            .split(['\n', ';'])
            .map(str::trim)
            .filter(|e| !e.is_empty())
        {
            let (_, (pattern, replacement)) = parse_rule(entry).map_err(|_| {
                SymbolicError::InvalidFormat(format!("expected 'pattern -> replacement', got '{}'", entry))
            })?;
            rules.push(SubstituteTerm::parse(pattern.trim(), replacement.trim())?);
        }
        Ok(rules)
    }
}

fn parse_rule(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_until("->"), tag("->"), rest).parse(input)
}

/// Filters out comment lines (starting with // or #)
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with('#') && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

impl fmt::Display for SubstituteTerms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rules: Vec<String> = self.rules.iter().map(|r| r.to_string()).collect();
        write!(f, "{} [{}]", self.mode, rules.join(", "))
    }
}
