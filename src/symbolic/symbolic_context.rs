//! Explicit computation context for matrix algebra.
//!
//! Matrix multiplication and determinant consult a default rule set to keep intermediate
//! expressions compact. The rule set is not global: it travels with a `SymbolicContext` that the
//! caller passes in, so the result of a computation depends on its arguments only.
//! The context also carries the optional operation trace used for diagnostics.
use crate::Utils::op_trace::OpTrace;
use crate::symbolic::polynomial::MVPolynomial;
use crate::symbolic::substitution::SubstituteTerms;
use crate::symbolic::symbolic_matrix::Matrix;
use std::sync::Mutex;

#[derive(Default)]
pub struct SymbolicContext {
    rules: Option<SubstituteTerms>,
    trace: Option<Mutex<OpTrace>>,
}

impl SymbolicContext {
    /// no default rules, no trace
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: SubstituteTerms) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_trace(mut self, trace: OpTrace) -> Self {
        self.trace = Some(Mutex::new(trace));
        self
    }

    pub fn rules(&self) -> Option<&SubstituteTerms> {
        self.rules.as_ref()
    }

    /// apply the default rule set, if one is configured
    pub fn simplify(&self, poly: &MVPolynomial) -> MVPolynomial {
        match &self.rules {
            Some(rules) => rules.apply(poly),
            None => poly.clone(),
        }
    }

    /// add an entry to the operation trace, if one is attached
    pub fn record(&self, op: &str, matrix: &Matrix) {
        if let Some(trace) = &self.trace {
            if let Ok(mut trace) = trace.lock() {
                trace.record(op, matrix);
            }
        }
    }

    /// hand all buffered trace entries to the trace consumer (or the log)
    pub fn flush_trace(&self) {
        if let Some(trace) = &self.trace {
            if let Ok(mut trace) = trace.lock() {
                trace.drain_to_consumer();
            }
        }
    }

    /// take the trace back, e.g. to inspect its entries
    pub fn into_trace(self) -> Option<OpTrace> {
        self.trace.and_then(|t| t.into_inner().ok())
    }
}
