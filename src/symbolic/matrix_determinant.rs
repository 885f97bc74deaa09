//! Symbolic determinant by cofactor expansion along the first row.
use crate::symbolic::polynomial::MVPolynomial;
use crate::symbolic::symbolic_context::SymbolicContext;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use crate::symbolic::symbolic_matrix::Matrix;
use log::debug;

impl Matrix {
    /// Determinant of a square matrix. 1x1 and 2x2 use closed forms; larger matrices are
    /// expanded along the first row and every partial sum is rewritten with the context's
    /// default rules, which keeps trigonometric entries from blowing up.
    pub fn determinant(&self, ctx: &SymbolicContext) -> Result<MVPolynomial> {
        if !self.is_square() {
            return Err(SymbolicError::InvalidDimension(format!(
                "determinant of non-square {}x{} matrix",
                self.nrows(),
                self.ncols()
            )));
        }
        debug!("determinant of {}x{} matrix", self.nrows(), self.ncols());
        let det = self.cofactor_expansion(ctx)?;
        ctx.record(&format!("determinant = {}", det), self);
        Ok(det)
    }

    fn cofactor_expansion(&self, ctx: &SymbolicContext) -> Result<MVPolynomial> {
        match self.nrows() {
            0 => Ok(MVPolynomial::constant(1.0)),
            1 => self.get(0, 0),
            2 => {
                let ad = self.get(0, 0)?.multiply(&self.get(1, 1)?);
                let bc = self.get(0, 1)?.multiply(&self.get(1, 0)?);
                Ok(ad.subtract(&bc))
            }
            n => {
                let mut sum = MVPolynomial::zero();
                for col in 0..n {
                    let Some(cell) = self.cell(0, col)? else {
                        continue;
                    };
                    if cell.is_zero() {
                        continue;
                    }
                    let minor = self.sub_matrix_skip_row_col(0, col)?;
                    let term = cell.multiply(&minor.cofactor_expansion(ctx)?);
                    let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                    sum = ctx.simplify(&sum.add_scaled(&term, sign));
                }
                Ok(sum)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::substitution::{SubstituteTerms, SubstitutionMode};

    fn p(s: &str) -> MVPolynomial {
        MVPolynomial::parse(s).unwrap()
    }

    #[test]
    fn test_det_1x1_2x2() {
        let ctx = SymbolicContext::new();
        assert_eq!(
            Matrix::from_strs(1, 1, &["x y"]).unwrap().determinant(&ctx).unwrap(),
            p("x y")
        );
        let m = Matrix::from_strs(2, 2, &["a", "b", "c", "d"]).unwrap();
        assert_eq!(m.determinant(&ctx).unwrap(), p("a d - b c"));
        assert!(Matrix::new(2, 2).determinant(&ctx).unwrap().is_zero());
    }

    #[test]
    fn test_det_3x3_symbolic() {
        let ctx = SymbolicContext::new();
        let m = Matrix::init3x3("1", "2", "3", "4", "x", "6", "7", "8", "9").unwrap();
        assert_eq!(m.determinant(&ctx).unwrap(), p("-12 x + 60"));
    }

    #[test]
    fn test_det_of_identity() {
        let ctx = SymbolicContext::new();
        for n in 1..=4 {
            assert_eq!(Matrix::identity(n).determinant(&ctx).unwrap(), p("1"));
        }
    }

    #[test]
    fn test_det_matches_numeric() {
        let ctx = SymbolicContext::new();
        let values = [2.0, -1.0, 0.0, 3.0, 1.0, 4.0, 0.5, 2.0, -2.0, 1.0, 1.0, 0.0, 3.0, 0.0, 2.0, 1.0];
        let m = Matrix::from_scalars(4, 4, &values).unwrap();
        let symbolic = m.determinant(&ctx).unwrap().scalar_sum();
        let numeric = m.to_dmatrix().determinant();
        approx::assert_relative_eq!(symbolic, numeric, epsilon = 1e-9);
    }

    #[test]
    fn test_det_non_square() {
        let ctx = SymbolicContext::new();
        assert!(matches!(
            Matrix::new(2, 3).determinant(&ctx),
            Err(SymbolicError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_det_with_rules() {
        // rotation about z
        let rules = SubstituteTerms::new(SubstitutionMode::ApplyIfReducing)
            .with_rule("sin sin", "1 - cos cos")
            .unwrap();
        let ctx = SymbolicContext::new().with_rules(rules);
        let m = Matrix::init3x3("cos", "-sin", "0", "sin", "cos", "0", "0", "0", "1").unwrap();
        assert_eq!(m.determinant(&ctx).unwrap(), p("1"));
        // without rules the identity is left unresolved
        let plain = m.determinant(&SymbolicContext::new()).unwrap();
        assert_eq!(plain, p("cos cos + sin sin"));
    }
}
