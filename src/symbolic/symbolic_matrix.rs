//! # Symbolic matrix
//! Dense row-major matrix of multivariate polynomials. An empty cell (`None`) means zero;
//! it is kept apart from an explicit zero polynomial only to save work, equality treats them alike.
//!
//! Operations return new matrices and never modify their operands. Multiplication and determinant
//! take a [`SymbolicContext`] whose default rule set (if any) is applied to every product cell and
//! every determinant partial sum.
//! # Example
//! ```
//! use RustedSymbolMath::symbolic::symbolic_matrix::Matrix;
//! use RustedSymbolMath::symbolic::symbolic_context::SymbolicContext;
//! let ctx = SymbolicContext::new();
//! let a = Matrix::from_strs(2, 2, &["a", "b", "c", "d"]).unwrap();
//! let det = a.determinant(&ctx).unwrap();
//! assert_eq!(det.to_string(), "-b*c + a*d");
//! let product = a.multiply(&Matrix::identity(2), &ctx).unwrap();
//! assert_eq!(product, a);
//! ```
use crate::symbolic::polynomial::MVPolynomial;
use crate::symbolic::substitution::{SubstituteTerm, SubstituteTerms, SubstitutionMode};
use crate::symbolic::symbolic_context::SymbolicContext;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use crate::symbolic::term::Term;
use log::{debug, info};
use nalgebra::DMatrix;
use rayon::prelude::*;
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Clone)]
pub struct Matrix {
    n_rows: usize,
    n_cols: usize,
    cells: Vec<Option<MVPolynomial>>,
    label: Option<String>,
}

impl Matrix {
    /// matrix with all cells empty
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            cells: vec![None; n_rows * n_cols],
            label: None,
        }
    }

    /// Build from row-major cells. The number of cells must be `n_rows * n_cols`.
    pub fn from_cells(n_rows: usize, n_cols: usize, cells: Vec<Option<MVPolynomial>>) -> Result<Self> {
        check_count(n_rows, n_cols, cells.len())?;
        Ok(Self {
            n_rows,
            n_cols,
            cells,
            label: None,
        })
    }

    pub fn from_polynomials(n_rows: usize, n_cols: usize, cells: Vec<MVPolynomial>) -> Result<Self> {
        Self::from_cells(n_rows, n_cols, cells.into_iter().map(Some).collect())
    }

    /// parse every cell from text, row-major
    pub fn from_strs(n_rows: usize, n_cols: usize, cells: &[&str]) -> Result<Self> {
        check_count(n_rows, n_cols, cells.len())?;
        let cells = cells
            .iter()
            .map(|s| MVPolynomial::parse(s).map(Some))
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(n_rows, n_cols, cells)
    }

    pub fn from_scalars(n_rows: usize, n_cols: usize, values: &[f64]) -> Result<Self> {
        check_count(n_rows, n_cols, values.len())?;
        let cells = values
            .iter()
            .map(|k| Some(MVPolynomial::constant(*k)))
            .collect();
        Self::from_cells(n_rows, n_cols, cells)
    }

    pub fn identity(n: usize) -> Self {
        Self::diagonal(n, &MVPolynomial::constant(1.0))
    }

    /// square matrix with `value` on the diagonal
    pub fn diagonal(n: usize, value: &MVPolynomial) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.cells[i * n + i] = Some(value.clone());
        }
        m
    }

    /// 3x3 matrix from nine expressions, row-major
    #[allow(clippy::too_many_arguments)]
    pub fn init3x3(
        a00: &str,
        a01: &str,
        a02: &str,
        a10: &str,
        a11: &str,
        a12: &str,
        a20: &str,
        a21: &str,
        a22: &str,
    ) -> Result<Self> {
        Self::from_strs(3, 3, &[a00, a01, a02, a10, a11, a12, a20, a21, a22])
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn nrows(&self) -> usize {
        self.n_rows
    }

    pub fn ncols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn is_square(&self) -> bool {
        self.n_rows == self.n_cols
    }

    /// row-major cells
    pub fn cells(&self) -> &[Option<MVPolynomial>] {
        &self.cells
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(SymbolicError::InvalidDimension(format!(
                "cell ({}, {}) outside of {}x{} matrix",
                row, col, self.n_rows, self.n_cols
            )));
        }
        Ok(row * self.n_cols + col)
    }

    /// cell content; `Ok(None)` for an empty cell
    pub fn cell(&self, row: usize, col: usize) -> Result<Option<&MVPolynomial>> {
        let idx = self.index_of(row, col)?;
        Ok(self.cells[idx].as_ref())
    }

    /// cell content, empty cells read as the zero polynomial
    pub fn get(&self, row: usize, col: usize) -> Result<MVPolynomial> {
        Ok(self.cell(row, col)?.cloned().unwrap_or_else(MVPolynomial::zero))
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<MVPolynomial>) -> Result<()> {
        let idx = self.index_of(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Visit every cell in row-major order: `f(position, row, col, cell)`.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, usize, Option<&MVPolynomial>),
    {
        for (pos, cell) in self.cells.iter().enumerate() {
            f(pos, pos / self.n_cols, pos % self.n_cols, cell.as_ref());
        }
    }

    /// like [`Matrix::iterate`] but skips empty cells
    pub fn iterate_non_null<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, usize, &MVPolynomial),
    {
        self.iterate(|pos, row, col, cell| {
            if let Some(cell) = cell {
                f(pos, row, col, cell)
            }
        });
    }

    /// apply a function to the whole matrix, handy in call chains
    pub fn op<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Matrix) -> T,
    {
        f(self)
    }

    /// new matrix with `f` applied to every non-empty cell
    fn map_cells<F>(&self, f: F) -> Matrix
    where
        F: Fn(&MVPolynomial) -> MVPolynomial,
    {
        Matrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            cells: self.cells.iter().map(|c| c.as_ref().map(&f)).collect(),
            label: None,
        }
    }

    /// Sum of coefficients of every cell (empty cells give 0.0), row-major.
    /// For a matrix of constants this is just its numeric value.
    pub fn scalars(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|c| c.as_ref().map_or(0.0, MVPolynomial::scalar_sum))
            .collect()
    }

    /// numeric matrix of [`Matrix::scalars`]
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.n_rows, self.n_cols, &self.scalars())
    }

    /// sum of the main diagonal
    pub fn trace(&self) -> MVPolynomial {
        let mut sum = MVPolynomial::zero();
        for i in 0..self.n_rows.min(self.n_cols) {
            if let Some(cell) = &self.cells[i * self.n_cols + i] {
                sum.accumulate_scaled(cell, 1.0);
            }
        }
        sum
    }

    /// a labelled matrix `L` gives `tr(L)`
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::new(self.n_cols, self.n_rows);
        self.iterate(|_, row, col, cell| {
            out.cells[col * self.n_rows + row] = cell.cloned();
        });
        out.label = self.label.as_ref().map(|label| format!("tr({})", label));
        out
    }

    /// Record this matrix in the context's trace under `op` and pass it on, for operations
    /// that take no context: `m.transpose().traced(&ctx, "transpose")`.
    pub fn traced(self, ctx: &SymbolicContext, op: &str) -> Matrix {
        ctx.record(op, &self);
        self
    }

    fn check_same_shape(&self, other: &Matrix, op: &str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(SymbolicError::InvalidDimension(format!(
                "{}: {}x{} and {}x{}",
                op, self.n_rows, self.n_cols, other.n_rows, other.n_cols
            )));
        }
        Ok(())
    }

    /// `self + k * other`, two empty cells stay empty
    pub fn add_scaled(&self, other: &Matrix, k: f64) -> Result<Matrix> {
        self.check_same_shape(other, "add")?;
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| match (a, b) {
                (None, None) => None,
                (a, b) => {
                    let mut sum = MVPolynomial::zero();
                    if let Some(a) = a {
                        sum.accumulate_scaled(a, 1.0);
                    }
                    if let Some(b) = b {
                        sum.accumulate_scaled(b, k);
                    }
                    Some(sum)
                }
            })
            .collect();
        Matrix::from_cells(self.n_rows, self.n_cols, cells)
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.add_scaled(other, 1.0)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.add_scaled(other, -1.0)
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map_cells(|p| p.scale(k))
    }

    /// every cell multiplied by `k * term`
    pub fn scale_term(&self, k: f64, term: &Term) -> Matrix {
        self.map_cells(|p| p.multiply_term(term, k))
    }

    /// every cell multiplied by `poly`; a zero factor empties the matrix
    pub fn multiply_polynomial(&self, poly: &MVPolynomial) -> Matrix {
        if poly.is_zero() {
            return Matrix::new(self.n_rows, self.n_cols);
        }
        self.map_cells(|p| p.multiply(poly))
    }

    /// Matrix product. Cells are computed in parallel, each is then rewritten with the
    /// context's default rules.
    pub fn multiply(&self, other: &Matrix, ctx: &SymbolicContext) -> Result<Matrix> {
        if self.n_cols != other.n_rows {
            return Err(SymbolicError::InvalidDimension(format!(
                "cannot multiply {}x{} by {}x{}",
                self.n_rows, self.n_cols, other.n_rows, other.n_cols
            )));
        }
        let out_cols = other.n_cols;
        let cells: Vec<Option<MVPolynomial>> = (0..self.n_rows * out_cols)
            .into_par_iter()
            .map(|pos| {
                let (row, col) = (pos / out_cols, pos % out_cols);
                let mut elem = MVPolynomial::zero();
                for i in 0..self.n_cols {
                    let left = &self.cells[row * self.n_cols + i];
                    let right = &other.cells[i * other.n_cols + col];
                    if let (Some(l), Some(r)) = (left, right) {
                        elem.accumulate_scaled(&l.multiply(r), 1.0);
                    }
                }
                Some(ctx.simplify(&elem))
            })
            .collect();
        let product = Matrix::from_cells(self.n_rows, out_cols, cells)?;
        debug!(
            "multiplied {}x{} by {}x{}",
            self.n_rows, self.n_cols, other.n_rows, other.n_cols
        );
        ctx.record("multiply", &product);
        Ok(product)
    }

    /// partial derivative of every cell
    pub fn derive(&self, symbol: &str) -> Matrix {
        self.map_cells(|p| p.derive(symbol))
    }

    /// antiderivative of every cell
    pub fn integrate(&self, symbol: &str) -> Matrix {
        self.map_cells(|p| p.integrate(symbol))
    }

    /// Apply a rule set to every non-empty cell. Cells no rule changes are kept as they are.
    pub fn substitute(&self, rules: &SubstituteTerms) -> Matrix {
        let mut changed = 0usize;
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                cell.as_ref().map(|p| match rules.try_apply(p) {
                    Some(rewritten) => {
                        changed += 1;
                        rewritten
                    }
                    None => p.clone(),
                })
            })
            .collect();
        debug!("substitution changed {} cells", changed);
        Matrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            cells,
            label: self.label.clone(),
        }
    }

    /// Apply a single rule to every cell, keeping a rewrite only where the cell does not grow.
    pub fn substitute_rule(&self, rule: &SubstituteTerm) -> Matrix {
        let mut rules = SubstituteTerms::new(SubstitutionMode::ApplyIfReducing);
        rules.push(rule.clone());
        self.substitute(&rules)
    }

    /// `m.substitute_str("sin sin", "1 - cos cos")`
    pub fn substitute_str(&self, pattern: &str, replacement: &str) -> Result<Matrix> {
        Ok(self.substitute_rule(&SubstituteTerm::parse(pattern, replacement)?))
    }

    /// Copy without the given row and column.
    pub fn sub_matrix_skip_row_col(&self, skip_row: usize, skip_col: usize) -> Result<Matrix> {
        self.index_of(skip_row, skip_col)?;
        let mut cells = Vec::with_capacity((self.n_rows - 1) * (self.n_cols - 1));
        self.iterate(|_, row, col, cell| {
            if row != skip_row && col != skip_col {
                cells.push(cell.cloned());
            }
        });
        Matrix::from_cells(self.n_rows - 1, self.n_cols - 1, cells)
    }

    /// table rendering for logs and reports
    pub fn pretty(&self) -> String {
        let mut builder = Builder::default();
        for row in 0..self.n_rows {
            builder.push_record((0..self.n_cols).map(|col| {
                self.cells[row * self.n_cols + col]
                    .as_ref()
                    .map_or_else(|| "0".to_string(), |p| p.to_string())
            }));
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    /// log the table rendering at info level
    pub fn show(&self) {
        info!(
            "\n Matrix {}x{} {}\n{}",
            self.n_rows,
            self.n_cols,
            self.label.as_deref().unwrap_or(""),
            self.pretty()
        );
    }
}

fn check_count(n_rows: usize, n_cols: usize, count: usize) -> Result<()> {
    if n_rows * n_cols != count {
        return Err(SymbolicError::InvalidDimension(format!(
            "Expected nRows*nCols {}*{}={}, Got:{}",
            n_rows,
            n_cols,
            n_rows * n_cols,
            count
        )));
    }
    Ok(())
}

/// Same shape and equal cells; an empty cell equals a zero polynomial. Labels are ignored.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| match (a, b) {
                    (Some(a), b) => a.eq_option(b.as_ref()),
                    (None, Some(b)) => b.is_zero(),
                    (None, None) => true,
                })
    }
}
