//! Text form of a symbolic matrix.
//!
//! ```text
//!  Matrix{2x2 rotation}
//!   cos,  -sin;
//!   sin,  cos;
//! ```
//! Cells are separated by `,`, every row ends with `;`. The `{...}` header is optional on input,
//! a label after the size in the header is restored.
use crate::symbolic::polynomial::MVPolynomial;
use crate::symbolic::symbolic_errors::{Result, SymbolicError};
use crate::symbolic::symbolic_matrix::Matrix;
use nom::{
    IResult, Parser,
    bytes::complete::{take_till, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::verify,
    multi::{many1, separated_list1},
    sequence::{delimited, preceded, terminated},
};
use std::fmt;
use std::str::FromStr;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " Matrix{{{}x{}", self.nrows(), self.ncols())?;
        if let Some(label) = self.label() {
            write!(f, " {}", label)?;
        }
        write!(f, "}}")?;
        let n_cols = self.ncols();
        for (pos, cell) in self.cells().iter().enumerate() {
            if pos % n_cols == 0 {
                write!(f, "\n  ")?;
            }
            match cell {
                Some(p) => write!(f, "{}", p)?,
                None => write!(f, "0")?,
            }
            if pos % n_cols + 1 < n_cols {
                write!(f, ",  ")?;
            } else {
                write!(f, ";")?;
            }
        }
        Ok(())
    }
}

/// `{...}` in front of the first cell
fn header(input: &str) -> IResult<&str, &str> {
    preceded(
        take_till(|c: char| c == '{' || c == ',' || c == ';'),
        delimited(char('{'), take_until("}"), char('}')),
    )
    .parse(input)
}

fn cell_text(input: &str) -> IResult<&str, &str> {
    verify(take_while1(|c: char| c != ',' && c != ';'), |s: &str| {
        !s.trim().is_empty()
    })
    .parse(input)
}

fn row(input: &str) -> IResult<&str, Vec<&str>> {
    terminated(separated_list1(char(','), cell_text), char(';')).parse(input)
}

fn rows(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    terminated(many1(preceded(multispace0, row)), multispace0).parse(input)
}

/// `RxC` from the header, if present and well formed
fn header_size(size: &str) -> Option<(usize, usize)> {
    let (n_rows, n_cols) = size.split_once('x')?;
    Some((n_rows.parse().ok()?, n_cols.parse().ok()?))
}

impl Matrix {
    /// Read a matrix from its text form, e.g. the output of `to_string()`.
    /// Rows of different length or text that is not `,`/`;`-delimited are
    /// [`SymbolicError::InvalidFormat`]; bad numeric literals in a cell are
    /// [`SymbolicError::NumberFormat`].
    /// ```
    /// use RustedSymbolMath::symbolic::symbolic_matrix::Matrix;
    /// let m = Matrix::parse("a, 2b;\n 0, c + 1;").unwrap();
    /// assert_eq!(m, Matrix::from_strs(2, 2, &["a", "2 b", "0", "c + 1"]).unwrap());
    /// ```
    pub fn parse(text: &str) -> Result<Matrix> {
        let (body, size, label) = match header(text) {
            Ok((body, content)) => {
                let content = content.trim();
                let (size, label) = match content.split_once(' ') {
                    Some((size, label)) => (size, Some(label.trim()).filter(|l| !l.is_empty())),
                    None => (content, None),
                };
                (body, header_size(size), label)
            }
            Err(_) => (text, None, None),
        };
        // a matrix with no rows or no columns prints as its header alone
        if let Some((n_rows, n_cols)) = size.filter(|&(r, c)| r * c == 0) {
            if body.trim().is_empty() {
                let matrix = Matrix::new(n_rows, n_cols);
                return Ok(match label {
                    Some(label) => matrix.with_label(label),
                    None => matrix,
                });
            }
        }
        let (rest, parsed) = rows(body)
            .map_err(|_| SymbolicError::InvalidFormat(format!("not a matrix: '{}'", text.trim())))?;
        if !rest.is_empty() {
            return Err(SymbolicError::InvalidFormat(format!(
                "unexpected text after last row: '{}'",
                rest
            )));
        }
        let n_cols = parsed[0].len();
        if let Some(bad) = parsed.iter().position(|r| r.len() != n_cols) {
            return Err(SymbolicError::InvalidFormat(format!(
                "row {} has {} cells, expected {}",
                bad,
                parsed[bad].len(),
                n_cols
            )));
        }
        let cells = parsed
            .iter()
            .flatten()
            .map(|cell| MVPolynomial::parse(cell).map(Some))
            .collect::<Result<Vec<_>>>()?;
        let matrix = Matrix::from_cells(parsed.len(), n_cols, cells)?;
        Ok(match label {
            Some(label) => matrix.with_label(label),
            None => matrix,
        })
    }
}

impl FromStr for Matrix {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self> {
        Matrix::parse(s)
    }
}
