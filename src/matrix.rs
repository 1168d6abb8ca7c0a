use std::convert::TryFrom;
use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use serde::{ Serialize, Deserialize };

use crate::error::{ Error, Result };
use crate::feq;
use crate::tuple::Tuple4D;

/// A dense, rectangular matrix of `f64`.
///
/// Elements are stored row-major in a flat vector and addressed by zero-based
/// `(row, col)` pairs. Any shape is allowed, including empty ones, but every
/// row always has the same length; constructors reject jagged input.
///
/// For methods which modify matrices, they are provided in pairs: one which
/// modifies the matrix in-place, and one which returns a new matrix. For
/// example, `transpose` turns a matrix into its own transpose, while
/// `transposition` produces a new, transposed matrix.
///
/// Matrices serialize as a list of rows.
///
/// # Examples
///
/// Multiplying a matrix by a point:
///
/// ```
/// # use ray_tracer_core::tuple::Tuple4D;
/// # use ray_tracer_core::matrix::Matrix;
/// let a = Matrix::from([
///     [1.0, 2.0, 3.0, 4.0],
///     [2.0, 4.0, 4.0, 2.0],
///     [8.0, 6.0, 4.0, 1.0],
///     [0.0, 0.0, 0.0, 1.0],
/// ]);
/// let t = Tuple4D::point(1.0, 2.0, 3.0);
/// assert_eq!(&a * t, Tuple4D::point(18.0, 24.0, 33.0));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows` by `columns` matrix with every element set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`; `try_new` reports that
    /// as an error instead.
    pub fn new(rows: usize, columns: usize, fill: f64) -> Matrix {
        match Matrix::try_new(rows, columns, fill) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible form of `new`, returning `Error::MatrixTooLarge` when the
    /// element count does not fit in a `usize`.
    pub fn try_new(rows: usize, columns: usize, fill: f64) -> Result<Matrix> {
        let len = rows.checked_mul(columns)
            .ok_or(Error::MatrixTooLarge { rows, columns })?;

        Ok(Matrix { rows, columns, data: vec![fill; len] })
    }

    /// Builds a matrix from a list of rows.
    ///
    /// Every row must have the same length as the first, otherwise
    /// `Error::JaggedRows` is returned. An empty list gives a 0x0 matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * columns);

        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(Error::JaggedRows {
                    row: r,
                    expected: columns,
                    found: row.len(),
                });
            }

            data.extend_from_slice(row);
        }

        Ok(Matrix { rows: rows.len(), columns, data })
    }

    /// The 4x4 identity matrix.
    ///
    /// Every call returns a fresh value, so there is no shared identity that
    /// could be modified.
    pub fn identity() -> Matrix {
        Matrix::identity_of(4)
    }

    /// An `n` by `n` identity matrix.
    pub fn identity_of(n: usize) -> Matrix {
        let mut ident = Matrix::new(n, n, 0.0);
        for i in 0..n {
            ident[(i, i)] = 1.0;
        }

        ident
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The `(rows, columns)` shape of the matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.columns {
            Some(row * self.columns + col)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        Error::ElementOutOfBounds {
            row,
            col,
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Returns the element at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.offset(row, col).map(|i| self.data[i])
    }

    /// Replaces the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let i = self.offset(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))?;
        self.data[i] = value;

        Ok(())
    }

    /// Iterates over the rows of the matrix as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |r| {
            &self.data[r * self.columns..(r + 1) * self.columns]
        })
    }

    /// Computes the matrix product `self * other`.
    ///
    /// The product of an `n x m` and an `m x p` matrix is `n x p`. If the
    /// inner dimensions differ, `Error::DimensionMismatch` is returned.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.columns != other.rows {
            return Err(Error::DimensionMismatch {
                left_rows: self.rows,
                left_columns: self.columns,
                right_rows: other.rows,
                right_columns: other.columns,
            });
        }

        let mut res = Matrix::new(self.rows, other.columns, 0.0);
        for r in 0..self.rows {
            for c in 0..other.columns {
                res[(r, c)] = (0..self.columns)
                    .map(|k| self[(r, k)] * other[(k, c)])
                    .sum::<f64>();
            }
        }

        Ok(res)
    }

    /// Multiplies the matrix by a column vector.
    ///
    /// The result has one element per row of the matrix; each is the dot
    /// product of that row with `tuple`. The tuple's length must equal the
    /// column count, otherwise `Error::TupleLengthMismatch` is returned.
    pub fn multiply_tuple(&self, tuple: &[f64]) -> Result<Vec<f64>> {
        if self.columns != tuple.len() {
            return Err(Error::TupleLengthMismatch {
                columns: self.columns,
                len: tuple.len(),
            });
        }

        Ok(self.iter_rows()
            .map(|row| row.iter().zip(tuple).map(|(a, b)| a * b).sum::<f64>())
            .collect())
    }

    /// Transposes a matrix in-place.
    ///
    /// The transpose of a matrix `A` is defined as:
    ///
    /// ```latex
    /// A^T_{ij} = A_{ji}
    /// ```
    ///
    /// Where subscripts `ij` represent the element of `A` at row `i`, column
    /// `j`. Non-square matrices change shape.
    pub fn transpose(&mut self) {
        *self = self.transposition();
    }

    /// Produces the transpose of a matrix, returning a new matrix as a result.
    ///
    /// See the documentation on method `transpose` for more information on what
    /// a transpose is.
    pub fn transposition(&self) -> Matrix {
        let mut buf = Matrix::new(self.columns, self.rows, 0.0);

        for r in 0..self.columns {
            for c in 0..self.rows {
                buf[(r, c)] = self[(c, r)];
            }
        }

        buf
    }
}

/// Determines whether two matrices are equal.
///
/// Matrices of different shapes are never equal. Otherwise elements are
/// compared with `feq`, as matrix elements are floating point numbers.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.shape() == other.shape()
            && self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

/// Compares a matrix against raw rows.
///
/// Rows that are jagged, or whose shape differs from the matrix, compare
/// unequal. An empty list has no column count of its own and only matches a
/// 0x0 matrix.
impl PartialEq<Vec<Vec<f64>>> for Matrix {
    fn eq(&self, other: &Vec<Vec<f64>>) -> bool {
        if self.rows == 0 {
            return other.is_empty() && self.columns == 0;
        }

        other.len() == self.rows
            && self.iter_rows().zip(other.iter()).all(|(mine, theirs)| {
                mine.len() == theirs.len()
                    && mine.iter().zip(theirs).all(|(x, y)| feq(*x, *y))
            })
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Vec<Vec<f64>> {
        m.iter_rows().map(<[f64]>::to_vec).collect()
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix {
    fn from(rows: [[f64; C]; R]) -> Matrix {
        Matrix {
            rows: R,
            columns: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        match self.offset(row, col) {
            Some(i) => &self.data[i],
            None => panic!("{}", self.out_of_bounds(row, col)),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        match self.offset(row, col) {
            Some(i) => &mut self.data[i],
            None => panic!("{}", self.out_of_bounds(row, col)),
        }
    }
}

/// Multiplication between two matrices.
///
/// Note that matrix multiplication is not commutative; in other words, for
/// matrix `A` and matrix `B`, `A * B` is not necessarily equal to `B * A`.
///
/// # Panics
///
/// Panics if the column count of the left matrix differs from the row count
/// of the right one. Use `Matrix::multiply` to handle that case.
///
/// # Examples
///
/// ```
/// # use ray_tracer_core::matrix::Matrix;
/// let a = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
/// let b = Matrix::from([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
/// assert_eq!(&a * &b, Matrix::from([[58.0, 64.0], [139.0, 154.0]]));
/// ```
impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, other: &Matrix) -> Matrix {
        match self.multiply(other) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        &self * &other
    }
}

/// Multiplication between a matrix and a `Tuple4D`.
///
/// Tuples are multiplied on the right, as a column vector of 4 rows.
///
/// # Panics
///
/// Panics unless the matrix is 4x4. Use `Matrix::multiply_tuple` for other
/// shapes.
impl Mul<Tuple4D> for &Matrix {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        if self.rows != 4 {
            panic!("cannot produce a 4D tuple from a matrix with {} rows",
                self.rows);
        }

        match self.multiply_tuple(&other.to_array()) {
            Ok(buf) => Tuple4D::tuple(buf[0], buf[1], buf[2], buf[3]),
            Err(e) => panic!("{}", e),
        }
    }
}

impl Mul<Tuple4D> for Matrix {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        &self * other
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "|")?;
            for c in 0..self.columns {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r + 1 != self.rows {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 4.0, 2.0],
            [8.0, 6.0, 4.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[test]
    fn construct_4x4() {
        let m = Matrix::from_rows(vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![5.5, 6.5, 7.5, 8.5],
            vec![9.0, 10.0, 11.0, 12.0],
            vec![13.5, 14.5, 15.5, 16.5],
        ]).unwrap();

        assert_eq!(m.shape(), (4, 4));
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 3)], 4.0);
        assert_eq!(m[(1, 0)], 5.5);
        assert_eq!(m[(1, 2)], 7.5);
        assert_eq!(m[(2, 2)], 11.0);
        assert_eq!(m[(3, 0)], 13.5);
        assert_eq!(m[(3, 2)], 15.5);
    }

    #[test]
    fn construct_small() {
        let m2 = Matrix::from([[-3.0, 5.0], [1.0, -2.0]]);
        assert_eq!(m2[(0, 1)], 5.0);
        assert_eq!(m2[(1, 1)], -2.0);

        let m3 = Matrix::from([[-3.0, 5.0, 0.0], [1.0, -2.0, -7.0], [0.0, 1.0, 1.0]]);
        assert_eq!(m3[(0, 0)], -3.0);
        assert_eq!(m3[(1, 1)], -2.0);
        assert_eq!(m3[(2, 2)], 1.0);
    }

    #[test]
    fn new_filled() {
        let m = Matrix::new(2, 3, 7.0);

        assert_eq!(m.shape(), (2, 3));
        assert!(m.iter_rows().flatten().all(|x| *x == 7.0));
    }

    #[test]
    fn oversized_matrix_rejected() {
        assert!(matches!(
            Matrix::try_new(usize::MAX, 2, 0.0),
            Err(Error::MatrixTooLarge { rows: usize::MAX, columns: 2 })
        ));
        assert_eq!(Matrix::try_new(0, usize::MAX, 1.0).unwrap().shape(),
            (0, usize::MAX));
    }

    #[test]
    #[should_panic(expected = "more elements than can be addressed")]
    fn oversized_matrix_panics() {
        let _ = Matrix::new(usize::MAX, usize::MAX, 0.0);
    }

    #[test]
    fn jagged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();

        assert!(matches!(err, Error::JaggedRows { row: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn get_and_set() {
        let mut m = Matrix::new(2, 2, 0.0);
        m.set(1, 0, 3.5).unwrap();

        assert_eq!(m.get(1, 0), Some(3.5));
        assert_eq!(m.get(2, 0), None);
        assert!(matches!(m.set(0, 2, 1.0), Err(Error::ElementOutOfBounds { .. })));
    }

    #[test]
    fn equality() {
        assert_eq!(sample(), sample());

        let mut nearly = sample();
        nearly[(0, 0)] = 1.000000000001;
        assert_eq!(sample(), nearly);

        let a = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
        assert_ne!(a, Matrix::from([[2.0, 3.0], [4.0, 5.0]]));
        assert_ne!(a, Matrix::from([[1.0, 2.0], [3.0, 4.0], [1.0, 2.0]]));
        assert_ne!(a, Matrix::from([[1.0, 2.0, 3.0, 4.0]]));
    }

    #[test]
    fn equality_with_raw_rows() {
        let a = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);

        assert!(a == vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(a != vec![vec![1.0, 2.0], vec![3.0, 4.0, 1.0]]);
        assert!(a != vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn empty_shapes_against_raw_rows() {
        let none: Vec<Vec<f64>> = vec![];

        assert!(Matrix::new(0, 0, 0.0) == none);
        assert!(Matrix::new(0, 5, 0.0) != none);
        assert_ne!(Matrix::new(0, 5, 0.0), Matrix::new(0, 0, 0.0));
        let empty_row: Vec<f64> = vec![];
        assert!(Matrix::new(3, 0, 0.0) == vec![empty_row.clone(); 3]);
        assert!(Matrix::new(3, 0, 0.0) != vec![empty_row; 2]);
    }

    #[test]
    fn multiply_4x4() {
        let a = Matrix::from([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 8.0, 7.0, 6.0],
            [5.0, 4.0, 3.0, 2.0],
        ]);
        let b = Matrix::from([
            [-2.0, 1.0, 2.0, 3.0],
            [3.0, 2.0, 1.0, -1.0],
            [4.0, 3.0, 6.0, 5.0],
            [1.0, 2.0, 7.0, 8.0],
        ]);
        let p = Matrix::from([
            [20.0, 22.0, 50.0, 48.0],
            [44.0, 54.0, 114.0, 108.0],
            [40.0, 58.0, 110.0, 102.0],
            [16.0, 26.0, 46.0, 42.0],
        ]);

        assert_eq!(&a * &b, p);
    }

    #[test]
    fn multiply_rectangular() {
        let a = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::from([[7.0], [8.0], [9.0]]);
        let p = a.multiply(&b).unwrap();

        assert_eq!(p.shape(), (2, 1));
        assert_eq!(p, Matrix::from([[50.0], [122.0]]));
    }

    #[test]
    fn multiply_mismatch() {
        let a = Matrix::new(2, 3, 1.0);
        let b = Matrix::new(2, 3, 1.0);

        assert!(matches!(
            a.multiply(&b),
            Err(Error::DimensionMismatch {
                left_rows: 2, left_columns: 3, right_rows: 2, right_columns: 3
            })
        ));
    }

    #[test]
    #[should_panic(expected = "cannot multiply a 2x3 matrix by a 2x3 matrix")]
    fn multiply_mismatch_operator_panics() {
        let _ = Matrix::new(2, 3, 1.0) * Matrix::new(2, 3, 1.0);
    }

    #[test]
    fn multiply_associative() {
        let a = Matrix::from([[1.0, 2.0], [3.0, 4.0], [-1.0, 0.5]]);
        let b = Matrix::from([[0.5, -2.0, 1.0], [3.0, 0.25, 2.0]]);
        let c = Matrix::from([[1.0], [-1.0], [2.0]]);

        assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }

    #[test]
    fn multiply_tuple() {
        let t = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);

        assert_eq!(&sample() * t, Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
        assert_eq!(
            sample().multiply_tuple(&[1.0, 2.0, 3.0, 1.0]).unwrap(),
            vec![18.0, 24.0, 33.0, 1.0]
        );
    }

    #[test]
    fn multiply_tuple_rectangular() {
        let a = Matrix::from([[1.0, 0.0, 2.0, 0.0], [0.0, 1.0, 0.0, 3.0]]);

        assert_eq!(a.multiply_tuple(&[1.0, 2.0, 3.0, 4.0]).unwrap(), vec![7.0, 14.0]);
        assert!(matches!(
            a.multiply_tuple(&[1.0, 2.0, 3.0]),
            Err(Error::TupleLengthMismatch { columns: 4, len: 3 })
        ));
    }

    #[test]
    fn identity() {
        let i = Matrix::identity();
        let a = Matrix::from([
            [0.0, 1.0, 2.0, 4.0],
            [1.0, 2.0, 4.0, 8.0],
            [2.0, 4.0, 8.0, 16.0],
            [4.0, 8.0, 16.0, 32.0],
        ]);

        assert_eq!(&i * &a, a);
        assert_eq!(&a * &i, a);

        let wide = Matrix::from([[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]);
        assert_eq!(&wide * &i, wide);
    }

    #[test]
    fn identity_tuple() {
        let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);

        assert_eq!(Matrix::identity() * t, t);
    }

    #[test]
    fn identity_is_fresh() {
        let mut i = Matrix::identity();
        i[(0, 0)] = 5.0;

        assert_eq!(Matrix::identity()[(0, 0)], 1.0);
    }

    #[test]
    fn transpose() {
        let a = Matrix::from([
            [0.0, 9.0, 3.0, 0.0],
            [9.0, 8.0, 0.0, 8.0],
            [1.0, 8.0, 5.0, 3.0],
            [0.0, 0.0, 5.0, 8.0],
        ]);
        let t = Matrix::from([
            [0.0, 9.0, 1.0, 0.0],
            [9.0, 8.0, 8.0, 0.0],
            [3.0, 0.0, 5.0, 5.0],
            [0.0, 8.0, 3.0, 8.0],
        ]);

        assert_eq!(t, a.transposition());
        assert_eq!(t.transposition(), a);
    }

    #[test]
    fn transpose_rectangular_in_place() {
        let mut a = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        a.transpose();

        assert_eq!(a, Matrix::from([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
    }

    #[test]
    fn transpose_identity() {
        let i = Matrix::identity();
        assert_eq!(i, i.transposition());
    }

    #[test]
    fn display() {
        let m = Matrix::from([[1.0, 2.0], [3.5, -4.0]]);

        assert_eq!(m.to_string(), "| 1 | 2 |\n| 3.5 | -4 |");
    }

    #[test]
    fn serde_rows() {
        let m: Matrix = serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").unwrap();
        assert_eq!(m, Matrix::from([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[1.0,2.0],[3.0,4.0]]");

        assert!(serde_json::from_str::<Matrix>("[[1.0, 2.0], [3.0]]").is_err());
    }
}
