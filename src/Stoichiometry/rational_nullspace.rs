//! Exact linear algebra over rationals for stoichiometry.
//!
//! Gauss-Jordan elimination to reduced row echelon form, null space basis of an
//! integer matrix, and scaling of a rational vector to the smallest integer vector
//! with the same direction. No rounding is involved anywhere, so the result is the
//! true minimal integer solution of `A x = 0`.
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type RationalMatrix = Vec<Vec<BigRational>>;

pub fn from_integer_rows(rows: &[Vec<i64>]) -> RationalMatrix {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|&x| BigRational::from_integer(BigInt::from(x)))
                .collect()
        })
        .collect()
}

/// In-place reduction to reduced row echelon form. Returns the pivot columns.
pub fn rref(matrix: &mut RationalMatrix, ncols: usize) -> Vec<usize> {
    let nrows = matrix.len();
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..ncols {
        if row >= nrows {
            break;
        }
        let Some(pivot_row) = (row..nrows).find(|&r| !matrix[r][col].is_zero()) else {
            continue;
        };
        matrix.swap(row, pivot_row);
        let pivot = matrix[row][col].clone();
        for x in matrix[row].iter_mut() {
            *x = &*x / &pivot;
        }
        for r in 0..nrows {
            if r != row && !matrix[r][col].is_zero() {
                let factor = matrix[r][col].clone();
                for c in 0..ncols {
                    let delta = &factor * &matrix[row][c];
                    matrix[r][c] = &matrix[r][c] - delta;
                }
            }
        }
        pivots.push(col);
        row += 1;
    }
    pivots
}

/// basis of { x : A x = 0 }, one vector per free column
pub fn null_space(matrix: &RationalMatrix, ncols: usize) -> Vec<Vec<BigRational>> {
    let mut reduced = matrix.clone();
    let pivots = rref(&mut reduced, ncols);
    let free_columns: Vec<usize> = (0..ncols).filter(|c| !pivots.contains(c)).collect();
    free_columns
        .iter()
        .map(|&free| {
            let mut v = vec![BigRational::zero(); ncols];
            v[free] = BigRational::one();
            for (i, &pivot_col) in pivots.iter().enumerate() {
                v[pivot_col] = -reduced[i][free].clone();
            }
            v
        })
        .collect()
}

/// Smallest integer vector parallel to `v`, oriented so that the first non-zero entry is positive.
pub fn to_minimal_integers(v: &[BigRational]) -> Vec<BigInt> {
    let common_denominator = v
        .iter()
        .fold(BigInt::one(), |acc, x| acc.lcm(x.denom()));
    let mut integers: Vec<BigInt> = v
        .iter()
        .map(|x| x.numer() * (&common_denominator / x.denom()))
        .collect();
    let divisor = integers
        .iter()
        .filter(|x| !x.is_zero())
        .fold(BigInt::zero(), |acc, x| acc.gcd(x));
    if !divisor.is_zero() {
        for x in integers.iter_mut() {
            *x = &*x / &divisor;
        }
    }
    if integers
        .iter()
        .find(|x| !x.is_zero())
        .is_some_and(|x| x.is_negative())
    {
        for x in integers.iter_mut() {
            *x = -&*x;
        }
    }
    integers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&x| BigInt::from(x)).collect()
    }

    #[test]
    fn test_rref_rank() {
        let mut m = from_integer_rows(&[vec![1, 2, 3], vec![2, 4, 6], vec![1, 0, 1]]);
        let pivots = rref(&mut m, 3);
        assert_eq!(pivots, vec![0, 1]);
        assert!(m[2].iter().all(|x| x.is_zero()));
    }

    #[test]
    fn test_null_space_of_water_synthesis() {
        // H2 + O2 -> H2O ; rows H, O ; products negated
        let m = from_integer_rows(&[vec![2, 0, -2], vec![0, 2, -1]]);
        let basis = null_space(&m, 3);
        assert_eq!(basis.len(), 1);
        assert_eq!(to_minimal_integers(&basis[0]), ints(&[2, 1, 2]));
    }

    #[test]
    fn test_two_dimensional_null_space() {
        // C + O2 -> CO + CO2
        let m = from_integer_rows(&[vec![1, 0, -1, -1], vec![0, 2, -1, -2]]);
        assert_eq!(null_space(&m, 4).len(), 2);
    }

    #[test]
    fn test_minimal_integers() {
        let v: Vec<BigRational> = [(1, 2), (-3, 4), (0, 1)]
            .iter()
            .map(|&(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
            .collect();
        assert_eq!(to_minimal_integers(&v), ints(&[2, -3, 0]));
        let v: Vec<BigRational> = [(-6, 1), (-4, 1)]
            .iter()
            .map(|&(n, d)| BigRational::new(BigInt::from(n), BigInt::from(d)))
            .collect();
        assert_eq!(to_minimal_integers(&v), ints(&[3, 2]));
    }
}
