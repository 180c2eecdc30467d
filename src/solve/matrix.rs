//! Exact Gaussian elimination over button/counter incidence

use num::{BigInt, BigRational, One, Signed, ToPrimitive, Zero};

use crate::machine::{Button, Joltage, Presses};

/// Counter equations `Σ presses of buttons affecting the counter = target`,
/// one row per counter and one column per button plus the right-hand side
#[derive(Clone, Debug)]
pub(crate) struct AugmentedMatrix {
    rows: Vec<Vec<BigRational>>,
    variable_count: usize,
}

impl AugmentedMatrix {
    pub fn new(targets: &[Joltage], buttons: &[Button]) -> Self {
        let variable_count = buttons.len();
        let rows = targets
            .iter()
            .enumerate()
            .map(|(counter, &target)| {
                let mut row: Vec<BigRational> = buttons
                    .iter()
                    .map(|button| {
                        if button.affects(counter) {
                            BigRational::one()
                        } else {
                            BigRational::zero()
                        }
                    })
                    .collect();
                row.push(BigRational::from_integer(BigInt::from(target)));
                row
            })
            .collect();
        Self {
            rows,
            variable_count,
        }
    }

    /// Reduce to reduced row echelon form.
    /// Returns `None` if some row reduces to `0 = c` with `c != 0`.
    pub fn reduce(mut self) -> Option<ReducedMatrix> {
        let n = self.variable_count;
        let mut pivot_cols = Vec::new();
        let mut pivot_row = 0;
        for col in 0..n {
            let found = (pivot_row..self.rows.len()).find(|&row| !self.rows[row][col].is_zero());
            let found = match found {
                Some(row) => row,
                None => continue,
            };
            self.rows.swap(pivot_row, found);

            let scale = self.rows[pivot_row][col].clone();
            for value in &mut self.rows[pivot_row] {
                *value = &*value / &scale;
            }

            let pivot = self.rows[pivot_row].clone();
            for (row, values) in self.rows.iter_mut().enumerate() {
                if row == pivot_row || values[col].is_zero() {
                    continue;
                }
                let factor = values[col].clone();
                for (value, p) in values.iter_mut().zip(&pivot) {
                    *value = &*value - &factor * p;
                }
            }

            pivot_cols.push(col);
            pivot_row += 1;
        }

        if let Some(row) = self.rows[pivot_row..].iter().find(|row| !row[n].is_zero()) {
            debug!("inconsistent system: 0 = {}", row[n]);
            return None;
        }
        self.rows.truncate(pivot_row);
        trace!("pivot columns: {:?}", pivot_cols);
        Some(ReducedMatrix {
            rows: self.rows,
            pivot_cols,
            variable_count: n,
        })
    }
}

/// A consistent system in reduced row echelon form.
/// Row `i` solves for the variable in `pivot_cols[i]`.
#[derive(Clone, Debug)]
pub(crate) struct ReducedMatrix {
    rows: Vec<Vec<BigRational>>,
    pivot_cols: Vec<usize>,
    variable_count: usize,
}

impl ReducedMatrix {
    pub fn rank(&self) -> usize {
        self.pivot_cols.len()
    }

    pub fn pivot_cols(&self) -> &[usize] {
        &self.pivot_cols
    }

    /// columns without a pivot, in increasing order
    pub fn free_cols(&self) -> Vec<usize> {
        let mut pivots = self.pivot_cols.iter().peekable();
        (0..self.variable_count)
            .filter(|&col| {
                if pivots.peek() == Some(&&col) {
                    pivots.next();
                    false
                } else {
                    true
                }
            })
            .collect()
    }

    pub fn coefficient(&self, row: usize, col: usize) -> &BigRational {
        &self.rows[row][col]
    }

    pub fn rhs(&self, row: usize) -> &BigRational {
        &self.rows[row][self.variable_count]
    }

    /// Every variable's value given values for the free columns:
    /// `pivot = rhs - Σ coefficient × free`
    pub fn substitute(&self, free_cols: &[usize], free_values: &[Presses]) -> Vec<BigRational> {
        debug_assert_eq!(free_cols.len(), free_values.len());
        let mut values = vec![BigRational::zero(); self.variable_count];
        for (&col, &value) in free_cols.iter().zip(free_values) {
            values[col] = presses_to_rational(value);
        }
        for (row, &pivot_col) in self.pivot_cols.iter().enumerate() {
            let mut value = self.rhs(row).clone();
            for (&col, &free) in free_cols.iter().zip(free_values) {
                let coefficient = self.coefficient(row, col);
                if !coefficient.is_zero() {
                    value -= coefficient * presses_to_rational(free);
                }
            }
            values[pivot_col] = value;
        }
        values
    }
}

pub(crate) fn presses_to_rational(presses: Presses) -> BigRational {
    BigRational::from_integer(BigInt::from(presses))
}

/// `Some` if every value is a non-negative integer
pub(crate) fn to_presses(values: &[BigRational]) -> Option<Vec<Presses>> {
    values
        .iter()
        .map(|value| {
            if value.is_negative() || !value.is_integer() {
                None
            } else {
                value.to_integer().to_u64()
            }
        })
        .collect()
}
