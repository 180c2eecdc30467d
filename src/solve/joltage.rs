//! Configure joltage counters: minimize total presses subject to
//! `Σ presses of buttons affecting each counter = its requirement`.
//!
//! The counter equations are row reduced exactly. If every variable is a
//! pivot the solution is unique. Otherwise each pivot variable is an affine
//! function of the free variables, and a depth-first search assigns the free
//! variables one at a time within bounds derived from the reduced rows.

use num::{BigInt, BigRational, One, Signed, ToPrimitive, Zero};

use crate::machine::{Button, Joltage, Presses};
use crate::solve::matrix::{presses_to_rational, to_presses, AugmentedMatrix, ReducedMatrix};
use crate::solve::{SolveResult, Solution};

/// how far above the largest requirement a free variable is ever searched
const FREE_VARIABLE_CEILING_FACTOR: Presses = 3;

/// find the fewest total presses that raise each counter exactly to its target
pub fn fewest_presses(targets: &[Joltage], buttons: &[Button]) -> SolveResult {
    if buttons.is_empty() {
        return if targets.iter().all(|&t| t == 0) {
            SolveResult::Solved(Solution::new(Vec::new()))
        } else {
            SolveResult::Infeasible
        };
    }

    let reduced = match AugmentedMatrix::new(targets, buttons).reduce() {
        Some(reduced) => reduced,
        None => return SolveResult::Infeasible,
    };

    let free_cols = reduced.free_cols();
    if free_cols.is_empty() {
        debug!("unique solution");
        return match to_presses(&reduced.substitute(&[], &[])) {
            Some(presses) => SolveResult::Solved(Solution::new(presses)),
            None => SolveResult::Infeasible,
        };
    }

    debug!(
        "searching {} free variables {:?} (pivots {:?})",
        free_cols.len(),
        free_cols,
        reduced.pivot_cols()
    );
    let max_target = targets.iter().copied().max().unwrap_or(0);
    let ceiling = Presses::from(max_target) * FREE_VARIABLE_CEILING_FACTOR;
    let mut search = FreeSearch {
        objective: Objective::new(&reduced, &free_cols),
        reduced: &reduced,
        free_cols: &free_cols,
        ceiling,
        best: None,
        leaves: 0,
    };
    search.search(&mut Vec::with_capacity(free_cols.len()));
    debug!("visited {} leaves", search.leaves);
    match search.best {
        Some(best) => SolveResult::Solved(best.solution),
        None => SolveResult::Infeasible,
    }
}

/// Total presses as `constant + Σ coefs[i] × free[i]`
struct Objective {
    constant: BigRational,
    coefs: Vec<BigRational>,
}

impl Objective {
    fn new(reduced: &ReducedMatrix, free_cols: &[usize]) -> Self {
        // each free variable counts once itself and `-coefficient` once per pivot row
        let mut constant = BigRational::zero();
        let mut coefs = vec![BigRational::one(); free_cols.len()];
        for row in 0..reduced.rank() {
            constant += reduced.rhs(row).clone();
            for (coef, &col) in coefs.iter_mut().zip(free_cols) {
                *coef -= reduced.coefficient(row, col).clone();
            }
        }
        Self { constant, coefs }
    }

    /// objective contribution of the free variables assigned so far
    fn partial(&self, assigned: &[Presses]) -> BigRational {
        let mut value = self.constant.clone();
        for (coef, &free) in self.coefs.iter().zip(assigned) {
            value += coef * presses_to_rational(free);
        }
        value
    }
}

struct Best {
    total: Presses,
    solution: Solution,
}

struct FreeSearch<'a> {
    reduced: &'a ReducedMatrix,
    free_cols: &'a [usize],
    objective: Objective,
    ceiling: Presses,
    best: Option<Best>,
    leaves: u64,
}

impl FreeSearch<'_> {
    fn search(&mut self, assigned: &mut Vec<Presses>) {
        let idx = assigned.len();
        if idx == self.free_cols.len() {
            self.visit_leaf(assigned);
            return;
        }

        let (lo, hi) = match self.bounds(assigned) {
            Some(bounds) => bounds,
            None => {
                trace!("pruned free variable {} at {:?}", idx, assigned);
                return;
            }
        };

        let coef = self.objective.coefs[idx].clone();
        let partial = self.objective.partial(assigned);
        let negative_remaining = self.objective.coefs[idx + 1..]
            .iter()
            .any(Signed::is_negative);

        if coef.is_negative() {
            // larger values lower the objective
            for value in (lo..=hi).rev() {
                self.search_with(assigned, value);
            }
        } else if negative_remaining {
            for value in lo..=hi {
                self.search_with(assigned, value);
            }
        } else {
            // the objective only grows from here on
            for value in lo..=hi {
                if let Some(best) = &self.best {
                    let bound = &partial + &coef * presses_to_rational(value);
                    if bound >= presses_to_rational(best.total) {
                        break;
                    }
                }
                self.search_with(assigned, value);
            }
        }
    }

    fn search_with(&mut self, assigned: &mut Vec<Presses>, value: Presses) {
        assigned.push(value);
        self.search(assigned);
        assigned.pop();
    }

    fn visit_leaf(&mut self, assigned: &[Presses]) {
        self.leaves += 1;
        let presses = match to_presses(&self.reduced.substitute(self.free_cols, assigned)) {
            Some(presses) => presses,
            None => return,
        };
        let total: Presses = presses.iter().sum();
        if self.best.as_ref().map_or(true, |best| total < best.total) {
            trace!("new best: {} presses {:?}", total, presses);
            self.best = Some(Best {
                total,
                solution: Solution::new(presses),
            });
        }
    }

    /// Bounds for the next free variable, or `None` if no value can satisfy
    /// some row. Only rows with no later free variable are considered.
    fn bounds(&self, assigned: &[Presses]) -> Option<(Presses, Presses)> {
        let idx = assigned.len();
        let col = self.free_cols[idx];
        let later_cols = &self.free_cols[idx + 1..];
        let mut lo = BigInt::zero();
        let mut hi = BigInt::from(self.ceiling);
        for row in 0..self.reduced.rank() {
            if later_cols
                .iter()
                .any(|&c| !self.reduced.coefficient(row, c).is_zero())
            {
                continue;
            }
            let mut rhs = self.reduced.rhs(row).clone();
            for (&c, &free) in self.free_cols.iter().zip(assigned) {
                rhs -= self.reduced.coefficient(row, c) * presses_to_rational(free);
            }
            // the pivot variable is `rhs - coef × value` and must be non-negative
            let coef = self.reduced.coefficient(row, col);
            if coef.is_positive() {
                if rhs.is_negative() {
                    return None;
                }
                hi = hi.min((rhs / coef).floor().to_integer());
            } else if coef.is_negative() && rhs.is_negative() {
                lo = lo.max((rhs / coef).ceil().to_integer());
            }
        }
        let lo = lo.max(BigInt::zero());
        let hi = hi.max(lo.clone());
        Some((lo.to_u64()?, hi.to_u64()?))
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::fewest_presses;
    use crate::machine::{Button, Joltage, Machine, Presses};
    use crate::solve::SolveResult;

    fn buttons(counters: &[&[usize]]) -> Vec<Button> {
        counters.iter().map(|c| Button::new(c.to_vec())).collect()
    }

    /// the fewest presses found by trying every combination up to the largest target
    fn brute_force(targets: &[Joltage], buttons: &[Button]) -> Option<Presses> {
        let max = targets.iter().copied().max().unwrap_or(0) as Presses;
        let mut presses = vec![0; buttons.len()];
        let mut best = None;
        loop {
            let reached = targets.iter().enumerate().all(|(counter, &target)| {
                buttons
                    .iter()
                    .zip(&presses)
                    .filter(|(b, _)| b.affects(counter))
                    .map(|(_, &p)| p)
                    .sum::<Presses>()
                    == target as Presses
            });
            if reached {
                let total: Presses = presses.iter().sum();
                best = Some(best.map_or(total, |b: Presses| b.min(total)));
            }
            match presses.iter().position(|&p| p < max) {
                Some(i) => {
                    presses[i] += 1;
                    for p in &mut presses[..i] {
                        *p = 0;
                    }
                }
                None => return best,
            }
        }
    }

    fn random_buttons(rng: &mut StdRng, counters: usize, count: usize) -> Vec<Button> {
        (0..count)
            .map(|_| {
                let mut affected: Vec<usize> = (0..counters).filter(|_| rng.gen_bool(0.5)).collect();
                if affected.is_empty() {
                    affected.push(rng.gen_range(0, counters));
                }
                Button::new(affected)
            })
            .collect()
    }

    #[test]
    fn example_machines() {
        let cases: &[(&[Joltage], &[&[usize]], Presses)] = &[
            (
                &[3, 5, 4, 7],
                &[&[3], &[1, 3], &[2], &[2, 3], &[0, 2], &[0, 1]],
                10,
            ),
            (
                &[7, 5, 12, 7, 2],
                &[&[0, 2, 3, 4], &[2, 3], &[0, 4], &[0, 1, 2], &[1, 2, 3, 4]],
                12,
            ),
            (
                &[10, 11, 11, 5, 10, 5],
                &[&[0, 1, 2, 3, 4], &[0, 3, 4], &[0, 1, 2, 4, 5], &[1, 2]],
                11,
            ),
        ];
        for &(targets, counters, expected) in cases {
            let buttons = buttons(counters);
            let result = fewest_presses(targets, &buttons);
            assert_eq!(result.total(), Some(expected), "{:?}", targets);
            let machine = Machine::new(None, buttons, Some(targets.to_vec()));
            assert!(machine.verify_joltage(result.solved().unwrap().presses()));
        }
    }

    #[test]
    fn no_buttons() {
        assert_eq!(fewest_presses(&[0, 0], &[]).total(), Some(0));
        assert_eq!(fewest_presses(&[], &[]).total(), Some(0));
        assert_eq!(fewest_presses(&[0, 1], &[]), SolveResult::Infeasible);
    }

    #[test]
    fn no_counters() {
        let result = fewest_presses(&[], &buttons(&[&[0], &[1]]));
        assert_eq!(result.solved().unwrap().presses(), &[0, 0]);
    }

    #[test]
    fn infeasible() {
        // contradictory
        assert_eq!(fewest_presses(&[1, 2], &buttons(&[&[0, 1]])), SolveResult::Infeasible);
        // unique but fractional
        assert_eq!(
            fewest_presses(&[1, 1, 1], &buttons(&[&[0, 1], &[1, 2], &[0, 2]])),
            SolveResult::Infeasible
        );
        // unique but negative
        assert_eq!(fewest_presses(&[1, 2], &buttons(&[&[0, 1], &[0]])), SolveResult::Infeasible);
        // free variables, but every assignment leaves a negative pivot
        assert_eq!(
            fewest_presses(&[1, 3], &buttons(&[&[0, 1], &[0, 1], &[0]])),
            SolveResult::Infeasible
        );
    }

    #[test]
    fn unreachable_counters_are_ignored() {
        // button 1 is wired to a counter the machine does not have
        let result = fewest_presses(&[2], &buttons(&[&[0], &[5]]));
        assert_eq!(result.solved().unwrap().presses(), &[2, 0]);
    }

    #[test]
    fn negative_objective_coefficient() {
        // pressing button 2 once replaces pressing buttons 0 and 1
        let buttons = buttons(&[&[0], &[1], &[0, 1]]);
        let result = fewest_presses(&[4, 4], &buttons);
        assert_eq!(result.solved().unwrap().presses(), &[0, 0, 4]);
    }

    #[test]
    fn zero_coefficient_before_negative() {
        // free presses of buttons 1 and 3 have objective coefficients 0 and -1,
        // so the first free variable is searched without pruning
        let buttons = buttons(&[&[1], &[1], &[0], &[0, 1]]);
        let result = fewest_presses(&[3, 1], &buttons);
        assert_eq!(result.total(), Some(3));
        assert_eq!(result.total(), brute_force(&[3, 1], &buttons));
        let machine = Machine::new(None, buttons, Some(vec![3, 1]));
        assert!(machine.verify_joltage(result.solved().unwrap().presses()));
    }

    #[test]
    fn inverted_bounds_collapse() {
        // with button 1 pressed twice, button 3 needs at least 2 presses to keep
        // button 2 non-negative but at most 1 to keep button 0 non-negative
        let buttons = buttons(&[&[0, 1], &[0, 1], &[1], &[0]]);
        let result = fewest_presses(&[3, 1], &buttons);
        assert_eq!(result.total(), Some(3));
        assert_eq!(result.total(), brute_force(&[3, 1], &buttons));
        let machine = Machine::new(None, buttons, Some(vec![3, 1]));
        assert!(machine.verify_joltage(result.solved().unwrap().presses()));
    }

    #[test]
    fn empty_interval_is_infeasible() {
        // the only free variable must be at least 2 and at most 1
        let buttons = buttons(&[&[0, 1], &[0], &[0, 2], &[1]]);
        assert_eq!(fewest_presses(&[1, 1, 2], &buttons), SolveResult::Infeasible);
        assert_eq!(brute_force(&[1, 1, 2], &buttons), None);
    }

    #[test]
    fn idempotent() {
        let buttons = buttons(&[&[0, 2, 3, 4], &[2, 3], &[0, 4], &[0, 1, 2], &[1, 2, 3, 4]]);
        let targets = [7, 5, 12, 7, 2];
        assert_eq!(fewest_presses(&targets, &buttons), fewest_presses(&targets, &buttons));
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..60 {
            let counters = rng.gen_range(1, 4);
            let button_count = rng.gen_range(1, 5);
            let buttons = random_buttons(&mut rng, counters, button_count);
            let planted: Vec<Presses> = (0..buttons.len()).map(|_| rng.gen_range(0, 4)).collect();
            let targets: Vec<Joltage> = (0..counters)
                .map(|counter| {
                    buttons
                        .iter()
                        .zip(&planted)
                        .filter(|(b, _)| b.affects(counter))
                        .map(|(_, &p)| p as Joltage)
                        .sum()
                })
                .collect();
            let result = fewest_presses(&targets, &buttons);
            let total = result.total().expect("planted solution exists");
            assert!(total <= planted.iter().sum::<Presses>());
            assert_eq!(Some(total), brute_force(&targets, &buttons), "{:?}", targets);
            let machine = Machine::new(None, buttons, Some(targets));
            assert!(machine.verify_joltage(result.solved().unwrap().presses()));
        }
    }

    #[test]
    fn infeasible_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut infeasible = 0;
        for _ in 0..60 {
            let counters = rng.gen_range(2, 4);
            let button_count = rng.gen_range(1, 4);
            let buttons = random_buttons(&mut rng, counters, button_count);
            let targets: Vec<Joltage> = (0..counters).map(|_| rng.gen_range(0, 5)).collect();
            let expected = brute_force(&targets, &buttons);
            if expected.is_none() {
                infeasible += 1;
            }
            assert_eq!(fewest_presses(&targets, &buttons).total(), expected, "{:?}", targets);
        }
        assert!(infeasible > 0);
    }
}
