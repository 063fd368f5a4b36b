use ndarray::{Array2, ArrayView2};

use crate::cost::Cost;

pub(crate) struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9e3779b97f4a7c15 } else { seed },
        }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// n×n matrix with entries in `[0, max)`.
    pub(crate) fn matrix(&mut self, n: usize, max: u64) -> Array2<u64> {
        Array2::from_shape_fn((n, n), |_| self.next_u64() % max)
    }
}

/// Minimum total cost over every permutation, by exhaustive search. Summed
/// in the wide type so inputs near the element type's maximum are exact.
pub(crate) fn brute_force_min<T: Cost>(costs: ArrayView2<'_, T>) -> T::Wide {
    fn go<T: Cost>(
        costs: ArrayView2<'_, T>,
        row: usize,
        used: &mut [bool],
        acc: T::Wide,
        best: &mut Option<T::Wide>,
    ) {
        let n = costs.nrows();
        if row == n {
            if best.is_none_or(|b| acc < b) {
                *best = Some(acc);
            }
            return;
        }
        for col in 0..n {
            if !used[col] {
                used[col] = true;
                go(costs, row + 1, used, acc + costs[[row, col]].widen(), best);
                used[col] = false;
            }
        }
    }

    let zero = T::ZERO.widen();
    let mut best = None;
    let mut used = vec![false; costs.ncols()];
    go(costs, 0, &mut used, zero, &mut best);
    best.unwrap_or(zero)
}

pub(crate) fn is_permutation(pairs: &[(usize, usize)], n: usize) -> bool {
    let mut rows = vec![false; n];
    let mut cols = vec![false; n];
    pairs.len() == n
        && pairs.iter().all(|&(r, c)| {
            let fresh = r < n && c < n && !rows[r] && !cols[c];
            if fresh {
                rows[r] = true;
                cols[c] = true;
            }
            fresh
        })
}
