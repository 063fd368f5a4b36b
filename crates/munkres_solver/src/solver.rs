use ndarray::ArrayView2;
use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, trace};

use crate::adjust::adjust_uncovered_minimum;
use crate::assignment::{Assignment, extract_assignment};
use crate::cost::Cost;
use crate::cover::CoverState;
use crate::error::{SolverError, SolverResult};
use crate::line_cover::{LineCover, cover_zeros_minimally, star_independent_zeros};
use crate::matrix::{CostMatrix, array_from_rows};
use crate::reduce::{reduce_columns, reduce_rows};
use crate::slack::Slack;

#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Checked once per cover/adjust round; a cancelled run returns
    /// [`SolverError::Cancelled`] and no partial result.
    pub cancellation: Option<CancellationToken>,
    /// Emit the working matrix at `trace` level after every phase.
    /// Formatting is O(N²) per dump, so this is off by default.
    pub dump_matrices: bool,
}

/// Hungarian (Kuhn–Munkres) assignment solver.
///
/// Every call to [`Solver::calculate`] works on its own copy of the costs,
/// so one solver can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Minimum-cost assignment of rows to columns of a square, non-negative
    /// cost matrix.
    pub fn calculate<T: Cost>(&self, costs: ArrayView2<'_, T>) -> SolverResult<Assignment> {
        let mut matrix = CostMatrix::from_array(costs)?;
        let n = matrix.dim();
        let span = debug_span!("hungarian", n);
        let _guard = span.enter();

        reduce_rows(&mut matrix);
        self.dump("row reduction", &matrix);
        reduce_columns(&mut matrix);
        self.dump("column reduction", &matrix);

        star_independent_zeros(&mut matrix);
        let mut cover = CoverState::new(n);
        let mut slack = Slack::new(n);
        let mut iterations = 0usize;
        loop {
            if self.is_cancelled() {
                debug!(iterations, "cancelled");
                return Err(SolverError::Cancelled { iterations });
            }

            match cover_zeros_minimally(&mut matrix, &mut cover, &mut slack) {
                LineCover::Complete => break,
                LineCover::NeedsAdjustment => {
                    // fewer than n lines always leave an uncovered cell
                    if adjust_uncovered_minimum(&mut matrix, &cover, &mut slack).is_none() {
                        unreachable!("no uncovered cell with {} lines", cover.line_total());
                    }
                    self.dump("adjustment", &matrix);
                }
            }
            iterations += 1;
        }

        self.dump("final", &matrix);
        let assignment = extract_assignment(&matrix);
        debug!(
            iterations,
            total = %assignment.total_cost(costs),
            "solved"
        );
        Ok(assignment)
    }

    /// Same as [`Solver::calculate`], for row-major nested slices.
    pub fn calculate_rows<T: Cost, R: AsRef<[T]>>(&self, rows: &[R]) -> SolverResult<Assignment> {
        let costs = array_from_rows(rows)?;
        self.calculate(costs.view())
    }

    fn is_cancelled(&self) -> bool {
        self.config
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn dump<T: Cost>(&self, stage: &str, matrix: &CostMatrix<T>) {
        if self.config.dump_matrices {
            trace!(stage, "\n{matrix}");
        }
    }
}

/// Solve with the default configuration.
pub fn solve<T: Cost>(costs: ArrayView2<'_, T>) -> SolverResult<Assignment> {
    Solver::default().calculate(costs)
}

pub fn solve_rows<T: Cost, R: AsRef<[T]>>(rows: &[R]) -> SolverResult<Assignment> {
    Solver::default().calculate_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidValueError, ShapeError};
    use crate::test_utils::{XorShift64, brute_force_min, is_permutation};
    use ndarray::{Array2, array};
    use rstest::rstest;

    #[test]
    fn motivating_example_matches_brute_force() {
        // jeff, jill, joan, jonathan against four jobs
        let costs = array![
            [80u32, 40, 50, 46],
            [40, 70, 20, 25],
            [30, 10, 20, 30],
            [35, 20, 25, 30],
        ];
        let assignment = solve(costs.view()).unwrap();

        assert!(is_permutation(assignment.pairs(), 4));
        assert_eq!(
            assignment.total_cost(costs.view()),
            brute_force_min(costs.view())
        );
        assert_eq!(assignment.total_cost(costs.view()), 111);
        assert_eq!(assignment.pairs(), &[(0, 3), (1, 2), (2, 1), (3, 0)]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(7.25)]
    #[case(1e9)]
    fn single_cell_is_assigned_to_itself(#[case] value: f64) {
        let assignment = solve_rows(&[[value]]).unwrap();
        assert_eq!(assignment.into_pairs(), vec![(0, 0)]);
    }

    #[rstest]
    #[case(2, 0)]
    #[case(3, 5)]
    #[case(6, 9)]
    fn all_equal_costs(#[case] n: usize, #[case] k: u64) {
        let costs = Array2::from_elem((n, n), k);
        let assignment = solve(costs.view()).unwrap();
        assert!(is_permutation(assignment.pairs(), n));
        assert_eq!(assignment.total_cost(costs.view()), i128::from(n as u64 * k));
    }

    #[test]
    fn column_reduction_leaves_shared_zero_column() {
        // both rows reduce to a zero in column 0
        let costs = array![[1i64, 6], [2, 9]];
        let assignment = solve(costs.view()).unwrap();
        assert_eq!(assignment.pairs(), &[(0, 1), (1, 0)]);
        assert_eq!(assignment.total_cost(costs.view()), 8);
    }

    #[test]
    fn classic_textbook_matrix() {
        let costs = array![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]];
        let assignment = solve(costs.view()).unwrap();
        assert!(is_permutation(assignment.pairs(), 3));
        assert_eq!(assignment.total_cost(costs.view()), 10.0);
    }

    #[rstest]
    fn random_matrices_match_brute_force(
        #[values(1, 2, 3, 4, 5, 6)] n: usize,
        #[values(2, 10, 1000)] max: u64,
    ) {
        let mut rng = XorShift64::new(0x5eed ^ (n as u64) << 16 ^ max);
        for _ in 0..25 {
            let costs = rng.matrix(n, max);
            let assignment = solve(costs.view()).unwrap();
            assert!(is_permutation(assignment.pairs(), n), "{costs:?}");
            assert_eq!(
                assignment.total_cost(costs.view()),
                brute_force_min(costs.view()),
                "{costs:?}"
            );
        }
    }

    #[test]
    fn random_float_matrices_match_brute_force() {
        let mut rng = XorShift64::new(42);
        for n in 1..=6 {
            for _ in 0..20 {
                let costs = rng.matrix(n, 1 << 20).mapv(|v| v as f64 / 1024.0);
                let assignment = solve(costs.view()).unwrap();
                assert!(is_permutation(assignment.pairs(), n));
                let best = brute_force_min(costs.view());
                assert!((assignment.total_cost(costs.view()) - best).abs() < 1e-6);
            }
        }
    }

    fn assert_optimal<T: Cost>(costs: ArrayView2<'_, T>) {
        let assignment = solve(costs).unwrap();
        assert!(is_permutation(assignment.pairs(), costs.nrows()), "{costs:?}");
        assert_eq!(
            assignment.total_cost(costs),
            brute_force_min(costs),
            "{costs:?}"
        );
    }

    #[rstest]
    #[case::doubly_covered_past_max(array![
        [u32::MAX, u32::MAX / 2, u32::MAX],
        [1, 0, u32::MAX / 2],
        [0, u32::MAX, 1],
    ])]
    #[case::total_past_max(array![[u32::MAX, u32::MAX], [u32::MAX, u32::MAX]])]
    #[case::diagonal_forced(array![[u32::MAX - 1, u32::MAX], [u32::MAX, u32::MAX - 1]])]
    #[case::one_cheap_cell(array![
        [u32::MAX, u32::MAX, u32::MAX],
        [u32::MAX, 0, u32::MAX],
        [u32::MAX, u32::MAX, u32::MAX],
    ])]
    fn u32_costs_near_the_maximum(#[case] costs: Array2<u32>) {
        assert_optimal(costs.view());
    }

    #[rstest]
    fn extreme_values_match_brute_force(#[values(2, 3, 4, 5)] n: usize) {
        let u32_levels = [0, 1, u32::MAX / 2, u32::MAX - 1, u32::MAX];
        let i64_levels = [0, 1, i64::MAX / 2, i64::MAX - 1, i64::MAX];
        let u64_levels = [0, 1, u64::MAX / 2, u64::MAX - 1, u64::MAX];
        let mut rng = XorShift64::new(0xface ^ n as u64);
        for _ in 0..40 {
            let picks = rng.matrix(n, 5);
            assert_optimal(picks.mapv(|k| u32_levels[k as usize]).view());
            assert_optimal(picks.mapv(|k| i64_levels[k as usize]).view());
            assert_optimal(picks.mapv(|k| u64_levels[k as usize]).view());
        }
    }

    #[test]
    fn debug_subscriber_sees_totals_past_the_maximum() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        let solver = Solver::new(SolverConfig {
            dump_matrices: true,
            ..Default::default()
        });
        let costs = array![[u32::MAX, u32::MAX], [u32::MAX, u32::MAX]];

        let assignment = tracing::subscriber::with_default(subscriber, || {
            solver.calculate(costs.view())
        })
        .unwrap();
        assert_eq!(assignment.total_cost(costs.view()), 2 * i64::from(u32::MAX));
    }

    #[test]
    fn larger_matrix_is_a_permutation() {
        let mut rng = XorShift64::new(99);
        let costs = rng.matrix(60, 500);
        let assignment = solve(costs.view()).unwrap();
        assert!(is_permutation(assignment.pairs(), 60));
    }

    #[test]
    fn input_errors_surface_before_solving() {
        assert!(matches!(
            solve_rows(&[vec![1, 2], vec![3]]),
            Err(SolverError::Shape(ShapeError::Ragged { row: 1, .. }))
        ));
        assert!(matches!(
            solve(array![[1.0, 2.0]].view()),
            Err(SolverError::Shape(ShapeError::NotSquare { .. }))
        ));
        assert!(matches!(
            solve(array![[1, -2], [3, 4]].view()),
            Err(SolverError::InvalidValue(InvalidValueError::Negative {
                row: 0,
                col: 1
            }))
        ));
    }

    #[test]
    fn cancelled_token_stops_the_run() {
        let token = CancellationToken::new();
        token.cancel();
        let solver = Solver::new(SolverConfig {
            cancellation: Some(token),
            ..Default::default()
        });

        let result = solver.calculate_rows(&[[3, 1], [2, 4]]);
        assert!(matches!(result, Err(SolverError::Cancelled { iterations: 0 })));
    }

    #[test]
    fn live_token_does_not_interfere() {
        let solver = Solver::new(SolverConfig {
            cancellation: Some(CancellationToken::new()),
            dump_matrices: true,
        });
        let assignment = solver.calculate_rows(&[[3, 1], [2, 4]]).unwrap();
        assert_eq!(assignment.pairs(), &[(0, 1), (1, 0)]);
    }

    #[test]
    fn input_matrix_is_not_mutated() {
        let costs = array![[4u32, 2], [3, 7]];
        let before = costs.clone();
        let solver = Solver::default();
        let first = solver.calculate(costs.view()).unwrap();
        let second = solver.calculate(costs.view()).unwrap();
        assert_eq!(costs, before);
        assert_eq!(first, second);
    }
}
