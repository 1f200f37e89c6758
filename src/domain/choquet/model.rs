//! Choquet-integral CCR linear programs.
//!
//! All three stage LPs share one variable layout and one balance block:
//!
//! layout: `[v(m), u(s), v_int(pm), u_int(ps), phi_in(m), phi_out(s), z_in, z_out]`
//!
//! where `v`/`u` are linear Möbius weights, `v_int`/`u_int` pairwise
//! interaction weights in [-1, 1], `phi` the Shapley global importances and
//! `z` the per-side importance ceilings. The balance block ties them
//! together: `phi_c = w_c + 0.5 · Σ interactions(c)`, `rho·z <= phi_c <= z`,
//! plus the conservative monotonicity row `w_c + Σ interactions(c) >= 0`.

use serde::{Deserialize, Serialize};

use super::aggregation::coefficients;
use crate::domain::foundation::{DataMatrix, InteractionMatrix};
use crate::ports::{
    Direction, LinearConstraint, LinearProgram, LinearProgramSolver, SolverFailure,
    VariableBounds,
};

/// Linear plus pairwise Möbius weights for one side (inputs or outputs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoquetWeights {
    pub linear: Vec<f64>,
    pub interactions: InteractionMatrix,
}

impl ChoquetWeights {
    fn zeros(criteria: usize) -> Self {
        Self {
            linear: vec![0.0; criteria],
            interactions: InteractionMatrix::zeros(criteria),
        }
    }
}

/// Stage-2 optimum: a DMU's Choquet self-efficiency and the weights
/// attaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoquetScore {
    pub efficiency: f64,
    pub input: ChoquetWeights,
    pub output: ChoquetWeights,
}

impl ChoquetScore {
    /// Zero-valued record substituted when the stage-2 LP fails.
    pub fn degraded(input_criteria: usize, output_criteria: usize) -> Self {
        Self {
            efficiency: 0.0,
            input: ChoquetWeights::zeros(input_criteria),
            output: ChoquetWeights::zeros(output_criteria),
        }
    }
}

/// Shared variable layout of the stage LPs.
#[derive(Debug, Clone, Copy)]
struct VariableLayout {
    m: usize,
    s: usize,
    pm: usize,
    ps: usize,
}

impl VariableLayout {
    fn new(m: usize, s: usize) -> Self {
        Self {
            m,
            s,
            pm: pair_count(m),
            ps: pair_count(s),
        }
    }

    fn total(&self) -> usize {
        self.m + self.s + self.pm + self.ps + self.m + self.s + 2
    }

    fn v(&self, c: usize) -> usize {
        c
    }

    fn u(&self, c: usize) -> usize {
        self.m + c
    }

    fn v_int(&self, pair: usize) -> usize {
        self.m + self.s + pair
    }

    fn u_int(&self, pair: usize) -> usize {
        self.m + self.s + self.pm + pair
    }

    fn phi_in(&self, c: usize) -> usize {
        self.m + self.s + self.pm + self.ps + c
    }

    fn phi_out(&self, c: usize) -> usize {
        self.m + self.s + self.pm + self.ps + self.m + c
    }

    fn z_in(&self) -> usize {
        self.total() - 2
    }

    fn z_out(&self) -> usize {
        self.total() - 1
    }

    /// Choquet-input row of one DMU: coefficients on `v` and `v_int`.
    fn input_row(&self, values: &[f64]) -> Vec<f64> {
        let rows = coefficients(values);
        let mut row = vec![0.0; self.total()];
        for (c, x) in rows.linear.iter().enumerate() {
            row[self.v(c)] = *x;
        }
        for (p, min) in rows.pairwise.iter().enumerate() {
            row[self.v_int(p)] = *min;
        }
        row
    }

    /// Choquet-output row of one DMU: coefficients on `u` and `u_int`.
    fn output_row(&self, values: &[f64]) -> Vec<f64> {
        let rows = coefficients(values);
        let mut row = vec![0.0; self.total()];
        for (c, y) in rows.linear.iter().enumerate() {
            row[self.u(c)] = *y;
        }
        for (p, min) in rows.pairwise.iter().enumerate() {
            row[self.u_int(p)] = *min;
        }
        row
    }

    fn base_bounds(&self) -> Vec<VariableBounds> {
        let mut bounds = Vec::with_capacity(self.total());
        bounds.extend(vec![VariableBounds::non_negative(); self.m + self.s]);
        bounds.extend(vec![VariableBounds::between(-1.0, 1.0); self.pm + self.ps]);
        bounds.extend(vec![VariableBounds::non_negative(); self.m + self.s]);
        bounds.push(VariableBounds::between(0.0, 1.0)); // z_in
        bounds.push(VariableBounds::between(0.0, 1.0)); // z_out
        bounds
    }

    /// Importance-balance and monotonicity rows for both sides.
    fn balance_constraints(&self, rho: f64) -> Vec<LinearConstraint> {
        let mut constraints = Vec::new();
        self.side_balance(
            rho,
            self.m,
            |layout, c| layout.v(c),
            |layout, p| layout.v_int(p),
            |layout, c| layout.phi_in(c),
            self.z_in(),
            &mut constraints,
        );
        self.side_balance(
            rho,
            self.s,
            |layout, c| layout.u(c),
            |layout, p| layout.u_int(p),
            |layout, c| layout.phi_out(c),
            self.z_out(),
            &mut constraints,
        );
        constraints
    }

    #[allow(clippy::too_many_arguments)]
    fn side_balance(
        &self,
        rho: f64,
        criteria: usize,
        weight_index: impl Fn(&Self, usize) -> usize,
        pair_index: impl Fn(&Self, usize) -> usize,
        phi_index: impl Fn(&Self, usize) -> usize,
        z_index: usize,
        constraints: &mut Vec<LinearConstraint>,
    ) {
        for c in 0..criteria {
            let member_pairs = pairs_containing(criteria, c);

            // phi_c - w_c - 0.5 Σ interactions(c) = 0
            let mut definition = vec![0.0; self.total()];
            definition[phi_index(self, c)] = 1.0;
            definition[weight_index(self, c)] = -1.0;
            for p in &member_pairs {
                definition[pair_index(self, *p)] = -0.5;
            }
            constraints.push(LinearConstraint::equality(definition, 0.0));

            // rho·z <= phi_c
            let mut floor = vec![0.0; self.total()];
            floor[phi_index(self, c)] = 1.0;
            floor[z_index] = -rho;
            constraints.push(LinearConstraint::greater_equal(floor, 0.0));

            // phi_c <= z
            let mut ceiling = vec![0.0; self.total()];
            ceiling[phi_index(self, c)] = 1.0;
            ceiling[z_index] = -1.0;
            constraints.push(LinearConstraint::less_equal(ceiling, 0.0));

            // w_c + Σ interactions(c) >= 0 (conservative 2-additive monotonicity)
            let mut monotone = vec![0.0; self.total()];
            monotone[weight_index(self, c)] = 1.0;
            for p in &member_pairs {
                monotone[pair_index(self, *p)] = 1.0;
            }
            constraints.push(LinearConstraint::greater_equal(monotone, 0.0));
        }
    }
}

fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Storage indices (in lexicographic pair order) of the pairs containing
/// criterion `c` among `n` criteria.
fn pairs_containing(n: usize, c: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut k = 0;
    for lo in 0..n {
        for hi in lo + 1..n {
            if lo == c || hi == c {
                indices.push(k);
            }
            k += 1;
        }
    }
    indices
}

fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

fn scale(row: &[f64], factor: f64) -> Vec<f64> {
    row.iter().map(|x| x * factor).collect()
}

/// 2-additive Choquet CCR model over a pluggable LP backend.
pub struct ChoquetModel<'a> {
    lp: &'a dyn LinearProgramSolver,
    rho: f64,
}

impl<'a> ChoquetModel<'a> {
    pub fn new(lp: &'a dyn LinearProgramSolver, rho: f64) -> Self {
        Self { lp, rho }
    }

    fn frontier_rows(
        &self,
        layout: &VariableLayout,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
    ) -> Vec<LinearConstraint> {
        (0..inputs.rows())
            .map(|t| {
                let row = subtract(
                    &layout.output_row(outputs.row(t)),
                    &layout.input_row(inputs.row(t)),
                );
                LinearConstraint::less_equal(row, 0.0)
            })
            .collect()
    }

    /// Stage-2 self-efficiency LP for DMU `i`: maximize i's Choquet output
    /// with i's Choquet input normalized to 1.
    pub fn self_efficiency(
        &self,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        i: usize,
    ) -> Result<ChoquetScore, SolverFailure> {
        let layout = VariableLayout::new(inputs.cols(), outputs.cols());
        let mut constraints =
            vec![LinearConstraint::equality(layout.input_row(inputs.row(i)), 1.0)];
        constraints.extend(self.frontier_rows(&layout, inputs, outputs));
        constraints.extend(layout.balance_constraints(self.rho));

        let program = LinearProgram {
            direction: Direction::Maximize,
            objective: layout.output_row(outputs.row(i)),
            constraints,
            bounds: layout.base_bounds(),
        };
        let solution = self.lp.solve(&program)?;

        let mut efficiency = solution.objective_value;
        if efficiency > 1.0 && efficiency <= 1.0 + 1e-5 {
            efficiency = 1.0;
        }

        let x = &solution.variables;
        let mut input_interactions = InteractionMatrix::zeros(layout.m);
        let input_pairs: Vec<_> = input_interactions.pairs().collect();
        for (p, pair) in input_pairs.into_iter().enumerate() {
            input_interactions.set(pair, x[layout.v_int(p)]);
        }
        let mut output_interactions = InteractionMatrix::zeros(layout.s);
        let output_pairs: Vec<_> = output_interactions.pairs().collect();
        for (p, pair) in output_pairs.into_iter().enumerate() {
            output_interactions.set(pair, x[layout.u_int(p)]);
        }

        Ok(ChoquetScore {
            efficiency,
            input: ChoquetWeights {
                linear: (0..layout.m).map(|c| x[layout.v(c)]).collect(),
                interactions: input_interactions,
            },
            output: ChoquetWeights {
                linear: (0..layout.s).map(|c| x[layout.u(c)]).collect(),
                interactions: output_interactions,
            },
        })
    }

    /// Stage-3 target LP: extremize peer j's Choquet output with j's input
    /// normalized to 1 while DMU i keeps its stage-2 efficiency.
    pub fn target_bound(
        &self,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        i: usize,
        j: usize,
        efficiency_i: f64,
        direction: Direction,
    ) -> Result<f64, SolverFailure> {
        let layout = VariableLayout::new(inputs.cols(), outputs.cols());
        let mut constraints =
            vec![LinearConstraint::equality(layout.input_row(inputs.row(j)), 1.0)];

        // Pin i: Choquet_out(i) - e_i · Choquet_in(i) = 0.
        let pin = subtract(
            &layout.output_row(outputs.row(i)),
            &scale(&layout.input_row(inputs.row(i)), efficiency_i),
        );
        constraints.push(LinearConstraint::equality(pin, 0.0));

        constraints.extend(self.frontier_rows(&layout, inputs, outputs));
        constraints.extend(layout.balance_constraints(self.rho));

        let program = LinearProgram {
            direction,
            objective: layout.output_row(outputs.row(j)),
            constraints,
            bounds: layout.base_bounds(),
        };
        Ok(self.lp.solve(&program)?.objective_value)
    }

    /// Stage-4 feasibility probe: can DMU i keep its efficiency while every
    /// listed peer `(j, floor)` reaches at least its satisfaction floor?
    pub fn satisfaction_feasible(
        &self,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        i: usize,
        efficiency_i: f64,
        floors: &[(usize, f64)],
    ) -> bool {
        let layout = VariableLayout::new(inputs.cols(), outputs.cols());
        let mut constraints =
            vec![LinearConstraint::equality(layout.input_row(inputs.row(i)), 1.0)];

        let pin = subtract(
            &layout.output_row(outputs.row(i)),
            &scale(&layout.input_row(inputs.row(i)), efficiency_i),
        );
        constraints.push(LinearConstraint::equality(pin, 0.0));

        for (j, floor) in floors {
            let row = subtract(
                &layout.output_row(outputs.row(*j)),
                &scale(&layout.input_row(inputs.row(*j)), *floor),
            );
            constraints.push(LinearConstraint::greater_equal(row, 0.0));
        }

        constraints.extend(self.frontier_rows(&layout, inputs, outputs));
        constraints.extend(layout.balance_constraints(self.rho));

        let program = LinearProgram {
            direction: Direction::Minimize,
            objective: vec![0.0; layout.total()],
            constraints,
            bounds: layout.base_bounds(),
        };
        self.lp.solve(&program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SimplexLpSolver;

    fn matrices() -> (DataMatrix, DataMatrix) {
        (
            DataMatrix::try_new(
                "input",
                vec![vec![1.0, 1.0], vec![1.0, 0.5], vec![0.5, 1.0]],
            )
            .unwrap(),
            DataMatrix::try_new(
                "output",
                vec![vec![1.0, 1.0], vec![0.5, 0.5], vec![0.8, 0.6]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn self_efficiency_stays_in_unit_interval() {
        let (inputs, outputs) = matrices();
        let lp = SimplexLpSolver::new();
        let model = ChoquetModel::new(&lp, 0.5);
        for i in 0..3 {
            let score = model.self_efficiency(&inputs, &outputs, i).unwrap();
            assert!(
                score.efficiency >= 0.0 && score.efficiency <= 1.0,
                "DMU {} scored {}",
                i,
                score.efficiency
            );
        }
    }

    #[test]
    fn dominant_dmu_reaches_the_frontier() {
        let (inputs, outputs) = matrices();
        let lp = SimplexLpSolver::new();
        let model = ChoquetModel::new(&lp, 0.5);
        // DMU 0 produces the most of both outputs.
        let score = model.self_efficiency(&inputs, &outputs, 0).unwrap();
        assert!((score.efficiency - 1.0).abs() < 1e-5);
    }

    #[test]
    fn interaction_weights_respect_their_box() {
        let (inputs, outputs) = matrices();
        let lp = SimplexLpSolver::new();
        let model = ChoquetModel::new(&lp, 0.5);
        let score = model.self_efficiency(&inputs, &outputs, 1).unwrap();
        for pair in score.input.interactions.pairs().collect::<Vec<_>>() {
            let v = score.input.interactions.get(pair);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn target_bounds_bracket_and_order() {
        let (inputs, outputs) = matrices();
        let lp = SimplexLpSolver::new();
        let model = ChoquetModel::new(&lp, 0.5);
        let e0 = model.self_efficiency(&inputs, &outputs, 0).unwrap().efficiency;
        let max = model
            .target_bound(&inputs, &outputs, 0, 1, e0, Direction::Maximize)
            .unwrap();
        let min = model
            .target_bound(&inputs, &outputs, 0, 1, e0, Direction::Minimize)
            .unwrap();
        assert!(min <= max + 1e-9);
        assert!(max <= 1.0 + 1e-6);
    }

    #[test]
    fn satisfaction_feasible_at_zero_floors() {
        let (inputs, outputs) = matrices();
        let lp = SimplexLpSolver::new();
        let model = ChoquetModel::new(&lp, 0.5);
        let e0 = model.self_efficiency(&inputs, &outputs, 0).unwrap().efficiency;
        assert!(model.satisfaction_feasible(&inputs, &outputs, 0, e0, &[(1, 0.0), (2, 0.0)]));
    }

    #[test]
    fn satisfaction_infeasible_above_frontier() {
        let (inputs, outputs) = matrices();
        let lp = SimplexLpSolver::new();
        let model = ChoquetModel::new(&lp, 0.5);
        let e0 = model.self_efficiency(&inputs, &outputs, 0).unwrap().efficiency;
        // DMU 1 is strictly dominated; a floor of 1.2 exceeds any frontier.
        assert!(!model.satisfaction_feasible(&inputs, &outputs, 0, e0, &[(1, 1.2)]));
    }

    #[test]
    fn pairs_containing_enumerates_membership() {
        assert_eq!(pairs_containing(3, 0), vec![0, 1]);
        assert_eq!(pairs_containing(3, 1), vec![0, 2]);
        assert_eq!(pairs_containing(3, 2), vec![1, 2]);
        assert!(pairs_containing(1, 0).is_empty());
    }
}
