//! Simplex LP adapter backed by the `minilp` crate.

use minilp::{ComparisonOp, OptimizationDirection, Problem};

use crate::ports::{
    Direction, LinearProgram, LinearProgramSolver, LpSolution, Relation, SolverFailure,
};

/// Stateless `LinearProgramSolver` implementation over `minilp`'s simplex.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplexLpSolver;

impl SimplexLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LinearProgramSolver for SimplexLpSolver {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverFailure> {
        let direction = match program.direction {
            Direction::Minimize => OptimizationDirection::Minimize,
            Direction::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        let variables: Vec<minilp::Variable> = program
            .bounds
            .iter()
            .enumerate()
            .map(|(i, bounds)| {
                let coefficient = program.objective.get(i).copied().unwrap_or(0.0);
                problem.add_var(coefficient, (bounds.lower, bounds.upper))
            })
            .collect();

        for constraint in &program.constraints {
            let terms: Vec<(minilp::Variable, f64)> = constraint
                .coefficients
                .iter()
                .enumerate()
                .filter(|(_, c)| **c != 0.0)
                .map(|(i, c)| (variables[i], *c))
                .collect();
            let op = match constraint.relation {
                Relation::Equal => ComparisonOp::Eq,
                Relation::LessOrEqual => ComparisonOp::Le,
                Relation::GreaterOrEqual => ComparisonOp::Ge,
            };
            problem.add_constraint(terms.as_slice(), op, constraint.rhs);
        }

        match problem.solve() {
            Ok(solution) => Ok(LpSolution {
                objective_value: solution.objective(),
                variables: variables.iter().map(|v| solution[*v]).collect(),
            }),
            Err(minilp::Error::Infeasible) => {
                Err(SolverFailure::Infeasible("simplex: infeasible".into()))
            }
            Err(minilp::Error::Unbounded) => {
                Err(SolverFailure::Unbounded("simplex: unbounded".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{LinearConstraint, VariableBounds};

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-7, "{} != {}", a, b);
    }

    #[test]
    fn solves_small_maximization() {
        // max 3x + 2y s.t. x + y <= 4, x <= 2, x,y >= 0 => x=2, y=2, obj=10.
        let program = LinearProgram {
            direction: Direction::Maximize,
            objective: vec![3.0, 2.0],
            constraints: vec![
                LinearConstraint::less_equal(vec![1.0, 1.0], 4.0),
                LinearConstraint::less_equal(vec![1.0, 0.0], 2.0),
            ],
            bounds: vec![VariableBounds::non_negative(), VariableBounds::non_negative()],
        };
        let solution = SimplexLpSolver::new().solve(&program).unwrap();
        approx(solution.objective_value, 10.0);
        approx(solution.variables[0], 2.0);
        approx(solution.variables[1], 2.0);
    }

    #[test]
    fn solves_equality_constrained_minimization() {
        // min x + 2y s.t. x + y = 1, x,y >= 0 => x=1, y=0, obj=1.
        let program = LinearProgram {
            direction: Direction::Minimize,
            objective: vec![1.0, 2.0],
            constraints: vec![LinearConstraint::equality(vec![1.0, 1.0], 1.0)],
            bounds: vec![VariableBounds::non_negative(), VariableBounds::non_negative()],
        };
        let solution = SimplexLpSolver::new().solve(&program).unwrap();
        approx(solution.objective_value, 1.0);
        approx(solution.variables[0], 1.0);
    }

    #[test]
    fn reports_infeasibility() {
        // x >= 2 and x <= 1 cannot both hold.
        let program = LinearProgram {
            direction: Direction::Maximize,
            objective: vec![1.0],
            constraints: vec![
                LinearConstraint::greater_equal(vec![1.0], 2.0),
                LinearConstraint::less_equal(vec![1.0], 1.0),
            ],
            bounds: vec![VariableBounds::non_negative()],
        };
        let result = SimplexLpSolver::new().solve(&program);
        assert!(matches!(result, Err(SolverFailure::Infeasible(_))));
    }

    #[test]
    fn reports_unboundedness() {
        let program = LinearProgram {
            direction: Direction::Maximize,
            objective: vec![1.0],
            constraints: vec![],
            bounds: vec![VariableBounds::non_negative()],
        };
        let result = SimplexLpSolver::new().solve(&program);
        assert!(matches!(result, Err(SolverFailure::Unbounded(_))));
    }
}
