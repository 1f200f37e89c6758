//! Sequential-linear-programming adapter for the NLP port.
//!
//! Minimizes a smooth objective over linear constraints by repeatedly
//! linearizing the objective with forward finite differences and solving
//! a trust-region LP subproblem through the wrapped `LinearProgramSolver`.
//! Deterministic for a given problem, and sufficient for the power-law
//! objectives this crate produces, which are monotone in each deviation
//! variable and attain their constrained minima at subproblem vertices.

use crate::ports::{
    Direction, LinearConstraint, LinearProgram, LinearProgramSolver, NlpSolution,
    NonlinearProgram, NonlinearProgramSolver, SolverFailure, VariableBounds,
};

/// Tuning knobs for the SLP loop.
#[derive(Debug, Clone, Copy)]
pub struct SlpOptions {
    pub max_iterations: usize,
    pub initial_radius: f64,
    pub shrink: f64,
    pub expand: f64,
    pub max_radius: f64,
    pub radius_tolerance: f64,
    pub gradient_step: f64,
}

impl Default for SlpOptions {
    fn default() -> Self {
        Self {
            max_iterations: 40,
            initial_radius: 0.5,
            shrink: 0.5,
            expand: 2.0,
            max_radius: 64.0,
            radius_tolerance: 1e-7,
            gradient_step: 1e-8,
        }
    }
}

/// SLP minimizer layered on any LP backend.
#[derive(Debug, Clone)]
pub struct SlpSolver<S> {
    lp: S,
    options: SlpOptions,
}

impl<S: LinearProgramSolver> SlpSolver<S> {
    pub fn new(lp: S) -> Self {
        Self {
            lp,
            options: SlpOptions::default(),
        }
    }

    pub fn with_options(lp: S, options: SlpOptions) -> Self {
        Self { lp, options }
    }

    fn clamp_into_bounds(point: &mut [f64], bounds: &[VariableBounds]) {
        for (x, b) in point.iter_mut().zip(bounds) {
            *x = x.clamp(b.lower, b.upper);
        }
    }

    fn gradient(&self, program: &NonlinearProgram, point: &[f64], value: f64) -> Vec<f64> {
        let h = self.options.gradient_step;
        let mut grad = vec![0.0; point.len()];
        let mut probe = point.to_vec();
        for i in 0..point.len() {
            let step = h * (1.0 + point[i].abs());
            probe[i] = point[i] + step;
            grad[i] = ((program.objective)(&probe) - value) / step;
            probe[i] = point[i];
        }
        grad
    }

    /// LP subproblem: minimize `grad · y` over the original constraints
    /// intersected with the trust box around the current point.
    fn subproblem(
        &self,
        program: &NonlinearProgram,
        grad: &[f64],
        center: &[f64],
        radius: f64,
    ) -> Result<Vec<f64>, SolverFailure> {
        let bounds: Vec<VariableBounds> = program
            .bounds
            .iter()
            .zip(center)
            .map(|(b, &c)| {
                VariableBounds::between((c - radius).max(b.lower), (c + radius).min(b.upper))
            })
            .collect();
        let lp = LinearProgram {
            direction: Direction::Minimize,
            objective: grad.to_vec(),
            constraints: program.constraints.clone(),
            bounds,
        };
        self.lp.solve(&lp).map(|s| s.variables)
    }
}

fn satisfies(constraints: &[LinearConstraint], point: &[f64], tolerance: f64) -> bool {
    constraints.iter().all(|c| {
        let lhs: f64 = c
            .coefficients
            .iter()
            .zip(point)
            .map(|(a, x)| a * x)
            .sum();
        match c.relation {
            crate::ports::Relation::Equal => (lhs - c.rhs).abs() <= tolerance,
            crate::ports::Relation::LessOrEqual => lhs <= c.rhs + tolerance,
            crate::ports::Relation::GreaterOrEqual => lhs >= c.rhs - tolerance,
        }
    })
}

impl<S: LinearProgramSolver> NonlinearProgramSolver for SlpSolver<S> {
    fn minimize(&self, program: &NonlinearProgram) -> Result<NlpSolution, SolverFailure> {
        let opts = self.options;
        let mut current = program.initial_point.clone();
        Self::clamp_into_bounds(&mut current, &program.bounds);

        // The initial point is usually infeasible for the equality rows;
        // the first successful subproblem projects onto the feasible set.
        let mut feasible = satisfies(&program.constraints, &current, 1e-9);
        let mut current_value = (program.objective)(&current);
        let mut radius = opts.initial_radius;
        let mut recovery_attempts = 0usize;

        for _ in 0..opts.max_iterations {
            if radius < opts.radius_tolerance {
                break;
            }
            let grad = self.gradient(program, &current, current_value);
            match self.subproblem(program, &grad, &current, radius) {
                Ok(candidate) => {
                    let candidate_value = (program.objective)(&candidate);
                    if !feasible {
                        // First feasible point is always accepted.
                        current = candidate;
                        current_value = candidate_value;
                        feasible = true;
                    } else if candidate_value < current_value - 1e-12 {
                        current = candidate;
                        current_value = candidate_value;
                        radius = (radius * opts.expand).min(opts.max_radius);
                    } else {
                        radius *= opts.shrink;
                    }
                }
                Err(SolverFailure::Infeasible(message)) => {
                    if feasible {
                        // Trust box around a feasible point always contains it.
                        return Err(SolverFailure::Numerical(message));
                    }
                    // Grow the box until it reaches the feasible set.
                    radius = (radius * 4.0).min(opts.max_radius);
                    recovery_attempts += 1;
                    if recovery_attempts > 8 {
                        return Err(SolverFailure::Infeasible(message));
                    }
                }
                Err(other) => return Err(other),
            }
        }

        if !feasible {
            return Err(SolverFailure::Infeasible(
                "no feasible point found within the iteration budget".into(),
            ));
        }
        Ok(NlpSolution {
            variables: current,
            objective_value: current_value,
        })
    }
}
