use serde::Deserialize;

use crate::error::ReconError;

/// Per-call knobs for the reconciliation engine.
///
/// Everything the engine depends on arrives here explicitly; there is no
/// global state to configure.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchOptions {
    /// Iteration ceiling for the assignment solver, per subproblem.
    /// Exhausting it fails the whole call with `SolverNonConvergence`.
    #[serde(default = "default_solver_max_iterations")]
    pub solver_max_iterations: usize,
    /// Reject a partition where one item appears under two different keys.
    /// When off, such inputs are tolerated: the offending clusters simply
    /// land in the same subproblem and compete on overlap.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_solver_max_iterations() -> usize {
    5000
}

fn default_strict() -> bool {
    true
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            solver_max_iterations: default_solver_max_iterations(),
            strict: default_strict(),
        }
    }
}

impl MatchOptions {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let options: MatchOptions =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.solver_max_iterations == 0 {
            return Err(ReconError::ConfigValidation(
                "solver_max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
