use std::fmt;

use crate::model::Side;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Options validation error (zero budget, etc.).
    ConfigValidation(String),
    /// A cluster's value is not a collection of item identifiers.
    InvalidPartitionValue { side: Side, key: String, reason: String },
    /// The same item appears under two different keys in one partition.
    DuplicateItemAcrossClusters {
        side: Side,
        item: String,
        first_key: String,
        second_key: String,
    },
    /// The assignment solver exhausted its iteration budget on a subproblem.
    SolverNonConvergence { budget: usize, agents: usize, tasks: usize },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "options parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "options validation error: {msg}"),
            Self::InvalidPartitionValue { side, key, reason } => {
                write!(f, "{side} partition, cluster '{key}': {reason}")
            }
            Self::DuplicateItemAcrossClusters { side, item, first_key, second_key } => {
                write!(
                    f,
                    "{side} partition: item {item} appears under both {first_key} and {second_key}"
                )
            }
            Self::SolverNonConvergence { budget, agents, tasks } => {
                write!(
                    f,
                    "assignment solver did not converge within {budget} iteration(s) \
                     ({agents} agents x {tasks} tasks)"
                )
            }
        }
    }
}

impl std::error::Error for ReconError {}
