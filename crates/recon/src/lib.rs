//! `clustermatch-recon` — cluster reconciliation engine.
//!
//! Matches two independently produced partitions ("before" and "after") of
//! the same universe of item identifiers: which before-cluster corresponds
//! to which after-cluster, which after-clusters are new, and which
//! before-clusters have disappeared.
//!
//! Pure engine crate: no IO, no globals. The pair is decomposed into
//! independent subproblems by shared-item connectivity, each solved as a
//! minimum-cost assignment over a principled overlap cost.

pub mod api;
pub mod assign;
pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod model;
pub mod subproblem;

pub use api::match_partitions_json;
pub use config::MatchOptions;
pub use engine::match_clusters;
pub use error::ReconError;
pub use model::{MatchResult, Partition, Side, Subproblem};
