//! Core types for thread forests and tallies.

pub mod node;
pub mod tally;

pub use node::{ContributorId, NodeLevel, ThreadNode, UserRecord};
pub use tally::ContributionTally;
