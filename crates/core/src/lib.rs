//! Core types and policies for cloud-hunter
//!
//! The species catalogue, score/tier resolution, the discovery rule, repair
//! planning, rank progression and collection aggregates. Everything here is
//! pure; persistence and I/O live in the other crates.

mod achievement;
mod collection;
mod env_config;
mod error;
mod fingerprint;
mod observation;
mod rank;
mod repair;
mod resolver;
mod species;
mod tier;

pub use achievement::*;
pub use collection::*;
pub use env_config::*;
pub use error::*;
pub use fingerprint::*;
pub use observation::*;
pub use rank::*;
pub use repair::*;
pub use resolver::*;
pub use species::*;
pub use tier::*;
