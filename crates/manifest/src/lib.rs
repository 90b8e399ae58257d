//! The manifest files are the only hand-off between the discovery stage, the
//! deployment stage and the query API. This crate owns their schema, how they
//! are written to disk and how they are resolved at runtime.

pub mod deployment;
pub mod discovery;
mod persist;
pub mod registry;

pub use {
    deployment::{DeploymentManifest, DeploymentRecord},
    discovery::{ConstructorArg, CurveRegistration, DiscoveryManifest},
    persist::{load, store},
    registry::{Curve, LookupError, Registry},
};
