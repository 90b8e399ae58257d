pub mod constructor;
pub mod deployment;
pub mod discovery;
pub mod error;
pub mod reconstruct;
pub mod source;

pub use {
    deployment::{Artifact, Compiling, ContractDeploying, Deployment},
    discovery::{Discovery, RegistryReading, SourceFetching},
    error::{CurveError, Severity},
    reconstruct::{Flattening, Reconstructor},
};
