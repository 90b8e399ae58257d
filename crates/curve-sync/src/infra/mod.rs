pub mod chain;
pub mod explorer;
pub mod forge;
pub mod registry;

pub use {
    chain::Deployer,
    explorer::Explorer,
    forge::{Compiler, Forge},
    registry::Registry,
};
