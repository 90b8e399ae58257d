//! The deployment stage: recompile every discovered curve and deploy a fresh
//! instance of it to the target chain.

use {
    super::{constructor, error::CurveError},
    alloy::{
        json_abi::JsonAbi,
        primitives::{Address, Bytes},
    },
    anyhow::Result,
    chrono::Utc,
    manifest::{CurveRegistration, DeploymentManifest, DeploymentRecord, DiscoveryManifest},
    tracing::Instrument,
};

/// Compiler output for a single contract.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Compiling: Send + Sync {
    /// Compiles the flattened source `<name>.sol`.
    async fn compile(&self, name: &str) -> Result<Artifact>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractDeploying: Send + Sync {
    /// Sends a contract creation transaction and waits for its receipt.
    /// Returns the receipt's contract address, if it has one.
    async fn deploy(&self, code: Bytes) -> Result<Option<Address>>;
}

pub struct Deployment<'a> {
    pub compiler: &'a dyn Compiling,
    pub deployer: &'a dyn ContractDeploying,
    /// Label recorded with every deployment.
    pub network: String,
}

impl Deployment<'_> {
    /// Deploys all curves in discovery order. Curves that fail are logged and
    /// have no record in the returned manifest.
    pub async fn run(&self, discovered: &DiscoveryManifest) -> DeploymentManifest {
        let mut manifest = DeploymentManifest::default();
        for curve in &discovered.curves {
            let span = tracing::info_span!("curve", id = curve.id, name = %curve.name);
            match self.deploy(curve).instrument(span.clone()).await {
                Ok(address) => manifest.insert(DeploymentRecord {
                    id: curve.id,
                    name: curve.name.clone(),
                    address,
                    network: self.network.clone(),
                    timestamp: Utc::now(),
                }),
                Err(err) => span.in_scope(|| err.log()),
            }
        }
        tracing::info!(
            deployed = manifest.len(),
            discovered = discovered.curves.len(),
            "deployment finished"
        );
        manifest
    }

    async fn deploy(&self, curve: &CurveRegistration) -> Result<Address, CurveError> {
        tracing::info!("compiling");
        let artifact = self
            .compiler
            .compile(&curve.name)
            .await
            .map_err(CurveError::Compilation)?;
        let arguments = constructor::encode(artifact.abi.constructor(), &curve.constructor_args)
            .map_err(CurveError::Arguments)?;
        let code = artifact
            .bytecode
            .iter()
            .copied()
            .chain(arguments)
            .collect::<Bytes>();

        tracing::info!("deploying");
        let address = self
            .deployer
            .deploy(code)
            .await
            .map_err(CurveError::Deployment)?
            .ok_or(CurveError::MissingContractAddress)?;
        tracing::info!(%address, "deployed curve");
        Ok(address)
    }
}
