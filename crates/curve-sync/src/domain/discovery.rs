//! The discovery stage: enumerate the registry, retrieve every curve's
//! verified source and record what is needed to redeploy it.

use {
    super::{
        constructor,
        error::CurveError,
        reconstruct::Reconstructor,
        source::SourceLookup,
    },
    alloy::primitives::Address,
    anyhow::{Context, Result},
    manifest::{CurveRegistration, DiscoveryManifest},
    std::time::Duration,
    tracing::Instrument,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RegistryReading: Send + Sync {
    /// All registered curves as `(index, address)` pairs, 1-based and in
    /// registry order.
    async fn curves(&self) -> Result<Vec<(u64, Address)>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SourceFetching: Send + Sync {
    /// Errors are transport level failures. A service that answers without a
    /// verified source yields [`SourceLookup::NotVerified`].
    async fn fetch_source(&self, address: Address) -> Result<SourceLookup>;
}

pub struct Discovery<'a> {
    pub registry: &'a dyn RegistryReading,
    pub explorer: &'a dyn SourceFetching,
    pub reconstructor: Reconstructor<'a>,
    /// Pause after every source request to stay below the service's rate
    /// limit.
    pub request_delay: Duration,
}

impl Discovery<'_> {
    /// Runs discovery for all registered curves, one at a time.
    ///
    /// Only a failure to enumerate the registry is returned as an error.
    /// Curves that cannot be discovered are logged and left out.
    pub async fn run(&self) -> Result<DiscoveryManifest> {
        let curves = self
            .registry
            .curves()
            .await
            .context("failed to enumerate registered curves")?;
        tracing::info!(count = curves.len(), "found registered curves");

        let mut manifest = DiscoveryManifest::default();
        for (id, address) in curves {
            let span = tracing::info_span!("curve", id, %address);
            match self.discover(id, address, &manifest).instrument(span.clone()).await {
                Ok(curve) => manifest.curves.push(curve),
                Err(err) => span.in_scope(|| err.log()),
            }
            tokio::time::sleep(self.request_delay).await;
        }

        tracing::info!(discovered = manifest.curves.len(), "discovery finished");
        Ok(manifest)
    }

    async fn discover(
        &self,
        id: u64,
        address: Address,
        discovered: &DiscoveryManifest,
    ) -> Result<CurveRegistration, CurveError> {
        tracing::info!("fetching source code");
        let verified = match self
            .explorer
            .fetch_source(address)
            .await
            .map_err(CurveError::Lookup)?
        {
            SourceLookup::Verified(verified) => verified,
            SourceLookup::NotVerified { status, message } => {
                return Err(CurveError::Unverified { status, message });
            }
        };

        let name = if verified.contract_name.is_empty() {
            format!("Curve{id}")
        } else {
            verified.contract_name.clone()
        };
        if discovered.curves.iter().any(|curve| curve.name == name) {
            return Err(CurveError::DuplicateName(name));
        }

        let constructor_args =
            constructor::decode(&verified.constructor_arguments, &verified.abi);
        if constructor_args.len() != constructor::parameter_count(&verified.abi) {
            return Err(CurveError::UndecodableArguments);
        }

        let source_files = self.reconstructor.reconstruct(&name, &verified.source).await?;
        tracing::info!(%name, arguments = constructor_args.len(), "discovered curve");
        Ok(CurveRegistration {
            id,
            address,
            name,
            source_files,
            constructor_args,
        })
    }
}
