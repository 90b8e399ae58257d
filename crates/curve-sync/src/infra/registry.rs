use {
    crate::domain::RegistryReading,
    alloy::{
        primitives::{Address, U256},
        providers::DynProvider,
    },
    anyhow::{Context, Result},
};

alloy::sol! {
    #[sol(rpc)]
    interface IMultiVault {
        function bondingCurveConfig() external view returns (address registry);
    }

    #[sol(rpc)]
    interface IBondingCurveRegistry {
        function count() external view returns (uint256);
        function curveAddresses(uint256 id) external view returns (address);
    }
}

/// Reads the bonding curve registry referenced by a vault contract.
pub struct Registry {
    provider: DynProvider,
    vault: Address,
}

impl Registry {
    pub fn new(provider: DynProvider, vault: Address) -> Self {
        Self { provider, vault }
    }
}

#[async_trait::async_trait]
impl RegistryReading for Registry {
    async fn curves(&self) -> Result<Vec<(u64, Address)>> {
        let registry = IMultiVault::new(self.vault, self.provider.clone())
            .bondingCurveConfig()
            .call()
            .await
            .with_context(|| format!("failed to read registry address from vault {}", self.vault))?;
        tracing::info!(%registry, "found curve registry");

        let registry = IBondingCurveRegistry::new(registry, self.provider.clone());
        let count = registry
            .count()
            .call()
            .await
            .context("failed to read curve count")?;
        let count = u64::try_from(count).context("curve count out of range")?;

        // Curve ids are 1-based.
        let mut curves = Vec::new();
        for id in 1..=count {
            let address = registry
                .curveAddresses(U256::from(id))
                .call()
                .await
                .with_context(|| format!("failed to read address of curve {id}"))?;
            curves.push((id, address));
        }
        Ok(curves)
    }
}
