use {
    crate::domain::{CurveReading, Query},
    alloy::{
        primitives::{Address, U256},
        providers::{DynProvider, Provider, ProviderBuilder},
    },
    anyhow::Result,
    url::Url,
};

alloy::sol! {
    #[sol(rpc)]
    interface IBondingCurve {
        function name() external view returns (string);
        function currentPrice(uint256 totalShares) external view returns (uint256 sharePrice);
        function maxShares() external view returns (uint256);
        function maxAssets() external view returns (uint256);
        function previewDeposit(uint256 assets, uint256 totalAssets, uint256 totalShares) external view returns (uint256 shares);
        function previewRedeem(uint256 shares, uint256 totalShares, uint256 totalAssets) external view returns (uint256 assets);
        function previewWithdraw(uint256 assets, uint256 totalAssets, uint256 totalShares) external view returns (uint256 shares);
        function previewMint(uint256 shares, uint256 totalShares, uint256 totalAssets) external view returns (uint256 assets);
        function convertToShares(uint256 assets, uint256 totalAssets, uint256 totalShares) external view returns (uint256 shares);
        function convertToAssets(uint256 shares, uint256 totalShares, uint256 totalAssets) external view returns (uint256 assets);
    }
}

/// Reads curves through `eth_call` on a node.
pub struct Node {
    provider: DynProvider,
}

impl Node {
    pub fn new(url: Url) -> Self {
        Self {
            provider: ProviderBuilder::new().connect_http(url).erased(),
        }
    }
}

#[async_trait::async_trait]
impl CurveReading for Node {
    async fn name(&self, curve: Address) -> Result<String> {
        Ok(IBondingCurve::new(curve, self.provider.clone())
            .name()
            .call()
            .await?)
    }

    async fn quote(&self, curve: Address, query: Query) -> Result<U256> {
        let curve = IBondingCurve::new(curve, self.provider.clone());
        let value = match query {
            Query::CurrentPrice { total_shares } => curve.currentPrice(total_shares).call().await?,
            Query::MaxShares => curve.maxShares().call().await?,
            Query::MaxAssets => curve.maxAssets().call().await?,
            Query::PreviewDeposit {
                assets,
                total_assets,
                total_shares,
            } => {
                curve
                    .previewDeposit(assets, total_assets, total_shares)
                    .call()
                    .await?
            }
            Query::PreviewRedeem {
                shares,
                total_shares,
                total_assets,
            } => {
                curve
                    .previewRedeem(shares, total_shares, total_assets)
                    .call()
                    .await?
            }
            Query::PreviewWithdraw {
                assets,
                total_assets,
                total_shares,
            } => {
                curve
                    .previewWithdraw(assets, total_assets, total_shares)
                    .call()
                    .await?
            }
            Query::PreviewMint {
                shares,
                total_shares,
                total_assets,
            } => {
                curve
                    .previewMint(shares, total_shares, total_assets)
                    .call()
                    .await?
            }
            Query::ConvertToShares {
                assets,
                total_assets,
                total_shares,
            } => {
                curve
                    .convertToShares(assets, total_assets, total_shares)
                    .call()
                    .await?
            }
            Query::ConvertToAssets {
                shares,
                total_shares,
                total_assets,
            } => {
                curve
                    .convertToAssets(shares, total_shares, total_assets)
                    .call()
                    .await?
            }
        };
        Ok(value)
    }
}
