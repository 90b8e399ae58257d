//! Read calls supported against deployed curves.

use {
    alloy::primitives::{Address, U256},
    anyhow::Result,
};

/// A pricing or conversion call with its arguments. All amounts are in the
/// curve's base units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Query {
    CurrentPrice {
        total_shares: U256,
    },
    MaxShares,
    MaxAssets,
    PreviewDeposit {
        assets: U256,
        total_assets: U256,
        total_shares: U256,
    },
    PreviewRedeem {
        shares: U256,
        total_shares: U256,
        total_assets: U256,
    },
    PreviewWithdraw {
        assets: U256,
        total_assets: U256,
        total_shares: U256,
    },
    PreviewMint {
        shares: U256,
        total_shares: U256,
        total_assets: U256,
    },
    ConvertToShares {
        assets: U256,
        total_assets: U256,
        total_shares: U256,
    },
    ConvertToAssets {
        shares: U256,
        total_shares: U256,
        total_assets: U256,
    },
}

impl Query {
    /// Name of the value the call returns.
    pub fn output(&self) -> &'static str {
        match self {
            Self::CurrentPrice { .. } => "price",
            Self::MaxShares => "maxShares",
            Self::MaxAssets => "maxAssets",
            Self::PreviewDeposit { .. }
            | Self::PreviewWithdraw { .. }
            | Self::ConvertToShares { .. } => "shares",
            Self::PreviewRedeem { .. } | Self::PreviewMint { .. } | Self::ConvertToAssets { .. } => {
                "assets"
            }
        }
    }
}

/// Read access to deployed curve contracts.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CurveReading: Send + Sync {
    async fn name(&self, curve: Address) -> Result<String>;

    async fn quote(&self, curve: Address, query: Query) -> Result<U256>;
}
