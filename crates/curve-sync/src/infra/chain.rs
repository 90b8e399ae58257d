use {
    crate::domain::ContractDeploying,
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes},
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::types::TransactionRequest,
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result, ensure},
    url::Url,
};

pub fn provider(url: Url) -> DynProvider {
    ProviderBuilder::new().connect_http(url).erased()
}

/// Sends contract creation transactions from a single funded account.
pub struct Deployer {
    provider: DynProvider,
    from: Address,
}

impl Deployer {
    /// Without a private key the node is expected to have `account` unlocked
    /// and signs the transactions itself.
    pub fn new(url: Url, account: Address, private_key: Option<PrivateKeySigner>) -> Self {
        match private_key {
            Some(signer) => Self {
                from: signer.address(),
                provider: ProviderBuilder::new()
                    .wallet(signer)
                    .connect_http(url)
                    .erased(),
            },
            None => Self {
                provider: provider(url),
                from: account,
            },
        }
    }

    pub fn account(&self) -> Address {
        self.from
    }
}

#[async_trait::async_trait]
impl ContractDeploying for Deployer {
    async fn deploy(&self, code: Bytes) -> Result<Option<Address>> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(code);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("failed to send deployment transaction")?;
        tracing::info!(tx = %pending.tx_hash(), "sent deployment transaction");
        let receipt = pending
            .get_receipt()
            .await
            .context("failed to fetch deployment receipt")?;
        ensure!(
            receipt.status(),
            "deployment transaction {} reverted",
            receipt.transaction_hash
        );
        Ok(receipt.contract_address)
    }
}
