use {
    alloy::{primitives::Address, signers::local::PrivateKeySigner},
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

#[derive(clap::Parser)]
pub struct Logging {
    #[clap(long, env, default_value = "warn,curve_sync=debug,manifest=debug")]
    pub log_filter: String,

    /// Emit log lines as JSON objects.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

/// Enumerates the curve registry of a vault and retrieves the verified source
/// of every curve.
#[derive(clap::Parser)]
pub struct Discover {
    #[clap(flatten)]
    pub logging: Logging,

    /// RPC endpoint of the chain the vault is deployed on.
    #[clap(long, env)]
    pub node_url: Url,

    /// The vault whose bonding curve registry is enumerated.
    #[clap(long, env)]
    pub vault_address: Address,

    #[clap(long, env, default_value = "https://api-sepolia.basescan.org/api")]
    pub explorer_url: Url,

    #[clap(long, env)]
    pub explorer_api_key: String,

    /// Sent as `chainid` to explorers serving multiple chains.
    #[clap(long, env)]
    pub explorer_chain_id: Option<u64>,

    /// Pause after every explorer request.
    #[clap(long, env, default_value = "1s", value_parser = humantime::parse_duration)]
    pub request_delay: Duration,

    /// Where flattened curve sources are written.
    #[clap(long, env, default_value = "contracts")]
    pub contracts_dir: PathBuf,

    #[clap(long, env, default_value = "contracts/curves.json")]
    pub discovery_manifest: PathBuf,

    #[clap(long, env, default_value = "forge")]
    pub forge: PathBuf,
}

/// Deploys every discovered curve to a target chain.
#[derive(clap::Parser)]
pub struct Deploy {
    #[clap(flatten)]
    pub logging: Logging,

    #[clap(long, env, default_value = "http://127.0.0.1:8545")]
    pub node_url: Url,

    #[clap(long, env, default_value = "contracts")]
    pub contracts_dir: PathBuf,

    #[clap(long, env, default_value = "contracts/curves.json")]
    pub discovery_manifest: PathBuf,

    #[clap(long, env, default_value = "out")]
    pub artifacts_dir: PathBuf,

    #[clap(long, env, default_value = "deployments/anvil-deployment.json")]
    pub deployment_manifest: PathBuf,

    /// Label stored with every deployment record.
    #[clap(long, env, default_value = "anvil")]
    pub network: String,

    /// Unlocked account on the target node that sends the deployments.
    #[clap(long, env, default_value = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]
    pub deployer_account: Address,

    /// Sign locally with this key instead of using an unlocked account.
    #[clap(long, env)]
    pub deployer_private_key: Option<PrivateKeySigner>,

    #[clap(long, env, default_value = "forge")]
    pub forge: PathBuf,
}

impl Display for Logging {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "log_filter: {}", self.log_filter)?;
        writeln!(f, "use_json_logs: {}", self.use_json_logs)
    }
}

impl Display for Discover {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            logging,
            node_url,
            vault_address,
            explorer_url,
            explorer_api_key: _,
            explorer_chain_id,
            request_delay,
            contracts_dir,
            discovery_manifest,
            forge,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "vault_address: {vault_address}")?;
        writeln!(f, "explorer_url: {explorer_url}")?;
        writeln!(f, "explorer_api_key: SECRET")?;
        writeln!(f, "explorer_chain_id: {explorer_chain_id:?}")?;
        writeln!(f, "request_delay: {request_delay:?}")?;
        writeln!(f, "contracts_dir: {}", contracts_dir.display())?;
        writeln!(f, "discovery_manifest: {}", discovery_manifest.display())?;
        writeln!(f, "forge: {}", forge.display())
    }
}

impl Display for Deploy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            logging,
            node_url,
            contracts_dir,
            discovery_manifest,
            artifacts_dir,
            deployment_manifest,
            network,
            deployer_account,
            deployer_private_key,
            forge,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "contracts_dir: {}", contracts_dir.display())?;
        writeln!(f, "discovery_manifest: {}", discovery_manifest.display())?;
        writeln!(f, "artifacts_dir: {}", artifacts_dir.display())?;
        writeln!(f, "deployment_manifest: {}", deployment_manifest.display())?;
        writeln!(f, "network: {network}")?;
        match deployer_private_key {
            Some(signer) => writeln!(f, "deployer: {} (local key)", signer.address())?,
            None => writeln!(f, "deployer: {deployer_account} (unlocked)")?,
        }
        writeln!(f, "forge: {}", forge.display())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn secrets_are_not_displayed() {
        let args = Discover::try_parse_from([
            "discover-curves",
            "--node-url",
            "https://sepolia.base.org",
            "--vault-address",
            "0x1A6950807E33d5bC9975067e6D6b5Ea4cD661665",
            "--explorer-api-key",
            "ABCDEF123456",
        ])
        .unwrap();
        let shown = args.to_string();
        assert!(!shown.contains("ABCDEF123456"));
        assert!(shown.contains("request_delay: 1s"));
        assert!(shown.contains("discovery_manifest: contracts/curves.json"));

        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let args = Deploy::try_parse_from(["deploy-curves", "--deployer-private-key", key]).unwrap();
        let shown = args.to_string();
        assert!(!shown.contains(&key[2..]));
        assert!(shown.contains("deployer: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266 (local key)"));
        assert!(shown.contains("network: anvil"));
    }
}
