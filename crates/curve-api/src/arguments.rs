use {
    std::{
        fmt::{self, Display, Formatter},
        net::SocketAddr,
        path::PathBuf,
    },
    url::Url,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(long, env, default_value = "warn,curve_api=debug,manifest=debug,tower_http=debug")]
    pub log_filter: String,

    /// Emit log lines as JSON objects.
    #[clap(long, env)]
    pub use_json_logs: bool,

    #[clap(long, env, default_value = "0.0.0.0:3000")]
    pub bind_address: SocketAddr,

    /// Node the deployed curves are read from.
    #[clap(long, env, default_value = "http://127.0.0.1:8545")]
    pub node_url: Url,

    #[clap(long, env, default_value = "contracts/curves.json")]
    pub discovery_manifest: PathBuf,

    #[clap(long, env, default_value = "deployments/anvil-deployment.json")]
    pub deployment_manifest: PathBuf,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            log_filter,
            use_json_logs,
            bind_address,
            node_url,
            discovery_manifest,
            deployment_manifest,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        writeln!(f, "bind_address: {bind_address}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "discovery_manifest: {}", discovery_manifest.display())?;
        writeln!(f, "deployment_manifest: {}", deployment_manifest.display())
    }
}
