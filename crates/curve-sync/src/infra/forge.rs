//! Flattening and compilation through the `forge` command line tool.

use {
    crate::domain::{Artifact, Compiling, Flattening},
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    anyhow::{Context, Result, ensure},
    serde::Deserialize,
    std::{
        ffi::OsStr,
        fs,
        path::{Path, PathBuf},
    },
    tokio::process::Command,
};

#[derive(Clone, Debug)]
pub struct Forge {
    binary: PathBuf,
}

impl Forge {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Runs forge to completion and returns its standard output.
    async fn run<I, S>(&self, dir: Option<&Path>, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.binary);
        command.args(args).kill_on_drop(true);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        let output = command
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.binary.display()))?;
        ensure!(
            output.status.success(),
            "{} exited with {}: {}",
            self.binary.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim(),
        );
        String::from_utf8(output.stdout).context("forge output is not UTF-8")
    }
}

#[async_trait::async_trait]
impl Flattening for Forge {
    async fn flatten(&self, root: &Path, main: &Path) -> Result<String> {
        self.run(Some(root), [OsStr::new("flatten"), main.as_os_str()])
            .await
    }
}

/// Compiles flattened curve sources into an artifacts directory.
pub struct Compiler {
    forge: Forge,
    sources: PathBuf,
    artifacts: PathBuf,
}

impl Compiler {
    pub fn new(forge: Forge, sources: PathBuf, artifacts: PathBuf) -> Self {
        Self {
            forge,
            sources,
            artifacts,
        }
    }
}

#[async_trait::async_trait]
impl Compiling for Compiler {
    async fn compile(&self, name: &str) -> Result<Artifact> {
        let file = format!("{name}.sol");
        self.forge
            .run(
                None,
                [
                    OsStr::new("build"),
                    OsStr::new("--force"),
                    OsStr::new("--out"),
                    self.artifacts.as_os_str(),
                    self.sources.join(&file).as_os_str(),
                ],
            )
            .await?;
        read_artifact(&self.artifacts.join(&file).join(format!("{name}.json")))
    }
}

#[derive(Deserialize)]
struct ArtifactFile {
    abi: JsonAbi,
    bytecode: Bytecode,
}

#[derive(Deserialize)]
struct Bytecode {
    object: Bytes,
}

fn read_artifact(path: &Path) -> Result<Artifact> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("missing artifact {}", path.display()))?;
    let artifact = serde_json::from_str::<ArtifactFile>(&contents)
        .with_context(|| format!("invalid artifact {}", path.display()))?;
    ensure!(
        !artifact.bytecode.object.is_empty(),
        "{} has no creation bytecode",
        path.display()
    );
    Ok(Artifact {
        abi: artifact.abi,
        bytecode: artifact.bytecode.object,
    })
}
