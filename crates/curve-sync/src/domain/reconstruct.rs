//! Turns retrieved sources into one standalone file per curve.

use {
    super::{
        error::CurveError,
        source::{Bundle, Source},
    },
    anyhow::{Context, Result},
    serde::Serialize,
    std::{
        collections::BTreeMap,
        fs,
        path::{Component, Path, PathBuf},
    },
};

/// An external tool that inlines all imports of a source file.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Flattening: Send + Sync {
    /// Flattens `main`, given relative to the project `root`, and returns the
    /// combined source.
    async fn flatten(&self, root: &Path, main: &Path) -> Result<String>;
}

pub struct Reconstructor<'a> {
    flattener: &'a dyn Flattening,
    output: &'a Path,
}

impl<'a> Reconstructor<'a> {
    pub fn new(flattener: &'a dyn Flattening, output: &'a Path) -> Self {
        Self { flattener, output }
    }

    /// Writes `<name>.sol` into the output directory and returns the names of
    /// the written files.
    pub async fn reconstruct(&self, name: &str, source: &Source) -> Result<Vec<String>, CurveError> {
        let contents = match source {
            Source::Single(code) => code.clone(),
            Source::Bundle(bundle) => self.flatten(name, bundle).await?,
        };

        let file_name = format!("{name}.sol");
        fs::create_dir_all(self.output)
            .and_then(|()| fs::write(self.output.join(&file_name), contents))
            .with_context(|| format!("{}/{file_name}", self.output.display()))
            .map_err(CurveError::Write)?;
        tracing::info!(file = %file_name, "saved source");
        Ok(vec![file_name])
    }

    async fn flatten(&self, name: &str, bundle: &Bundle) -> Result<String, CurveError> {
        let main = main_file(name, bundle)?;
        // Every curve gets its own project directory which is removed when
        // `workdir` is dropped, whichever way this function returns.
        let workdir = tempfile::Builder::new()
            .prefix(&format!("{name}-"))
            .tempdir()
            .map_err(|err| CurveError::Write(err.into()))?;
        materialize(workdir.path(), bundle)?;
        tracing::debug!(
            root = %workdir.path().display(),
            main = %main.display(),
            files = bundle.files.len(),
            "flattening source bundle"
        );
        self.flattener
            .flatten(workdir.path(), &main)
            .await
            .map_err(CurveError::Flatten)
    }
}

/// The file declaring the contract, i.e. `<name>.sol` anywhere in the bundle.
/// Among several such files the one containing `contract <name>` wins.
fn main_file(name: &str, bundle: &Bundle) -> Result<PathBuf, CurveError> {
    let candidates = bundle
        .files
        .iter()
        .filter(|(path, _)| Path::new(path).file_stem().is_some_and(|stem| stem == name))
        .collect::<Vec<_>>();
    let main = match candidates.as_slice() {
        [] => return Err(CurveError::MissingMainSource(name.to_string())),
        [(path, _)] => *path,
        _ => {
            let declaring = candidates
                .iter()
                .find(|(_, content)| declares_contract(content, name))
                .unwrap_or(&candidates[0]);
            tracing::warn!(
                candidates = ?candidates.iter().map(|(path, _)| path).collect::<Vec<_>>(),
                chosen = %declaring.0,
                "several files named after the contract"
            );
            declaring.0
        }
    };
    Ok(PathBuf::from(main))
}

fn declares_contract(content: &str, name: &str) -> bool {
    let needle = format!("contract {name}");
    content.match_indices(&needle).any(|(start, _)| {
        let before = content[..start].chars().next_back();
        let after = content[start + needle.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn materialize(root: &Path, bundle: &Bundle) -> Result<(), CurveError> {
    for (path, content) in &bundle.files {
        if !is_relative_inside(Path::new(path)) {
            return Err(CurveError::InvalidSourcePath(path.clone()));
        }
        let destination = root.join(path);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|err| CurveError::Write(err.into()))?;
        }
        fs::write(&destination, content).map_err(|err| CurveError::Write(err.into()))?;
    }
    write_build_config(root, &bundle.remappings).map_err(CurveError::Write)
}

fn is_relative_inside(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[derive(Serialize)]
struct BuildConfig<'a> {
    profile: BTreeMap<&'static str, Profile<'a>>,
}

#[derive(Serialize)]
struct Profile<'a> {
    src: &'static str,
    libs: Vec<String>,
    remappings: &'a [String],
}

/// Minimal `foundry.toml` so that imports resolve relative to `root`.
fn write_build_config(root: &Path, remappings: &[String]) -> Result<()> {
    let config = BuildConfig {
        profile: BTreeMap::from([(
            "default",
            Profile {
                src: ".",
                libs: Vec::new(),
                remappings,
            },
        )]),
    };
    fs::write(root.join("foundry.toml"), toml::to_string(&config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        maplit::btreemap,
        std::sync::{Arc, Mutex},
    };

    fn bundle() -> Bundle {
        Bundle {
            files: btreemap! {
                "src/LinearCurve.sol".to_string() => "import {BaseCurve} from \"./BaseCurve.sol\";".to_string(),
                "src/BaseCurve.sol".to_string() => "contract BaseCurve {}".to_string(),
                "lib/solady/src/utils/FixedPointMathLib.sol".to_string() => "library FixedPointMathLib {}".to_string(),
            },
            remappings: vec!["solady/=lib/solady/src/".to_string()],
        }
    }

    #[tokio::test]
    async fn single_file_is_written_as_is() {
        let output = tempfile::tempdir().unwrap();
        let mut flattener = MockFlattening::new();
        flattener.expect_flatten().never();

        let files = Reconstructor::new(&flattener, output.path())
            .reconstruct("LinearCurve", &Source::Single("contract LinearCurve {}".to_string()))
            .await
            .unwrap();

        assert_eq!(files, vec!["LinearCurve.sol".to_string()]);
        assert_eq!(
            fs::read_to_string(output.path().join("LinearCurve.sol")).unwrap(),
            "contract LinearCurve {}"
        );
    }

    #[tokio::test]
    async fn bundle_is_materialized_flattened_and_cleaned_up() {
        let output = tempfile::tempdir().unwrap();
        let workdir = Arc::new(Mutex::new(None));
        let mut flattener = MockFlattening::new();
        flattener
            .expect_flatten()
            .times(1)
            .withf(|_, main| Path::new(main) == Path::new("src/LinearCurve.sol"))
            .returning({
                let workdir = workdir.clone();
                move |root, _| {
                    for file in bundle().files.keys() {
                        assert!(root.join(file).is_file(), "{file} not materialized");
                    }
                    let config = fs::read_to_string(root.join("foundry.toml")).unwrap();
                    assert!(config.contains("solady/=lib/solady/src/"));
                    *workdir.lock().unwrap() = Some(root.to_path_buf());
                    Ok("// flattened".to_string())
                }
            });

        let files = Reconstructor::new(&flattener, output.path())
            .reconstruct("LinearCurve", &Source::Bundle(bundle()))
            .await
            .unwrap();

        assert_eq!(files, vec!["LinearCurve.sol".to_string()]);
        assert_eq!(
            fs::read_to_string(output.path().join("LinearCurve.sol")).unwrap(),
            "// flattened"
        );
        let workdir = workdir.lock().unwrap().clone().unwrap();
        assert!(!workdir.starts_with(output.path()));
        assert!(!workdir.exists());
    }

    #[tokio::test]
    async fn failed_flatten_leaves_nothing_behind() {
        let output = tempfile::tempdir().unwrap();
        let workdir = Arc::new(Mutex::new(None));
        let mut flattener = MockFlattening::new();
        flattener.expect_flatten().returning({
            let workdir = workdir.clone();
            move |root, _| {
                *workdir.lock().unwrap() = Some(root.to_path_buf());
                Err(anyhow::anyhow!("compiler version not found"))
            }
        });

        let err = Reconstructor::new(&flattener, output.path())
            .reconstruct("LinearCurve", &Source::Bundle(bundle()))
            .await
            .unwrap_err();

        assert!(matches!(err, CurveError::Flatten(_)));
        assert!(!workdir.lock().unwrap().clone().unwrap().exists());
        assert!(!output.path().join("LinearCurve.sol").exists());
    }

    #[tokio::test]
    async fn bundle_without_main_file_is_rejected() {
        let output = tempfile::tempdir().unwrap();
        let mut flattener = MockFlattening::new();
        flattener.expect_flatten().never();

        let err = Reconstructor::new(&flattener, output.path())
            .reconstruct("ProgressiveCurve", &Source::Bundle(bundle()))
            .await
            .unwrap_err();

        assert!(matches!(err, CurveError::MissingMainSource(name) if name == "ProgressiveCurve"));
    }

    #[tokio::test]
    async fn file_declaring_the_contract_is_preferred() {
        let output = tempfile::tempdir().unwrap();
        let mut bundle = bundle();
        bundle.files.insert(
            "lib/interfaces/LinearCurve.sol".to_string(),
            "interface ILinearCurve {}".to_string(),
        );
        bundle.files.insert(
            "src/LinearCurve.sol".to_string(),
            "abstract contract LinearCurveBase {}\ncontract LinearCurve is BaseCurve {}".to_string(),
        );
        let mut flattener = MockFlattening::new();
        flattener
            .expect_flatten()
            .times(1)
            .withf(|_, main| Path::new(main) == Path::new("src/LinearCurve.sol"))
            .returning(|_, _| Ok("// flattened".to_string()));

        Reconstructor::new(&flattener, output.path())
            .reconstruct("LinearCurve", &Source::Bundle(bundle))
            .await
            .unwrap();
    }

    #[test]
    fn contract_declaration_matches_whole_names() {
        assert!(declares_contract("contract LinearCurve {}", "LinearCurve"));
        assert!(declares_contract("abstract contract LinearCurve is A {}", "LinearCurve"));
        assert!(!declares_contract("contract LinearCurveV2 {}", "LinearCurve"));
        assert!(!declares_contract("subcontract LinearCurve {}", "LinearCurve"));
        assert!(!declares_contract("interface LinearCurve {}", "LinearCurve"));
    }

    #[tokio::test]
    async fn paths_escaping_the_bundle_are_rejected() {
        let output = tempfile::tempdir().unwrap();
        let mut flattener = MockFlattening::new();
        flattener.expect_flatten().never();
        let mut bundle = bundle();
        bundle
            .files
            .insert("../../etc/evil.sol".to_string(), String::new());

        let err = Reconstructor::new(&flattener, output.path())
            .reconstruct("LinearCurve", &Source::Bundle(bundle))
            .await
            .unwrap_err();

        assert!(matches!(err, CurveError::InvalidSourcePath(path) if path == "../../etc/evil.sol"));
    }

    #[test]
    fn only_relative_inner_paths_are_accepted() {
        assert!(is_relative_inside(Path::new("src/Curve.sol")));
        assert!(is_relative_inside(Path::new("./src/Curve.sol")));
        assert!(!is_relative_inside(Path::new("/src/Curve.sol")));
        assert!(!is_relative_inside(Path::new("src/../../Curve.sol")));
        assert!(!is_relative_inside(Path::new("")));
    }
}
