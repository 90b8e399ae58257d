use {
    crate::domain::source::{Bundle, Source, SourceLookup, VerifiedSource},
    alloy::json_abi::JsonAbi,
    anyhow::{Context, Result},
    serde::Deserialize,
    std::collections::BTreeMap,
};

/// Envelope of every explorer API response.
#[derive(Debug, Deserialize)]
pub struct Response {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: Outcome,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Contracts(Vec<Contract>),
    /// Error description, e.g. `Invalid API Key`.
    Message(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contract {
    #[serde(default)]
    pub source_code: String,
    #[serde(rename = "ABI", default)]
    pub abi: String,
    #[serde(default)]
    pub contract_name: String,
    #[serde(default)]
    pub constructor_arguments: String,
}

/// Longest part of a raw response kept in error messages.
const EXCERPT_LEN: usize = 512;

/// Leading part of `text`, cut at a character boundary.
fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl Response {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .with_context(|| format!("invalid source code response: {}", excerpt(body)))
    }

    pub fn into_domain(self) -> Result<SourceLookup> {
        let not_verified = |message: String| SourceLookup::NotVerified {
            status: self.status.clone(),
            message,
        };
        let contract = match self.result {
            Outcome::Message(detail) => {
                return Ok(not_verified(format!("{}: {detail}", self.message)));
            }
            Outcome::Contracts(_) if self.status != "1" => {
                return Ok(not_verified(self.message.clone()));
            }
            Outcome::Contracts(contracts) => match contracts.into_iter().next() {
                Some(contract) if !contract.source_code.trim().is_empty() => contract,
                _ => return Ok(not_verified(format!("{}: no source code", self.message))),
            },
        };

        let abi = serde_json::from_str::<JsonAbi>(&contract.abi)
            .with_context(|| format!("invalid contract ABI: {}", excerpt(&contract.abi)))?;
        let source = parse_source(&contract.source_code)?;
        Ok(SourceLookup::Verified(VerifiedSource {
            contract_name: contract.contract_name.trim().to_string(),
            abi,
            constructor_arguments: contract.constructor_arguments,
            source,
        }))
    }
}

/// Source files as they appear in standard JSON compiler input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceFiles {
    Standard {
        sources: BTreeMap<String, SourceFile>,
        #[serde(default)]
        settings: Settings,
    },
    /// Older multi-file submissions list the files at the top level.
    Legacy(BTreeMap<String, SourceFile>),
}

#[derive(Debug, Deserialize)]
struct SourceFile {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    remappings: Vec<String>,
}

/// Explorers return single files verbatim and standard JSON input wrapped in
/// an extra pair of braces.
fn parse_source(code: &str) -> Result<Source> {
    let trimmed = code.trim();
    let json = match trimmed.strip_prefix("{{").and_then(|s| s.strip_suffix("}}")) {
        Some(inner) => format!("{{{inner}}}"),
        None if trimmed.starts_with('{') => trimmed.to_string(),
        None => return Ok(Source::Single(code.to_string())),
    };
    let files = serde_json::from_str::<SourceFiles>(&json).context("invalid multi-file source")?;
    let (files, remappings) = match files {
        SourceFiles::Standard { sources, settings } => (sources, settings.remappings),
        SourceFiles::Legacy(files) => (files, Vec::new()),
    };
    Ok(Source::Bundle(Bundle {
        files: files
            .into_iter()
            .map(|(path, file)| (path, file.content))
            .collect(),
        remappings,
    }))
}
