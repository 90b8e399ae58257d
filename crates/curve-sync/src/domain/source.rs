use {alloy::json_abi::JsonAbi, std::collections::BTreeMap};

/// What the verification service knows about a contract address.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceLookup {
    Verified(VerifiedSource),
    /// The service answered but has no usable source. `status` and `message`
    /// are kept verbatim for the logs.
    NotVerified { status: String, message: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VerifiedSource {
    /// Empty when the service did not report a name.
    pub contract_name: String,
    pub abi: JsonAbi,
    /// Hex encoded ABI constructor arguments, with or without `0x`.
    pub constructor_arguments: String,
    pub source: Source,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Source {
    /// A single self-contained file.
    Single(String),
    /// Multiple files keyed by their path relative to the project root.
    Bundle(Bundle),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bundle {
    pub files: BTreeMap<String, String>,
    /// Compiler import remappings, e.g. `@openzeppelin/=lib/openzeppelin/`.
    pub remappings: Vec<String>,
}
