use {
    alloy::primitives::Address,
    serde::{Deserialize, Serialize},
};

/// Output of the discovery stage: one record per registered curve whose
/// source could be retrieved and reconstructed.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct DiscoveryManifest {
    /// Ordered by `id`, which is the curve's index in the on-chain registry.
    pub curves: Vec<CurveRegistration>,
}

impl DiscoveryManifest {
    pub fn get(&self, id: u64) -> Option<&CurveRegistration> {
        self.curves.iter().find(|curve| curve.id == id)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurveRegistration {
    /// 1-based registry index.
    pub id: u64,
    /// Address of the original curve on the source chain.
    pub address: Address,
    /// Contract identifier, also the stem of the flattened source file.
    pub name: String,
    pub source_files: Vec<String>,
    pub constructor_args: Vec<ConstructorArg>,
}

/// A decoded constructor argument.
///
/// `value` is always a string; integers are written in decimal so that
/// 256-bit values survive JSON tooling that parses numbers as doubles.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct ConstructorArg {
    #[serde(rename = "type")]
    pub abi_type: String,
    pub value: String,
}

impl ConstructorArg {
    pub fn new(abi_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            abi_type: abi_type.into(),
            value: value.into(),
        }
    }
}
