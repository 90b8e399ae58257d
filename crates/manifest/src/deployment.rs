use {
    alloy::primitives::Address,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// Output of the deployment stage, keyed by curve name.
///
/// Curves that failed to compile or deploy have no entry.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct DeploymentManifest {
    pub curves: BTreeMap<String, DeploymentRecord>,
}

impl DeploymentManifest {
    pub fn get(&self, name: &str) -> Option<&DeploymentRecord> {
        self.curves.get(name)
    }

    pub fn insert(&mut self, record: DeploymentRecord) {
        self.curves.insert(record.name.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct DeploymentRecord {
    /// Discovery id of the curve this instance was deployed from.
    pub id: u64,
    pub name: String,
    /// Address of the newly deployed instance on the target chain.
    pub address: Address,
    pub network: String,
    pub timestamp: DateTime<Utc>,
}
