//! Runtime resolution of curve ids to deployed contracts.

use {
    crate::{ConstructorArg, DeploymentManifest, DiscoveryManifest},
    alloy::primitives::Address,
    anyhow::Result,
    std::path::Path,
};

/// A curve as seen by the query layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Curve {
    pub id: u64,
    pub name: String,
    /// Address of the deployed mirror that queries are sent to.
    pub address: Address,
    /// Address of the curve on the chain it was discovered on.
    pub origin: Address,
    pub constructor_args: Vec<ConstructorArg>,
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum LookupError {
    #[error("Curve with ID {0} not found")]
    NotFound(u64),
}

/// Read-only view over both manifests, built once at startup.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    curves: Vec<Curve>,
}

impl Registry {
    /// Joins discovery records with their deployment records by name.
    /// Discovered curves that were never deployed are not resolvable.
    pub fn new(discovery: DiscoveryManifest, deployment: &DeploymentManifest) -> Self {
        let curves = discovery
            .curves
            .into_iter()
            .filter_map(|registration| {
                let Some(record) = deployment.get(&registration.name) else {
                    tracing::warn!(
                        id = registration.id,
                        name = %registration.name,
                        "curve has no deployment record"
                    );
                    return None;
                };
                Some(Curve {
                    id: registration.id,
                    name: registration.name,
                    address: record.address,
                    origin: registration.address,
                    constructor_args: registration.constructor_args,
                })
            })
            .collect();
        Self { curves }
    }

    /// Loads both manifests from disk.
    pub fn load(discovery: &Path, deployment: &Path) -> Result<Self> {
        let registry = Self::new(crate::load(discovery)?, &crate::load(deployment)?);
        tracing::info!(curves = registry.curves.len(), "loaded curve registry");
        Ok(registry)
    }

    /// Linear scan; registries hold tens of curves.
    pub fn resolve(&self, id: u64) -> Result<&Curve, LookupError> {
        self.curves
            .iter()
            .find(|curve| curve.id == id)
            .ok_or(LookupError::NotFound(id))
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{CurveRegistration, DeploymentRecord},
        chrono::Utc,
        maplit::btreemap,
    };

    fn registration(id: u64, name: &str) -> CurveRegistration {
        CurveRegistration {
            id,
            address: Address::repeat_byte(id as u8),
            name: name.to_string(),
            source_files: vec![format!("{name}.sol")],
            constructor_args: vec![ConstructorArg::new("uint256", "42")],
        }
    }

    fn record(id: u64, name: &str, address: Address) -> DeploymentRecord {
        DeploymentRecord {
            id,
            name: name.to_string(),
            address,
            network: "anvil".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn resolves_deployed_address() {
        let deployed = Address::repeat_byte(0xdd);
        let registry = Registry::new(
            DiscoveryManifest {
                curves: vec![registration(1, "LinearCurve")],
            },
            &DeploymentManifest {
                curves: btreemap! {
                    "LinearCurve".to_string() => record(1, "LinearCurve", deployed),
                },
            },
        );

        let curve = registry.resolve(1).unwrap();
        assert_eq!(curve.address, deployed);
        assert_eq!(curve.origin, Address::repeat_byte(1));
        assert_eq!(curve.constructor_args, vec![ConstructorArg::new("uint256", "42")]);
    }

    #[test]
    fn undeployed_and_unknown_curves_are_misses() {
        let registry = Registry::new(
            DiscoveryManifest {
                curves: vec![registration(1, "LinearCurve"), registration(2, "ProgressiveCurve")],
            },
            &DeploymentManifest {
                curves: btreemap! {
                    "LinearCurve".to_string() => record(1, "LinearCurve", Address::ZERO),
                },
            },
        );

        assert_eq!(registry.curves().len(), 1);
        assert_eq!(registry.resolve(2), Err(LookupError::NotFound(2)));
        assert_eq!(registry.resolve(7), Err(LookupError::NotFound(7)));
        assert_eq!(
            LookupError::NotFound(7).to_string(),
            "Curve with ID 7 not found"
        );
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = dir.path().join("curves.json");
        let deployment = dir.path().join("deployment.json");
        crate::store(
            &discovery,
            &DiscoveryManifest {
                curves: vec![registration(3, "OffsetCurve")],
            },
        )
        .unwrap();
        let mut deployed = DeploymentManifest::default();
        deployed.insert(record(3, "OffsetCurve", Address::repeat_byte(0x33)));
        crate::store(&deployment, &deployed).unwrap();

        let registry = Registry::load(&discovery, &deployment).unwrap();
        assert_eq!(
            registry.resolve(3).unwrap().address,
            deployed.get("OffsetCurve").unwrap().address
        );
    }
}
