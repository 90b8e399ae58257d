use {
    crate::domain::CurveReading,
    manifest::Registry,
    std::{future::Future, net::SocketAddr, sync::Arc},
};

mod error;
mod routes;

pub use error::Error;

pub struct Api {
    pub registry: Registry,
    pub reader: Arc<dyn CurveReading>,
    pub addr: SocketAddr,
}

impl Api {
    /// Serves until `shutdown` resolves, then finishes in-flight requests.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), hyper::Error> {
        let app = router(State::new(self.registry, self.reader));
        let server = axum::Server::try_bind(&self.addr)?.serve(app.into_make_service());
        tracing::info!(addr = %server.local_addr(), "serving curve api");
        server.with_graceful_shutdown(shutdown).await
    }
}

fn router(state: State) -> axum::Router {
    let router = axum::Router::new();
    let router = routes::healthz(router);
    let router = routes::parameters(router);
    let router = routes::name(router);
    let router = routes::quotes(router);
    router
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Clone)]
struct State(Arc<Inner>);

struct Inner {
    registry: Registry,
    reader: Arc<dyn CurveReading>,
}

impl State {
    fn new(registry: Registry, reader: Arc<dyn CurveReading>) -> Self {
        Self(Arc::new(Inner { registry, reader }))
    }

    fn registry(&self) -> &Registry {
        &self.0.registry
    }

    fn reader(&self) -> &dyn CurveReading {
        self.0.reader.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{MockCurveReading, Query},
        alloy::primitives::{Address, U256},
        axum::http::{Request, StatusCode},
        manifest::{
            ConstructorArg,
            CurveRegistration,
            DeploymentManifest,
            DeploymentRecord,
            DiscoveryManifest,
        },
        mockall::predicate::eq,
        serde_json::{Value, json},
        tower::ServiceExt,
    };

    fn deployed() -> Address {
        Address::repeat_byte(0xd1)
    }

    fn registry() -> Registry {
        let mut deployment = DeploymentManifest::default();
        deployment.insert(DeploymentRecord {
            id: 1,
            name: "LinearCurve".to_string(),
            address: deployed(),
            network: "anvil".to_string(),
            timestamp: chrono::Utc::now(),
        });
        Registry::new(
            DiscoveryManifest {
                curves: vec![
                    CurveRegistration {
                        id: 1,
                        address: Address::repeat_byte(0x01),
                        name: "LinearCurve".to_string(),
                        source_files: vec!["LinearCurve.sol".to_string()],
                        constructor_args: vec![ConstructorArg::new(
                            "uint256",
                            "1000000000000000000",
                        )],
                    },
                    CurveRegistration {
                        id: 2,
                        address: Address::repeat_byte(0x02),
                        name: "OffsetCurve".to_string(),
                        source_files: vec!["OffsetCurve.sol".to_string()],
                        constructor_args: vec![],
                    },
                ],
            },
            &deployment,
        )
    }

    async fn get(reader: MockCurveReading, uri: &str) -> (StatusCode, Value) {
        let response = router(State::new(registry(), Arc::new(reader)))
            .oneshot(Request::builder().uri(uri).body(hyper::Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| {
            Value::String(String::from_utf8(body.to_vec()).unwrap())
        });
        (status, body)
    }

    #[tokio::test]
    async fn health_check() {
        assert_eq!(
            get(MockCurveReading::new(), "/").await,
            (StatusCode::OK, Value::String("ok".to_string()))
        );
    }

    #[tokio::test]
    async fn parameters_use_deployed_address() {
        let (status, body) = get(MockCurveReading::new(), "/parameters/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": 1,
                "name": "LinearCurve",
                "address": format!("{:#x}", deployed()),
                "constructorArgs": [{ "type": "uint256", "value": "1000000000000000000" }],
            })
        );
    }

    #[tokio::test]
    async fn undeployed_and_unknown_curves_are_not_found() {
        let mut reader = MockCurveReading::new();
        reader.expect_quote().never();
        reader.expect_name().never();

        let (status, body) = get(reader, "/maxShares/2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Curve with ID 2 not found" }));

        let (status, _) = get(MockCurveReading::new(), "/parameters/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn current_price() {
        let mut reader = MockCurveReading::new();
        reader
            .expect_quote()
            .with(
                eq(deployed()),
                eq(Query::CurrentPrice {
                    total_shares: U256::from(1000),
                }),
            )
            .returning(|_, _| Ok(U256::from(1_000_000_000_000_000_000u128)));

        let (status, body) = get(reader, "/currentPrice/1/1000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "price": "1000000000000000000" }));
    }

    #[tokio::test]
    async fn path_segments_map_to_call_arguments() {
        let mut reader = MockCurveReading::new();
        reader
            .expect_quote()
            .with(
                eq(deployed()),
                eq(Query::PreviewRedeem {
                    shares: U256::from(10),
                    total_shares: U256::from(20),
                    total_assets: U256::from(30),
                }),
            )
            .returning(|_, _| Ok(U256::from(5)));
        reader
            .expect_quote()
            .with(
                eq(deployed()),
                eq(Query::ConvertToShares {
                    assets: U256::from(10),
                    total_assets: U256::from(20),
                    total_shares: U256::from(30),
                }),
            )
            .returning(|_, _| Ok(U256::from(15)));
        let reader = Arc::new(reader);
        let app = router(State::new(registry(), reader));

        for (uri, expected) in [
            ("/previewRedeem/1/10/20/30", json!({ "assets": "5" })),
            ("/convertToShares/1/10/20/30", json!({ "shares": "15" })),
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(hyper::Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
            assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn name_is_read_from_chain() {
        let mut reader = MockCurveReading::new();
        reader
            .expect_name()
            .with(eq(deployed()))
            .returning(|_| Ok("Linear Curve".to_string()));
        assert_eq!(
            get(reader, "/name/1").await,
            (StatusCode::OK, json!({ "name": "Linear Curve" }))
        );
    }

    #[tokio::test]
    async fn malformed_amounts_are_rejected() {
        let mut reader = MockCurveReading::new();
        reader.expect_quote().never();

        let (status, body) = get(reader, "/previewDeposit/1/-5/0/0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid assets"));

        let (status, _) = get(MockCurveReading::new(), "/maxAssets/one").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_chain_reads_are_bad_gateway() {
        let mut reader = MockCurveReading::new();
        reader
            .expect_quote()
            .returning(|_, _| Err(anyhow::anyhow!("execution reverted")));
        let (status, body) = get(reader, "/maxAssets/1").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("execution reverted"));
    }
}
