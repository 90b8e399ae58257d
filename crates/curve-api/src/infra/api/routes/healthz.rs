use super::super::State;

pub(in crate::infra::api) fn healthz(router: axum::Router<State>) -> axum::Router<State> {
    router.route("/", axum::routing::get(route))
}

async fn route() -> &'static str {
    "ok"
}
