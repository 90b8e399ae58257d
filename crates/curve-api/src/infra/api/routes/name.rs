use {
    super::super::{Error, State},
    serde::Serialize,
};

pub(in crate::infra::api) fn name(router: axum::Router<State>) -> axum::Router<State> {
    router.route("/name/:id", axum::routing::get(route))
}

#[derive(Serialize)]
struct Response {
    name: String,
}

async fn route(
    state: axum::extract::State<State>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<Response>, Error> {
    let curve = super::curve(&state, &id)?;
    let name = state
        .reader()
        .name(curve.address)
        .await
        .map_err(Error::Chain)?;
    Ok(axum::Json(Response { name }))
}
