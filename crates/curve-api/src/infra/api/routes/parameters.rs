use {
    super::super::{Error, State},
    alloy::primitives::Address,
    manifest::ConstructorArg,
    serde::Serialize,
};

pub(in crate::infra::api) fn parameters(router: axum::Router<State>) -> axum::Router<State> {
    router.route("/parameters/:id", axum::routing::get(route))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    id: u64,
    name: String,
    address: Address,
    constructor_args: Vec<ConstructorArg>,
}

async fn route(
    state: axum::extract::State<State>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::Json<Response>, Error> {
    let curve = super::curve(&state, &id)?;
    Ok(axum::Json(Response {
        id: curve.id,
        name: curve.name.clone(),
        address: curve.address,
        constructor_args: curve.constructor_args.clone(),
    }))
}
