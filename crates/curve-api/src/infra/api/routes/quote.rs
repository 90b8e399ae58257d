use {
    super::{
        super::{Error, State},
        amount,
    },
    crate::domain::Query,
    axum::{
        Json,
        extract::{self, Path},
        routing::get,
    },
    std::collections::BTreeMap,
    tracing::Instrument,
};

/// Pricing and conversion calls, one route per curve function.
pub(in crate::infra::api) fn quotes(router: axum::Router<State>) -> axum::Router<State> {
    router
        .route("/currentPrice/:id/:shares", get(current_price))
        .route("/maxShares/:id", get(max_shares))
        .route("/maxAssets/:id", get(max_assets))
        .route(
            "/previewDeposit/:id/:assets/:totalAssets/:totalShares",
            get(preview_deposit),
        )
        .route(
            "/previewRedeem/:id/:shares/:totalShares/:totalAssets",
            get(preview_redeem),
        )
        .route(
            "/previewWithdraw/:id/:assets/:totalAssets/:totalShares",
            get(preview_withdraw),
        )
        .route(
            "/previewMint/:id/:shares/:totalShares/:totalAssets",
            get(preview_mint),
        )
        .route(
            "/convertToShares/:id/:assets/:totalAssets/:totalShares",
            get(convert_to_shares),
        )
        .route(
            "/convertToAssets/:id/:shares/:totalShares/:totalAssets",
            get(convert_to_assets),
        )
}

type Response = Result<Json<BTreeMap<&'static str, String>>, Error>;

async fn quote(state: &State, id: &str, query: Query) -> Response {
    let curve = super::curve(state, id)?;
    let value = state
        .reader()
        .quote(curve.address, query)
        .instrument(tracing::debug_span!("quote", curve = curve.id, ?query))
        .await
        .map_err(Error::Chain)?;
    Ok(Json(BTreeMap::from([(query.output(), value.to_string())])))
}

async fn current_price(
    state: extract::State<State>,
    Path((id, shares)): Path<(String, String)>,
) -> Response {
    let total_shares = amount("shares", &shares)?;
    quote(&state, &id, Query::CurrentPrice { total_shares }).await
}

async fn max_shares(state: extract::State<State>, Path(id): Path<String>) -> Response {
    quote(&state, &id, Query::MaxShares).await
}

async fn max_assets(state: extract::State<State>, Path(id): Path<String>) -> Response {
    quote(&state, &id, Query::MaxAssets).await
}

async fn preview_deposit(
    state: extract::State<State>,
    Path((id, assets, total_assets, total_shares)): Path<(String, String, String, String)>,
) -> Response {
    let query = Query::PreviewDeposit {
        assets: amount("assets", &assets)?,
        total_assets: amount("totalAssets", &total_assets)?,
        total_shares: amount("totalShares", &total_shares)?,
    };
    quote(&state, &id, query).await
}

async fn preview_redeem(
    state: extract::State<State>,
    Path((id, shares, total_shares, total_assets)): Path<(String, String, String, String)>,
) -> Response {
    let query = Query::PreviewRedeem {
        shares: amount("shares", &shares)?,
        total_shares: amount("totalShares", &total_shares)?,
        total_assets: amount("totalAssets", &total_assets)?,
    };
    quote(&state, &id, query).await
}

async fn preview_withdraw(
    state: extract::State<State>,
    Path((id, assets, total_assets, total_shares)): Path<(String, String, String, String)>,
) -> Response {
    let query = Query::PreviewWithdraw {
        assets: amount("assets", &assets)?,
        total_assets: amount("totalAssets", &total_assets)?,
        total_shares: amount("totalShares", &total_shares)?,
    };
    quote(&state, &id, query).await
}

async fn preview_mint(
    state: extract::State<State>,
    Path((id, shares, total_shares, total_assets)): Path<(String, String, String, String)>,
) -> Response {
    let query = Query::PreviewMint {
        shares: amount("shares", &shares)?,
        total_shares: amount("totalShares", &total_shares)?,
        total_assets: amount("totalAssets", &total_assets)?,
    };
    quote(&state, &id, query).await
}

async fn convert_to_shares(
    state: extract::State<State>,
    Path((id, assets, total_assets, total_shares)): Path<(String, String, String, String)>,
) -> Response {
    let query = Query::ConvertToShares {
        assets: amount("assets", &assets)?,
        total_assets: amount("totalAssets", &total_assets)?,
        total_shares: amount("totalShares", &total_shares)?,
    };
    quote(&state, &id, query).await
}

async fn convert_to_assets(
    state: extract::State<State>,
    Path((id, shares, total_shares, total_assets)): Path<(String, String, String, String)>,
) -> Response {
    let query = Query::ConvertToAssets {
        shares: amount("shares", &shares)?,
        total_shares: amount("totalShares", &total_shares)?,
        total_assets: amount("totalAssets", &total_assets)?,
    };
    quote(&state, &id, query).await
}
