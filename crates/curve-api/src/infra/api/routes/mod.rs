mod healthz;
mod name;
mod parameters;
mod quote;

pub(super) use {healthz::healthz, name::name, parameters::parameters, quote::quotes};
use {
    super::Error,
    alloy::primitives::U256,
    manifest::Curve,
};

fn curve<'a>(state: &'a super::State, id: &str) -> Result<&'a Curve, Error> {
    let id = id.parse::<u64>().map_err(|err| Error::InvalidParameter {
        name: "id",
        reason: err.to_string(),
    })?;
    Ok(state.registry().resolve(id)?)
}

/// Parses a decimal `uint256` path segment.
fn amount(name: &'static str, value: &str) -> Result<U256, Error> {
    U256::from_str_radix(value, 10).map_err(|err| Error::InvalidParameter {
        name,
        reason: err.to_string(),
    })
}
