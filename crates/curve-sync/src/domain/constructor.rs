//! Constructor argument decoding and re-encoding.
//!
//! Values are kept in the textual form accepted by
//! [`DynSolType::coerce_str`], so what the discovery stage decodes the
//! deployment stage can encode again without knowing about individual types.

use {
    alloy::{
        dyn_abi::{DynSolType, DynSolValue, JsonAbiExt},
        hex,
        json_abi::{Constructor, JsonAbi},
    },
    anyhow::{Context, Result, ensure},
    itertools::Itertools,
    manifest::ConstructorArg,
};

/// Decodes the raw constructor arguments of a contract against its own ABI.
///
/// Returns an empty list if the ABI has no constructor. Decoding failures are
/// logged together with the raw input and also yield an empty list; callers
/// compare the length with [`parameter_count`] to tell the two apart.
pub fn decode(raw: &str, abi: &JsonAbi) -> Vec<ConstructorArg> {
    let Some(constructor) = abi.constructor() else {
        return Vec::new();
    };
    match try_decode(raw, constructor) {
        Ok(args) => args,
        Err(err) => {
            tracing::warn!(?err, raw_arguments = raw, "failed to decode constructor arguments");
            Vec::new()
        }
    }
}

/// Number of arguments the contract's constructor declares.
pub fn parameter_count(abi: &JsonAbi) -> usize {
    abi.constructor()
        .map(|constructor| constructor.inputs.len())
        .unwrap_or_default()
}

fn try_decode(raw: &str, constructor: &Constructor) -> Result<Vec<ConstructorArg>> {
    let bytes = hex::decode(raw.trim()).context("constructor arguments are not hex")?;
    let values = constructor.abi_decode_input(&bytes)?;
    ensure!(
        values.len() == constructor.inputs.len(),
        "decoded {} values for {} parameters",
        values.len(),
        constructor.inputs.len(),
    );
    let args = constructor
        .inputs
        .iter()
        .zip(values)
        .map(|(param, value)| ConstructorArg::new(param.selector_type(), render(&value)))
        .collect::<Vec<_>>();

    // The manifest must hold exactly what the deployment stage re-encodes.
    let encoded = encode(Some(constructor), &args).context("decoded arguments do not re-encode")?;
    ensure!(
        encoded == bytes,
        "decoded arguments re-encode to {}",
        hex::encode(&encoded)
    );
    Ok(args)
}

/// ABI encodes manifest arguments for `constructor`, to be appended to the
/// contract's creation bytecode.
pub fn encode(constructor: Option<&Constructor>, args: &[ConstructorArg]) -> Result<Vec<u8>> {
    let Some(constructor) = constructor else {
        ensure!(
            args.is_empty(),
            "contract has no constructor but {} arguments were given",
            args.len()
        );
        return Ok(Vec::new());
    };
    ensure!(
        constructor.inputs.len() == args.len(),
        "constructor takes {} arguments but {} were given",
        constructor.inputs.len(),
        args.len(),
    );

    let values = constructor
        .inputs
        .iter()
        .zip(args)
        .enumerate()
        .map(|(i, (param, arg))| {
            let expected = param.selector_type();
            ensure!(
                expected == arg.abi_type,
                "argument {i} has type {} but the constructor expects {expected}",
                arg.abi_type,
            );
            match DynSolType::parse(&arg.abi_type)? {
                // Taken verbatim, the parser would trim surrounding whitespace.
                DynSolType::String => Ok(DynSolValue::String(arg.value.clone())),
                ty => ty
                    .coerce_str(&arg.value)
                    .with_context(|| format!("argument {i} is not a valid {}", arg.abi_type)),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(constructor.abi_encode_input(&values)?)
}

fn render(value: &DynSolValue) -> String {
    match value {
        // Only nested strings need quoting to be parsed back.
        DynSolValue::String(s) => s.clone(),
        other => render_nested(other),
    }
}

fn render_nested(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", values.iter().map(render_nested).join(","))
        }
        DynSolValue::Tuple(values) => format!("({})", values.iter().map(render_nested).join(",")),
        other => hex::encode_prefixed(other.abi_encode()),
    }
}
