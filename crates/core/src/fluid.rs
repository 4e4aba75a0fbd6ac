//! Fluid-balance aggregation for ICU charting.
//!
//! A patient's fluid balance over a set of chart entries is a pure
//! reduction: sum of intakes, sum of outputs, net = intake − output.
//! Entry order is irrelevant and an empty set yields all zeros.
//!
//! Charting forms submit intake/output figures as numbers or numeric
//! strings; non-numeric input coerces to 0. That leniency is part of the
//! charting contract, so it lives here next to the aggregation and is
//! applied via serde when entries are read (`deserialize_lenient_ml`).

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Aggregated fluid totals in millilitres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FluidBalance {
    pub total_intake_ml: f64,
    pub total_output_ml: f64,
    pub net_balance_ml: f64,
}

/// Sums `(intake, output)` pairs into a [`FluidBalance`].
///
/// Order-independent; an empty iterator yields the zero balance.
pub fn balance(entries: impl IntoIterator<Item = (f64, f64)>) -> FluidBalance {
    let mut totals = FluidBalance::default();
    for (intake, output) in entries {
        totals.total_intake_ml += intake;
        totals.total_output_ml += output;
    }
    totals.net_balance_ml = totals.total_intake_ml - totals.total_output_ml;
    totals
}

/// Deserialises a millilitre amount leniently.
///
/// Accepts a JSON number, a numeric string, or null/absent. Anything
/// non-numeric coerces to 0 with a warning; the function is total so one
/// bad field never rejects a whole chart entry.
pub fn deserialize_lenient_ml<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(lenient_ml(raw.as_ref()))
}

fn lenient_ml(raw: Option<&serde_json::Value>) -> f64 {
    match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or_else(|| {
            tracing::warn!("fluid amount {} out of range, assuming 0", n);
            0.0
        }),
        Some(serde_json::Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("non-numeric fluid amount '{}', assuming 0", s);
                0.0
            }
        },
        Some(other) => {
            tracing::warn!("unexpected fluid amount {:?}, assuming 0", other);
            0.0
        }
        None => 0.0,
    }
}
