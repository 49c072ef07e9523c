//! Price command implementation
//!
//! Prices one option pair with the selected model.

use pricer_pricing::{Dispatcher, ModelParameters, ModelTag, Valuation};
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::Result;

/// Serialised form of a single valuation.
#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    model: &'a str,
    call: f64,
    put: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    call_std_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    put_std_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_paths: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

impl<'a> PriceReport<'a> {
    fn new(model: ModelTag, valuation: &Valuation) -> Self {
        let mc = valuation.monte_carlo.as_ref();
        Self {
            model: model.name(),
            call: valuation.price.call(),
            put: valuation.price.put(),
            call_std_error: mc.map(|e| e.call_std_error()),
            put_std_error: mc.map(|e| e.put_std_error()),
            num_paths: mc.map(|e| e.num_paths()),
            seed: mc.map(|e| e.seed()),
        }
    }
}

/// Run the price command
pub fn run(
    dispatcher: &Dispatcher,
    model: ModelTag,
    params: &ModelParameters,
    format: OutputFormat,
) -> Result<()> {
    info!(model = %model, parameters = params.len(), "Pricing");
    let valuation = dispatcher.evaluate(model, params)?;
    print!("{}", render(model, &valuation, format)?);
    Ok(())
}

/// Renders a valuation in the requested format.
pub fn render(model: ModelTag, valuation: &Valuation, format: OutputFormat) -> Result<String> {
    let report = PriceReport::new(model, valuation);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)? + "\n"),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.serialize(&report)?;
            super::finish_csv(writer)
        }
        OutputFormat::Table => Ok(render_table(&report)),
    }
}

fn render_table(report: &PriceReport<'_>) -> String {
    let mut out = format!("Model: {}\n", report.model);
    out.push_str(&format!("  Call: {:>12.6}", report.call));
    if let Some(se) = report.call_std_error {
        out.push_str(&format!("  (± {se:.6})"));
    }
    out.push('\n');
    out.push_str(&format!("  Put:  {:>12.6}", report.put));
    if let Some(se) = report.put_std_error {
        out.push_str(&format!("  (± {se:.6})"));
    }
    out.push('\n');
    if let (Some(paths), Some(seed)) = (report.num_paths, report.seed) {
        out.push_str(&format!("  Paths: {paths}, seed: {seed}\n"));
    }
    out
}
