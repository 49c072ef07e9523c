//! Sweep command implementation
//!
//! Re-prices a model over a two-parameter grid and renders the call and
//! put surfaces. Failed cells render as `NaN` (table), `null` (JSON) or an
//! empty price with the failure reason (CSV).

use std::path::Path;

use pricer_pricing::{AxisSpec, ModelParameters, ModelTag, PriceSurface, SurfaceSweeper};
use serde::Serialize;
use tracing::{info, warn};

use super::OutputFormat;
use crate::Result;

#[derive(Debug, Serialize)]
struct SurfaceReport<'a> {
    model: &'a str,
    x_name: &'a str,
    x_values: &'a [f64],
    y_name: &'a str,
    y_values: &'a [f64],
    call: Vec<Vec<Option<f64>>>,
    put: Vec<Vec<Option<f64>>>,
    failures: Vec<FailedCell>,
}

#[derive(Debug, Serialize)]
struct FailedCell {
    x: f64,
    y: f64,
    error: String,
}

#[derive(Debug, Serialize)]
struct CellRecord {
    x: f64,
    y: f64,
    call: Option<f64>,
    put: Option<f64>,
    error: Option<String>,
}

/// Run the sweep command
pub fn run(
    sweeper: &SurfaceSweeper,
    model: ModelTag,
    base: &ModelParameters,
    x: &AxisSpec,
    y: &AxisSpec,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    info!(
        model = %model,
        x = %x.name,
        y = %y.name,
        cells = x.count * y.count,
        workers = sweeper.workers(),
        "Sweeping"
    );
    let surface = sweeper.sweep(model, base, x, y);
    if surface.failures() > 0 {
        warn!(failures = surface.failures(), "Some cells failed");
    }

    let rendered = render(&surface, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!(path = %path.display(), "Surface written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Renders a surface in the requested format.
pub fn render(surface: &PriceSurface, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_tables(surface)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report(surface))? + "\n"),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in records(surface) {
                writer.serialize(record)?;
            }
            super::finish_csv(writer)
        }
    }
}

fn report(surface: &PriceSurface) -> SurfaceReport<'_> {
    let defined = |grid: Vec<Vec<f64>>| -> Vec<Vec<Option<f64>>> {
        grid.into_iter()
            .map(|row| row.into_iter().map(|v| (!v.is_nan()).then_some(v)).collect())
            .collect()
    };
    let failures = records(surface)
        .filter_map(|record| {
            record.error.map(|error| FailedCell {
                x: record.x,
                y: record.y,
                error,
            })
        })
        .collect();

    SurfaceReport {
        model: surface.model().name(),
        x_name: surface.x_name(),
        x_values: surface.x_values(),
        y_name: surface.y_name(),
        y_values: surface.y_values(),
        call: defined(surface.call_grid()),
        put: defined(surface.put_grid()),
        failures,
    }
}

fn records(surface: &PriceSurface) -> impl Iterator<Item = CellRecord> + '_ {
    let cols = surface.y_values().len();
    surface.cells().iter().enumerate().map(move |(index, cell)| {
        let x = surface.x_values()[index / cols];
        let y = surface.y_values()[index % cols];
        match cell {
            Ok(price) => CellRecord {
                x,
                y,
                call: Some(price.call()),
                put: Some(price.put()),
                error: None,
            },
            Err(err) => CellRecord {
                x,
                y,
                call: None,
                put: None,
                error: Some(err.reason()),
            },
        }
    })
}

fn render_tables(surface: &PriceSurface) -> String {
    let (rows, cols) = surface.shape();
    let mut out = format!(
        "Model: {}  ({} = rows, {} = columns, {rows}x{cols}, {} failed)\n",
        surface.model(),
        surface.x_name(),
        surface.y_name(),
        surface.failures()
    );
    for (title, grid) in [("Call", surface.call_grid()), ("Put", surface.put_grid())] {
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        out.push_str(&format!("{:>12}", format!("{}\\{}", surface.x_name(), surface.y_name())));
        for y in surface.y_values() {
            out.push_str(&format!(" {y:>12.4}"));
        }
        out.push('\n');
        for (x, row) in surface.x_values().iter().zip(&grid) {
            out.push_str(&format!("{x:>12.4}"));
            for value in row {
                out.push_str(&format!(" {value:>12.4}"));
            }
            out.push('\n');
        }
    }
    out
}
