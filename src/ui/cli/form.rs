use anyhow::{Context, Result, bail};
use std::io::Write;

use crate::features::{FeatureSchema, FeatureVector, FieldSpec, validate};
use crate::service::{PredictionResult, PredictionService};
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::report::Report;

const TITLE: &str = "EASI Score & Flare-Up Prediction Tool";
const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn initial_value(spec: &FieldSpec) -> f64 {
    if spec.contains(0.0) {
        0.0
    } else {
        spec.min.unwrap_or(0.0)
    }
}

fn help_for(spec: &FieldSpec) -> String {
    match spec.description.as_deref() {
        Some(desc) if !desc.is_empty() => format!("{desc}. Range {}", spec.range_label()),
        _ => format!("Range {}", spec.range_label()),
    }
}

/// Asks for every field of `schema` in model order.
pub fn collect_features<D: PromptDriver>(driver: &D, schema: FeatureSchema) -> Result<FeatureVector> {
    let specs = schema
        .fields()
        .with_context(|| format!("cannot describe the {schema} panel"))?;

    let mut values = Vec::with_capacity(specs.len());
    for s in &specs {
        let v = driver.ask_f64(&s.title, &help_for(s), initial_value(s), s.min, s.max)?;
        values.push(v);
    }
    Ok(FeatureVector::new(values))
}

/// Re-asks the whole panel until it passes range validation.
pub fn prompt_features_until_valid<D: PromptDriver, W: Write>(
    driver: &D,
    schema: FeatureSchema,
    out: &mut W,
) -> Result<FeatureVector> {
    loop {
        let features = collect_features(driver, schema)?;
        match validate(schema, &features) {
            Ok(()) => return Ok(features),
            Err(msg) => writeln!(out, "✗ {msg}")?,
        }
    }
}

/// Runs the interactive form until the user declines another prediction.
/// Returns the number of predictions made.
///
/// An unavailable service is reported and no prompts are shown.
pub fn run_session<D: PromptDriver, W: Write>(
    driver: &D,
    service: &PredictionService,
    out: &mut W,
    color: bool,
) -> Result<usize> {
    if let Some(reason) = service.unavailable_reason() {
        bail!("prediction is unavailable: {reason}");
    }

    let schema = service.schema();
    writeln!(out, "{TITLE}")?;
    if color {
        writeln!(out, "{DIM_ITALIC}{} panel{RESET}", schema)?;
    } else {
        writeln!(out, "{} panel", schema)?;
    }

    let mut made = 0;
    loop {
        let features = prompt_features_until_valid(driver, schema, out)?;
        let result = service.predict(&features)?;
        let report = Report::new(schema, features, result);
        writeln!(out, "{}", report.render(color))?;
        made += 1;

        if !driver.ask_bool("Predict another?", "y/n", false)? {
            break;
        }
    }
    Ok(made)
}

/// One prediction from values given up front, written as text or as JSON.
/// Rejected input and an unavailable service are errors, never prompts.
pub fn predict_once<W: Write>(
    service: &PredictionService,
    values: FeatureVector,
    json: bool,
    out: &mut W,
    color: bool,
) -> Result<PredictionResult> {
    if let Some(reason) = service.unavailable_reason() {
        bail!("prediction is unavailable: {reason}");
    }

    let schema = service.schema();
    validate(schema, &values).context("rejected input")?;
    let result = service.predict(&values)?;

    let report = Report::new(schema, values, result);
    if json {
        serde_json::to_writer_pretty(&mut *out, &report.to_json())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", report.render(color))?;
    }
    Ok(result)
}

/// Writes the field table of `schema`.
pub fn write_schema<W: Write>(schema: FeatureSchema, out: &mut W) -> Result<()> {
    writeln!(out, "{} panel ({} features, raw values)", schema, schema.width())?;
    for (i, s) in schema.fields()?.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<6} {:<14} {}",
            i + 1,
            s.name,
            s.range_label(),
            s.title
        )?;
    }
    Ok(())
}
