//! Form input parsing
//!
//! Turns the raw text the user typed into a validated [`ChartRequest`].
//! This is a pure function of its inputs so it can be tested without any
//! GUI present; the shell calls it with the form's current field contents.

use crate::error::{ChartError, ChartResult};
use crate::model::{ChartKind, ChartRequest, DisplayOptions};
use crate::palette::ColorResolver;

/// Parse the three raw text fields into a validated request.
///
/// Labels are comma-split and trimmed, with empty tokens dropped. Values are
/// comma-split and each token must parse as a finite number. The request is
/// fully validated before it is returned: matching counts and a non-zero
/// total. Colors are resolved per category through `resolver`.
pub fn parse_chart_request(
    raw_title: &str,
    raw_labels: &str,
    raw_values: &str,
    kind: ChartKind,
    options: DisplayOptions,
    resolver: &ColorResolver,
) -> ChartResult<ChartRequest> {
    let title = raw_title.trim();
    if title.is_empty() {
        return Err(ChartError::MissingField("title"));
    }

    let labels = split_labels(raw_labels);
    if labels.is_empty() {
        return Err(ChartError::MissingField("labels"));
    }

    if raw_values.trim().is_empty() {
        return Err(ChartError::MissingField("values"));
    }
    let values = parse_values(raw_values)?;

    let request = ChartRequest {
        title: title.to_string(),
        colors: resolver.resolved(labels.len()),
        labels,
        values,
        kind,
        options,
    };
    request.validate()?;
    Ok(request)
}

/// Comma-split labels, trimmed, with empty tokens dropped
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_values(raw: &str) -> ChartResult<Vec<f64>> {
    raw.trim()
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(ChartError::MalformedNumber {
                    token: token.to_string(),
                }),
            }
        })
        .collect()
}
