//! Reduce a harness transcript to [`RenderMetrics`].

use crate::core::{RenderEvent, RenderMetrics};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RENDER_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"rendered (\d+) times").unwrap());

static RENDER_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:render\s+)?duration:\s*(\d+(?:\.\d+)?)\s*ms").unwrap()
});

static RENDER_TIMES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"render times:\s*(\[.*\])\s*$").unwrap());

/// Extract render metrics from raw harness output.
///
/// - `total_renders` is the count on the last `rendered N times` line, or 0.
/// - `render_times` lists every `duration: D ms` sample in order, with or
///   without the `render` prefix.
/// - average and max are `None` when there are no samples.
/// - `unnecessary_renders` is 1 when more than one sample was seen.
pub fn extract_render_metrics(transcript: &str) -> RenderMetrics {
    let total_renders = RENDER_COUNT
        .captures_iter(transcript)
        .last()
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0);

    let render_times: Vec<f64> = RENDER_DURATION
        .captures_iter(transcript)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();

    let average_render_time = mean(&render_times);
    let max_render_time = render_times.iter().copied().reduce(f64::max);
    let unnecessary_renders = u64::from(render_times.len() > 1);

    RenderMetrics {
        total_renders,
        average_render_time,
        max_render_time,
        unnecessary_renders,
        events: extract_events(transcript),
        render_times,
    }
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// Profiler samples from the last `render times: [...]` line. Malformed JSON
/// yields no events; the aggregates above do not depend on it.
fn extract_events(transcript: &str) -> Vec<RenderEvent> {
    let Some(json) = transcript
        .lines()
        .rev()
        .find_map(|line| RENDER_TIMES.captures(line).map(|caps| caps[1].to_string()))
    else {
        return Vec::new();
    };

    serde_json::from_str(&json).unwrap_or_else(|e| {
        debug!("Ignoring malformed render times payload: {e}");
        Vec::new()
    })
}
