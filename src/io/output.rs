use crate::config::ReportFormat;
use crate::core::{format_millis, AnalysisReport, RenderMetrics, StateMetrics};
use anyhow::Context;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One frame at 60fps.
const FRAME_BUDGET_MS: f64 = 16.0;

pub trait ReportWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_render_metrics(&report.render_metrics)?;
        self.write_state_metrics(&report.state_metrics)?;
        self.write_recommendations(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "# BlinkReact Performance Report: {}",
            report.component_name
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Component: `{}`",
            report.component_path.display()
        )?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_render_metrics(&mut self, metrics: &RenderMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "## Render Performance")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Total Renders | {} |", metrics.total_renders)?;
        writeln!(
            self.writer,
            "| Average Render Time | {} |",
            format_millis(metrics.average_render_time)
        )?;
        writeln!(
            self.writer,
            "| Max Render Time | {} |",
            format_millis(metrics.max_render_time)
        )?;
        writeln!(
            self.writer,
            "| Potentially Unnecessary Renders | {} |",
            metrics.unnecessary_renders
        )?;
        writeln!(self.writer)?;

        if !metrics.events.is_empty() {
            writeln!(self.writer, "### Render Samples")?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "| # | Phase | Actual | Base | Start | Commit |"
            )?;
            writeln!(
                self.writer,
                "|---|-------|--------|------|-------|--------|"
            )?;
            for (i, event) in metrics.events.iter().enumerate() {
                writeln!(
                    self.writer,
                    "| {} | {} | {:.2}ms | {:.2}ms | {:.2} | {:.2} |",
                    i + 1,
                    event.phase,
                    event.actual_duration,
                    event.base_duration,
                    event.start_time,
                    event.commit_time
                )?;
            }
            writeln!(self.writer)?;
        } else if metrics.has_samples() {
            let samples: Vec<String> = metrics
                .render_times
                .iter()
                .map(|t| format!("{t:.2}ms"))
                .collect();
            writeln!(self.writer, "Render durations: {}", samples.join(", "))?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_state_metrics(&mut self, metrics: &StateMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "## State Updates")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Total State Updates | {} |",
            metrics.total_state_updates
        )?;
        writeln!(
            self.writer,
            "| Potentially Redundant Updates | {} |",
            metrics.redundant_state_updates
        )?;
        writeln!(self.writer)?;

        if metrics.state_update_details.is_empty() {
            writeln!(self.writer, "No `useState` hooks detected.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "### Per-Hook Breakdown")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| State | Setter | Updates | Redundant | Self-referential | Adjacent |"
        )?;
        writeln!(
            self.writer,
            "|-------|--------|---------|-----------|------------------|----------|"
        )?;
        for record in &metrics.state_update_details {
            writeln!(
                self.writer,
                "| `{}` | `{}` | {} | {} | {} | {} |",
                record.state_name,
                record.setter_name,
                record.update_count,
                record.redundant_updates,
                record.self_referential_updates,
                record.adjacent_updates
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        let recommendations = recommendations(report);
        if recommendations.is_empty() {
            writeln!(self.writer, "No issues detected.")?;
        }
        for (i, text) in recommendations.iter().enumerate() {
            writeln!(self.writer, "{}. {}", i + 1, text)?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "_Counts are text heuristics; treat them as hints, not proof._"
        )?;
        Ok(())
    }
}

/// Advice derived from the metrics, in report order.
pub fn recommendations(report: &AnalysisReport) -> Vec<String> {
    let render = &report.render_metrics;
    let state = &report.state_metrics;
    let mut advice = Vec::new();

    if render.unnecessary_renders > 0 {
        advice.push(
            "**Re-renders**: the component re-rendered after mount; consider `React.memo` \
             or stabilising props with `useMemo`/`useCallback`."
                .to_string(),
        );
    }
    if let Some(max) = render.max_render_time.filter(|max| *max > FRAME_BUDGET_MS) {
        advice.push(format!(
            "**Slow render**: the slowest commit took {max:.2}ms, over the {FRAME_BUDGET_MS:.0}ms frame budget."
        ));
    }
    for record in state
        .state_update_details
        .iter()
        .filter(|r| r.redundant_updates > 0)
    {
        if record.self_referential_updates > 0 {
            advice.push(format!(
                "**`{}`**: `{}({})` sets the state to its current value; skip the update or use a functional update.",
                record.state_name, record.setter_name, record.state_name
            ));
        }
        if record.adjacent_updates > 0 {
            advice.push(format!(
                "**`{}`**: `{}` is called repeatedly in one statement; combine the updates.",
                record.state_name, record.setter_name
            ));
        }
    }
    advice
}

/// Tables on stdout (or any writer) for interactive use.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl TerminalWriter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {}",
            "BlinkReact Performance Report:".bold().blue(),
            report.component_name.to_string().bold()
        )?;
        writeln!(self.writer, "  {}", report.component_path.display())?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", render_table(&report.render_metrics))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", state_table(&report.state_metrics))?;

        let advice = recommendations(report);
        if !advice.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Recommendations:".yellow().bold())?;
            for text in advice {
                writeln!(self.writer, "  - {}", text.replace("**", ""))?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn render_table(metrics: &RenderMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Render metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total renders"),
        Cell::new(metrics.total_renders),
    ]);
    table.add_row(vec![
        Cell::new("Average render time"),
        Cell::new(format_millis(metrics.average_render_time)),
    ]);
    table.add_row(vec![
        Cell::new("Max render time"),
        Cell::new(format_millis(metrics.max_render_time)),
    ]);
    table.add_row(vec![
        Cell::new("Potentially unnecessary renders"),
        Cell::new(metrics.unnecessary_renders),
    ]);
    table
}

fn state_table(metrics: &StateMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["State", "Setter", "Updates", "Redundant"]);
    for record in &metrics.state_update_details {
        table.add_row(vec![
            Cell::new(&record.state_name),
            Cell::new(&record.setter_name),
            Cell::new(record.update_count),
            Cell::new(record.redundant_updates),
        ]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(""),
        Cell::new(metrics.total_state_updates),
        Cell::new(metrics.redundant_state_updates),
    ]);
    table
}

/// Writer for `format`. File-based formats write to `path`.
pub fn create_writer(format: ReportFormat, path: &Path) -> anyhow::Result<Box<dyn ReportWriter>> {
    let open = || -> anyhow::Result<BufWriter<File>> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        Ok(BufWriter::new(file))
    };
    Ok(match format {
        ReportFormat::Markdown => Box::new(MarkdownWriter::new(open()?)),
        ReportFormat::Json => Box::new(JsonWriter::new(open()?)),
        ReportFormat::Terminal => Box::new(TerminalWriter::stdout()),
    })
}
