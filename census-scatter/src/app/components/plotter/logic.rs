use std::{io::Write, path::Path, sync::Arc};

use app_core::string_error::ErrorStringExt;
use svg_export::{AxisSide, Figure, LabelEntry, LabelGroup, Marker, Scatter, Tick};

use crate::{
    app::config::Config,
    backend_state::Record,
    chart::{format_ticks, Axis, Chart, Field, SelectOutcome},
    EguiApp,
};

/// Circle fill, shared by the live chart and the SVG export.
pub(super) const CIRCLE_RGB: [u8; 3] = [176, 233, 241];
pub(super) const FONT_SIZE: f64 = 10.0;
pub(super) const TICK_COUNT: usize = 10;

impl super::Plotter {
    /// Replace the chart with one built from `records`, starting from the
    /// default selection.
    pub fn set_records(&mut self, records: Arc<[Record]>, config: &Config) -> Result<(), String> {
        self.hovered = None;
        self.chart = Some(Chart::new(records, config.padding(), config.extent())?);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.chart = None;
        self.hovered = None;
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub fn select(&mut self, field: Field, now: f64) -> Result<SelectOutcome, String> {
        let chart = self
            .chart
            .as_mut()
            .ok_or_else(|| format!("cannot select '{field}' without a dataset"))?;
        chart.select(field, now)
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.chart
            .as_ref()
            .is_some_and(|chart| chart.scene().is_animating(now))
    }
}

fn circle_fill() -> String {
    let [r, g, b] = CIRCLE_RGB;
    format!("rgb({r},{g},{b})")
}

/// Ticks of `axis` as displayed at `now`, in chart-area pixels.
pub(super) fn axis_ticks(chart: &Chart, axis: Axis, now: f64) -> Vec<Tick> {
    let scale = chart.scene().axis_scale_at(axis, now);
    let values = scale.ticks(TICK_COUNT);
    values
        .iter()
        .zip(format_ticks(&values))
        .map(|(value, label)| Tick {
            position: scale.apply(*value),
            label,
        })
        .collect()
}

fn label_group(chart: &Chart, axis: Axis) -> LabelGroup {
    let entries = chart
        .label_states(axis)
        .into_iter()
        .map(|state| LabelEntry {
            text: state.field.axis_label().to_string(),
            value: state.field.to_string(),
            active: state.active,
        })
        .collect();
    let side = match axis {
        Axis::X => AxisSide::Bottom,
        Axis::Y => AxisSide::Left,
    };
    LabelGroup::new(side, entries)
}

/// Build the SVG document of the chart as it looks at `now`.
pub fn figure(chart: &Chart, config: &Config, now: f64) -> Result<Figure, String> {
    let scene = chart.scene();
    let markers = chart
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let [cx, cy] = scene
                .circle_at(idx, now)
                .ok_or_else(|| format!("no circle for '{}'", record.state))?;
            Ok(Marker {
                cx,
                cy,
                label: record.abbreviation.clone(),
                title: chart.tooltip(idx)?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let scatter = Scatter::new(markers)
        .with_radius(config.circle_radius)
        .with_fill(&circle_fill())
        .with_font_size(FONT_SIZE);

    Ok(Figure::new(
        config.svg_width.round() as u64,
        config.svg_height.round() as u64,
        config.margin,
    )
    .with_axis(AxisSide::Bottom, axis_ticks(chart, Axis::X, now))
    .with_axis(AxisSide::Left, axis_ticks(chart, Axis::Y, now))
    .with_scatter(scatter)
    .with_label_group(label_group(chart, Axis::X))
    .with_label_group(label_group(chart, Axis::Y)))
}

pub fn save_svg(app: &EguiApp, path: &Path) -> Result<(), String> {
    log::debug!("requested to save svg at '{:?}'", path);

    let chart = app
        .plotter
        .chart()
        .ok_or("nothing to export, no dataset loaded")?;
    let svg = figure(chart, &app.config, app.clock)?.render();

    let mut file = std::fs::File::create(path).err_to_string("unable to create file for saving svg")?;
    file.write_all(svg.as_bytes())
        .err_to_string("unable to write svg")?;
    log::info!("saved chart to {:?}", path);
    Ok(())
}
