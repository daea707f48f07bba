use egui::{Color32, RichText};
use egui_plot::{Line, PlotBounds, PlotPoint, PlotPoints, Points, Text};

use super::logic::{axis_ticks, CIRCLE_RGB, FONT_SIZE};
use crate::{
    app::{
        config::Config,
        events::{EventQueue, SelectField},
        EguiApp,
    },
    chart::{Axis, Chart},
};

const CIRCLE_COLOR: Color32 =
    Color32::from_rgb(CIRCLE_RGB[0], CIRCLE_RGB[1], CIRCLE_RGB[2]);
const AXIS_COLOR: Color32 = Color32::GRAY;
const TICK_LENGTH: f64 = 6.0;

impl super::Plotter {
    pub fn render(
        &mut self,
        config: &Config,
        now: f64,
        event_queue: &mut EventQueue<EguiApp>,
        ui: &mut egui::Ui,
    ) {
        let Some(chart) = self.chart.as_ref() else {
            return;
        };

        ui.horizontal(|ui| {
            // Y axis titles, stacked in a column left of the chart.
            ui.vertical(|ui| {
                ui.add_space((config.svg_height / 3.0) as f32);
                render_labels(chart, Axis::Y, event_queue, ui);
            });
            self.hovered = render_chart(chart, config, now, ui);
        });

        // X axis titles below the chart.
        ui.horizontal(|ui| {
            ui.add_space((config.margin.left + config.extent().width / 3.0) as f32);
            ui.vertical(|ui| {
                render_labels(chart, Axis::X, event_queue, ui);
            });
        });
    }
}

/// The clickable titles of `axis`. A click queues a selection event.
fn render_labels(
    chart: &Chart,
    axis: Axis,
    event_queue: &mut EventQueue<EguiApp>,
    ui: &mut egui::Ui,
) {
    for label in chart.label_states(axis) {
        let mut text = RichText::new(label.field.axis_label());
        if label.active {
            text = text.strong();
        } else {
            text = text.color(Color32::GRAY);
        }
        let response = ui.selectable_label(label.active, text);
        if response.clicked() {
            log::debug!("clicked axis label '{}'", label.field);
            event_queue.queue_event(Box::new(SelectField::new(label.field)));
        }
    }
}

/// Draw axes, circles and abbreviations. Returns the index of the hovered
/// circle, if any.
fn render_chart(chart: &Chart, config: &Config, now: f64, ui: &mut egui::Ui) -> Option<usize> {
    let extent = config.extent();
    let (w, h) = (extent.width, extent.height);
    let margin = config.margin;
    let scene = chart.scene();
    // Scene coordinates grow downwards, plot coordinates upwards.
    let flip = move |[x, y]: [f64; 2]| [x, h - y];

    let response = egui_plot::Plot::new("census_scatter")
        .width(config.svg_width as f32)
        .height(config.svg_height as f32)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-margin.left, -margin.bottom],
                [w + margin.right, h + margin.top],
            ));

            // Axes, each at its animated domain.
            plot_ui.line(Line::new(vec![[0.0, 0.0], [w, 0.0]]).color(AXIS_COLOR));
            for tick in axis_ticks(chart, Axis::X, now) {
                let x = tick.position;
                plot_ui.line(Line::new(vec![[x, 0.0], [x, -TICK_LENGTH]]).color(AXIS_COLOR));
                plot_ui.text(
                    Text::new(PlotPoint::new(x, -3.0 * TICK_LENGTH), tick.label)
                        .color(AXIS_COLOR),
                );
            }
            plot_ui.line(Line::new(vec![[0.0, 0.0], [0.0, h]]).color(AXIS_COLOR));
            for tick in axis_ticks(chart, Axis::Y, now) {
                let y = h - tick.position;
                plot_ui.line(Line::new(vec![[0.0, y], [-TICK_LENGTH, y]]).color(AXIS_COLOR));
                plot_ui.text(
                    Text::new(PlotPoint::new(-4.0 * TICK_LENGTH, y), tick.label)
                        .color(AXIS_COLOR),
                );
            }

            let circles: PlotPoints = scene.circles_at(now).map(flip).collect();
            plot_ui.points(
                Points::new(circles)
                    .radius(config.circle_radius as f32)
                    .color(CIRCLE_COLOR)
                    .filled(true),
            );

            for (idx, record) in chart.records().iter().enumerate() {
                if let Some(pos) = scene.label_at(idx, now).map(flip) {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(pos[0], pos[1]),
                            RichText::new(&record.abbreviation).size(FONT_SIZE as f32),
                        )
                        .color(Color32::BLACK),
                    );
                }
            }

            let hovered = plot_ui.pointer_coordinate().and_then(|pointer| {
                let pos = flip([pointer.x, pointer.y]);
                scene.mark_at(pos, config.circle_radius, now)
            });

            if let Some(pos) = hovered.and_then(|idx| scene.circle_at(idx, now)) {
                plot_ui.points(
                    Points::new(vec![flip(pos)])
                        .radius(config.circle_radius as f32)
                        .color(Color32::DARK_GRAY)
                        .filled(false),
                );
            }
            hovered
        });

    let hovered = response.inner;
    if let Some(idx) = hovered {
        match chart.tooltip(idx) {
            Ok(tooltip) => {
                let _ = response.response.on_hover_ui_at_pointer(|ui| {
                    ui.label(tooltip);
                });
            }
            Err(err) => log::error!("{}", err),
        }
    }
    hovered
}
