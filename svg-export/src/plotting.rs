use crate::svg::{self, opts, Params, Tag};

/// The basic plotting primitive. Can be converted into a Vec of `svg::Tag`.
trait Element {
    /// Convert `Element` into a Vec of `svg::Tag`.
    ///
    /// Coordinates of all elements are relative to the chart area, which is
    /// the figure minus its margins. The figure is passed in for the size
    /// of that area.
    fn to_tags(&self, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>>;
    fn identifier(&self) -> &str;
}

// ----------------------------------------------------------------------------
//
//
// Figure
//
//
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// The Figure defines the overall size of a plot and holds the elements
/// drawn into its chart area.
pub struct Figure {
    width: u64,
    height: u64,
    margin: Margin,
    elements: Vec<Box<dyn Element>>,
}

impl Figure {
    pub fn new(width: u64, height: u64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
            elements: Vec::new(),
        }
    }

    pub fn chart_width(&self) -> f64 {
        self.width as f64 - self.margin.left - self.margin.right
    }

    pub fn chart_height(&self) -> f64 {
        self.height as f64 - self.margin.top - self.margin.bottom
    }

    pub fn with_axis(mut self, side: AxisSide, ticks: Vec<Tick>) -> Self {
        self.elements.push(Box::new(Axis { side, ticks }));
        self
    }

    pub fn with_scatter(mut self, scatter: Scatter) -> Self {
        self.elements.push(Box::new(scatter));
        self
    }

    pub fn with_label_group(mut self, group: LabelGroup) -> Self {
        self.elements.push(Box::new(group));
        self
    }

    /// Render this `Figure` to raw SVG markup.
    pub fn render(&self) -> String {
        let mut root = Tag::<svg::Svg>::new(self.width, self.height, None);
        let mut chart_group = Tag::<svg::Group>::new(self.margin.left, self.margin.top, None);
        for el in self.elements.iter() {
            log::debug!("rendering {}", el.identifier());
            chart_group.add_children(el.to_tags(self));
        }
        root.add_child(chart_group);
        svg::render(&root)
    }
}

// ----------------------------------------------------------------------------
//
//
// Axis
//
//
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Left,
}

/// A tick at `position` pixels along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

const TICK_LENGTH: f64 = 6.0;

struct Axis {
    side: AxisSide,
    ticks: Vec<Tick>,
}

impl Element for Axis {
    fn to_tags(&self, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (w, h) = (fig.chart_width(), fig.chart_height());
        let style = [("stroke", "black"), ("stroke-width", "1")];
        let mut tags: Vec<Box<dyn svg::RenderTag>> = Vec::new();

        match self.side {
            AxisSide::Bottom => {
                let mut group = Tag::<svg::Group>::new(0.0, h, None);
                group.add_child(Tag::<svg::Line>::new(0.0, w, 0.0, 0.0, opts(&style)));
                for tick in self.ticks.iter() {
                    let x = tick.position;
                    group.add_child(Tag::<svg::Line>::new(x, x, 0.0, TICK_LENGTH, opts(&style)));
                    group.add_child(Tag::<svg::Text>::new(
                        x,
                        TICK_LENGTH + 14.0,
                        0.0,
                        &tick.label,
                        opts(&[("text-anchor", "middle"), ("font-size", "10px")]),
                    ));
                }
                tags.push(Box::new(group));
            }
            AxisSide::Left => {
                let mut group = Tag::<svg::Group>::new(0.0, 0.0, None);
                group.add_child(Tag::<svg::Line>::new(0.0, 0.0, 0.0, h, opts(&style)));
                for tick in self.ticks.iter() {
                    let y = tick.position;
                    group.add_child(Tag::<svg::Line>::new(-TICK_LENGTH, 0.0, y, y, opts(&style)));
                    group.add_child(Tag::<svg::Text>::new(
                        -TICK_LENGTH - 3.0,
                        y + 4.0,
                        0.0,
                        &tick.label,
                        opts(&[("text-anchor", "end"), ("font-size", "10px")]),
                    ));
                }
                tags.push(Box::new(group));
            }
        }
        tags
    }

    fn identifier(&self) -> &str {
        "Axis"
    }
}

// ----------------------------------------------------------------------------
//
//
// Scatter
//
//
// ----------------------------------------------------------------------------

/// One data point: a circle with a short label on top and a hover title.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub cx: f64,
    pub cy: f64,
    pub label: String,
    pub title: String,
}

pub struct Scatter {
    markers: Vec<Marker>,
    radius: f64,
    fill: String,
    font_size: f64,
}

impl Scatter {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self {
            markers,
            radius: 5.0,
            fill: "black".to_string(),
            font_size: 10.0,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Element for Scatter {
    fn to_tags(&self, _fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let font_size = format!("{}px", self.font_size);
        let mut circles = Tag::<svg::Group>::new(0.0, 0.0, opts(&[("fill", &self.fill)]));
        let mut labels = Tag::<svg::Group>::new(
            0.0,
            0.0,
            opts(&[
                ("text-anchor", "middle"),
                ("dominant-baseline", "central"),
                ("font-family", "sans-serif"),
                ("font-size", &font_size),
            ]),
        );
        for marker in self.markers.iter() {
            // Markers without a finite position cannot be placed.
            if !marker.cx.is_finite() || !marker.cy.is_finite() {
                log::warn!("not exporting marker '{}' without position", marker.label);
                continue;
            }
            let mut circle = Tag::<svg::Circle>::new(marker.cx, marker.cy, self.radius, None);
            circle.add_child(Tag::<svg::Title>::new(&marker.title));
            circles.add_child(circle);
            labels.add_child(Tag::<svg::Text>::new(
                marker.cx,
                marker.cy,
                0.0,
                &marker.label,
                None,
            ));
        }
        vec![Box::new(circles), Box::new(labels)]
    }

    fn identifier(&self) -> &str {
        "Scatter"
    }
}

// ----------------------------------------------------------------------------
//
//
// LabelGroup
//
//
// ----------------------------------------------------------------------------

/// One selectable axis title. `value` is written out as the `value`
/// attribute so the markup can be wired up to click handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEntry {
    pub text: String,
    pub value: String,
    pub active: bool,
}

/// The stacked axis titles of one axis, at most one of them active.
pub struct LabelGroup {
    side: AxisSide,
    entries: Vec<LabelEntry>,
}

const LABEL_SPACING: f64 = 20.0;

impl LabelGroup {
    pub fn new(side: AxisSide, entries: Vec<LabelEntry>) -> Self {
        let active = entries.iter().filter(|e| e.active).count();
        if active > 1 {
            log::warn!("label group has {} active entries", active);
        }
        Self { side, entries }
    }
}

impl Element for LabelGroup {
    fn to_tags(&self, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (w, h) = (fig.chart_width(), fig.chart_height());
        let mut tags: Vec<Box<dyn svg::RenderTag>> = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let offset = LABEL_SPACING * (i + 1) as f64;
            let (x, y, angle) = match self.side {
                AxisSide::Bottom => (w / 2.0, h + fig.margin.top + offset, 0.0),
                AxisSide::Left => (-(offset + LABEL_SPACING), h / 2.0, -90.0),
            };
            let (class, style) = label_style(entry.active);
            let text = Tag::<svg::Text>::new(x, y, angle, &entry.text, Some(style))
                .with_attribute("class", class)
                .with_attribute("value", &entry.value);
            tags.push(Box::new(text));
        }
        tags
    }

    fn identifier(&self) -> &str {
        "LabelGroup"
    }
}

fn label_style(active: bool) -> (&'static str, Params) {
    let mut style = element_opts(&[("text-anchor", "middle"), ("cursor", "pointer")]);
    if active {
        style.insert("fill".to_string(), "black".to_string());
        style.insert("font-weight".to_string(), "bold".to_string());
        ("active", style)
    } else {
        style.insert("fill".to_string(), "#aaaaaa".to_string());
        ("inactive", style)
    }
}

// ----------------------------------------------------------------------------
//
//
// Helpers
//
//
// ----------------------------------------------------------------------------

/// Generate svg::Params from a slice of pairs.
pub fn element_opts(items: &[(&str, &str)]) -> svg::Params {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margin() -> Margin {
        Margin {
            top: 20.0,
            right: 30.0,
            bottom: 100.0,
            left: 100.0,
        }
    }

    fn entries(active: usize) -> Vec<LabelEntry> {
        ["age", "poverty", "income"]
            .iter()
            .enumerate()
            .map(|(i, v)| LabelEntry {
                text: v.to_uppercase(),
                value: v.to_string(),
                active: i == active,
            })
            .collect()
    }

    #[test]
    fn test_chart_area() {
        let fig = Figure::new(900, 600, margin());
        assert_eq!(fig.chart_width(), 770.0);
        assert_eq!(fig.chart_height(), 480.0);
    }

    #[test]
    fn test_render_places_chart_group_inside_margins() {
        let raw = Figure::new(900, 600, margin()).render();
        assert!(raw.contains("<g transform=\"translate(100,20)\"/>"));
    }

    #[test]
    fn test_scatter_markers_with_titles() {
        let markers = vec![
            Marker {
                cx: 10.0,
                cy: 20.0,
                label: "AL".into(),
                title: "Alabama".into(),
            },
            Marker {
                cx: f64::NAN,
                cy: 20.0,
                label: "XX".into(),
                title: "Nowhere".into(),
            },
        ];
        let raw = Figure::new(900, 600, margin())
            .with_scatter(Scatter::new(markers).with_radius(8.0))
            .render();

        assert_eq!(raw.matches("<circle").count(), 1);
        assert!(raw.contains("<circle cx=\"10\" cy=\"20\" r=\"8\"><title>Alabama</title></circle>"));
        assert!(raw.contains(">AL</text>"));
        assert!(!raw.contains("Nowhere"));
    }

    #[test]
    fn test_label_group_marks_active_entry() {
        let raw = Figure::new(900, 600, margin())
            .with_label_group(LabelGroup::new(AxisSide::Bottom, entries(1)))
            .with_label_group(LabelGroup::new(AxisSide::Left, entries(0)))
            .render();

        assert_eq!(raw.matches("class=\"active\"").count(), 2);
        assert_eq!(raw.matches("class=\"inactive\"").count(), 4);
        assert!(raw.contains("value=\"poverty\""));
        // The y labels are rotated.
        assert!(raw.contains("rotate(-90)"));
    }

    #[test]
    fn test_axis_ticks() {
        let ticks = vec![
            Tick {
                position: 0.0,
                label: "30".into(),
            },
            Tick {
                position: 385.0,
                label: "35".into(),
            },
        ];
        let raw = Figure::new(900, 600, margin())
            .with_axis(AxisSide::Bottom, ticks)
            .render();

        assert!(raw.contains("<g transform=\"translate(0,480)\">"));
        assert!(raw.contains(">35</text>"));
        // Axis line plus one line per tick.
        assert_eq!(raw.matches("<line").count(), 3);
    }
}
