mod logic;
mod ui;

pub use logic::save_svg;

use crate::chart::Chart;

/// Frontend side of the chart: the interactive `Chart` once a dataset is
/// loaded, and the circle currently under the pointer.
pub struct Plotter {
    chart: Option<Chart>,
    hovered: Option<usize>,
}

impl Plotter {
    pub fn new() -> Self {
        Self {
            chart: None,
            hovered: None,
        }
    }
}
