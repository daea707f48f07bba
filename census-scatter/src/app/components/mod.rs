mod plotter;

pub use plotter::{save_svg, Plotter};
