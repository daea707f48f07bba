use app_core::string_error::ErrorStringExt;
use std::{
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use svg_export::Margin;

use crate::chart::{Extent, Padding};

const CONFIG_FILE_NAME: &str = ".census-scatter";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub svg_width: f64,
    pub svg_height: f64,
    pub margin: Margin,
    pub y_lower_pad: f64,
    pub circle_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        let data_path = PathBuf::from("assets/data/data.csv");
        let margin = Margin {
            top: 20.0,
            right: 30.0,
            bottom: 100.0,
            left: 100.0,
        };

        Self {
            data_path,
            svg_width: 900.0,
            svg_height: 600.0,
            margin,
            y_lower_pad: Padding::default().y_lower,
            circle_radius: 18.0,
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        Self::from_path(&home.join(CONFIG_FILE_NAME))
    }

    pub fn from_path(path: &Path) -> Result<Self, String> {
        let config_raw = {
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        Ok(parse_config(&config_raw))
    }

    /// Size of the chart area inside the margins.
    pub fn extent(&self) -> Extent {
        Extent {
            width: self.svg_width - self.margin.left - self.margin.right,
            height: self.svg_height - self.margin.top - self.margin.bottom,
        }
    }

    pub fn padding(&self) -> Padding {
        Padding {
            y_lower: self.y_lower_pad,
            ..Default::default()
        }
    }

    /// Read-only view of the active settings.
    pub fn render(&self, _ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading("Preferences");
        ui.label(format!(
            "Loaded from \"~/{CONFIG_FILE_NAME}\", changes apply after a restart."
        ));
        ui.separator();
        egui::Grid::new("preferences_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                let rows = [
                    ("data_path", self.data_path.display().to_string()),
                    ("svg_width", self.svg_width.to_string()),
                    ("svg_height", self.svg_height.to_string()),
                    ("margin_top", self.margin.top.to_string()),
                    ("margin_right", self.margin.right.to_string()),
                    ("margin_bottom", self.margin.bottom.to_string()),
                    ("margin_left", self.margin.left.to_string()),
                    ("y_lower_pad", self.y_lower_pad.to_string()),
                    ("circle_radius", self.circle_radius.to_string()),
                ];
                for (key, value) in rows {
                    ui.monospace(key);
                    ui.label(value);
                    ui.end_row();
                }
            });
    }
}

fn parse_number(key: &str, raw: &str, target: &mut f64) {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => *target = value,
        _ => log::warn!("could not parse '{key}' as non-negative number"),
    }
}

/// Parse `key=value` lines on top of the defaults. Unknown keys and
/// unparsable values are ignored.
pub fn parse_config(config_raw: &str) -> Config {
    let mut config = Config::default();
    for line in config_raw.lines() {
        let line = line.trim();
        // Lines starting with "#" are considered comments.
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, val)) = line.split_once('=') else {
            log::warn!("ignoring config line without '=': {line}");
            continue;
        };
        match key.trim() {
            "data_path" => match PathBuf::from_str(val.trim()) {
                Ok(path) => config.data_path = path,
                Err(err) => log::warn!("could not parse 'data_path': {err:?}"),
            },
            "svg_width" => parse_number("svg_width", val, &mut config.svg_width),
            "svg_height" => parse_number("svg_height", val, &mut config.svg_height),
            "margin_top" => parse_number("margin_top", val, &mut config.margin.top),
            "margin_right" => parse_number("margin_right", val, &mut config.margin.right),
            "margin_bottom" => parse_number("margin_bottom", val, &mut config.margin.bottom),
            "margin_left" => parse_number("margin_left", val, &mut config.margin.left),
            "y_lower_pad" => parse_number("y_lower_pad", val, &mut config.y_lower_pad),
            "circle_radius" => parse_number("circle_radius", val, &mut config.circle_radius),
            other => log::warn!("unknown config key '{other}'"),
        }
    }

    let extent = config.extent();
    if extent.width <= 0.0 || extent.height <= 0.0 {
        log::warn!("margins leave no room for the chart, using default size and margins");
        let default = Config::default();
        config.svg_width = default.svg_width;
        config.svg_height = default.svg_height;
        config.margin = default.margin;
    }
    config
}
