use std::sync::Arc;

use crate::backend_state::Record;

use super::{
    build_scale, format_tooltip, Axis, Extent, Field, LinearScale, Padding, Scene,
};

/// The field shown on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub x: Field,
    pub y: Field,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            x: Field::Age,
            y: Field::Smokes,
        }
    }
}

impl Selection {
    pub fn get(&self, axis: Axis) -> Field {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn set(&mut self, field: Field) {
        match field.axis() {
            Axis::X => self.x = field,
            Axis::Y => self.y = field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Unchanged,
    Changed(Axis),
}

/// A clickable axis label and whether it is the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelState {
    pub field: Field,
    pub active: bool,
}

/// The interactive chart: loaded records, the selected fields, their
/// scales and the animated scene derived from them.
pub struct Chart {
    records: Arc<[Record]>,
    selection: Selection,
    x_scale: LinearScale,
    y_scale: LinearScale,
    padding: Padding,
    extent: Extent,
    scene: Scene,
}

impl Chart {
    pub fn new(records: Arc<[Record]>, padding: Padding, extent: Extent) -> Result<Self, String> {
        let selection = Selection::default();
        let x_scale = build_scale(&records, selection.x, Axis::X, &padding, extent)?;
        let y_scale = build_scale(&records, selection.y, Axis::Y, &padding, extent)?;
        let scene = Scene::new(&records, &x_scale, selection.x, &y_scale, selection.y);
        Ok(Self {
            records,
            selection,
            x_scale,
            y_scale,
            padding,
            extent,
            scene,
        })
    }

    /// Show `field` on its axis, animating from the current state.
    ///
    /// Selecting the field that is already shown does nothing.
    pub fn select(&mut self, field: Field, now: f64) -> Result<SelectOutcome, String> {
        let axis = field.axis();
        if self.selection.get(axis) == field {
            log::debug!("{axis} axis already shows {field}");
            return Ok(SelectOutcome::Unchanged);
        }

        let scale = build_scale(&self.records, field, axis, &self.padding, self.extent)?;
        self.scene.render_axis(axis, &scale, now);
        self.scene
            .render_circles(axis, &scale, field, &self.records, now)?;
        self.scene
            .render_label_text(axis, &scale, field, &self.records, now)?;

        self.selection.set(field);
        match axis {
            Axis::X => self.x_scale = scale,
            Axis::Y => self.y_scale = scale,
        }
        log::info!("changed {axis} axis to {field}");
        Ok(SelectOutcome::Changed(axis))
    }

    pub fn label_states(&self, axis: Axis) -> [LabelState; 3] {
        let selected = self.selection.get(axis);
        axis.fields().map(|field| LabelState {
            field,
            active: field == selected,
        })
    }

    pub fn tooltip(&self, idx: usize) -> Result<String, String> {
        let record = self
            .records
            .get(idx)
            .ok_or_else(|| format!("no record at index {idx}"))?;
        format_tooltip(record, self.selection.x, self.selection.y)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Target scale of `axis`, regardless of any running animation.
    pub fn scale(&self, axis: Axis) -> LinearScale {
        match axis {
            Axis::X => self.x_scale,
            Axis::Y => self.y_scale,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}
