use crate::backend_state::Record;

use super::{
    transition::{Animated, AXIS_DURATION, MARK_DURATION},
    Axis, Field, LinearScale,
};

/// Position of one record on the chart: its circle and its text label.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    cx: Animated,
    cy: Animated,
    label_x: Animated,
    label_y: Animated,
}

/// The animated domain of one axis. The range never animates.
#[derive(Debug, Clone, Copy)]
struct AxisView {
    lower: Animated,
    upper: Animated,
    range: (f64, f64),
}

impl AxisView {
    fn new(scale: &LinearScale) -> Self {
        let (lower, upper) = scale.domain();
        Self {
            lower: Animated::still(lower),
            upper: Animated::still(upper),
            range: scale.range(),
        }
    }

    fn scale_at(&self, now: f64) -> LinearScale {
        LinearScale::new(
            (self.lower.value_at(now), self.upper.value_at(now)),
            self.range,
        )
    }

    fn is_animating(&self, now: f64) -> bool {
        self.lower.is_animating(now) || self.upper.is_animating(now)
    }
}

/// Everything drawn on the chart, positioned in chart-area pixels with the
/// origin at the top left.
#[derive(Debug, Clone)]
pub struct Scene {
    marks: Vec<Mark>,
    x_axis: AxisView,
    y_axis: AxisView,
}

impl Scene {
    /// Initial paint, nothing animates.
    pub fn new(
        records: &[Record],
        x_scale: &LinearScale,
        x_field: Field,
        y_scale: &LinearScale,
        y_field: Field,
    ) -> Self {
        let marks = records
            .iter()
            .map(|record| {
                let cx = x_scale.apply(record.value(x_field));
                let cy = y_scale.apply(record.value(y_field));
                Mark {
                    cx: Animated::still(cx),
                    cy: Animated::still(cy),
                    label_x: Animated::still(cx),
                    label_y: Animated::still(cy),
                }
            })
            .collect();
        Self {
            marks,
            x_axis: AxisView::new(x_scale),
            y_axis: AxisView::new(y_scale),
        }
    }

    fn axis_view_mut(&mut self, axis: Axis) -> &mut AxisView {
        match axis {
            Axis::X => &mut self.x_axis,
            Axis::Y => &mut self.y_axis,
        }
    }

    /// Move the axis to the domain of `scale`.
    pub fn render_axis(&mut self, axis: Axis, scale: &LinearScale, now: f64) {
        let view = self.axis_view_mut(axis);
        let (lower, upper) = scale.domain();
        view.lower.retarget(lower, now, AXIS_DURATION);
        view.upper.retarget(upper, now, AXIS_DURATION);
        view.range = scale.range();
    }

    /// Move every circle along `axis` to the position of `field` under
    /// `scale`. The other coordinate keeps whatever it is doing.
    pub fn render_circles(
        &mut self,
        axis: Axis,
        scale: &LinearScale,
        field: Field,
        records: &[Record],
        now: f64,
    ) -> Result<(), String> {
        self.retarget_marks(records, scale, field, now, |mark| match axis {
            Axis::X => &mut mark.cx,
            Axis::Y => &mut mark.cy,
        })
    }

    /// Move every text label along `axis`, following its circle.
    pub fn render_label_text(
        &mut self,
        axis: Axis,
        scale: &LinearScale,
        field: Field,
        records: &[Record],
        now: f64,
    ) -> Result<(), String> {
        self.retarget_marks(records, scale, field, now, |mark| match axis {
            Axis::X => &mut mark.label_x,
            Axis::Y => &mut mark.label_y,
        })
    }

    fn retarget_marks(
        &mut self,
        records: &[Record],
        scale: &LinearScale,
        field: Field,
        now: f64,
        coordinate: impl Fn(&mut Mark) -> &mut Animated,
    ) -> Result<(), String> {
        if records.len() != self.marks.len() {
            return Err(format!(
                "scene holds {} marks but got {} records",
                self.marks.len(),
                records.len()
            ));
        }
        for (mark, record) in self.marks.iter_mut().zip(records) {
            coordinate(mark).retarget(scale.apply(record.value(field)), now, MARK_DURATION);
        }
        Ok(())
    }

    pub fn circle_at(&self, idx: usize, now: f64) -> Option<[f64; 2]> {
        self.marks
            .get(idx)
            .map(|mark| [mark.cx.value_at(now), mark.cy.value_at(now)])
    }

    pub fn label_at(&self, idx: usize, now: f64) -> Option<[f64; 2]> {
        self.marks
            .get(idx)
            .map(|mark| [mark.label_x.value_at(now), mark.label_y.value_at(now)])
    }

    pub fn circles_at(&self, now: f64) -> impl Iterator<Item = [f64; 2]> + '_ {
        (0..self.marks.len()).filter_map(move |idx| self.circle_at(idx, now))
    }

    /// Scale of the axis as currently displayed.
    pub fn axis_scale_at(&self, axis: Axis, now: f64) -> LinearScale {
        match axis {
            Axis::X => self.x_axis.scale_at(now),
            Axis::Y => self.y_axis.scale_at(now),
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.x_axis.is_animating(now)
            || self.y_axis.is_animating(now)
            || self.marks.iter().any(|mark| {
                mark.cx.is_animating(now)
                    || mark.cy.is_animating(now)
                    || mark.label_x.is_animating(now)
                    || mark.label_y.is_animating(now)
            })
    }

    /// Index of the topmost circle within `radius` of `pos`. Later circles
    /// are drawn on top, so they are tested first.
    pub fn mark_at(&self, pos: [f64; 2], radius: f64, now: f64) -> Option<usize> {
        (0..self.marks.len()).rev().find(|idx| {
            self.circle_at(*idx, now).is_some_and(|[cx, cy]| {
                (cx - pos[0]).powi(2) + (cy - pos[1]).powi(2) <= radius * radius
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend_state::record;

    fn scene() -> (Vec<Record>, Scene) {
        let records = vec![record("AL", 40.0, 20.0), record("AK", 30.0, 10.0)];
        let x = LinearScale::new((30.0, 40.0), (0.0, 100.0));
        let y = LinearScale::new((10.0, 20.0), (50.0, 0.0));
        let scene = Scene::new(&records, &x, Field::Age, &y, Field::Smokes);
        (records, scene)
    }

    #[test]
    fn test_initial_positions() {
        let (_, scene) = scene();
        assert_eq!(scene.circle_at(0, 0.0), Some([100.0, 0.0]));
        assert_eq!(scene.circle_at(1, 0.0), Some([0.0, 50.0]));
        assert_eq!(scene.label_at(1, 0.0), Some([0.0, 50.0]));
        assert_eq!(scene.circle_at(2, 0.0), None);
        assert!(!scene.is_animating(0.0));
    }

    #[test]
    fn test_render_circles_moves_only_one_coordinate() {
        let (records, mut scene) = scene();
        let x = LinearScale::new((30.0, 50.0), (0.0, 100.0));
        scene
            .render_circles(Axis::X, &x, Field::Age, &records, 1.0)
            .unwrap();

        assert!(scene.is_animating(1.5));
        assert_eq!(scene.circle_at(0, 1.0), Some([100.0, 0.0]));
        assert_eq!(scene.circle_at(0, 2.0), Some([50.0, 0.0]));
        // Labels were not touched.
        assert_eq!(scene.label_at(0, 2.0), Some([100.0, 0.0]));
        assert!(!scene.is_animating(2.0));
    }

    #[test]
    fn test_render_label_text_follows_changed_axis() {
        let (records, mut scene) = scene();
        let y = LinearScale::new((0.0, 20.0), (50.0, 0.0));
        scene
            .render_label_text(Axis::Y, &y, Field::Smokes, &records, 0.0)
            .unwrap();
        assert_eq!(scene.label_at(1, 1.0), Some([0.0, 25.0]));
        assert_eq!(scene.circle_at(1, 1.0), Some([0.0, 50.0]));
    }

    #[test]
    fn test_render_axis_animates_domain() {
        let (_, mut scene) = scene();
        let x = LinearScale::new((20.0, 60.0), (0.0, 100.0));
        scene.render_axis(Axis::X, &x, 3.0);

        assert_eq!(scene.axis_scale_at(Axis::X, 3.0).domain(), (30.0, 40.0));
        assert!(scene.is_animating(3.05));
        assert_eq!(scene.axis_scale_at(Axis::X, 3.0 + AXIS_DURATION), x);
        assert_eq!(scene.axis_scale_at(Axis::Y, 3.05).domain(), (10.0, 20.0));
    }

    #[test]
    fn test_mismatched_records_are_rejected() {
        let (records, mut scene) = scene();
        let x = LinearScale::new((30.0, 50.0), (0.0, 100.0));
        assert!(scene
            .render_circles(Axis::X, &x, Field::Age, &records[..1], 0.0)
            .is_err());
    }

    #[test]
    fn test_mark_at() {
        let (_, scene) = scene();
        assert_eq!(scene.mark_at([98.0, 3.0], 12.0, 0.0), Some(0));
        assert_eq!(scene.mark_at([2.0, 45.0], 12.0, 0.0), Some(1));
        assert_eq!(scene.mark_at([50.0, 25.0], 12.0, 0.0), None);
    }
}
