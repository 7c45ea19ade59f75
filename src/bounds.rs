use euclid::default::{Point2D, Rect};

/// Running min/max extent box accumulated while glyph quads and decoration
/// lines are placed.
///
/// The box only grows during a layout pass; it is rebuilt from scratch at the
/// start of every pass. Italic shear and outline expansion are folded in at
/// accumulation time so the finished rectangle is exact without a
/// post-processing step.
#[derive(Clone, Copy, Debug)]
pub struct BoundsTracker {
    min: Point2D<f32>,
    max: Point2D<f32>,
}

impl BoundsTracker {
    /// Starts a new pass with the box collapsed onto the initial pen position.
    pub fn starting_at(pen: Point2D<f32>) -> Self {
        Self { min: pen, max: pen }
    }

    /// Widens the box to cover a pen-relative glyph rectangle.
    ///
    /// The two corners below the glyph origin shear further left than the top
    /// corners, so the horizontal extrema are taken from the sheared bottom
    /// corner (min) and the sheared top corner (max) independently.
    pub fn track(&mut self, pen: Point2D<f32>, rect: &Rect<f32>, shear: f32) {
        let left = rect.origin.x;
        let top = rect.origin.y;
        let right = rect.origin.x + rect.size.width;
        let bottom = rect.origin.y + rect.size.height;

        self.min.x = self.min.x.min(pen.x + left - shear * bottom);
        self.max.x = self.max.x.max(pen.x + right - shear * top);
        self.min.y = self.min.y.min(pen.y + top);
        self.max.y = self.max.y.max(pen.y + bottom);
    }

    /// Widens the box to cover a rectangle already in layout coordinates,
    /// as produced for decoration lines.
    pub fn include(&mut self, rect: &Rect<f32>) {
        self.min.x = self.min.x.min(rect.origin.x);
        self.min.y = self.min.y.min(rect.origin.y);
        self.max.x = self.max.x.max(rect.origin.x + rect.size.width);
        self.max.y = self.max.y.max(rect.origin.y + rect.size.height);
    }

    /// Converts the tracked extrema into an (origin, size) rectangle.
    pub fn finish(&self) -> Rect<f32> {
        Rect::new(self.min, (self.max - self.min).to_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, rect};

    #[test]
    fn test_empty_pass_is_zero_sized() {
        let tracker = BoundsTracker::starting_at(point2(3.0, 20.0));
        let bounds = tracker.finish();
        assert_eq!(bounds.origin, point2(3.0, 20.0));
        assert_eq!(bounds.size.width, 0.0);
        assert_eq!(bounds.size.height, 0.0);
    }

    #[test]
    fn test_track_grows_monotonically() {
        let mut tracker = BoundsTracker::starting_at(point2(0.0, 10.0));
        tracker.track(point2(0.0, 10.0), &rect(1.0, -8.0, 6.0, 8.0), 0.0);
        tracker.track(point2(8.0, 10.0), &rect(1.0, -8.0, 6.0, 8.0), 0.0);

        let bounds = tracker.finish();
        assert_eq!(bounds.origin.x, 0.0);
        assert_eq!(bounds.origin.y, 2.0);
        assert_eq!(bounds.size.width, 15.0);
        assert_eq!(bounds.size.height, 8.0);
    }

    #[test]
    fn test_shear_widens_from_top_corner() {
        let mut tracker = BoundsTracker::starting_at(point2(0.0, 0.0));
        // Glyph entirely above the baseline: top = -10, bottom = 0.
        tracker.track(point2(0.0, 0.0), &rect(0.0, -10.0, 5.0, 10.0), 0.208);

        let bounds = tracker.finish();
        // Bottom corner does not move (bottom == 0); top corner shears right
        // of the unsheared edge because top is negative.
        assert_eq!(bounds.origin.x, 0.0);
        assert!((bounds.size.width - (5.0 + 0.208 * 10.0)).abs() < 1e-5);
    }

    #[test]
    fn test_shear_widens_from_bottom_corner_for_descenders() {
        let mut tracker = BoundsTracker::starting_at(point2(10.0, 0.0));
        // Descender reaching below the baseline: top = -6, bottom = 4.
        tracker.track(point2(10.0, 0.0), &rect(0.0, -6.0, 5.0, 10.0), 0.208);

        let bounds = tracker.finish();
        assert!((bounds.origin.x - (10.0 - 0.208 * 4.0)).abs() < 1e-5);
    }

    #[test]
    fn test_include_absolute_rect() {
        let mut tracker = BoundsTracker::starting_at(point2(0.0, 0.0));
        tracker.include(&rect(-2.0, 18.0, 40.0, 3.0));

        let bounds = tracker.finish();
        assert_eq!(bounds.origin, point2(-2.0, 0.0));
        assert_eq!(bounds.size.width, 40.0);
        assert_eq!(bounds.size.height, 21.0);
    }
}
