use super::LayoutError;

/// A rectangle in normalized window coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormRect {
    /// Left edge as a fraction of the window width.
    pub x: f32,
    /// Top edge as a fraction of the window height.
    pub y: f32,
    /// Width as a fraction of the window width.
    pub width: f32,
    /// Height as a fraction of the window height.
    pub height: f32,
}

impl NormRect {
    /// Construct a rectangle without validating it; see [`validate`].
    ///
    /// [`validate`]: Self::validate
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check the normalized-geometry invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidGeometry`] if any edge lies outside
    /// [0, 1] or either dimension is non-positive.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let ok = self.x >= 0.0
            && self.x <= 1.0
            && self.y >= 0.0
            && self.y <= 1.0
            && self.width > 0.0
            && self.height > 0.0
            && self.x + self.width <= 1.0
            && self.y + self.height <= 1.0;
        if ok {
            Ok(())
        } else {
            Err(LayoutError::InvalidGeometry {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Per-region parameters for the spinning-triangle pane content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleStyle {
    /// Triangle fill color (linear RGB).
    pub color: [f32; 3],
    /// Initial rotation in radians; distinguishes otherwise identical panes.
    pub phase: f32,
    /// Rotation speed in radians per second (may be negative or zero).
    pub spin: f32,
}

/// What a region displays, fixed at creation time.
///
/// Content selection is dispatched on this tag rather than on the region
/// name, so region identity and rendering behavior stay decoupled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentKind {
    /// GPU pane content: a colored triangle rendered into an offscreen
    /// target and composited.
    Triangle(TriangleStyle),
    /// Space reserved for the overlay; never given a render target.
    Reserved,
}

impl ContentKind {
    /// Whether this region owns an offscreen render target.
    #[must_use]
    pub const fn wants_target(&self) -> bool {
        !matches!(self, Self::Reserved)
    }
}

/// A named layout slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Unique name within the store.
    pub name: String,
    /// Content tag attached at creation.
    pub kind: ContentKind,
    /// Current normalized geometry.
    pub rect: NormRect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_rect_is_valid() {
        assert!(NormRect::new(0.0, 0.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn overflowing_rect_is_rejected() {
        let rect = NormRect::new(0.9, 0.0, 0.2, 0.5);
        assert!(matches!(
            rect.validate(),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(NormRect::new(0.0, 0.0, 0.0, 0.5).validate().is_err());
        assert!(NormRect::new(0.0, 0.0, 0.5, 0.0).validate().is_err());
    }

    #[test]
    fn negative_origin_is_rejected() {
        assert!(NormRect::new(-0.1, 0.0, 0.5, 0.5).validate().is_err());
    }

    #[test]
    fn reserved_regions_want_no_target() {
        assert!(!ContentKind::Reserved.wants_target());
        let style = TriangleStyle {
            color: [1.0, 0.0, 0.0],
            phase: 0.0,
            spin: 0.0,
        };
        assert!(ContentKind::Triangle(style).wants_target());
    }
}
