use super::region::NormRect;
use super::store::RegionStore;
use crate::input::CursorRequest;
use crate::options::LayoutOptions;

/// Which shared boundary an interaction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The vertical boundary (a normalized X position).
    Vertical,
    /// The horizontal boundary (a normalized Y position).
    Horizontal,
}

/// Which side of the boundary a snapshot entry sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// The region's trailing edge (right/bottom) lies on the boundary; it
    /// grows and shrinks in place.
    Leading,
    /// The region's leading edge (left/top) lies on the boundary; it shifts
    /// with the boundary while its far edge stays fixed.
    Trailing,
}

/// One region's geometry captured at drag start.
#[derive(Debug, Clone)]
struct SnapshotEntry {
    index: usize,
    rect: NormRect,
    side: Option<Side>,
}

/// Ephemeral state of one drag gesture.
///
/// The snapshot is immutable for the whole gesture: every pointer move
/// recomputes member geometry from `origin` plus the total delta, never from
/// the previous frame, so error cannot accumulate across a long drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    axis: Axis,
    origin: f32,
    snapshot: Vec<SnapshotEntry>,
}

impl DragSession {
    /// The boundary being dragged.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Boundary position at drag start.
    #[must_use]
    pub fn origin(&self) -> f32 {
        self.origin
    }
}

/// Interaction state of the boundary engine.
#[derive(Debug, Clone)]
pub enum DragState {
    /// Pointer is away from both boundaries.
    Idle,
    /// Pointer is within the hit threshold of a boundary.
    Hovering(Axis),
    /// A drag gesture is in progress.
    Dragging(DragSession),
}

/// Detects pointer proximity to region boundaries and resizes adjacent
/// regions in lockstep while a boundary is dragged.
///
/// The engine caches one vertical and one horizontal boundary position.
/// During a drag the cached position for the active axis is the single
/// source of truth for every other component; outside a drag both positions
/// are recomputed canonically from region geometry via [`recompute`].
///
/// Adjacency is resolved by a generic edge scan: any region whose relevant
/// edge lies within the hit threshold of the boundary participates in the
/// drag. A fixed 2x2 quadrant grid is just one instance of this.
///
/// [`recompute`]: Self::recompute
pub struct BoundaryEngine {
    vertical: f32,
    horizontal: f32,
    state: DragState,
    hit_threshold: f32,
    clamp_min: f32,
    clamp_max: f32,
}

impl BoundaryEngine {
    /// Default position for both boundaries before any recompute.
    const DEFAULT_POS: f32 = 0.5;
    /// Edges this close to the window border do not count as interior.
    const BORDER_EPS: f32 = 1e-4;

    /// Create an engine with the given layout tuning.
    #[must_use]
    pub fn new(config: &LayoutOptions) -> Self {
        Self {
            vertical: Self::DEFAULT_POS,
            horizontal: Self::DEFAULT_POS,
            state: DragState::Idle,
            hit_threshold: config.hit_threshold,
            clamp_min: config.clamp_min,
            clamp_max: config.clamp_max,
        }
    }

    /// Apply new layout tuning (threshold and clamp margins).
    pub fn set_config(&mut self, config: &LayoutOptions) {
        self.hit_threshold = config.hit_threshold;
        self.clamp_min = config.clamp_min;
        self.clamp_max = config.clamp_max;
    }

    /// Cached `(vertical, horizontal)` boundary positions.
    #[must_use]
    pub fn positions(&self) -> (f32, f32) {
        (self.vertical, self.horizontal)
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Hit-test the pointer against both boundaries and update the
    /// hover state.
    ///
    /// The vertical boundary is tested first, so it wins when the pointer is
    /// close to both (the crossing point). Returns the cursor shape the
    /// window system should show. While a drag is active this keeps the
    /// active axis cursor and changes nothing.
    pub fn check_boundaries(
        &mut self,
        store: &RegionStore,
        px: f32,
        py: f32,
    ) -> CursorRequest {
        if let DragState::Dragging(ref session) = self.state {
            return cursor_for(session.axis);
        }
        match self.hit_test(store, px, py) {
            Some(axis) => {
                self.state = DragState::Hovering(axis);
                cursor_for(axis)
            }
            None => {
                self.state = DragState::Idle;
                CursorRequest::Reset
            }
        }
    }

    /// Try to begin a drag at the given pointer position.
    ///
    /// Performs the same hit test as [`check_boundaries`]; on a hit, captures
    /// a snapshot of every region's geometry, classifies the boundary's
    /// adjacent members, and enters the dragging state. Returns whether a
    /// drag started. A boundary with no adjacent member edges starts no
    /// drag — the cached position could otherwise detach from any real edge.
    ///
    /// [`check_boundaries`]: Self::check_boundaries
    pub fn start_dragging(
        &mut self,
        store: &RegionStore,
        px: f32,
        py: f32,
    ) -> bool {
        let Some(axis) = self.hit_test(store, px, py) else {
            self.state = DragState::Idle;
            return false;
        };
        let origin = match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        };
        let snapshot = self.classify(store, axis, origin);
        if snapshot.iter().all(|entry| entry.side.is_none()) {
            self.state = DragState::Hovering(axis);
            return false;
        }
        self.state = DragState::Dragging(DragSession {
            axis,
            origin,
            snapshot,
        });
        true
    }

    /// Move the dragged boundary to the given pointer position.
    ///
    /// Silent no-op when no drag is active (a normal consequence of event
    /// ordering, not an error). The normalized position is clamped to the
    /// configured safety range so no region can collapse. Member geometry is
    /// computed from the snapshot plus the total delta; every new rectangle
    /// is validated before any is applied, so the store is never left
    /// partially updated. The cached boundary position is updated on every
    /// call and is what other components read during the drag.
    pub fn update_dragging(
        &mut self,
        store: &mut RegionStore,
        px: f32,
        py: f32,
    ) {
        let (axis, pos, updates) = {
            let DragState::Dragging(ref session) = self.state else {
                return;
            };
            let (nx, ny) = store.to_normalized(px, py);
            let raw = match session.axis {
                Axis::Vertical => nx,
                Axis::Horizontal => ny,
            };
            let pos = raw.clamp(self.clamp_min, self.clamp_max);
            let delta = pos - session.origin;

            let mut updates = Vec::with_capacity(session.snapshot.len());
            for entry in &session.snapshot {
                let Some(side) = entry.side else { continue };
                let mut rect = entry.rect;
                match (session.axis, side) {
                    (Axis::Vertical, Side::Leading) => {
                        rect.width = entry.rect.width + delta;
                    }
                    (Axis::Vertical, Side::Trailing) => {
                        rect.x = entry.rect.x + delta;
                        rect.width = entry.rect.width - delta;
                    }
                    (Axis::Horizontal, Side::Leading) => {
                        rect.height = entry.rect.height + delta;
                    }
                    (Axis::Horizontal, Side::Trailing) => {
                        rect.y = entry.rect.y + delta;
                        rect.height = entry.rect.height - delta;
                    }
                }
                if let Err(e) = rect.validate() {
                    // The clamp range normally prevents this; a layout whose
                    // members do not tile the clamp range can still produce
                    // it, in which case the whole move is refused.
                    log::debug!("drag move rejected: {e}");
                    return;
                }
                updates.push((entry.index, rect));
            }
            (session.axis, pos, updates)
        };

        for (index, rect) in updates {
            if let Err(e) = store.update_region(index, rect) {
                log::error!("drag update failed for region {index}: {e}");
            }
        }
        match axis {
            Axis::Vertical => self.vertical = pos,
            Axis::Horizontal => self.horizontal = pos,
        }
    }

    /// End the current drag gesture, if any.
    ///
    /// Discards the snapshot, recomputes both cached boundary positions
    /// canonically from the final region geometry (healing any numerical
    /// drift from the incremental path), and requests a cursor reset.
    pub fn end_dragging(&mut self, store: &RegionStore) -> CursorRequest {
        self.state = DragState::Idle;
        self.recompute(store);
        CursorRequest::Reset
    }

    /// Re-derive the cached boundary positions from region geometry.
    ///
    /// Each cached position snaps to the nearest interior shared edge
    /// (right edges for the vertical boundary, bottom edges for the
    /// horizontal). Call after any region mutation outside an active drag;
    /// with no interior edges the cached positions are left alone.
    pub fn recompute(&mut self, store: &RegionStore) {
        let vertical = nearest_interior_edge(
            store.regions().iter().map(|r| r.rect.right()),
            self.vertical,
        );
        if let Some(edge) = vertical {
            self.vertical = edge;
        }
        let horizontal = nearest_interior_edge(
            store.regions().iter().map(|r| r.rect.bottom()),
            self.horizontal,
        );
        if let Some(edge) = horizontal {
            self.horizontal = edge;
        }
    }

    fn hit_test(
        &self,
        store: &RegionStore,
        px: f32,
        py: f32,
    ) -> Option<Axis> {
        let (nx, ny) = store.to_normalized(px, py);
        if (nx - self.vertical).abs() < self.hit_threshold {
            Some(Axis::Vertical)
        } else if (ny - self.horizontal).abs() < self.hit_threshold {
            Some(Axis::Horizontal)
        } else {
            None
        }
    }

    /// Snapshot every region and tag the ones adjacent to the boundary.
    fn classify(
        &self,
        store: &RegionStore,
        axis: Axis,
        origin: f32,
    ) -> Vec<SnapshotEntry> {
        let eps = self.hit_threshold;
        store
            .regions()
            .iter()
            .enumerate()
            .map(|(index, region)| {
                let rect = region.rect;
                let (trailing_edge, leading_edge) = match axis {
                    Axis::Vertical => (rect.right(), rect.x),
                    Axis::Horizontal => (rect.bottom(), rect.y),
                };
                let side = if (trailing_edge - origin).abs() <= eps {
                    Some(Side::Leading)
                } else if (leading_edge - origin).abs() <= eps {
                    Some(Side::Trailing)
                } else {
                    None
                };
                SnapshotEntry { index, rect, side }
            })
            .collect()
    }
}

fn cursor_for(axis: Axis) -> CursorRequest {
    match axis {
        Axis::Vertical => CursorRequest::ResizeEw,
        Axis::Horizontal => CursorRequest::ResizeNs,
    }
}

/// The interior edge closest to `current`, ignoring edges on the window
/// border.
fn nearest_interior_edge(
    edges: impl Iterator<Item = f32>,
    current: f32,
) -> Option<f32> {
    edges
        .filter(|e| {
            *e > BoundaryEngine::BORDER_EPS
                && *e < 1.0 - BoundaryEngine::BORDER_EPS
        })
        .min_by(|a, b| {
            (a - current).abs().total_cmp(&(b - current).abs())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::region::{ContentKind, TriangleStyle};

    const EPS: f32 = 1e-5;

    fn pane() -> ContentKind {
        ContentKind::Triangle(TriangleStyle {
            color: [0.5, 0.5, 0.5],
            phase: 0.0,
            spin: 0.0,
        })
    }

    /// Four quadrants tiling the window, boundaries at (0.5, 0.5).
    fn quad_store() -> RegionStore {
        let mut store = RegionStore::new(1200, 900);
        store
            .add_region("quad_tl", pane(), NormRect::new(0.0, 0.0, 0.5, 0.5))
            .unwrap();
        store
            .add_region("quad_tr", pane(), NormRect::new(0.5, 0.0, 0.5, 0.5))
            .unwrap();
        store
            .add_region("quad_bl", pane(), NormRect::new(0.0, 0.5, 0.5, 0.5))
            .unwrap();
        store
            .add_region("quad_br", pane(), NormRect::new(0.5, 0.5, 0.5, 0.5))
            .unwrap();
        store
    }

    fn engine(store: &RegionStore) -> BoundaryEngine {
        let mut engine = BoundaryEngine::new(&LayoutOptions::default());
        engine.recompute(store);
        engine
    }

    fn rect_of(store: &RegionStore, name: &str) -> NormRect {
        store.region(name).unwrap().rect
    }

    #[test]
    fn recompute_finds_shared_edges() {
        let store = quad_store();
        let engine = engine(&store);
        assert_eq!(engine.positions(), (0.5, 0.5));
    }

    #[test]
    fn hover_requests_axis_cursor() {
        let store = quad_store();
        let mut engine = engine(&store);

        // 598/1200 is within 0.015 of the vertical boundary.
        assert_eq!(
            engine.check_boundaries(&store, 598.0, 200.0),
            CursorRequest::ResizeEw
        );
        assert!(matches!(engine.state(), DragState::Hovering(Axis::Vertical)));

        assert_eq!(
            engine.check_boundaries(&store, 300.0, 452.0),
            CursorRequest::ResizeNs
        );

        assert_eq!(
            engine.check_boundaries(&store, 100.0, 100.0),
            CursorRequest::Reset
        );
        assert!(matches!(engine.state(), DragState::Idle));
    }

    #[test]
    fn vertical_wins_at_the_crossing_point() {
        let store = quad_store();
        let mut engine = engine(&store);
        // Pointer sits on both boundaries at once.
        assert_eq!(
            engine.check_boundaries(&store, 600.0, 450.0),
            CursorRequest::ResizeEw
        );
    }

    #[test]
    fn vertical_drag_keeps_regions_in_lockstep() {
        let mut store = quad_store();
        let mut engine = engine(&store);

        assert!(engine.start_dragging(&store, 600.0, 200.0));
        engine.update_dragging(&mut store, 840.0, 200.0); // 0.7 normalized

        let tl = rect_of(&store, "quad_tl");
        let tr = rect_of(&store, "quad_tr");
        assert!((tl.width - 0.7).abs() < EPS);
        assert!((tr.x - 0.7).abs() < EPS);
        assert!((tr.width - 0.3).abs() < EPS);
        // No gap or overlap at the boundary.
        assert!((tl.right() - tr.x).abs() < EPS);

        let bl = rect_of(&store, "quad_bl");
        let br = rect_of(&store, "quad_br");
        assert!((bl.width - 0.7).abs() < EPS);
        assert!((br.x - 0.7).abs() < EPS);

        // Vertical boundary is the live source of truth during the drag.
        assert!((engine.positions().0 - 0.7).abs() < EPS);
    }

    #[test]
    fn horizontal_drag_is_symmetric() {
        let mut store = quad_store();
        let mut engine = engine(&store);

        assert!(engine.start_dragging(&store, 300.0, 450.0));
        engine.update_dragging(&mut store, 300.0, 270.0); // 0.3 normalized

        let tl = rect_of(&store, "quad_tl");
        let bl = rect_of(&store, "quad_bl");
        assert!((tl.height - 0.3).abs() < EPS);
        assert!((bl.y - 0.3).abs() < EPS);
        assert!((bl.height - 0.7).abs() < EPS);
        assert!((engine.positions().1 - 0.3).abs() < EPS);
    }

    #[test]
    fn drag_position_is_clamped() {
        let mut store = quad_store();
        let mut engine = engine(&store);

        assert!(engine.start_dragging(&store, 600.0, 200.0));
        engine.update_dragging(&mut store, 1140.0, 200.0); // 0.95 normalized

        assert!((engine.positions().0 - 0.9).abs() < EPS);
        assert!((rect_of(&store, "quad_tl").width - 0.9).abs() < EPS);
    }

    #[test]
    fn incremental_updates_match_a_single_jump() {
        let mut store_a = quad_store();
        let mut engine_a = engine(&store_a);
        assert!(engine_a.start_dragging(&store_a, 600.0, 200.0));
        for px in [640.0, 700.0, 780.0, 812.0, 840.0] {
            engine_a.update_dragging(&mut store_a, px, 200.0);
        }

        let mut store_b = quad_store();
        let mut engine_b = engine(&store_b);
        assert!(engine_b.start_dragging(&store_b, 600.0, 200.0));
        engine_b.update_dragging(&mut store_b, 840.0, 200.0);

        for name in ["quad_tl", "quad_tr", "quad_bl", "quad_br"] {
            assert_eq!(rect_of(&store_a, name), rect_of(&store_b, name));
        }
    }

    #[test]
    fn update_without_session_is_a_silent_noop() {
        let mut store = quad_store();
        let mut engine = engine(&store);
        let before: Vec<NormRect> =
            store.regions().iter().map(|r| r.rect).collect();

        engine.update_dragging(&mut store, 840.0, 200.0);

        let after: Vec<NormRect> =
            store.regions().iter().map(|r| r.rect).collect();
        assert_eq!(before, after);
        assert_eq!(engine.positions(), (0.5, 0.5));
    }

    #[test]
    fn end_dragging_recomputes_canonically() {
        let mut store = quad_store();
        let mut engine = engine(&store);

        assert!(engine.start_dragging(&store, 600.0, 200.0));
        engine.update_dragging(&mut store, 744.0, 200.0); // 0.62
        assert_eq!(engine.end_dragging(&store), CursorRequest::Reset);
        assert!(!engine.is_dragging());

        let tl = rect_of(&store, "quad_tl");
        assert!((engine.positions().0 - tl.right()).abs() < EPS);
    }

    #[test]
    fn boundary_without_members_starts_no_drag() {
        let mut store = RegionStore::new(1000, 1000);
        store
            .add_region("solo", pane(), NormRect::new(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        let mut engine = engine(&store);

        // Both boundaries still sit at the 0.5 default; nothing borders them.
        assert!(!engine.start_dragging(&store, 500.0, 200.0));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn gutters_are_preserved_through_a_drag() {
        // Regions with a small gap around the boundary, as the original
        // quadrant layout shipped: the drag shifts both sides without
        // snapping the gutter shut.
        let mut store = RegionStore::new(1000, 1000);
        store
            .add_region("left", pane(), NormRect::new(0.0, 0.0, 0.495, 1.0))
            .unwrap();
        store
            .add_region("right", pane(), NormRect::new(0.505, 0.0, 0.495, 1.0))
            .unwrap();
        let mut engine = engine(&store);
        let boundary = engine.positions().0; // 0.495, the shared right edge

        assert!(engine.start_dragging(&store, boundary * 1000.0, 500.0));
        engine.update_dragging(&mut store, 700.0, 500.0);

        let left = rect_of(&store, "left");
        let right = rect_of(&store, "right");
        let delta = 0.7 - boundary;
        assert!((left.width - (0.495 + delta)).abs() < EPS);
        assert!((right.x - (0.505 + delta)).abs() < EPS);
        // Far edge of the trailing region never moves.
        assert!((right.right() - 1.0).abs() < EPS);
    }
}
