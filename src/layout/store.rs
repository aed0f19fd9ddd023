use rustc_hash::FxHashMap;

use super::region::{ContentKind, NormRect, Region};
use super::LayoutError;

/// Ordered collection of named regions plus the cached window pixel size.
///
/// Regions are registered once at startup and mutated in place afterwards;
/// the store itself lives for the whole application run. Insertion order is
/// preserved for iteration. Both lookup forms return `Result` with
/// [`LayoutError::NameNotFound`] — there is no nullable variant.
pub struct RegionStore {
    regions: Vec<Region>,
    index: FxHashMap<String, usize>,
    screen_width: u32,
    screen_height: u32,
}

impl RegionStore {
    /// Create an empty store for a window of the given pixel size.
    #[must_use]
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            regions: Vec::new(),
            index: FxHashMap::default(),
            screen_width: screen_width.max(1),
            screen_height: screen_height.max(1),
        }
    }

    /// Register a new region.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidGeometry`] if `rect` violates the
    /// normalized-rectangle invariants, or [`LayoutError::DuplicateName`] if
    /// the name is taken. On error the store is unchanged.
    pub fn add_region(
        &mut self,
        name: impl Into<String>,
        kind: ContentKind,
        rect: NormRect,
    ) -> Result<(), LayoutError> {
        rect.validate()?;
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(LayoutError::DuplicateName(name));
        }
        self.index.insert(name.clone(), self.regions.len());
        self.regions.push(Region { name, kind, rect });
        Ok(())
    }

    /// All regions in registration order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameNotFound`] if no region has this name.
    pub fn region(&self, name: &str) -> Result<&Region, LayoutError> {
        self.region_index(name).map(|i| &self.regions[i])
    }

    /// Look up a region's index by name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameNotFound`] if no region has this name.
    pub fn region_index(&self, name: &str) -> Result<usize, LayoutError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::NameNotFound(name.to_owned()))
    }

    /// Replace a region's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] for a bad index or
    /// [`LayoutError::InvalidGeometry`] if `rect` fails validation; the
    /// region is untouched on error.
    pub fn update_region(
        &mut self,
        index: usize,
        rect: NormRect,
    ) -> Result<(), LayoutError> {
        if index >= self.regions.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.regions.len(),
            });
        }
        rect.validate()?;
        self.regions[index].rect = rect;
        Ok(())
    }

    /// Record a new window pixel size.
    ///
    /// Normalized region data is untouched — regions auto-scale. Zero
    /// dimensions are clamped to 1 so pixel conversions stay defined while
    /// the window is minimized.
    pub fn update_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width.max(1);
        self.screen_height = height.max(1);
    }

    /// Cached window pixel size.
    #[must_use]
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Convert a pixel position to normalized window coordinates.
    #[must_use]
    pub fn to_normalized(&self, px: f32, py: f32) -> (f32, f32) {
        (
            px / self.screen_width as f32,
            py / self.screen_height as f32,
        )
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the store has no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ContentKind {
        ContentKind::Triangle(crate::layout::TriangleStyle {
            color: [0.0, 0.8, 0.2],
            phase: 0.0,
            spin: 0.0,
        })
    }

    #[test]
    fn add_then_lookup_returns_exact_geometry() {
        let mut store = RegionStore::new(1200, 900);
        let rect = NormRect::new(0.25, 0.1, 0.5, 0.4);
        store.add_region("main", style(), rect).unwrap();

        let region = store.region("main").unwrap();
        assert_eq!(region.rect, rect);
        assert_eq!(store.region_index("main").unwrap(), 0);
    }

    #[test]
    fn invalid_geometry_leaves_store_unchanged() {
        let mut store = RegionStore::new(1200, 900);
        let err = store
            .add_region("bad", style(), NormRect::new(0.9, 0.0, 0.2, 0.5))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry { .. }));
        assert!(store.is_empty());
        assert!(matches!(
            store.region("bad"),
            Err(LayoutError::NameNotFound(_))
        ));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut store = RegionStore::new(800, 600);
        store
            .add_region("pane", style(), NormRect::new(0.0, 0.0, 0.5, 0.5))
            .unwrap();
        let err = store
            .add_region("pane", style(), NormRect::new(0.5, 0.5, 0.5, 0.5))
            .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateName("pane".to_owned()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn both_lookup_forms_share_one_contract() {
        let store = RegionStore::new(800, 600);
        assert_eq!(
            store.region("ghost").unwrap_err(),
            LayoutError::NameNotFound("ghost".to_owned())
        );
        assert_eq!(
            store.region_index("ghost").unwrap_err(),
            LayoutError::NameNotFound("ghost".to_owned())
        );
    }

    #[test]
    fn update_region_validates_index_and_geometry() {
        let mut store = RegionStore::new(800, 600);
        store
            .add_region("pane", style(), NormRect::new(0.0, 0.0, 0.5, 0.5))
            .unwrap();

        assert_eq!(
            store.update_region(3, NormRect::new(0.0, 0.0, 0.5, 0.5)),
            Err(LayoutError::IndexOutOfRange { index: 3, len: 1 })
        );

        let before = store.region("pane").unwrap().rect;
        assert!(store
            .update_region(0, NormRect::new(0.8, 0.0, 0.5, 0.5))
            .is_err());
        assert_eq!(store.region("pane").unwrap().rect, before);

        store
            .update_region(0, NormRect::new(0.1, 0.1, 0.8, 0.8))
            .unwrap();
        assert_eq!(
            store.region("pane").unwrap().rect,
            NormRect::new(0.1, 0.1, 0.8, 0.8)
        );
    }

    #[test]
    fn screen_size_update_is_idempotent_for_regions() {
        let mut store = RegionStore::new(1200, 900);
        let rect = NormRect::new(0.0, 0.0, 0.5, 0.5);
        store.add_region("pane", style(), rect).unwrap();

        store.update_screen_size(2400, 1800);
        store.update_screen_size(2400, 1800);

        assert_eq!(store.screen_size(), (2400, 1800));
        assert_eq!(store.region("pane").unwrap().rect, rect);
    }

    #[test]
    fn normalized_conversion_uses_cached_size() {
        let mut store = RegionStore::new(1200, 900);
        assert_eq!(store.to_normalized(600.0, 450.0), (0.5, 0.5));
        store.update_screen_size(2400, 900);
        assert_eq!(store.to_normalized(600.0, 450.0), (0.25, 0.5));
    }
}
