//! Merged-region index used to suppress duplicated content on read.

use calamine::Dimensions;

use crate::spec::SpecMergedRegion;

/// Anything exposing top-left and bottom-right corners as `(row, col)`.
pub trait TraitRegionCorners {
    /// Top-left corner.
    fn top_left(&self) -> (usize, usize);
    /// Bottom-right corner.
    fn bottom_right(&self) -> (usize, usize);
}

impl TraitRegionCorners for SpecMergedRegion {
    fn top_left(&self) -> (usize, usize) {
        (self.top, self.left)
    }

    fn bottom_right(&self) -> (usize, usize) {
        (self.bottom, self.right)
    }
}

impl TraitRegionCorners for Dimensions {
    fn top_left(&self) -> (usize, usize) {
        (self.start.0 as usize, self.start.1 as usize)
    }

    fn bottom_right(&self) -> (usize, usize) {
        (self.end.0 as usize, self.end.1 as usize)
    }
}

impl<T: TraitRegionCorners + ?Sized> TraitRegionCorners for &T {
    fn top_left(&self) -> (usize, usize) {
        (**self).top_left()
    }

    fn bottom_right(&self) -> (usize, usize) {
        (**self).bottom_right()
    }
}

/// Merged regions of one sheet.
///
/// Regions are expected to be disjoint. Overlaps are recorded as warnings at
/// construction time and queries use the first matching region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedRegionIndex {
    l_regions: Vec<SpecMergedRegion>,
    warnings: Vec<String>,
}

impl MergedRegionIndex {
    /// Build the index from engine-reported regions.
    pub fn from_regions<I>(regions: I) -> Self
    where
        I: IntoIterator,
        I::Item: TraitRegionCorners,
    {
        let l_regions: Vec<SpecMergedRegion> = regions
            .into_iter()
            .map(|region| {
                let (top, left) = region.top_left();
                let (bottom, right) = region.bottom_right();
                SpecMergedRegion {
                    top,
                    left,
                    bottom,
                    right,
                }
            })
            .collect();

        let mut warnings = Vec::new();
        for (n_idx, region) in l_regions.iter().enumerate() {
            for other in &l_regions[n_idx + 1..] {
                if region.overlaps(other) {
                    let c_msg = format!(
                        "Overlapping merged regions {region} and {other}; first match wins."
                    );
                    log::warn!("{c_msg}");
                    warnings.push(c_msg);
                }
            }
        }

        Self {
            l_regions,
            warnings,
        }
    }

    /// Stored regions in engine order.
    pub fn regions(&self) -> &[SpecMergedRegion] {
        &self.l_regions
    }

    /// Data-integrity warnings raised while building.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of stored regions.
    pub fn len(&self) -> usize {
        self.l_regions.len()
    }

    /// Whether no regions are stored.
    pub fn is_empty(&self) -> bool {
        self.l_regions.is_empty()
    }

    /// Region covering `(row, col)`, first match in engine order.
    pub fn find(&self, row: usize, col: usize) -> Option<&SpecMergedRegion> {
        self.l_regions
            .iter()
            .find(|region| region.contains(row, col))
    }

    /// Whether `(row, col)` is covered by a region but is not its anchor.
    ///
    /// Anchors and uncovered cells return `false`.
    pub fn contains_non_anchor(&self, row: usize, col: usize) -> bool {
        self.find(row, col)
            .is_some_and(|region| !region.is_anchor(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(top: usize, left: usize, bottom: usize, right: usize) -> SpecMergedRegion {
        SpecMergedRegion {
            top,
            left,
            bottom,
            right,
        }
    }

    #[test]
    fn test_contains_non_anchor_rectangle() {
        let index = MergedRegionIndex::from_regions([region(2, 1, 4, 3)]);
        assert!(!index.contains_non_anchor(2, 1));
        assert!(index.contains_non_anchor(3, 2));
        assert!(index.contains_non_anchor(4, 3));
        assert!(index.contains_non_anchor(2, 3));
        assert!(!index.contains_non_anchor(5, 5));
        assert!(!index.contains_non_anchor(1, 1));
        assert!(!index.contains_non_anchor(2, 0));
        assert!(index.warnings().is_empty());
    }

    #[test]
    fn test_empty_index_never_suppresses() {
        let index = MergedRegionIndex::default();
        assert!(index.is_empty());
        assert!(!index.contains_non_anchor(0, 0));
    }

    #[test]
    fn test_builds_from_engine_dimensions() {
        let l_dims = vec![Dimensions {
            start: (0, 0),
            end: (1, 0),
        }];
        let index = MergedRegionIndex::from_regions(&l_dims);
        assert_eq!(index.regions(), &[region(0, 0, 1, 0)]);
        assert!(!index.contains_non_anchor(0, 0));
        assert!(index.contains_non_anchor(1, 0));
    }

    #[test]
    fn test_overlap_is_warned_and_first_match_wins() {
        let index = MergedRegionIndex::from_regions([region(0, 0, 2, 2), region(1, 1, 3, 3)]);
        assert_eq!(index.warnings().len(), 1);
        assert_eq!(index.find(1, 1), Some(&region(0, 0, 2, 2)));
        assert!(index.contains_non_anchor(1, 1));
        assert!(index.contains_non_anchor(3, 3));
    }
}
