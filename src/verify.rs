//! Cross-checks the three traversals against each other for one region.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    fast_spiral::fast_spiral, reference_spiral::reference_spiral, region::Region,
    spiral_iterator::StatefulSpiral,
};

/// True if `cells` holds every cell of `region` exactly once and nothing else.
pub fn covers_exactly(region: &Region, cells: &[(i32, i32)]) -> bool {
    if cells.len() as u64 != region.area() {
        return false;
    }
    let mut seen = HashSet::with_capacity(cells.len());
    cells
        .iter()
        .all(|&cell| region.contains(cell) && seen.insert(cell))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub region: Region,
    pub cells: u64,
    pub fast_matches_reference: bool,
    pub stateful_covers: bool,
    /// Same cells in the same order, which is stronger than the covering guarantee.
    pub stateful_matches_fast: bool,
}

impl Verification {
    pub fn is_consistent(&self) -> bool {
        self.fast_matches_reference && self.stateful_covers
    }
}

/// Runs all three traversals over `region` with default start, direction and rotation.
pub fn verify(region: Region) -> Verification {
    let fast = fast_spiral(region);
    let reference = reference_spiral(region);
    let stateful: Vec<_> = StatefulSpiral::new(region).collect();
    let verification = Verification {
        region,
        cells: region.area(),
        fast_matches_reference: fast == reference,
        stateful_covers: covers_exactly(&region, &stateful),
        stateful_matches_fast: stateful == fast,
    };
    if verification.is_consistent() {
        debug!("{region:?} verified over {} cells", verification.cells);
    } else {
        warn!("{region:?} failed verification: {verification:?}");
    }
    verification
}

#[cfg(test)]
mod test {
    use super::{covers_exactly, verify};
    use crate::region::Region;

    #[test]
    fn test_covers_exactly() {
        let region = Region::new(0, 0, 1, 1).unwrap();
        assert!(covers_exactly(&region, &[(0, 0), (1, 1), (1, 0), (0, 1)]));
        assert!(!covers_exactly(&region, &[(0, 0), (1, 1), (1, 0)]));
        assert!(!covers_exactly(&region, &[(0, 0), (1, 1), (1, 0), (1, 0)]));
        assert!(!covers_exactly(&region, &[(0, 0), (1, 1), (1, 0), (2, 0)]));
        assert!(covers_exactly(&Region::new(1, 0, 0, 0).unwrap(), &[]));
    }

    #[test]
    fn test_verify_regions() {
        for (right, bottom) in [(0, 0), (2, 2), (4, 0), (7, 3), (2, 9), (10, 10)] {
            let verification = verify(Region::with_bottom_right(right, bottom).unwrap());
            assert!(verification.is_consistent(), "{verification:?}");
            assert!(verification.stateful_matches_fast, "{verification:?}");
        }
    }
}
