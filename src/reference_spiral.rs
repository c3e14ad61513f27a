use crate::region::Region;

/// Naive spiral used as an oracle for [`FastSpiral`](crate::fast_spiral::FastSpiral) and
/// [`StatefulSpiral`](crate::spiral_iterator::StatefulSpiral).
///
/// Grows an unbounded square spiral from the center and keeps only the cells that fall
/// inside the region. Stops once a full row and column pass ends outside the region on
/// both axes, i.e. the square has outgrown it in every direction. Much slower than the
/// closed form on long thin regions.
pub fn reference_spiral(region: Region) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    if region.is_empty() {
        return cells;
    }
    let (mid_x, _) = region.center();
    let (mut x, mut y) = region.center();
    let mut radius2 = 1;
    let mut sign = 1;
    loop {
        let steps = (radius2 - 2 * sign * (x - mid_x) + 1).div_euclid(2);
        for _ in 0..steps {
            if region.contains((x, y)) {
                cells.push((x, y));
            }
            x += sign;
        }
        for _ in 0..steps {
            if region.contains((x, y)) {
                cells.push((x, y));
            }
            y += sign;
        }
        let x_inside = (region.left()..=region.right()).contains(&x);
        let y_inside = (region.top()..=region.bottom()).contains(&y);
        if !x_inside && !y_inside {
            break;
        }
        sign = -sign;
        radius2 += 1;
    }
    cells
}

#[cfg(test)]
mod test {
    use super::reference_spiral;
    use crate::region::Region;

    #[test]
    fn test_small_regions() {
        let single = Region::new(0, 0, 0, 0).unwrap();
        assert_eq!(reference_spiral(single), [(0, 0)]);

        let square = Region::new(0, 0, 2, 2).unwrap();
        assert_eq!(
            reference_spiral(square),
            [(1, 1), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1), (0, 0), (1, 0), (2, 0)]
        );

        let row = Region::new(0, 0, 4, 0).unwrap();
        assert_eq!(
            reference_spiral(row),
            [(2, 0), (3, 0), (1, 0), (4, 0), (0, 0)]
        );
    }

    #[test]
    fn test_rectangle_covers() {
        let region = Region::new(-3, 4, 5, 6).unwrap();
        let mut cells = reference_spiral(region);
        assert_eq!(cells[0], region.center());
        cells.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(cells, region.cells().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_region() {
        let region = Region::new(0, 5, 0, 4).unwrap();
        assert!(reference_spiral(region).is_empty());
    }
}
