use crate::{direction::Direction, error::SpiralError};

/// Largest absolute bound accepted by [`Region::new`].
///
/// The traversals step up to one region-extent past the bounds before filtering or
/// relocating, so bounds are kept well inside `i32` to leave that headroom.
pub const COORD_LIMIT: i32 = 1 << 28;

/// Inclusive rectangle of grid cells. An inverted rectangle (`left > right` or
/// `top > bottom`) is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

fn check_coord(value: i32) -> Result<i32, SpiralError> {
    if (-COORD_LIMIT..=COORD_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(SpiralError::CoordinateOutOfRange { value })
    }
}

impl Region {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Region, SpiralError> {
        Ok(Region {
            left: check_coord(left)?,
            top: check_coord(top)?,
            right: check_coord(right)?,
            bottom: check_coord(bottom)?,
        })
    }

    pub fn from_corners(
        (left, top): (i32, i32),
        (right, bottom): (i32, i32),
    ) -> Result<Region, SpiralError> {
        Region::new(left, top, right, bottom)
    }

    /// Region spanning from the origin to `(right, bottom)`.
    pub fn with_bottom_right(right: i32, bottom: i32) -> Result<Region, SpiralError> {
        Region::new(0, 0, right, bottom)
    }

    pub(crate) fn cell((x, y): (i32, i32)) -> Region {
        Region {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    pub(crate) fn set_edge(&mut self, dir: Direction, value: i32) {
        match dir {
            Direction::Right => self.right = value,
            Direction::Up => self.top = value,
            Direction::Left => self.left = value,
            Direction::Down => self.bottom = value,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.right.abs_diff(self.left) + 1
        }
    }

    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.bottom.abs_diff(self.top) + 1
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    /// Starting cell of every traversal: the floor of the true center on each axis.
    /// For odd extents this is the exact middle; for even extents it leans toward the
    /// top-left, which keeps a square region's spiral fully inside it.
    pub fn center(&self) -> (i32, i32) {
        (
            (self.right - self.left).div_euclid(2) + self.left,
            (self.bottom - self.top).div_euclid(2) + self.top,
        )
    }

    /// The bound on the side `dir` points toward.
    pub fn edge(&self, dir: Direction) -> i32 {
        match dir {
            Direction::Right => self.right,
            Direction::Up => self.top,
            Direction::Left => self.left,
            Direction::Down => self.bottom,
        }
    }

    /// True if `cell` lies past the edge on the side `dir` points toward.
    pub fn is_beyond(&self, dir: Direction, cell: (i32, i32)) -> bool {
        let value = dir.axis_of(cell);
        let edge = self.edge(dir);
        match dir.sign() {
            1 => value > edge,
            _ => value < edge,
        }
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let Region {
            left,
            top,
            right,
            bottom,
        } = *self;
        (top..=bottom).flat_map(move |y| (left..=right).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod test {
    use super::{COORD_LIMIT, Region};
    use crate::{direction::Direction, error::SpiralError};

    #[test]
    fn test_center_floor_convention() {
        assert_eq!(Region::new(0, 0, 2, 2).unwrap().center(), (1, 1));
        assert_eq!(Region::new(0, 0, 3, 3).unwrap().center(), (1, 1));
        assert_eq!(Region::new(0, 0, 4, 0).unwrap().center(), (2, 0));
        assert_eq!(Region::new(11, 20, 15, 24).unwrap().center(), (13, 22));
        assert_eq!(Region::new(-5, -4, -2, -1).unwrap().center(), (-4, -3));
    }

    #[test]
    fn test_dimensions() {
        let region = Region::new(-2, 3, 4, 3).unwrap();
        assert_eq!(region.width(), 7);
        assert_eq!(region.height(), 1);
        assert_eq!(region.area(), 7);
        assert!(!region.is_empty());
        assert_eq!(region.cells().count(), 7);

        let inverted = Region::new(3, 0, 2, 5).unwrap();
        assert!(inverted.is_empty());
        assert_eq!(inverted.area(), 0);
        assert_eq!(inverted.cells().count(), 0);
        assert!(!inverted.contains((2, 1)));
    }

    #[test]
    fn test_edges() {
        let region = Region::with_bottom_right(4, 2).unwrap();
        assert!(region.is_beyond(Direction::Right, (5, 0)));
        assert!(!region.is_beyond(Direction::Right, (4, 0)));
        assert!(region.is_beyond(Direction::Up, (0, -1)));
        assert!(region.is_beyond(Direction::Left, (-1, 9)));
        assert!(region.is_beyond(Direction::Down, (0, 3)));
        assert!(!region.is_beyond(Direction::Down, (9, 2)));
    }

    #[test]
    fn test_coordinate_range() {
        assert!(Region::new(-COORD_LIMIT, -COORD_LIMIT, COORD_LIMIT, COORD_LIMIT).is_ok());
        assert_eq!(
            Region::new(0, 0, COORD_LIMIT + 1, 0),
            Err(SpiralError::CoordinateOutOfRange {
                value: COORD_LIMIT + 1
            })
        );
        assert_eq!(
            Region::from_corners((i32::MIN, 0), (0, 0)),
            Err(SpiralError::CoordinateOutOfRange { value: i32::MIN })
        );
    }
}
