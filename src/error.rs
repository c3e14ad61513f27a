use crate::region::COORD_LIMIT;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralError {
    #[error("Invalid direction index {0}, expected 0 (right), 1 (up), 2 (left) or 3 (down)")]
    InvalidDirection(u8),
    #[error("Coordinate {value} is outside the supported range of ±{}", COORD_LIMIT)]
    CoordinateOutOfRange { value: i32 },
    #[error("Start point ({x}, {y}) is outside the region")]
    StartOutsideRegion { x: i32, y: i32 },
    #[error(
        "The fast and reference traversals support only the default start, direction and rotation"
    )]
    FixedOrientation,
}
