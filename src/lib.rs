#![doc = include_str!("../README.md")]
pub mod config;
pub mod csv_recorder;
pub mod direction;
pub mod error;
pub mod fast_spiral;
pub mod logger;
pub mod reference_spiral;
pub mod region;
pub mod spiral_iterator;
pub mod verify;

pub use direction::{Direction, Rotation};
pub use error::SpiralError;
pub use fast_spiral::{FastSpiral, fast_spiral};
pub use reference_spiral::reference_spiral;
pub use region::{COORD_LIMIT, Region};
pub use spiral_iterator::{Advance, SpiralBuilder, SpiralState, StatefulSpiral};
