//! Resumable spiral walk over a [`Region`], one cell per [`StatefulSpiral::advance`].
//!
//! Each character shows the direction of the step taken from that cell, for the
//! default clockwise rotation starting at the center (`x` is the last cell):
//!
//! ```text
//! > > > > x
//! ^ > > > v
//! ^ ^ > v v
//! ^ ^ < < v
//! ^ < < < <
//! ```
//!
//! The whole walk is carried by a [`SpiralState`], a small `Copy` value that moves
//! forward through [`SpiralState::advanced`]. Cells past the region are never
//! visited: when a step leaves the region, [`correct_bounds`] jumps straight to the
//! first in-region cell of the next ring segment.
use std::iter::FusedIterator;

use log::{debug, trace};

use crate::{
    direction::{Direction, Rotation},
    error::SpiralError,
    region::Region,
};

/// A rectangle can be left through at most 4 distinct sides before it covers the region.
pub const MAX_RELOCATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralState {
    position: (i32, i32),
    claimed: Region,
    direction: Direction,
    rotation: Rotation,
    segment_len: u32,
    step: u32,
    active: bool,
}

/// Result of moving a [`SpiralState`] forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Continued(SpiralState),
    /// The claimed rectangle already equals the region; nothing is left to visit.
    Exhausted,
}

impl SpiralState {
    fn new(region: &Region, start: (i32, i32), direction: Direction, rotation: Rotation) -> Self {
        SpiralState {
            position: start,
            claimed: Region::cell(start),
            direction,
            rotation,
            segment_len: 1,
            step: 0,
            active: !region.is_empty(),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Bounding box of every cell visited so far, including the current one once its
    /// segment has completed.
    pub fn claimed(&self) -> Region {
        self.claimed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn segment_len(&self) -> u32 {
        self.segment_len
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Takes one step along the current direction, relocating and turning as needed.
    pub fn advanced(mut self, region: &Region) -> Advance {
        if !self.active {
            return Advance::Exhausted;
        }
        let (dx, dy) = self.direction.delta();
        self.position = (self.position.0 + dx, self.position.1 + dy);
        self.step += 1;

        let mut state = match correct_bounds(self, region) {
            Advance::Continued(state) => state,
            Advance::Exhausted => return Advance::Exhausted,
        };
        if state.step == state.segment_len {
            state.turn();
        }
        Advance::Continued(state)
    }

    /// Closes the segment just walked and starts the next one.
    ///
    /// Away from the region's edges this grows the segment length by one on every
    /// turn into a horizontal direction, giving lengths 1, 1, 2, 2, 3, 3, ...
    fn turn(&mut self) {
        self.claimed
            .set_edge(self.direction, self.direction.axis_of(self.position));
        self.direction = self.direction.turn(self.rotation);
        self.begin_segment();
    }

    /// Segment length runs from the current cell to one past the claimed rectangle.
    fn begin_segment(&mut self) {
        let target = self.claimed.edge(self.direction) + self.direction.sign();
        self.segment_len = target.abs_diff(self.direction.axis_of(self.position));
        self.step = 0;
    }

    /// Jumps over the segment lying outside the region past `side`.
    ///
    /// The segment after `side` runs along the perpendicular edge and is entirely out of
    /// bounds, so the walk resumes on the one after that, at its first in-region cell.
    fn relocate(&mut self, side: Direction, region: &Region) {
        let skipped = side.turn(self.rotation);
        let along = region.edge(side);
        let across = self.claimed.edge(skipped) + skipped.sign();
        self.position = if side.is_horizontal() {
            (along, across)
        } else {
            (across, along)
        };
        let limit = region.edge(skipped);
        let clamped = if skipped.sign() > 0 {
            across.min(limit)
        } else {
            across.max(limit)
        };
        self.claimed.set_edge(skipped, clamped);
        self.direction = side.opposite();
        self.begin_segment();
        trace!(
            "left region past {side}, resuming at {:?} heading {}",
            self.position, self.direction
        );
    }
}

/// Brings an out-of-region position back inside, or reports that the region is covered.
pub fn correct_bounds(mut state: SpiralState, region: &Region) -> Advance {
    let mut relocations = 0;
    while !region.contains(state.position) {
        if relocations == MAX_RELOCATIONS {
            debug!("spiral over {region:?} exhausted");
            return Advance::Exhausted;
        }
        let exceeded = Direction::ALL.into_iter().find(|&side| {
            region.is_beyond(side, state.position)
                && (state.direction == side || state.direction == side.turn(state.rotation))
        });
        let Some(side) = exceeded else {
            // Only reachable from a position no segment of this spiral can produce.
            debug!(
                "spiral over {region:?} left bounds at {:?} heading {}",
                state.position, state.direction
            );
            return Advance::Exhausted;
        };
        state.relocate(side, region);
        relocations += 1;
    }
    Advance::Continued(state)
}

/// Visits every cell of a region exactly once, spiralling out from a start cell.
///
/// Pull-style use: check [`is_active`](Self::is_active), read
/// [`current`](Self::current), then [`advance`](Self::advance). The iterator impl does
/// the same and yields the current cell before advancing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatefulSpiral {
    region: Region,
    state: SpiralState,
}

impl StatefulSpiral {
    /// Spiral from the region's center, heading right, turning clockwise.
    pub fn new(region: Region) -> StatefulSpiral {
        let state = SpiralState::new(
            &region,
            region.center(),
            Direction::default(),
            Rotation::default(),
        );
        StatefulSpiral { region, state }
    }

    pub fn builder(region: Region) -> SpiralBuilder {
        SpiralBuilder::new(region)
    }

    pub fn advance(&mut self) {
        match self.state.advanced(&self.region) {
            Advance::Continued(state) => self.state = state,
            Advance::Exhausted => self.state.active = false,
        }
    }

    /// Advances up to `steps` times, stopping early once the walk ends. Returns the
    /// number of advances made.
    pub fn advance_by(&mut self, steps: usize) -> usize {
        let mut taken = 0;
        while taken < steps && self.is_active() {
            self.advance();
            taken += 1;
        }
        taken
    }

    pub fn current(&self) -> (i32, i32) {
        self.state.position
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn state(&self) -> SpiralState {
        self.state
    }
}

impl Iterator for StatefulSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_active() {
            return None;
        }
        let cell = self.current();
        self.advance();
        Some(cell)
    }
}

impl FusedIterator for StatefulSpiral {}

#[derive(Debug, Clone)]
pub struct SpiralBuilder {
    region: Region,
    start: Option<(i32, i32)>,
    direction: Result<Direction, SpiralError>,
    rotation: Rotation,
}

impl SpiralBuilder {
    pub fn new(region: Region) -> SpiralBuilder {
        SpiralBuilder {
            region,
            start: None,
            direction: Ok(Direction::default()),
            rotation: Rotation::default(),
        }
    }

    pub fn start(mut self, start: (i32, i32)) -> Self {
        self.start = Some(start);
        self
    }

    pub fn start_option(mut self, start: Option<(i32, i32)>) -> Self {
        self.start = start;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Ok(direction);
        self
    }

    /// Direction by index: 0 right, 1 up, 2 left, 3 down. Anything else fails the build.
    pub fn direction_index(mut self, index: u8) -> Self {
        self.direction = Direction::try_from(index);
        self
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn build(self) -> Result<StatefulSpiral, SpiralError> {
        let direction = self.direction?;
        let start = self.start.unwrap_or_else(|| self.region.center());
        if !self.region.is_empty() && !self.region.contains(start) {
            let (x, y) = start;
            return Err(SpiralError::StartOutsideRegion { x, y });
        }
        let state = SpiralState::new(&self.region, start, direction, self.rotation);
        Ok(StatefulSpiral {
            region: self.region,
            state,
        })
    }
}
