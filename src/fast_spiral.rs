use std::iter::FusedIterator;

use crate::region::Region;

/// `ceil(n / 2)`.
fn ceil_half(n: i32) -> i32 {
    (n + 1).div_euclid(2)
}

/// Which axes the current half-ring has grown past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ring {
    steps: i32,
    past_cols: bool,
    at_rows: bool,
    past_rows: bool,
}

impl Ring {
    fn rows_done(&self) -> bool {
        self.at_rows || self.past_rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Plan,
    Row { remaining: u32, ring: Ring },
    Column { remaining: u32, ring: Ring },
    Done,
}

/// Closed-form spiral over a region, clockwise from its center.
///
/// The spiral is grown in half-rings: a row run followed by a column run, after which
/// the travel sign flips and the radius grows by one half. Once the radius reaches the
/// region's extent on one axis, runs along that axis are clamped to the region so the
/// walk never leaves it. Output matches [`reference_spiral`](crate::reference_spiral::reference_spiral)
/// cell for cell.
#[derive(Debug, Clone)]
pub struct FastSpiral {
    mid: (i32, i32),
    cursor: (i32, i32),
    width: u32,
    height: u32,
    /// Twice the half-integer radius.
    radius2: i32,
    max_radius2: (i32, i32),
    sign: i32,
    phase: Phase,
    remaining: u64,
}

impl FastSpiral {
    pub fn new(region: Region) -> FastSpiral {
        let mid = region.center();
        let (mid_x, mid_y) = mid;
        let odd_width = (region.right() - region.left() + 1).rem_euclid(2);
        let odd_height = (region.bottom() - region.top() + 1).rem_euclid(2);
        FastSpiral {
            mid,
            cursor: mid,
            width: region.width(),
            height: region.height(),
            radius2: 1,
            max_radius2: (
                2 * (region.right() - mid_x) + odd_width,
                2 * (region.bottom() - mid_y) + odd_height,
            ),
            sign: 1,
            phase: if region.is_empty() {
                Phase::Done
            } else {
                Phase::Plan
            },
            remaining: region.area(),
        }
    }

    fn plan(&self) -> Phase {
        let (max_rx2, max_ry2) = self.max_radius2;
        let ring = Ring {
            steps: ceil_half(self.radius2 - 2 * self.sign * (self.cursor.0 - self.mid.0)),
            past_cols: max_rx2 <= self.radius2,
            at_rows: max_ry2 == self.radius2,
            past_rows: max_ry2 < self.radius2,
        };
        let remaining = if ring.past_rows {
            0
        } else if ring.past_cols {
            self.width
        } else {
            u32::try_from(ring.steps).unwrap_or(0)
        };
        Phase::Row { remaining, ring }
    }

    fn finish_row(&mut self, ring: Ring) -> Phase {
        if ring.past_cols {
            // the last row step overshot the region
            self.cursor.0 -= self.sign;
            if ring.past_rows {
                return Phase::Done;
            }
        }
        let remaining = if ring.past_rows {
            self.height
        } else if ring.past_cols {
            0
        } else {
            u32::try_from(ring.steps).unwrap_or(0)
        };
        Phase::Column { remaining, ring }
    }

    fn finish_column(&mut self, ring: Ring) -> Phase {
        if ring.rows_done() {
            self.cursor.1 -= self.sign;
            if ring.past_cols {
                return Phase::Done;
            }
        }
        if ring.past_cols {
            // the skipped column would have left us on the next row
            self.cursor.1 = self.mid.1 + self.sign * ceil_half(self.radius2);
        }
        self.sign = -self.sign;
        self.radius2 += 1;
        if ring.rows_done() {
            self.cursor.0 = self.mid.0 + self.sign * ceil_half(self.radius2);
        }
        Phase::Plan
    }

    fn emit(&mut self) -> (i32, i32) {
        self.remaining = self.remaining.saturating_sub(1);
        self.cursor
    }
}

impl Iterator for FastSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let phase = self.phase;
            self.phase = match phase {
                Phase::Done => return None,
                Phase::Plan => self.plan(),
                Phase::Row { remaining: 0, ring } => self.finish_row(ring),
                Phase::Row { remaining, ring } => {
                    let cell = self.emit();
                    self.cursor.0 += self.sign;
                    self.phase = Phase::Row {
                        remaining: remaining - 1,
                        ring,
                    };
                    return Some(cell);
                }
                Phase::Column { remaining: 0, ring } => self.finish_column(ring),
                Phase::Column { remaining, ring } => {
                    let cell = self.emit();
                    self.cursor.1 += self.sign;
                    self.phase = Phase::Column {
                        remaining: remaining - 1,
                        ring,
                    };
                    return Some(cell);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for FastSpiral {}

/// Every cell of `region`, center first, in one call.
pub fn fast_spiral(region: Region) -> Vec<(i32, i32)> {
    FastSpiral::new(region).collect()
}
