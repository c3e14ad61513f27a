use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SpiralError;

/// Direction of travel on the grid. `y` grows downward, so `Up` decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Up,
    Left,
    Down,
}

/// Which way the spiral turns after each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Rotation {
    /// `Right -> Down -> Left -> Up`
    #[default]
    Clockwise,
    /// `Right -> Up -> Left -> Down`
    CounterClockwise,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    pub fn index(self) -> u8 {
        match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }

    pub fn turn(self, rotation: Rotation) -> Direction {
        let step = match rotation {
            Rotation::CounterClockwise => 1,
            Rotation::Clockwise => 3,
        };
        Direction::ALL[usize::from((self.index() + step) % 4)]
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[usize::from((self.index() + 2) % 4)]
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    /// `+1` when travelling this way increases the coordinate on its axis.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Right | Direction::Down => 1,
            Direction::Up | Direction::Left => -1,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// The component of `cell` on this direction's axis.
    pub fn axis_of(self, (x, y): (i32, i32)) -> i32 {
        if self.is_horizontal() { x } else { y }
    }
}

impl TryFrom<u8> for Direction {
    type Error = SpiralError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(SpiralError::InvalidDirection(value))
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Right => write!(f, "→"),
            Direction::Up => write!(f, "↑"),
            Direction::Left => write!(f, "←"),
            Direction::Down => write!(f, "↓"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Direction, Rotation};
    use crate::error::SpiralError;

    #[test]
    fn test_turn_cycles() {
        let mut dir = Direction::Right;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(dir);
            dir = dir.turn(Rotation::Clockwise);
        }
        assert_eq!(
            seen,
            [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
        );
        assert_eq!(dir, Direction::Right);

        let ccw: Vec<_> = Direction::ALL
            .iter()
            .map(|d| d.turn(Rotation::CounterClockwise))
            .collect();
        assert_eq!(
            ccw,
            [Direction::Up, Direction::Left, Direction::Down, Direction::Right]
        );
    }

    #[test]
    fn test_opposite_and_sign() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.sign(), -dir.opposite().sign());
            let (dx, dy) = dir.delta();
            assert_eq!(dx + dy, dir.sign());
        }
    }

    #[test]
    fn test_try_from_index() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir.index()), Ok(dir));
        }
        assert_eq!(Direction::try_from(4), Err(SpiralError::InvalidDirection(4)));
        assert_eq!(
            Direction::try_from(255),
            Err(SpiralError::InvalidDirection(255))
        );
    }

    #[test]
    fn test_display_arrows() {
        let arrows: Vec<_> = Direction::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(arrows, ["→", "↑", "←", "↓"]);
        assert_eq!(format!("heading {}", Direction::Down), "heading ↓");
    }
}
