//! Navigator: orientation discovery, grid routing, serpentine sweep.
//!
//! The robot never reports its heading, only positions. The navigator
//! therefore works entirely from observed movement:
//!
//! 1. One locating `MOVE` replaces the assumed origin with a real position.
//! 2. If that is not already the search origin, one more `MOVE` reveals the
//!    heading from the coordinate delta. From then on the heading is
//!    updated purely by the rotations the server itself orders, never
//!    re-inferred.
//! 3. Axis-at-a-time steps (`y` corrected before `x`) walk the robot to the
//!    search origin.
//! 4. The 5×5 block below-and-east of the origin is swept in boustrophedon
//!    order, asking for the secret at each cell, until one answer is
//!    non-empty.
//!
//! A `MOVE` that leaves the position unchanged means the robot is blocked;
//! the move is simply repeated. The grid is assumed passable along the
//! chosen axis eventually.

use drover_proto::{parse_confirmation, MessageKind, Position, ServerCommand};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::channel::Channel;
use crate::error::SessionError;

/// The robot's heading, as far as the server can know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// No movement observed yet.
    Unknown,
    /// Towards positive `y`.
    Up,
    /// Towards positive `x`.
    Right,
    /// Towards negative `y`.
    Down,
    /// Towards negative `x`.
    Left,
}

impl Direction {
    /// Heading after a `103 TURN LEFT`.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Heading after a `104 TURN RIGHT`.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Cyclic order used by rotate-to: Up=1, Right=2, Down=3, Left=4.
    const fn ordinal(self) -> i8 {
        match self {
            Self::Unknown => 0,
            Self::Up => 1,
            Self::Right => 2,
            Self::Down => 3,
            Self::Left => 4,
        }
    }
}

/// The cell where the secret search begins.
pub const TARGET: Position = Position::new(-2, 2);

/// Side length of the search block.
const SEARCH_SIDE: i32 = 5;

/// Number of cells in the search block; sweep steps run `0..SEARCH_STEPS`.
pub const SEARCH_STEPS: u8 = (SEARCH_SIDE * SEARCH_SIDE) as u8;

/// Cell visited at the given sweep step.
///
/// Steps snake through the block row by row, starting east along the top
/// row from [`TARGET`], then west along the second, and so on:
///
/// ```text
///  0  1  2  3  4
///  9  8  7  6  5
/// 10 11 12 13 14
/// 19 18 17 16 15
/// 20 21 22 23 24
/// ```
#[must_use]
pub fn step_cell(step: u8) -> Position {
    debug_assert!(step < SEARCH_STEPS);
    let row = i32::from(step) / SEARCH_SIDE;
    let col = i32::from(step) % SEARCH_SIDE;
    let x = if row % 2 == 0 {
        TARGET.x + col
    } else {
        TARGET.x + (SEARCH_SIDE - 1) - col
    };
    Position::new(x, TARGET.y - row)
}

/// Sweep step of a cell inside the search block.
///
/// Inverse of [`step_cell`]. The column offset uses a mathematical modulo,
/// so cells west of the target (negative offsets) still land in `0..5`.
#[must_use]
pub fn cell_step(cell: Position) -> u8 {
    let col = (cell.x - TARGET.x).rem_euclid(SEARCH_SIDE);
    let row = -(cell.y - TARGET.y);
    debug_assert!((0..SEARCH_SIDE).contains(&row));
    let step = row * SEARCH_SIDE + if row % 2 == 1 { (SEARCH_SIDE - 1) - col } else { col };
    step as u8
}

/// Drives one robot from its unknown starting pose to the secret.
///
/// Owns the session's mutable pose `(position, direction)`; the channel it
/// borrows is the session's only I/O. Created once per session, after
/// authentication.
#[derive(Debug)]
pub struct Navigator<'c, R, W> {
    channel: &'c mut Channel<R, W>,
    position: Position,
    direction: Direction,
}

impl<'c, R, W> Navigator<'c, R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Start a navigation phase on an authenticated channel.
    pub fn new(channel: &'c mut Channel<R, W>) -> Self {
        Self {
            channel,
            position: Position::ORIGIN,
            direction: Direction::Unknown,
        }
    }

    /// Run the whole phase: locate, orient, walk to the search origin,
    /// sweep. Returns the secret.
    ///
    /// # Errors
    ///
    /// Syntax faults for unparsable confirmations, logic faults for
    /// impossible movement reports or an exhausted sweep, plus any
    /// transport fault.
    pub async fn run(mut self) -> Result<Vec<u8>, SessionError> {
        self.advance().await?;
        if self.position != TARGET {
            self.orient().await?;
            while self.position != TARGET {
                self.step_towards(TARGET).await?;
            }
        }
        info!(position = %self.position, "reached search origin");
        self.sweep().await
    }

    /// Read one `OK <x> <y>` reply and adopt the reported position.
    async fn confirmation(&mut self) -> Result<(), SessionError> {
        let payload = self.channel.recv(MessageKind::OkReply).await?;
        self.position = parse_confirmation(&payload)?;
        Ok(())
    }

    /// `MOVE`, repeated until the robot actually changes cell.
    async fn advance(&mut self) -> Result<(), SessionError> {
        loop {
            let before = self.position;
            self.channel.send(ServerCommand::Move).await?;
            self.confirmation().await?;
            if self.position != before {
                return Ok(());
            }
            debug!(position = %self.position, "robot blocked, repeating move");
        }
    }

    /// Second move: derive the heading from the observed delta.
    async fn orient(&mut self) -> Result<(), SessionError> {
        let before = self.position;
        self.advance().await?;
        self.direction = heading_between(before, self.position)
            .ok_or(SessionError::Logic("movement did not reveal a heading"))?;
        debug!(direction = ?self.direction, "heading inferred");
        Ok(())
    }

    async fn turn_left(&mut self) -> Result<(), SessionError> {
        self.channel.send(ServerCommand::TurnLeft).await?;
        self.confirmation().await?;
        self.direction = self.direction.turned_left();
        Ok(())
    }

    async fn turn_right(&mut self) -> Result<(), SessionError> {
        self.channel.send(ServerCommand::TurnRight).await?;
        self.confirmation().await?;
        self.direction = self.direction.turned_right();
        Ok(())
    }

    /// Rotate until facing `target`.
    ///
    /// Turns right while the ordinal difference is positive, left while
    /// negative, re-evaluating after every turn. Up to three turns where
    /// one opposite turn would do; correct, and every intermediate
    /// confirmation keeps the position fresh.
    async fn rotate_to(&mut self, target: Direction) -> Result<(), SessionError> {
        if self.direction == Direction::Unknown {
            // Unreachable in a well-ordered session: rotation is only
            // requested after orientation.
            return Err(SessionError::Logic("rotation requested before orientation"));
        }
        while self.direction != target {
            if target.ordinal() - self.direction.ordinal() > 0 {
                self.turn_right().await?;
            } else {
                self.turn_left().await?;
            }
        }
        Ok(())
    }

    /// One navigation step towards `target`: fix `y` first, then `x`.
    async fn step_towards(&mut self, target: Position) -> Result<(), SessionError> {
        if self.position.y > target.y {
            self.rotate_to(Direction::Down).await?;
        } else if self.position.y < target.y {
            self.rotate_to(Direction::Up).await?;
        } else if self.position.x < target.x {
            self.rotate_to(Direction::Right).await?;
        } else {
            self.rotate_to(Direction::Left).await?;
        }
        self.advance().await
    }

    /// Walk all the way to `target`.
    async fn go_to(&mut self, target: Position) -> Result<(), SessionError> {
        while self.position != target {
            self.step_towards(target).await?;
        }
        Ok(())
    }

    /// Serpentine sweep: ask for the secret here, advance one step on an
    /// empty answer.
    async fn sweep(&mut self) -> Result<Vec<u8>, SessionError> {
        loop {
            self.channel.send(ServerCommand::GetMessage).await?;
            let secret = self.channel.recv(MessageKind::Secret).await?;
            if !secret.is_empty() {
                return Ok(secret);
            }

            let step = cell_step(self.position) + 1;
            if step >= SEARCH_STEPS {
                return Err(SessionError::Logic("search exhausted without a secret"));
            }
            let next = step_cell(step);
            debug!(step, cell = %next, "cell empty, advancing sweep");
            self.go_to(next).await?;
        }
    }
}

/// Heading implied by a single-axis move from `from` to `to`.
///
/// `None` for a diagonal jump or no movement at all; either means the robot
/// is not behaving like a robot.
fn heading_between(from: Position, to: Position) -> Option<Direction> {
    if from.x == to.x && from.y != to.y {
        Some(if from.y < to.y {
            Direction::Up
        } else {
            Direction::Down
        })
    } else if from.y == to.y && from.x != to.x {
        Some(if from.x < to.x {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        None
    }
}
