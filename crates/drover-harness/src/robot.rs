//! Robot peers for driving the server under simulation.
//!
//! [`ScriptedRobot`] speaks the framed protocol one line at a time and is
//! the tool for exact-transcript and error-path tests. [`GridRobot`] sits
//! on top of it and behaves like a real robot: it keeps a pose, walks when
//! told to, stumbles on demand, and answers pick-up requests from a
//! configured secret cell.

use std::io;

use drover_core::nav::Direction;
use drover_proto::{keyed_hash, Position, ServerCommand, CLIENT_KEY, SERVER_KEY, TERMINATOR};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use turmoil::net::TcpStream;

/// A frame-level robot peer: say lines, hear lines, nothing else.
pub struct ScriptedRobot {
    stream: TcpStream,
}

impl ScriptedRobot {
    /// Connect to the server under simulation.
    ///
    /// # Errors
    ///
    /// Connection failures from the simulated network.
    pub async fn connect(addr: &str) -> io::Result<Self> {
        Ok(Self {
            stream: TcpStream::connect(addr).await?,
        })
    }

    /// Send one payload, terminator appended.
    ///
    /// # Errors
    ///
    /// Write failures from the simulated network.
    pub async fn say(&mut self, payload: &[u8]) -> io::Result<()> {
        self.stream.write_all(payload).await?;
        self.stream.write_all(&TERMINATOR).await
    }

    /// Send raw bytes with no terminator, for malformed-input tests.
    ///
    /// # Errors
    ///
    /// Write failures from the simulated network.
    pub async fn say_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes).await
    }

    /// Receive one payload, terminator stripped.
    ///
    /// The server only ever sends clean command lines, so a bare
    /// ends-with-terminator scan is enough here; the lookahead automaton is
    /// the server's problem.
    ///
    /// # Errors
    ///
    /// `UnexpectedEof` if the server closes mid-line, plus network errors.
    pub async fn hear(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        loop {
            line.push(self.stream.read_u8().await?);
            if line.ends_with(&TERMINATOR) {
                line.truncate(line.len() - TERMINATOR.len());
                return Ok(line);
            }
        }
    }

    /// Hear one line and assert its exact contents.
    ///
    /// # Errors
    ///
    /// As [`ScriptedRobot::hear`].
    ///
    /// # Panics
    ///
    /// If the line differs from `expected`.
    pub async fn expect(&mut self, expected: &[u8]) -> io::Result<()> {
        let line = self.hear().await?;
        assert_eq!(
            line,
            expected,
            "expected {:?}, heard {:?}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&line),
        );
        Ok(())
    }

    /// Run the login exchange as a well-behaved robot named `name`.
    ///
    /// Verifies the server's hash offer on the way.
    ///
    /// # Errors
    ///
    /// As [`ScriptedRobot::hear`].
    ///
    /// # Panics
    ///
    /// If the server's hash or acknowledgement is wrong.
    pub async fn login(&mut self, name: &[u8]) -> io::Result<()> {
        self.say(name).await?;

        let offered = self.hear().await?;
        assert_eq!(
            offered,
            keyed_hash(SERVER_KEY, name).to_string().as_bytes(),
            "server offered a wrong hash"
        );

        self.say(keyed_hash(CLIENT_KEY, name).to_string().as_bytes())
            .await?;
        self.expect(ServerCommand::Ok.line().as_bytes()).await
    }

    /// Assert the server closes the connection without sending anything
    /// more.
    ///
    /// # Errors
    ///
    /// Network errors other than the expected clean close.
    ///
    /// # Panics
    ///
    /// If any byte arrives before the close.
    pub async fn expect_closed(&mut self) -> io::Result<()> {
        let mut buf = [0u8; 1];
        let read = self.stream.read(&mut buf).await?;
        assert_eq!(read, 0, "expected silent close, server sent {:#04x}", buf[0]);
        Ok(())
    }
}

/// A self-driving robot on the simulated grid.
///
/// Construct with a starting pose, configure a secret and any misbehavior,
/// then [`GridRobot::serve`] plays the whole session: it logs in, obeys
/// movement commands, and stops at logout or at any server error line.
pub struct GridRobot {
    name: String,
    position: Position,
    heading: Direction,
    secret_cell: Position,
    secret: Vec<u8>,
    stumbles: u32,
    recharge_pauses: u32,
}

impl GridRobot {
    /// A robot at `position` facing `heading`, with no secret anywhere.
    ///
    /// # Panics
    ///
    /// If `heading` is [`Direction::Unknown`]; a robot always knows where
    /// it is pointing, only the server starts ignorant.
    #[must_use]
    pub fn new(name: &str, position: Position, heading: Direction) -> Self {
        assert_ne!(heading, Direction::Unknown, "robot heading must be cardinal");
        Self {
            name: name.to_owned(),
            position,
            heading,
            secret_cell: position,
            secret: Vec::new(),
            stumbles: 0,
            recharge_pauses: 0,
        }
    }

    /// Place the secret at `cell`.
    #[must_use]
    pub fn with_secret(mut self, cell: Position, secret: &[u8]) -> Self {
        self.secret_cell = cell;
        self.secret = secret.to_vec();
        self
    }

    /// Refuse to move on the next `count` `MOVE` commands.
    #[must_use]
    pub fn with_stumbles(mut self, count: u32) -> Self {
        self.stumbles = count;
        self
    }

    /// Open a recharging pause before each of the next `count` replies.
    #[must_use]
    pub fn with_recharge_pauses(mut self, count: u32) -> Self {
        self.recharge_pauses = count;
        self
    }

    /// Connect to `addr` and play the session until the server logs the
    /// robot out or reports an error.
    ///
    /// # Errors
    ///
    /// Network errors from the simulated connection.
    ///
    /// # Panics
    ///
    /// If the server deviates from the protocol.
    pub async fn serve(mut self, addr: &str) -> io::Result<()> {
        let mut link = ScriptedRobot::connect(addr).await?;
        link.login(self.name.as_bytes()).await?;

        loop {
            let line = link.hear().await?;
            match ServerCommand::from_line(&line) {
                Some(ServerCommand::Move) => {
                    self.apply_move();
                    self.confirm(&mut link).await?;
                },
                Some(ServerCommand::TurnLeft) => {
                    self.heading = self.heading.turned_left();
                    self.confirm(&mut link).await?;
                },
                Some(ServerCommand::TurnRight) => {
                    self.heading = self.heading.turned_right();
                    self.confirm(&mut link).await?;
                },
                Some(ServerCommand::GetMessage) => {
                    let answer = if self.position == self.secret_cell {
                        self.secret.clone()
                    } else {
                        Vec::new()
                    };
                    self.pause_if_due(&mut link).await?;
                    link.say(&answer).await?;
                },
                Some(
                    ServerCommand::Logout
                    | ServerCommand::LoginFailed
                    | ServerCommand::SyntaxError
                    | ServerCommand::LogicError,
                ) => return Ok(()),
                Some(ServerCommand::Ok) | None => {
                    panic!(
                        "unexpected line from server: {:?}",
                        String::from_utf8_lossy(&line)
                    );
                },
            }
        }
    }

    fn apply_move(&mut self) {
        if self.stumbles > 0 {
            self.stumbles -= 1;
            return;
        }
        let (dx, dy) = match self.heading {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Unknown => unreachable!("checked at construction"),
        };
        self.position = Position::new(self.position.x + dx, self.position.y + dy);
    }

    async fn confirm(&mut self, link: &mut ScriptedRobot) -> io::Result<()> {
        self.pause_if_due(link).await?;
        let line = format!("OK {} {}", self.position.x, self.position.y);
        link.say(line.as_bytes()).await
    }

    async fn pause_if_due(&mut self, link: &mut ScriptedRobot) -> io::Result<()> {
        if self.recharge_pauses > 0 {
            self.recharge_pauses -= 1;
            link.say(drover_proto::RECHARGING).await?;
            link.say(drover_proto::FULL_POWER).await?;
        }
        Ok(())
    }
}
