//! The level orchestrator: loading, turn driving, change tracing, replay.

use gridfall_core::{vars, Position};
use thiserror::Error;

use crate::context::Context;
use crate::Game;

/// Why a level failed to load. A level that fails to load must not be
/// played; no agents are registered on the error paths.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The level text had no header line.
    #[error("level text is empty")]
    MissingHeader,
    /// The header line did not hold three integers.
    #[error("header must be `<width> <height> <limit>`, got {header:?}")]
    MalformedHeader {
        /// The offending header line.
        header: String,
    },
    /// The parsed dimensions cannot describe a grid.
    #[error("width and height must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Parsed width.
        width: i32,
        /// Parsed height.
        height: i32,
    },
    /// The level text ended before the title line.
    #[error("missing title line")]
    MissingTitle,
    /// The level text ended before all rows were read.
    #[error("missing row {row}")]
    MissingRow {
        /// Zero-based index of the absent row.
        row: i32,
    },
    /// A row held the wrong number of type codes.
    #[error("row {row} holds {found} codes, expected {expected}")]
    WrongRowWidth {
        /// Zero-based index of the offending row.
        row: i32,
        /// The level width every row must match.
        expected: i32,
        /// Number of codes actually present.
        found: usize,
    },
    /// A type code the game's factory does not recognize.
    #[error("unknown type code {code:?} at {x},{y}")]
    UnknownCode {
        /// The unrecognized code.
        code: char,
        /// Column of the offending cell.
        x: i32,
        /// Row of the offending cell.
        y: i32,
    },
}

/// Why a replay diverged from its recording.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// A recording line was empty instead of starting with a command.
    #[error("level {level}: recording line {line} is empty")]
    EmptyLine {
        /// Name of the level being replayed.
        level: String,
        /// One-based line number within the recording.
        line: usize,
    },
    /// The trace produced for a command differed from the recording.
    #[error("level {level}: replay diverges on line {line}\nexpected: {expected}\nactual:   {actual}")]
    Mismatch {
        /// Name of the level being replayed.
        level: String,
        /// One-based line number within the recording.
        line: usize,
        /// The recorded trace line.
        expected: String,
        /// The trace line the simulation produced.
        actual: String,
    },
}

/// The orchestrator: owns the simulation context, parses level text, drives
/// turns, and diffs visible type codes into trace lines.
///
/// A level is reusable: every [`Level::load`] starts over with fresh grid,
/// queue, state, and entity arena, possibly at new dimensions.
pub struct Level<G: Game> {
    ctx: Context<G>,
    width: i32,
    height: i32,
    limit: i32,
    name: String,
    title: String,
    snapshot: Vec<char>,
    changes: String,
    recording: Option<Vec<String>>,
}

impl<G: Game> Level<G> {
    /// Creates an empty level; nothing works until the first load.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ctx: Context::new(),
            width: 0,
            height: 0,
            limit: 0,
            name: String::new(),
            title: String::new(),
            snapshot: Vec::new(),
            changes: String::new(),
            recording: None,
        }
    }

    /// Parses level text and brings the simulation to its starting state.
    ///
    /// The format is: line 1 `"<width> <height> <limit>"` (a limit of 0
    /// means the default allowance of 1000 moves), line 2 the title, then
    /// `height` rows of exactly `width` type codes. Every entity is hatched
    /// through the game's factory and placed, then each cell's visible
    /// entity is woken in row-major order, so startup logic may look up
    /// neighbors anywhere on the grid.
    pub fn load(&mut self, name: &str, text: &str) -> Result<(), LoadError> {
        let mut lines = text.lines();
        let header = match lines.next() {
            Some(header) => header,
            None => return Err(LoadError::MissingHeader),
        };
        let mut fields = header.split_whitespace();
        let mut next_int = || -> Option<i32> { fields.next()?.parse().ok() };
        let (width, height, limit) = match (next_int(), next_int(), next_int()) {
            (Some(width), Some(height), Some(limit)) => (width, height, limit),
            _ => {
                return Err(LoadError::MalformedHeader {
                    header: header.to_string(),
                })
            }
        };
        if width <= 0 || height <= 0 {
            return Err(LoadError::InvalidDimensions { width, height });
        }
        let limit = if limit == 0 { 1000 } else { limit };
        let title = match lines.next() {
            Some(title) => title,
            None => return Err(LoadError::MissingTitle),
        };

        self.ctx.reset(width, height);
        self.width = width;
        self.height = height;
        self.limit = limit;
        self.name = name.to_string();
        self.title = title.to_string();
        self.changes.clear();

        self.ctx.set_string(vars::NAME, name);
        self.ctx.set_string(vars::TITLE, title);
        self.ctx.add(vars::MOVES, limit);

        for y in 0..height {
            let row = match lines.next() {
                Some(row) => row,
                None => return Err(LoadError::MissingRow { row: y }),
            };
            let codes: Vec<char> = row.chars().collect();
            if codes.len() != width as usize {
                return Err(LoadError::WrongRowWidth {
                    row: y,
                    expected: width,
                    found: codes.len(),
                });
            }
            for (x, &code) in codes.iter().enumerate() {
                let position = Position::new(x as i32, y);
                let id = match self.ctx.hatch(code, position) {
                    Some(id) => id,
                    None => {
                        return Err(LoadError::UnknownCode {
                            code,
                            x: x as i32,
                            y,
                        })
                    }
                };
                self.ctx.show(id);
            }
        }

        for y in 0..height {
            for x in 0..width {
                let id = self.ctx.visible(Position::new(x, y));
                G::wake(&mut self.ctx, id);
            }
        }

        self.snapshot.clear();
        for y in 0..height {
            for x in 0..width {
                let id = self.ctx.visible(Position::new(x, y));
                self.snapshot.push(self.ctx.code(id));
            }
        }
        Ok(())
    }

    /// Begins a turn: queues every agent and stamps `command`, resetting
    /// the trace buffer to just the command character.
    pub fn command(&mut self, command: char) {
        self.ctx.begin_turn(command);
        self.changes = command.to_string();
    }

    /// Advances the current turn by one visible change.
    ///
    /// Pulls and runs actors until one of them mutates the grid (returns
    /// `true`: more of the turn may be pending) or the actor queue runs dry
    /// (returns `false`: the turn is complete and, when recording, its
    /// trace line has been captured). Callers align animation by invoking
    /// this once per frame until it returns `false`.
    pub fn step(&mut self) -> bool {
        self.ctx.set_changed(false);
        let mut actor = self.ctx.pull();
        while !self.ctx.changed() {
            let id = match actor {
                Some(id) => id,
                None => break,
            };
            G::act(&mut self.ctx, id);
            if !self.ctx.changed() {
                actor = self.ctx.pull();
            }
        }
        if self.ctx.changed() {
            self.record_changes();
        }
        if actor.is_none() {
            if let Some(recording) = self.recording.as_mut() {
                recording.push(self.changes.clone());
            }
            return false;
        }
        true
    }

    /// Issues one command and steps until its turn completes.
    pub fn resolve(&mut self, command: char) {
        self.command(command);
        while self.step() {}
    }

    /// Replays a recording against the loaded level.
    ///
    /// Each line's leading character is issued as a command and the
    /// resulting trace is compared with the line; the first divergence is
    /// returned as a [`ReplayError`].
    pub fn replay(&mut self, recording: &str) -> Result<(), ReplayError> {
        for (index, expected) in recording.lines().enumerate() {
            let line = index + 1;
            let command = match expected.chars().next() {
                Some(command) => command,
                None => {
                    return Err(ReplayError::EmptyLine {
                        level: self.name.clone(),
                        line,
                    })
                }
            };
            self.resolve(command);
            if self.changes != expected {
                return Err(ReplayError::Mismatch {
                    level: self.name.clone(),
                    line,
                    expected: expected.to_string(),
                    actual: self.changes.clone(),
                });
            }
        }
        Ok(())
    }

    /// Starts capturing one trace line per resolved command.
    pub fn record(&mut self) {
        self.recording = Some(Vec::new());
    }

    /// Stops capturing and yields the recorded trace lines.
    pub fn take_recording(&mut self) -> Vec<String> {
        self.recording.take().unwrap_or_default()
    }

    fn record_changes(&mut self) {
        for x in 0..self.width {
            for y in 0..self.height {
                let index = (y * self.width + x) as usize;
                let code = self.ctx.code(self.ctx.visible(Position::new(x, y)));
                if self.snapshot[index] != code {
                    self.changes.push_str(&format!(" {x},{y},{code}"));
                    self.snapshot[index] = code;
                }
            }
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The effective move allowance the level was loaded with.
    #[must_use]
    pub const fn limit(&self) -> i32 {
        self.limit
    }

    /// The level's short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The level's title line.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The visible type code at a position, `None` outside the grid.
    #[must_use]
    pub fn visible(&self, x: i32, y: i32) -> Option<char> {
        let id = self.ctx.front(Position::new(x, y))?;
        Some(self.ctx.code(id))
    }

    /// The status line for front ends, built by the game definition.
    #[must_use]
    pub fn status(&self) -> String {
        G::status(&self.ctx)
    }

    /// A string variable from the state table.
    #[must_use]
    pub fn string(&self, name: &str) -> &str {
        self.ctx.string(name)
    }

    /// A counter variable from the state table.
    #[must_use]
    pub fn count(&self, name: &str) -> i32 {
        self.ctx.count(name)
    }

    /// The accumulated score.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.ctx.count(vars::SCORE)
    }

    /// Whether the level has been completed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.ctx.count(vars::SUCCESS) > 0
    }
}

impl<G: Game> Default for Level<G> {
    fn default() -> Self {
        Self::new()
    }
}
