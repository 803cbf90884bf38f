//! Game controller: spawn, fall, lock, match, clear, settle, score, game over.

use crate::gravity::apply_gravity;
use crate::grid::{COLS, Grid, PuyoColor, ROWS};
use crate::matcher::find_groups;
use crate::piece::Pair;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Points per cleared cell.
const POINTS_PER_CELL: u32 = 10;

/// Discrete player intent, delivered between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Observable events raised by the controller. Collaborators (sound, UI
/// effects) consume these; the controller itself has no audio or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A matching pass cleared at least one group. `cells` lists every
    /// cleared position; the cleared-cell count is `cells.len()`.
    GroupsCleared { cells: Vec<(usize, usize)> },
    /// A spawn cell was already occupied; the game is over. Fired exactly once.
    GameOver,
}

/// Controller phase. Between ticks this is always `Falling` or `GameOver`;
/// `Locking`, `Matching`, `Settling` and `Spawning` are passed through
/// synchronously inside a single tick, so no torn state is ever observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Matching,
    Settling,
    GameOver,
}

/// Read-only view of the whole game for renderers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Settled cells as (col, row, colour), row-major.
    pub cells: Vec<(usize, usize, PuyoColor)>,
    /// The falling pair's two cells, `None` once the game is over.
    pub pair: Option<[(usize, usize, PuyoColor); 2]>,
    pub score: u32,
    pub game_over: bool,
}

/// The simulation core. Owns the grid, the falling pair, score and terminal
/// state; drivers call [`Game::tick`] on a fixed period and
/// [`Game::apply_intent`] for key events. The controller never starts a
/// timer of its own.
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    pair: Option<Pair>,
    phase: Phase,
    score: u32,
    rng: SmallRng,
}

impl Game {
    /// New game on an empty `cols` x `rows` grid with entropy-seeded colours.
    /// The first pair is spawned immediately; it cannot collide on an empty
    /// grid, so construction never reports game over.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_rng(cols, rows, SmallRng::from_entropy())
    }

    /// New game with a fixed seed, for reproducible colour sequences.
    pub fn with_seed(cols: usize, rows: usize, seed: u64) -> Self {
        Self::with_rng(cols, rows, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(cols: usize, rows: usize, rng: SmallRng) -> Self {
        let mut game = Self {
            grid: Grid::new(cols, rows),
            pair: None,
            phase: Phase::Spawning,
            score: 0,
            rng,
        };
        let mut events = Vec::new();
        game.spawn(&mut events);
        game
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pair(&self) -> Option<&Pair> {
        self.pair.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.grid.occupied().collect(),
            pair: self.pair.map(|pair| {
                let [h, s] = pair.cells();
                [(h.col, h.row, h.color), (s.col, s.row, s.color)]
            }),
            score: self.score,
            game_over: self.is_game_over(),
        }
    }

    /// Advance the simulation one step. The falling pair descends one row;
    /// when it cannot, the whole lock → match → clear → settle → respawn
    /// sequence runs to completion before this returns. No-op once the game
    /// is over. Returns the events this step raised.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Falling {
            return events;
        }
        let fell = match self.pair.as_mut() {
            Some(pair) => pair.try_fall(&self.grid),
            None => return events,
        };
        if !fell {
            self.lock(&mut events);
        }
        events
    }

    /// Apply a player intent against the current state. Intents move or
    /// rotate the pair only; they never change phase. Ignored (returning
    /// false) once the game is over. Returns whether the pair moved.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(pair) = self.pair.as_mut() else {
            return false;
        };
        match intent {
            Intent::MoveLeft => pair.try_shift(&self.grid, -1),
            Intent::MoveRight => pair.try_shift(&self.grid, 1),
            Intent::SoftDrop => pair.try_fall(&self.grid),
            Intent::Rotate => pair.try_rotate(&self.grid),
        }
    }

    /// Transfer the pair into the grid, then run matching and settling.
    fn lock(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = Phase::Locking;
        let Some(pair) = self.pair.take() else {
            return;
        };
        for p in pair.cells() {
            self.grid.occupy(p.col, p.row, p.color);
        }

        self.phase = Phase::Matching;
        let groups = find_groups(&self.grid);
        if !groups.is_empty() {
            let mut cells = Vec::new();
            for group in &groups {
                for &(col, row) in &group.cells {
                    self.grid.clear(col, row);
                    cells.push((col, row));
                }
            }
            self.score += POINTS_PER_CELL * cells.len() as u32;
            events.push(GameEvent::GroupsCleared { cells });

            // One settle pass; no re-match afterwards (cascades are out of scope).
            self.phase = Phase::Settling;
            apply_gravity(&mut self.grid);
        }

        self.phase = Phase::Spawning;
        self.spawn(events);
    }

    fn spawn(&mut self, events: &mut Vec<GameEvent>) {
        let pair = Pair::spawn(self.grid.cols(), &mut self.rng);
        let blocked = pair
            .cells()
            .iter()
            .any(|p| !self.grid.is_empty(p.col, p.row));
        if blocked {
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameOver);
            return;
        }
        self.pair = Some(pair);
        self.phase = Phase::Falling;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(COLS, ROWS)
    }
}
