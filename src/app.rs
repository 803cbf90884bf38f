//! App: terminal init, main loop, tick scheduling and key handling.
//!
//! The app owns the one [`Game`] value and the tick timer; the simulation
//! core never schedules anything itself. Controller events come back from
//! [`Game::tick`] and are forwarded here to the terminal bell and the clear
//! flash effect.

use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::{Args, highscores, ui};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use puyotui::{Game, GameEvent};
use ratatui::DefaultTerminal;
use std::io::Write;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Poll ceiling so the clear flash keeps animating between ticks.
const FRAME_POLL_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Playing,
    GameOver,
}

pub struct App {
    args: Args,
    theme: Theme,
    game: Game,
    screen: Screen,
    paused: bool,
    last_tick: Instant,
    high_score: u32,
    new_high_score: bool,
    /// Cells cleared by the latest matching pass; drives the flash effect.
    clear_cells: Vec<(usize, usize)>,
    /// TachyonFX fade for the clear flash (created on first draw after a clear).
    clear_effect: Option<Effect>,
    /// Last time the flash effect was processed (for delta).
    clear_effect_process_time: Option<Instant>,
}

impl App {
    pub fn new(args: Args, theme: Theme) -> Self {
        let game = new_game(&args);
        Self {
            args,
            theme,
            game,
            screen: Screen::Playing,
            paused: false,
            last_tick: Instant::now(),
            high_score: highscores::load_high_score(),
            new_high_score: false,
            clear_cells: Vec::new(),
            clear_effect: None,
            clear_effect_process_time: None,
        }
    }

    fn reset_game(&mut self) {
        self.game = new_game(&self.args);
        self.screen = Screen::Playing;
        self.paused = false;
        self.last_tick = Instant::now();
        self.new_high_score = false;
        self.clear_cells.clear();
        self.clear_effect = None;
        self.clear_effect_process_time = None;
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick_interval = Duration::from_millis(self.args.tick_ms.max(1));
        loop {
            let now = Instant::now();
            terminal.draw(|f| {
                ui::draw(
                    f,
                    &self.game,
                    &self.theme,
                    self.screen,
                    self.paused,
                    self.high_score,
                    self.new_high_score,
                    &self.clear_cells,
                    &mut self.clear_effect,
                    &mut self.clear_effect_process_time,
                    now,
                );
            })?;

            if self.clear_effect.as_ref().is_some_and(|e| e.done()) {
                self.clear_cells.clear();
                self.clear_effect = None;
                self.clear_effect_process_time = None;
            }

            let until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
            let timeout = until_tick.min(Duration::from_millis(FRAME_POLL_MS));

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        let action = key_to_action(key);
                        match self.screen {
                            Screen::Playing => {
                                if self.paused {
                                    match action {
                                        Action::Pause => self.paused = false,
                                        Action::Quit => {
                                            self.save_score_if_best();
                                            return Ok(());
                                        }
                                        _ => {}
                                    }
                                } else {
                                    match action {
                                        Action::Quit => {
                                            self.save_score_if_best();
                                            return Ok(());
                                        }
                                        Action::Pause => self.paused = true,
                                        other => {
                                            if let Some(intent) = other.intent() {
                                                self.game.apply_intent(intent);
                                            }
                                        }
                                    }
                                }
                            }
                            Screen::GameOver => {
                                if action == Action::Quit {
                                    return Ok(());
                                }
                                if matches!(key.code, KeyCode::Char('r' | 'R')) {
                                    self.reset_game();
                                }
                            }
                        }
                    }
                }
            }

            if self.screen == Screen::Playing
                && !self.paused
                && self.last_tick.elapsed() >= tick_interval
            {
                self.last_tick = Instant::now();
                let events = self.game.tick();
                self.handle_events(events);
            }
        }
    }

    fn handle_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::GroupsCleared { cells } => {
                    self.bell();
                    if !self.args.no_animation {
                        self.clear_cells = cells;
                        self.clear_effect = None;
                        self.clear_effect_process_time = None;
                    }
                }
                GameEvent::GameOver => {
                    self.bell();
                    self.screen = Screen::GameOver;
                    self.save_score_if_best();
                }
            }
        }
    }

    fn save_score_if_best(&mut self) {
        if self.game.score() > self.high_score {
            self.high_score = self.game.score();
            self.new_high_score = true;
            let _ = highscores::save_high_score(self.high_score);
        }
    }

    /// Audio-trigger boundary: one terminal bell per clear / game over.
    fn bell(&self) {
        if self.args.no_bell {
            return;
        }
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

fn new_game(args: &Args) -> Game {
    let cols = usize::from(args.width.max(1));
    let rows = usize::from(args.height.max(2));
    match args.seed {
        Some(seed) => Game::with_seed(cols, rows, seed),
        None => Game::new(cols, rows),
    }
}
