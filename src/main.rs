//! Puyotui — Puyo-style falling-pair matching puzzle in the terminal.

mod app;
mod highscores;
mod input;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let mut app = App::new(args, theme);
    app.run()
}

/// Puyo-style puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "puyotui",
    version,
    about = "Puyo-style falling-pair puzzle in the terminal. Connect 4+ same-coloured cells to clear them.",
    long_about = "Puyotui is a terminal puzzle game in the Puyo Puyo family.\n\n\
        Steer falling two-cell pairs. When a pair lands it locks into the grid; any group of \
        four or more same-coloured cells connected up/down/left/right is cleared, the cells \
        above settle down, and you score 10 points per cleared cell. The game ends when the \
        spawn cells are blocked.\n\n\
        CONTROLS (normal):\n  Left/Right  Move    Up    Rotate    Down   Soft drop\n  P  Pause    Q / Esc  Quit    R  Restart (after game over)\n\n\
        CONTROLS (vim):\n  h/l  Move    k or i  Rotate    j  Soft drop    p  Pause    q  Quit\n\n\
        Use --theme to load a btop-style theme (e.g. onedark.theme)."
)]
pub struct Args {
    /// Playfield width in columns.
    #[arg(long, default_value = "6", value_name = "COLS")]
    pub width: u16,

    /// Playfield height in rows.
    #[arg(long, default_value = "12", value_name = "ROWS")]
    pub height: u16,

    /// Simulation tick period in milliseconds (one descent step per tick).
    #[arg(long, default_value = "500", value_name = "MS")]
    pub tick_ms: u64,

    /// RNG seed for a reproducible colour sequence.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]="value"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Disable the terminal bell on clears and game over.
    #[arg(long)]
    pub no_bell: bool,

    /// Disable the clear flash animation.
    #[arg(long)]
    pub no_animation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
