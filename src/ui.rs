//! Layout and drawing: playfield, sidebar, pause and game-over overlays, clear flash.

use crate::app::Screen;
use crate::theme::Theme;
use puyotui::Game;
use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

/// Terminal cells per grid cell: two columns wide, one row tall.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 22;
/// Duration of the clear flash (TachyonFX fade of cleared cells to background).
const CLEAR_FLASH_MS: u32 = 300;

/// Playfield size in terminal cells (board + border).
fn playfield_outer_size(game: &Game) -> (u16, u16) {
    (
        game.grid().cols() as u16 * CELL_WIDTH + 2,
        game.grid().rows() as u16 * CELL_HEIGHT + 2,
    )
}

/// Outer playfield rect (with border), centered with room for the sidebar.
fn playfield_outer_rect(area: Rect, game: &Game) -> Rect {
    let (pw, ph) = playfield_outer_size(game);
    let total_w = pw + SIDEBAR_WIDTH;
    Rect {
        x: area.x + area.width.saturating_sub(total_w) / 2,
        y: area.y + area.height.saturating_sub(ph) / 2,
        width: pw.min(area.width),
        height: ph.min(area.height),
    }
}

/// Board-only rect (inside the border).
fn playfield_board_rect(area: Rect, game: &Game) -> Rect {
    let outer = playfield_outer_rect(area, game);
    Rect {
        x: outer.x + 1,
        y: outer.y + 1,
        width: (game.grid().cols() as u16 * CELL_WIDTH).min(outer.width.saturating_sub(2)),
        height: (game.grid().rows() as u16 * CELL_HEIGHT).min(outer.height.saturating_sub(2)),
    }
}

/// Draw the current screen. When `clear_cells` is non-empty the flash effect
/// is created on first use and processed every frame until done.
pub fn draw(
    frame: &mut Frame,
    game: &Game,
    theme: &Theme,
    screen: Screen,
    paused: bool,
    high_score: u32,
    new_high_score: bool,
    clear_cells: &[(usize, usize)],
    clear_effect: &mut Option<Effect>,
    clear_effect_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    draw_playfield(frame, game, theme, area);
    draw_sidebar(frame, game, theme, area, high_score);
    if !clear_cells.is_empty() {
        apply_clear_flash(
            frame,
            game,
            theme,
            area,
            clear_cells,
            clear_effect,
            clear_effect_process_time,
            now,
        );
    }
    match screen {
        Screen::Playing if paused => draw_pause_overlay(frame, theme, area),
        Screen::Playing => {}
        Screen::GameOver => draw_game_over(frame, game, theme, area, new_high_score),
    }
}

fn draw_playfield(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) {
    let outer = playfield_outer_rect(area, game);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line))
        .title(Line::styled(" puyotui ", Style::default().fg(theme.title)));
    frame.render_widget(block, outer);

    let board = playfield_board_rect(area, game);
    let pair_cells = game.pair().map(|pair| {
        let [h, s] = pair.cells();
        [(h.col, h.row, h.color), (s.col, s.row, s.color)]
    });

    let mut lines = Vec::with_capacity(game.grid().rows());
    for row in 0..game.grid().rows() {
        let mut spans = Vec::with_capacity(game.grid().cols());
        for col in 0..game.grid().cols() {
            let falling = pair_cells
                .iter()
                .flatten()
                .find(|(c, r, _)| *c == col && *r == row)
                .map(|(_, _, color)| *color);
            let color = falling.or_else(|| game.grid().color_at(col, row));
            let style = match color {
                Some(color) => Style::default().bg(theme.puyo_color(color.index())),
                None => Style::default().bg(theme.bg),
            };
            spans.push(Span::styled("  ", style));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), board);
}

fn draw_sidebar(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect, high_score: u32) {
    let outer = playfield_outer_rect(area, game);
    let sidebar = Rect {
        x: (outer.x + outer.width + 1).min(area.x + area.width),
        y: outer.y,
        width: SIDEBAR_WIDTH.min((area.x + area.width).saturating_sub(outer.x + outer.width + 1)),
        height: outer.height.min(area.height),
    };
    if sidebar.width == 0 {
        return;
    }
    let fg = Style::default().fg(theme.main_fg);
    let title = Style::default().fg(theme.title);
    let lines = vec![
        Line::styled("PUYOTUI", title),
        Line::default(),
        Line::styled(format!("Score  {}", game.score()), fg),
        Line::styled(format!("Best   {}", high_score), fg),
        Line::default(),
        Line::styled("←/h →/l  move", fg),
        Line::styled("↑/k      rotate", fg),
        Line::styled("↓/j      soft drop", fg),
        Line::styled("p        pause", fg),
        Line::styled("q        quit", fg),
    ];
    frame.render_widget(Paragraph::new(lines), sidebar);
}

/// Centered overlay rect of the given size.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let rect = centered_rect(area, 24, 3);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line));
    let text = Paragraph::new(Line::styled("PAUSED — p resumes", Style::default().fg(theme.title)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(text, rect);
}

fn draw_game_over(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect, new_high_score: bool) {
    let rect = centered_rect(area, 28, 7);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.title));
    let fg = Style::default().fg(theme.main_fg);
    let mut lines = vec![
        Line::styled("GAME OVER", Style::default().fg(theme.title)),
        Line::default(),
        Line::styled(format!("Score: {}", game.score()), fg),
    ];
    if new_high_score {
        lines.push(Line::styled("New best!", Style::default().fg(theme.title)));
    } else {
        lines.push(Line::default());
    }
    lines.push(Line::styled("r restart   q quit", fg));
    let text = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(text, rect);
}

/// Build set of buffer (x, y) positions covered by cleared grid cells.
fn cleared_buffer_positions(board: Rect, clear_cells: &[(usize, usize)]) -> HashSet<(u16, u16)> {
    let mut set = HashSet::new();
    for &(col, row) in clear_cells {
        let x0 = board.x + (col as u16) * CELL_WIDTH;
        let y0 = board.y + (row as u16) * CELL_HEIGHT;
        for bx in x0..(x0 + CELL_WIDTH).min(board.x + board.width) {
            for by in y0..(y0 + CELL_HEIGHT).min(board.y + board.height) {
                set.insert((bx, by));
            }
        }
    }
    set
}

/// Create or update the clear flash and process it (TachyonFX fade of the
/// just-cleared cells into the board background).
fn apply_clear_flash(
    frame: &mut Frame,
    game: &Game,
    theme: &Theme,
    area: Rect,
    clear_cells: &[(usize, usize)],
    clear_effect: &mut Option<Effect>,
    clear_effect_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let board = playfield_board_rect(area, game);
    let delta = clear_effect_process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    let tfx_delta = TfxDuration::from_millis(delta_ms);
    *clear_effect_process_time = Some(now);

    if clear_effect.is_none() {
        let cleared_set = cleared_buffer_positions(board, clear_cells);
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            cleared_set.contains(&(pos.x, pos.y))
        }));
        let bg = theme.bg;
        let effect = fx::fade_to(bg, bg, (CLEAR_FLASH_MS, Interpolation::Linear))
            .with_filter(filter)
            .with_area(board);
        *clear_effect = Some(effect);
    }

    if let Some(effect) = clear_effect {
        frame.render_effect(effect, board, tfx_delta);
    }
}
