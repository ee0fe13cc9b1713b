//! Screen rendering: header, score, board and the game-over prompt.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use twenty48_grid::engine::{Grid, Tile, GRID_SIZE};

use crate::app::App;
use crate::config::Palette;

const TILE_WIDTH: u16 = 8;
const TILE_HEIGHT: u16 = 3;
const GAP_X: u16 = 2;
const GAP_Y: u16 = 1;
const BOARD_WIDTH: u16 = GRID_SIZE as u16 * (TILE_WIDTH + GAP_X) + GAP_X;
const BOARD_HEIGHT: u16 = GRID_SIZE as u16 * (TILE_HEIGHT + GAP_Y) + GAP_Y;

/// Draws the whole screen for the current app state.
pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.palette();
    let game = app.game();
    let area = f.area();
    let base = Style::default().bg(palette.background).fg(palette.text);
    f.render_widget(Block::default().style(base), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(BOARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let bold = base.add_modifier(Modifier::BOLD);
    render_line(f, chunks[0], Line::styled("2048", bold));
    let controls = Paragraph::new(vec![
        Line::styled("Controls:", bold),
        Line::from("Arrow Keys: Move tiles"),
    ])
    .style(base)
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[2]);
    render_line(f, chunks[4], Line::styled(format!("Score: {}", game.score()), bold));

    if game.is_over() {
        render_line(f, chunks[5], Line::styled("Game Over! Try again.", bold));
        render_line(f, chunks[7], Line::from("Press r to restart"));
    }

    render_board(f, chunks[6], game.grid(), palette);
    render_line(f, chunks[8], Line::styled("q: quit", base.add_modifier(Modifier::DIM)));
}

fn render_line(f: &mut Frame, area: Rect, line: Line) {
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Renders the 4x4 board centered in `area`.
fn render_board(f: &mut Frame, area: Rect, grid: Grid, palette: Palette) {
    let board = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    f.render_widget(Block::default().style(Style::default().bg(palette.board)), board);

    for (r, row) in grid.rows().iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let tile = Rect {
                x: board.x + GAP_X + c as u16 * (TILE_WIDTH + GAP_X),
                y: board.y + GAP_Y + r as u16 * (TILE_HEIGHT + GAP_Y),
                width: TILE_WIDTH,
                height: TILE_HEIGHT,
            }
            .intersection(board);
            if tile.is_empty() {
                continue;
            }
            render_tile(f, tile, value, palette);
        }
    }
}

fn render_tile(f: &mut Frame, area: Rect, value: Tile, palette: Palette) {
    let (bg, label) = match value {
        0 => (palette.empty_tile, String::new()),
        v => (palette.tile, v.to_string()),
    };
    let fg = if value > 4 { palette.light_text } else { palette.text };
    let style = Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD);
    let text = vec![Line::from(""), Line::from(label)];
    f.render_widget(Paragraph::new(text).style(style).alignment(Alignment::Center), area);
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use twenty48_grid::Game;

    fn render(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        lines(terminal.backend().buffer())
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn app_with(grid: Grid) -> App {
        App::new(Game::with_grid(grid, StdRng::seed_from_u64(1)), Palette::default())
    }

    fn contains(screen: &[String], needle: &str) -> bool {
        screen.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn shows_header_score_and_tiles() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [0, 128, 0, 0], [0; 4], [0, 0, 0, 2048]]);
        let app = app_with(grid);
        let screen = render(&app, 60, 30);
        assert!(contains(&screen, "2048"));
        assert!(contains(&screen, "Arrow Keys: Move tiles"));
        assert!(contains(&screen, "Score: 2178"));
        assert!(contains(&screen, "128"));
        assert!(!contains(&screen, "Game Over"));
        assert!(!contains(&screen, "Press r to restart"));
    }

    #[test]
    fn shows_game_over_only_when_over() {
        let stuck = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let screen = render(&app_with(stuck), 60, 30);
        assert!(contains(&screen, "Game Over! Try again."));
        assert!(contains(&screen, "Press r to restart"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = app_with(Grid::from_rows([[2, 4, 8, 16]; 4]));
        let screen = render(&app, 12, 6);
        assert_eq!(screen.len(), 6);
    }

    #[test]
    fn tiles_use_palette() {
        let app = app_with(Grid::from_rows([[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]));
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let idx = buffer
            .content
            .iter()
            .enumerate()
            .position(|(i, cell)| cell.symbol() == "8" && i / width >= 6)
            .unwrap();
        let palette = Palette::default();
        assert_eq!(buffer.content[idx].bg, palette.tile);
        assert_eq!(buffer.content[idx].fg, palette.light_text);
    }

    #[test]
    fn center_rect_shrinks_to_fit() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(center_rect(area, 42, 17), area);
        assert_eq!(center_rect(Rect::new(0, 0, 50, 20), 42, 17), Rect::new(4, 1, 42, 17));
    }
}
