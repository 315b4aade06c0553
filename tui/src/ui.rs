use minesweep_core::{Engine, Grid};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Cursor};
use crate::theme;

/// Columns used by one cell, the glyph padded by a space on each side.
const CELL_WIDTH: u16 = 3;

const INSTRUCTIONS: &str = "WASD: Move Around, F: Toggle Flag, Space: Reveal, R: Reset, Q: Quit";

pub fn render(frame: &mut Frame, app: &App) {
    let engine = app.engine();
    let grid = engine.grid();
    let area = frame.size();

    let grid_height = grid.height().saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(grid_height),
            Constraint::Length(1), // State
            Constraint::Length(1), // Counters
            Constraint::Length(1), // Instructions
            Constraint::Min(0),
        ])
        .split(area);

    render_grid(frame, chunks[0], &grid, app.cursor());
    render_status(frame, chunks[1], chunks[2], engine);
    frame.render_widget(
        Paragraph::new(Span::styled(
            INSTRUCTIONS,
            Style::default().fg(Color::DarkGray),
        )),
        chunks[3],
    );
}

fn render_grid(frame: &mut Frame, area: Rect, grid: &Grid, cursor: Cursor) {
    let cursor = cursor.position();
    let lines: Vec<Line> = grid
        .rows()
        .zip(0..)
        .map(|(row, y)| {
            let spans: Vec<Span> = row
                .zip(0..)
                .map(|(cell, x)| {
                    let style = if (x, y) == cursor {
                        theme::cursor_style()
                    } else {
                        theme::cell_style(cell)
                    };
                    Span::styled(format!(" {} ", theme::glyph(cell)), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let width = grid
        .width()
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let block = Block::default()
        .title(" Mines ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(
        Paragraph::new(lines).block(block),
        Rect { width, ..area },
    );
}

fn render_status(frame: &mut Frame, state_area: Rect, counter_area: Rect, engine: &Engine) {
    let state = engine.state();
    frame.render_widget(
        Paragraph::new(Span::styled(state.name(), theme::state_style(state))),
        state_area,
    );

    let counters = Line::from(vec![
        Span::styled("Mines: ", Style::default().fg(Color::DarkGray)),
        Span::raw(engine.mine_count().to_string()),
        Span::styled("  Flags: ", Style::default().fg(Color::DarkGray)),
        Span::raw(engine.flag_count().to_string()),
        Span::styled("  Left: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            engine.mines_left().to_string(),
            if engine.mines_left() < 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            },
        ),
    ]);
    frame.render_widget(Paragraph::new(counters), counter_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, Direction};
    use minesweep_core::MineTemplate;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn app(text: &str) -> App {
        let template: MineTemplate = text.parse().unwrap();
        App::new(Engine::from_template(&template).unwrap())
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer.get(x, y).symbol()).collect())
            .collect()
    }

    #[test]
    fn fresh_board_renders_hidden_cells_and_status() {
        let app = app("...\n..1");

        let lines = lines(&draw(&app));

        assert!(lines[0].contains("Mines"));
        assert!(lines[1].starts_with("│         │"));
        assert!(lines[4].starts_with("Playing"));
        assert!(lines[5].contains("Mines: 1"));
        assert!(lines[6].starts_with("WASD"));
    }

    #[test]
    fn revealed_counts_and_flags_are_drawn() {
        let mut app = app("...\n..1");
        app.apply(Action::Reveal);
        app.apply(Action::Move(Direction::Right));
        app.apply(Action::Move(Direction::Right));
        app.apply(Action::Move(Direction::Down));
        app.apply(Action::ToggleFlag);

        let lines = lines(&draw(&app));

        assert!(lines[1].starts_with("│ 0  1    │"));
        assert!(lines[2].starts_with("│ 0  1  F │"));
        assert!(lines[4].starts_with("Won"));
    }

    #[test]
    fn cursor_cell_is_highlighted() {
        let mut app = app("...\n..1");
        app.apply(Action::Move(Direction::Right));

        let buffer = draw(&app);

        assert_eq!(buffer.get(5, 1).bg, Color::Rgb(0xff, 0x33, 0xff));
        assert_eq!(buffer.get(2, 1).bg, Color::Rgb(0xbf, 0xbf, 0xbf));
    }

    #[test]
    fn lost_board_shows_mines() {
        let mut app = app("1..\n...");
        app.apply(Action::Reveal);

        let lines = lines(&draw(&app));

        assert!(lines[1].starts_with("│ M       │"));
        assert!(lines[4].starts_with("Lost"));
    }
}
