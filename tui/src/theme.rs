use minesweep_core::{GameState, GridCell};
use ratatui::style::{Color, Modifier, Style};

const DARK: Color = Color::Rgb(0x11, 0x11, 0x11);
const LIGHT_GRAY: Color = Color::Rgb(0xbf, 0xbf, 0xbf);

/// Single character drawn for a cell.
pub const fn glyph(cell: GridCell) -> char {
    match cell {
        GridCell::Hidden => ' ',
        GridCell::Flagged => 'F',
        GridCell::Mine => 'M',
        GridCell::Revealed(count) if count <= 9 => (b'0' + count) as char,
        GridCell::Revealed(_) => '?',
    }
}

pub fn cell_style(cell: GridCell) -> Style {
    let style = Style::default();
    match cell {
        GridCell::Hidden => style.bg(LIGHT_GRAY),
        GridCell::Flagged => style.fg(DARK).bg(Color::Rgb(0xff, 0xee, 0x00)),
        GridCell::Mine => style.fg(DARK).bg(Color::Rgb(0xff, 0x00, 0x00)),
        GridCell::Revealed(count) => match count {
            0 => style.fg(Color::Rgb(0x29, 0x29, 0x29)),
            1 => style.fg(Color::Rgb(0x74, 0xad, 0xf2)),
            2 => style.fg(Color::Rgb(0x00, 0xff, 0x00)),
            3 | 6 => style.fg(Color::Rgb(0xff, 0x00, 0x00)),
            4 => style.fg(Color::Rgb(0x28, 0x70, 0x6d)),
            5 => style.fg(Color::Rgb(0xb0, 0x64, 0x46)),
            7 => style.fg(Color::Rgb(0x8a, 0x71, 0x01)),
            _ => style.fg(DARK).bg(LIGHT_GRAY),
        },
    }
}

/// Replaces whatever the cell under the cursor would use.
pub fn cursor_style() -> Style {
    Style::default().fg(DARK).bg(Color::Rgb(0xff, 0x33, 0xff))
}

pub fn state_style(state: GameState) -> Style {
    match state {
        GameState::Playing => Style::default().fg(Color::Yellow),
        GameState::Won => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        GameState::Lost => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}
