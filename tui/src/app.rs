use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minesweep_core::{Coord, Coord2, Engine, GameState, RevealOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything the player can ask for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Reveal,
    ToggleFlag,
    Reset,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        use Action::*;
        use Direction::*;

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Quit),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Quit),
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Move(Up)),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Move(Down)),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Move(Left)),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Move(Right)),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(ToggleFlag),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Reveal),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Reset),
            _ => None,
        }
    }
}

/// Selected cell, always kept inside the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    x: Coord,
    y: Coord,
}

impl Cursor {
    pub fn position(self) -> Coord2 {
        (self.x, self.y)
    }

    pub fn step(&mut self, direction: Direction, (width, height): Coord2) {
        match direction {
            Direction::Up => self.y = self.y.saturating_sub(1),
            Direction::Down => self.y = (self.y + 1).min(height.saturating_sub(1)),
            Direction::Left => self.x = self.x.saturating_sub(1),
            Direction::Right => self.x = (self.x + 1).min(width.saturating_sub(1)),
        }
    }
}

/// Terminal session state: the board being played and where the player is pointing.
pub struct App {
    engine: Engine,
    cursor: Cursor,
    should_quit: bool,
}

impl App {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            cursor: Cursor::default(),
            should_quit: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn apply(&mut self, action: Action) {
        let coords = self.cursor.position();

        match action {
            Action::Move(direction) => self.cursor.step(direction, self.engine.size()),
            Action::Reveal => match self.engine.reveal(coords) {
                Ok(RevealOutcome::HitMine) => log::info!("Game lost at {:?}", coords),
                Ok(outcome) => log::debug!("Reveal at {:?}: {:?}", coords, outcome),
                Err(err) => log::debug!("Ignoring reveal at {:?}: {}", coords, err),
            },
            Action::ToggleFlag => match self.engine.toggle_flag(coords) {
                Ok(outcome) if outcome.has_update() && self.engine.state() == GameState::Won => {
                    log::info!("Game won")
                }
                Ok(_) => {}
                Err(err) => log::debug!("Ignoring flag at {:?}: {}", coords, err),
            },
            Action::Reset => {
                log::info!("Resetting game");
                self.engine.reset();
            }
            Action::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{DEFAULT_MINE_COUNT, GridCell, MineTemplate};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(text: &str) -> App {
        let template: MineTemplate = text.parse().unwrap();
        App::new(Engine::from_template(&template).unwrap())
    }

    #[test]
    fn keys_map_to_actions() {
        use Direction::*;

        assert_eq!(Action::from_key(key(KeyCode::Char('w'))), Some(Action::Move(Up)));
        assert_eq!(Action::from_key(key(KeyCode::Char('a'))), Some(Action::Move(Left)));
        assert_eq!(Action::from_key(key(KeyCode::Char('s'))), Some(Action::Move(Down)));
        assert_eq!(Action::from_key(key(KeyCode::Right)), Some(Action::Move(Right)));
        assert_eq!(Action::from_key(key(KeyCode::Char('f'))), Some(Action::ToggleFlag));
        assert_eq!(Action::from_key(key(KeyCode::Char(' '))), Some(Action::Reveal));
        assert_eq!(Action::from_key(key(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(Action::from_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(Action::from_key(key(KeyCode::Char('c'))), None);
        assert_eq!(Action::from_key(key(KeyCode::Tab)), None);
    }

    #[test]
    fn cursor_is_clamped_to_board() {
        let mut cursor = Cursor::default();

        cursor.step(Direction::Up, (3, 2));
        cursor.step(Direction::Left, (3, 2));
        assert_eq!(cursor.position(), (0, 0));

        for _ in 0..5 {
            cursor.step(Direction::Right, (3, 2));
            cursor.step(Direction::Down, (3, 2));
        }
        assert_eq!(cursor.position(), (2, 1));
    }

    #[test]
    fn reveal_and_flag_at_cursor() {
        let mut app = app("..\n.1");

        app.apply(Action::Reveal);
        assert_eq!(app.engine().grid()[(0, 0)], GridCell::Revealed(1));

        app.apply(Action::Move(Direction::Right));
        app.apply(Action::Move(Direction::Down));
        app.apply(Action::ToggleFlag);

        assert_eq!(app.engine().state(), GameState::Won);
    }

    #[test]
    fn revealing_mine_loses() {
        let mut app = app("1.\n..");

        app.apply(Action::Reveal);

        assert_eq!(app.engine().state(), GameState::Lost);
        assert_eq!(app.engine().grid()[(0, 0)], GridCell::Mine);
    }

    #[test]
    fn reset_keeps_cursor_and_size() {
        let mut app = app("1....\n.....\n.....");
        app.apply(Action::Move(Direction::Right));
        app.apply(Action::Reveal);

        app.apply(Action::Reset);

        assert_eq!(app.engine().size(), (5, 3));
        assert_eq!(app.engine().mine_count(), DEFAULT_MINE_COUNT);
        assert_eq!(app.engine().revealed_count(), 0);
        assert_eq!(app.cursor().position(), (1, 0));
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app("1.");
        assert!(!app.should_quit());

        app.apply(Action::Quit);

        assert!(app.should_quit());
    }
}
