use std::time::Instant;

use bricks_engine::{Command, GameController, GameState, ScoreState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    config::{Key, KeyBindings},
    tui::{App, RenderMode, Tui},
    ui::{
        TerminalUi,
        widgets::{GameDisplay, KeyBinding, KeyBindingDisplay},
    },
};

const NEW_GAME_KEY: KeyCode = KeyCode::Char('n');
const QUIT_KEYS: [KeyCode; 2] = [KeyCode::Char('q'), KeyCode::Esc];

/// Front-end action a key press resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Game(Command),
    NewGame,
    Quit,
}

#[derive(Debug)]
pub(crate) struct PlayApp {
    game: GameController<TerminalUi>,
    keys: KeyBindings,
    help: Vec<KeyBinding>,
    render_mode: RenderMode,
    last_update: Instant,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(
        game: GameController<TerminalUi>,
        keys: KeyBindings,
        render_mode: RenderMode,
    ) -> Self {
        let help = help_entries(&keys);
        Self {
            game,
            keys,
            help,
            render_mode,
            last_update: Instant::now(),
            is_exiting: false,
        }
    }

    pub(crate) fn final_score(&self) -> ScoreState {
        self.game.ui().last_loss().unwrap_or(self.game.score())
    }

    fn action_for(&self, code: KeyCode) -> Option<Action> {
        if QUIT_KEYS.contains(&code) {
            return Some(Action::Quit);
        }
        if code == NEW_GAME_KEY {
            return Some(Action::NewGame);
        }
        self.keys.command_for(code).map(Action::Game)
    }

    /// Feeds the wall time since the last call to the game.
    fn advance_clock(&mut self) {
        let now = Instant::now();
        self.game.advance(now.saturating_duration_since(self.last_update));
        self.last_update = now;
    }
}

fn help_entries(keys: &KeyBindings) -> Vec<KeyBinding> {
    let labels = |command| -> Vec<String> {
        keys.keys_for(command).iter().map(ToString::to_string).collect()
    };
    let fixed = |codes: &[KeyCode]| -> Vec<String> {
        codes.iter().map(|code| Key::new(*code).to_string()).collect()
    };
    vec![
        (labels(Command::Left), "Left"),
        (labels(Command::Right), "Right"),
        (labels(Command::Down), "Drop"),
        (labels(Command::Rotate), "Rotate"),
        (labels(Command::Pause), "Pause"),
        (fixed(&[NEW_GAME_KEY]), "New Game"),
        (fixed(&QUIT_KEYS), "Quit"),
    ]
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_render_mode(self.render_mode);
        self.game.new_game();
        self.last_update = Instant::now();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.game.ui_mut().dismiss_loss();

        let Some(action) = self.action_for(key.code) else {
            return;
        };
        log::trace!("key {} -> {action:?}", Key::new(key.code));
        self.advance_clock();
        match action {
            Action::Game(command) => self.game.handle_command(command),
            Action::NewGame => self.game.new_game(),
            Action::Quit => self.is_exiting = true,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let game_display = GameDisplay::new(self.game.ui(), self.game.state());
        let help = KeyBindingDisplay::new(match self.game.state() {
            GameState::Running | GameState::Paused => &self.help[..],
            GameState::Idle | GameState::GameOver => &self.help[5..],
        });

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(game_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn next_tick_at(&self) -> Option<Instant> {
        self.game
            .time_until_tick()
            .map(|remaining| self.last_update + remaining)
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.advance_clock();
    }
}
