use crossterm::event::{Event, KeyCode, KeyEventKind};
use minofall_engine::{GameSession, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    command::play::keymap,
    tui::{App, RenderMode, Tui},
    ui::widgets::SessionDisplay,
};

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            is_exiting: false,
        }
    }

    fn handle_key(&mut self, tui: &mut Tui, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            KeyCode::Char('p') => self.session.toggle_pause(),
            code => {
                let Some(command) = keymap::command_for_key(code) else {
                    return;
                };
                let outcome = self.session.apply(command);
                if outcome.cleared_rows > 0 {
                    tracing::debug!(rows = outcome.cleared_rows, ?command, "rows cleared");
                }
                if outcome.reset_drop_timer {
                    tui.reset_tick();
                }
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.session.config().drop_interval()));
        tui.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(tui, key.code);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session);
        let help_text = match self.session.session_state() {
            SessionState::Playing => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ X (Rotate) | Z (Rotate Back) | Space (Hard Drop) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.session.tick();
    }
}
