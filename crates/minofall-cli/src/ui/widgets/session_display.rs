use minofall_engine::{GameSession, Grid, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatusDisplay, color, style};

/// The board framed by a state-coloured border, with the status panel on its right.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    grid: Grid,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            grid: session.rendered_grid(),
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_color(&self) -> ratatui::style::Color {
        match self.session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn board(&self) -> BoardDisplay<'_> {
        BoardDisplay::new(&self.grid).block(
            Block::bordered()
                .border_style(self.border_color())
                .style(style::DEFAULT),
        )
    }

    fn status(&self) -> StatusDisplay<'_> {
        StatusDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATUS").centered())
                .padding(Padding::symmetric(
                    self.horizontal_padding,
                    self.vertical_padding,
                ))
                .border_style(self.border_color())
                .style(style::DEFAULT),
        )
    }

    pub fn height(&self) -> u16 {
        u16::max(self.board().height(), self.status().height())
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game_board = self.board();
        let status = self.status();

        let [board_column, status_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(status.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [status_area] =
            Layout::vertical([Constraint::Length(status.height())]).areas(status_column);

        let game_board_width = game_board.width();
        game_board.render(board_area, buf);
        status.render(status_area, buf);

        let popup = match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use minofall_engine::GameConfig;

    use super::*;

    fn render(session: &GameSession) -> Buffer {
        let display = SessionDisplay::new(session);
        let area = Rect::new(0, 0, 60, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        let area = buf.area;
        (area.top()..area.bottom()).any(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.contains(needle)
        })
    }

    #[test]
    fn test_height_fits_board() {
        let session = GameSession::with_seed(GameConfig::default(), 0).unwrap();
        assert_eq!(SessionDisplay::new(&session).height(), 22);
    }

    #[test]
    fn test_status_and_popup() {
        let mut session = GameSession::with_seed(GameConfig::default(), 0).unwrap();
        let buf = render(&session);
        assert!(contains(&buf, "STATUS"));
        assert!(contains(&buf, "PLAYING"));
        assert!(!contains(&buf, "PAUSED"));

        session.toggle_pause();
        let buf = render(&session);
        assert!(contains(&buf, "PAUSED"));
    }
}
