use minofall_engine::{GameSession, SessionState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

/// Session summary shown beside the board.
#[derive(Debug)]
pub struct StatusDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatusDisplay<'a> {
    const LABEL_WIDTH: u16 = 7;
    const VALUE_WIDTH: u16 = 9;
    const LINES: u16 = 4;

    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        Self::LABEL_WIDTH
            + Self::VALUE_WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        Self::LINES + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> [(&'static str, String); 4] {
        let state = match self.session.session_state() {
            SessionState::Playing => "PLAYING",
            SessionState::Paused => "PAUSED",
            SessionState::GameOver => "GAME OVER",
        };
        let piece = self
            .session
            .board()
            .mino_state()
            .kind()
            .map_or('-', |kind| kind.as_char());
        let config = self.session.config();
        [
            ("STATE", state.to_owned()),
            ("PIECE", piece.to_string()),
            ("BOARD", format!("{}x{}", config.width, config.height)),
            ("DROP", format!("{}ms", config.drop_interval_ms)),
        ]
    }
}

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let label_width = usize::from(StatusDisplay::LABEL_WIDTH);
        let lines = self
            .lines()
            .into_iter()
            .map(|(label, value)| Line::from(format!("{label:<label_width$}{value}")));
        Text::from_iter(lines).render(area, buf);
    }
}
