use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications.
///
/// Applications executed by `Tui::run()` must implement this trait.
pub trait App {
    /// Called once at the start of `Tui::run()`. Use this to configure the
    /// tick interval and render mode.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    ///
    /// Call [`Tui::reset_tick`] to postpone the next tick by a full interval.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen (called on each `Render` event).
    fn draw(&self, frame: &mut Frame);

    /// Advances the game (called on each `Tick` event).
    fn update(&mut self, tui: &mut Tui);
}
