use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::action::Action;
use crate::app_state::AppState;

/// A focusable pane.  Components own their private view state (cursor,
/// scroll offset, filter text) and communicate everything else through
/// actions returned from the input hooks.
pub trait Component {
    /// Keyboard input while this component is focused.
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Mouse input inside this component's last drawn `area`.
    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called for every applied action, including ones this component
    /// produced.  Returned actions are dispatched one more level and not
    /// re-broadcast, which keeps feedback loops impossible.
    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
