use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Position;

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    Some(key.code)
}

/// Takes an event, checks if it is a left mouse button press, and returns its screen position
pub(super) fn event_click(event: &Event) -> Option<Position> {
    let Event::Mouse(mouse) = event else {
        return None;
    };

    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }

    Some(Position::new(mouse.column, mouse.row))
}
