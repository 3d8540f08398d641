pub mod help;
pub mod log;
pub mod maze;
pub mod plot;

use crossterm::event::Event;
pub use log::Logs;
pub use maze::MazeView;
pub use plot::Plots;
use ratatui::widgets::WidgetRef;

pub trait Component: WidgetRef {
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
