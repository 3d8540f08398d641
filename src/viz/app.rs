use std::{
    io,
    sync::mpsc::{Receiver, Sender, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::algo::tabular::sarsa::Episode;
use crate::maze::{Maze, Pos};

use super::components::{help, Component, Logs, MazeView, Plots};
use super::tui;
use super::util::event_keycode;

const TABS: [&str; 3] = ["Maze", "Plots", "Logs"];

#[derive(Default)]
pub enum State {
    /// Painting walls, waiting for a training run to be requested
    #[default]
    Build,
    /// A training run is in progress on the trainer thread
    Train,
    /// Training finished with the best step count found, if any
    Done(Option<u32>),
    Error(&'static str),
    Quit,
}

/// Messages sent from the trainer thread to the interface
pub enum TrainUpdate {
    /// The agent took an action from `pos`
    Step { pos: Pos },
    /// An episode finished, with its report metrics in key order
    Episode { episode: u16, data: Vec<f64> },
    /// The training run finished with the best episode found so far
    Done { best: Option<Episode<Pos>> },
}

/// The root TUI component which holds the main app state and runs the render loop
///
/// Requested training runs are sent to the trainer as snapshots of the painted maze, so the
/// grid stays editable here between runs without racing the trainer.
pub struct App {
    state: State,
    episode: u16,
    total_episodes: u16,
    selected_tab: usize,
    maze: MazeView,
    plots: Plots,
    logs: Logs,
    show_help: bool,
    run_tx: Sender<Maze>,
}

impl App {
    pub fn new(maze: Maze, episodes: u16, run_tx: Sender<Maze>) -> Self {
        let plots = Plots::new(maze.report.keys(), episodes);
        Self {
            state: Default::default(),
            episode: 0,
            total_episodes: episodes,
            selected_tab: 0,
            maze: MazeView::new(maze),
            plots,
            logs: Logs::new(),
            show_help: false,
            run_tx,
        }
    }

    /// Initialize the terminal and run the main loop
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self, update_rx: Receiver<TrainUpdate>) -> io::Result<()> {
        let mut terminal = tui::init()?;

        loop {
            match self.state {
                State::Train => self.drain_updates(&update_rx),
                State::Done(_) => self.maze.tick_reveal(),
                State::Quit => break,
                _ => {}
            }

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        tui::restore()
    }

    /// Apply every update the trainer has sent since the last frame
    fn drain_updates(&mut self, update_rx: &Receiver<TrainUpdate>) {
        loop {
            match update_rx.try_recv() {
                Ok(TrainUpdate::Step { pos }) => self.maze.visit(pos),
                Ok(TrainUpdate::Episode { episode, data }) => {
                    self.episode = episode;
                    self.plots.update(episode, &data);
                    self.maze.clear_visited();
                }
                Ok(TrainUpdate::Done { best }) => {
                    self.maze.clear_visited();
                    self.maze.set_editable(true);
                    let steps = best.as_ref().map(|b| b.steps);
                    self.maze.show_best(best.map(|b| b.path).unwrap_or_default());
                    self.state = State::Done(steps);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.state = State::Error("Trainer disconnected.");
                    break;
                }
            };
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let handled = match self.selected_tab {
            0 => self.maze.handle_ui_event(event),
            2 => self.logs.handle_ui_event(event),
            _ => false,
        };
        if handled {
            return;
        }

        let Some(key) = event_keycode(event) else {
            return;
        };

        match key {
            KeyCode::Char('q') => {
                self.state = State::Quit;
                return;
            }
            KeyCode::Char('h') => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Tab => {
                self.selected_tab = (self.selected_tab + 1) % TABS.len();
                return;
            }
            _ => {}
        }

        if self.selected_tab == 1 {
            match key {
                KeyCode::Left => {
                    self.plots.prev_plot();
                    return;
                }
                KeyCode::Right => {
                    self.plots.next_plot();
                    return;
                }
                _ => {}
            }
        }

        match self.state {
            State::Build | State::Done(_) => match key {
                KeyCode::Enter => self.start_training(),
                KeyCode::Esc => self.state = State::Build,
                _ => {}
            },
            _ => {}
        }
    }

    /// Send the painted maze to the trainer and switch into the training state
    fn start_training(&mut self) {
        if self.run_tx.send(self.maze.maze().clone()).is_err() {
            self.state = State::Error("Trainer disconnected.");
            return;
        }
        self.episode = 0;
        self.plots.reset();
        self.maze.clear_visited();
        self.maze.clear_best();
        self.maze.set_editable(false);
        self.state = State::Train;
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Layout
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        // Menu
        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        // Main
        match self.selected_tab {
            0 => self.maze.render_ref(main_area, buf),
            1 => self.plots.render_ref(main_area, buf),
            2 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        // Progress Bar
        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Progress"),
            )
            .gauge_style(Color::Cyan)
            .ratio(f64::from(self.episode) / f64::from(self.total_episodes.max(1)))
            .render(progress_area, buf);

        // Popups
        match self.state {
            State::Done(steps) if self.maze.reveal_done() => {
                let message = match steps {
                    Some(steps) => format!("Shortest path found in {steps} steps!"),
                    None => String::from("No path to the goal was found."),
                };
                render_popup(area, buf, "Training Complete", &message);
            }
            State::Error(message) => render_popup(area, buf, "Error", message),
            _ => {}
        }

        if self.show_help {
            help::render_help(area, buf, self.selected_tab);
        }
    }
}

fn render_popup(area: Rect, buf: &mut Buffer, title: &str, message: &str) {
    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length((message.len() as u16 + 8).min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(message)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
