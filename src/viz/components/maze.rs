use std::{
    cell::Cell,
    collections::HashSet,
    time::{Duration, Instant},
};

use crossterm::event::Event;
use ratatui::{layout::Position, prelude::*, widgets::*};

use crate::maze::{Maze, Pos};
use crate::viz::util::event_click;

use super::Component;

/// Terminal footprint of one maze cell
const CELL_WIDTH: u16 = 4;
const CELL_HEIGHT: u16 = 2;

/// Delay between best path cells during the reveal
const REVEAL_DELAY: Duration = Duration::from_millis(50);

/// Renders the maze grid and handles wall painting
///
/// The maze held here is the one the user edits; training runs on clones of it. Cell colors
/// layer the agent's trail and the revealed best path over the grid, with start, goal, and
/// walls always on top.
pub struct MazeView {
    maze: Maze,
    visited: HashSet<Pos>,
    best: Vec<Pos>,
    revealed: usize,
    last_reveal: Instant,
    editable: bool,
    grid_area: Cell<Rect>,
}

impl MazeView {
    pub fn new(maze: Maze) -> Self {
        Self {
            maze,
            visited: HashSet::new(),
            best: Vec::new(),
            revealed: 0,
            last_reveal: Instant::now(),
            editable: true,
            grid_area: Cell::new(Rect::default()),
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Allow or reject wall painting; walls are frozen while training runs
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Mark a cell as part of the agent's trail for the current episode
    pub fn visit(&mut self, pos: Pos) {
        self.visited.insert(pos);
    }

    pub fn clear_visited(&mut self) {
        self.visited.clear();
    }

    /// Start revealing a best path, one cell per [`REVEAL_DELAY`]
    pub fn show_best(&mut self, path: Vec<Pos>) {
        self.best = path;
        self.revealed = 0;
        self.last_reveal = Instant::now();
    }

    pub fn clear_best(&mut self) {
        self.best.clear();
        self.revealed = 0;
    }

    /// Advance the best path reveal when its delay has elapsed
    pub fn tick_reveal(&mut self) {
        if self.revealed < self.best.len() && self.last_reveal.elapsed() >= REVEAL_DELAY {
            self.revealed += 1;
            self.last_reveal = Instant::now();
        }
    }

    pub fn reveal_done(&self) -> bool {
        self.revealed == self.best.len()
    }

    /// Map a screen position to a grid coordinate using the area of the last render
    fn pos_of(&self, position: Position) -> Option<Pos> {
        let grid = self.grid_area.get();
        if !grid.contains(position) {
            return None;
        }
        let row = ((position.y - grid.y) / CELL_HEIGHT) as i32;
        let col = ((position.x - grid.x) / CELL_WIDTH) as i32;
        Some((row, col))
    }

    fn color_of(&self, pos: Pos) -> Color {
        if pos == self.maze.start() {
            Color::Green
        } else if pos == self.maze.goal() {
            Color::Red
        } else if !self.maze.is_open(pos) {
            Color::Black
        } else if self.best[..self.revealed].contains(&pos) {
            Color::Yellow
        } else if self.visited.contains(&pos) {
            Color::LightBlue
        } else {
            Color::White
        }
    }
}

impl WidgetRef for MazeView {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Maze");
        let inner = block.inner(area);
        block.render(area, buf);

        let width = self.maze.cols() as u16 * CELL_WIDTH;
        let height = self.maze.rows() as u16 * CELL_HEIGHT;
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(inner);
        let [_, grid, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(middle);
        self.grid_area.set(grid);

        for row in 0..self.maze.rows() {
            for col in 0..self.maze.cols() {
                let pos = (row as i32, col as i32);
                let cell = Rect::new(
                    grid.x + col as u16 * CELL_WIDTH,
                    grid.y + row as u16 * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                )
                .intersection(inner);
                buf.set_style(cell, Style::default().bg(self.color_of(pos)));
            }
        }
    }
}

impl Component for MazeView {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        if !self.editable {
            return false;
        }
        let Some(position) = event_click(event) else {
            return false;
        };
        let Some(pos) = self.pos_of(position) else {
            return false;
        };
        self.maze.toggle(pos)
    }
}
