use std::{error::Error, sync::mpsc, thread, time::Duration};

use log::LevelFilter;
use maze_sarsa::{
    algo::tabular::sarsa::{SarsaAgent, SarsaAgentConfig},
    maze::{Maze, Pos},
    viz::{App, TrainUpdate},
};

const GRID_ROWS: usize = 6;
const GRID_COLS: usize = 6;
const START_POS: Pos = (0, 0);
const GOAL_POS: Pos = (5, 5);

/// Pause between agent steps so the trail is watchable
const STEP_DELAY: Duration = Duration::from_millis(10);
/// Step cap per episode, so a maze without a path cannot loop forever
const MAX_EPISODE_STEPS: u32 = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    tui_logger::init_logger(LevelFilter::Debug)?;
    tui_logger::set_default_level(LevelFilter::Debug);

    let maze = Maze::new(GRID_ROWS, GRID_COLS, START_POS, GOAL_POS)?;
    let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig {
        max_steps: Some(MAX_EPISODE_STEPS),
        ..Default::default()
    });

    let (update_tx, update_rx) = mpsc::channel();
    let (run_tx, run_rx) = mpsc::channel();

    let mut app = App::new(maze, agent.episodes(), run_tx);
    let ui = thread::spawn(move || app.run(update_rx));

    // Each received maze is one training run; the agent's table carries over between runs.
    while let Ok(mut maze) = run_rx.recv() {
        log::info!("Training for {} episodes", agent.episodes());
        for i in 0..agent.episodes() {
            // No pacing once the interface is gone, so the run winds down immediately
            agent.go_with(&mut maze, |&pos| {
                if update_tx.send(TrainUpdate::Step { pos }).is_ok() {
                    thread::sleep(STEP_DELAY);
                }
            });
            let report = maze.report.take();
            let update = TrainUpdate::Episode {
                episode: i + 1,
                data: report.values().map(|&v| f64::from(v)).collect(),
            };
            if update_tx.send(update).is_err() {
                break;
            }
        }

        let best = agent.best().cloned();
        match &best {
            Some(episode) => log::info!("Best path so far: {} steps", episode.steps),
            None => log::warn!("No path to the goal found"),
        }
        if update_tx.send(TrainUpdate::Done { best }).is_err() {
            break;
        }
    }

    ui.join().map_err(|_| "the interface thread panicked")??;

    Ok(())
}
