//! Headless maze auto-play.
//!
//! Generates a maze, lets the planner walk it under fog of war and prints
//! the walked trail.
//!
//! Run: cargo run --bin mazerun -- --difficulty hard --vision 2

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::{cursor, execute, terminal};
use log::info;
use mazerun_demos::{Session, Tick};
use mazerun_gen::{Difficulty, MazeGenerator};
use mazerun_solver::{PathPlanner, PlannerConfig};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Walks a generated maze with the path planner.
#[derive(Parser)]
#[command(name = "mazerun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Maze size preset: easy, medium or hard.
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Seed for maze generation. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Vision range of the agent.
    #[arg(long, default_value_t = 3)]
    vision: i32,

    /// Name of a registered solver to bind (`bfs`, `explorer`).
    #[arg(long)]
    solver: Option<String>,

    /// Time budget per external solver call, in milliseconds. 0 disables it.
    #[arg(long, default_value_t = 250)]
    budget_ms: u64,

    /// Stop after this many moves.
    #[arg(long, default_value_t = 2000)]
    max_steps: usize,

    /// Pause between ticks, redrawing the maze each time.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Print only the summary.
    #[arg(long)]
    quiet: bool,

    /// List the solvers `--solver` accepts and exit.
    #[arg(long)]
    list_solvers: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list_solvers {
        for name in PathPlanner::default().registry().names() {
            println!("{name}");
        }
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let (width, height) = cli.difficulty.maze_size();
    info!("generating {} maze {width}x{height} with seed {seed}", cli.difficulty);
    let grid = MazeGenerator::from_seed(seed).generate_connected(
        width,
        height,
        cli.difficulty.powerups(),
        16,
    )?;

    let config = PlannerConfig {
        time_budget: (cli.budget_ms > 0).then(|| Duration::from_millis(cli.budget_ms)),
        ..PlannerConfig::default()
    };
    let mut planner = PathPlanner::new(config);
    if let Some(name) = &cli.solver {
        // The planner logs a failed load, listing the registered names.
        planner.load_external_solver(name);
    }
    info!(
        "planning with {} strategy, external budget {:?}",
        planner.active_strategy(),
        planner.config().time_budget
    );

    let mut session = Session::new(grid, planner, cli.vision, StdRng::seed_from_u64(seed))?;
    let animate = cli.delay_ms > 0 && !cli.quiet;
    let mut stdout = io::stdout();
    let mut draw_error = None;
    let summary = session.run(cli.max_steps, |s, tick| {
        if !animate || draw_error.is_some() || !matches!(tick, Tick::Moved(_)) {
            return;
        }
        if let Err(e) = redraw(&mut stdout, &s.render()) {
            draw_error = Some(e);
            return;
        }
        thread::sleep(Duration::from_millis(cli.delay_ms));
    });
    if let Some(e) = draw_error {
        return Err(e.into());
    }

    if !cli.quiet {
        print!("{}", session.render());
    }
    println!("seed {seed}: {summary}");
    Ok(())
}

fn redraw(out: &mut impl Write, frame: &str) -> io::Result<()> {
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    write!(out, "{frame}")?;
    out.flush()
}
