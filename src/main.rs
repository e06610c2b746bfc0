mod app;
mod config;
mod engine;
mod generator;
mod session;
mod store;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use engine::PerformanceTracker;
use generator::stage::Stage;
use session::result::DrillResult;
use store::json_store::JsonStore;

const BAR_WIDTH: usize = 20;
const QUIT_COMMAND: &str = ":q";

#[derive(Parser)]
#[command(
    name = "typefast",
    version,
    about = "Adaptive typing practice that unlocks keys as you master them"
)]
struct Cli {
    #[arg(short, long, help = "Number of words per practice text")]
    words: Option<usize>,

    #[arg(short, long, help = "Seed for reproducible practice text")]
    seed: Option<u64>,

    #[arg(long, help = "Path to the stats file")]
    stats_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Type generated texts line by line (default)
    Practice {
        #[arg(short, long, help = "Stop after this many texts")]
        rounds: Option<usize>,
    },
    /// Print the next practice text
    Next,
    /// Show per-key difficulty, hardest first
    Stats,
    /// Delete all recorded progress
    Reset,
    /// Write progress to a file
    Export { path: PathBuf },
    /// Replace progress with an export or a legacy stats file
    Import { path: PathBuf },
    /// Write the default config file if none exists and print its path
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TYPEFAST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config file");
        Config::default()
    });
    if let Some(words) = cli.words {
        config.word_count = words;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(path) = cli.stats_file {
        config.stats_file = path.to_string_lossy().to_string();
    }
    config.validate();

    let store = JsonStore::new(config.stats_path())?;
    let window = config.tuning.window_size;

    match cli.command.unwrap_or(Command::Practice { rounds: None }) {
        Command::Practice { rounds } => practice(App::new(config, Some(store)), rounds),
        Command::Next => {
            let mut app = App::new(config, Some(store));
            if let Some(key) = app.start_drill() {
                eprintln!("New key unlocked: {}", display_key(key));
            }
            println!("{}", app.current_text().unwrap_or_default());
            app.save()
        }
        Command::Stats => {
            let state = store.load_state(window);
            let tracker =
                PerformanceTracker::from_state(state, config.tuning.clone(), config.unlock_order());
            print_stats(&tracker);
            Ok(())
        }
        Command::Reset => {
            store.reset()?;
            println!("Progress reset ({})", store.path().display());
            Ok(())
        }
        Command::Export { path } => {
            store.export_to(&path, window)?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        Command::Import { path } => {
            let state = store.import_from(&path, window)?;
            println!(
                "Imported {} keystrokes, {} keys unlocked",
                state.total_keys_typed,
                state.unlocked_keys.len()
            );
            Ok(())
        }
        Command::Config => {
            let path = Config::config_path();
            if !path.exists() {
                config.save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Line-mode loop: each line typed against the shown text. Per-key latency
/// is the line's typing time spread evenly across its characters.
fn practice(mut app: App, rounds: Option<usize>) -> Result<()> {
    println!("Type each line and press Enter. Empty line for new text, {QUIT_COMMAND} to quit.");
    announce_unlock(app.start_drill());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut completed = 0;

    loop {
        let Some(text) = app.current_text() else {
            break;
        };
        println!("\n  {text}");
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line == QUIT_COMMAND {
            break;
        }
        if line.is_empty() {
            announce_unlock(app.restart_drill());
            continue;
        }

        feed_line(&mut app, &line, Instant::now());
        if let Some(result) = app.finish_drill() {
            print_result(result);
        }
        app.save()?;

        completed += 1;
        if rounds.is_some_and(|r| completed >= r) {
            break;
        }
        announce_unlock(app.start_drill());
    }

    app.save()
}

fn feed_line(app: &mut App, line: &str, typed_at: Instant) {
    let Some(presented_at) = app.drill.as_ref().map(|d| d.presented_at) else {
        return;
    };
    let chars: Vec<char> = line.chars().collect();
    let step = typed_at.saturating_duration_since(presented_at) / chars.len().max(1) as u32;
    for (i, &ch) in chars.iter().enumerate() {
        if app.type_char(ch, presented_at + step * (i as u32 + 1)) {
            break;
        }
    }
}

fn announce_unlock(key: Option<char>) {
    if let Some(key) = key {
        println!("\nNew key unlocked: {}", display_key(key));
    }
}

fn print_result(result: &DrillResult) {
    let suffix = if result.partial { " (incomplete)" } else { "" };
    println!(
        "  {:.0} wpm, {:.0}% accuracy, {} errors{suffix}",
        result.wpm, result.accuracy, result.incorrect
    );
}

fn print_stats(tracker: &PerformanceTracker) {
    let snapshot = tracker.snapshot();
    let stage = Stage::from_accuracy(snapshot.avg_accuracy, tracker.tuning());
    let unlocked: String = snapshot.unlocked_keys.iter().map(|&k| display_key(k)).collect();

    println!("Unlocked keys: {unlocked}");
    println!(
        "Sessions: {}  Keys typed: {}  Unlock progress: {:.0}%",
        tracker.session_count(),
        tracker.total_keys_typed(),
        tracker.unlock_progress() * 100.0
    );
    if let Some(last) = tracker.last_practice_at() {
        println!("Last practice: {}", last.format("%Y-%m-%d %H:%M"));
    }
    println!(
        "Accuracy: {:.1}%  Avg difficulty: {:.1}  Stage: {stage}",
        snapshot.avg_accuracy, snapshot.avg_difficulty
    );
    if tracker.should_unlock_next_key() {
        println!("Ready to unlock the next key.");
    }

    println!("\nKey difficulty (practice needed):");
    for (key, difficulty) in snapshot.ranked_keys() {
        let filled = ((difficulty / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)));
        let stat = tracker.key_stat(key);
        let accuracy = stat
            .and_then(|s| s.accuracy_pct())
            .map(|a| format!("{a:5.1}%"))
            .unwrap_or_else(|| "    -".to_string());
        let wpm = stat
            .and_then(|s| s.avg_wpm())
            .map(|w| format!("{w:4.0} wpm"))
            .unwrap_or_else(|| "   - wpm".to_string());
        println!("  '{key}': {bar} {difficulty:5.1}  acc {accuracy}  {wpm}");
    }
}

fn display_key(key: char) -> String {
    if key == ' ' {
        "[space]".to_string()
    } else {
        key.to_string()
    }
}
