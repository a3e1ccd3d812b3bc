use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use caravan::{visualize_table, RoundConfig, RoundManager, Table, UserInput, DEFAULT_HAND_SIZE};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    Terminal,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod ui;

#[derive(Parser)]
struct Args {
    /// RNG seed for shuffling the decks
    #[arg(long)]
    seed: Option<u64>,

    /// How many cards each player is dealt
    #[arg(long, default_value_t = DEFAULT_HAND_SIZE)]
    hand_size: usize,

    /// During the first three turns, only allow value cards on empty caravans of your own
    #[arg(long, default_value_t = false)]
    opening_rule: bool,

    /// Swap sides after every turn, so two players can share the terminal
    #[arg(long, default_value_t = false)]
    hot_seat: bool,

    /// Write logs to this file. Without it, nothing is logged
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_file.as_deref(), args.log_level)?;

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = RoundConfig {
        hand_size: args.hand_size,
        opening_rule: args.opening_rule,
    };
    let mut table = Table::shuffled(&mut rng, config.hand_size);
    let mut round = RoundManager::new(&mut table, config);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let result = run(&mut terminal, &mut round, args.hot_seat);
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result?;

    println!("{}", visualize_table(round.table()));
    match round.winner() {
        Some(winner) => println!(
            "{} wins after {} turns",
            ui::player_name(winner),
            round.turn_count() - 1
        ),
        None => println!("Left after {} turns, no winner yet", round.turn_count() - 1),
    }
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    round: &mut RoundManager,
    hot_seat: bool,
) -> anyhow::Result<()> {
    while !round.is_exited() {
        terminal.draw(|frame| ui::draw(frame, &*round))?;
        let Some(input) = next_input()? else {
            continue;
        };
        let turn = round.turn_count();
        round.handle_input(input)?;
        if hot_seat && round.turn_count() != turn {
            round.swap_sides()?;
        }
    }
    Ok(())
}

fn next_input() -> io::Result<Option<UserInput>> {
    if event::poll(Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == event::KeyEventKind::Press {
                return Ok(map_key(key.code));
            }
        }
    }
    Ok(None)
}

fn map_key(code: KeyCode) -> Option<UserInput> {
    match code {
        KeyCode::Left => Some(UserInput::Left),
        KeyCode::Right => Some(UserInput::Right),
        KeyCode::Up => Some(UserInput::Up),
        KeyCode::Down => Some(UserInput::Down),
        KeyCode::Enter | KeyCode::Char('w') => Some(UserInput::Accept),
        KeyCode::Esc | KeyCode::Char('r') => Some(UserInput::Cancel),
        KeyCode::Char('q') => Some(UserInput::DiscardCard),
        KeyCode::Char('e') => Some(UserInput::DiscardCaravan),
        _ => None,
    }
}

// The terminal belongs to the UI, so logs can only go to a file
fn initialize_logging(log_file: Option<&Path>, level: LevelFilter) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert_eq!(map_key(KeyCode::Enter), Some(UserInput::Accept));
        assert_eq!(map_key(KeyCode::Char('w')), Some(UserInput::Accept));
        assert_eq!(map_key(KeyCode::Esc), Some(UserInput::Cancel));
        assert_eq!(map_key(KeyCode::Char('r')), Some(UserInput::Cancel));
        assert_eq!(map_key(KeyCode::Char('q')), Some(UserInput::DiscardCard));
        assert_eq!(map_key(KeyCode::Char('e')), Some(UserInput::DiscardCaravan));
        assert_eq!(map_key(KeyCode::Up), Some(UserInput::Up));
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Tab), None);
    }

    #[test]
    fn default_arguments() {
        let args = Args::parse_from(["caravan_tui"]);
        assert_eq!(args.hand_size, DEFAULT_HAND_SIZE);
        assert!(!args.opening_rule);
        assert!(!args.hot_seat);
        assert_eq!(args.log_level, LevelFilter::INFO);

        let args = Args::parse_from(["caravan_tui", "--seed", "5", "--hand-size", "5", "--hot-seat"]);
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.hand_size, 5);
        assert!(args.hot_seat);
    }
}
