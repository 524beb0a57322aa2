//! empire-runner: headless driver for Empire CEO.
//!
//! Usage:
//!   empire-runner --reset --ceo-name Asha --personality finance-wizard --industry technology
//!   empire-runner --business-name Chaiwala --city pune --business-type partnership \
//!                 --product-name Chai --price 20 --budget 25,25,30,20
//!   empire-runner --days 30 --seed 7
//!   empire-runner --interactive

use anyhow::Result;
use empire_core::{
    catalog::{BusinessType, Choice, City, Experience, Industry, Personality},
    command::PlayerCommand,
    config::GameConfig,
    engine::DayOutcome,
    notify::{Notification, Notifier, Severity},
    profile::ProfileDraft,
    rng::GameRng,
    scheduler::PlayState,
    session::{self, GameSession},
    startup::{BudgetAllocation, StartupDraft, DEFAULT_PRODUCT_PRICE},
    state::{GameRecord, MarginRating},
    store::{ProfileStore, SqliteStore},
    types::{Day, Millis, Money},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Seed used when `--seed` is not given.
const DEFAULT_SEED: u64 = 42;

/// How long the interactive loop waits for input while paused.
const IDLE_WAIT: Duration = Duration::from_millis(500);

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    TogglePlay,
    ChangeSpeed,
    NextDay,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    business_name: String,
    day: Day,
    cash: Money,
    employees: u32,
    inventory: u64,
    revenue: Money,
    expenses: Money,
    customer_satisfaction: u32,
    employee_morale: u32,
    net_profit: Money,
    profit_margin: f64,
    margin_rating: MarginRating,
    play_state: PlayState,
    speed: u32,
    last_event: Option<String>,
}

/// Prints notifications to stderr so stdout stays machine-readable.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, n: Notification) {
        let marker = match n.severity {
            Severity::Normal => "*",
            Severity::Destructive => "!",
        };
        eprintln!("[{marker}] {}: {}", n.title, n.description);
        log::debug!("notification: {} / {}", n.title, n.description);
    }
}

type Session<'a> = GameSession<&'a mut SqliteStore, ConsoleNotifier, GameRng>;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = str_arg(&args, "--db").unwrap_or("empire.db");
    let seed = seed_arg(&args)?;
    let days = parse_arg(&args, "--days", 0u32);
    let interactive = has_flag(&args, "--interactive");
    let config = match str_arg(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut store = SqliteStore::open(db)?;
    store.migrate()?;
    let mut notifier = ConsoleNotifier;

    if has_flag(&args, "--reset") {
        session::start_new_game(&mut store)?;
    }

    if let Some(name) = str_arg(&args, "--ceo-name") {
        let draft = profile_draft(&args, name)?;
        session::create_profile(&mut store, &mut notifier, draft, chrono::Utc::now())?;
    }

    if let Some(business_name) = str_arg(&args, "--business-name") {
        let draft = startup_draft(&args, business_name)?;
        session::setup_startup(&mut store, &mut notifier, draft, chrono::Utc::now())?;
    }

    if days == 0 && !interactive {
        print_status(&store)?;
        return Ok(());
    }

    let mut game = GameSession::load(&mut store, notifier, GameRng::new(seed), &config)?;

    if interactive {
        run_ipc_loop(&mut game)?;
    } else {
        let ran = game.run_days(days);
        print_summary(game.record(), ran);
    }
    Ok(())
}

fn profile_draft(args: &[String], name: &str) -> Result<ProfileDraft> {
    Ok(ProfileDraft {
        name: name.to_string(),
        personality: str_arg(args, "--personality")
            .map(str::parse::<Personality>)
            .transpose()?,
        industry: str_arg(args, "--industry")
            .map(str::parse::<Industry>)
            .transpose()?,
        experience: str_arg(args, "--experience")
            .map(str::parse::<Experience>)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn startup_draft(args: &[String], business_name: &str) -> Result<StartupDraft> {
    let budget_allocation = match str_arg(args, "--budget") {
        Some(raw) => parse_budget(raw)?,
        None => BudgetAllocation::default(),
    };
    Ok(StartupDraft {
        business_name: business_name.to_string(),
        city: str_arg(args, "--city").map(str::parse::<City>).transpose()?,
        business_type: str_arg(args, "--business-type")
            .map(str::parse::<BusinessType>)
            .transpose()?,
        product_name: str_arg(args, "--product-name").unwrap_or_default().to_string(),
        product_price: price_arg(args)?,
        budget_allocation,
    })
}

/// `research,hr,marketing,operations` in whole percent.
fn parse_budget(raw: &str) -> Result<BudgetAllocation> {
    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid --budget '{raw}': {e}"))?;
    match parts.as_slice() {
        [research, hr, marketing, operations] => Ok(BudgetAllocation::new(
            *research,
            *hr,
            *marketing,
            *operations,
        )),
        _ => anyhow::bail!("--budget needs four comma-separated percentages, got '{raw}'"),
    }
}

/// Drive the scheduler in real time from JSON lines on stdin.
///
/// Input is read on a helper thread; the main loop waits on the channel
/// until the next due day. A command that arrives before the deadline is
/// applied before the scheduler is polled, so a pause always wins.
fn run_ipc_loop(game: &mut Session<'_>) -> Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let origin = Instant::now();
    let now = || origin.elapsed().as_millis() as Millis;
    let mut stdout = io::stdout();
    let mut last_event: Option<String> = None;

    loop {
        let wait = game
            .scheduler()
            .time_until_due(now())
            .map(Duration::from_millis)
            .unwrap_or(IDLE_WAIT);

        match rx.recv_timeout(wait) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let cmd: IpcCommand = match serde_json::from_str(&line) {
                    Ok(c) => c,
                    Err(e) => {
                        let err_json = serde_json::json!({ "error": e.to_string() });
                        writeln!(stdout, "{}", err_json)?;
                        stdout.flush()?;
                        continue;
                    }
                };
                let player_cmd = match cmd {
                    IpcCommand::Quit => break,
                    IpcCommand::GetState => None,
                    IpcCommand::TogglePlay => Some(PlayerCommand::TogglePlay),
                    IpcCommand::ChangeSpeed => Some(PlayerCommand::ChangeSpeed),
                    IpcCommand::NextDay => Some(PlayerCommand::NextDay),
                };
                if let Some(pc) = player_cmd {
                    if let Some(outcome) = game.apply(pc, now()) {
                        remember_event(&mut last_event, &outcome);
                    }
                }
                write_state(&mut stdout, game, &last_event)?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if let Some(outcome) = game.poll(now()) {
            remember_event(&mut last_event, &outcome);
            write_state(&mut stdout, game, &last_event)?;
        }
    }
    Ok(())
}

fn remember_event(last_event: &mut Option<String>, outcome: &DayOutcome) {
    if let Some(e) = &outcome.event {
        *last_event = Some(format!("Day {}: {}", outcome.state.day, e.message));
    }
}

fn write_state(
    out: &mut impl Write,
    game: &Session<'_>,
    last_event: &Option<String>,
) -> Result<()> {
    let state = build_ui_state(game, last_event.clone());
    writeln!(out, "{}", serde_json::to_string(&state)?)?;
    out.flush()?;
    Ok(())
}

fn build_ui_state(game: &Session<'_>, last_event: Option<String>) -> UiState {
    let record = game.record();
    let s = &record.game_state;
    UiState {
        business_name: record.startup.business_name.clone(),
        day: s.day,
        cash: s.cash,
        employees: s.employees,
        inventory: s.inventory,
        revenue: s.revenue,
        expenses: s.expenses,
        customer_satisfaction: s.customer_satisfaction,
        employee_morale: s.employee_morale,
        net_profit: s.net_profit(),
        profit_margin: s.profit_margin(),
        margin_rating: s.margin_rating(),
        play_state: game.scheduler().state(),
        speed: game.scheduler().speed(),
        last_event,
    }
}

fn print_status(store: &SqliteStore) -> Result<()> {
    match store.load_record()? {
        Some(record) => {
            println!(
                "Saved game: {} (Day {})",
                record.startup.business_name, record.game_state.day
            );
            println!("  continue with --days N or --interactive, or start over with --reset");
        }
        None => match store.load_profile()? {
            Some(profile) => {
                println!(
                    "CEO {} is ready (capital {}). Register a startup with --business-name ...",
                    profile.name, profile.starting_capital
                );
            }
            None => println!("No saved game. Create a CEO with --ceo-name ..."),
        },
    }
    Ok(())
}

fn print_summary(record: &GameRecord, days_run: u32) {
    let s = &record.game_state;
    let rating = s.margin_rating();
    println!("=== {} ===", record.startup.business_name);
    println!(
        "  CEO:            {} ({})",
        record.ceo_profile.name,
        record.ceo_profile.personality.label()
    );
    println!("  days run:       {days_run}");
    println!("  current day:    {}", s.day);
    println!("  cash:           {}", s.cash);
    println!("  revenue:        {}", s.revenue);
    println!("  expenses:       {}", s.expenses);
    println!("  net profit:     {}", s.net_profit());
    println!("  profit margin:  {:.1}% ({:?})", s.profit_margin(), rating);
    println!("  satisfaction:   {}", s.customer_satisfaction);
    println!("  morale:         {}", s.employee_morale);
    println!("  inventory:      {}", s.inventory);
    println!();
    println!("  {}", rating.advice());
}

/// `--seed`, defaulting to a fixed seed so runs replay. A malformed seed
/// is an error rather than a silent fallback.
fn seed_arg(args: &[String]) -> Result<u64> {
    str_arg(args, "--seed")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| anyhow::anyhow!("Invalid --seed '{raw}': {e}"))
        })
        .transpose()
        .map(|seed| seed.unwrap_or(DEFAULT_SEED))
}

/// `--price` as typed. Range checks happen in the startup validation.
fn price_arg(args: &[String]) -> Result<f64> {
    str_arg(args, "--price")
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|e| anyhow::anyhow!("Invalid --price '{raw}': {e}"))
        })
        .transpose()
        .map(|price| price.unwrap_or(DEFAULT_PRODUCT_PRICE))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    str_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
