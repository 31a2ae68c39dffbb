use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tabled::Table;
use tabled::settings::Style;
use tailwise::engine::{AssignmentEngine, ResultSnapshot, RunParams};
use tailwise::filter::RosterFilter;
use tailwise::recorder::{JsonFileRecorder, MemoryRecorder, SnapshotRecorder};
use tailwise::roster::Roster;
use tailwise::stats::Statistics;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use view::{AircraftRow, EventRow, FlightRow, HistoryRow, StatisticsRow};

mod view;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Seed for every run; a fresh one is drawn per run when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Results history file
    #[arg(short, long, value_name = "FILE", default_value = "results_db.json")]
    results: PathBuf,

    /// Keep results in memory only
    #[arg(long)]
    no_record: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

enum Store {
    File(JsonFileRecorder),
    Memory(MemoryRecorder),
}

impl Store {
    fn recorder(&mut self) -> &mut dyn SnapshotRecorder {
        match self {
            Store::File(r) => r,
            Store::Memory(r) => r,
        }
    }

    fn history(&self) -> &[ResultSnapshot] {
        match self {
            Store::File(r) => r.history().history(),
            Store::Memory(r) => r.history(),
        }
    }
}

struct RunRequest {
    filter: RosterFilter,
    params: RunParams,
    seed: Option<u64>,
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(format!("{key} expects true or false, got '{value}'")),
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("{key} expects YYYY-MM-DD, got '{value}': {e}"))
}

fn parse_run_request(args: &[&str], chaos: bool) -> Result<RunRequest, String> {
    let mut request = RunRequest {
        filter: RosterFilter::default(),
        params: RunParams {
            chaos,
            ..RunParams::default()
        },
        seed: None,
    };
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
        match key {
            "subtype" => request.filter.subtype = Some(Arc::from(value)),
            "start" => request.filter.start_date = Some(parse_date(key, value)?),
            "end" => request.filter.end_date = Some(parse_date(key, value)?),
            "exclude" => {
                request.filter.exclude_tails = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Arc::from)
                    .collect()
            }
            "respect_pre" => request.params.respect_pre_assignments = parse_bool(key, value)?,
            "break_trips" => request.params.break_trips = parse_bool(key, value)?,
            "seed" => {
                request.seed = Some(value.parse().map_err(|_| format!("seed expects an integer, got '{value}'"))?)
            }
            _ => return Err(format!("unknown option '{key}'")),
        }
    }
    Ok(request)
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(p) => p,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn show<T: tabled::Tabled>(rows: Vec<T>) {
    let count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if count > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn run(roster: &Roster, store: &mut Store, request: RunRequest, default_seed: Option<u64>) {
    let filtered = match request.filter.apply(roster) {
        Ok(r) => r,
        Err(e) if e.is_configuration() => {
            println!("{}", format!("Nothing to schedule: {e}").yellow());
            return;
        }
        Err(e) => {
            println!("{}", format!("Error: {e}").red());
            return;
        }
    };

    let seed = request
        .seed
        .or(default_seed)
        .unwrap_or_else(rand::random::<u64>);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    info!(seed, "seeded run");

    match AssignmentEngine::new(&filtered).run(request.params, &mut rng, store.recorder()) {
        Ok(outcome) => {
            let snapshot = outcome.snapshot;
            if snapshot.events.is_empty() {
                println!("No flights could be assigned.");
            } else {
                show(snapshot.events.iter().map(EventRow::from).collect());
            }
            let summary = format!(
                "{} run (seed {}): {}/{} flights assigned, {:.2} total carbon",
                snapshot.mode,
                seed,
                snapshot.assignments.len(),
                filtered.flights().len(),
                snapshot.total_carbon()
            );
            println!("{}", summary.green());
            if request.params.chaos {
                println!(
                    "{}",
                    format!("{} assignments recovered after disruption.", snapshot.chaos_recovered).cyan()
                );
            }
        }
        Err(e) => println!("{}", format!("Run aborted: {e}").red()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let roster = Roster::load_from_file(&args.scenario)?;
    println!(
        "Tower online. Loaded {} flights and {} aircraft from {}",
        roster.flights().len(),
        roster.aircraft().len(),
        args.scenario.display()
    );

    let mut store = if args.no_record {
        Store::Memory(MemoryRecorder::new())
    } else {
        Store::File(JsonFileRecorder::open(args.results.clone())?)
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "schedule".to_string(),
            "disrupt".to_string(),
            "stats".to_string(),
            "history".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        match parts.get(1).copied().unwrap_or("f") {
                            "a" | "aircraft" => show(roster.aircraft().iter().map(AircraftRow::from).collect()),
                            _ => show(roster.flights().iter().map(FlightRow::from).collect()),
                        }
                    },
                    "schedule" | "disrupt" => {
                        match parse_run_request(&parts[1..], parts[0] == "disrupt") {
                            Ok(request) => run(&roster, &mut store, request, args.seed),
                            Err(e) => println!("{}", e.red()),
                        }
                    },
                    "stats" => {
                        match Statistics::latest(store.history()) {
                            Some(stats) => show(vec![StatisticsRow::from(&stats)]),
                            None => println!("No results available yet."),
                        }
                    },
                    "history" => {
                        let history = store.history();
                        if history.is_empty() {
                            println!("No results available yet.");
                        } else {
                            show(history.iter().map(HistoryRow::from).collect());
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls [f|a]            - List flights (default) or aircraft");
                        println!("  schedule [k=v ...]  - Assign tails to the day's flights");
                        println!("  disrupt [k=v ...]   - Assign tails under simulated disruption");
                        println!("                        keys: subtype, start, end (YYYY-MM-DD), exclude (tails, comma separated),");
                        println!("                              respect_pre, break_trips (true|false), seed");
                        println!("  stats               - Summary of the latest result");
                        println!("  history             - All recorded results");
                        println!("  help / ?            - Show this help menu");
                        println!("  exit / quit         - Exit the console\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
