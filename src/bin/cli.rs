//! Checkin CLI
//!
//! Terminal front-end for the daily check-in:
//! - Fill in the form interactively
//! - Submit answers in one go
//! - Check store status
//! - Print a default config file

use checkin::client::{ClientConfig, StoreClient};
use checkin::config::{generate_default_config, Config};
use checkin::form::{
    FormValues, PageView, SubmissionController, SubmissionState, SubmitOutcome, FOOD_OPTIONS,
    MOOD_MAX, MOOD_MIN,
};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checkin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily check-in: name, food, mood and water")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in the form interactively (default)
    Fill,

    /// Submit all four answers at once
    Submit {
        /// Your name
        #[arg(long, default_value = "")]
        name: String,
        /// Did you eat? (Yes / No)
        #[arg(long, default_value = "")]
        food: String,
        /// Current mood, 1-10
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        mood: i64,
        /// How much did you drink?
        #[arg(long, default_value = "")]
        water: String,
    },

    /// Show record store status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::resolve(cli.config.as_deref())?;

    checkin::logging::init(&config.logging);
    config.log_source();

    if let Some(url) = cli.api_url {
        config.client.api_url = url;
    }

    match cli.command.unwrap_or(Commands::Fill) {
        Commands::Fill => {
            let client = StoreClient::new(config.client.clone())?;
            if !fill(client).await? {
                std::process::exit(1);
            }
        }

        Commands::Submit {
            name,
            food,
            mood,
            water,
        } => {
            let client = StoreClient::new(config.client.clone())?;
            let values = FormValues::new(name, food, mood, water);
            let mut controller = SubmissionController::with_values(client, values);

            let outcome = controller.submit().await;
            if let Some(notice) = controller.take_notice() {
                eprintln!("{}", notice);
            }

            match outcome {
                SubmitOutcome::Created(token) => {
                    print!("{}", PageView::new(&controller.state(), controller.values()));
                    println!("\nEntry: {}", token);
                }
                SubmitOutcome::Invalid(report) => {
                    eprintln!("Missing: {}", report);
                    std::process::exit(1);
                }
                SubmitOutcome::Failed(_)
                | SubmitOutcome::InFlight
                | SubmitOutcome::AlreadySubmitted => {
                    std::process::exit(1);
                }
            }
        }

        Commands::Status => status(config.client.clone()).await?,

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Walk the respondent through the form until an entry is stored.
///
/// Returns false if they gave up after a failed submit.
async fn fill(client: StoreClient) -> Result<bool, Box<dyn std::error::Error>> {
    let mut controller = SubmissionController::new(client);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // Show the disabled control while the insert is in flight
    let mut state_rx = controller.subscribe();
    let watcher = tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            if *state_rx.borrow_and_update() == SubmissionState::Submitting {
                println!("[ Loading... ] (disabled)");
            }
        }
    });

    let stored = loop {
        print!("{}", PageView::new(&controller.state(), controller.values()));
        println!();

        let current = controller.values().clone();

        let name = prompt(&mut lines, "Specify your name", &current.name)?;
        controller.set_name(name);

        let food = loop {
            let answer = prompt(
                &mut lines,
                &format!("1. Did you eat? ({})", FOOD_OPTIONS.join("/")),
                &current.food,
            )?;
            match normalize_food(&answer) {
                Some(food) => break food,
                None => println!("Please answer {}", FOOD_OPTIONS.join(" or ")),
            }
        };
        controller.set_food(food);

        let mood = prompt(
            &mut lines,
            &format!("2. What's your current mood? ({}-{})", MOOD_MIN, MOOD_MAX),
            &current.mood.to_string(),
        )?;
        match mood.trim().parse::<i64>() {
            Ok(m) => controller.set_mood(m),
            Err(_) => println!("Keeping mood at {}", current.mood),
        }
        if let Some(emoji) = controller.mood_emoji() {
            println!("   {} {}", controller.values().mood, emoji);
        }

        let water = prompt(&mut lines, "3. Did you drink? How much?", &current.water)?;
        controller.set_water(water);

        let outcome = controller.submit().await;
        if let Some(notice) = controller.take_notice() {
            println!("\n{}\n", notice);
        }

        match outcome {
            SubmitOutcome::Created(_) | SubmitOutcome::AlreadySubmitted => break true,
            SubmitOutcome::Invalid(_) | SubmitOutcome::InFlight => continue,
            SubmitOutcome::Failed(_) => {
                let again = prompt(&mut lines, "Try again? (y/n)", "y")?;
                if !again.trim().eq_ignore_ascii_case("y") {
                    break false;
                }
            }
        }
    };

    if stored {
        print!("\n{}", PageView::new(&controller.state(), controller.values()));
    }

    watcher.abort();
    Ok(stored)
}

/// Ask one question; an empty answer keeps `current`
fn prompt<B: BufRead>(
    lines: &mut io::Lines<B>,
    question: &str,
    current: &str,
) -> io::Result<String> {
    if current.is_empty() {
        print!("{}: ", question);
    } else {
        print!("{} [{}]: ", question, current);
    }
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => {
            let line = line?;
            let answer = line.trim();
            if answer.is_empty() {
                Ok(current.to_string())
            } else {
                Ok(answer.to_string())
            }
        }
        None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")),
    }
}

/// Map y/n style answers onto the offered options; empty stays empty
fn normalize_food(answer: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(String::new());
    }
    let initial = |s: &str| s.chars().next().map(|c| c.to_ascii_lowercase());

    FOOD_OPTIONS
        .iter()
        .find(|option| {
            option.eq_ignore_ascii_case(answer)
                || (answer.chars().count() == 1 && initial(option) == initial(answer))
        })
        .map(|option| option.to_string())
}

async fn status(client_config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = StoreClient::new(client_config)?;

    match client.health().await {
        Ok(health) => {
            println!("Checkin Status");
            println!("==============");
            println!("API:      {}", client.config().api_url);
            println!("Status:   {}", health.status);
            println!("Store:    {}", health.store);
            if let Some(backend) = &health.backend {
                println!("Backend:  {}", backend);
            }
            if let Some(entries) = health.entries {
                println!("Entries:  {}", entries);
            }
            println!("Uptime:   {}s", health.uptime_seconds);
            println!("Version:  {}", health.version);
            Ok(())
        }
        Err(e) => {
            eprintln!("Cannot reach {}: {}", client.config().api_url, e);
            std::process::exit(1);
        }
    }
}
