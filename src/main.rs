use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liga_tracker::api::state::AppState;
use liga_tracker::calculate::{
    affinity_report, available_months, compute_standings, filter_matches, generate_teams,
    period_mvp, team_stats, top_lists, MonthFilter, SortState,
};
use liga_tracker::config::AppConfig;
use liga_tracker::models::{Dataset, DraftPick, PlayerStat, TeamGroup};
use liga_tracker::parse::parse_grid;

#[derive(Parser)]
#[command(name = "liga-tracker")]
#[command(about = "League stats from a shared match sheet")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the standings table
    Standings {
        /// Month bucket (YYYY-MM), or the whole season
        #[arg(long)]
        month: Option<String>,
    },

    /// Print the top lists and period MVP
    Top {
        #[arg(long)]
        month: Option<String>,
    },

    /// List the months present in the data
    Months,

    /// Partner affinity for one player
    Affinity { name: String },

    /// Best and worst ad-hoc teams
    Teams {
        #[arg(long)]
        month: Option<String>,
    },

    /// Generate two balanced teams from the selected players
    Balance {
        /// Selected player names
        #[arg(required = true, num_args = 1..)]
        players: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting liga-tracker v{}", env!("CARGO_PKG_VERSION"));

    let config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)?
    } else {
        tracing::debug!(path = %cli.config.display(), "no config file, using defaults");
        AppConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            let dataset = load_dataset(&config).await?;
            tracing::info!(
                matches = dataset.matches.len(),
                players = dataset.roster.len(),
                "dataset loaded"
            );

            let state = AppState::new(dataset, config.engine, config.source.sheet_source());
            let app = liga_tracker::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API: http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::Standings { month } => {
            let dataset = load_dataset(&config).await?;
            let filter = MonthFilter::from_param(month.as_deref());
            let filtered = filter_matches(&dataset.matches, &filter);
            let mut players =
                compute_standings(&dataset.roster, &filtered, config.engine.streak_window);
            SortState::default().apply(&mut players);

            println!("\n=== Standings ({}) ===", label(&filter));
            println!(
                "{:<20} {:>4} {:>4} {:>5} {:>7}  {}",
                "Player", "PJ", "W", "Pts", "%", "Streak"
            );
            for p in &players {
                println!(
                    "{:<20} {:>4} {:>4} {:>5} {:>6.1}%  {}",
                    p.name,
                    p.played,
                    p.won,
                    p.points,
                    p.percentage,
                    p.streak.iter().collect::<String>()
                );
            }
        }

        Commands::Top { month } => {
            let dataset = load_dataset(&config).await?;
            let filter = MonthFilter::from_param(month.as_deref());
            let filtered = filter_matches(&dataset.matches, &filter);
            let players =
                compute_standings(&dataset.roster, &filtered, config.engine.streak_window);
            let lists = top_lists(
                &players,
                filtered.len(),
                config.engine.qualification_ratio,
                config.engine.top_n,
            );

            println!("\n=== Top lists ({}) ===", label(&filter));
            println!(
                "Qualification: {:.1} matches played ({} in filter)",
                lists.threshold,
                filtered.len()
            );
            print_top("Points", &lists.points, |p| format!("{} pts", p.points));
            print_top("Played", &lists.played, |p| format!("{} PJ", p.played));
            print_top("Win %", &lists.percentage, |p| {
                format!("{:.1}%", p.percentage)
            });

            match period_mvp(&players) {
                Some(mvp) => println!(
                    "\nMVP: {} ({} pts, {} wins, {:.0}%)",
                    mvp.name, mvp.points, mvp.won, mvp.percentage
                ),
                None => println!("\nMVP: none (no points scored)"),
            }
        }

        Commands::Months => {
            let dataset = load_dataset(&config).await?;
            for month in available_months(&dataset.matches) {
                println!("{}", month);
            }
        }

        Commands::Affinity { name } => {
            let dataset = load_dataset(&config).await?;
            if !dataset.roster.contains(&name) {
                anyhow::bail!("unknown player: {}", name);
            }
            let report = affinity_report(&name, &dataset.matches);

            println!("\n=== Affinity for {} ===", report.player);
            println!("Wins most with:");
            for e in &report.best {
                println!("  {:<20} {}W {}L", e.name, e.won, e.lost);
            }
            println!("Loses most with:");
            for e in &report.worst {
                println!("  {:<20} {}W {}L", e.name, e.won, e.lost);
            }
        }

        Commands::Teams { month } => {
            let dataset = load_dataset(&config).await?;
            let filter = MonthFilter::from_param(month.as_deref());
            let filtered = filter_matches(&dataset.matches, &filter);
            let report = team_stats(&filtered);

            println!("\n=== Team stats ({}) ===", label(&filter));
            print_group("Best team", report.best.as_ref(), |g| {
                format!("{} wins", g.won)
            });
            print_group("Worst team", report.worst.as_ref(), |g| {
                format!("{} losses", g.lost)
            });
        }

        Commands::Balance { players } => {
            let dataset = load_dataset(&config).await?;
            let standings = compute_standings(
                &dataset.roster,
                &dataset.matches,
                config.engine.streak_window,
            );
            let draft = generate_teams(&players, &standings, config.engine.win_score_weight)?;

            println!("\n=== Balanced teams ===");
            print_team("Team A", &draft.team_a, draft.average_a);
            print_team("Team B", &draft.team_b, draft.average_b);
        }
    }

    Ok(())
}

async fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    let source = config.source.sheet_source();
    tracing::info!(source = %source.describe(), "loading sheet");
    let grid = source.load().await?;
    Ok(parse_grid(&grid))
}

fn label(filter: &MonthFilter) -> String {
    match filter {
        MonthFilter::All => "whole season".to_string(),
        MonthFilter::Month(key) => key.clone(),
    }
}

fn print_top(title: &str, list: &[PlayerStat], value: impl Fn(&PlayerStat) -> String) {
    println!("\n{}:", title);
    if list.is_empty() {
        println!("  (not enough data)");
        return;
    }
    for (i, p) in list.iter().enumerate() {
        println!("  {}. {:<20} {}", i + 1, p.name, value(p));
    }
}

fn print_group(title: &str, group: Option<&TeamGroup>, value: impl Fn(&TeamGroup) -> String) {
    match group {
        Some(g) => println!("{}: {} ({})", title, g.players.join(", "), value(g)),
        None => println!("{}: not enough data", title),
    }
}

fn print_team(title: &str, team: &[DraftPick], average: f64) {
    println!("\n{} (avg {:.1}%):", title, average);
    for p in team {
        println!("  {:<20} {:.1}% {} wins", p.name, p.percentage, p.won);
    }
}
