use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::info;

use quiz_client::api::{FileCatalog, HttpCatalog, HttpLeaderboard, build_http_client};
use quiz_client::browser::CatalogBrowser;
use quiz_client::commands::{Command, HELP};
use quiz_client::config::Config;
use quiz_client::error::SessionError;
use quiz_client::session::QuizSession;
use quiz_core::{CatalogSource, LeaderboardStore, SubmissionPlan};
use quiz_persistence::connection::connect_and_migrate;
use quiz_persistence::repositories::{BookmarkRepository, GameSnapshotRepository, HighScoreRepository};
use quiz_types::{GamePhase, GuessOutcome};

#[tokio::main]
async fn main() {
    // Logs go to stderr so they don't interleave with the game on stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let client = match build_http_client(config.http_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let catalog: Box<dyn CatalogSource> = match &config.catalog_url {
        Some(url) => {
            info!("Using remote champion catalog at {}", url);
            Box::new(HttpCatalog::new(client.clone(), url))
        }
        None => {
            info!("Loading champions from {}", config.catalog_path);
            Box::new(FileCatalog::new(&config.catalog_path))
        }
    };

    let leaderboard: Arc<dyn LeaderboardStore> = match &config.leaderboard_url {
        Some(url) => {
            info!("Using remote leaderboard at {}", url);
            Arc::new(HttpLeaderboard::new(client.clone(), url))
        }
        None => {
            info!("Using local leaderboard");
            Arc::new(HighScoreRepository::new(db.clone()))
        }
    };

    let session = match QuizSession::load(
        catalog.as_ref(),
        leaderboard,
        Arc::new(GameSnapshotRepository::new(db.clone())),
        config.rules(),
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Set CATALOG_URL or CATALOG_PATH to a reachable champion list.");
            std::process::exit(1);
        }
    };

    let mut browser = match CatalogBrowser::load(
        session.champions().to_vec(),
        Arc::new(BookmarkRepository::new(db)),
    )
    .await
    {
        Ok(browser) => browser,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    println!("Champion quiz: {} champions to find. Type :help for commands.", session.champions().len());
    print_status(&session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        if !handle_command(Command::parse(&line), &session, &mut browser).await {
            break;
        }
    }

    info!("Goodbye.");
}

/// Run one command, returning false when the player wants to leave
async fn handle_command(command: Command, session: &QuizSession, browser: &mut CatalogBrowser) -> bool {
    match command {
        Command::Guess(guess) => match session.submit_guess(&guess).await {
            Ok(outcome) => print_outcome(session, &outcome).await,
            Err(SessionError::UnsavedGuess { outcome, source }) => {
                print_outcome(session, &outcome).await;
                println!("Progress could not be saved: {}", source);
            }
            Err(e) => println!("{}", e),
        },
        Command::Reset => match session.reset().await {
            Ok(()) => print_status(session).await,
            Err(e) => println!("{}", e),
        },
        Command::Submit(name) => match session.submit_final_score(&name).await {
            Ok(SubmissionPlan::Keep { best_score }) => {
                println!("{} already has a best of {}, nothing to save.", name, best_score);
                println!("Type :reset to play again.");
            }
            Ok(_) => {
                println!("Score saved for {}.", name);
                print_status(session).await;
            }
            Err(e) if e.is_retryable() => println!("{} Try :submit again.", e),
            Err(e) => println!("{}", e),
        },
        Command::Browse(search) => {
            browser.set_search(search.as_deref().unwrap_or(""));
            print_champions(session, browser).await;
        }
        Command::Tag(tag) => {
            browser.toggle_tag(tag);
            print_champions(session, browser).await;
        }
        Command::Sort(sort) => {
            browser.set_sort(sort);
            print_champions(session, browser).await;
        }
        Command::Bookmark(champion) => match browser.toggle_bookmark(&champion).await {
            Ok(true) => println!("Bookmarked {}.", champion),
            Ok(false) => println!("Removed bookmark for {}.", champion),
            Err(e) => println!("{}", e),
        },
        Command::Leaderboard => match session.leaderboard().await {
            Ok(entries) if entries.is_empty() => println!("No high scores yet."),
            Ok(entries) => {
                let total = session.champions().len();
                for entry in entries {
                    println!(
                        "{:>3}. {:<20} {}",
                        entry.rank,
                        entry.record.player_name,
                        quiz_core::Leaderboard::format_progress(entry.record.score, total)
                    );
                }
            }
            Err(e) => println!("{}", e),
        },
        Command::Status => print_status(session).await,
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
        Command::Invalid(message) => println!("{}", message),
    }
    true
}

async fn print_outcome(session: &QuizSession, outcome: &GuessOutcome) {
    match outcome {
        GuessOutcome::Correct(_) => println!("Correct! {}", session.progress().await),
        GuessOutcome::Duplicate(_) => println!("Already guessed."),
        GuessOutcome::Miss => {
            let snapshot = session.snapshot().await;
            if snapshot.phase == GamePhase::GameOver {
                println!("Wrong! Game over with a score of {}.", snapshot.score);
                println!("Save it with :submit <name>, or :reset to start over.");
            } else {
                println!("Wrong! {} lives left.", snapshot.lives);
            }
        }
    }
}

async fn print_status(session: &QuizSession) {
    let snapshot = session.snapshot().await;
    println!(
        "Lives: {}  Score: {}  Phase: {}",
        snapshot.lives,
        session.progress().await,
        snapshot.phase
    );
}

async fn print_champions(session: &QuizSession, browser: &CatalogBrowser) {
    let query = browser.query();
    println!(
        "Sorted by {}{}",
        query.sort,
        query.tag.map(|tag| format!(", tag {}", tag)).unwrap_or_default()
    );

    for champion in browser.visible() {
        let bookmark = if browser.is_bookmarked(&champion.id) { "*" } else { " " };
        let guessed = if session.is_guessed(champion).await { "✓" } else { " " };
        println!("{} {} {:<16} {}", bookmark, guessed, champion.name, champion.title);
    }
}
