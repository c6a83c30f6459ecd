// Interactive terminal front end
//
// Usage: cargo run --bin crop_advisor
//
// Stdin is read on a helper thread that only forwards lines. The session and
// its debounce timer live on the main thread.

use crop_advisor::explanation::TextFormatter;
use crop_advisor::{AdvisorConfig, ArtifactPaths, Command, Reading, Recommender, Session, Status};
use crop_advisor::command::HELP;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AdvisorConfig::from_env();
    let recommender = match Recommender::load(&ArtifactPaths::in_dir(&config.model_dir)) {
        Ok(rec) => rec.with_top_k(config.top_k),
        Err(e) => {
            eprintln!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(&recommender, config.debounce);
    println!("Crop Advisor - type 'help' for commands");
    show_readings(&session);
    let outcome = session.predict_now().cloned();
    render(&session, outcome);

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    loop {
        let received = match session.pending_deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => handle(&mut session, command),
                Ok(None) => {}
                Err(msg) => println!("{}", msg),
            },
            Err(RecvTimeoutError::Timeout) => {
                if let Some(outcome) = session.poll(Instant::now()) {
                    let outcome = outcome.cloned();
                    render(&session, outcome);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                // Flush a pending change before leaving on EOF
                if session.pending_deadline().is_some() {
                    let outcome = session.predict_now().cloned();
                    render(&session, outcome);
                }
                break;
            }
        }
    }
}

fn handle(session: &mut Session<'_>, command: Command) {
    let outcome = match command {
        Command::Set { reading, value } => {
            match session.set_reading(reading, value, Instant::now()) {
                Ok(stored) if stored != value => {
                    println!("{} clamped to {}", reading.label(), stored);
                }
                Ok(_) => {}
                Err(e) => println!("{}", e),
            }
            return;
        }
        Command::Region(name) => session.select_region(&name).cloned(),
        Command::Season(name) => session.select_season(&name).cloned(),
        Command::Predict => session.predict_now().cloned(),
        Command::Reset => {
            let outcome = session.reset().cloned();
            show_readings(session);
            outcome
        }
        Command::Show => {
            show_readings(session);
            return;
        }
        Command::Help => {
            println!("{}", HELP);
            return;
        }
        Command::Quit => return,
    };
    render(session, outcome);
}

fn render(session: &Session<'_>, outcome: crop_advisor::Result<crop_advisor::PredictionResult>) {
    match outcome {
        Ok(result) => {
            println!();
            print!("{}", TextFormatter::format(&result));
        }
        Err(e) => {
            println!("Prediction error: {}", e);
            if let Some(prior) = session.result() {
                println!("(still showing {})", TextFormatter::headline(prior));
            }
        }
    }
    if let Status::Error(_) = session.status() {
        println!("Status: error");
    }
}

fn show_readings(session: &Session<'_>) {
    let snapshot = session.snapshot();
    println!("Region: {}  Season: {}", snapshot.region, snapshot.season);
    for reading in Reading::ALL {
        let range = reading.range();
        println!(
            "  {:<14} {:>7.1} {:<6} ({}-{})",
            reading.key(),
            snapshot.get(reading),
            reading.unit(),
            range.min,
            range.max
        );
    }
}
