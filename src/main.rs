use clap::Parser;
use colored::*;
use crossbeam_channel::Receiver;
use docseek::cli::{Cli, Commands};
use docseek::config::Config;
use docseek::error::{DocseekError, Result as DocseekResult};
use docseek::open::open_with_default_handler;
use docseek::progress::{ChannelReporter, SearchEvent};
use docseek::search::{SearchController, SearchResult};
use env_logger::{Builder, Env, Target};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

type CliController = Arc<SearchController<ChannelReporter>>;

fn main() -> DocseekResult<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    match &cli.command {
        Commands::Search { term, path } => {
            let (controller, events) = build_controller(path.clone());
            install_stop_handler(&controller)?;

            println!("{} '{}'", "Searching for".green(), term);
            controller.start(term)?;
            watch_session(&events);
            controller.join();
        }
        Commands::Interactive { path } => {
            let (controller, events) = build_controller(path.clone());
            install_stop_handler(&controller)?;
            run_interactive(&controller, &events)?;
        }
        Commands::Open { path } => {
            open_with_default_handler(path)?;
            println!("{} {}", "Opened".green(), path.display());
        }
    }

    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn build_controller(path: Option<PathBuf>) -> (CliController, Receiver<SearchEvent>) {
    let mut config = Config::default();
    if let Ok(loaded) = Config::load() {
        config = loaded;
    }
    let root = path
        .or(config.search.root)
        .unwrap_or_else(|| PathBuf::from("."));

    let (reporter, events) = ChannelReporter::new();
    (Arc::new(SearchController::new(root, reporter)), events)
}

fn install_stop_handler(controller: &CliController) -> DocseekResult<()> {
    let controller = Arc::clone(controller);
    ctrlc::set_handler(move || controller.stop())
        .map_err(|e| DocseekError::Other(e.to_string()))
}

/// Drains events for one session: progress onto the bar, then the final
/// result listing.
fn watch_session(events: &Receiver<SearchEvent>) {
    let pb = ProgressBar::new(100).with_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}% {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    for event in events.iter() {
        match event {
            SearchEvent::Progress {
                percent,
                results_so_far,
            } => {
                pb.set_position(percent as u64);
                pb.set_message(format!("Results: {results_so_far}"));
            }
            SearchEvent::Completed {
                result,
                was_stopped,
            } => {
                pb.finish_and_clear();
                print_result(&result, was_stopped);
                break;
            }
        }
    }
}

fn print_result(result: &SearchResult, was_stopped: bool) {
    let status = if was_stopped {
        "Search stopped".yellow().bold()
    } else {
        "Search completed".green().bold()
    };
    println!("\n{status}");

    println!("\n{}", "File name matches:".bold());
    if result.file_matches.is_empty() {
        println!("  {}", "No file name matches found".dimmed());
    } else {
        for path in &result.file_matches {
            println!("  {}", path.display());
        }
    }

    println!("\n{}", "Content matches:".bold());
    if result.content_matches.is_empty() {
        println!("  {}", "No content matches found".dimmed());
    } else {
        for m in &result.content_matches {
            println!("  {} - {}", m.description, m.path.display());
        }
    }

    println!("\n{} {}", "Results:".bold(), result.total());
}

fn run_interactive(
    controller: &CliController,
    events: &Receiver<SearchEvent>,
) -> DocseekResult<()> {
    println!(
        "{}",
        "Interactive search: empty input quits, Ctrl-C stops a running search".dimmed()
    );

    loop {
        let term: String = dialoguer::Input::new()
            .with_prompt("Search term")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| DocseekError::Other(e.to_string()))?;
        if term.is_empty() {
            break;
        }

        match controller.start(&term) {
            Ok(()) => watch_session(events),
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> DocseekResult<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.exists() {
                fs::create_dir_all(parent_dir).map_err(DocseekError::Io)?;
            }
        }
        let log_file = fs::File::create(log_path).map_err(DocseekError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| DocseekError::Other(e.to_string()))?;
    Ok(())
}
