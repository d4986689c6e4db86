//! deckview - A slide presenter for the terminal

use std::io::{self, stdout};
use std::process::ExitCode;

use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use deckview::action::output_references;
use deckview::app::{build_state, exit_code, init_file_logging, print_help, run_app, Config};
use deckview::content::DeckContent;

fn main() -> ExitCode {
    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    if config.show_help {
        print_help();
        return ExitCode::from(exit_code::SUCCESS as u8);
    }
    if config.show_version {
        println!("dv {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::from(exit_code::SUCCESS as u8);
    }

    if let Some(ref path) = config.log_file {
        if let Err(e) = init_file_logging(path) {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::ERROR as u8);
        }
    }

    if let Some(ref warning) = config.config_warning {
        eprintln!("Warning: ignoring config file: {}", warning);
        tracing::warn!("ignoring config file: {}", warning);
    }

    // Handle non-interactive modes first
    if config.references_mode {
        return run_references_mode(&config);
    }

    if config.check_mode {
        return run_check_mode(&config);
    }

    match run_with_config(config) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

fn load_deck(config: &Config) -> Result<DeckContent, ExitCode> {
    let Some(ref path) = config.deck else {
        eprintln!("Error: no deck file given");
        return Err(ExitCode::from(exit_code::INVALID as u8));
    };
    DeckContent::load(path).map_err(|e| {
        eprintln!("Error: {}: {}", path.display(), e);
        ExitCode::from(exit_code::ERROR as u8)
    })
}

/// Print the reference list (non-interactive)
fn run_references_mode(config: &Config) -> ExitCode {
    let deck = match load_deck(config) {
        Ok(deck) => deck,
        Err(code) => return code,
    };
    match output_references(&deck.quotes, config.export_format, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

/// Validate the deck (non-interactive)
fn run_check_mode(config: &Config) -> ExitCode {
    let deck = match load_deck(config) {
        Ok(deck) => deck,
        Err(code) => return code,
    };
    let warnings = deck.validate();
    if warnings.is_empty() {
        println!("ok: {} slides, {} quotes", deck.total_slides(), deck.quotes.len());
        ExitCode::from(exit_code::SUCCESS as u8)
    } else {
        for field in &warnings.missing {
            println!("missing: {}", field);
        }
        ExitCode::from(exit_code::WARNINGS as u8)
    }
}

fn run_with_config(config: Config) -> anyhow::Result<i32> {
    // Fail on a bad deck before touching the terminal
    let state = build_state(&config)?;

    // Initialize terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    if config.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &config, state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        cursor::Show
    )?;

    let app_result = result?;
    tracing::info!(slide = app_result.final_slide, "presenter closed");
    Ok(app_result.exit_code)
}
