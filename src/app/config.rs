//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::config_file::ConfigFile;
use crate::action::ExportFormat;
use crate::core::{DeckSettings, EdgePolicy};
use crate::render::RenderOptions;

/// Environment variable overriding `navigation.edge_policy`
pub const POLICY_ENV: &str = "DECKVIEW_POLICY";
/// Environment variable naming the log file
pub const LOG_ENV: &str = "DECKVIEW_LOG";

/// Application configuration from CLI args and config file
#[derive(Debug)]
pub struct Config {
    /// Deck file to present
    pub deck: Option<PathBuf>,
    /// Location fragment to start on (`--slide`)
    pub start_fragment: Option<String>,
    /// File mirroring the current location fragment
    pub location_file: Option<PathBuf>,
    /// Print the reference list and exit
    pub references_mode: bool,
    /// Output format for `--references`
    pub export_format: ExportFormat,
    /// Validate the deck and exit
    pub check_mode: bool,
    /// Write tracing output here
    pub log_file: Option<PathBuf>,
    /// Enable mouse support (config file, `--no-mouse`)
    pub mouse_enabled: bool,
    /// Minimum drag distance for a swipe (from config file)
    pub swipe_min_distance: u16,
    /// Timing, policy and surface settings
    pub settings: DeckSettings,
    /// Progress bar and dot switches (from config file)
    pub render: RenderOptions,
    pub show_help: bool,
    pub show_version: bool,
    /// Why config.toml was ignored, reported once logging is ready
    pub config_warning: Option<String>,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        // Load config file first (provides defaults)
        let (config_file, file_error) = ConfigFile::load();
        let env_policy = env::var(POLICY_ENV).ok();
        let env_log = env::var(LOG_ENV).ok();
        let mut config = Self::parse(
            env::args().skip(1),
            &config_file,
            env_policy.as_deref(),
            env_log.as_deref(),
        )?;
        config.config_warning = file_error.map(|e| e.to_string());
        Ok(config)
    }

    /// Parse `args` over the config file and environment overrides
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        config_file: &ConfigFile,
        env_policy: Option<&str>,
        env_log: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let mut deck: Option<PathBuf> = None;
        let mut start_fragment: Option<String> = None;
        let mut location_file: Option<PathBuf> = None;
        let mut references_mode = false;
        let mut export_format = ExportFormat::default();
        let mut check_mode = false;
        let mut log_file: Option<PathBuf> = env_log.filter(|s| !s.is_empty()).map(PathBuf::from);
        let mut mouse_enabled = config_file.general.mouse_enabled;
        let mut policy: Option<EdgePolicy> = None;
        let mut show_help = false;
        let mut show_version = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--slide" | "-s" => {
                    if let Some(fragment) = args.next() {
                        start_fragment = Some(fragment);
                    } else {
                        anyhow::bail!("--slide requires a location fragment (e.g. #slide-3)");
                    }
                }
                "--location" => {
                    if let Some(file) = args.next() {
                        location_file = Some(PathBuf::from(file));
                    } else {
                        anyhow::bail!("--location requires a file path");
                    }
                }
                "--policy" => {
                    if let Some(value) = args.next() {
                        policy = Some(parse_policy(&value)?);
                    } else {
                        anyhow::bail!("--policy requires a value (clamp or wrap)");
                    }
                }
                "--references" | "-r" => references_mode = true,
                "--format" | "-f" => {
                    if let Some(fmt) = args.next() {
                        export_format = ExportFormat::from_str(&fmt).map_err(|_| {
                            anyhow::anyhow!("Invalid format '{}'. Valid formats: lines, json", fmt)
                        })?;
                    } else {
                        anyhow::bail!("--format requires a value (lines or json)");
                    }
                }
                "--check" => check_mode = true,
                "--log-file" => {
                    if let Some(file) = args.next() {
                        log_file = Some(PathBuf::from(file));
                    } else {
                        anyhow::bail!("--log-file requires a file path");
                    }
                }
                "--no-mouse" => mouse_enabled = false,
                "--help" | "-h" => show_help = true,
                "--version" | "-V" => show_version = true,
                path if !path.starts_with('-') => {
                    if deck.is_some() {
                        anyhow::bail!("Only one deck file can be given (extra: {})", path);
                    }
                    deck = Some(PathBuf::from(path));
                }
                unknown => {
                    anyhow::bail!(
                        "Unknown option: {}. Use --help for usage information.",
                        unknown
                    );
                }
            }
        }

        if deck.is_none() && !show_help && !show_version {
            anyhow::bail!("No deck file given. Use --help for usage information.");
        }

        // CLI > environment > config file
        let policy = match (policy, env_policy) {
            (Some(p), _) => p,
            (None, Some(value)) => parse_policy(value)
                .map_err(|e| anyhow::anyhow!("{} (from {})", e, POLICY_ENV))?,
            (None, None) => config_file.navigation.edge_policy,
        };

        let mut settings = config_file.deck_settings();
        settings.policy = policy;

        Ok(Self {
            deck,
            start_fragment,
            location_file,
            references_mode,
            export_format,
            check_mode,
            log_file,
            mouse_enabled,
            swipe_min_distance: config_file.navigation.swipe_min_distance,
            settings,
            render: RenderOptions {
                show_progress_dots: config_file.ui.show_progress_dots,
                show_progress_bar: config_file.ui.show_progress_bar,
            },
            show_help,
            show_version,
            config_warning: None,
        })
    }
}

fn parse_policy(value: &str) -> anyhow::Result<EdgePolicy> {
    EdgePolicy::from_str(value)
        .map_err(|_| anyhow::anyhow!("Invalid policy '{}'. Valid policies: clamp, wrap", value))
}

pub fn print_help() {
    println!(
        r#"dv - deckview: a terminal slide presenter

USAGE:
    dv [OPTIONS] DECK

OPTIONS:
    -s, --slide FRAG    Start on a location fragment (#slide-N, 0-based)
    --location FILE     Mirror the current fragment to FILE; edits to FILE navigate
    --policy POLICY     Next on the last slide: clamp (stay) or wrap (restart)
    -r, --references    Print the reference list and exit
    -f, --format FMT    Output format for --references: lines, json
    --check             Report missing deck fields and exit
    --log-file FILE     Write log output to FILE
    --no-mouse          Disable mouse controls and drag gestures
    -h, --help          Show this help message
    -V, --version       Show version

CONFIG FILE:
    ~/.config/deckview/config.toml    Main configuration file
    ~/.config/deckview/keymap.toml    Key bindings (customizable)

ENVIRONMENT:
    DECKVIEW_POLICY     Edge policy override: clamp, wrap
    DECKVIEW_LOG        Log file path (same as --log-file)
    RUST_LOG            Log filter (default: deckview=info,dv=info)

KEYBINDINGS:
    ←/↑         Previous slide
    →/↓/Space   Next slide
    Home        First slide
    End         Last slide
    1-9         Toggle chip N on the current slide
    Esc         Collapse expanded chips
    x           Close quote tooltip
    c           Copy references to clipboard
    ?           Show help
    q/Ctrl+C    Quit

MOUSE:
    Drag left/right     Next / previous slide
    Click               Buttons, progress dots, chips, [×]

EXIT CODES:
    0           Success
    1           --check found missing deck fields
    2           Error (runtime error)
    3           Invalid arguments (unknown option or invalid value)
"#
    );
}
