//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. Global options may appear before
//! or after the command; anything unrecognized yields a usage error.

/// A subcommand together with its own arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy the running binary to ~/.local/bin
    Install,
    /// Remove the installed binary
    Uninstall,
    /// Create or remove the autostart entry
    Autostart { enabled: bool },
    /// Run the poll loop in the foreground
    Run,
    /// Run the poll loop in the background
    Start,
    /// Terminate the background instance
    Stop,
    /// Stop then start
    Restart,
    /// Ask the running instance to re-apply now
    Reload,
    /// Report the current mode and instance state
    Status { json: bool },
    /// Interactive configuration
    Configure,
    /// Detailed help, optionally for one command
    Help { topic: Option<String> },
}

impl Command {
    /// Every command name, in help order.
    pub const NAMES: [&'static str; 11] = [
        "install",
        "uninstall",
        "autostart",
        "run",
        "start",
        "stop",
        "restart",
        "reload",
        "status",
        "configure",
        "help",
    ];
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Execute a subcommand with the global options
    Command {
        command: Command,
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to missing or unknown arguments and exit with failure
    ShowHelpDueToError,
    /// Show one command's usage after invalid arguments and exit with failure
    ShowCommandUsageDueToError { command: String, error: String },
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args()),
    ///   including the program name
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParsedArgs {
            action: parse_action(args),
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_action<I, S>(args: I) -> CliAction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args_vec: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|s| s.as_ref().to_string())
        .collect();

    if args_vec.is_empty() {
        return CliAction::ShowHelpDueToError;
    }

    let mut debug_enabled = false;
    let mut display_help = false;
    let mut display_version = false;
    let mut json = false;
    let mut config_dir: Option<String> = None;
    let mut positionals: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args_vec.len() {
        let arg = &args_vec[i];
        match arg.as_str() {
            "--help" | "-h" => display_help = true,
            "--version" | "-V" => display_version = true,
            "--debug" | "-d" => debug_enabled = true,
            "--json" => json = true,
            "--config" | "-c" => {
                // Parse: --config <directory>
                match args_vec.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        config_dir = Some(dir.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        return CliAction::ShowHelpDueToError;
                    }
                }
            }
            _ if arg.starts_with("--config=") => {
                let dir = &arg["--config=".len()..];
                if dir.is_empty() {
                    log_warning!("Missing directory for --config. Usage: --config <directory>");
                    return CliAction::ShowHelpDueToError;
                }
                config_dir = Some(dir.to_string());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                log_warning!("Unknown option: {}", arg);
                return CliAction::ShowHelpDueToError;
            }
            _ => positionals.push(arg.clone()),
        }
        i += 1;
    }

    // Version takes precedence over everything else
    if display_version {
        return CliAction::ShowVersion;
    }

    let Some((name, rest)) = positionals.split_first() else {
        return if display_help {
            CliAction::ShowHelp
        } else {
            CliAction::ShowHelpDueToError
        };
    };

    if !Command::NAMES.contains(&name.as_str()) {
        log_warning!("Unknown command: {}", name);
        return CliAction::ShowHelpDueToError;
    }

    // `autotheme <command> --help` shows that command's help
    if display_help {
        return CliAction::Command {
            command: Command::Help {
                topic: Some(name.clone()),
            },
            debug_enabled,
            config_dir,
        };
    }

    let usage_error = |error: &str| CliAction::ShowCommandUsageDueToError {
        command: name.clone(),
        error: error.to_string(),
    };

    if json && name != "status" {
        return usage_error("--json is only valid for 'status'");
    }

    let command = match (name.as_str(), rest) {
        ("autostart", [state]) => match state.as_str() {
            "on" => Command::Autostart { enabled: true },
            "off" => Command::Autostart { enabled: false },
            other => return usage_error(&format!("Expected 'on' or 'off', got '{other}'")),
        },
        ("autostart", []) => return usage_error("Missing argument: on or off"),
        ("help", []) => Command::Help { topic: None },
        ("help", [topic]) => Command::Help {
            topic: Some(topic.clone()),
        },
        (_, [_, ..]) => {
            return usage_error(&format!("Unexpected argument: '{}'", rest.join(" ")));
        }
        ("install", []) => Command::Install,
        ("uninstall", []) => Command::Uninstall,
        ("run", []) => Command::Run,
        ("start", []) => Command::Start,
        ("stop", []) => Command::Stop,
        ("restart", []) => Command::Restart,
        ("reload", []) => Command::Reload,
        ("status", []) => Command::Status { json },
        ("configure", []) => Command::Configure,
        _ => return CliAction::ShowHelpDueToError,
    };

    CliAction::Command {
        command,
        debug_enabled,
        config_dir,
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("autotheme [OPTIONS] <COMMAND>");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("install                Install to ~/.local/bin/autotheme");
    log_indented!("uninstall              Remove ~/.local/bin/autotheme");
    log_indented!("autostart on|off       Enable or disable starting at login");
    log_indented!("run                    Run in the foreground");
    log_indented!("start                  Start in the background");
    log_indented!("stop                   Stop the background instance");
    log_indented!("restart                Restart the background instance");
    log_indented!("reload                 Re-read configuration and re-apply now");
    log_indented!("status [--json]        Show current mode and instance state");
    log_indented!("configure              Interactively edit the configuration");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_end!();
}
