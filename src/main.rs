use std::env;
use std::process;

use focus135::color::{self, emoji};
use focus135::config::{self, Command, Config};
use focus135::log;
use tracing::{info, warn};

mod commands;
mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = config::parse_args(args);

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("focus {}", VERSION);
        return;
    }

    if let Some(ref unknown) = cli.unknown_command {
        eprintln!(
            "{} unknown command '{}' (see focus --help)",
            color::error("error:"),
            unknown
        );
        process::exit(1);
    }

    let (config, config_problem) = Config::load(&cli);

    if let Err(e) = log::init(&config.log_file, &config.log_level, config.log_max_lines) {
        eprintln!("{} {} logging disabled: {}", emoji::WARNING, color::warning("warning:"), e);
    }
    if let Some(e) = config_problem {
        eprintln!("{} {} {}; using defaults", emoji::WARNING, color::warning("warning:"), e);
        warn!("{}; using defaults", e);
    }

    // Default command is Run if none specified
    let command = cli.command.unwrap_or(Command::Run);
    info!("focus {} {:?} (state {})", VERSION, command, config.state_file.display());

    let result = match command {
        Command::Run => commands::cmd_run(&config),
        Command::Status => commands::cmd_status(&config),
        Command::Archive => commands::cmd_archive(&config, &cli.args),
        Command::Set => commands::cmd_set(&config, &cli.args),
        Command::Toggle => commands::cmd_toggle(&config, &cli.args),
        Command::Check => commands::cmd_check(&config),
        Command::Reset => commands::cmd_reset(&config, cli.yes),
    };

    if let Err(e) = result {
        warn!("{:?} failed: {}", command, e);
        eprintln!("{} {}", color::error("error:"), e);
        process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"focus - daily 1 major / 3 medium / 5 small task board

USAGE:
    focus [OPTIONS] [COMMAND]

COMMANDS:
    run               Open the interactive board (default)
    status            Print today's board, streak and stats
    archive [N]       Print the N most recent archived days (default 10)
    set <SLOT> <TEXT> Set a slot's text (no TEXT clears it)
    toggle <SLOT>     Toggle a slot's completion flag
    check             Run the day check once and report whether it rolled over
    reset --yes       Reset today's main and overflow slots

SLOTS:
    major, medium.1-3, small.1-5
    overflow.major, overflow.medium.1-2, overflow.small.1-3
    Overflow slots open once every main slot is done.

OPTIONS:
    -h, --help              Show this help message
    -V, --version           Show version
    -c, --config <PATH>     Path to config file (default: focus.toml if present)
    --state-file <PATH>     Path to the state file
    --log-file <PATH>       Path to the log file
    --interval <SECS>       Day-check interval for the board (default: 60)
    --focus                 Start the board in focus mode
    -y, --yes               Confirm reset

ENVIRONMENT:
    FOCUS_STATE_FILE, FOCUS_LOG_FILE, FOCUS_LOG_LEVEL, FOCUS_LOG_MAX_LINES,
    FOCUS_CHECK_INTERVAL, FOCUS_FOCUS_MODE, FOCUS_LOG (log filter directive)

BOARD KEYS:
    Up/Down, k/j   Select a slot
    Enter, e       Edit (Enter saves, Esc cancels)
    Space, x       Toggle done
    f              Focus mode (major only)
    a              Archive of past days
    R              Reset today (asks first)
    q              Quit

EXAMPLES:
    focus set major "Ship the release"
    focus set small.2 -- "-5 emails"
    focus toggle medium.1
    focus archive 5
"#
    );
}
