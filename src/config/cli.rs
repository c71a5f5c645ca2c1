/// CLI arguments parsed from command line.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Subcommand to execute.
    pub command: Option<Command>,
    /// First positional word that is not a known subcommand.
    pub unknown_command: Option<String>,
    /// Positional arguments following the subcommand.
    pub args: Vec<String>,
    /// Path to config file.
    pub config: Option<String>,
    /// Path to the state file.
    pub state_file: Option<String>,
    /// Path to the log file.
    pub log_file: Option<String>,
    /// Day-check interval in seconds.
    pub interval: Option<u64>,
    /// Start the board in focus mode.
    pub focus: bool,
    /// Confirmation for destructive commands.
    pub yes: bool,
    /// Show help.
    pub help: bool,
    /// Show version.
    pub version: bool,
}

/// Focus subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive board.
    Run,
    /// Print today's board, streak and stats.
    Status,
    /// Print recent archived days.
    Archive,
    /// Set a slot's text.
    Set,
    /// Toggle a slot's completion flag.
    Toggle,
    /// Run the day check once.
    Check,
    /// Clear today's slots.
    Reset,
}

impl Command {
    /// Parse command from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "run" => Some(Self::Run),
            "status" => Some(Self::Status),
            "archive" => Some(Self::Archive),
            "set" => Some(Self::Set),
            "toggle" => Some(Self::Toggle),
            "check" => Some(Self::Check),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();
    let mut positional_only = false;

    // Skip program name
    args.next();

    while let Some(arg) = args.next() {
        if positional_only {
            push_positional(&mut cli, arg);
            continue;
        }

        match arg.as_str() {
            "--" => positional_only = true,
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-c" | "--config" => cli.config = args.next(),
            "--state-file" => cli.state_file = args.next(),
            "--log-file" => cli.log_file = args.next(),
            "--interval" => cli.interval = args.next().and_then(|s| s.parse().ok()),
            "--focus" => cli.focus = true,
            "-y" | "--yes" => cli.yes = true,
            _ if !arg.starts_with('-') || arg == "-" => push_positional(&mut cli, arg),
            _ => {} // Ignore unknown flags
        }
    }

    cli
}

fn push_positional(cli: &mut CliArgs, arg: String) {
    if cli.command.is_none() && cli.unknown_command.is_none() {
        match Command::from_str(&arg) {
            Some(command) => cli.command = Some(command),
            None => cli.unknown_command = Some(arg),
        }
    } else {
        cli.args.push(arg);
    }
}
