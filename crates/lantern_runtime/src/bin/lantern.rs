//! Lantern CLI entry point.

use std::env;
use std::io;
use std::process::ExitCode;

use lantern_runtime::{Repl, Session, SessionConfig, logging, run_batch};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    no_banner: bool,
    trace: bool,
    history_size: Option<usize>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--no-banner" => config.no_banner = true,
            "--trace" => config.trace = true,
            "--history" => {
                let value = args.next().ok_or("--history requires a value")?;
                config.history_size = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --history value: {value}"))?,
                );
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("lantern {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(config.trace)?;

    let mut session_config = SessionConfig::default().with_banner(!config.no_banner);
    if let Some(size) = config.history_size {
        session_config = session_config.with_history_size(size);
    }

    if config.batch_mode {
        let mut session = Session::demo(session_config)?;
        run_batch(&mut session, io::stdin().lock(), io::stdout().lock())?;
        return Ok(());
    }

    let mut repl = Repl::new(session_config)?;
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mLantern\x1b[0m - Interactive fiction command engine

\x1b[1mUSAGE:\x1b[0m
    lantern [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Read commands from stdin and print a transcript
    --no-banner        Skip the welcome banner
    --history N        Number of undo steps to keep (default 100)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace            Log parsing and dispatch decisions to stderr
                       (otherwise filtered by LANTERN_LOG, default warn)

\x1b[1mEXAMPLES:\x1b[0m
    lantern                          Play the demo interactively
    echo 'take sword' | lantern -b   Run one command and exit
    lantern --trace                  Play with dispatch tracing

\x1b[1mIN-GAME COMMANDS:\x1b[0m
    undo                 Revert the last turn that changed the world
    reload               Rebuild behavior modules and clear cached behaviors
    quit                 Exit
    Ctrl+D               Exit
    Ctrl+C               Cancel current input"
    );
}
