//! `gha`: run githubactions scripts from a workflow step.

use gha_cli::commands::{check_file, run_file, RunOptions, EXIT_OK, EXIT_USAGE};
use gha_cli::init_tracing;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(EXIT_USAGE);
    }

    let command = &args[1];
    let code = match command.as_str() {
        "run" => match RunOptions::parse(&args[2..]) {
            Ok((path, options)) => run_file(&path, &options),
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("Usage: gha run <script> [--module=<name>]");
                EXIT_USAGE
            }
        },
        "check" => {
            if args.len() != 3 {
                eprintln!("Usage: gha check <script>");
                std::process::exit(EXIT_USAGE);
            }
            check_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            EXIT_OK
        }
        "version" | "--version" | "-V" => {
            println!("gha {}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            EXIT_USAGE
        }
    };
    std::process::exit(code);
}

// Usage goes to stderr: stdout is reserved for workflow commands.
fn print_usage() {
    eprintln!("gha: GitHub Actions scripting");
    eprintln!();
    eprintln!("Usage: gha <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <script>        Run a script with the githubactions module");
    eprintln!("  check <script>      Parse a script without running it");
    eprintln!("  help                Show this help message");
    eprintln!("  version             Show version information");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --module=<name>     Bind the module under another name");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GHA_LOG, RUST_LOG   Log filter for diagnostics on stderr");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  gha run .github/scripts/check_pr.star");
    eprintln!("  GHA_LOG=gha_actions=debug gha run check_pr.star");
    eprintln!("  gha check check_pr.star");
}
