//! polyq - query and transform polygon scenes from the command line
//!
//! Usage:
//!   polyq info <scene>                       Summarize a polygon
//!   polyq closest <scene> --at x,y           Nearest vertex (or edge with --line)
//!   polyq segment <scene> --at x,y           Edge containing a position
//!   polyq near <scene> --at x,y              Vertex/centroid inside a tolerance box
//!   polyq transform <scene> [ops]            Move/rotate and print the result
//!
//! Set `RUST_LOG=debug` to see what the geometry core is doing.

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

mod cli;

use cli::{CliError, cmd_closest, cmd_info, cmd_near, cmd_segment, cmd_transform};

/// Logs go to stderr so stdout stays parseable with `--json`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let result: Result<(), CliError> = match args[1].as_str() {
        "info" => cmd_info(&args[2..]),
        "closest" => cmd_closest(&args[2..]),
        "segment" => cmd_segment(&args[2..]),
        "near" => cmd_near(&args[2..]),
        "transform" => cmd_transform(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(&args[0]);
            return;
        }
        other => Err(CliError::Usage(format!("Unknown command: {}", other))),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        if matches!(e, CliError::Usage(_)) {
            eprintln!("Run '{} help' for usage.", args[0]);
        }
        process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("polyq - polygon geometry queries and transforms");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} info <scene> [options]", prog);
    eprintln!("  {} closest <scene> --at x,y [-n] [-l] [-x i,j,...]", prog);
    eprintln!("  {} segment <scene> --at x,y [-t tolerance]", prog);
    eprintln!("  {} near <scene> --at x,y [-t tx,ty]", prog);
    eprintln!("  {} transform <scene> [transform options]", prog);
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --json                 Output JSON instead of text");
    eprintln!("  -f, --format <fmt>     Output format: text, json (default: text)");
    eprintln!("  --in <unit>            Unit of command-line positions: world, pixels, percentage");
    eprintln!("  --pixels-per-unit <n>  Override the scene's world scale");
    eprintln!("  --reference <WxH>      Override the scene's percentage reference size");
    eprintln!();
    eprintln!("Closest options:");
    eprintln!("  -n, --neighbor         Return the closer neighbour of the nearest vertex");
    eprintln!("  -l, --line             Return the nearest edge instead");
    eprintln!("  -x, --exclude <list>   Vertex indices to skip");
    eprintln!();
    eprintln!("Transform options (applied in this order):");
    eprintln!("  -u, --unit <unit>      Convert the polygon to a new working unit");
    eprintln!("  -m, --move <dx,dy>     Translate every vertex");
    eprintln!("  --set-position <x,y>   Move vertex 0 only");
    eprintln!("  -r, --rotate <deg>     Rotate clockwise (on screen) by deg");
    eprintln!("  --set-rotation <deg>   Rotate so the cumulative angle is deg");
    eprintln!("  --origin <x,y>         Rotation pivot (default: centroid)");
    eprintln!("  --centroid <x,y>       Translate so the centroid lands at x,y");
    eprintln!();
    eprintln!("Stdin support:");
    eprintln!("  Use '-' as the scene to read YAML/JSON from stdin:");
    eprintln!("  echo 'points: [[0,0],[4,0],[4,4]]' | {} info -", prog);
}
