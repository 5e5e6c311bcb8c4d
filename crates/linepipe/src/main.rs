use clap::Parser;

use linepipe::cli::Cli;
use linepipe::pipeline;
use linepipe::roles::Role;
use linepipe::shutdown;
use linepipe::telemetry;

fn main() {
    let _cli = Cli::parse();
    telemetry::init_tracing("warn");

    // An error surfacing here was detected before or during setup in the
    // capture process; role-loop errors escalate inside the role's own
    // process and never return.
    if let Err(err) = pipeline::run() {
        shutdown::escalate(Role::Capture, err);
    }
}
