use clap::Parser;

use trojan_guard::cli::{Cli, Commands};
use trojan_guard::commands::{run_config, run_init, run_scan};
use trojan_guard::logging::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Init(args) => run_init(args, &cli),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
