use clap::Parser;
use perfwatch_cli::cli::LeakMonitorArgs;
use perfwatch_cli::leak_monitor;

fn main() {
    let args = LeakMonitorArgs::parse();
    perfwatch_core::tracing::init_tracing(args.verbose);

    let code = match leak_monitor::run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            2
        }
    };
    std::process::exit(code);
}
