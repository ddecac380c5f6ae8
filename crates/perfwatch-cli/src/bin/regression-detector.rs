use clap::Parser;
use perfwatch_cli::cli::RegressionDetectorArgs;
use perfwatch_cli::regression_detector;

fn main() {
    let args = RegressionDetectorArgs::parse();
    perfwatch_core::tracing::init_tracing(args.verbose);

    let code = match regression_detector::run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            2
        }
    };
    std::process::exit(code);
}
