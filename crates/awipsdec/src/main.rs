use clap::Parser;
use log::LevelFilter;

use awips::DecoderBuilder;

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match awipsdec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn awipsdec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // create the decoder
    let mut builder = DecoderBuilder::new();
    if let Some(received) = args.received {
        builder.with_received_time(received);
    }
    let decoder = builder.build();

    app::run(&args, &decoder)?;
    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("awips", log_filter)
            .filter_module("awipsdec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}
