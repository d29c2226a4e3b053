use clap::Parser;
use env_logger::Env;
use log::{error, info};

use cbddlp_texturizer::cli::Cli;
use cbddlp_texturizer::patcher::texturize_file;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match texturize_file(&cli.input, &cli.stencil, cli.layers) {
        Ok(output) => info!("wrote \"{}\"", output.display()),
        Err(err) => {
            error!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
