//! CLI entry point for assembling sprite variants from pattern libraries

use clap::Parser;
use partcompose::io::cli::{Cli, Generator};

fn main() -> partcompose::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(cli.log_level)
        .init();
    log::debug!(args:? = cli; "Parsed arguments");

    let generator = Generator::new(cli)?;
    generator.run()
}
