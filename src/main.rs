use anyhow::Result;
use clap::Parser;

use mnemonic_sss::cli::{Cli, Commands};
use mnemonic_sss::commands;
use mnemonic_sss::domain::SplitConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut writer = std::io::stdout();

    match cli.command {
        Commands::Split {
            quorum,
            total,
            word,
            mode,
        } => {
            let config = SplitConfig::new(quorum, total)?;
            commands::split(&mut reader, &mut writer, config, mode.into(), word.into())?;
        }
        Commands::Recover { quorum, word, mode } => {
            commands::recover(&mut reader, &mut writer, quorum, mode.into(), word.into())?;
        }
        Commands::Generate => {
            commands::generate()?;
        }
    }

    Ok(())
}
