use anyhow::Result;
use election_czml::list_parties;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::InputArgs) -> Result<()> {
    let config = super::run_config(args)?;

    for (party, color) in list_parties(&config, cli.verbose)? {
        println!("{party}\t{color}");
    }

    Ok(())
}
