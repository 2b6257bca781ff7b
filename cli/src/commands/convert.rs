use anyhow::Result;
use election_czml::convert;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ConvertArgs) -> Result<()> {
    let mut config = super::run_config(&args.input)?;
    if let Some(output) = &args.output { config.output = output.clone() }
    if let Some(min_area) = args.min_area { config.scene.min_fragment_area = min_area }
    if args.tpp_extrusion.is_some() { config.scene.tpp_extrusion = args.tpp_extrusion }
    config.scene.pretty |= args.pretty;

    let summary = convert(&config, cli.verbose)?;

    println!("[convert] wrote {} divisions ({} fragments) to {}",
        summary.divisions_written, summary.fragments_written, config.output.display());

    Ok(())
}
