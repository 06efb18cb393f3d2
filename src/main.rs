use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use dirsize::{commands::Cli, report, settings, table::create_summary_table};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = settings::get_config()
        .wrap_err("Could not load configuration")?
        .apply_cli(&cli);

    let reports = report::run(&settings)?;

    if cli.table && !reports.is_empty() {
        println!("\n{}", create_summary_table(&reports, settings.binary));
    }

    Ok(())
}
