use log::info;
use telemetry_dbconfig::{build_config, Options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let options = Options::from_env()?;
    let config = build_config(&options)?;
    info!(
        "Persistence backend: {} (scripts -> {:?}, events -> {:?})",
        config.backend(),
        config.script_target(),
        config.event_target()
    );

    println!("{}", config.to_json()?);

    Ok(())
}
