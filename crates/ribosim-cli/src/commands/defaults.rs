use crate::cli::DefaultsArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use tracing::info;

pub fn run(args: DefaultsArgs) -> Result<()> {
    let rendered = PartialRunConfig::from_defaults().to_toml_string()?;

    match &args.output {
        Some(path) => {
            info!("Writing default configuration to {:?}", path);
            std::fs::write(path, rendered)?;
            eprintln!("Default configuration written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
