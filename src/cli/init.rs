use pocket::config::{save_config, Config};
use pocket::error::Result;

pub fn run(config: &Config) -> Result<()> {
    save_config(config)?;
    let pocket = super::open(config)?;
    std::fs::create_dir_all(config.backups_dir())?;

    let store = pocket
        .store_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!("Initialized pocket at {}", config.data_path().display());
    println!("Store: {store}");
    Ok(())
}
