use pocket::config::Config;
use pocket::db::{count_records, get_connection};
use pocket::error::Result;
use pocket::fmt::format_bytes;

pub fn run(config: &Config) -> Result<()> {
    let store_path = config.store_path();

    println!("Data dir:   {}", config.data_path().display());
    println!("Store:      {}", store_path.display());

    if !store_path.exists() {
        println!();
        println!("Store not found. Run `pocket init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&store_path)?.len();
    println!("Store size: {}", format_bytes(size));
    let keys = count_records(&get_connection(&store_path)?)?;

    let pocket = super::open(config)?;
    println!();
    println!("Keys:          {keys}");
    println!("Transactions:  {}", pocket.list_transactions().len());
    println!("Backups:       {}", pocket.list_backups().len());
    println!("Currency:      {}", pocket.currency());
    println!("Logged in:     {}", if pocket.logged_in() { "yes" } else { "no" });
    Ok(())
}
