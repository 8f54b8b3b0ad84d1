//! Writes `data.js` for the documents in `DOCS_PDF`

use chrono::Local;
use docmanifest::DocScanner;
use docmanifest::Error;
use docmanifest::ManifestConfig;
use env_logger::Env;
use log::error;

fn run() -> Result<(), Error> {
    let config = ManifestConfig::default();
    let scanner = DocScanner::new(config)?;
    if scanner.ensure_source_dir()? {
        println!(
            "Directory {} not found. Creating it...",
            scanner.config().source_dir.display()
        );
    }
    let report = scanner.scan(&Local)?;
    println!(
        "Successfully scanned {} documents into {}",
        report.documents,
        report.output.display()
    );
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    run().inspect_err(|e| error!("Scan failed: {e}"))
}
