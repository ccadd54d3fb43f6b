use std::io;

use anyhow::Result;

use school_stats::app::App;
use school_stats::config::ReportConfig;
use school_stats::data::loader;

fn main() -> Result<()> {
    env_logger::init();

    let (directory, dataset) = loader::load_builtin()?;
    let config = ReportConfig::default();
    if let Ok(json) = serde_json::to_string(&config) {
        log::debug!("Report config: {json}");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    App::new(&directory, &dataset, &config).run(&mut stdin.lock(), &mut stdout.lock())
}
