use std::path::PathBuf;
use std::time::Duration;

use cebu_cli::runner::StageSummary;
use cebu_model::Table;

#[derive(Debug)]
pub struct RunResult {
    pub recipe: String,
    pub data_dir: PathBuf,
    pub output: Option<PathBuf>,
    pub stages: Vec<StageSummary>,
    pub table: Table,
    pub duration: Duration,
}
