//! Executes a [`Recipe`]: load every source, project and filter each, then
//! join them left to right on the recipe key.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use cebu_ingest::{LoadOptions, load_table};
use cebu_model::Table;
use cebu_transform::{filter_equals, join_on, project};
use tracing::{debug, info, info_span};

use crate::recipe::{Recipe, SourceSpec};

/// Row counts for one source as it moves through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub source: String,
    pub file: PathBuf,
    pub rows_read: usize,
    pub columns_read: usize,
    /// Rows left after the source's filters.
    pub rows_selected: usize,
    /// Rows in the running join once this source has been merged.
    pub rows_joined: usize,
}

#[derive(Debug)]
pub struct RunOutput {
    pub table: Table,
    pub stages: Vec<StageSummary>,
}

struct PreparedSource {
    table: Table,
    summary: StageSummary,
}

/// Loads, projects and filters every source, then joins them left to right.
///
/// All sources are prepared before the first join, so a bad file or column
/// fails the run early. The join is the same fold as
/// [`cebu_transform::join_all`], written out so each stage records its row
/// count.
pub fn run_recipe(recipe: &Recipe, data_dir: &Path) -> Result<RunOutput> {
    recipe.validate()?;
    let span = info_span!("recipe", recipe = %recipe.name);
    let _guard = span.enter();
    let start = Instant::now();

    let mut prepared = Vec::with_capacity(recipe.sources.len());
    for source in &recipe.sources {
        prepared.push(prepare_source(recipe, source, data_dir)?);
    }

    let key: Vec<&str> = recipe.key.iter().map(String::as_str).collect();
    let mut stages = Vec::with_capacity(prepared.len());
    let mut joined: Option<Table> = None;
    for PreparedSource { table, mut summary } in prepared {
        let next = match joined.take() {
            None => table,
            Some(acc) => join_on(&acc, &table, key.as_slice())
                .with_context(|| format!("join source '{}'", summary.source))?,
        };
        summary.rows_joined = next.height();
        stages.push(summary);
        joined = Some(next);
    }
    let table = joined.ok_or_else(|| anyhow!("recipe '{}' has no sources", recipe.name))?;

    info!(
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(RunOutput { table, stages })
}

fn prepare_source(recipe: &Recipe, source: &SourceSpec, data_dir: &Path) -> Result<PreparedSource> {
    let span = info_span!("source", source = %source.name);
    let _guard = span.enter();
    let path = data_dir.join(&source.file);
    let options = LoadOptions::default()
        .with_delimiter(recipe.delimiter.as_byte())
        .with_column_types(source.column_types.clone());

    let loaded = load_table(&path, &options)
        .with_context(|| format!("load source '{}'", source.name))?;
    let mut table = project(&loaded, source.columns.as_slice())
        .with_context(|| format!("project source '{}'", source.name))?;
    for filter in &source.filters {
        table = filter_equals(&table, &filter.column, &filter.value.to_value())
            .with_context(|| format!("filter source '{}' on {}", source.name, filter.column))?;
    }
    debug!(
        path = %path.display(),
        rows_read = loaded.height(),
        rows_selected = table.height(),
        "prepared source"
    );

    let summary = StageSummary {
        source: source.name.clone(),
        file: path,
        rows_read: loaded.height(),
        columns_read: loaded.width(),
        rows_selected: table.height(),
        rows_joined: 0,
    };
    Ok(PreparedSource { table, summary })
}
