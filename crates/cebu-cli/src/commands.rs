use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::info_span;

use cebu_cli::recipe::{Delimiter, Recipe, builtin_recipes};
use cebu_cli::runner::run_recipe;
use cebu_transform::write_delimited;

use crate::cli::RunArgs;
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_recipes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Recipe", "Source", "File", "Columns", "Filters"]);
    apply_table_style(&mut table);
    for recipe in builtin_recipes() {
        for (idx, source) in recipe.sources.iter().enumerate() {
            let filters = source
                .filters
                .iter()
                .map(|f| format!("{} = {}", f.column, f.value.to_value()))
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![
                if idx == 0 { recipe.name.clone() } else { String::new() },
                source.name.clone(),
                source.file.display().to_string(),
                source.columns.join(", "),
                if filters.is_empty() { "-".to_string() } else { filters },
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let recipe = match &args.recipe_file {
        Some(path) => Recipe::from_json_file(path)?,
        None => Recipe::builtin(args.recipe.name())
            .ok_or_else(|| anyhow!("unknown recipe: {}", args.recipe.name()))?,
    };
    let span = info_span!("run", recipe = %recipe.name, data_dir = %args.data_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let output = run_recipe(&recipe, &args.data_dir)?;

    if let Some(path) = &args.output {
        let delimiter = Delimiter::from(args.output_delimiter);
        write_delimited(&output.table, path, delimiter.as_byte())
            .with_context(|| format!("write output: {}", path.display()))?;
    }

    Ok(RunResult {
        recipe: recipe.name,
        data_dir: args.data_dir.clone(),
        output: args.output.clone(),
        stages: output.stages,
        table: output.table,
        duration: start.elapsed(),
    })
}
