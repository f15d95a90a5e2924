//! End-to-end tests for recipe execution.

use std::fs;
use std::path::Path;

use cebu_cli::recipe::{BASELINE_FILE, BIRTH_FILE, MEMBER_FILE, Recipe};
use cebu_cli::runner::run_recipe;
use cebu_ingest::IngestError;
use cebu_model::{TableError, Value};
use cebu_transform::TransformError;
use tempfile::TempDir;

const BIRTHS: &str = "basewman\tbasebrgy\tWEIGHT1\tmomweigt\tarmcircu\theightcm\tSKINFLD1\tsexchild\tgestage\n\
1\t1\t3.1\t48.5\t24.2\t150.1\t9.4\t1\t39\n\
2\t1\t2.9\t51\t25.0\t148\t10.1\t2\t40\n\
3\t2\t3.4\t\t23.9\t152.3\t8.7\t1\t38\n";

const BASELINE: &str = "basewman\tbasebrgy\tlivebrth\theightcm\turbrural\tdlvrmnth\tmarital\n\
1\t1\t2\t150.0\t1\t5\t1\n\
3\t2\t0\t152.0\t2\t7\t1\n\
4\t2\t1\t149.5\t2\t3\t2\n";

const MEMBERS: &str = "basewman\tbasebrgy\tAGEPRW1\twave\tRELNPRW1\n\
1\t1\t31\t0\t30\n\
1\t1\t4\t0\t32\n\
1\t1\t32\t1\t30\n\
3\t2\t40\t0\t30\n\
3\t2\t12\t0\t33\n";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn survey_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), BIRTH_FILE, BIRTHS);
    write(dir.path(), BASELINE_FILE, BASELINE);
    write(dir.path(), MEMBER_FILE, MEMBERS);
    dir
}

#[test]
fn birth_recipe_joins_births_and_baseline() {
    let dir = survey_dir();

    let output = run_recipe(&Recipe::birth(), dir.path()).unwrap();

    let names: Vec<&str> = output.table.column_names().collect();
    assert_eq!(
        names,
        vec![
            "basewman", "basebrgy", "WEIGHT1", "momweigt", "armcircu", "heightcm", "SKINFLD1",
            "sexchild", "livebrth"
        ]
    );
    assert_eq!(output.table.height(), 2);
    assert_eq!(output.table.value(0, "livebrth").unwrap(), Some(&Value::Integer(2)));
    assert_eq!(output.table.value(1, "basewman").unwrap(), Some(&Value::Integer(3)));
    assert_eq!(output.table.value(1, "momweigt").unwrap(), Some(&Value::Missing));

    assert_eq!(output.stages.len(), 2);
    assert_eq!(output.stages[0].rows_read, 3);
    assert_eq!(output.stages[0].columns_read, 9);
    assert_eq!(output.stages[0].rows_joined, 3);
    assert_eq!(output.stages[1].rows_joined, 2);
}

#[test]
fn household_recipe_filters_members() {
    let dir = survey_dir();

    let output = run_recipe(&Recipe::household(), dir.path()).unwrap();

    assert_eq!(output.table.height(), 2);
    assert!(!output.table.has_column("heightcm_x"));
    assert_eq!(output.table.value(0, "AGEPRW1").unwrap(), Some(&Value::Integer(31)));
    assert_eq!(output.table.value(1, "AGEPRW1").unwrap(), Some(&Value::Integer(40)));
    let members = &output.stages[2];
    assert_eq!(members.rows_read, 5);
    assert_eq!(members.rows_selected, 2);
}

#[test]
fn na_key_cell_drops_the_row_instead_of_failing() {
    let dir = survey_dir();
    write(
        dir.path(),
        BASELINE_FILE,
        "basewman\tbasebrgy\tlivebrth\n1\tn/a\t2\n3\t2\t0\n",
    );

    let output = run_recipe(&Recipe::birth(), dir.path()).unwrap();

    assert_eq!(output.table.height(), 1);
    assert_eq!(output.table.value(0, "basewman").unwrap(), Some(&Value::Integer(3)));
    assert_eq!(output.table.value(0, "livebrth").unwrap(), Some(&Value::Integer(0)));
}

#[test]
fn missing_source_file_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), BIRTH_FILE, BIRTHS);

    let err = run_recipe(&Recipe::birth(), dir.path()).unwrap_err();

    assert!(format!("{err:#}").contains("load source 'baseline'"));
    let ingest = err.downcast_ref::<IngestError>().unwrap();
    assert!(matches!(ingest, IngestError::FileNotFound { .. }));
}

#[test]
fn missing_column_names_source_and_column() {
    let dir = survey_dir();
    write(
        dir.path(),
        BASELINE_FILE,
        "basewman\tbasebrgy\tmarital\n1\t1\t1\n",
    );

    let err = run_recipe(&Recipe::birth(), dir.path()).unwrap_err();

    assert!(format!("{err:#}").contains("project source 'baseline'"));
    match err.downcast_ref::<TransformError>() {
        Some(TransformError::Table(TableError::ColumnNotFound { column, table })) => {
            assert_eq!(column, "livebrth");
            assert_eq!(table, BASELINE_FILE);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bad_wave_value_fails_loudly() {
    let dir = survey_dir();
    write(
        dir.path(),
        MEMBER_FILE,
        "basewman\tbasebrgy\tAGEPRW1\twave\tRELNPRW1\n1\t1\t31\tbaseline\t30\n",
    );

    let err = run_recipe(&Recipe::household(), dir.path()).unwrap_err();

    let ingest = err.downcast_ref::<IngestError>().unwrap();
    assert!(matches!(ingest, IngestError::TypeMismatch { .. }));
}

#[test]
fn json_recipe_file_runs() {
    let dir = survey_dir();
    let recipe_path = dir.path().join("recipe.json");
    fs::write(
        &recipe_path,
        r#"{
            "name": "weights",
            "key": ["basewman", "basebrgy"],
            "sources": [
                {"name": "births", "file": "mbirth2.tab", "columns": ["basewman", "basebrgy", "WEIGHT1"]},
                {"name": "baseline", "file": "mbase2.tab", "columns": ["basewman", "basebrgy", "urbrural"],
                 "filters": [{"column": "urbrural", "value": 2}]}
            ]
        }"#,
    )
    .unwrap();

    let recipe = Recipe::from_json_file(&recipe_path).unwrap();
    let output = run_recipe(&recipe, dir.path()).unwrap();

    assert_eq!(output.table.height(), 1);
    assert_eq!(output.table.value(0, "WEIGHT1").unwrap(), Some(&Value::Float(3.4)));
}

#[test]
fn invalid_json_recipe_is_rejected() {
    let dir = TempDir::new().unwrap();
    let recipe_path = dir.path().join("recipe.json");
    fs::write(
        &recipe_path,
        r#"{"name": "broken", "key": ["basewman"], "sources": [
            {"name": "births", "file": "mbirth2.tab", "columns": ["WEIGHT1"]}
        ]}"#,
    )
    .unwrap();

    let err = Recipe::from_json_file(&recipe_path).unwrap_err();

    assert!(format!("{err:#}").contains("does not keep key column 'basewman'"));
}
