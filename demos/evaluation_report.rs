//! Print the flattened evaluation tables for one `(task, subset)` slice,
//! with display titles when the metadata CSV is present.
//!
//! ```text
//! cargo run --example evaluation_report -- --root <dataset-root> --task 1 --subset rumsey
//! ```

use std::error::Error;

use maptext_analysis::constants::titles::DEFAULT_MAX_LEN;
use maptext_analysis::{DataLayout, DatasetCatalog, Subset, TaskId, shorten_title};

fn main() -> Result<(), Box<dyn Error>> {
    let raw_args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut root = ".".to_string();
    let mut task_index = 1u8;
    let mut subset_name = "rumsey".to_string();

    let mut idx = 0usize;
    while idx < raw_args.len() {
        match raw_args[idx].as_str() {
            "--root" => {
                let Some(value) = raw_args.get(idx + 1) else {
                    return Err("--root requires a directory path".into());
                };
                root = value.clone();
                idx += 2;
            }
            "--task" => {
                let Some(value) = raw_args.get(idx + 1) else {
                    return Err("--task requires a task id (1-4)".into());
                };
                task_index = value.parse()?;
                idx += 2;
            }
            "--subset" => {
                let Some(value) = raw_args.get(idx + 1) else {
                    return Err("--subset requires a subset name".into());
                };
                subset_name = value.clone();
                idx += 2;
            }
            other => {
                return Err(format!("unsupported argument '{other}'").into());
            }
        }
    }

    let task = TaskId::new(task_index)?;
    let subset = Subset::from_name(&subset_name)?;
    let catalog = DatasetCatalog::new(DataLayout::new(&root));

    println!("== evaluation_report: task {task}, subset {subset} ==");
    let tables = catalog.evaluation_tables(task, subset)?;
    let columns = tables.metric_columns();
    println!("submissions: {}", tables.global.len());
    println!("image rows:  {}", tables.images.len());

    for row in &tables.global {
        let title = catalog
            .submission_title(&row.key.submission_id)
            .and_then(|title| shorten_title(&title, DEFAULT_MAX_LEN))
            .unwrap_or_else(|_| row.key.submission_id.clone());
        let cells = columns
            .iter()
            .map(|column| match row.metrics.value(column) {
                Some(value) => format!("{column}={value:.3}"),
                None => format!("{column}=-"),
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:<30} {}", title, cells);
    }

    Ok(())
}
