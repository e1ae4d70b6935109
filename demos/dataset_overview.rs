//! Walk every `(task, subset)` slice of a dataset tree and summarize what
//! is on disk: image counts, ground-truth coverage, and evaluation counts.
//!
//! ```text
//! cargo run --example dataset_overview -- --root <dataset-root>
//! ```

use std::error::Error;

use maptext_analysis::{DataLayout, DatasetCatalog, Subset, TaskId};

fn main() -> Result<(), Box<dyn Error>> {
    let raw_args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut root = ".".to_string();

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
            other => {
                return Err(format!("unsupported argument '{other}'").into());
            }
        }
    }

    let catalog = DatasetCatalog::new(DataLayout::new(&root));
    println!("== dataset_overview: {root} ==");

    for subset in Subset::ALL {
        let images = catalog.list_images(subset)?;
        println!("subset {subset}: {} images", images.len());
        match catalog.ground_truth(subset) {
            Ok(entries) => {
                let missing = catalog.missing_images(subset)?;
                println!(
                    "  ground truth: {} annotated, {} images without annotation",
                    entries.len(),
                    missing.len()
                );
            }
            Err(err) => println!("  ground truth: unavailable ({err})"),
        }
        for task in TaskId::ALL {
            let evaluations = catalog.list_evaluations(task, subset)?;
            let submissions = catalog.list_submissions(task, subset)?;
            if !evaluations.is_empty() || !submissions.is_empty() {
                println!(
                    "  task {task}: {} evaluations, {} submissions",
                    evaluations.len(),
                    submissions.len()
                );
            }
        }
    }

    Ok(())
}
