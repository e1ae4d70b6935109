use std::fs;
use std::path::Path;
use std::sync::Arc;

use maptext_analysis::{DataLayout, DatasetCatalog, DatasetError, Subset, TaskId};
use tempfile::tempdir;

fn catalog(root: &Path) -> DatasetCatalog {
    DatasetCatalog::new(DataLayout::new(root))
}

fn write_file(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn write_evaluation(root: &Path, task: u8, subset: Subset, submission_id: &str, body: &str) {
    write_file(
        &root.join(format!(
            "data/00-input/evaluations/t{task}/f{}/{submission_id}.json",
            subset.index()
        )),
        body,
    );
}

const EMPTY_DOC: &str = r#"{"results": {}, "images": {}}"#;

#[test]
fn evaluation_listings_are_lexicographically_sorted() {
    let temp = tempdir().unwrap();
    for id in ["9", "10", "2"] {
        write_evaluation(temp.path(), 1, Subset::Rumsey, id, EMPTY_DOC);
    }

    let catalog = catalog(temp.path());
    let task = TaskId::new(1).unwrap();
    let ids = catalog.list_evaluations(task, Subset::Rumsey).unwrap();

    // Lexicographic, not numeric: "10" sorts before "2".
    assert_eq!(*ids, vec!["10".to_string(), "2".to_string(), "9".to_string()]);
    let mut deduped = ids.to_vec();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn repeated_listings_return_the_same_shared_sequence() {
    let temp = tempdir().unwrap();
    write_evaluation(temp.path(), 2, Subset::Ign, "77", EMPTY_DOC);

    let catalog = catalog(temp.path());
    let task = TaskId::new(2).unwrap();
    let first = catalog.list_evaluations(task, Subset::Ign).unwrap();
    let second = catalog.list_evaluations(task, Subset::Ign).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // A different argument tuple gets its own listing.
    let other = catalog.list_evaluations(task, Subset::Rumsey).unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
    assert!(other.is_empty());
}

#[test]
fn image_listings_use_subset_extension_and_relative_ids() {
    let temp = tempdir().unwrap();
    let images = temp.path().join("data/00-input/images");
    write_file(&images.join("rumsey/test/b.png"), "png");
    write_file(&images.join("rumsey/test/a.png"), "png");
    // Foreign extensions in the same directory are not images of this subset.
    write_file(&images.join("rumsey/test/notes.txt"), "txt");
    write_file(&images.join("rumsey/test/c.jpg"), "jpg");
    write_file(&images.join("ign25/test/d.jpg"), "jpg");

    let catalog = catalog(temp.path());
    let rumsey = catalog.list_images(Subset::Rumsey).unwrap();
    assert_eq!(
        *rumsey,
        vec![
            "rumsey/test/a.png".to_string(),
            "rumsey/test/b.png".to_string()
        ]
    );

    let ign = catalog.list_images(Subset::Ign).unwrap();
    assert_eq!(*ign, vec!["ign25/test/d.jpg".to_string()]);
}

#[test]
fn missing_directories_list_as_empty() {
    let temp = tempdir().unwrap();
    let catalog = catalog(temp.path());
    let task = TaskId::new(3).unwrap();
    assert!(catalog.list_images(Subset::Twh).unwrap().is_empty());
    assert!(catalog.list_evaluations(task, Subset::Twh).unwrap().is_empty());
    assert!(catalog.list_submissions(task, Subset::Twh).unwrap().is_empty());
}

#[test]
fn ground_truth_is_parsed_once_and_shared() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("data/00-input/gt/rumsey/test.json"),
        r#"[{"image": "rumsey/test/b.png", "groups": []},
            {"image": "rumsey/test/a.png", "groups": []}]"#,
    );

    let catalog = catalog(temp.path());
    let first = catalog.ground_truth(Subset::Rumsey).unwrap();
    let second = catalog.ground_truth(Subset::Rumsey).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Document order is preserved in the parse, sorted in the id view.
    assert_eq!(first[0].image, "rumsey/test/b.png");
    assert_eq!(
        catalog.ground_truth_image_ids(Subset::Rumsey).unwrap(),
        vec![
            "rumsey/test/a.png".to_string(),
            "rumsey/test/b.png".to_string()
        ]
    );
}

#[test]
fn missing_images_reports_files_absent_from_ground_truth() {
    let temp = tempdir().unwrap();
    let images = temp.path().join("data/00-input/images");
    write_file(&images.join("rumsey/test/a.png"), "png");
    write_file(&images.join("rumsey/test/b.png"), "png");
    write_file(
        &temp.path().join("data/00-input/gt/rumsey/test.json"),
        r#"[{"image": "rumsey/test/a.png"}]"#,
    );

    let catalog = catalog(temp.path());
    assert_eq!(
        catalog.missing_images(Subset::Rumsey).unwrap(),
        vec!["rumsey/test/b.png".to_string()]
    );
}

#[test]
fn open_image_resolves_or_reports_not_found() {
    let temp = tempdir().unwrap();
    let images = temp.path().join("data/00-input/images");
    write_file(&images.join("rumsey/test/a.png"), "png bytes");

    let catalog = catalog(temp.path());
    assert!(catalog.open_image("rumsey/test/a.png").is_ok());
    let err = catalog.open_image("rumsey/test/absent.png").unwrap_err();
    assert!(matches!(err, DatasetError::NotFound { .. }));
}

#[test]
fn loaders_distinguish_not_found_from_malformed() {
    let temp = tempdir().unwrap();
    write_evaluation(temp.path(), 1, Subset::Rumsey, "broken", "{not json");

    let catalog = catalog(temp.path());
    let task = TaskId::new(1).unwrap();

    let err = catalog
        .load_evaluation(task, Subset::Rumsey, "absent")
        .unwrap_err();
    assert!(matches!(err, DatasetError::NotFound { .. }));

    let err = catalog
        .load_evaluation(task, Subset::Rumsey, "broken")
        .unwrap_err();
    assert!(matches!(err, DatasetError::Malformed { .. }));
}

#[test]
fn raw_submissions_load_as_untyped_json() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("data/00-input/submissions/t1/f1/42.json"),
        r#"[{"image": "rumsey/test/a.png", "words": ["Main", "St"]}]"#,
    );

    let catalog = catalog(temp.path());
    let task = TaskId::new(1).unwrap();
    assert_eq!(
        *catalog.list_submissions(task, Subset::Rumsey).unwrap(),
        vec!["42".to_string()]
    );
    let value = catalog.load_submission(task, Subset::Rumsey, "42").unwrap();
    assert_eq!(value[0]["words"][1], serde_json::json!("St"));
}

#[test]
fn identifier_validation_fails_before_any_filesystem_access() {
    // A root that does not exist: if validation were lazy, operations
    // would surface NotFound instead of the invalid-argument errors.
    let catalog = catalog(Path::new("/nonexistent/dataset/root"));
    assert!(matches!(
        TaskId::new(9),
        Err(DatasetError::InvalidTask { task: 9 })
    ));
    assert!(matches!(
        Subset::from_name("atlas"),
        Err(DatasetError::InvalidSubset { .. })
    ));
    // With valid identifiers the same operations merely see empty listings.
    let task = TaskId::new(1).unwrap();
    assert!(catalog.list_evaluations(task, Subset::Rumsey).unwrap().is_empty());
}
