// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const TAXONOMY: &str = r#"{
    "forward": ["未知", "有棚"],
    "color": ["未知", "黑色", "红色"]
}"#;

fn write_image(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 7]))
        .save(path)
        .unwrap();
}

#[test]
fn test_missing_arguments_fail() {
    Command::cargo_bin("sorrel")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn test_missing_input_directory_fails() {
    let root = Path::new("TEST_CLI_NO_INPUT");
    let _ = std::fs::remove_dir_all(root);
    std::fs::create_dir_all(root).unwrap();
    std::fs::write(root.join("classes.json"), TAXONOMY).unwrap();

    Command::cargo_bin("sorrel")
        .unwrap()
        .args([
            "-i",
            "TEST_CLI_NO_INPUT/images",
            "-o",
            "TEST_CLI_NO_INPUT/out",
            "-t",
            "TEST_CLI_NO_INPUT/classes.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn test_empty_taxonomy_fails_before_io() {
    let root = Path::new("TEST_CLI_BAD_TAXONOMY");
    let _ = std::fs::remove_dir_all(root);
    std::fs::create_dir_all(root.join("images")).unwrap();
    std::fs::write(root.join("classes.json"), "{}").unwrap();

    Command::cargo_bin("sorrel")
        .unwrap()
        .args([
            "-i",
            "TEST_CLI_BAD_TAXONOMY/images",
            "-o",
            "TEST_CLI_BAD_TAXONOMY/out",
            "-t",
            "TEST_CLI_BAD_TAXONOMY/classes.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TaxonomyError"));

    assert!(!root.join("out").exists());

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn test_converts_an_annotated_tree() {
    let root = Path::new("TEST_CLI_CONVERT");
    let _ = std::fs::remove_dir_all(root);
    std::fs::create_dir_all(root.join("images")).unwrap();

    std::fs::write(root.join("classes.json"), TAXONOMY).unwrap();

    // Index 0: annotated, 红色 resolves to class5, filed under train
    write_image(&root.join("images/cart_001.png"), 120, 120);
    std::fs::write(
        root.join("images/cart_001.json"),
        r#"{"locate": [10, 10, 100, 100], "color": {"name": "红色"}}"#,
    )
    .unwrap();

    // Index 1: no sidecar, silently skipped
    write_image(&root.join("images/cart_002.png"), 64, 64);

    Command::cargo_bin("sorrel")
        .unwrap()
        .args([
            "-i",
            "TEST_CLI_CONVERT/images",
            "-o",
            "TEST_CLI_CONVERT/out",
            "-t",
            "TEST_CLI_CONVERT/classes.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("forward:"))
        .stdout(predicate::str::contains("红色"));

    // The full class skeleton is pre-created regardless of population
    let out = root.join("out");
    for split in ["train", "val"] {
        for class in 1..=5 {
            assert!(out.join(split).join(format!("class{}", class)).is_dir());
        }
    }

    let written: Vec<_> = std::fs::read_dir(out.join("train/class5"))
        .unwrap()
        .filter_map(Result::ok)
        .collect();

    assert_eq!(written.len(), 1);
    assert!(
        written[0]
            .file_name()
            .to_str()
            .unwrap()
            .starts_with("cart_001_")
    );

    assert!(!out.join(sorrel_core::constant::ERROR_LEDGER_NAME).exists());

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn test_corrupt_sidecar_is_skipped_and_ledgered() {
    let root = Path::new("TEST_CLI_CORRUPT");
    let _ = std::fs::remove_dir_all(root);
    std::fs::create_dir_all(root.join("images")).unwrap();

    std::fs::write(root.join("classes.json"), TAXONOMY).unwrap();

    write_image(&root.join("images/bad.png"), 32, 32);
    std::fs::write(root.join("images/bad.json"), "{not json").unwrap();

    write_image(&root.join("images/good.png"), 64, 64);
    std::fs::write(
        root.join("images/good.json"),
        r#"{"locate": [0, 0, 32, 32], "forward": {"name": "有棚"}}"#,
    )
    .unwrap();

    Command::cargo_bin("sorrel")
        .unwrap()
        .args([
            "-i",
            "TEST_CLI_CORRUPT/images",
            "-o",
            "TEST_CLI_CORRUPT/out",
            "-t",
            "TEST_CLI_CORRUPT/classes.json",
        ])
        .assert()
        .success();

    // One corrupt record cannot abort the batch; it lands in the ledger
    let ledger = root
        .join("out")
        .join(sorrel_core::constant::ERROR_LEDGER_NAME);
    let contents = std::fs::read_to_string(&ledger).unwrap();

    assert!(contents.contains("bad.png"));
    assert!(contents.contains("AnnotationError"));

    let written: Vec<_> = std::fs::read_dir(root.join("out/train/class2"))
        .unwrap()
        .filter_map(Result::ok)
        .collect();

    assert_eq!(written.len(), 1);

    std::fs::remove_dir_all(root).unwrap();
}
