//! Integration tests for plugin manifests and first-run config generation.
//!
//! These tests scaffold the example plugin tree, then verify that:
//! - Every plugin family gets its config file on first run only
//! - Family and discovered defaults manifests end up as sections in order
//! - Stores built from manifests resolve and report mutable options

mod common;

use common::*;
use pc_core::config::store::{ConfigStore, StoreOptions};
use pc_core::init::{generate_plugin_tree, InitOptions};
use pc_core::plugins::{generate_configs, ManifestProvider, PLUGINS_DIR};
use pc_protocol::ConfigValue;
use std::fs;
use std::path::Path;

fn scaffold(root: &Path, minimal: bool) {
    generate_plugin_tree(InitOptions {
        target_dir: root.to_path_buf(),
        force: false,
        minimal,
    })
    .expect("Failed to scaffold plugin tree");
}

fn train_store(root: &Path, section: &str) -> ConfigStore {
    let provider = ManifestProvider::for_family(&root.join(PLUGINS_DIR), "train");
    ConfigStore::load(&provider, section, StoreOptions::with_root(root))
        .expect("Failed to load train store")
}

#[test]
fn test_generate_configs_creates_one_file_per_family() {
    let root = create_app_root();
    scaffold(root.path(), false);

    let created = generate_configs(root.path()).expect("Bootstrap should succeed");

    assert_eq!(
        created,
        vec![
            root.path().join("config/extract.ini"),
            root.path().join("config/train.ini"),
        ]
    );
    for path in &created {
        assert!(path.is_file(), "{} should exist", path.display());
    }
}

#[test]
fn test_generate_configs_skips_existing_files() {
    let root = create_app_root();
    scaffold(root.path(), false);
    generate_configs(root.path()).unwrap();

    let path = train_config_path(root.path());
    edit_file(&path, &[("centering = face", "centering = head")]);

    let created = generate_configs(root.path()).unwrap();

    assert!(created.is_empty(), "Second run should create nothing");
    assert_stored_value(&path, "global", "centering", "head");
}

#[test]
fn test_generate_configs_without_plugins_dir() {
    let root = create_app_root();
    let created = generate_configs(root.path()).unwrap();
    assert!(created.is_empty());
    assert!(!root.path().join("config").exists());
}

#[test]
fn test_generate_configs_minimal_tree() {
    let root = create_app_root();
    scaffold(root.path(), true);

    let created = generate_configs(root.path()).unwrap();
    assert_eq!(created, vec![train_config_path(root.path())]);
}

#[test]
fn test_family_sections_precede_discovered_sections() {
    let root = create_app_root();
    scaffold(root.path(), false);
    generate_configs(root.path()).unwrap();

    let train = read_document(&train_config_path(root.path()));
    let names: Vec<&str> = train.section_names().collect();
    assert_eq!(
        names,
        vec!["global", "global.loss", "model.dfl_h128", "model.original"]
    );

    let extract = read_document(&root.path().join("config/extract.ini"));
    let names: Vec<&str> = extract.section_names().collect();
    assert_eq!(names, vec!["global", "detect.s3fd", "mask.vgg_clear"]);
    assert_section_keys(
        &root.path().join("config/extract.ini"),
        "detect.s3fd",
        &["confidence", "batch-size"],
    );
}

#[test]
fn test_generated_help_comments() {
    let root = create_app_root();
    scaffold(root.path(), false);
    generate_configs(root.path()).unwrap();

    let train = fs::read_to_string(train_config_path(root.path())).unwrap();
    assert!(train.contains("[global]\n# OPTIONS THAT APPLY TO ALL MODELS\n"));
    assert!(train.contains("\n#     - face: Centers the image on the center of the face.\n"));
    assert!(train.contains("\n#     - legacy: The 'original' extraction technique.\n"));
    assert!(train.contains("# Select an integer between 64 and 256\n"));

    let extract = fs::read_to_string(root.path().join("config/extract.ini")).unwrap();
    assert!(extract.contains("[mask.vgg_clear]\n# VGG_CLEAR OPTIONS."));
    assert!(extract.contains("\nbatch-size = 6\n"));
}

#[test]
fn test_manifest_store_resolves_global_and_section_options() {
    let root = create_app_root();
    scaffold(root.path(), false);
    generate_configs(root.path()).unwrap();

    let store = train_store(root.path(), "model.dfl_h128");
    let resolved = store.resolved_options_for_section().unwrap();

    assert_eq!(resolved.get("input_size"), Some(&Some(ConfigValue::Int(128))));
    assert_eq!(resolved.get("coverage"), Some(&Some(ConfigValue::Float(87.5))));
    assert_eq!(
        resolved.get("mask_type"),
        Some(&Some(ConfigValue::List(vec!["components".to_string()])))
    );
    assert_eq!(
        resolved.get("loss_function"),
        Some(&Some(ConfigValue::Text("ssim".to_string())))
    );
    assert!(!resolved.contains_key("lowmem"));

    let mutable = store.mutable_options().unwrap();
    let keys: Vec<&str> = mutable.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["batch_size", "learning_rate", "mixed_precision"]);
}

#[test]
fn test_new_defaults_manifest_is_merged_into_existing_file() {
    let root = create_app_root();
    scaffold(root.path(), true);
    generate_configs(root.path()).unwrap();

    let path = train_config_path(root.path());
    edit_file(&path, &[("lowmem = False", "lowmem = True")]);
    fs::write(
        root.path().join("plugins/train/model/villain_defaults.toml"),
        "help = \"Villain model\"\n\n[[options]]\ntitle = \"lowmem\"\n\
         default = true\ninfo = \"Lower memory mode\"\n",
    )
    .unwrap();

    let store = train_store(root.path(), "model.villain");

    assert_eq!(
        store.get("model.villain", "lowmem").unwrap(),
        Some(ConfigValue::Bool(true))
    );
    assert_stored_value(&path, "model.original", "lowmem", "True");
    assert_stored_value(&path, "model.villain", "lowmem", "True");
    let names: Vec<String> = read_document(&path)
        .section_names()
        .map(str::to_string)
        .collect();
    assert_eq!(names.last().map(String::as_str), Some("model.villain"));
}
