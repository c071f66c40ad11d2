//! Test fixtures: schema providers and config file helpers.

use pc_core::config::error::ConfigResult;
use pc_core::config::schema::{OptionSpec, Schema, SchemaProvider};
use pc_core::config::store::{ConfigStore, StoreOptions};
use pc_protocol::ValueType;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A training family with global options and two model sections.
pub struct TrainConfig;

impl SchemaProvider for TrainConfig {
    fn family(&self) -> &str {
        "train"
    }

    fn declare(&self, schema: &mut Schema) -> ConfigResult<()> {
        schema.add_section("global", "Options that apply to all models")?;
        schema.add_item(
            "global",
            "centering",
            OptionSpec::new("face", "How to center the training image")
                .choices(["face", "head", "legacy"])
                .gui_radio(true),
        )?;
        schema.add_item(
            "global",
            "learning_rate",
            OptionSpec::new(5e-5, "Learning rate")
                .rounding(6)
                .min_max(1e-6, 1e-4)
                .fixed(false),
        )?;
        schema.add_item(
            "global",
            "mask_type",
            OptionSpec::new(vec!["components"], "Masks to train with")
                .choices(["components", "extended", "vgg-clear"]),
        )?;

        schema.add_section("model.original", "Original model")?;
        schema.add_item(
            "model.original",
            "lowmem",
            OptionSpec::new(false, "Lower memory mode"),
        )?;
        schema.add_item(
            "model.original",
            "batch_size",
            OptionSpec::new(16, "Images per iteration")
                .rounding(1)
                .min_max(1.0, 256.0)
                .fixed(false),
        )?;
        schema.add_item(
            "model.original",
            "coverage",
            OptionSpec::new(87.5, "Coverage percentage")
                .rounding(1)
                .min_max(62.5, 100.0),
        )?;
        schema.add_item(
            "model.original",
            "selections",
            OptionSpec::new(vec!["a"], "Selections")
                .datatype(ValueType::List)
                .choices(["a", "c"]),
        )?;
        schema.add_item(
            "model.original",
            "notes",
            OptionSpec::new("original", "Free text notes"),
        )?;

        schema.add_section("model.villain", "Villain model")?;
        schema.add_item(
            "model.villain",
            "villain_only",
            OptionSpec::new(true, "Only declared for villain"),
        )?;
        schema.add_item(
            "model.villain",
            "depth",
            OptionSpec::new("4", "Encoder depth written as text")
                .datatype(ValueType::Int)
                .rounding(1)
                .min_max(1.0, 8.0),
        )?;
        Ok(())
    }
}

/// A provider whose declaration breaks the numeric metadata rule.
pub struct BrokenNumericConfig;

impl SchemaProvider for BrokenNumericConfig {
    fn family(&self) -> &str {
        "broken"
    }

    fn declare(&self, schema: &mut Schema) -> ConfigResult<()> {
        schema.add_section("global", "Global")?;
        schema.add_item("global", "epochs", OptionSpec::new(10, "Epochs").rounding(1))
    }
}

/// Temporary application root.
pub fn create_app_root() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Path of the train family's config file under `root`.
pub fn train_config_path(root: &Path) -> PathBuf {
    root.join("config").join("train.ini")
}

/// Loads the train family store for `section`.
pub fn load_train(root: &Path, section: &str) -> ConfigStore {
    ConfigStore::load(&TrainConfig, section, StoreOptions::with_root(root))
        .expect("Failed to load train config")
}

/// Applies `(from, to)` text replacements to a file, asserting each applies.
pub fn edit_file(path: &Path, replacements: &[(&str, &str)]) {
    let mut content = std::fs::read_to_string(path).expect("Failed to read config");
    for (from, to) in replacements {
        assert!(
            content.contains(from),
            "Expected config to contain {from:?}"
        );
        content = content.replacen(from, to, 1);
    }
    std::fs::write(path, content).expect("Failed to write config");
}
