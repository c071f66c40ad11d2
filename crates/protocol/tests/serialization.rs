use pc_protocol::*;

#[test]
fn test_defaults_manifest_deserialization_from_toml() {
    let toml_str = r#"
help = "Original model options"

[[options]]
title = "lowmem"
default = false
info = "Lower memory mode."

[[options]]
title = "batch_size"
datatype = "int"
default = 16
info = "Images per iteration."
rounding = 1
min_max = [1, 256]
fixed = false

[[options]]
title = "masks"
datatype = "list"
default = ["components"]
info = "Masks to train with."
choices = ["components", "extended", "vgg-clear"]
group = "mask"
"#;

    let manifest: DefaultsManifest =
        toml::from_str(toml_str).expect("Failed to deserialize DefaultsManifest");

    assert_eq!(manifest.help, "Original model options");
    assert_eq!(manifest.options.len(), 3);

    let lowmem = &manifest.options[0];
    assert_eq!(lowmem.title, "lowmem");
    assert_eq!(lowmem.datatype, None);
    assert_eq!(lowmem.default, ConfigValue::Bool(false));
    assert!(lowmem.fixed, "fixed should default to true");
    assert!(lowmem.choices.is_empty());

    let batch = &manifest.options[1];
    assert_eq!(batch.datatype.as_deref(), Some("int"));
    assert_eq!(batch.default, ConfigValue::Int(16));
    assert_eq!(batch.rounding, Some(1));
    assert_eq!(batch.min_max, Some((1.0, 256.0)));
    assert!(!batch.fixed);

    let masks = &manifest.options[2];
    assert_eq!(
        masks.default,
        ConfigValue::List(vec!["components".to_string()])
    );
    assert_eq!(masks.choices.len(), 3);
    assert_eq!(masks.group.as_deref(), Some("mask"));
}

#[test]
fn test_family_manifest_deserialization_from_yaml() {
    let yaml_str = r#"
sections:
  - name: global
    help: Options that apply to every model
    options:
      - title: learning_rate
        datatype: float
        default: 0.00005
        info: Learning rate
        rounding: 6
        min_max: [0.000001, 0.0001]
        fixed: false
      - title: optimizer
        default: adam
        helptext: Optimizer to use
        choices: [adam, sgd]
  - name: global.loss
    help: Loss options
"#;

    let manifest: FamilyManifest =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize FamilyManifest");

    assert_eq!(manifest.sections.len(), 2);
    assert_eq!(manifest.sections[0].name, "global");
    assert_eq!(manifest.sections[0].options.len(), 2);
    assert_eq!(
        manifest.sections[0].options[0].default,
        ConfigValue::Float(0.00005)
    );
    assert_eq!(manifest.sections[0].options[1].info, "Optimizer to use");
    assert!(manifest.sections[1].options.is_empty());
}

#[test]
fn test_manifest_rejects_non_sequence_choices() {
    let toml_str = r#"
[[options]]
title = "mode"
default = "a"
info = "Mode"
choices = "a"
"#;

    let result: Result<DefaultsManifest, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "choices must be a sequence");
}

#[test]
fn test_manifest_requires_default_and_info() {
    let toml_str = r#"
[[options]]
title = "mode"
info = "Mode"
"#;
    let result: Result<DefaultsManifest, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "default is mandatory");

    let toml_str = r#"
[[options]]
title = "mode"
default = "a"
"#;
    let result: Result<DefaultsManifest, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "info is mandatory");
}

#[test]
fn test_config_value_json_serialization() {
    let values = vec![
        ConfigValue::Bool(true),
        ConfigValue::Int(4),
        ConfigValue::Float(0.5),
        ConfigValue::Text("adam".to_string()),
        ConfigValue::List(vec!["a".to_string(), "c".to_string()]),
    ];

    let json = serde_json::to_value(&values).expect("Failed to serialize ConfigValue");
    assert_eq!(json, serde_json::json!([true, 4, 0.5, "adam", ["a", "c"]]));

    let deserialized: Vec<ConfigValue> =
        serde_json::from_value(json).expect("Failed to deserialize ConfigValue");
    assert_eq!(deserialized, values);
}
