//! Tests for validated configuration.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::entry::{EntryError, EntryInfo, EntryKind};
use crate::keycode::KeyCode;

use super::ConfigError;
use super::cli::Cli;
use super::entry_spec::{EntryParams, EntrySpec};
use super::toml::SchemaFile;
use super::validated::{Action, ValidatedConfig, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["settings-entry"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse a schema
fn schema(content: &str) -> SchemaFile {
    SchemaFile::parse(content).unwrap()
}

/// Helper to parse a schema holding a single entry
fn single(entry: &str) -> Result<EntrySpec, ConfigError> {
    let schema = schema(&format!("[[entry]]\n{entry}"));
    EntrySpec::from_section(&schema.entries[0])
}

mod precedence {
    use super::*;

    #[test]
    fn cli_store_and_prefix_win() {
        let schema = schema(
            r#"
            [store]
            path = "/schema/settings.json"
            prefix = "Schema"
        "#,
        );
        let cli = cli(&["--store", "/cli/settings.json", "--prefix", "Cli"]);

        let config = ValidatedConfig::from_raw(&cli, &schema).unwrap();

        assert_eq!(config.store_path, PathBuf::from("/cli/settings.json"));
        assert_eq!(config.prefix, "Cli");
    }

    #[test]
    fn schema_used_when_cli_absent() {
        let schema = schema(
            r#"
            [store]
            path = "/schema/settings.json"
            prefix = "Schema"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), &schema).unwrap();

        assert_eq!(config.store_path, PathBuf::from("/schema/settings.json"));
        assert_eq!(config.prefix, "Schema");
    }

    #[test]
    fn defaults_used_when_both_absent() {
        let config = ValidatedConfig::from_raw(&cli(&[]), &schema("")).unwrap();

        assert_eq!(config.store_path, crate::config::defaults::store_path());
        assert_eq!(config.prefix, "");
        assert!(config.entries.is_empty());
    }

    #[test]
    fn home_directory_is_expanded() {
        let schema = schema("[store]\npath = \"~/app/settings.json\"");
        let config = ValidatedConfig::from_raw(&cli(&[]), &schema).unwrap();

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.store_path, home.join("app/settings.json"));
        }
    }

    #[test]
    fn verbose_comes_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["-v"]), &schema("")).unwrap();
        assert!(config.verbose);
    }
}

mod entries {
    use super::*;

    #[test]
    fn bool_default_falls_back_to_false() {
        let spec = single("key = \"Enabled\"\nkind = \"bool\"").unwrap();
        assert_eq!(spec.params, EntryParams::Bool { default: false });
    }

    #[test]
    fn float_accepts_integer_literals() {
        let spec = single("key = \"Scale\"\nkind = \"float\"\ndefault = 2\nmin = 0\nmax = 10").unwrap();
        assert_eq!(
            spec.params,
            EntryParams::Float {
                default: 2.0,
                min: 0.0,
                max: 10.0
            }
        );
    }

    #[test]
    fn int_default_falls_back_to_min() {
        let spec = single("key = \"Count\"\nkind = \"int\"\nmin = 3\nmax = 9").unwrap();
        assert_eq!(
            spec.params,
            EntryParams::Int {
                default: 3,
                min: 3,
                max: 9
            }
        );
    }

    #[test]
    fn int_rejects_fractional_default() {
        let result = single("key = \"Count\"\nkind = \"int\"\ndefault = 1.5\nmin = 0\nmax = 9");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "default",
                ..
            })
        ));
    }

    #[test]
    fn range_requires_bounds() {
        let result = single("key = \"Count\"\nkind = \"int\"\nmin = 0");
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: "max", .. })
        ));
    }

    #[test]
    fn indexed_default_by_reference() {
        let spec = single(
            "key = \"Quality\"\nkind = \"indexed\"\noptions = [\"Low\", \"High\"]\ndefault = \"High\"",
        )
        .unwrap();
        assert_eq!(
            spec.params,
            EntryParams::Indexed {
                default: 1,
                options: vec!["Low".to_string(), "High".to_string()]
            }
        );
    }

    #[test]
    fn options_default_falls_back_to_first_option() {
        let spec = single("key = \"Side\"\nkind = \"options\"\noptions = [\"L\", \"R\"]").unwrap();
        assert!(matches!(spec.params, EntryParams::Options { ref default, .. } if default == "L"));
    }

    #[test]
    fn keycode_default_by_name_or_code() {
        let by_name = single("key = \"Key\"\nkind = \"keycode\"\ndefault = \"f9\"").unwrap();
        let by_code = single("key = \"Key\"\nkind = \"keycode\"\ndefault = 290").unwrap();

        assert_eq!(by_name.params, EntryParams::KeyCode { default: KeyCode::F9 });
        assert_eq!(by_code.params, by_name.params);
    }

    #[test]
    fn keycode_requires_default() {
        let result = single("key = \"Key\"\nkind = \"keycode\"");
        assert!(matches!(
            result,
            Err(ConfigError::MissingField {
                field: "default",
                ..
            })
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = single("key = \"Name\"\nkind = \"string\"");
        assert!(matches!(result, Err(ConfigError::InvalidKind { ref kind, .. }) if kind == "string"));
    }

    #[test]
    fn metadata_is_carried_into_info() {
        let spec = single(
            "key = \"Enabled\"\nkind = \"bool\"\nversion = 4\nname = \"N\"\ndescription = \"D\"\ncategory = \"C\"",
        )
        .unwrap();

        let expected = EntryInfo::new("Enabled")
            .with_version(4)
            .with_name("N")
            .with_description("D")
            .with_category("C");
        assert_eq!(spec.info, expected);
        assert_eq!(spec.kind(), EntryKind::Bool);
    }
}

mod entry_validation {
    use super::*;

    #[test]
    fn reversed_range_is_rejected() {
        let schema = schema("[[entry]]\nkey = \"Count\"\nkind = \"int\"\nmin = 9\nmax = 0");
        let result = ValidatedConfig::from_raw(&cli(&[]), &schema);

        assert!(matches!(
            result,
            Err(ConfigError::Entry(EntryError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let schema = schema(
            r#"
            [[entry]]
            key = "Enabled"
            kind = "bool"

            [[entry]]
            key = "Enabled"
            kind = "int"
            min = 0
            max = 1
        "#,
        );
        let result = ValidatedConfig::from_raw(&cli(&[]), &schema);

        assert!(matches!(
            result,
            Err(ConfigError::Entry(EntryError::DuplicateKey { .. }))
        ));
    }

    #[test]
    fn unknown_options_default_is_rejected() {
        let schema = schema(
            "[[entry]]\nkey = \"Side\"\nkind = \"options\"\noptions = [\"L\"]\ndefault = \"R\"",
        );
        let result = ValidatedConfig::from_raw(&cli(&[]), &schema);

        assert!(matches!(
            result,
            Err(ConfigError::Entry(EntryError::UnknownDefaultOption { .. }))
        ));
    }

    #[test]
    fn template_schema_is_valid() {
        let schema = schema(&super::super::toml::default_config_template());
        let config = ValidatedConfig::from_raw(&cli(&[]), &schema).unwrap();

        assert_eq!(config.entries.len(), 6);
        assert_eq!(config.prefix, "Tracker");
    }
}

mod actions {
    use super::*;

    #[test]
    fn no_command_lists_everything() {
        let config = ValidatedConfig::from_raw(&cli(&[]), &schema("")).unwrap();
        assert!(matches!(
            config.action,
            Action::List {
                filter: None,
                category: None,
                modified_only: false
            }
        ));
    }

    #[test]
    fn list_filter_is_case_insensitive() {
        let config =
            ValidatedConfig::from_raw(&cli(&["list", "--filter", "^opa"]), &schema("")).unwrap();

        let Action::List {
            filter: Some(regex),
            ..
        } = config.action
        else {
            panic!("expected list action with filter");
        };
        assert!(regex.is_match("Opacity"));
        assert!(!regex.is_match("Capacity"));
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["list", "--filter", "(unclosed"]), &schema(""));
        assert!(matches!(result, Err(ConfigError::InvalidRegex { .. })));
    }

    #[test]
    fn reset_all_has_no_key() {
        let config = ValidatedConfig::from_raw(&cli(&["reset", "--all"]), &schema("")).unwrap();
        assert!(matches!(config.action, Action::Reset { key: None }));
    }

    #[test]
    fn cycle_back_is_backwards() {
        let config =
            ValidatedConfig::from_raw(&cli(&["cycle", "Side", "--back"]), &schema("")).unwrap();
        assert!(matches!(
            config.action,
            Action::Cycle {
                backwards: true,
                ..
            }
        ));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_schema_from_cli_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.toml");
        std::fs::write(&path, "[store]\nprefix = \"FromFile\"").unwrap();

        let cli = cli(&["--schema", path.to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.prefix, "FromFile");
    }

    #[test]
    fn load_missing_schema_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let cli = cli(&["--schema", path.to_str().unwrap()]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn written_template_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        write_default_config(&path).unwrap();
        let cli = cli(&["--schema", path.to_str().unwrap()]);

        assert_eq!(ValidatedConfig::load(&cli).unwrap().entries.len(), 6);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("settings.toml");

        let result = write_default_config(&path);
        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
