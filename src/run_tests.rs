//! Tests for the run module.

use super::*;
use settings_entry::config::{Cli, SchemaFile, ValidatedConfig};
use std::path::Path;
use tempfile::TempDir;

const SCHEMA: &str = r#"
[store]
prefix = "Tracker"

[strings]
"Tracker.Category.Display" = "Display"
"Tracker.Opacity.Name" = "Overlay opacity"
"Tracker.Quality.Low" = "Low"
"Tracker.Quality.High" = "High"

[[entry]]
key = "Enabled"
kind = "bool"
default = true
category = "Tracker.Category.Display"

[[entry]]
key = "Opacity"
kind = "float"
default = 0.5
min = 0.0
max = 1.0
name = "Tracker.Opacity.Name"
category = "Tracker.Category.Display"

[[entry]]
key = "Quality"
kind = "indexed"
options = ["Tracker.Quality.Low", "Tracker.Quality.High"]
default = 1

[[entry]]
key = "Position"
kind = "options"
options = ["Left", "Right"]
default = "Left"

[[entry]]
key = "ToggleKey"
kind = "keycode"
default = "F9"
"#;

fn config(store: &Path, args: &[&str]) -> ValidatedConfig {
    let store = store.to_string_lossy().into_owned();
    let mut full_args = vec!["settings-entry", "--store", store.as_str()];
    full_args.extend(args);
    let cli = Cli::parse_from_iter(full_args);
    let schema = SchemaFile::parse(SCHEMA).unwrap();
    ValidatedConfig::from_raw(&cli, &schema).unwrap()
}

fn run(store: &Path, args: &[&str]) -> Result<String, RunError> {
    let mut out = Vec::new();
    execute(&config(store, args), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("settings.json")
}

mod run_error {
    use super::*;

    #[test]
    fn unknown_key_displays_key() {
        let error = RunError::UnknownKey("Missing".to_string());
        assert_eq!(error.to_string(), "Unknown setting 'Missing'");
    }

    #[test]
    fn rejected_displays_constraint() {
        let error = RunError::Rejected {
            key: "Tracker_Opacity".to_string(),
            value: "2".to_string(),
            constraint: "[0, 1]".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Value '2' rejected for 'Tracker_Opacity': expected [0, 1]"
        );
    }
}

mod set_and_get {
    use super::*;

    #[test]
    fn set_persists_across_runs() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let output = run(&path, &["set", "Opacity", "0.25"]).unwrap();
        assert_eq!(output, "Tracker_Opacity = 0.25\n");

        let details = run(&path, &["get", "Tracker_Opacity"]).unwrap();
        assert!(details.contains("value:       0.25"));
        assert!(details.contains("modified:    yes"));
        assert!(details.contains("name:        Overlay opacity"));
        assert!(details.contains("category:    Display"));
    }

    #[test]
    fn setting_current_value_reports_unchanged() {
        let dir = TempDir::new().unwrap();
        let output = run(&store_path(&dir), &["set", "Enabled", "yes"]).unwrap();
        assert_eq!(output, "Tracker_Enabled unchanged (true)\n");
    }

    #[test]
    fn indexed_accepts_option_reference() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        run(&path, &["set", "Quality", "Tracker.Quality.Low"]).unwrap();
        let details = run(&path, &["get", "Quality"]).unwrap();
        assert!(details.contains("value:       Low"));
        assert!(details.contains("raw:         0"));
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let result = run(&path, &["set", "Opacity", "1.5"]);
        assert!(matches!(
            result,
            Err(RunError::Rejected { ref constraint, .. }) if constraint == "[0, 1]"
        ));

        let details = run(&path, &["get", "Opacity"]).unwrap();
        assert!(details.contains("value:       0.5"));
        assert!(details.contains("modified:    no"));
    }

    #[test]
    fn unparsable_value_is_input_error() {
        let dir = TempDir::new().unwrap();
        let result = run(&store_path(&dir), &["set", "Opacity", "half"]);
        assert!(matches!(
            result,
            Err(RunError::Input(InputError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn mouse_button_is_rejected_for_key_binding() {
        let dir = TempDir::new().unwrap();
        let result = run(&store_path(&dir), &["set", "ToggleKey", "Mouse0"]);
        assert!(matches!(result, Err(RunError::Rejected { .. })));
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = run(&store_path(&dir), &["get", "Nope"]);
        assert!(matches!(result, Err(RunError::UnknownKey(ref key)) if key == "Nope"));
    }
}

mod reset {
    use super::*;

    #[test]
    fn reset_restores_default() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        run(&path, &["set", "Opacity", "0.9"]).unwrap();
        let output = run(&path, &["reset", "Opacity"]).unwrap();
        assert_eq!(output, "Tracker_Opacity reset to default (0.5)\n");

        let details = run(&path, &["get", "Opacity"]).unwrap();
        assert!(details.contains("modified:    no"));
    }

    #[test]
    fn reset_at_default_reports_nothing_to_do() {
        let dir = TempDir::new().unwrap();
        let output = run(&store_path(&dir), &["reset", "Enabled"]).unwrap();
        assert_eq!(output, "Tracker_Enabled already at default\n");
    }

    #[test]
    fn reset_all_counts_changed_entries() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        run(&path, &["set", "Opacity", "0.9"]).unwrap();
        run(&path, &["toggle", "Enabled"]).unwrap();

        let output = run(&path, &["reset", "--all"]).unwrap();
        assert_eq!(output, "Reset 2 of 5 settings\n");

        let modified = run(&path, &["list", "--modified"]).unwrap();
        assert_eq!(modified, "No matching settings\n");
    }
}

mod toggle_and_cycle {
    use super::*;

    #[test]
    fn toggle_flips_boolean() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        assert_eq!(run(&path, &["toggle", "Enabled"]).unwrap(), "Tracker_Enabled = false\n");
        assert_eq!(run(&path, &["toggle", "Enabled"]).unwrap(), "Tracker_Enabled = true\n");
    }

    #[test]
    fn toggle_rejects_non_boolean() {
        let dir = TempDir::new().unwrap();
        let result = run(&store_path(&dir), &["toggle", "Opacity"]);
        assert!(matches!(
            result,
            Err(RunError::Input(InputError::Unsupported { .. }))
        ));
    }

    #[test]
    fn cycle_wraps_options() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        assert_eq!(run(&path, &["cycle", "Position"]).unwrap(), "Tracker_Position = Right\n");
        assert_eq!(run(&path, &["cycle", "Position"]).unwrap(), "Tracker_Position = Left\n");
        assert_eq!(
            run(&path, &["cycle", "Position", "--back"]).unwrap(),
            "Tracker_Position = Right\n"
        );
    }

    #[test]
    fn cycle_shows_indexed_label() {
        let dir = TempDir::new().unwrap();
        let output = run(&store_path(&dir), &["cycle", "Quality"]).unwrap();
        assert_eq!(output, "Tracker_Quality = Low\n");
    }
}

mod list {
    use super::*;

    #[test]
    fn lists_every_entry_by_default() {
        let dir = TempDir::new().unwrap();
        let output = run(&store_path(&dir), &[]).unwrap();
        assert_eq!(output.lines().count(), 5);
        assert!(output.contains("Overlay opacity"));
    }

    #[test]
    fn filter_matches_display_name() {
        let dir = TempDir::new().unwrap();
        let output = run(&store_path(&dir), &["list", "--filter", "overlay"]).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("Tracker_Opacity"));
    }

    #[test]
    fn category_matches_resolved_text() {
        let dir = TempDir::new().unwrap();
        let output = run(&store_path(&dir), &["list", "--category", "display"]).unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn modified_entries_are_marked() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        run(&path, &["set", "Position", "Right"]).unwrap();
        let output = run(&path, &["list", "--modified"]).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("* Tracker_Position"));
    }
}
