// Configuration file tests
// Round trips through JSON and TOML, and building a machine from a
// configuration whose airfoils live next to it.

use hotwire_camtools::FormatterKind;
use hotwire_core::{Point2D, Spar, Units};
use hotwire_settings::{Config, ConfigError, SettingsError};
use tempfile::TempDir;

const FOIL: &str = "\
DIAMOND
1.0  0.0
0.5  0.125
0.0  0.0
0.5 -0.125
1.0  0.0
";

fn sample() -> Config {
    let mut config = Config::new();
    config.machine.units = Units::Millimeters;
    config.machine.width = 1000.0;
    config.machine.panel_bump = 100.0;
    config.machine.kerf = (0.5, 0.75);
    config.machine.profile_points = 20;
    config.machine.formatter = FormatterKind::Debug;
    config.panel.width = 600.0;

    config.panel.left_rib.airfoil = "diamond.dat".to_string();
    config.panel.left_rib.chord = 250.0;
    config.panel.left_rib.tail_stock = Some(10.0);
    config.panel.left_rib.spar = Some(Spar::new(Point2D::new(0.25, 0.0), 0.02));

    config.panel.right_rib.airfoil = "diamond.dat".to_string();
    config.panel.right_rib.chord = 150.0;
    config.panel.right_rib.rotation = -2.0;
    config.panel.right_rib.rotation_origin = Point2D::new(150.0, 0.0);
    config.panel.right_rib.offset = Point2D::new(50.0, 5.0);
    config.panel.right_rib.spar = Some(Spar::new(Point2D::new(0.25, 0.0), 0.02));
    config
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.json");

    let config = sample();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.toml");

    let config = sample();
    config.save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("units = \"millimeters\""));
    assert!(text.contains("formatter = \"debug\""));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_minimal_toml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.toml");
    std::fs::write(
        &path,
        r#"
[panel.left_rib]
airfoil = "left.dat"

[panel.right_rib]
airfoil = "right.dat"
chord = 0.8
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.machine.units, Units::Inches);
    assert_eq!(config.machine.formatter, FormatterKind::Generic);
    assert_eq!(config.panel.left_rib.chord, 1.0);
    assert_eq!(config.panel.right_rib.chord, 0.8);
    assert_eq!(config.panel.right_rib.tail_stock, None);
}

#[test]
fn test_unsupported_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.yaml");
    std::fs::write(&path, "machine: {}\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_invalid_values_are_rejected_on_save() {
    let dir = TempDir::new().unwrap();
    let mut config = sample();
    config.machine.profile_points = 0;
    let err = config.save_to_file(&dir.path().join("cut.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Machine(_)));
}

#[test]
fn test_build_machine_and_generate() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("diamond.dat"), FOIL).unwrap();

    let machine = sample().build_machine(Some(dir.path())).unwrap();
    assert_eq!(machine.kerf(), (0.5, 0.75));
    assert_eq!(machine.panel().width, 600.0);
    assert_eq!(machine.panel().left_rib.tail_stock, Some(10.0));

    let program = machine.generate().unwrap();
    assert!(program.starts_with("Units: millimeters\nFeedrate: 5\n"));
    assert!(program.lines().filter(|l| l.starts_with("MOVE\t")).count() > 360);
}

#[test]
fn test_build_machine_missing_airfoil() {
    let dir = TempDir::new().unwrap();
    let err = sample().build_machine(Some(dir.path())).unwrap_err();
    assert!(matches!(err, SettingsError::Profile(_)));
}

#[test]
fn test_file_errors_name_the_path() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("absent.toml");
    let err = Config::load_from_file(&missing).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(ref msg) if msg.contains("absent.toml")));

    let unwritable = dir.path().join("no-such-dir").join("cut.json");
    let err = sample().save_to_file(&unwritable).unwrap_err();
    assert!(matches!(err, SettingsError::SaveError(ref msg) if msg.contains("cut.json")));
}
