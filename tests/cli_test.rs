// End-to-end runs of the hotwire binary against a configuration on disk.

use std::process::Command;
use tempfile::TempDir;

const FOIL: &str = "\
TEST FOIL
1.0  0.0
0.5  0.06
0.0  0.0
0.5 -0.04
1.0  0.0
";

const CONFIG: &str = r#"
[machine]
width = 30.0
panel_bump = 2.0
profile_points = 30

[panel]
width = 20.0

[panel.left_rib]
airfoil = "foil.dat"
chord = 8.0

[panel.right_rib]
airfoil = "foil.dat"
chord = 6.0
offset = { x = 1.0, y = 0.0 }
"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("foil.dat"), FOIL).unwrap();
    std::fs::write(dir.path().join("cut.toml"), CONFIG).unwrap();
    dir
}

#[test]
fn test_writes_program_to_output_file() {
    let dir = workspace();
    let out = dir.path().join("cut.ngc");

    let status = Command::new(env!("CARGO_BIN_EXE_hotwire"))
        .arg(dir.path().join("cut.toml"))
        .arg("-o")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let program = std::fs::read_to_string(&out).unwrap();
    assert!(program.starts_with("F5\nG17\nG20\n"));
    assert!(program.ends_with("M30\n"));
}

#[test]
fn test_formatter_override_on_stdout() {
    let dir = workspace();
    let output = Command::new(env!("CARGO_BIN_EXE_hotwire"))
        .arg(dir.path().join("cut.toml"))
        .args(["--formatter", "debug"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Units: inches\n"));
    assert!(stdout.lines().any(|l| l.starts_with("MOVE\t")));
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_hotwire"))
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.toml"));
}
