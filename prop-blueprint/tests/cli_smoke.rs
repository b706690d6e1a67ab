use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("prop-blueprint"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn render_svg(fixture_name: &str, extra: &[&str]) -> String {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.svg");
    cli()
        .arg("render")
        .arg(fixture(fixture_name))
        .arg("-o")
        .arg(&out)
        .args(extra)
        .assert()
        .success();
    fs::read_to_string(&out).expect("read svg")
}

#[test]
fn renders_sloped_stand_svg() {
    let svg = render_svg("sloped_stand.json", &[]);
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<polygon"), "stand outline missing");
    assert!(svg.contains("W: 100.0mm"));
    assert!(svg.contains("H: 80.0mm"));
    assert!(svg.contains("stroke-dasharray"), "guides missing");
    assert!(!svg.contains("NO INPUT"));
}

#[test]
fn renders_stepped_tray_with_label_dimensions() {
    let svg = render_svg("stepped_tray.json", &[]);
    assert_eq!(svg.matches("<rect").count(), 1 + 4, "background + four tiers");
    assert!(svg.contains("W: 180.0mm"));
    assert!(svg.contains("H: 120.0mm"));
}

#[test]
fn set_clamps_to_parameter_range() {
    let svg = render_svg("sloped_stand.json", &["--set", "1=500"]);
    assert!(svg.contains("H: 200.0mm"), "height should clamp to max 200");
}

#[test]
fn description_override_changes_template() {
    let svg = render_svg(
        "sloped_stand.json",
        &["--description", "plain velvet box", "--width", "600", "--height", "400"],
    );
    assert!(!svg.contains("<polygon"));
    assert!(svg.contains("viewBox=\"0 0 600.00 400.00\""));
}

#[test]
fn renders_png() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");
    cli()
        .args(["render", "--scale", "2"])
        .arg(fixture("stepped_tray.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn out_of_range_edit_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.svg");
    let output = cli()
        .arg("render")
        .arg(fixture("sloped_stand.json"))
        .arg("-o")
        .arg(&out)
        .args(["--set", "7=10"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
    assert!(!out.exists());
}

#[test]
fn unknown_extension_is_a_usage_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let output = cli()
        .arg("render")
        .arg(fixture("sloped_stand.json"))
        .arg("-o")
        .arg(tmp.path().join("out.bmp"))
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn classify_prints_template_id() {
    let output = cli()
        .args(["classify", "Three", "TIER", "riser"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "stepped_tiers");

    let output = cli()
        .args(["classify", "acrylic", "cube"])
        .output()
        .expect("run");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "box_tray");
}

#[test]
fn params_lists_parameters_and_notes() {
    let output = cli()
        .arg("params")
        .arg(fixture("sloped_stand.json"))
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0\tBase Width\t100 mm\t[50, 200]"));
    assert!(stdout.contains("2\tSlope Angle"));
    assert!(stdout.contains("material: Brushed brass"));
    assert!(stdout.contains("focal point: Ring slot near the upper edge"));
}

#[test]
fn analyze_without_credentials_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = tmp.path().join("drawing.png");
    fs::write(&image, b"\x89PNG\r\n\x1a\n").expect("write image");
    let output = cli()
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .arg("analyze")
        .arg(&image)
        .arg("-o")
        .arg(tmp.path().join("analysis.json"))
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("credentials"));
}

#[test]
fn render_reads_layout_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("layout.json");
    fs::write(
        &config,
        r#"{ "viewport": { "width": 640, "height": 480 }, "max_scale": 1.0 }"#,
    )
    .expect("write config");
    let svg = render_svg(
        "sloped_stand.json",
        &["--config", config.to_str().expect("utf-8 path")],
    );
    assert!(svg.contains("viewBox=\"0 0 640.00 480.00\""));
    assert!(svg.contains("W: 100.0mm"));
}

#[test]
fn renders_pdf() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.pdf");
    cli()
        .arg("render")
        .arg(fixture("sloped_stand.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
}

#[test]
fn non_positive_viewport_is_a_usage_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.svg");
    let output = cli()
        .arg("render")
        .arg(fixture("sloped_stand.json"))
        .arg("-o")
        .arg(&out)
        .arg("--height=-550")
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("viewport.height"));
    assert!(!out.exists());

    let config = tmp.path().join("layout.json");
    fs::write(&config, r#"{ "fill_fraction": 0 }"#).expect("write config");
    let output = cli()
        .arg("render")
        .arg(fixture("sloped_stand.json"))
        .arg("-o")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("fill_fraction"));
}

#[test]
fn analyze_reports_unreadable_image() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("nope.jpg");
    let output = cli()
        .env("GEMINI_API_KEY", "unused")
        .arg("analyze")
        .arg(&missing)
        .arg("-o")
        .arg(tmp.path().join("analysis.json"))
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.jpg"));
}
