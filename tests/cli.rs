use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;
use tempfile::TempDir;

fn restaurant() -> Command {
    let mut cmd = Command::cargo_bin("restaurant-scene").expect("binary exists");
    cmd.env_remove("RESTAURANT_SHADER_DIR");
    cmd
}

#[test]
fn summary_prints_draws_and_light_uniforms() {
    restaurant()
        .arg("--summary")
        .assert()
        .success()
        .stdout(contains(
            "Composed frame with 162 draw calls (157 cube, 5 sphere)",
        ))
        .stdout(contains(
            "dirLight direction=(-0.20, -1.00, -0.30) ambient=(0.30, 0.30, 0.30)",
        ))
        .stdout(contains(
            "pointLights[0] position=(4.00, 5.00, -4.00) ambient=(0.60, 0.30, 0.60)",
        ))
        .stdout(contains(
            "pointLights[2] position=(0.00, 4.00, 3.00) ambient=(0.00, 0.00, 0.90) diffuse=(0.00, 0.00, 2.00)",
        ))
        .stdout(contains("attenuation=(1.000, 0.070, 0.017)"));
}

#[test]
fn unknown_argument_fails() {
    restaurant()
        .arg("--fullscreen")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Unknown argument: --fullscreen"));
}

#[test]
fn shader_dir_requires_a_value() {
    restaurant()
        .args(["--summary", "--shader-dir"])
        .assert()
        .failure()
        .stderr(contains("Missing value for --shader-dir"));
}

#[test]
fn missing_shaders_fail_before_opening_a_window() {
    let dir = TempDir::new().expect("temp dir");
    restaurant()
        .arg("--shader-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to load shaders"))
        .stderr(contains("phong.vert.wgsl"));
}
