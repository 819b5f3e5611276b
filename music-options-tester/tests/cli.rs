use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "music-options-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_categories_writes_output() {
    let exe = env!("CARGO_BIN_EXE_music-options-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-categories", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available categories"));
    assert!(content.contains("surf_bgm"));
}

#[test]
fn cli_random_sample_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_music-options-tester");
    let output_path = temp_path("sample");
    let status = Command::new(exe)
        .args([
            "--mode",
            "sample",
            "--categories",
            "wild_battle,surf",
            "--choice",
            "2",
            "--trials",
            "1000",
            "--tolerance",
            "0.1",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json report");
    assert_eq!(value["mode"], "sample");
    let results = value["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["passed"] == true));
    assert_eq!(results[1]["counts"].as_object().map(|m| m.len()), Some(2));
}

#[test]
fn cli_json_on_stdout_is_parseable() {
    let exe = env!("CARGO_BIN_EXE_music-options-tester");
    let output = Command::new(exe)
        .args(["--mode", "menu", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a json document");
    assert_eq!(value["mode"], "menu");
    assert_eq!(value["results"].as_array().map(Vec::len), Some(4));
}

#[test]
fn cli_refresh_scenario_passes_with_defaults() {
    let exe = env!("CARGO_BIN_EXE_music-options-tester");
    let output_path = temp_path("refresh");
    let status = Command::new(exe)
        .args(["--mode", "refresh", "--report", "markdown", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("bicycle"));
    assert!(content.contains("change while active"));
}

#[test]
fn cli_failed_distribution_check_exits_nonzero() {
    let exe = env!("CARGO_BIN_EXE_music-options-tester");
    let output_path = temp_path("strict");
    let status = Command::new(exe)
        .args([
            "--categories",
            "bicycle",
            "--choice",
            "2",
            "--trials",
            "7",
            "--tolerance",
            "0",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn cli_rejects_broken_config() {
    let exe = env!("CARGO_BIN_EXE_music-options-tester");
    let config_path = temp_path("config");
    std::fs::write(&config_path, "{ \"wild_battle\": 3 }").expect("write config");
    let output = Command::new(exe)
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load"));
}
