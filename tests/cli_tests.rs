use std::process::Command;

fn devform() -> Command {
    Command::new(env!("CARGO_BIN_EXE_devform"))
}

/// Basic smoke tests for CLI functionality
#[test]
fn test_cli_help() {
    let output = devform()
        .arg("--help")
        .output()
        .expect("Failed to execute devform binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: devform"));
    assert!(stdout.contains("--addresses"));
}

#[test]
fn test_cli_list_profiles_json() {
    let output = devform()
        .arg("--list-profiles")
        .arg("--json")
        .output()
        .expect("Failed to execute devform binary");

    assert!(output.status.success());
    let profiles: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profiles.as_array().map(Vec::len), Some(6));
}

#[test]
fn test_cli_list_ports_json() {
    let output = devform()
        .arg("--list-ports")
        .arg("--json")
        .output()
        .expect("Failed to execute devform binary");

    assert!(output.status.success());
    let ports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(ports.is_array());
}

#[test]
fn test_cli_submit() {
    let output = devform()
        .args(["--profile", "Uno", "--field", "dev_name=x", "--submit"])
        .output()
        .expect("Failed to execute devform binary");

    assert!(output.status.success());
    let device: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(device["dev_name"], "x");
    assert_eq!(device["transport"]["baud_rate"], 115200);
}

#[test]
fn test_cli_failed_submit_exits_nonzero() {
    let output = devform()
        .args(["--profile", "TCP", "--field", "dev_name=x", "--submit"])
        .output()
        .expect("Failed to execute devform binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please fill out all the fields before saving!"));
    assert!(stderr.contains("Error: missing required field: dev_id"));
}

#[test]
fn test_cli_malformed_field_exits_nonzero() {
    let output = devform()
        .args(["--field", "dev_name"])
        .output()
        .expect("Failed to execute devform binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expected ID=VALUE, got 'dev_name'"));
}

#[test]
fn test_cli_mbconfig_rejects_forged_name() {
    let path = std::env::temp_dir().join(format!("devform-cli-{}.json", std::process::id()));
    let devices = r#"[{
        "dev_name": "esp\"\ndevice0.address = \"6.6.6.6",
        "dev_type": "ESP32",
        "slave_id": 0,
        "transport": {"kind": "tcp", "ip_address": "10.0.0.5", "ip_port": 502},
        "registers": {
            "discrete_inputs": {"start": 0, "size": 8},
            "coils": {"start": 0, "size": 8},
            "input_registers": {"start": 0, "size": 1},
            "holding_read": {"start": 0, "size": 0},
            "holding_write": {"start": 0, "size": 1}
        }
    }]"#;
    std::fs::write(&path, devices).unwrap();

    let output = devform()
        .arg("--mbconfig")
        .arg(&path)
        .output()
        .expect("Failed to execute devform binary");
    std::fs::remove_file(&path).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
