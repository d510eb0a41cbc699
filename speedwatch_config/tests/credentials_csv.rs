use rstest::rstest;
use speedwatch_config::Credentials;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_csv(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("creds.csv");
    fs::write(&path, body).unwrap();
    path
}

#[rstest]
#[case("ssid,homenet\npass,hunter2\n")]
#[case("pass,hunter2\nssid,homenet\n")]
#[case("# stored by provisioning tool\nssid,homenet\npass,hunter2\n")]
fn loads_ssid_and_pass(#[case] body: &str) {
    let dir = tempdir().unwrap();
    let creds = Credentials::load_csv(&write_csv(&dir, body)).expect("load credentials");
    assert_eq!(creds.ssid, "homenet");
    assert_eq!(creds.pass, "hunter2");
}

#[test]
fn missing_pass_is_an_error() {
    let dir = tempdir().unwrap();
    let err = Credentials::load_csv(&write_csv(&dir, "ssid,homenet\n")).unwrap_err();
    assert!(format!("{err}").contains("missing 'pass'"));
}

#[test]
fn unknown_key_is_an_error() {
    let dir = tempdir().unwrap();
    let err =
        Credentials::load_csv(&write_csv(&dir, "ssid,homenet\npass,x\nproxy,none\n")).unwrap_err();
    assert!(format!("{err}").contains("unknown credentials key"));
}

#[test]
fn empty_ssid_is_an_error() {
    let dir = tempdir().unwrap();
    let err = Credentials::load_csv(&write_csv(&dir, "ssid,\npass,hunter2\n")).unwrap_err();
    assert!(format!("{err}").contains("'ssid' entry is empty"));
}
