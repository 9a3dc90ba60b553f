use std::fs;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_cookiecutter");

mod cli_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_input_exits_with_usage_status() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let output = Command::new(BIN)
            .arg(dir.path().join("absent.svg"))
            .args(["--macro", "cc.FCMacro"])
            .env("TMPDIR", scratch.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("does not exist !"), "stderr: {stderr}");
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_macro_exits_with_usage_status() {
        let output = Command::new(BIN)
            .arg("heart.svg")
            .env_remove("COOKIECUTTER_MACRO")
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(2));
    }
}
