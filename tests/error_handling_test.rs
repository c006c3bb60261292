//! Error handling integration tests
//!
//! Covers the failure model end to end:
//! - Missing or non-directory roots are fatal discovery failures
//! - Unreadable, binary and oversized files degrade instead of failing
//! - Configuration errors are reported before any work starts
//! - Output failures keep whatever was already written

use phaseplan::classify::Category;
use phaseplan::config::{ConfigError, PlanConfig};
use phaseplan::pipeline::{
    PipelineError, PipelineOrchestrator, EXIT_DISCOVERY, EXIT_OUTPUT, REPORT_FILE_NAME,
};
use phaseplan::scan::{ScanError, Scanner};
use phaseplan::score::ComplexityTier;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_root_not_found_error() {
    let missing = PathBuf::from("/nonexistent/phaseplan/lab");

    match Scanner::new(&missing) {
        Err(ScanError::RootNotFound(path)) => assert_eq!(path, missing),
        Err(e) => panic!("Expected RootNotFound error, got {}", e),
        Ok(_) => panic!("Expected RootNotFound error"),
    }
}

#[test]
fn test_not_a_directory_error() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("grover.py");
    fs::write(&file_path, "pass\n").unwrap();

    let err = PipelineOrchestrator::new(PlanConfig::default())
        .analyze(&file_path)
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Scan(ScanError::NotADirectory(ref path)) if path == &file_path
    ));
    assert_eq!(err.exit_code(), EXIT_DISCOVERY);
}

#[test]
fn test_missing_root_writes_nothing() {
    let out = TempDir::new().unwrap();
    let config = PlanConfig {
        output_dir: Some(out.path().join("plan")),
        ..PlanConfig::default()
    };

    let err = PipelineOrchestrator::new(config)
        .run(&PathBuf::from("/nonexistent/phaseplan/lab"))
        .unwrap_err();

    assert!(err.is_discovery_failure());
    assert!(!out.path().join("plan").exists());
}

#[test]
fn test_invalid_utf8_file_is_cataloged_without_content() {
    let lab = TempDir::new().unwrap();
    fs::write(lab.path().join("circuit_blob.py"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    fs::write(lab.path().join("circuit_ok.py"), "def ok():\n    pass\n").unwrap();

    let analysis = PipelineOrchestrator::new(PlanConfig::default())
        .analyze(lab.path())
        .unwrap();

    assert_eq!(analysis.catalog.len(), 2);
    let blob = analysis
        .catalog
        .iter()
        .find(|e| e.artifact.name == "circuit_blob.py")
        .unwrap();
    assert_eq!(blob.lines(), 0);
    assert_eq!(blob.artifact.size, 4);
}

#[test]
fn test_oversized_file_is_cataloged_without_content() {
    let lab = TempDir::new().unwrap();
    let big: String = (0..200).map(|i| format!("step_{} = {}\n", i, i)).collect();
    fs::write(lab.path().join("circuit_big.py"), &big).unwrap();

    let config = PlanConfig {
        max_read_bytes: 1024,
        ..PlanConfig::default()
    };
    let analysis = PipelineOrchestrator::new(config)
        .analyze(lab.path())
        .unwrap();

    let entry = analysis.catalog.get(0).unwrap();
    assert_eq!(entry.artifact.size, big.len() as u64);
    assert_eq!(entry.lines(), 0);
    assert!(entry.artifact.content.is_empty());
}

#[test]
#[cfg(unix)]
fn test_unreadable_file_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let lab = TempDir::new().unwrap();
    let locked = lab.path().join("circuit_locked.py");
    fs::write(&locked, "def locked():\n    pass\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    fs::write(lab.path().join("grover.py"), "def search():\n    pass\n").unwrap();
    // Privileged users can still read a mode 000 file
    let read_denied = fs::read(&locked).is_err();

    let result = PipelineOrchestrator::new(PlanConfig::default()).analyze(lab.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    let analysis = result.unwrap();
    assert_eq!(analysis.catalog.len(), 2);
    let entry = analysis
        .catalog
        .iter()
        .find(|e| e.artifact.name == "circuit_locked.py")
        .unwrap();
    assert_eq!(entry.category(), Category::CoreCircuit);
    assert_eq!(entry.artifact.size, 23);

    if read_denied {
        assert_eq!(entry.lines(), 0);
        assert!(entry.artifact.content.is_empty());
        assert_eq!(entry.tier(), ComplexityTier::VeryLow);
        assert_eq!(entry.complexity.definitions, 0);
    } else {
        assert_eq!(entry.lines(), 2);
    }
}

#[test]
fn test_config_validation_errors() {
    let config = PlanConfig {
        top_n: 0,
        ..PlanConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed(_))
    ));

    let config = PlanConfig {
        max_depth: Some(0),
        ..PlanConfig::default()
    };
    assert!(config.validate().is_err());

    let config = PlanConfig {
        python: String::new(),
        ..PlanConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
#[cfg(unix)]
fn test_output_dir_blocked_by_file() {
    let lab = TempDir::new().unwrap();
    fs::write(lab.path().join("grover.py"), "def search():\n    pass\n").unwrap();
    let blocker = lab.path().join("blocker");
    fs::write(&blocker, "file\n").unwrap();

    let config = PlanConfig {
        output_dir: Some(blocker.join("out")),
        ..PlanConfig::default()
    };
    let err = PipelineOrchestrator::new(config)
        .run(lab.path())
        .unwrap_err();

    assert!(matches!(err, PipelineError::OutputWrite { .. }));
    assert_eq!(err.exit_code(), EXIT_OUTPUT);
}

#[test]
#[cfg(unix)]
fn test_script_failure_keeps_catalog_and_report() {
    let lab = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(lab.path().join("grover.py"), "def search():\n    pass\n").unwrap();
    fs::create_dir(out.path().join("run_all_phases.sh")).unwrap();

    let config = PlanConfig {
        output_dir: Some(out.path().to_path_buf()),
        ..PlanConfig::default()
    };
    let err = PipelineOrchestrator::new(config)
        .run(lab.path())
        .unwrap_err();

    assert!(matches!(err, PipelineError::Emit(_)));
    assert_eq!(err.exit_code(), EXIT_OUTPUT);
    assert!(out.path().join("catalog.json").exists());
    assert!(out.path().join(REPORT_FILE_NAME).exists());
}
