//! Input-shape rejection and error-policy behavior of the core pipeline.

use std::path::PathBuf;

use bytecanon_kernel::canon::NoopCanonicalizer;
use bytecanon_pipeline::driver::{canonicalize_corpus, ErrorPolicy, RunOptions};
use bytecanon_pipeline::error::PipelineError;
use lock_tests::fixtures::{artifact_json, read_table};
use serde_json::json;

struct Workspace {
    _dir: tempfile::TempDir,
    src: PathBuf,
    dest: PathBuf,
    mapping: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let dest = dir.path().join("dest");
    std::fs::create_dir(&src).unwrap();
    std::fs::create_dir(&dest).unwrap();
    let mapping = dir.path().join("mapping.csv");
    Workspace {
        src,
        dest,
        mapping,
        _dir: dir,
    }
}

fn run(ws: &Workspace, options: RunOptions) -> Result<(), PipelineError> {
    canonicalize_corpus(
        &NoopCanonicalizer,
        &ws.dest,
        &ws.mapping,
        &[ws.src.clone()],
        options,
    )
    .map(|_| ())
}

fn dest_is_empty(ws: &Workspace) -> bool {
    std::fs::read_dir(&ws.dest).unwrap().next().is_none()
}

#[test]
fn two_contracts_reject_the_whole_file() {
    let ws = workspace();
    let two_contracts = json!({
        "contracts": {
            "a.sol": {
                "A_B_C_D_E_F": { "evm": {
                    "bytecode": { "object": "6001" },
                    "deployedBytecode": { "object": "6002" },
                } },
                "A_B_C_D_E_G": { "evm": {
                    "bytecode": { "object": "6003" },
                    "deployedBytecode": { "object": "6004" },
                } },
            }
        }
    });
    std::fs::write(ws.src.join("a.json"), two_contracts.to_string()).unwrap();

    let err = run(&ws, RunOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::ContractCount { count: 2, .. }));
    assert!(dest_is_empty(&ws));
    assert!(read_table(&ws.mapping).is_empty());
}

#[test]
fn two_units_reject_the_whole_file() {
    let ws = workspace();
    let two_units = json!({
        "contracts": {
            "a.sol": { "A_B_C_D_E_F": { "evm": {
                "bytecode": { "object": "6001" },
                "deployedBytecode": { "object": "6002" },
            } } },
            "b.sol": { "A_B_C_D_E_G": { "evm": {
                "bytecode": { "object": "6003" },
                "deployedBytecode": { "object": "6004" },
            } } },
        }
    });
    std::fs::write(ws.src.join("a.json"), two_units.to_string()).unwrap();

    let err = run(&ws, RunOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::UnitCount { count: 2, .. }));
    assert!(dest_is_empty(&ws));
}

#[test]
fn malformed_name_rejects_before_any_write() {
    let ws = workspace();
    std::fs::write(
        ws.src.join("a.json"),
        artifact_json("a.sol", "ONLY_FIVE_TAG_FIELDS_HERE", "6001", "6002"),
    )
    .unwrap();

    let err = run(&ws, RunOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::MalformedName { parts: 5, .. }));
    assert!(dest_is_empty(&ws));
    assert!(read_table(&ws.mapping).is_empty());
}

#[test]
fn bad_bytecode_hex_rejects_before_any_write() {
    let ws = workspace();
    std::fs::write(
        ws.src.join("a.json"),
        artifact_json("a.sol", "A_B_C_D_E_F", "6001", "not-hex"),
    )
    .unwrap();

    let err = run(&ws, RunOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::BadBytecodeHex { .. }));
    assert!(dest_is_empty(&ws));
    assert!(read_table(&ws.mapping).is_empty());
}

#[test]
fn existing_mapping_path_fails_before_any_processing() {
    let ws = workspace();
    std::fs::write(&ws.mapping, b"occupied").unwrap();
    std::fs::write(
        ws.src.join("a.json"),
        artifact_json("a.sol", "A_B_C_D_E_F", "6001", "6002"),
    )
    .unwrap();

    let err = run(&ws, RunOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::OutputAlreadyExists { .. }));
    assert!(dest_is_empty(&ws));
    assert_eq!(std::fs::read(&ws.mapping).unwrap(), b"occupied");
}

#[test]
fn skip_and_log_drops_only_malformed_files() {
    let ws = workspace();
    std::fs::write(
        ws.src.join("good.json"),
        artifact_json("a.sol", "A_B_C_D_E_F", "6001", "6002"),
    )
    .unwrap();
    std::fs::write(
        ws.src.join("bad_name.json"),
        artifact_json("a.sol", "TOO_FEW", "6001", "6002"),
    )
    .unwrap();
    std::fs::write(ws.src.join("not_json.json"), b"{ nope").unwrap();

    let summary = canonicalize_corpus(
        &NoopCanonicalizer,
        &ws.dest,
        &ws.mapping,
        &[ws.src.clone()],
        RunOptions {
            on_file_error: ErrorPolicy::SkipAndLog,
        },
    )
    .unwrap();

    assert_eq!(summary.files_seen, 3);
    assert_eq!(summary.files_skipped, 2);
    assert_eq!(summary.records_written, 2);
    assert_eq!(read_table(&ws.mapping).len(), 2);
}

#[test]
fn missing_destination_directory_is_fatal_under_every_policy() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir(&src).unwrap();

    for policy in [ErrorPolicy::Fail, ErrorPolicy::SkipAndLog] {
        let err = canonicalize_corpus(
            &NoopCanonicalizer,
            &dir.path().join("absent"),
            &dir.path().join(format!("mapping-{policy:?}.csv")),
            &[src.clone()],
            RunOptions {
                on_file_error: policy,
            },
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::DestinationNotADirectory { .. }));
    }
}
