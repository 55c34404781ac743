//! Artifact-file fixtures for the lock tests.

use serde_json::json;

/// Render one compiler-output artifact file with a single unit/contract.
#[must_use]
pub fn artifact_json(unit: &str, name: &str, creation_hex: &str, runtime_hex: &str) -> String {
    json!({
        "contracts": {
            unit: {
                name: {
                    "evm": {
                        "bytecode": { "object": creation_hex },
                        "deployedBytecode": { "object": runtime_hex },
                    }
                }
            }
        }
    })
    .to_string()
}

/// Bytecode ending in a well-formed solc auxdata region whose CBOR payload
/// differs per `seed`: the region is `{"seed": h'XX'}` plus the two-byte
/// length trailer.
#[must_use]
pub fn code_with_auxdata(body: &[u8], seed: u8) -> Vec<u8> {
    let auxdata = [0xa1, 0x64, b's', b'e', b'e', b'd', 0x41, seed];
    let mut code = body.to_vec();
    code.extend_from_slice(&auxdata);
    code.extend_from_slice(&8u16.to_be_bytes());
    code
}

/// Parse a headerless CSV table into its rows.
///
/// # Panics
///
/// Panics when the file is missing or not valid CSV; lock tests treat that
/// as a test failure.
#[must_use]
pub fn read_table(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("open table");
    reader
        .records()
        .map(|r| r.expect("table row").iter().map(str::to_string).collect())
        .collect()
}
