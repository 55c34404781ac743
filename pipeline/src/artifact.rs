//! Reading one compiler-output artifact file.
//!
//! Expected shape:
//!
//! ```text
//! {"contracts": {<unitPath>: {<contractName>: {
//!     "evm": {"bytecode":         {"object": <hex>},
//!             "deployedBytecode": {"object": <hex>}}}}}}
//! ```
//!
//! with exactly one unit and exactly one contract. Both counts are validated
//! explicitly, so "zero" and "more than one" stay distinguishable downstream
//! via the carried count.

use std::path::Path;

use serde_json::Value;

use crate::error::PipelineError;

/// The extracted content of one artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    /// The single contract's qualified name (the contract map key).
    pub qualified_name: String,
    /// Creation (constructor) bytecode, hex text as emitted by the compiler.
    pub creation_hex: String,
    /// Runtime (deployed) bytecode, hex text.
    pub runtime_hex: String,
}

/// Extract the single contract and its two bytecode blobs from a parsed
/// artifact file. No partial success: the first violation fails the whole
/// file.
///
/// # Errors
///
/// [`PipelineError::UnitCount`] / [`PipelineError::ContractCount`] when the
/// respective count is not exactly 1; [`PipelineError::MissingField`] when a
/// required key is absent or has the wrong type.
pub fn read_artifact(path: &Path, root: &Value) -> Result<CompiledArtifact, PipelineError> {
    let units = root
        .get("contracts")
        .and_then(Value::as_object)
        .ok_or_else(|| PipelineError::MissingField {
            path: path.to_path_buf(),
            field: "contracts",
        })?;

    let (_, unit) = match units.iter().next() {
        Some(entry) if units.len() == 1 => entry,
        _ => {
            return Err(PipelineError::UnitCount {
                path: path.to_path_buf(),
                count: units.len(),
            })
        }
    };

    let contracts = unit
        .as_object()
        .ok_or_else(|| PipelineError::MissingField {
            path: path.to_path_buf(),
            field: "contracts.<unit>",
        })?;

    let (qualified_name, contract) = match contracts.iter().next() {
        Some(entry) if contracts.len() == 1 => entry,
        _ => {
            return Err(PipelineError::ContractCount {
                path: path.to_path_buf(),
                count: contracts.len(),
            })
        }
    };

    Ok(CompiledArtifact {
        qualified_name: qualified_name.clone(),
        creation_hex: bytecode_object(path, contract, "bytecode", "evm.bytecode.object")?,
        runtime_hex: bytecode_object(
            path,
            contract,
            "deployedBytecode",
            "evm.deployedBytecode.object",
        )?,
    })
}

/// Read `evm.<section>.object` as a string.
fn bytecode_object(
    path: &Path,
    contract: &Value,
    section: &str,
    field: &'static str,
) -> Result<String, PipelineError> {
    contract
        .get("evm")
        .and_then(|evm| evm.get(section))
        .and_then(|b| b.get("object"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PipelineError::MissingField {
            path: path.to_path_buf(),
            field,
        })
}
