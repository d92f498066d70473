//! Hardhat build artifacts: ABI plus creation bytecode

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::JsonAbi;
use anyhow::{anyhow, bail, Context, Result};
use walkdir::WalkDir;

/// Contract names as compiled
pub const TOKEN_CONTRACT: &str = "TheMemeTV";
pub const AIRDROP_CONTRACT: &str = "Airdrop";

#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    pub source: PathBuf,
}

impl Artifact {
    /// Locate `<name>.json` under the artifacts directory, skipping debug and build-info files
    pub fn find(root: &Path, name: &str) -> Result<Self> {
        let file_name = format!("{}.json", name);
        let path = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.file_name() != "build-info")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .find(|path| path.file_name().and_then(|n| n.to_str()) == Some(file_name.as_str()))
            .ok_or_else(|| {
                anyhow!(
                    "Artifact {} not found under {}. Compile the contracts first.",
                    file_name,
                    root.display()
                )
            })?;
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid artifact JSON {}", path.display()))?;

        let contract_name = value
            .get("contractName")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let abi_value = value
            .get("abi")
            .cloned()
            .ok_or_else(|| anyhow!("Contract ABI not found in {}", path.display()))?;
        let abi: JsonAbi = serde_json::from_value(abi_value)
            .with_context(|| format!("Invalid ABI in {}", path.display()))?;

        let bytecode_hex = value
            .get("bytecode")
            .and_then(|v| v.as_str().or_else(|| v.get("object").and_then(|o| o.as_str())))
            .unwrap_or("0x");
        let bytecode: Bytes = bytecode_hex
            .parse()
            .with_context(|| format!("Invalid bytecode in {}", path.display()))?;
        if bytecode.is_empty() {
            bail!(
                "{} has no creation bytecode (abstract contract or interface?)",
                path.display()
            );
        }

        Ok(Self {
            contract_name,
            abi,
            bytecode,
            source: path.to_path_buf(),
        })
    }

    /// Creation code followed by the ABI-encoded constructor arguments,
    /// checked against the artifact's constructor signature
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let inputs = self
            .abi
            .constructor()
            .map(|c| c.inputs.clone())
            .unwrap_or_default();

        if inputs.len() != args.len() {
            bail!(
                "{} constructor takes {} arguments, got {}",
                self.contract_name,
                inputs.len(),
                args.len()
            );
        }
        for (param, arg) in inputs.iter().zip(args) {
            let ty = DynSolType::parse(&param.ty)
                .with_context(|| format!("Unsupported constructor type {}", param.ty))?;
            if !ty.matches(arg) {
                bail!(
                    "{} constructor argument '{}' must be {}",
                    self.contract_name,
                    param.name,
                    param.ty
                );
            }
        }

        let mut code = self.bytecode.to_vec();
        if !args.is_empty() {
            code.extend_from_slice(&DynSolValue::Tuple(args.to_vec()).abi_encode_params());
        }
        Ok(code.into())
    }
}
