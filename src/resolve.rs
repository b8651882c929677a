//! Entry-document resolution for a staged directory.
//!
//! The decision is a fixed pipeline of gates; each gate either names a single
//! file or hands the remaining candidates to the next one. Only the top level
//! of the directory is inspected and nothing is written.
use crate::config::{PrepareConfig, TEX_SUFFIX};
use crate::error::{IoContext, PrepareError, PrepareResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Literals the resolver matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRules {
    pub conventional_names: Vec<String>,
    pub document_marker: String,
    pub companion_extension: String,
}

impl Default for ResolveRules {
    fn default() -> Self {
        PrepareConfig::default().resolve_rules()
    }
}

/// Gate that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveGate {
    Convention,
    SoleTexFile,
    SoleDocumentClass,
    SoleBibliography,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub file_name: String,
    pub gate: ResolveGate,
}

/// A `.tex` file at the top level of the directory being resolved.
#[derive(Debug, Clone)]
struct CandidateFile {
    name: String,
    contents: Vec<u8>,
}

impl CandidateFile {
    fn has_marker(&self, marker: &[u8]) -> bool {
        contains_bytes(&self.contents, marker)
    }

    fn base_name(&self) -> &str {
        self.name.strip_suffix(TEX_SUFFIX).unwrap_or(&self.name)
    }

    fn has_companion(&self, dir: &Path, extension: &str) -> bool {
        dir.join(format!("{}.{extension}", self.base_name())).is_file()
    }
}

/// Pick the entry document in `dir` using the default rules.
pub fn pick_entry_file(dir: &Path) -> PrepareResult<String> {
    pick_entry_file_with(dir, &ResolveRules::default()).map(|resolution| resolution.file_name)
}

/// Pick the entry document in `dir`, reporting which gate decided.
pub fn pick_entry_file_with(dir: &Path, rules: &ResolveRules) -> PrepareResult<Resolution> {
    if let Some(name) = rules
        .conventional_names
        .iter()
        .find(|name| dir.join(name.as_str()).is_file())
    {
        return Ok(decided(name.clone(), ResolveGate::Convention));
    }

    let names = list_tex_files(dir)?;
    match names.as_slice() {
        [] => return Err(PrepareError::NoTexFiles),
        [only] => return Ok(decided(only.clone(), ResolveGate::SoleTexFile)),
        _ => {}
    }

    let candidates = read_candidates(dir, names)?;
    let marker = rules.document_marker.as_bytes();
    let qualified: Vec<&CandidateFile> = candidates
        .iter()
        .filter(|candidate| candidate.has_marker(marker))
        .collect();
    match qualified.as_slice() {
        [] => {
            return Err(PrepareError::NoDocumentClassFiles {
                marker: rules.document_marker.clone(),
            })
        }
        [only] => return Ok(decided(only.name.clone(), ResolveGate::SoleDocumentClass)),
        _ => {}
    }

    let with_companion: Vec<&CandidateFile> = qualified
        .iter()
        .copied()
        .filter(|candidate| candidate.has_companion(dir, &rules.companion_extension))
        .collect();
    match with_companion.as_slice() {
        [only] => Ok(decided(only.name.clone(), ResolveGate::SoleBibliography)),
        _ => Err(PrepareError::AmbiguousEntry {
            candidates: qualified.iter().map(|c| c.name.clone()).collect(),
        }),
    }
}

fn decided(file_name: String, gate: ResolveGate) -> Resolution {
    tracing::debug!(file_name = %file_name, ?gate, "entry document resolved");
    Resolution { file_name, gate }
}

/// Names of regular `.tex` files directly inside `dir`, sorted.
fn list_tex_files(dir: &Path) -> PrepareResult<Vec<String>> {
    let entries = fs::read_dir(dir).io_context(|| format!("read {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.io_context(|| format!("read {}", dir.display()))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.ends_with(TEX_SUFFIX) && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn read_candidates(dir: &Path, names: Vec<String>) -> PrepareResult<Vec<CandidateFile>> {
    names
        .into_iter()
        .map(|name| {
            let path = dir.join(&name);
            let contents = fs::read(&path).io_context(|| format!("read {}", path.display()))?;
            Ok(CandidateFile { name, contents })
        })
        .collect()
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
