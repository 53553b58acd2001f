//! Helpers building jars and dependency manifests on disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serializes tests that read or write `JARDUPE_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Take the environment lock and clear all `JARDUPE_*` variables.
pub fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for (key, _) in std::env::vars() {
        if key.starts_with("JARDUPE_") {
            std::env::remove_var(key);
        }
    }
    guard
}

/// Write a jar containing `entries` (each with a dummy class body).
pub fn create_jar(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    for entry in entries {
        writer
            .start_file(*entry, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Manifest record for a jar dependency.
pub fn jar_dependency(group: &str, artifact: &str, scope: &str, file: &Path) -> Value {
    json!({
        "groupId": group,
        "artifactId": artifact,
        "version": "1.0",
        "scope": scope,
        "file": file,
    })
}

/// Manifest record for the project itself.
pub fn root_dependency() -> Value {
    json!({
        "groupId": "com.example",
        "artifactId": "app",
        "version": "1.0-SNAPSHOT",
        "extension": "pom",
    })
}

/// Write `dependencies.json` into `dir`.
pub fn write_manifest(dir: &Path, dependencies: &[Value]) -> PathBuf {
    let path = dir.join("dependencies.json");
    let manifest = json!({ "dependencies": dependencies });
    fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
    path
}

/// Write a stored jar whose central directory lists `entries` verbatim,
/// repeated paths included. Entry bodies are empty.
pub fn create_jar_with_repeated_entries(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let mut bytes = Vec::new();
    let mut offsets = Vec::new();
    for entry in entries {
        offsets.push(bytes.len() as u32);
        bytes.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        bytes.extend_from_slice(&20u16.to_le_bytes());
        bytes.extend_from_slice(&[0; 20]);
        bytes.extend_from_slice(&(entry.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(entry.as_bytes());
    }

    let directory_start = bytes.len() as u32;
    for (entry, offset) in entries.iter().zip(&offsets) {
        bytes.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        bytes.extend_from_slice(&20u16.to_le_bytes());
        bytes.extend_from_slice(&20u16.to_le_bytes());
        bytes.extend_from_slice(&[0; 20]);
        bytes.extend_from_slice(&(entry.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&[0; 12]);
        bytes.extend_from_slice(&offset.to_le_bytes());
        bytes.extend_from_slice(entry.as_bytes());
    }
    let directory_size = bytes.len() as u32 - directory_start;

    bytes.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&directory_size.to_le_bytes());
    bytes.extend_from_slice(&directory_start.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());

    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
