//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ARTICLE: &str = "\\documentclass[12pt, letterpaper]{article}";

/// Paired input and output directories, removed on drop.
pub struct Workspace {
    pub input: TempDir,
    pub output: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            input: TempDir::new().expect("create input dir"),
            output: TempDir::new().expect("create output dir"),
        }
    }

    pub fn input_path(&self, rel: &str) -> PathBuf {
        self.input.path().join(rel)
    }

    pub fn output_path(&self, rel: &str) -> PathBuf {
        self.output.path().join(rel)
    }

    pub fn write_input(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.input_path(rel);
        write_file(&path, contents);
        path
    }

    /// Pack the given input files into a gzip tarball inside the input dir.
    pub fn tarball(&self, name: &str, members: &[&str]) -> PathBuf {
        let path = self.input_path(name);
        let file = File::create(&path).expect("create tarball");
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        for member in members {
            builder
                .append_path_with_name(self.input_path(member), member)
                .expect("append tarball member");
        }
        builder
            .into_inner()
            .expect("finish tar")
            .finish()
            .expect("finish gzip");
        path
    }
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents.as_bytes()).expect("write file");
}

/// Relative path and bytes of every file under `root`, sorted.
pub fn snapshot_tree(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            walk(root, &path, out);
        } else {
            let rel = path
                .strip_prefix(root)
                .expect("strip root")
                .to_string_lossy()
                .replace('\\', "/");
            out.push((rel, fs::read(&path).expect("read file")));
        }
    }
}
