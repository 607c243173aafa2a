use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::constants::{language_for_path, TEXT_PROBE_BYTES};
use crate::structs::file_chunk::FileChunk;
use crate::structs::scan_request::ScanRequest;

/// Walks the scan root and splits matching text files into overlapping,
/// line-numbered chunks. Unreadable or oversized files are skipped, never
/// reported; a scan always produces whatever chunks it can.
pub struct Chunker;

impl Chunker {
    pub fn scan_project(request: &ScanRequest) -> Vec<FileChunk> {
        let files = if request.root.is_file() {
            vec![request.root.clone()]
        } else {
            let mut matched = Vec::new();
            Self::collect_files(&request.root, request, &mut matched);
            matched
        };

        let size_limit = request.max_file_bytes();
        let mut chunks = Vec::new();
        for path in files {
            match fs::metadata(&path) {
                Ok(meta) if meta.len() > size_limit => {
                    log::debug!("Skipping oversized file: {}", path.display());
                    continue;
                }
                Ok(_) => {}
                Err(_) => continue,
            }
            let Ok(text) = fs::read_to_string(&path) else {
                log::debug!("Skipping unreadable file: {}", path.display());
                continue;
            };

            let relative = Self::relative_path(&path, &request.root);
            let language = language_for_path(&relative);
            let numbered = Self::add_line_numbers(&text);
            let bodies = Self::chunk_by_lines(&numbered, request.chunk_max_lines, request.chunk_overlap_lines);
            for (chunk_index, content) in bodies.into_iter().enumerate() {
                chunks.push(FileChunk {
                    file_path: relative.clone(),
                    chunk_index,
                    language: language.to_string(),
                    content,
                });
            }
        }
        chunks
    }

    fn collect_files(dir: &Path, request: &ScanRequest, matched: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                Self::collect_files(&path, request, matched);
            } else if path.is_file()
                && Self::name_matches(&path, &request.include_exts)
                && Self::is_text_file(&path)
            {
                matched.push(path);
            }
        }
    }

    fn name_matches(path: &Path, include_exts: &[String]) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        include_exts.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Probes the head of the file for valid UTF-8.
    fn is_text_file(path: &Path) -> bool {
        let Ok(mut file) = File::open(path) else { return false };
        let mut buf = [0u8; TEXT_PROBE_BYTES];
        let Ok(read) = file.read(&mut buf) else { return false };
        match std::str::from_utf8(&buf[..read]) {
            Ok(_) => true,
            // A multi-byte character clipped by the probe window is not a
            // decode failure.
            Err(e) => e.error_len().is_none(),
        }
    }

    fn relative_path(path: &Path, root: &Path) -> String {
        if root.is_file() {
            return root.file_name().unwrap_or_default().to_string_lossy().to_string();
        }
        path.strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }

    /// Prefixes each line with its zero-padded 1-based number.
    fn add_line_numbers(text: &str) -> String {
        text.lines()
            .enumerate()
            .map(|(i, line)| format!("{:05}: {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Splits into windows of at most `max_lines`, each starting
    /// `overlap_lines` before the previous window's end. The final window
    /// may be shorter; an empty input yields no chunks.
    fn chunk_by_lines(numbered_text: &str, max_lines: usize, overlap_lines: usize) -> Vec<String> {
        let lines: Vec<&str> = numbered_text.lines().collect();
        let total = lines.len();
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < total {
            let end = (start + max_lines).min(total);
            chunks.push(lines[start..end].join("\n"));
            if end == total {
                break;
            }
            start = end.saturating_sub(overlap_lines);
        }
        chunks
    }
}
