// Reference engine over plain word lists.
//
// Deliberately affix-less: the affix file must resolve and be readable, but
// its rules are not interpreted. Morphological checking and real suggestion
// generation belong to a full engine behind the same traits; this one exists
// so the session, the CLI tools, tests and benches run without an external
// engine artifact.

use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};
use log::debug;
use spellmount_core::{EngineError, EngineLoader, EngineModule, SpellChecker};

/// Maximum number of suggestions returned per query.
const MAX_SUGGESTIONS: usize = 5;

/// Length difference beyond which a candidate is not considered.
const MAX_LENGTH_GAP: usize = 2;

/// Loader yielding a fresh [`WordlistModule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WordlistLoader;

impl WordlistLoader {
    pub fn new() -> Self {
        Self
    }
}

impl EngineLoader for WordlistLoader {
    fn load(&mut self) -> Result<Box<dyn EngineModule>, EngineError> {
        Ok(Box::new(WordlistModule::new()))
    }
}

/// What a virtual path resolves to.
enum Backing {
    Directory(PathBuf),
    Buffer(Vec<u8>),
}

/// Word-list engine module with a flat virtual filesystem.
///
/// Directories mount at `/mnt/<n>`, buffers at `/buf/<n>/<tag>`.
#[derive(Default)]
pub struct WordlistModule {
    mounts: HashMap<String, Backing>,
    next_id: u32,
}

impl WordlistModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the bytes behind a virtual path.
    fn resolve(&self, path: &str) -> Result<Vec<u8>, EngineError> {
        if let Some(Backing::Buffer(data)) = self.mounts.get(path) {
            return Ok(data.clone());
        }
        for (mounted, backing) in &self.mounts {
            let Backing::Directory(dir) = backing else {
                continue;
            };
            // "/mnt/1" must not claim paths under "/mnt/10"
            let Some(relative) = path
                .strip_prefix(mounted.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            else {
                continue;
            };
            if relative.is_empty() {
                continue;
            }
            let file = dir.join(relative);
            return std::fs::read(&file).map_err(|source| EngineError::Read {
                path: file.display().to_string(),
                source,
            });
        }
        Err(EngineError::UnknownMount(path.to_string()))
    }
}

impl EngineModule for WordlistModule {
    fn mount_directory(&mut self, dir: &Path) -> Result<String, EngineError> {
        if !dir.is_dir() {
            return Err(EngineError::Mount {
                path: dir.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }
        let target = format!("/mnt/{}", self.next_id);
        self.next_id += 1;
        self.mounts
            .insert(target.clone(), Backing::Directory(dir.to_path_buf()));
        debug!("mounted directory {} at {target}", dir.display());
        Ok(target)
    }

    fn mount_buffer(&mut self, tag: &str, data: &[u8]) -> Result<String, EngineError> {
        let target = format!("/buf/{}/{tag}", self.next_id);
        self.next_id += 1;
        self.mounts
            .insert(target.clone(), Backing::Buffer(data.to_vec()));
        debug!("mounted {}-byte buffer at {target}", data.len());
        Ok(target)
    }

    fn unmount(&mut self, mounted: &str) -> Result<(), EngineError> {
        self.mounts
            .remove(mounted)
            .map(|_| ())
            .ok_or_else(|| EngineError::UnknownMount(mounted.to_string()))
    }

    fn open(&mut self, aff: &str, dic: &str) -> Result<Box<dyn SpellChecker>, EngineError> {
        // the affix side must resolve even though its rules are not interpreted
        self.resolve(aff)?;
        let words = parse_wordlist(&self.resolve(dic)?);
        debug!("opened dictionary {dic} ({} words)", words.len());
        Ok(Box::new(WordlistChecker::new(words)))
    }
}

/// Parse dictionary data: one word per line, `#` comments skipped, affix
/// flags after `/` stripped, an optional leading word-count line ignored.
fn parse_wordlist(data: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(data);
    let mut words = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if index == 0 && line.parse::<usize>().is_ok() {
            // word-count header
            continue;
        }
        let word = match line.split_once('/') {
            Some((word, _flags)) => word.trim(),
            None => line,
        };
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    words
}

/// Engine instance over a fixed word list.
pub struct WordlistChecker {
    /// Words exactly as listed.
    exact: HashSet<String>,
    /// Lowercased forms, accepting recapitalized input. A lowercase query
    /// must match exactly, so proper nouns keep their capitalization.
    lower: HashSet<String>,
    /// Listing order, kept for deterministic suggestion ranking.
    ordered: Vec<String>,
}

impl WordlistChecker {
    fn new(words: Vec<String>) -> Self {
        let exact: HashSet<String> = words.iter().cloned().collect();
        let lower: HashSet<String> = words.iter().map(|word| word.to_lowercase()).collect();
        Self {
            exact,
            lower,
            ordered: words,
        }
    }
}

impl SpellChecker for WordlistChecker {
    fn spell(&self, word: &str) -> bool {
        if word.is_empty() {
            return true;
        }
        if self.exact.contains(word) {
            return true;
        }
        let lowered = word.to_lowercase();
        lowered != word && self.lower.contains(&lowered)
    }

    /// Cheap deterministic heuristic: candidates share a prefix with the
    /// query and differ in length by at most [`MAX_LENGTH_GAP`], ranked by
    /// longest shared prefix, then smallest length gap, then listing order.
    fn suggest(&self, word: &str) -> Vec<String> {
        let query = word.to_lowercase();
        let query_len = query.chars().count();
        let mut ranked: Vec<(usize, usize, usize)> = Vec::new();
        for (index, candidate) in self.ordered.iter().enumerate() {
            let lowered = candidate.to_lowercase();
            if lowered == query {
                // identical up to case; not a correction
                continue;
            }
            let prefix = shared_prefix_len(&query, &lowered);
            let gap = query_len.abs_diff(lowered.chars().count());
            if prefix == 0 || gap > MAX_LENGTH_GAP {
                continue;
            }
            ranked.push((query_len.saturating_sub(prefix), gap, index));
        }
        ranked.sort_unstable();
        ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, _, index)| self.ordered[index].clone())
            .collect()
    }
}

/// Number of leading characters two strings share.
fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}
