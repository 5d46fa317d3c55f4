//! Version rewriting in the configured files.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};
use verbump_config::FileToModify;
use verbump_version::{Version, VersionTarget};

use crate::{CoreError, CoreResult, VersionBumpResult, WriteOperation};

/// Bumps versions in files.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionBumper;

impl VersionBumper {
    /// Creates a new bumper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Bumps every version matched by the patterns of each file.
    ///
    /// Files are processed in order and written as soon as they are done.
    /// Nothing is written for a file whose contents did not change, or when
    /// either `dry_run` or the file's own dry-run flag is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a file that must exist is missing, a file cannot
    /// be read or written, or a matched version cannot be parsed. Files
    /// processed before the failing one keep their new contents.
    pub fn bump(
        &self,
        files: &[FileToModify],
        root_path: &Path,
        target: &VersionTarget,
        dry_run: bool,
    ) -> CoreResult<Vec<VersionBumpResult>> {
        files
            .iter()
            .map(|file| bump_file(file, root_path, target, dry_run))
            .collect()
    }
}

fn bump_file(
    file: &FileToModify,
    root_path: &Path,
    target: &VersionTarget,
    dry_run: bool,
) -> CoreResult<VersionBumpResult> {
    let path = file.full_path(root_path);

    if !path.is_file() {
        if file.report_missing() {
            return Err(CoreError::FileNotFound(path));
        }

        debug!(path = %path.display(), "skipping missing file");
        return Ok(VersionBumpResult::new(file.clone(), Vec::new()));
    }

    let contents = fs::read(&path).map_err(|source| CoreError::FileNotReadable {
        path: path.clone(),
        source,
    })?;

    let mut rewrite = Rewrite::new(&contents);
    let mut operations = Vec::new();

    for pattern in file.patterns() {
        let mut found = false;

        for (offset, text) in pattern.find_versions(&contents) {
            found = true;

            let source = Version::parse(text)?;
            let next = target.apply(&source)?;

            let operation = if rewrite.replace(offset, text.len(), next.full().as_bytes()) {
                WriteOperation::modified(
                    pattern.clone(),
                    source,
                    next,
                    rewrite.buffer.clone(),
                    offset,
                )
            } else {
                WriteOperation::skipped(
                    pattern.clone(),
                    source,
                    next,
                    rewrite.buffer.clone(),
                    offset,
                )
            };
            operations.push(operation);
        }

        if !found && file.report_unmatched() {
            operations.push(WriteOperation::unmatched(pattern.clone()));
        }
    }

    debug!(
        path = %path.display(),
        operations = operations.len(),
        "processed file"
    );

    if rewrite.buffer != contents && !dry_run && !file.dry_run() {
        write_atomically(&path, &rewrite.buffer)?;
        info!(path = %path.display(), "bumped version");
    }

    Ok(VersionBumpResult::new(file.clone(), operations))
}

/// Raw file contents being rewritten.
///
/// Matches are located in the original contents. Each replaced slot is
/// tracked by its original offset so later matches can be mapped into the
/// running buffer even when earlier replacements changed its length.
struct Rewrite {
    buffer: Vec<u8>,
    slots: BTreeMap<usize, Slot>,
}

struct Slot {
    original_len: usize,
    current_len: usize,
}

impl Rewrite {
    fn new(contents: &[u8]) -> Self {
        Self {
            buffer: contents.to_vec(),
            slots: BTreeMap::new(),
        }
    }

    /// Replaces the text matched at `offset` in the original contents.
    ///
    /// Returns false if the buffer already holds `replacement` there.
    fn replace(&mut self, offset: usize, len: usize, replacement: &[u8]) -> bool {
        let Some(range) = self.locate(offset, len) else {
            debug!(offset, "match overlaps an earlier replacement, skipping");
            return false;
        };

        match self.buffer.get(range.clone()) {
            Some(current) if current != replacement => {}
            _ => return false,
        }
        let tail = self.buffer.split_off(range.end);
        self.buffer.truncate(range.start);
        self.buffer.extend_from_slice(replacement);
        self.buffer.extend_from_slice(&tail);

        let slot = self.slots.entry(offset).or_insert(Slot {
            original_len: len,
            current_len: len,
        });
        slot.current_len = replacement.len();

        true
    }

    /// Maps a match in the original contents to the running buffer.
    ///
    /// A slot already replaced at the same offset is located as a whole.
    /// Matches overlapping an earlier slot only partially are not mapped.
    fn locate(&self, offset: usize, len: usize) -> Option<Range<usize>> {
        if let Some((start, slot)) = self.slots.range(..offset).next_back()
            && start + slot.original_len > offset
        {
            return None;
        }
        if let Some((start, _)) = self.slots.range(offset + 1..).next()
            && *start < offset + len
        {
            return None;
        }

        let (grown, shrunk) = self
            .slots
            .range(..offset)
            .fold((0, 0), |(grown, shrunk), (_, slot)| {
                (grown + slot.current_len, shrunk + slot.original_len)
            });

        let start = offset - shrunk + grown;
        let len = self.slots.get(&offset).map_or(len, |slot| slot.current_len);

        Some(start..start + len)
    }
}

/// Replaces the file through a temporary sibling.
///
/// Symlinks are resolved first so the link survives and its target gets
/// the new contents.
fn write_atomically(path: &Path, contents: &[u8]) -> CoreResult<()> {
    let write_failed = |source: std::io::Error| CoreError::FileWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let path = &fs::canonicalize(path).map_err(write_failed)?;
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let permissions = fs::metadata(path).map_err(write_failed)?.permissions();

    let mut temp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    temp.write_all(contents).map_err(write_failed)?;
    temp.as_file().sync_all().map_err(write_failed)?;
    fs::set_permissions(temp.path(), permissions).map_err(write_failed)?;
    temp.persist(path).map_err(|err| write_failed(err.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationState;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use verbump_config::FilePattern;
    use verbump_version::{VersionError, VersionRange};

    fn file(path: &str, patterns: &[&str]) -> FileToModify {
        FileToModify::new(
            path,
            patterns
                .iter()
                .map(|p| FilePattern::new(*p).unwrap())
                .collect(),
        )
    }

    fn setup(name: &str, contents: impl AsRef<[u8]>) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(name);
        fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    fn explicit(version: &str) -> VersionTarget {
        VersionTarget::from_input(version).unwrap()
    }

    #[test]
    fn test_bump_explicit_version() {
        let (temp_dir, path) = setup("package.json", "{\n  \"version\": \"1.2.3\"\n}\n");
        let files = [file("package.json", &["\"version\": \"{%version%}\""])];

        let results = VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("2.0.0"), false)
            .unwrap();

        let operation = &results[0].operations()[0];
        assert_eq!(operation.state(), OperationState::Modified);
        assert_eq!(operation.source(), Some(&Version::new(1, 2, 3)));
        assert_eq!(operation.target(), Some(&Version::new(2, 0, 0)));
        assert_eq!(operation.offset(), Some(16));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"version\": \"2.0.0\"\n}\n"
        );
    }

    #[test]
    fn test_bump_range_per_match() {
        let (temp_dir, path) = setup("versions.txt", "a: 1.0.0\nb: 0.9.9\n");
        let files = [file("versions.txt", &["{%version%}"])];

        let results = VersionBumper::new()
            .bump(
                &files,
                temp_dir.path(),
                &VersionTarget::Range(VersionRange::Minor),
                false,
            )
            .unwrap();

        let targets: Vec<_> = results[0]
            .operations()
            .iter()
            .filter_map(|op| op.target().map(Version::full))
            .collect();
        assert_eq!(targets, vec!["1.1.0", "0.10.0"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1.1.0\nb: 0.10.0\n");
    }

    #[test]
    fn test_bump_length_changes_keep_later_matches_intact() {
        let (temp_dir, path) = setup("VERSIONS", "1.9.9 2.9.9 x 3.9.9\n");
        let files = [file("VERSIONS", &["{%version%}"])];

        VersionBumper::new()
            .bump(
                &files,
                temp_dir.path(),
                &VersionTarget::Range(VersionRange::Minor),
                false,
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1.10.0 2.10.0 x 3.10.0\n"
        );
    }

    #[test]
    fn test_bump_explicit_version_converges_different_versions() {
        let (temp_dir, path) = setup("VERSIONS", "a=1.0.0 b=3.0.0");
        let files = [file("VERSIONS", &["={%version%}"])];

        VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("2.0.0"), false)
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a=2.0.0 b=2.0.0");
    }

    #[test]
    fn test_bump_overlapping_patterns_replace_slot_once() {
        let (temp_dir, path) = setup("README.md", "Install v1.0.0 now, 1.0.0 is great");
        let files = [file("README.md", &["v{%version%}", "{%version%}"])];

        let results = VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("1.0.10"), false)
            .unwrap();

        let states: Vec<_> = results[0]
            .operations()
            .iter()
            .map(WriteOperation::state)
            .collect();
        assert_eq!(
            states,
            vec![
                OperationState::Modified,
                OperationState::Skipped,
                OperationState::Modified
            ]
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Install v1.0.10 now, 1.0.10 is great"
        );
    }

    #[test]
    fn test_bump_skipped_leaves_file_untouched() {
        let (temp_dir, path) = setup("VERSION", "1.0.0\n");
        let before = fs::metadata(&path).unwrap().modified().unwrap();
        let files = [file("VERSION", &["{%version%}"])];

        let results = VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("1.0.0"), false)
            .unwrap();

        assert_eq!(results[0].operations()[0].state(), OperationState::Skipped);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_bump_unmatched() {
        let (temp_dir, _) = setup("VERSION", "no version here\n");
        let quiet = file("VERSION", &["{%version%}"]);
        let loud = quiet.clone().with_report_unmatched(true);

        let bumper = VersionBumper::new();
        let target = explicit("1.0.0");

        let results = bumper.bump(&[quiet], temp_dir.path(), &target, false).unwrap();
        assert!(results[0].operations().is_empty());

        let results = bumper.bump(&[loud], temp_dir.path(), &target, false).unwrap();
        assert_eq!(results[0].operations()[0].state(), OperationState::Unmatched);
    }

    #[test]
    fn test_bump_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = file("missing.json", &["{%version%}"]);
        let bumper = VersionBumper::new();
        let target = explicit("1.0.0");

        let result = bumper.bump(&[missing.clone()], temp_dir.path(), &target, false);
        assert!(matches!(result, Err(CoreError::FileNotFound(p)) if p.ends_with("missing.json")));

        let results = bumper
            .bump(
                &[missing.with_report_missing(false)],
                temp_dir.path(),
                &target,
                false,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].operations().is_empty());
    }

    #[test]
    fn test_bump_dry_run() {
        let (temp_dir, path) = setup("VERSION", "1.0.0\n");
        let mut forced = file("VERSION", &["{%version%}"]);
        let bumper = VersionBumper::new();
        let target = VersionTarget::Range(VersionRange::Major);

        let results = bumper
            .bump(std::slice::from_ref(&forced), temp_dir.path(), &target, true)
            .unwrap();
        assert_eq!(
            results[0].operations()[0].result(),
            Some("2.0.0\n".as_bytes())
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.0.0\n");

        forced.perform_dry_run(true);
        bumper.bump(&[forced], temp_dir.path(), &target, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.0.0\n");
    }

    #[test]
    fn test_bump_operation_results_accumulate() {
        let (temp_dir, _) = setup("VERSION", "1.0.0 1.0.0");
        let files = [file("VERSION", &["{%version%}"])];

        let results = VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("1.1.0"), true)
            .unwrap();

        let contents: Vec<_> = results[0]
            .operations()
            .iter()
            .filter_map(WriteOperation::result)
            .collect();
        assert_eq!(
            contents,
            vec!["1.1.0 1.0.0".as_bytes(), "1.1.0 1.1.0".as_bytes()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_bump_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (temp_dir, path) = setup("release.sh", "VERSION=1.0.0\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        let files = [file("release.sh", &["VERSION={%version%}"])];

        VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("1.0.1"), false)
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(fs::read_to_string(&path).unwrap(), "VERSION=1.0.1\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_bump_through_symlink_updates_target() {
        let (temp_dir, real) = setup("VERSION.real", "1.0.0\n");
        let link = temp_dir.path().join("VERSION");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let files = [file("VERSION", &["{%version%}"])];

        VersionBumper::new()
            .bump(
                &files,
                temp_dir.path(),
                &VersionTarget::Range(VersionRange::Major),
                false,
            )
            .unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "2.0.0\n");
    }

    #[test]
    fn test_bump_non_utf8_file() {
        let contents = b"'author' => 'J\xfcrgen',\n'version' => '1.0.0',\n";
        let (temp_dir, path) = setup("ext_emconf.php", contents);
        let files = [file("ext_emconf.php", &["'version' => '{%version%}'"])];

        let results = VersionBumper::new()
            .bump(&files, temp_dir.path(), &explicit("1.1.0"), false)
            .unwrap();

        assert_eq!(results[0].operations()[0].state(), OperationState::Modified);
        assert_eq!(
            fs::read(&path).unwrap(),
            b"'author' => 'J\xfcrgen',\n'version' => '1.1.0',\n"
        );
    }

    #[test]
    fn test_bump_overflowing_version_fails() {
        let (temp_dir, path) = setup("VERSION", "18446744073709551615.0.0\n");
        let files = [file("VERSION", &["{%version%}"])];

        let result = VersionBumper::new().bump(
            &files,
            temp_dir.path(),
            &VersionTarget::Range(VersionRange::Major),
            false,
        );

        assert!(matches!(
            result,
            Err(CoreError::Version(VersionError::Overflow { .. }))
        ));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "18446744073709551615.0.0\n"
        );
    }

    #[test]
    fn test_rewrite_locate() {
        let mut rewrite = Rewrite::new(b"1.9.9 1.9.9");
        assert!(rewrite.replace(0, 5, b"1.10.0"));
        assert_eq!(rewrite.locate(6, 5), Some(7..12));
        assert_eq!(rewrite.locate(0, 5), Some(0..6));
        assert_eq!(rewrite.locate(2, 3), None);

        let mut rewrite = Rewrite::new(b"1.9.9 1.9.9");
        assert!(rewrite.replace(6, 5, b"2.0.0"));
        assert_eq!(rewrite.locate(4, 5), None);
        assert!(!rewrite.replace(4, 5, b"3.0.0"));
        assert_eq!(rewrite.buffer, b"1.9.9 2.0.0");
        assert_eq!(rewrite.locate(0, 5), Some(0..5));
    }
}
