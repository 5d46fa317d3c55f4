//! Console rendering of bump and release results.

use std::fmt::Write;
use std::path::Path;

use verbump_core::{OperationState, VersionBumpResult, VersionReleaseResult, WriteOperation};

/// Renders one section per file with its grouped operations.
pub fn render_results(results: &[VersionBumpResult], root_path: &Path) -> String {
    let mut out = String::new();

    for result in results {
        let path = result.file().path();
        let path = path.strip_prefix(root_path).unwrap_or(path);
        section(&mut out, &path.display().to_string());

        for group in result.grouped_operations() {
            let mut line = describe(group[0]);
            if group.len() > 1 {
                let _ = write!(line, " ({}x)", group.len());
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

fn describe(operation: &WriteOperation) -> String {
    match (operation.state(), operation.source(), operation.target()) {
        (OperationState::Modified, Some(source), Some(target)) => {
            format!("✅ Bumped version from \"{source}\" to \"{target}\"")
        }
        (OperationState::Unmatched, ..) => {
            format!("❓ Unmatched file pattern: {}", operation.pattern())
        }
        _ => "⏩ Skipped file due to unmodified contents".to_string(),
    }
}

/// Renders the release commit and tag.
pub fn render_release(release: &VersionReleaseResult) -> String {
    let mut out = String::new();
    section(&mut out, "Release");

    let files: Vec<_> = release
        .committed_files()
        .iter()
        .map(|file| file.path().display().to_string())
        .collect();

    let _ = writeln!(out, "📦 Committed files: {}", files.join(", "));
    let _ = writeln!(out, "💬 Commit message: {}", release.commit_message());
    let _ = writeln!(out, "🏷️ Tag name: {}", release.tag_name());
    match release.commit_id() {
        Some(id) => {
            let _ = writeln!(out, "🔖 Commit id: {id}");
        }
        None => out.push_str("⏩ No commit created (dry-run mode)\n"),
    }

    out
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbump_config::{FilePattern, FileToModify};
    use verbump_version::Version;

    fn pattern(template: &str) -> FilePattern {
        FilePattern::new(template).unwrap()
    }

    fn modified(source: Version, target: Version) -> WriteOperation {
        WriteOperation::modified(pattern("{%version%}"), source, target, String::new(), 0)
    }

    #[test]
    fn test_render_results() {
        let results = vec![
            VersionBumpResult::new(
                FileToModify::new("package.json", vec![]),
                vec![
                    modified(Version::new(1, 0, 0), Version::new(1, 1, 0)),
                    modified(Version::new(1, 0, 0), Version::new(1, 1, 0)),
                    WriteOperation::skipped(
                        pattern("{%version%}"),
                        Version::new(1, 1, 0),
                        Version::new(1, 1, 0),
                        String::new(),
                        0,
                    ),
                ],
            ),
            VersionBumpResult::new(
                FileToModify::new("/project/docs/index.md", vec![]),
                vec![WriteOperation::unmatched(pattern("release: {%version%}"))],
            ),
        ];

        insta::assert_snapshot!(render_results(&results, Path::new("/project")), @r#"
        package.json
        ------------
        ✅ Bumped version from "1.0.0" to "1.1.0" (2x)
        ⏩ Skipped file due to unmodified contents

        docs/index.md
        -------------
        ❓ Unmatched file pattern: release: {%version%}
        "#);
    }

    #[test]
    fn test_render_results_empty_file() {
        let results = vec![VersionBumpResult::new(
            FileToModify::new("CHANGELOG.md", vec![]),
            vec![],
        )];

        insta::assert_snapshot!(render_results(&results, Path::new("/project")), @r"
        CHANGELOG.md
        ------------
        ");
    }

    #[test]
    fn test_render_release() {
        let release = VersionReleaseResult::new(
            vec![
                FileToModify::new("package.json", vec![]),
                FileToModify::new("composer.json", vec![]),
            ],
            "Release 1.1.0".to_string(),
            "v1.1.0".to_string(),
            Some("0123abcd".to_string()),
        );

        insta::assert_snapshot!(render_release(&release), @r"
        Release
        -------
        📦 Committed files: package.json, composer.json
        💬 Commit message: Release 1.1.0
        🏷️ Tag name: v1.1.0
        🔖 Commit id: 0123abcd
        ");
    }

    #[test]
    fn test_render_release_dry_run() {
        let release = VersionReleaseResult::new(
            vec![FileToModify::new("package.json", vec![])],
            "Release 1.1.0".to_string(),
            "1.1.0".to_string(),
            None,
        );

        insta::assert_snapshot!(render_release(&release), @r"
        Release
        -------
        📦 Committed files: package.json
        💬 Commit message: Release 1.1.0
        🏷️ Tag name: 1.1.0
        ⏩ No commit created (dry-run mode)
        ");
    }
}
