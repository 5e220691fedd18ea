use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use pathdiff::diff_paths;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::{classify_io, Result, ScoutError};
use crate::app::models::{BuildOptions, SideEffect, TargetAssembly, TargetConfig, TargetSpec};
use crate::app::walker::walk_recursive;

/// Suffix patterns for files that feed the compile list.
pub const SOURCE_SUFFIXES: &[&str] = &["*.cpp", "*.c"];
/// Suffix patterns for files that feed IDE project metadata only.
pub const HEADER_SUFFIXES: &[&str] = &["*.hpp", "*.h"];

/// Assembles per-target build configuration under a fixed root.
pub struct Assembler {
    root: PathBuf,
}

impl Assembler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Collect every file under `root/subfolder` whose name matches one of
    /// the suffix patterns. Patterns apply within a single directory level;
    /// recursion comes from walking the tree, not from the glob. Returned
    /// paths are relative to the root and start with the subfolder.
    ///
    /// An empty suffix list yields an empty set, not an error.
    pub fn resolve_sources(
        &self,
        subfolder: &Path,
        suffixes: &[&str],
    ) -> Result<BTreeSet<PathBuf>> {
        if suffixes.is_empty() {
            return Ok(BTreeSet::new());
        }

        let base = self.root.join(subfolder);
        let mut dirs = walk_recursive(&base)?;
        // The base directory itself always participates.
        dirs.push(PathBuf::new());

        let set = build_suffix_set(suffixes)?;
        let mut matches = BTreeSet::new();
        for dir in &dirs {
            let abs_dir = base.join(dir);
            let entries = fs::read_dir(&abs_dir).map_err(|e| classify_io(&abs_dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| classify_io(&abs_dir, e))?;
                let file_type = entry.file_type().map_err(|e| classify_io(&entry.path(), e))?;
                if !file_type.is_file() {
                    continue;
                }
                let name = entry.file_name();
                if set.is_match(&name) {
                    matches.insert(subfolder.join(dir).join(&name));
                }
            }
        }

        Ok(matches)
    }

    /// Resolve sources and headers for one declared target and build its
    /// configuration. Pure: touches the filesystem read-only and returns
    /// pending side effects instead of applying them.
    pub fn assemble(&self, spec: &TargetSpec, options: &BuildOptions) -> Result<TargetAssembly> {
        let base = self.root.join(&spec.subfolder);
        if !base.is_dir() {
            return Err(ScoutError::Config(format!(
                "target `{}` references missing subfolder `{}`",
                spec.name,
                spec.subfolder.display()
            )));
        }

        let sources = self.resolve_sources(&spec.subfolder, SOURCE_SUFFIXES)?;
        let headers = self.resolve_sources(&spec.subfolder, HEADER_SUFFIXES)?;

        let mut include_paths = Vec::new();
        for path in &spec.include {
            include_paths.push(self.relative_to_root(path));
        }
        let subfolder_include = self.relative_to_root(&spec.subfolder);
        if !include_paths.contains(&subfolder_include) {
            include_paths.push(subfolder_include);
        }

        let effects = vec![
            SideEffect::Install {
                artifact: spec.name.clone(),
                dest: options.install_prefix.join("bin"),
            },
            SideEffect::ProjectFile {
                file_name: format!("{}.vcxproj", spec.name),
            },
        ];

        Ok(TargetAssembly {
            config: TargetConfig {
                name: spec.name.clone(),
                kind: spec.kind,
                include_paths,
                sources,
            },
            headers,
            effects,
        })
    }

    /// Normalize a possibly-absolute path to a root-relative one.
    fn relative_to_root(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            diff_paths(path, &self.root).unwrap_or_else(|| path.to_path_buf())
        } else {
            path.to_path_buf()
        }
    }
}

/// Compile suffix patterns into a single matcher. `*` stays within one
/// path segment.
fn build_suffix_set(suffixes: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for suffix in suffixes {
        builder.add(literal_separator_glob(suffix)?);
    }
    Ok(builder.build()?)
}

fn literal_separator_glob(pattern: &str) -> Result<Glob> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::TargetKind;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> BuildOptions {
        BuildOptions {
            release: false,
            optimize: false,
            verbose: false,
            install_prefix: PathBuf::from("/usr"),
            jobs: 1,
        }
    }

    fn spec(name: &str, kind: TargetKind, subfolder: &str) -> TargetSpec {
        TargetSpec {
            name: name.to_string(),
            kind,
            subfolder: PathBuf::from(subfolder),
            include: Vec::new(),
        }
    }

    fn create_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("a.cpp"), "int main() {}").unwrap();
        fs::write(src.join("sub").join("b.cpp"), "").unwrap();
        fs::write(src.join("sub").join("b.hpp"), "").unwrap();
        fs::write(src.join("readme.md"), "docs").unwrap();
        dir
    }

    #[test]
    fn test_resolve_sources_matches_only_suffixes() {
        let dir = create_project();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let sources = assembler
            .resolve_sources(Path::new("src"), &["*.cpp"])
            .unwrap();

        let expected: BTreeSet<PathBuf> =
            [PathBuf::from("src/a.cpp"), PathBuf::from("src/sub/b.cpp")]
                .into_iter()
                .collect();
        assert_eq!(sources, expected);
    }

    #[test]
    fn test_resolve_sources_idempotent() {
        let dir = create_project();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let first = assembler
            .resolve_sources(Path::new("src"), SOURCE_SUFFIXES)
            .unwrap();
        let second = assembler
            .resolve_sources(Path::new("src"), SOURCE_SUFFIXES)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_sources_empty_suffix_list() {
        let dir = create_project();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let sources = assembler.resolve_sources(Path::new("src"), &[]).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_resolve_sources_star_stays_in_one_segment() {
        let dir = create_project();
        let assembler = Assembler::new(dir.path().to_path_buf());

        // "sub*.cpp" must not swallow the separator in "sub/b.cpp"
        let sources = assembler
            .resolve_sources(Path::new("src"), &["sub*.cpp"])
            .unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_assemble_empty_target_succeeds() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let assembly = assembler
            .assemble(
                &spec("archive", TargetKind::StaticLibrary, "empty"),
                &options(),
            )
            .unwrap();

        assert!(assembly.config.sources.is_empty());
        assert!(assembly.headers.is_empty());
        assert_eq!(assembly.config.kind, TargetKind::StaticLibrary);
        assert_eq!(assembly.config.include_paths, vec![PathBuf::from("empty")]);
    }

    #[test]
    fn test_assemble_missing_subfolder_is_config_error() {
        let dir = TempDir::new().unwrap();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let err = assembler
            .assemble(&spec("ghost", TargetKind::Executable, "nope"), &options())
            .unwrap_err();

        assert!(matches!(err, crate::app::error::ScoutError::Config(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_assemble_separates_sources_and_headers() {
        let dir = create_project();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let assembly = assembler
            .assemble(&spec("bob", TargetKind::Executable, "src"), &options())
            .unwrap();

        assert!(assembly.config.sources.contains(Path::new("src/a.cpp")));
        assert!(!assembly.config.sources.contains(Path::new("src/sub/b.hpp")));
        assert!(assembly.headers.contains(Path::new("src/sub/b.hpp")));
    }

    #[test]
    fn test_assemble_install_effect_uses_prefix() {
        let dir = create_project();
        let assembler = Assembler::new(dir.path().to_path_buf());

        let assembly = assembler
            .assemble(&spec("bob", TargetKind::Executable, "src"), &options())
            .unwrap();

        assert!(assembly.effects.contains(&SideEffect::Install {
            artifact: "bob".to_string(),
            dest: PathBuf::from("/usr/bin"),
        }));
    }

    #[test]
    fn test_independent_assemblies_do_not_share_state() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("one.c"), "").unwrap();
        fs::write(second.join("two.c"), "").unwrap();

        let assembler = Assembler::new(dir.path().to_path_buf());
        let a = assembler
            .assemble(&spec("a", TargetKind::Executable, "first"), &options())
            .unwrap();
        let b = assembler
            .assemble(&spec("b", TargetKind::SharedLibrary, "second"), &options())
            .unwrap();

        assert_eq!(a.config.include_paths, vec![PathBuf::from("first")]);
        assert_eq!(b.config.include_paths, vec![PathBuf::from("second")]);
        assert!(a.config.sources.contains(Path::new("first/one.c")));
        assert!(!a.config.sources.contains(Path::new("second/two.c")));
    }
}
