//! Scaffolding for new executable and library targets.
//!
//! Each target lives in its own sub-directory of the project root:
//!
//! ```text
//! <root>/<target>/
//!   CMakeLists.txt
//!   src/<target>.cpp
//!   include/<project>/<target>/<target>.hpp   (libraries only)
//! ```
//!
//! and is hooked into the build with `add_subdirectory(<target>)` appended to
//! the root list file.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CmakeError, Result};

/// The kind of target to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Executable,
    Library,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Executable => f.write_str("executable"),
            TargetKind::Library => f.write_str("library"),
        }
    }
}

/// Whether `name` is usable as a target directory and CMake target name.
pub fn is_valid_target_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Turn a project name into a C++ identifier for namespaces.
fn cpp_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn executable_source() -> String {
    r#"#include <iostream>

int main(int argc, char* argv[]) {
  std::cout << "Hello World!" << std::endl;
}
"#
    .to_string()
}

fn executable_list_file(target: &str) -> String {
    format!(
        r#"add_executable(
  {target}

  src/{target}.cpp
)
"#
    )
}

fn library_header(project: &str) -> String {
    let namespace = cpp_identifier(project);
    format!(
        r#"#pragma once

namespace {namespace} {{
  int foo();
}}
"#
    )
}

fn library_source(project: &str, target: &str) -> String {
    let namespace = cpp_identifier(project);
    format!(
        r#"#include "{project}/{target}/{target}.hpp"

namespace {namespace} {{
  int foo() {{
    return 42;
  }}
}}
"#
    )
}

fn library_list_file(project: &str, target: &str) -> String {
    format!(
        r#"add_library(
  {project}-{target}

  include/{project}/{target}/{target}.hpp src/{target}.cpp
)

add_library({project}::{target} ALIAS {project}-{target})

target_include_directories(
  {project}-{target}
  PUBLIC
    include
)
"#
    )
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| CmakeError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| CmakeError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create target `name` of `kind` inside the project at `root` and register
/// it in the root list file. Returns the target directory.
pub fn create_target(root: &Path, project: &str, name: &str, kind: TargetKind) -> Result<PathBuf> {
    if !is_valid_target_name(name) {
        return Err(CmakeError::InvalidTargetName {
            name: name.to_string(),
        });
    }

    let target_dir = root.join(name);
    if target_dir.exists() {
        return Err(CmakeError::TargetExists { path: target_dir });
    }

    let source_dir = target_dir.join("src");
    create_dir(&source_dir)?;
    let source_file = source_dir.join(format!("{name}.cpp"));

    match kind {
        TargetKind::Executable => {
            write(&target_dir.join("CMakeLists.txt"), &executable_list_file(name))?;
            write(&source_file, &executable_source())?;
        }
        TargetKind::Library => {
            write(&target_dir.join("CMakeLists.txt"), &library_list_file(project, name))?;

            let include_dir = target_dir.join("include").join(project).join(name);
            create_dir(&include_dir)?;
            write(&include_dir.join(format!("{name}.hpp")), &library_header(project))?;
            write(&source_file, &library_source(project, name))?;
        }
    }

    let list_file = root.join("CMakeLists.txt");
    let mut file = OpenOptions::new()
        .append(true)
        .open(&list_file)
        .map_err(|e| CmakeError::Write {
            path: list_file.clone(),
            source: e,
        })?;
    write!(file, "\nadd_subdirectory({name})").map_err(|e| CmakeError::Write {
        path: list_file.clone(),
        source: e,
    })?;

    tracing::info!("created {kind} target '{name}' in {}", target_dir.display());
    Ok(target_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "project(demo)\n").unwrap();
        dir
    }

    #[test]
    fn executable_layout() {
        let dir = project_root();
        let target = create_target(dir.path(), "demo", "app", TargetKind::Executable).unwrap();

        assert_eq!(target, dir.path().join("app"));
        assert!(target.join("CMakeLists.txt").is_file());
        assert!(target.join("src/app.cpp").is_file());
        assert!(!target.join("include").exists());

        let list = fs::read_to_string(target.join("CMakeLists.txt")).unwrap();
        assert!(list.contains("add_executable(\n  app\n"));
    }

    #[test]
    fn library_layout() {
        let dir = project_root();
        let target = create_target(dir.path(), "demo", "core", TargetKind::Library).unwrap();

        assert!(target.join("include/demo/core/core.hpp").is_file());
        let source = fs::read_to_string(target.join("src/core.cpp")).unwrap();
        assert!(source.starts_with("#include \"demo/core/core.hpp\""));

        let list = fs::read_to_string(target.join("CMakeLists.txt")).unwrap();
        assert!(list.contains("add_library(demo::core ALIAS demo-core)"));
    }

    #[test]
    fn registers_subdirectory() {
        let dir = project_root();
        create_target(dir.path(), "demo", "app", TargetKind::Executable).unwrap();
        create_target(dir.path(), "demo", "core", TargetKind::Library).unwrap();

        let root_list = fs::read_to_string(dir.path().join("CMakeLists.txt")).unwrap();
        assert_eq!(
            root_list,
            "project(demo)\n\nadd_subdirectory(app)\nadd_subdirectory(core)"
        );
    }

    #[test]
    fn refuses_existing_directory() {
        let dir = project_root();
        fs::create_dir(dir.path().join("app")).unwrap();

        let result = create_target(dir.path(), "demo", "app", TargetKind::Executable);
        assert!(matches!(result, Err(CmakeError::TargetExists { .. })));
    }

    #[test]
    fn rejects_bad_names() {
        let dir = project_root();
        for bad in ["", "../escape", "a b", "x/y"] {
            let result = create_target(dir.path(), "demo", bad, TargetKind::Library);
            assert!(matches!(result, Err(CmakeError::InvalidTargetName { .. })));
        }
    }

    #[test]
    fn namespace_is_identifier() {
        assert_eq!(cpp_identifier("my-project"), "my_project");
        assert_eq!(cpp_identifier("3d"), "_3d");
        assert!(library_header("my-project").contains("namespace my_project {"));
    }
}
