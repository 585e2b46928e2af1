//! `cpm configure` and `cpm build`: drive CMake for the current project.

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use cpm_cmake::CmakeProject;

use super::run_tool;

/// CMake build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    fn cmake_name(self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

/// Arguments for `cmake -S <root> -B <root>/build`.
fn configure_args(project: &CmakeProject, build_type: Option<BuildType>) -> Vec<String> {
    let mut args = vec![
        "-S".to_string(),
        project.root.to_string_lossy().into_owned(),
        "-B".to_string(),
        project.build_dir().to_string_lossy().into_owned(),
    ];
    if let Some(build_type) = build_type {
        args.push(format!("-DCMAKE_BUILD_TYPE={}", build_type.cmake_name()));
    }
    args
}

/// Arguments for `cmake --build <root>/build`.
fn build_args(project: &CmakeProject, build_type: Option<BuildType>) -> Vec<String> {
    let mut args = vec![
        "--build".to_string(),
        project.build_dir().to_string_lossy().into_owned(),
    ];
    if let Some(build_type) = build_type {
        args.push("--config".to_string());
        args.push(build_type.cmake_name().to_string());
    }
    args
}

fn cmake(args: &[String]) -> Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_tool("cmake", &args, None)
}

/// Run `cpm configure [debug|release]`.
pub fn configure(cwd: &Path, build_type: Option<BuildType>) -> Result<()> {
    let project = super::require_project(cwd)?;
    cmake(&configure_args(&project, build_type))
}

/// Run `cpm build [debug|release]`, configuring first when the build
/// directory does not exist yet.
pub fn build(cwd: &Path, build_type: Option<BuildType>) -> Result<()> {
    let project = super::require_project(cwd)?;
    if !project.build_dir().is_dir() {
        tracing::info!("no build directory yet, configuring first");
        cmake(&configure_args(&project, build_type))?;
    }
    cmake(&build_args(&project, build_type))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn project() -> CmakeProject {
        CmakeProject {
            root: PathBuf::from("/work/demo"),
            name: "Demo".to_string(),
        }
    }

    #[test]
    fn configure_arguments() {
        assert_eq!(
            configure_args(&project(), None),
            ["-S", "/work/demo", "-B", "/work/demo/build"]
        );
        assert_eq!(
            configure_args(&project(), Some(BuildType::Release)),
            [
                "-S",
                "/work/demo",
                "-B",
                "/work/demo/build",
                "-DCMAKE_BUILD_TYPE=Release"
            ]
        );
    }

    #[test]
    fn build_arguments() {
        assert_eq!(build_args(&project(), None), ["--build", "/work/demo/build"]);
        assert_eq!(
            build_args(&project(), Some(BuildType::Debug)),
            ["--build", "/work/demo/build", "--config", "Debug"]
        );
    }

    #[test]
    fn configure_outside_project() {
        let dir = tempfile::tempdir().unwrap();
        assert!(configure(dir.path(), None).is_err());
        assert!(build(dir.path(), Some(BuildType::Debug)).is_err());
    }
}
