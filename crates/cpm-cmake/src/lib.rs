//! CMake project editing for the cpm CLI.
//!
//! Finds the place in a `CMakeLists.txt` where CPM.cmake package
//! declarations belong and inserts new ones there without touching the rest
//! of the file. Also discovers project roots and scaffolds new targets.

pub mod error;
pub mod lexer;
pub mod patch;
pub mod project;
pub mod scan;
pub mod target;

// Re-exports for convenience.
pub use error::{CmakeError, Result};
pub use patch::{add_package, declaration_line, insert_declaration};
pub use project::CmakeProject;
pub use scan::{declarations, find_anchor, insertion_point, Declaration};
pub use target::TargetKind;
