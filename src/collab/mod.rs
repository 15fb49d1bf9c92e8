//! Collaborative Merger module
//!
//! Round-trips training data through external testers:
//! - Builds shareable packages (instructions + scenario library + corpus)
//! - Merges returned corpora under deterministic conflict rules

pub mod merge;
pub mod package;

pub use merge::{merge_document_with, merge_package, merge_package_with, MergeOptions, MergeReport};
pub use package::{
    build_package, scenario_library, PackageInstructions, ScenarioGroup, ScenarioLibrary,
    TestScenario, TrainingPackage, SCENARIO_LIBRARY_VERSION,
};
