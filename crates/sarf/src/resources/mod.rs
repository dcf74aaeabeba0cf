//! resources module
pub mod morpheme_resources;
pub mod resource_manager;
pub mod script;
pub mod template;

/// Re-export
pub use morpheme_resources::{
  Lexicon, MorphemeResources, PriorTable, Priors, ResourceTables, RunTable,
};
pub use resource_manager::{ResourceManager, default_bundle_path};
pub use script::{Script, ScriptKind};
pub use template::{NoTemplates, PatternTemplateMatcher, TemplateMatcher};
