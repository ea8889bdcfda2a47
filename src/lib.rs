//! MTA Forge: descriptor assembly from YAML fragments
//!
//! Builds an MTA deployment descriptor (`mta.yaml`) and extension descriptors
//! (`*.mtaext`) by merging a `base.yml` with module and resource fragments and
//! applying shared-config overlays to the modules.

pub mod cli;
pub mod collection;
pub mod composer;
pub mod config;
pub mod document;
pub mod error;
pub mod generate;
pub mod loader;
pub mod logging;
pub mod overlay;
pub mod serializer;

pub use collection::NamedCollection;
pub use composer::{DescriptorComposer, Scope};
pub use document::{Document, DocumentKind, Mapping, Scalar};
pub use error::ForgeError;
pub use generate::{GenerationKind, GenerationSummary, Generator};
pub use loader::{FsLoader, Loader};
