//! # strproc - Ordered String Filter Pipelines
//!
//! A processor type is declared once as an ordered list of members. Members
//! tagged as filters are collected at build time, in declaration order, and
//! every instance threads its input through them.
//!
//! ## Features
//!
//! - **Explicit tagging**: `filter` members join the pipeline, `method` members never do
//! - **Declaration order**: filters run exactly in the order they were declared
//! - **Shared, immutable pipelines**: instances share one collected filter list
//! - **Config-driven**: processor types can be declared by filter name in TOML/JSON/YAML
//!
//! ## Quick Start
//!
//! ```
//! use strproc::processor::ProcessorType;
//! use strproc::filter::builtin;
//!
//! let kind = ProcessorType::<()>::builder("my_string_processor")
//!     .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
//!     .filter("remove_double_spaces", |_, s| Ok(builtin::remove_double_spaces(s)))
//!     .build();
//!
//! let processor = kind.instance(());
//! assert_eq!(processor.process("a test  string").unwrap(), "A test string");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod processor;

pub use cli::Cli;
pub use config::StrprocConfig;
pub use error::{FilterError, Result};
pub use filter::{Filter, FilterRegistry, Member};
pub use processor::{Processor, ProcessorType, ProcessorTypeBuilder};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
