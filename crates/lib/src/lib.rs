//! tunimake-lib: incremental compile-and-link driven by a rule file.
//!
//! - [`rules`]: the rule file model ([`rules::BuildSpec`]) and its loader
//! - [`stale`]: timestamp-based staleness detection for object files
//! - [`execute`]: compiler and linker invocation
//! - [`build`]: the driver that sequences a whole run

pub mod build;
pub mod error;
pub mod execute;
pub mod rules;
pub mod stale;


pub use error::{Error, ErrorKind};
