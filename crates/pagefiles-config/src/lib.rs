//! Page-files plugin configuration
//!
//! Resolves the two user-facing configuration channels (options passed to the
//! plugin and the plugin's section of the build tool config) into a single
//! validated `ResolvedConfig`, and holds it for the rest of the build session.

pub mod errors;
pub mod resolver;
pub mod schema;
pub mod session;
pub mod types;

pub use errors::{ConfigError, ConfigOrigin, InternalInvariantError, ValidationError};
pub use resolver::{merge, parse_input, resolve};
pub use schema::{FieldRule, Schema, Shape, RESOLVED_SCHEMA, USER_SCHEMA};
pub use session::ConfigSession;
pub use types::{
    PrerenderOptions, PrerenderSetting, RawConfigInput, RawPrerender, ResolvedConfig,
    ResolvedPrerenderOptions,
};
