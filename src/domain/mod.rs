//! Domain logic - pure business rules independent of the host

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{Commit, CommitParseError, Note, ParsedCommit, BREAKING_CHANGE};
pub use tag::{Tag, TagFilter};
pub use version::{TagVersion, VersionBump};
