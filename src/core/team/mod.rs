//! Team data: member records, the per-session profile store, and the HTTP
//! client for the team endpoints.

pub mod client;
pub mod error;
pub mod member;
pub mod page_meta;
pub mod store;

pub use client::{OutgoingMessage, TeamClient};
pub use error::{Result, TeamError};
pub use member::{ContactChannel, MemberId, MemberRecord};
pub use page_meta::PageMeta;
pub use store::ProfileStore;
