//! EdPrep Mentorship
//!
//! Application layer for mentor-mentee connections: the store abstraction,
//! its in-memory implementation with demo data, credential hashing and the
//! service that enforces who may read or change what.

pub mod credentials;
pub mod errors;
pub mod memory;
pub mod seed;
pub mod service;
pub mod store;

pub use errors::{MentorshipError, MentorshipResult};
pub use memory::MemoryStore;
pub use service::{ConnectionDetails, ConnectionRequest, MentorListing, MentorshipService};
pub use store::{MentorshipStore, StoreError};
