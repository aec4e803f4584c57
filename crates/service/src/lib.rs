//! Service layer: file-backed repository catalog and daily issue snapshots.
//! - Every operation goes back to durable storage; nothing is cached between calls.
//! - Mutations are serialized per backing file (see `storage::json_list_store`).

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod repos;
pub mod issues;
