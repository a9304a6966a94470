//! Core types for the question answering service

pub mod chunk;
pub mod query;
pub mod response;

pub use chunk::Chunk;
pub use query::AskRequest;
pub use response::AskResponse;
