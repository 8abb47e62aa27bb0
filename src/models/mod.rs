//! Data models for conversations and search.
//!
//! - [`Conversation`] / [`Message`] - the chat records being searched
//! - [`SearchFilter`] - structural predicates applied before text matching
//! - [`SearchOptions`] - filter, sort and pagination settings for one query
//! - [`SearchResult`] - a matched message with highlight and context
//!
//! Conversation records use camelCase field names on the wire and accept
//! timestamps as Unix milliseconds or RFC 3339 strings (see
//! [`crate::loaders::deserializers`]).

pub mod conversation;
pub mod search;

pub use conversation::{Attachment, Conversation, Message, Role};
pub use search::{
    DateRange, MessageContext, MessageType, SearchFilter, SearchOptions, SearchResult, SortBy,
    SortOrder,
};
