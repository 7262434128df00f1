//! Domain primitives, ports and services for the discussion board.
//!
//! Purpose: keep the board's rules independent of transport and storage.
//! Inbound adapters call the driving ports implemented by the services here;
//! the services reach storage only through the driven repository ports.
//!
//! Public surface:
//! - `Post`, `Comment`, `Vote` and friends: the content model, with the vote
//!   transitions implemented on `Post`.
//! - `HexId`: random 24-character hexadecimal identifiers.
//! - `validation`: the declarative request validator.
//! - `BoardError`: domain failures; `Error`: the client-facing envelope.
//! - `PostsService`, `AccountsService`: driving-port implementations.

pub mod accounts_service;
pub mod board_error;
pub mod comment;
pub mod error;
pub mod hex_id;
pub mod ports;
pub mod post;
pub mod posts_service;
pub mod timestamp;
pub mod trace_id;
pub mod user;
pub mod validation;
mod votes;

pub use self::accounts_service::AccountsService;
pub use self::board_error::{BoardError, validation_failure};
pub use self::comment::Comment;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hex_id::{HEX_ID_BYTES, HexId, HexIdError, is_valid_hex_id};
pub use self::post::{
    Category, InvalidVoteValue, NewPost, Post, PostContent, PostKind, UnknownCategory,
    UnknownPostKind, Vote, VoteDirection,
};
pub use self::posts_service::PostsService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Author, Credentials, CredentialsValidationError, PasswordHash, User};
