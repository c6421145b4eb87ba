//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire. Amounts travel as strings with
//! two fractional digits; numbers are accepted on input.

pub mod common_dto;
pub mod event_dto;
pub mod transaction_dto;

pub use common_dto::*;
pub use event_dto::*;
pub use transaction_dto::*;
