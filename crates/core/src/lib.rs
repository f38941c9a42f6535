//! `tallybook-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no transport or storage concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod numeric;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    CompanyId, LedgerId, ProductId, TaxRateId, UserId, VoucherId, VoucherItemId, VoucherTypeId,
};
pub use numeric::{NumericPolicy, parse_decimal, read_number};
pub use value_object::ValueObject;
