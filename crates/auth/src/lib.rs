//! `tallybook-auth`: the acting user, passed explicitly.
//!
//! Nothing here reads ambient session state: handlers that care about who is
//! acting take a [`CurrentUser`] parameter.

pub mod principal;
pub mod roles;
pub mod scope;

pub use principal::CurrentUser;
pub use roles::Role;
pub use scope::{listing_company_filter, submission_company};
