//! Company scoping for voucher listing and submission.

use tallybook_core::{CompanyId, DomainError, DomainResult};

use crate::CurrentUser;

/// Company filter to apply when listing vouchers.
///
/// - An admin only ever sees their own company.
/// - A global admin may narrow the list by picking a company; a blank or
///   non-numeric pick means "all companies".
/// - Everyone else gets whatever the backend scopes for them (no filter).
pub fn listing_company_filter(user: &CurrentUser, requested: &str) -> Option<CompanyId> {
    if user.is_admin() {
        return user.company_id;
    }
    if user.is_global_admin() {
        return CompanyId::parse_optional(requested).ok().flatten();
    }
    None
}

/// Company to attach to a voucher being saved.
///
/// A global admin must choose a company explicitly; an admin's own company is
/// attached automatically.
pub fn submission_company(
    user: &CurrentUser,
    selected: Option<&str>,
) -> DomainResult<Option<CompanyId>> {
    if user.is_global_admin() {
        let raw = selected.unwrap_or_default();
        return match CompanyId::parse_optional(raw) {
            Ok(Some(id)) => Ok(Some(id)),
            Ok(None) => Err(DomainError::validation("company is required")),
            Err(_) => Err(DomainError::invalid_field(None, "companyProfileId", raw)),
        };
    }
    if user.is_admin() {
        if user.company_id.is_none() {
            tracing::warn!(username = %user.username, "admin has no company; saving unscoped");
        }
        return Ok(user.company_id);
    }
    Ok(None)
}
