//! Accessibility classification.
//!
//! A symbol is API-visible when code outside its assembly can see it: public, protected
//! (`family`) or protected internal (`family-or-assembly`). Nested types use their nested
//! equivalents, which [`TypeVisibility::tier`] already folds into the same tiers.

use crate::metadata::flags::{MemberAccess, TypeVisibility, VisibilityTier};

/// Returns `true` for the public, family and family-or-assembly tiers
#[must_use]
pub fn is_api_visible(tier: VisibilityTier) -> bool {
    matches!(
        tier,
        VisibilityTier::Public | VisibilityTier::Family | VisibilityTier::FamilyOrAssembly
    )
}

/// API visibility of a type, judged on its own visibility
#[must_use]
pub fn type_is_api_visible(visibility: TypeVisibility) -> bool {
    is_api_visible(visibility.tier())
}

/// API visibility of a method or field
#[must_use]
pub fn member_is_api_visible(access: MemberAccess) -> bool {
    is_api_visible(access.tier())
}
