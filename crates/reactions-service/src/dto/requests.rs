//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Catalog Requests
// ============================================================================

/// Add a reaction type to the catalog
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReactionTypeRequest {
    #[validate(length(min = 1, max = 12, message = "Reaction type name must be 1-12 characters"))]
    pub name: String,

    #[serde(default)]
    pub uses_animated_icon: bool,

    /// Defaults to the type name
    #[validate(length(min = 1, max = 255, message = "Icon reference must be 1-255 characters"))]
    pub icon_ref: Option<String>,

    /// Defaults to one past the heaviest existing entry
    #[validate(range(min = -1000, max = 1000, message = "Display weight must be between -1000 and 1000"))]
    pub display_weight: Option<i32>,
}

// ============================================================================
// Target Requests
// ============================================================================

/// Register or refresh a content item reactions may point at
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterTargetRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Content subtype, e.g. a node bundle
    #[validate(length(min = 1, max = 64, message = "Bundle must be 1-64 characters"))]
    pub bundle: Option<String>,
}
