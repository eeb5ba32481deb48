use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Rejects access to a resource stored under another user's id.
pub fn require_owner(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.sub != resource_owner {
        return Err(AppError::Unauthorized(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}
