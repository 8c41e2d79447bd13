use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Score viewers and admins may read everyone's results.
pub fn require_results_access(claims: &Claims) -> AppResult<()> {
    match claims.role {
        UserRole::Admin | UserRole::ScoreViewer => Ok(()),
        UserRole::User => Err(AppError::Forbidden(
            "Only admins and score viewers can view all results".to_string(),
        )),
    }
}

pub fn require_owner_or_results_access(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.sub == resource_owner {
        return Ok(());
    }
    require_results_access(claims)
        .map_err(|_| AppError::Forbidden("You can only access your own results".to_string()))
}
