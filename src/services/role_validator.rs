use crate::types::internal::validation::FieldError;

/// Rejects a submission whose role-id list is absent or empty.
///
/// Resolution of the individual ids is deliberately not validated here;
/// RoleService drops unresolvable ids silently.
pub struct RoleValidator;

impl RoleValidator {
    pub fn validate(&self, roles: Option<&[String]>) -> Vec<FieldError> {
        match roles {
            Some(list) if !list.is_empty() => Vec::new(),
            _ => vec![FieldError::new(
                "roles",
                "At least one role must be selected",
            )],
        }
    }
}
