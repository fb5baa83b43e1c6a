use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleError {
    /// The role registration depends on is missing from the store. The
    /// seed migration should have created it.
    #[error("Default role missing: {name}")]
    DefaultRoleMissing { name: String },

    #[error("Role already exists: {name}")]
    DuplicateRole { name: String },
}
