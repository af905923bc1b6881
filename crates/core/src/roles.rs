//! Well-known role name constants.
//!
//! These are stored verbatim in the `users.role` column and embedded in JWT
//! claims, so they must match the `ck_users_role` constraint in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USER: &str = "USER";
