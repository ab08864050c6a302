//! Static table of required payload keys per operation and method

use crate::dispatch::{HttpMethod, Operation};

/// Keys a `user` login (GET or POST) must carry
pub const LOGIN_KEYS: &[&str] = &["email", "password"];

/// Keys a `user` registration (PUT) must carry
pub const REGISTER_KEYS: &[&str] = &["fiscalCode", "firstName", "lastName", "email", "password"];

/// Required keys for `(operation, method)`; `None` when the pair has no entry
pub fn required_keys(operation: Operation, method: &HttpMethod) -> Option<&'static [&'static str]> {
    match (operation, method) {
        (Operation::User, HttpMethod::Get | HttpMethod::Post) => Some(LOGIN_KEYS),
        (Operation::User, HttpMethod::Put) => Some(REGISTER_KEYS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entries() {
        assert_eq!(
            required_keys(Operation::User, &HttpMethod::Get),
            Some(LOGIN_KEYS)
        );
        assert_eq!(
            required_keys(Operation::User, &HttpMethod::Post),
            Some(LOGIN_KEYS)
        );
        assert_eq!(
            required_keys(Operation::User, &HttpMethod::Put),
            Some(REGISTER_KEYS)
        );
        assert_eq!(required_keys(Operation::User, &HttpMethod::Delete), None);
    }

    #[test]
    fn test_reserved_operations_have_no_entries() {
        for op in Operation::ALL.into_iter().filter(|op| *op != Operation::User) {
            assert_eq!(required_keys(op, &HttpMethod::Post), None);
            assert_eq!(required_keys(op, &HttpMethod::Put), None);
        }
    }
}
