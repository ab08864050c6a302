/// HTTP status registry for the dispatch layer
///
/// Every failure the dispatcher renders lands in the 4xx range:
/// - 200: success envelopes
/// - 400: default for validation, persistence and unsupported-method failures
/// - 404: unknown operation (only under the `not_found` policy)
/// - 409: store conflicts such as a duplicate registration
pub struct HttpStatus;

impl HttpStatus {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
}

/// Returns true when `code` is a client error status
pub fn is_client_error(code: u16) -> bool {
    (400..=499).contains(&code)
}

/// Picks the status for a failure: an attached 4xx code wins, otherwise the
/// failure kind's default applies
pub fn resolve_status(attached: Option<u16>, default: u16) -> u16 {
    match attached {
        Some(code) if is_client_error(code) => code,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attached_code_wins() {
        assert_eq!(resolve_status(Some(409), HttpStatus::BAD_REQUEST), 409);
    }

    #[test]
    fn test_zero_or_missing_code_falls_back() {
        assert_eq!(resolve_status(Some(0), HttpStatus::BAD_REQUEST), 400);
        assert_eq!(resolve_status(None, HttpStatus::BAD_REQUEST), 400);
    }

    #[test]
    fn test_out_of_range_code_falls_back() {
        assert_eq!(resolve_status(Some(42), HttpStatus::BAD_REQUEST), 400);
        assert_eq!(resolve_status(Some(1000), HttpStatus::NOT_FOUND), 404);
    }

    #[test]
    fn test_non_client_error_code_falls_back() {
        assert_eq!(resolve_status(Some(200), HttpStatus::BAD_REQUEST), 400);
        assert_eq!(resolve_status(Some(302), HttpStatus::BAD_REQUEST), 400);
        assert_eq!(resolve_status(Some(503), HttpStatus::BAD_REQUEST), 400);
        assert_eq!(resolve_status(Some(422), HttpStatus::BAD_REQUEST), 422);
    }
}
