//! Unit tests for storage error types

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use std::error::Error;

    #[test]
    fn test_unavailable_error() {
        let error = DbError::Unavailable("read-only filesystem".to_string());
        assert_eq!(error.to_string(), "Storage unavailable: read-only filesystem");
    }

    #[test]
    fn test_serialize_error_from_json() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let error: DbError = json_err.into();
        assert!(error.to_string().starts_with("Error during serialization"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = DbError::Unavailable("locked".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Unavailable"));
        assert!(debug.contains("locked"));
    }

    #[test]
    fn test_unavailable_has_no_source() {
        let error = DbError::Unavailable("gone".to_string());
        assert!(error.source().is_none());
    }
}
