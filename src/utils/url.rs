//! URL helpers

/// Join a base URL and an absolute API path without doubling slashes
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode a value for use as a single path segment
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(
            join("http://localhost:4000/", "/api/djs"),
            "http://localhost:4000/api/djs"
        );
        assert_eq!(join("http://h", "api/djs"), "http://h/api/djs");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("Drum & Bass"), "Drum%20%26%20Bass");
        assert_eq!(encode_segment("UK/Garage"), "UK%2FGarage");
        assert_eq!(encode_segment("Techno"), "Techno");
    }
}
