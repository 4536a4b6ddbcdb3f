use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating submitted video links
    /// Only YouTube links are accepted, with or without scheme and www
    /// - Valid: "https://www.youtube.com/watch?v=abc", "youtu.be/abc", "http://youtube.com/watch?v=x"
    /// - Invalid: "https://vimeo.com/123", "youtube.com", "not a link"
    pub static ref YOUTUBE_LINK_REGEX: Regex =
        Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+$").unwrap();

    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_link_regex_valid() {
        assert!(YOUTUBE_LINK_REGEX.is_match("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(YOUTUBE_LINK_REGEX.is_match("https://youtube.com/watch?v=abc"));
        assert!(YOUTUBE_LINK_REGEX.is_match("http://youtu.be/abc123"));
        assert!(YOUTUBE_LINK_REGEX.is_match("youtube.com/shorts/xyz"));
        assert!(YOUTUBE_LINK_REGEX.is_match("www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_youtube_link_regex_invalid() {
        assert!(!YOUTUBE_LINK_REGEX.is_match("https://vimeo.com/123456")); // wrong host
        assert!(!YOUTUBE_LINK_REGEX.is_match("https://www.youtube.com/")); // no path
        assert!(!YOUTUBE_LINK_REGEX.is_match("youtube.com")); // no path at all
        assert!(!YOUTUBE_LINK_REGEX.is_match("")); // empty
        assert!(!YOUTUBE_LINK_REGEX.is_match("not a link"));
    }

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("user123"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(USERNAME_REGEX.is_match("JohnDoe"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("123user")); // starts with digit
        assert!(!USERNAME_REGEX.is_match("-user")); // starts with hyphen
        assert!(!USERNAME_REGEX.is_match("user-name")); // hyphen
        assert!(!USERNAME_REGEX.is_match("user name")); // space
        assert!(!USERNAME_REGEX.is_match("")); // empty
    }
}
