/// Errors that can occur while talking to the mod catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse catalog response: {message}. Response: {excerpt}")]
    Parse { message: String, excerpt: String },

    #[error("Catalog entry {0} not found")]
    NotFound(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// First `max` bytes of a response body, cut on a char boundary.
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("short", 200), "short");
        assert_eq!(excerpt("abcdef", 3), "abc");
        // 'é' is two bytes; cutting at 2 would split it
        assert_eq!(excerpt("aé", 2), "a");
    }
}
