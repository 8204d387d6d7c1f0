/// Session token seam.
///
/// Token minting and storage belong to the authentication system; the
/// panel only asks "is there a token right now". With none, neither a
/// fetch nor a realtime connection is attempted.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token handed in at construction time (or none at all)
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(
            StaticToken::new(Some("abc".into())).token().as_deref(),
            Some("abc")
        );
        assert!(StaticToken::new(None).token().is_none());
    }

    #[test]
    fn test_empty_token_is_no_token() {
        assert!(StaticToken::new(Some(String::new())).token().is_none());
    }
}
