//! Domain Services

use crate::domain::value_objects::ReelToken;

/// Public link for a reel: `{base}/{token}` with no doubled slash
pub fn share_link(base_url: &str, token: &ReelToken) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), token)
}

/// Distinct tokens in first-seen order
pub fn distinct_tokens<'a>(tokens: impl IntoIterator<Item = &'a ReelToken>) -> Vec<ReelToken> {
    let mut seen = std::collections::HashSet::new();
    tokens
        .into_iter()
        .filter(|t| seen.insert(*t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link() {
        let token = ReelToken::from_stored("k3x9q0");
        assert_eq!(share_link("http://localhost:3000", &token), "http://localhost:3000/k3x9q0");
        assert_eq!(share_link("https://reels.example.com//", &token), "https://reels.example.com/k3x9q0");
    }

    #[test]
    fn test_distinct_tokens() {
        let a = ReelToken::from_stored("aaaaaa");
        let b = ReelToken::from_stored("bbbbbb");
        assert_eq!(distinct_tokens([&b, &a, &b]), vec![b.clone(), a.clone()]);
        assert!(distinct_tokens([]).is_empty());
    }
}
