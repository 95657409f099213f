//! Share a post through the X (Twitter) compose intent.

use anyhow::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Compose-intent endpoint; the post goes in the `text` query parameter
pub const COMPOSE_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Characters escaped in a URI component: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode text as a URI query value
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Build the compose URL for a post, or `None` if there is nothing to share
pub fn compose_url(post: &str) -> Option<String> {
    if post.is_empty() {
        return None;
    }
    Some(format!("{}?text={}", COMPOSE_INTENT_URL, encode_component(post)))
}

/// Open the compose intent for `post` in the system browser.
///
/// Returns the URL that was opened, or `None` when the post is empty.
pub fn share(post: &str) -> Result<Option<String>> {
    share_with(post, |url| open::that(url))
}

/// Like [`share`], with a custom opener
pub fn share_with<F>(post: &str, opener: F) -> Result<Option<String>>
where
    F: FnOnce(&str) -> std::io::Result<()>,
{
    let Some(url) = compose_url(post) else {
        tracing::debug!("Nothing to share");
        return Ok(None);
    };

    opener(&url)?;
    tracing::info!("Opened share intent ({} bytes)", url.len());
    Ok(Some(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_compose_url_japanese() {
        let url = compose_url("テスト投稿").unwrap();
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?text=%E3%83%86%E3%82%B9%E3%83%88%E6%8A%95%E7%A8%BF"
        );
    }

    #[test]
    fn test_empty_post_has_no_url() {
        assert!(compose_url("").is_none());
    }

    #[test]
    fn test_encode_matches_uri_component_rules() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("#タグ"), "%23%E3%82%BF%E3%82%B0");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("1+1?/\n"), "1%2B1%3F%2F%0A");
    }

    #[test]
    fn test_share_opens_url() {
        let opened = RefCell::new(None);
        let url = share_with("テスト投稿", |url| {
            *opened.borrow_mut() = Some(url.to_string());
            Ok(())
        })
        .unwrap();

        assert_eq!(url, opened.into_inner());
        assert!(url.unwrap().contains("text=%E3%83%86%E3%82%B9%E3%83%88%E6%8A%95%E7%A8%BF"));
    }

    #[test]
    fn test_share_empty_is_noop() {
        let result = share_with("", |_| panic!("opener must not be called")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_share_propagates_open_failure() {
        let result = share_with("post", |_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"))
        });
        assert!(result.is_err());
    }
}
