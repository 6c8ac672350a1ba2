//! Chat endpoint URL derivation.

use url::Url;

use crate::{domain::ConversationKey, error::ChatError};

/// Derive the WebSocket URL of a conversation from the REST base URL.
///
/// `https` becomes `wss` and `http` becomes `ws`; the base path is replaced by
/// `/v1/listings/{listing_id}/chat/{receiver_id}` and the token is set as the
/// `token` query parameter (other query parameters are kept).
pub fn build_chat_url(api_base_url: &str, key: &ConversationKey) -> Result<Url, ChatError> {
    let mut url = Url::parse(api_base_url).map_err(|source| ChatError::InvalidBaseUrl {
        url: api_base_url.to_string(),
        source,
    })?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(ChatError::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(scheme)
        .map_err(|_| ChatError::UnsupportedScheme(scheme.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| ChatError::CannotBeABase(api_base_url.to_string()))?
        .clear()
        .extend([
            "v1",
            "listings",
            key.listing_id.as_str(),
            "chat",
            key.receiver_id.as_str(),
        ]);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != "token")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("token", key.token.as_str());

    Ok(url)
}
