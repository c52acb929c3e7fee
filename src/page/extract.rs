//! Read the embedded payload back out of a generated page

use super::{EmbeddedPayload, CONFIG_ELEMENT_ID};
use crate::error::{Result, SealPageError};

/// Locate and parse the JSON block written by [`assemble`](super::assemble)
pub fn extract_payload(html: &str) -> Result<EmbeddedPayload> {
    let marker = format!("id=\"{}\"", CONFIG_ELEMENT_ID);
    let tag_start = html
        .find(&marker)
        .ok_or_else(|| SealPageError::NotAProtectedPage("payload block not found".into()))?;

    let body_start = html[tag_start..]
        .find('>')
        .map(|i| tag_start + i + 1)
        .ok_or_else(|| SealPageError::NotAProtectedPage("unterminated payload tag".into()))?;

    let body_len = html[body_start..]
        .find("</script>")
        .ok_or_else(|| SealPageError::NotAProtectedPage("unterminated payload block".into()))?;

    let json = html[body_start..body_start + body_len].trim();
    serde_json::from_str(json)
        .map_err(|e| SealPageError::NotAProtectedPage(format!("malformed payload block: {}", e)))
}
