use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

const DATA_URL_MARKER: &str = "base64,";

/// Decodes image evidence sent by the client. Data URLs are accepted; only the
/// payload after the first `base64,` marker is decoded. An empty string means
/// no evidence was attached.
pub fn decode_image_data(raw: &str) -> Result<Option<Vec<u8>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let payload = match raw.split_once(DATA_URL_MARKER) {
        Some((_, payload)) => payload,
        None => raw,
    };

    STANDARD
        .decode(payload)
        .map(Some)
        .map_err(|_| Error::BadRequest("Invalid image data".to_string()))
}

/// Serde adapter rendering optional image bytes as standard base64.
pub mod base64_opt {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
