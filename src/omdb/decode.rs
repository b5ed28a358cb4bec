use serde_json::{Map, Value};

/// Key OMDb uses to report failures inside an otherwise normal 200 response
pub const ERROR_KEY: &str = "Error";

/// Raw OMDb body, split on whether it carries an in-band error
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedPayload {
    /// The body had an `Error` key; its value, verbatim
    UpstreamError(String),
    /// Anything else, as an untyped top-level object
    Payload(Map<String, Value>),
}

/// Decode an OMDb response body.
///
/// Bytes that are not a JSON object decode to an empty payload instead of an
/// error, so a garbled body is reported later as a missing field.
#[must_use]
pub fn decode(body: &[u8]) -> DecodedPayload {
    let object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => Map::new(),
    };

    match object.get(ERROR_KEY) {
        Some(Value::String(message)) => DecodedPayload::UpstreamError(message.clone()),
        Some(other) => DecodedPayload::UpstreamError(other.to_string()),
        None => DecodedPayload::Payload(object),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_object() {
        let DecodedPayload::Payload(map) = decode(br#"{"Title":"Tenet","Year":"2020"}"#) else {
            panic!("expected payload");
        };
        assert_eq!(map.get("Title"), Some(&Value::from("Tenet")));
    }

    #[test]
    fn test_decode_keeps_key_order() {
        let DecodedPayload::Payload(map) = decode(br#"{"b":"1","a":"2","c":"3"}"#) else {
            panic!("expected payload");
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_error_key_wins() {
        let body = br#"{"Response":"False","Title":"x","Error":"Movie not found!"}"#;
        assert_eq!(
            decode(body),
            DecodedPayload::UpstreamError("Movie not found!".to_string())
        );
    }

    #[test]
    fn test_non_string_error_is_rendered() {
        assert_eq!(
            decode(br#"{"Error":{"code":7}}"#),
            DecodedPayload::UpstreamError(r#"{"code":7}"#.to_string())
        );
    }

    // Malformed bodies are swallowed on purpose; the translator reports them.
    #[test]
    fn test_malformed_json_decodes_to_empty_payload() {
        let bodies: [&[u8]; 5] = [b"not json", b"", b"{\"Title\":", b"[1,2]", b"\"Error\""];
        for body in bodies {
            assert_eq!(decode(body), DecodedPayload::Payload(Map::new()));
        }
    }
}
