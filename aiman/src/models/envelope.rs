use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Every successful response is wrapped as `{"messageContent": {"data": ...}}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope {
    pub message_content: MessageContent,
}

#[derive(Deserialize)]
pub(crate) struct MessageContent {
    pub data: Value,
}

impl Envelope {
    pub fn into_data(self) -> Value {
        self.message_content.data
    }
}

/// Decode the payload of an envelope.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let envelope: Envelope =
            serde_json::from_value(json!({"messageContent": {"data": {"x": 1}}})).unwrap();
        assert_eq!(envelope.into_data(), json!({"x": 1}));
    }

    #[test]
    fn test_reject_bare_payload() {
        assert!(serde_json::from_value::<Envelope>(json!({"data": {"x": 1}})).is_err());
    }
}
