use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// MyMemory public API. Free, keyless, rate limited per IP.
#[derive(Debug, Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl MyMemoryTranslator {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

/// Translated text out of a MyMemory response body.
///
/// `responseStatus` is sometimes a number and sometimes a string.
fn parse_response(json: &Value) -> Result<(String, Option<f32>), TranslateError> {
    let status = match &json["responseStatus"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    match status {
        Some(200) => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        _ => {
            let details = json["responseDetails"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string();
            return Err(TranslateError::ApiError(details));
        }
    }

    let text = json["responseData"]["translatedText"]
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(TranslateError::EmptyResult)?;
    let confidence = json["responseData"]["match"].as_f64().map(|m| m as f32);

    Ok((text.to_string(), confidence))
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }
        if !self
            .supported_languages()
            .iter()
            .any(|(f, t)| *f == from && *t == to)
        {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let langpair = format!("{from}|{to}");
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;
        let (text, confidence) = parse_response(&json)?;

        tracing::debug!("MyMemory {langpair}: {} chars back", text.chars().count());
        Ok(Translation {
            text,
            from,
            to,
            provider: "mymemory".to_string(),
            confidence,
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![
            ("en".to_string(), "zh-CN".to_string()),
            ("zh-CN".to_string(), "en".to_string()),
        ]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_successful_response() {
        let body = json!({
            "responseData": {"translatedText": " 矮人挖掘 ", "match": 0.85},
            "responseStatus": 200,
        });
        let (text, confidence) = parse_response(&body).expect("valid response");
        assert_eq!(text, "矮人挖掘");
        assert_eq!(confidence, Some(0.85));
    }

    #[test]
    fn test_error_status_carries_details() {
        let body = json!({
            "responseData": {"translatedText": "INVALID LANGUAGE PAIR"},
            "responseStatus": "403",
            "responseDetails": "INVALID LANGUAGE PAIR",
        });
        match parse_response(&body) {
            Err(TranslateError::ApiError(details)) => assert_eq!(details, "INVALID LANGUAGE PAIR"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_quota_and_empty_results() {
        let body = json!({"responseStatus": 429});
        assert!(matches!(parse_response(&body), Err(TranslateError::RateLimitExceeded)));

        let body = json!({"responseData": {"translatedText": ""}, "responseStatus": 200});
        assert!(matches!(parse_response(&body), Err(TranslateError::EmptyResult)));
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_any_request() {
        let translator =
            MyMemoryTranslator::new("http://127.0.0.1:9/get", Duration::from_secs(1))
                .expect("client builds");
        let result = translator
            .translate("   ", "en".to_string(), "zh-CN".to_string())
            .await;
        assert!(matches!(result, Err(TranslateError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_unknown_pair_is_rejected_before_any_request() {
        let translator =
            MyMemoryTranslator::new("http://127.0.0.1:9/get", Duration::from_secs(1))
                .expect("client builds");
        let result = translator
            .translate("The dwarf digs.", "en".to_string(), "fr".to_string())
            .await;
        match result {
            Err(TranslateError::UnsupportedLanguagePair { from, to }) => {
                assert_eq!((from.as_str(), to.as_str()), ("en", "fr"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
