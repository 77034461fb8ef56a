//! Sentiment dictionary client methods

use super::{Envelope, Gateway, GatewayError, RequestConfig};
use crate::types::SentimentWord;

impl Gateway {
    /// The current user's dictionary
    pub async fn sentiment_dict(&self) -> Result<Envelope<Vec<SentimentWord>>, GatewayError> {
        self.call(RequestConfig::get("/sentiment-dict/list")).await
    }

    /// Add a word; it is owned by the current user unless `word.uuid` is set
    pub async fn add_sentiment_word(
        &self,
        mut word: SentimentWord,
    ) -> Result<Envelope<String>, GatewayError> {
        if word.uuid.is_none() {
            word.uuid = Some(self.current_uuid()?);
        }
        let request = RequestConfig::post("/sentiment-dict/add").json(&word)?;
        self.call(request).await
    }

    pub async fn delete_sentiment_word(&self, id: i64) -> Result<Envelope<String>, GatewayError> {
        self.call(RequestConfig::delete(format!("/sentiment-dict/{id}")))
            .await
    }
}
