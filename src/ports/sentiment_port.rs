//! Market sentiment port trait.

use crate::domain::error::SignalError;
use crate::domain::market::Sentiment;

pub trait SentimentPort {
    fn fetch_sentiment(&self) -> Result<Sentiment, SignalError>;
}
