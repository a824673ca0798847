//! Retry policy for content extraction.

use tracing::{info, warn};

use crate::traits::extractor::ContentExtractor;
use crate::types::article::ExtractedContent;
use crate::types::config::PipelineConfig;

/// Try to extract `url` up to `max_attempts` times.
///
/// A try is accepted only when the body has more than `min_body_chars`
/// characters. Errors and short bodies both consume a try, and every
/// failed try except the last is followed by `retry_delay`. Returns
/// `None` once the tries are exhausted.
pub async fn scrape_with_retries<E>(
    extractor: &E,
    url: &str,
    config: &PipelineConfig,
) -> Option<ExtractedContent>
where
    E: ContentExtractor + ?Sized,
{
    let attempts = config.max_attempts.max(1);

    for attempt in 1..=attempts {
        match extractor.extract(url).await {
            Ok(content) if content.body_chars() > config.min_body_chars => {
                info!(
                    url = %url,
                    attempt,
                    extractor = extractor.name(),
                    method = %content.method,
                    "Extracted article"
                );
                return Some(content);
            }
            Ok(content) => {
                warn!(
                    url = %url,
                    attempt,
                    chars = content.body_chars(),
                    "Extracted content too short"
                );
            }
            Err(e) => {
                warn!(
                    url = %url,
                    attempt,
                    extractor = extractor.name(),
                    error = %e,
                    "Extraction attempt failed"
                );
            }
        }

        if attempt < attempts {
            tokio::time::sleep(config.retry_delay).await;
        }
    }

    warn!(url = %url, attempts, "Giving up on URL");
    None
}
