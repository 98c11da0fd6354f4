use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::model::roster::RosterPage;
use log::{error, info};

use super::compositor::RenderedPage;
use crate::error::{OrderError, OrderResult};
use crate::services::assets::AssetStore;

/// Uploads rendered pages in order.
///
/// The first failed upload aborts the whole publication; pages uploaded
/// before it are not reported.
pub async fn publish(
    pages: Vec<RenderedPage>,
    store: &dyn AssetStore,
    folder: &str,
) -> OrderResult<Vec<RosterPage>> {
    let mut published = Vec::with_capacity(pages.len());
    for (index, page) in pages.into_iter().enumerate() {
        let number = index + 1;
        let payload = BASE64.encode(&page.image_bytes);
        let url = store.upload(&payload, folder).await.map_err(|e| {
            error!("Upload of page {number} failed: {e}");
            OrderError::ImagePublishFailed {
                page: number,
                reason: e.to_string(),
            }
        })?;
        published.push(RosterPage {
            url,
            label: page.sequence_label,
        });
    }
    info!("Published {} roster page(s) to {}", published.len(), folder);
    Ok(published)
}
