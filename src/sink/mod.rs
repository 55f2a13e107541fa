//! Announcement delivery.

pub mod webhook;

pub use webhook::WebhookSink;

use crate::error::Result;
use crate::types::Announcement;

/// Destination for announcements that cleared the debounce gate.
pub trait AnnouncementSink: Send + Sync {
    /// Deliver one announcement. An error here leaves the debounce table
    /// untouched so the announcement can be retried next cycle.
    fn deliver(
        &self,
        announcement: &Announcement,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
