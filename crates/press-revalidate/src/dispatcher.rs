//! Status transition → revalidation request.

use std::sync::Arc;

use http::StatusCode;
use press_core::{ContentHandle, ContentStatus, ContentTransitionEvent};

use crate::config::RevalidateConfig;
use crate::error::DispatchError;
use crate::path::{default_path, PathFilter};
use crate::request::{OutboundRequest, RevalidationRequest};
use crate::transport::{HttpTransport, Transport};

/// Why a transition did not qualify for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The item came from `inherit` (revisions and attachments).
    InheritedStatus,
    /// The item is a stored revision.
    Revision,
    /// The item did not land on `publish`.
    NotPublished,
}

/// Result of handling one status transition.
///
/// Failures are reported here, never raised: publishing must not fail
/// because revalidation did.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The transition does not trigger revalidation.
    Skipped(SkipReason),
    /// Secret or endpoint not configured.
    Disabled,
    /// The endpoint answered 200.
    Delivered {
        /// Path that was revalidated.
        path: String,
    },
    /// The request was attempted and failed.
    Failed {
        /// Path that should have been revalidated.
        path: String,
        /// What went wrong.
        error: DispatchError,
    },
}

impl DispatchOutcome {
    /// Whether a request left the process.
    pub fn was_attempted(&self) -> bool {
        match self {
            Self::Delivered { .. } => true,
            Self::Failed { error, .. } => !matches!(error, DispatchError::Encode(_)),
            Self::Skipped(_) | Self::Disabled => false,
        }
    }

    /// Whether the endpoint acknowledged the request.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// Short label for reporting.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Disabled => "disabled",
            Self::Delivered { .. } => "delivered",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Tells the rendering tier to regenerate published content.
///
/// Each qualifying transition sends exactly one request; there is no queue,
/// deduplication or retry.
pub struct RevalidationDispatcher<T = HttpTransport> {
    config: RevalidateConfig,
    transport: T,
    path_filter: Option<Arc<dyn PathFilter>>,
}

impl<T: Transport> RevalidationDispatcher<T> {
    /// Create a dispatcher from resolved configuration.
    pub fn new(config: RevalidateConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            path_filter: None,
        }
    }

    /// Install a path override.
    pub fn with_path_filter<F: PathFilter + 'static>(mut self, filter: F) -> Self {
        self.path_filter = Some(Arc::new(filter));
        self
    }

    /// Decide whether a transition qualifies. Checks run in a fixed order.
    pub fn qualifies(&self, event: &ContentTransitionEvent) -> Result<(), SkipReason> {
        if event.previous_status == ContentStatus::Inherit {
            return Err(SkipReason::InheritedStatus);
        }
        if event.content.is_revision() {
            return Err(SkipReason::Revision);
        }
        if !event.lands_on_publish() {
            return Err(SkipReason::NotPublished);
        }
        Ok(())
    }

    /// Path to revalidate for a content item, after the optional override.
    pub fn resolve_path(&self, content: &ContentHandle) -> String {
        let path = default_path(&self.config.route_prefix, content);
        match &self.path_filter {
            Some(filter) => filter.filter(path, content),
            None => path,
        }
    }

    /// Handle one status transition.
    pub async fn on_status_transition(&self, event: &ContentTransitionEvent) -> DispatchOutcome {
        if let Err(reason) = self.qualifies(event) {
            tracing::trace!(
                target: "press::revalidate",
                content_id = event.content.id,
                from = %event.previous_status,
                to = %event.new_status,
                reason = ?reason,
                "transition skipped"
            );
            return DispatchOutcome::Skipped(reason);
        }

        let path = self.resolve_path(&event.content);

        let Some((secret, endpoint)) = self.config.target() else {
            return DispatchOutcome::Disabled;
        };

        let request = match OutboundRequest::post(endpoint)
            .json(&RevalidationRequest::new(path.clone(), secret))
        {
            Ok(request) => request.timeout(self.config.timeout),
            Err(e) => return self.failed(event, path, DispatchError::Encode(e)),
        };

        match self.transport.send(request).await {
            Ok(status) if status == StatusCode::OK => DispatchOutcome::Delivered { path },
            Ok(status) => self.failed(event, path, DispatchError::UnexpectedStatus(status)),
            Err(e) => self.failed(event, path, DispatchError::Transport(e)),
        }
    }

    fn failed(
        &self,
        event: &ContentTransitionEvent,
        path: String,
        error: DispatchError,
    ) -> DispatchOutcome {
        match error.status() {
            Some(status) => tracing::error!(
                target: "press::revalidate",
                content_id = event.content.id,
                path = %path,
                status = status.as_u16(),
                "non-200 from revalidate endpoint"
            ),
            None => tracing::error!(
                target: "press::revalidate",
                content_id = event.content.id,
                path = %path,
                error = %error,
                "revalidation request failed"
            ),
        }
        DispatchOutcome::Failed { path, error }
    }

    /// The resolved configuration.
    pub fn config(&self) -> &RevalidateConfig {
        &self.config
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
