//! Visibility-driven, consent-gated, at-most-once mount of the live frame.

use serde::{Deserialize, Serialize};

use crate::config::EmbedConfig;
use crate::consent::{AllowClicked, ConsentGate};
use crate::container::{EmbedContainer, RootMargin, VisibilityEntry, VisibilityObserver};
use crate::frame::EmbedFrame;
use crate::url::EmbedUrlBuilder;

/// What to do with observation after an intersecting signal is declined
/// because consent is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclinePolicy {
    /// Disconnect after the first intersecting signal, mounted or not.
    #[default]
    StopObserving,
    /// Keep observing so a later intersection re-evaluates the gate.
    KeepObserving,
}

/// Controller options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountOptions {
    /// Forward margin for "approaching the viewport".
    #[serde(default)]
    pub root_margin: RootMargin,
    /// Observation policy after a declined signal.
    #[serde(default)]
    pub decline_policy: DeclinePolicy,
    /// Provider URL builder.
    #[serde(skip)]
    pub url_builder: EmbedUrlBuilder,
}

impl MountOptions {
    /// Set the forward margin.
    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Set the decline policy.
    pub fn with_decline_policy(mut self, policy: DeclinePolicy) -> Self {
        self.decline_policy = policy;
        self
    }
}

/// Per-container state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerState {
    /// Whether the live frame has been attached.
    pub mounted: bool,
    /// Consent gate for this container.
    pub consent: ConsentGate,
}

impl ContainerState {
    fn new(consent_required: bool) -> Self {
        Self {
            mounted: false,
            consent: ConsentGate::new(consent_required),
        }
    }

    /// Whether the user has given consent.
    pub fn consent_given(&self) -> bool {
        self.consent.is_given()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observation {
    Observing,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsentListener {
    Unarmed,
    Armed,
    Released,
}

/// Result of a `mount` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The frame was attached by this call.
    Mounted,
    /// The frame was already attached; nothing changed.
    AlreadyMounted,
}

/// Result of delivering visibility signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityDecision {
    /// No intersecting signal, or observation had already stopped.
    Ignored,
    /// Intersecting, but consent is still missing.
    AwaitingConsent,
    /// The signal led to a mount attempt.
    Mount(MountOutcome),
}

/// Result of an allow-control click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    /// No listener armed for this container (or it was already released).
    Ignored,
    /// Consent recorded and a mount attempted.
    Mount(MountOutcome),
}

/// Owns one container's embed lifecycle.
pub struct MountController<C, O> {
    container: C,
    observer: O,
    config: EmbedConfig,
    state: ContainerState,
    options: MountOptions,
    observation: Observation,
    listener: ConsentListener,
}

impl<C, O> MountController<C, O>
where
    C: EmbedContainer,
    O: VisibilityObserver,
{
    /// Read the container's config, start observing and arm the allow control.
    pub fn setup(container: C, mut observer: O, options: MountOptions) -> Self {
        let config = EmbedConfig::from_container(&container);
        observer.observe(options.root_margin);

        let listener = if config.consent_required && container.has_consent_control() {
            ConsentListener::Armed
        } else {
            ConsentListener::Unarmed
        };

        tracing::trace!(
            partner_id = %config.provider_account_id,
            entry_id = %config.media_id,
            consent_required = config.consent_required,
            margin = %options.root_margin.to_css(),
            "embed container observed"
        );

        Self {
            state: ContainerState::new(config.consent_required),
            container,
            observer,
            config,
            options,
            observation: Observation::Observing,
            listener,
        }
    }

    /// Deliver a batch of visibility signals.
    pub fn on_visibility(&mut self, entries: &[VisibilityEntry]) -> VisibilityDecision {
        let mut decision = VisibilityDecision::Ignored;

        for entry in entries {
            if self.observation == Observation::Disconnected {
                break;
            }
            if !entry.is_intersecting {
                continue;
            }
            if !self.state.consent.permits_mount() {
                decision = VisibilityDecision::AwaitingConsent;
                if self.options.decline_policy == DeclinePolicy::StopObserving {
                    self.stop_observing();
                }
                continue;
            }
            return VisibilityDecision::Mount(self.mount());
        }

        decision
    }

    /// Handle a click on the allow control.
    ///
    /// Mounts without waiting for a new visibility signal; the control is only
    /// interactive once the container has been seen.
    pub fn on_consent_click(&mut self) -> ConsentDecision {
        if self.listener != ConsentListener::Armed {
            return ConsentDecision::Ignored;
        }
        self.state.consent.grant(AllowClicked);
        ConsentDecision::Mount(self.mount())
    }

    /// Attach the live frame, at most once.
    pub fn mount(&mut self) -> MountOutcome {
        if self.state.mounted {
            return MountOutcome::AlreadyMounted;
        }
        self.state.mounted = true;

        let src = self.options.url_builder.build_for(&self.config);
        let frame = EmbedFrame::new(src).with_poster(self.config.poster_url.clone());
        self.container.replace_contents(&frame);

        self.stop_observing();
        if self.listener == ConsentListener::Armed {
            self.listener = ConsentListener::Released;
        }

        tracing::debug!(
            partner_id = %self.config.provider_account_id,
            entry_id = %self.config.media_id,
            "embed mounted"
        );

        MountOutcome::Mounted
    }

    fn stop_observing(&mut self) {
        if self.observation == Observation::Observing {
            self.observer.disconnect();
            self.observation = Observation::Disconnected;
        }
    }

    /// Current container state.
    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// The config read at setup.
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Whether visibility signals are still being evaluated.
    pub fn is_observing(&self) -> bool {
        self.observation == Observation::Observing
    }

    /// Whether the allow control is wired and not yet released.
    pub fn is_listening_for_consent(&self) -> bool {
        self.listener == ConsentListener::Armed
    }

    /// The container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Release the container and observer.
    pub fn into_parts(self) -> (C, O) {
        (self.container, self.observer)
    }
}
