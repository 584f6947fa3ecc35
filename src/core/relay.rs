//! Typed publish/subscribe fan-out from the core to the UI processes.
//!
//! There are at most two subscribers (the window chrome and the settings
//! surface). Delivery is synchronous and nothing is queued: a subscriber
//! whose surface does not exist at publish time misses the message.

use crate::core::provider::{active_provider, Provider};
use crate::host::NotificationSink;
use serde::Serialize;
use serde_json::Value;

const CHROME_FALLBACK_ICON: &str = "globe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    ActiveUrlChanged,
    ProvidersChanged,
    SettingsStateChanged,
}

impl Topic {
    /// Name the UI bridge dispatches on.
    pub fn wire_name(self) -> &'static str {
        match self {
            Topic::ActiveUrlChanged => "nav.active",
            Topic::ProvidersChanged => "providers.changed",
            Topic::SettingsStateChanged => "settings.state",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscriber {
    Chrome,
    Settings,
}

#[derive(Debug, Clone, Copy)]
pub enum Notification<'a> {
    ActiveUrl {
        url: &'a str,
        providers: &'a [Provider],
    },
    Providers {
        providers: &'a [Provider],
        default_id: Option<&'a str>,
    },
    SettingsState {
        open: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveUrlPayload<'a> {
    url: &'a str,
    provider_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProvidersPayload<'a> {
    providers: &'a [Provider],
    default_id: Option<&'a str>,
}

/// The chrome's tab bar names the label field `name` and expects an icon.
#[derive(Serialize)]
struct ChromeTab<'a> {
    id: &'a str,
    name: &'a str,
    url: &'a str,
    icon: &'a str,
    pinned: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChromeProvidersPayload<'a> {
    list: Vec<ChromeTab<'a>>,
    default_id: Option<&'a str>,
}

#[derive(Serialize)]
struct SettingsStatePayload {
    open: bool,
}

impl Notification<'_> {
    pub fn topic(&self) -> Topic {
        match self {
            Notification::ActiveUrl { .. } => Topic::ActiveUrlChanged,
            Notification::Providers { .. } => Topic::ProvidersChanged,
            Notification::SettingsState { .. } => Topic::SettingsStateChanged,
        }
    }

    /// Render the payload in the shape `subscriber` consumes.
    pub fn payload_for(&self, subscriber: Subscriber) -> Value {
        let payload = match (*self, subscriber) {
            (Notification::ActiveUrl { url, providers }, _) => {
                serde_json::to_value(ActiveUrlPayload {
                    url,
                    provider_id: active_provider(providers, url).map(|p| p.id.as_str()),
                })
            }
            (
                Notification::Providers {
                    providers,
                    default_id,
                },
                Subscriber::Chrome,
            ) => serde_json::to_value(ChromeProvidersPayload {
                list: providers
                    .iter()
                    .map(|p| ChromeTab {
                        id: &p.id,
                        name: &p.label,
                        url: &p.url,
                        icon: if p.icon.is_empty() {
                            CHROME_FALLBACK_ICON
                        } else {
                            &p.icon
                        },
                        pinned: p.pinned,
                    })
                    .collect(),
                default_id,
            }),
            (
                Notification::Providers {
                    providers,
                    default_id,
                },
                Subscriber::Settings,
            ) => serde_json::to_value(ProvidersPayload {
                providers,
                default_id,
            }),
            (Notification::SettingsState { open }, _) => {
                serde_json::to_value(SettingsStatePayload { open })
            }
        };
        payload.unwrap_or_default()
    }
}

/// Subscription table plus synchronous delivery.
pub struct Relay {
    subscriptions: Vec<(Subscriber, Topic)>,
}

impl Relay {
    pub fn new() -> Self {
        Self {
            subscriptions: vec![
                (Subscriber::Chrome, Topic::ActiveUrlChanged),
                (Subscriber::Chrome, Topic::ProvidersChanged),
                (Subscriber::Chrome, Topic::SettingsStateChanged),
                (Subscriber::Settings, Topic::ProvidersChanged),
                (Subscriber::Settings, Topic::SettingsStateChanged),
            ],
        }
    }

    pub fn is_subscribed(&self, subscriber: Subscriber, topic: Topic) -> bool {
        self.subscriptions.contains(&(subscriber, topic))
    }

    /// Deliver to every subscriber of the notification's topic.
    /// Returns how many subscribers actually received it.
    pub fn publish<S>(&self, sink: &mut S, notification: &Notification<'_>) -> usize
    where
        S: NotificationSink + ?Sized,
    {
        let topic = notification.topic();
        self.subscriptions
            .iter()
            .filter(|(_, t)| *t == topic)
            .filter(|(subscriber, _)| {
                sink.deliver(*subscriber, topic, &notification.payload_for(*subscriber))
            })
            .count()
    }

    /// Deliver to one subscriber only, if it subscribes to the topic.
    pub fn publish_to<S>(
        &self,
        sink: &mut S,
        subscriber: Subscriber,
        notification: &Notification<'_>,
    ) -> bool
    where
        S: NotificationSink + ?Sized,
    {
        let topic = notification.topic();
        self.is_subscribed(subscriber, topic)
            && sink.deliver(subscriber, topic, &notification.payload_for(subscriber))
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}
