//! Webhook subscriptions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{WebhookRequestMethod, WebhookStatsType};
use crate::tristate::Tristate;
use crate::wire::AdditionalProperties;

/// Registered webhooks keyed by their numeric id.
pub type Webhooks = BTreeMap<i32, Webhook>;

/// An HTTP endpoint the service forwards messages to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    pub name: String,
    /// Target URL.
    pub address: String,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub method: Tristate<WebhookRequestMethod>,
    /// Extra request headers sent with every delivery.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub headers: Tristate<BTreeMap<String, String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Tristate::is_absent")]
    pub stats_type: Tristate<WebhookStatsType>,
}

impl Webhook {
    pub const DEFAULT_METHOD: WebhookRequestMethod = WebhookRequestMethod::Post;
    pub const DEFAULT_STATS_TYPE: WebhookStatsType = WebhookStatsType::Both;

    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            additional_properties: AdditionalProperties::new(),
            name: name.into(),
            address: address.into(),
            method: Tristate::Absent,
            headers: Tristate::Absent,
            stats_type: Tristate::Absent,
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: WebhookRequestMethod) -> Self {
        self.method = method.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.into_value().unwrap_or_default();
        headers.insert(name.into(), value.into());
        self.headers = headers.into();
        self
    }

    #[must_use]
    pub fn with_stats_type(mut self, stats_type: WebhookStatsType) -> Self {
        self.stats_type = stats_type.into();
        self
    }

    /// Effective method, falling back to `POST`.
    pub fn method(&self) -> WebhookRequestMethod {
        self.method.value_or(Self::DEFAULT_METHOD)
    }

    /// Effective subscription, falling back to both message kinds.
    pub fn stats_type(&self) -> WebhookStatsType {
        self.stats_type.value_or(Self::DEFAULT_STATS_TYPE)
    }
}
