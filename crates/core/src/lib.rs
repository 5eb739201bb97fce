//! Wire models for the netspot control service.
//!
//! Every entity round-trips through [`wire::from_value`] and [`wire::to_value`],
//! keeps unrecognized keys in `additional_properties` and distinguishes an
//! omitted field from an explicit `null` through [`Tristate`].

pub mod config_id;
pub mod configuration;
pub mod enums;
pub mod error;
pub mod number;
pub mod statistics;
pub mod status;
pub mod tristate;
pub mod webhook;
pub mod wire;

pub use config_id::ConfigId;
pub use configuration::{
    InfluxDb1Config, MinerConfig, NetspotConfig, SpotConfig, StatConfig, StatsConfig,
};
pub use enums::{
    AlertStatus, MessageType, ProcessStatus, Stat, WebhookRequestMethod, WebhookStatsType,
};
pub use error::ValidationError;
pub use number::Float;
pub use statistics::{AlarmMessage, DataMessage, Direction, TestAlarmMessage};
pub use status::Status;
pub use tristate::Tristate;
pub use webhook::{Webhook, Webhooks};
pub use wire::AdditionalProperties;
