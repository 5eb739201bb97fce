//! Detector configuration entities.
//!
//! Optional fields are [`Tristate`]s: leaving one [`Tristate::Absent`] lets the
//! service apply its own default, which the accessor methods report.

use serde::{Deserialize, Serialize};

use crate::enums::Stat;
use crate::number::Float;
use crate::tristate::Tristate;
use crate::wire::AdditionalProperties;

/// Device capture settings, the `configuration` section of a [`NetspotConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerConfig {
    /// Keys not declared by this schema.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Human-readable configuration name.
    pub name: String,

    /// Capture device (service default `any`).
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub device: Tristate<String>,

    /// Promiscuous capture (service default `true`).
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub promiscuous: Tristate<bool>,

    /// Whether the detector runs (service default `true`).
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub enabled: Tristate<bool>,
}

impl MinerConfig {
    pub const DEFAULT_DEVICE: &'static str = "any";
    pub const DEFAULT_PROMISCUOUS: bool = true;
    pub const DEFAULT_ENABLED: bool = true;

    /// A configuration with only the required name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            additional_properties: AdditionalProperties::new(),
            name: name.into(),
            device: Tristate::Absent,
            promiscuous: Tristate::Absent,
            enabled: Tristate::Absent,
        }
    }

    /// Set the capture device.
    #[must_use]
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Tristate::Value(device.into());
        self
    }

    /// Effective capture device.
    pub fn device(&self) -> &str {
        self.device
            .as_value()
            .map_or(Self::DEFAULT_DEVICE, String::as_str)
    }

    /// Effective promiscuous flag.
    pub fn promiscuous(&self) -> bool {
        self.promiscuous
            .as_ref()
            .copied()
            .value_or(Self::DEFAULT_PROMISCUOUS)
    }

    /// Effective enabled flag.
    pub fn enabled(&self) -> bool {
        self.enabled.as_ref().copied().value_or(Self::DEFAULT_ENABLED)
    }
}

/// `InfluxDB` 1.x exporter settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluxDb1Config {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Export data messages.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub data: Tristate<bool>,
    /// Export alarm messages.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub alarm: Tristate<bool>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub address: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub database: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub username: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub password: Tristate<String>,
    /// Points written per batch.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub batch_size: Tristate<i32>,
    /// Tag identifying this agent in exported series.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub agent_name: Tristate<String>,
}

impl InfluxDb1Config {
    pub const DEFAULT_ADDRESS: &'static str = "http://127.0.0.1:8086";
    pub const DEFAULT_DATABASE: &'static str = "netspot";
    pub const DEFAULT_USERNAME: &'static str = "netspot";
    pub const DEFAULT_PASSWORD: &'static str = "netspot";
    pub const DEFAULT_BATCH_SIZE: i32 = 10;
    pub const DEFAULT_AGENT_NAME: &'static str = "local";

    pub fn data(&self) -> bool {
        self.data.as_ref().copied().value_or(false)
    }

    pub fn alarm(&self) -> bool {
        self.alarm.as_ref().copied().value_or(false)
    }

    pub fn address(&self) -> &str {
        str_or(&self.address, Self::DEFAULT_ADDRESS)
    }

    pub fn database(&self) -> &str {
        str_or(&self.database, Self::DEFAULT_DATABASE)
    }

    pub fn username(&self) -> &str {
        str_or(&self.username, Self::DEFAULT_USERNAME)
    }

    pub fn password(&self) -> &str {
        str_or(&self.password, Self::DEFAULT_PASSWORD)
    }

    pub fn batch_size(&self) -> i32 {
        self.batch_size
            .as_ref()
            .copied()
            .value_or(Self::DEFAULT_BATCH_SIZE)
    }

    pub fn agent_name(&self) -> &str {
        str_or(&self.agent_name, Self::DEFAULT_AGENT_NAME)
    }
}

fn str_or<'a>(field: &'a Tristate<String>, default: &'a str) -> &'a str {
    field.as_value().map_or(default, String::as_str)
}

/// SPOT anomaly-detector tuning shared by every statistic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotConfig {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Number of observations in the drift window.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub depth: Tristate<i32>,
    /// Anomaly probability threshold.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub q: Tristate<Float>,
    /// Observations used for calibration.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub n_init: Tristate<i32>,
    /// Quantile level of the excess threshold.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub level: Tristate<Float>,
    /// Watch the upper tail.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub up: Tristate<bool>,
    /// Watch the lower tail.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub down: Tristate<bool>,
    /// Raise alarms on breach.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub alert: Tristate<bool>,
    /// Bound the number of stored excesses.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub bounded: Tristate<bool>,
    /// Maximum stored excesses when bounded.
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub max_excess: Tristate<i32>,
}

impl SpotConfig {
    pub const DEFAULT_DEPTH: i32 = 50;
    pub const DEFAULT_Q: f64 = 1e-4;
    pub const DEFAULT_N_INIT: i32 = 1000;
    pub const DEFAULT_LEVEL: f64 = 0.8;
    pub const DEFAULT_UP: bool = true;
    pub const DEFAULT_DOWN: bool = false;
    pub const DEFAULT_ALERT: bool = true;
    pub const DEFAULT_BOUNDED: bool = true;
    pub const DEFAULT_MAX_EXCESS: i32 = 200;

    pub fn depth(&self) -> i32 {
        self.depth.as_ref().copied().value_or(Self::DEFAULT_DEPTH)
    }

    pub fn q(&self) -> f64 {
        self.q.as_value().map_or(Self::DEFAULT_Q, Float::as_f64)
    }

    pub fn n_init(&self) -> i32 {
        self.n_init.as_ref().copied().value_or(Self::DEFAULT_N_INIT)
    }

    pub fn level(&self) -> f64 {
        self.level.as_value().map_or(Self::DEFAULT_LEVEL, Float::as_f64)
    }

    pub fn up(&self) -> bool {
        self.up.as_ref().copied().value_or(Self::DEFAULT_UP)
    }

    pub fn down(&self) -> bool {
        self.down.as_ref().copied().value_or(Self::DEFAULT_DOWN)
    }

    pub fn alert(&self) -> bool {
        self.alert.as_ref().copied().value_or(Self::DEFAULT_ALERT)
    }

    pub fn bounded(&self) -> bool {
        self.bounded.as_ref().copied().value_or(Self::DEFAULT_BOUNDED)
    }

    pub fn max_excess(&self) -> i32 {
        self.max_excess
            .as_ref()
            .copied()
            .value_or(Self::DEFAULT_MAX_EXCESS)
    }
}

/// Per-statistic override of [`SpotConfig`].
///
/// Each tuning field may be absent (inherit), null (reset) or set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatConfig {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Whether the statistic is computed (service default `false`).
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub enabled: Tristate<bool>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub depth: Tristate<i32>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub q: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub n_init: Tristate<i32>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub level: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub up: Tristate<bool>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub down: Tristate<bool>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub alert: Tristate<bool>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub bounded: Tristate<bool>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub max_excess: Tristate<i32>,
}

impl StatConfig {
    /// An override that only turns the statistic on.
    pub fn enabled() -> Self {
        Self {
            enabled: Tristate::Value(true),
            ..Self::default()
        }
    }

    /// Effective enabled flag.
    pub fn is_enabled(&self) -> bool {
        self.enabled.as_ref().copied().value_or(false)
    }
}

/// Per-statistic overrides, one optional [`StatConfig`] per [`Stat`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub avg_pkt_size: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub perf: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ack: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_arp: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src_port: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_icmp: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ip: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_syn: Tristate<StatConfig>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub traffic: Tristate<StatConfig>,
}

impl StatsConfig {
    /// The override slot for `stat`.
    pub fn get(&self, stat: Stat) -> &Tristate<StatConfig> {
        match stat {
            Stat::AvgPktSize => &self.avg_pkt_size,
            Stat::Perf => &self.perf,
            Stat::RAck => &self.r_ack,
            Stat::RArp => &self.r_arp,
            Stat::RDstSrc => &self.r_dst_src,
            Stat::RDstSrcPort => &self.r_dst_src_port,
            Stat::RIcmp => &self.r_icmp,
            Stat::RIp => &self.r_ip,
            Stat::RSyn => &self.r_syn,
            Stat::Traffic => &self.traffic,
        }
    }

    /// Mutable access to the override slot for `stat`.
    pub fn get_mut(&mut self, stat: Stat) -> &mut Tristate<StatConfig> {
        match stat {
            Stat::AvgPktSize => &mut self.avg_pkt_size,
            Stat::Perf => &mut self.perf,
            Stat::RAck => &mut self.r_ack,
            Stat::RArp => &mut self.r_arp,
            Stat::RDstSrc => &mut self.r_dst_src,
            Stat::RDstSrcPort => &mut self.r_dst_src_port,
            Stat::RIcmp => &mut self.r_icmp,
            Stat::RIp => &mut self.r_ip,
            Stat::RSyn => &mut self.r_syn,
            Stat::Traffic => &mut self.traffic,
        }
    }

    /// Replace the override slot for `stat`, returning the previous one.
    pub fn set(
        &mut self,
        stat: Stat,
        config: impl Into<Tristate<StatConfig>>,
    ) -> Tristate<StatConfig> {
        std::mem::replace(self.get_mut(stat), config.into())
    }

    #[must_use]
    pub fn with(mut self, stat: Stat, config: impl Into<Tristate<StatConfig>>) -> Self {
        self.set(stat, config);
        self
    }

    /// Statistics whose override is present and enabled.
    pub fn enabled_stats(&self) -> Vec<Stat> {
        Stat::ALL
            .iter()
            .copied()
            .filter(|stat| self.get(*stat).as_value().is_some_and(StatConfig::is_enabled))
            .collect()
    }
}

/// Full configuration of one detector instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetspotConfig {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Capture settings.
    pub configuration: MinerConfig,

    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub influxdb1: Tristate<InfluxDb1Config>,

    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub spot: Tristate<SpotConfig>,

    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub stats: Tristate<StatsConfig>,
}

impl NetspotConfig {
    /// A configuration that leaves every optional section to the service.
    pub fn new(configuration: MinerConfig) -> Self {
        Self {
            additional_properties: AdditionalProperties::new(),
            configuration,
            influxdb1: Tristate::Absent,
            spot: Tristate::Absent,
            stats: Tristate::Absent,
        }
    }

    #[must_use]
    pub fn with_spot(mut self, spot: SpotConfig) -> Self {
        self.spot = Tristate::Value(spot);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: StatsConfig) -> Self {
        self.stats = Tristate::Value(stats);
        self
    }

    #[must_use]
    pub fn with_influxdb1(mut self, influxdb1: InfluxDb1Config) -> Self {
        self.influxdb1 = Tristate::Value(influxdb1);
        self
    }
}
