//! Alarm and data messages reported by running detectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{AlertStatus, MessageType, Stat};
use crate::number::Float;
use crate::tristate::Tristate;
use crate::wire::AdditionalProperties;

/// Convert a nanosecond epoch timestamp as sent by the service.
pub fn timestamp_from_nanos(nanos: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(nanos)
}

/// Emitted by the service when a statistic breaches its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmMessage {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Nanoseconds since the Unix epoch.
    pub time: i64,
    /// Configuration name.
    pub name: String,
    pub series: String,
    pub stat: Stat,
    pub status: AlertStatus,
    /// Observed value of the statistic.
    pub value: Float,
    /// Estimated probability of the observation.
    pub probability: Float,
    pub code: i32,
    #[serde(rename = "type")]
    pub message_type: MessageType,
}

impl AlarmMessage {
    pub fn timestamp(&self) -> DateTime<Utc> {
        timestamp_from_nanos(self.time)
    }
}

/// Which of the three values of a statistic to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The statistic itself.
    Aggregate,
    /// The upper threshold.
    Up,
    /// The lower threshold.
    Down,
}

/// A periodic telemetry sample.
///
/// Statistic fields use upper-snake keys on the wire (`R_SYN`,
/// `AVG_PKT_SIZE_UP`) while the envelope fields are lower case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DataMessage {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    /// Nanoseconds since the Unix epoch.
    #[serde(rename = "time")]
    pub time: i64,
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "series")]
    pub series: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,

    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub avg_pkt_size: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub avg_pkt_size_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub avg_pkt_size_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub perf: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub perf_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub perf_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ack: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ack_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ack_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_arp: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_arp_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_arp_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src_port: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src_port_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_dst_src_port_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_icmp: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_icmp_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_icmp_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ip: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ip_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_ip_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_syn: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_syn_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub r_syn_up: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub traffic: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub traffic_down: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub traffic_up: Tristate<Float>,
}

impl DataMessage {
    pub fn timestamp(&self) -> DateTime<Utc> {
        timestamp_from_nanos(self.time)
    }

    /// One of the three values reported for `stat`.
    pub fn value(&self, stat: Stat, direction: Direction) -> Tristate<f64> {
        let (aggregate, up, down) = match stat {
            Stat::AvgPktSize => (
                &self.avg_pkt_size,
                &self.avg_pkt_size_up,
                &self.avg_pkt_size_down,
            ),
            Stat::Perf => (&self.perf, &self.perf_up, &self.perf_down),
            Stat::RAck => (&self.r_ack, &self.r_ack_up, &self.r_ack_down),
            Stat::RArp => (&self.r_arp, &self.r_arp_up, &self.r_arp_down),
            Stat::RDstSrc => (&self.r_dst_src, &self.r_dst_src_up, &self.r_dst_src_down),
            Stat::RDstSrcPort => (
                &self.r_dst_src_port,
                &self.r_dst_src_port_up,
                &self.r_dst_src_port_down,
            ),
            Stat::RIcmp => (&self.r_icmp, &self.r_icmp_up, &self.r_icmp_down),
            Stat::RIp => (&self.r_ip, &self.r_ip_up, &self.r_ip_down),
            Stat::RSyn => (&self.r_syn, &self.r_syn_up, &self.r_syn_down),
            Stat::Traffic => (&self.traffic, &self.traffic_up, &self.traffic_down),
        };
        let value = match direction {
            Direction::Aggregate => aggregate,
            Direction::Up => up,
            Direction::Down => down,
        };
        value.as_ref().map(Float::as_f64)
    }
}

/// Body of a test alarm request. Unset fields take the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestAlarmMessage {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub name: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub stat: Tristate<Stat>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub status: Tristate<AlertStatus>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub value: Tristate<Float>,
    #[serde(default, skip_serializing_if = "Tristate::is_absent")]
    pub probability: Tristate<Float>,
}

impl TestAlarmMessage {
    pub const DEFAULT_NAME: &'static str = "Test alarm";
    pub const DEFAULT_STAT: Stat = Stat::RSyn;
    pub const DEFAULT_STATUS: AlertStatus = AlertStatus::UpAlert;
    pub const DEFAULT_VALUE: f64 = 1000.0;
    pub const DEFAULT_PROBABILITY: f64 = 0.75;

    pub fn name(&self) -> &str {
        self.name
            .as_value()
            .map_or(Self::DEFAULT_NAME, String::as_str)
    }

    pub fn stat(&self) -> Stat {
        self.stat.value_or(Self::DEFAULT_STAT)
    }

    pub fn status(&self) -> AlertStatus {
        self.status.value_or(Self::DEFAULT_STATUS)
    }

    pub fn value(&self) -> f64 {
        self.value.as_value().map_or(Self::DEFAULT_VALUE, Float::as_f64)
    }

    pub fn probability(&self) -> f64 {
        self.probability.as_value().map_or(Self::DEFAULT_PROBABILITY, Float::as_f64)
    }
}
