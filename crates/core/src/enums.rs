//! Closed string enumerations used on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in wire order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of the field this enumeration is carried in.
            pub const FIELD: &'static str = $field;

            /// The exact wire string.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ValidationError::unknown_variant($field, other)),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Direction of a threshold breach.
    AlertStatus, field = "status" {
        DownAlert => "DOWN_ALERT",
        UpAlert => "UP_ALERT",
    }
}

wire_enum! {
    /// Discriminates alarm messages from periodic data samples.
    MessageType, field = "type" {
        Alarm => "alarm",
        Data => "data",
    }
}

wire_enum! {
    /// Run state of one detector instance.
    ProcessStatus, field = "status" {
        Running => "running",
        Stopped => "stopped",
        Disabled => "disabled",
    }
}

wire_enum! {
    /// Statistics a detector can compute.
    Stat, field = "stat" {
        /// Average packet size.
        AvgPktSize => "AVG_PKT_SIZE",
        /// Packet parsing performance.
        Perf => "PERF",
        /// Ratio of ACK packets.
        RAck => "R_ACK",
        /// Ratio of ARP packets.
        RArp => "R_ARP",
        /// Ratio of distinct destinations to distinct sources.
        RDstSrc => "R_DST_SRC",
        /// Ratio of distinct destination ports to distinct sources.
        RDstSrcPort => "R_DST_SRC_PORT",
        /// Ratio of ICMP packets.
        RIcmp => "R_ICMP",
        /// Ratio of IP packets.
        RIp => "R_IP",
        /// Ratio of SYN packets.
        RSyn => "R_SYN",
        /// Traffic rate.
        Traffic => "TRAFFIC",
    }
}

wire_enum! {
    /// HTTP method a webhook is invoked with.
    WebhookRequestMethod, field = "method" {
        Get => "GET",
        Post => "POST",
        Put => "PUT",
    }
}

wire_enum! {
    /// Which messages a webhook subscribes to.
    WebhookStatsType, field = "type" {
        Alarms => "alarms",
        Both => "both",
        Data => "data",
    }
}

impl Stat {
    /// Lower-snake key used for this statistic inside `StatsConfig`.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::AvgPktSize => "avg_pkt_size",
            Self::Perf => "perf",
            Self::RAck => "r_ack",
            Self::RArp => "r_arp",
            Self::RDstSrc => "r_dst_src",
            Self::RDstSrcPort => "r_dst_src_port",
            Self::RIcmp => "r_icmp",
            Self::RIp => "r_ip",
            Self::RSyn => "r_syn",
            Self::Traffic => "traffic",
        }
    }
}
