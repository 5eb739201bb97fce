//! Run state reported for configured detectors.

use serde::{Deserialize, Serialize};

use crate::config_id::ConfigId;
use crate::enums::ProcessStatus;
use crate::wire::AdditionalProperties;

/// Run state of one configured detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,

    pub id: ConfigId,
    pub name: String,
    pub status: ProcessStatus,
}

impl Status {
    pub fn is_running(&self) -> bool {
        self.status == ProcessStatus::Running
    }
}
