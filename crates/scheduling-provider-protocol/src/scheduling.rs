//! Scheduling service types
//!
//! The scheduling service answers a plain GET with the decision it currently
//! holds. All three fields must be present; any of them may be empty, which
//! means nothing has been scheduled for that attribute yet.

use serde::{Deserialize, Serialize};

/// Key asking for the region chosen by the scheduler
pub const REGION_NOT_SCHEDULED: &str = "region_not_scheduled";

/// Key asking for the time chosen by the scheduler
pub const TIME_NOT_SCHEDULED: &str = "time_not_scheduled";

/// Current scheduling decision as reported by the scheduling service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingAttributes {
    /// Scheduled time
    #[serde(rename = "schedulingTime")]
    pub time: String,

    /// Provider that will run the workload
    #[serde(rename = "schedulingProvider")]
    pub provider: String,

    /// Region that will run the workload
    #[serde(rename = "schedulingRegion")]
    pub region: String,
}

impl SchedulingAttributes {
    /// Decode attributes from a scheduling service response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON or any of the three fields is
    /// missing or not a string.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// True when neither time nor region has been decided yet.
    pub fn is_unscheduled(&self) -> bool {
        self.time.is_empty() && self.region.is_empty()
    }
}
