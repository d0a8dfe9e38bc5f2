//! Dashboard summary: five recent or upcoming collections fetched in one call.

use crate::defaults::or_default;
use crate::{Appointment, LabReport, Medication, Prescription, Reminder};
use serde::{Deserialize, Serialize};

/// The server fills each collection independently and sends `null` for a collection it could
/// not load, so every member decodes `null` as empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardData {
    #[serde(default, deserialize_with = "or_default")]
    pub prescriptions: Vec<Prescription>,
    #[serde(default, deserialize_with = "or_default")]
    pub appointments: Vec<Appointment>,
    #[serde(default, deserialize_with = "or_default")]
    pub lab_reports: Vec<LabReport>,
    #[serde(default, deserialize_with = "or_default")]
    pub medications: Vec<Medication>,
    #[serde(default, deserialize_with = "or_default")]
    pub reminders: Vec<Reminder>,
}

impl DashboardData {
    pub fn is_empty(&self) -> bool {
        self.prescriptions.is_empty()
            && self.appointments.is_empty()
            && self.lab_reports.is_empty()
            && self.medications.is_empty()
            && self.reminders.is_empty()
    }
}
