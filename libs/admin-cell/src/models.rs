use serde::Serialize;

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminStats {
    pub total_doctors: usize,
    pub active_doctors: usize,
    pub total_patients: usize,
    pub total_specialties: usize,
    pub total_locations: usize,
    pub appointments_total: usize,
    pub appointments_pending: usize,
    pub appointments_confirmed: usize,
    pub appointments_completed: usize,
    pub appointments_cancelled: usize,
    pub appointments_today: usize,
    /// Sum of prices of confirmed and completed appointments.
    pub total_revenue: f64,
}
