use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::SERVICE_MENU;
use crate::models::{Appointment, SalonConfig};

#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    /// Sum of menu prices in whole rupees.
    pub revenue: u64,
}

/// Bookings whose service is no longer on the menu count towards the total
/// but add nothing to revenue.
pub fn compute_stats(appointments: &[Appointment]) -> DashboardStats {
    let revenue = appointments
        .iter()
        .filter_map(|a| SERVICE_MENU.iter().find(|s| s.name == a.service))
        .map(|s| s.price_value())
        .sum();

    DashboardStats {
        total: appointments.len(),
        revenue,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBook<'a> {
    pub config: &'a SalonConfig,
    pub bookings: &'a [Appointment],
    pub exported_at: String,
}

pub fn data_book<'a>(
    config: &'a SalonConfig,
    bookings: &'a [Appointment],
    now: DateTime<Utc>,
) -> DataBook<'a> {
    DataBook {
        config,
        bookings,
        exported_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;

    fn booked(service: &str) -> Appointment {
        Appointment {
            id: format!("BKG-{service}"),
            customer_name: None,
            customer_phone: None,
            service: service.to_string(),
            date: "05-12".to_string(),
            time: "10:00 AM".to_string(),
            status: AppointmentStatus::Confirmed,
            applied_promo: None,
        }
    }

    #[test]
    fn test_stats_sum_menu_prices() {
        let stats = compute_stats(&[
            booked("Hydra-Facial"),
            booked("Bridal Couture"),
            booked("Retired Service"),
        ]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.revenue, 1500 + 15000);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(compute_stats(&[]), DashboardStats { total: 0, revenue: 0 });
    }

    #[test]
    fn test_data_book_shape() {
        let config = SalonConfig::default();
        let bookings = vec![booked("Party Makeup")];
        let book = data_book(&config, &bookings, Utc::now());
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["config"]["whatsappNumber"], "917057656600");
        assert_eq!(json["bookings"][0]["service"], "Party Makeup");
        assert!(json["exportedAt"].is_string());
    }
}
