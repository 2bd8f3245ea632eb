use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ServiceCategory {
    Hair,
    Skin,
    Makeup,
    Massage,
}

/// A menu entry. Prices and durations are display strings ("₹1,500", "60 min").
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
    pub category: ServiceCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_popular: bool,
}

impl Service {
    /// Digits of the display price, e.g. "₹1,500" -> 1500.
    pub fn price_value(&self) -> u64 {
        let digits: String = self.price.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }

    /// Leading number of the display duration, e.g. "75 min" -> 75.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.duration
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceGroup {
    pub category: ServiceCategory,
    pub services: Vec<Service>,
}

#[cfg(test)]
mod tests {
    use crate::catalog;

    #[test]
    fn test_price_value_strips_symbols() {
        let bridal = catalog::find_service("Bridal Couture").unwrap();
        assert_eq!(bridal.price_value(), 15000);
        let haircut = catalog::find_service("Signature Haircut").unwrap();
        assert_eq!(haircut.price_value(), 500);
    }

    #[test]
    fn test_duration_minutes() {
        let keratin = catalog::find_service("Keratin Smoothing").unwrap();
        assert_eq!(keratin.duration_minutes(), Some(180));
    }
}
