use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::models::{Promotion, PromotionType};

/// Owner "create offer" form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionForm {
    pub title: String,
    pub description: String,
    pub discount: String,
    pub code: String,
    /// `YYYY-MM-DD`.
    pub valid_until: String,
}

pub fn build_promotion(form: PromotionForm, now: DateTime<Utc>) -> anyhow::Result<Promotion> {
    let valid_until = NaiveDate::parse_from_str(form.valid_until.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid validUntil {:?}: {e}", form.valid_until))?;
    let midnight = valid_until
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid validUntil {:?}", form.valid_until))?
        .and_utc();

    Ok(Promotion {
        id: format!("promo-{}", now.timestamp_millis()),
        code: form.code.to_uppercase(),
        title: form.title,
        description: form.description,
        discount: form.discount,
        expiry: format!("Until {}", valid_until.format("%-m/%-d/%Y")),
        valid_until: midnight.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        kind: PromotionType::Seasonal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(valid_until: &str) -> PromotionForm {
        PromotionForm {
            title: "Monsoon Glow".to_string(),
            description: "Facials at a monsoon price".to_string(),
            discount: "20% OFF".to_string(),
            code: "rain20".to_string(),
            valid_until: valid_until.to_string(),
        }
    }

    #[test]
    fn test_build_promotion() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 9, 30, 0).unwrap();
        let promo = build_promotion(form("2026-07-31"), now).unwrap();

        assert_eq!(promo.id, format!("promo-{}", now.timestamp_millis()));
        assert_eq!(promo.code, "RAIN20");
        assert_eq!(promo.expiry, "Until 7/31/2026");
        assert_eq!(promo.valid_until, "2026-07-31T00:00:00.000Z");
        assert_eq!(promo.kind, PromotionType::Seasonal);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(build_promotion(form("next friday"), Utc::now()).is_err());
    }
}
