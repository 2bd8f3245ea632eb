use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalonConfig {
    /// Display phone shown to customers.
    pub owner_phone: String,
    /// Digits only, country code first, no '+'.
    pub whatsapp_number: String,
    pub whatsapp_link: String,
    pub address: String,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            owner_phone: "+91 7057656600".to_string(),
            whatsapp_number: "917057656600".to_string(),
            whatsapp_link: whatsapp_link_for("917057656600"),
            address: "Luxury Square, Mumbai, India".to_string(),
        }
    }
}

pub fn whatsapp_link_for(number: &str) -> String {
    format!("https://wa.me/{number}")
}

/// Owner dashboard edit. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEdit {
    pub owner_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
}

impl SalonConfig {
    pub fn set_whatsapp_number(&mut self, number: &str) {
        self.whatsapp_number = number.to_string();
        self.whatsapp_link = whatsapp_link_for(number);
    }

    pub fn apply(&mut self, edit: ConfigEdit) {
        if let Some(phone) = edit.owner_phone {
            self.owner_phone = phone;
        }
        if let Some(number) = edit.whatsapp_number {
            self.set_whatsapp_number(&number);
        }
        if let Some(address) = edit.address {
            self.address = address;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_link_matches_number() {
        let config = SalonConfig::default();
        assert_eq!(config.whatsapp_link, "https://wa.me/917057656600");
    }

    #[test]
    fn test_editing_number_recomputes_link() {
        let mut config = SalonConfig::default();
        config.apply(ConfigEdit {
            whatsapp_number: Some("15551234567".to_string()),
            ..Default::default()
        });
        assert_eq!(config.whatsapp_number, "15551234567");
        assert_eq!(config.whatsapp_link, "https://wa.me/15551234567");
        assert_eq!(config.owner_phone, "+91 7057656600");
    }

    #[test]
    fn test_edit_does_not_validate() {
        let mut config = SalonConfig::default();
        config.apply(ConfigEdit {
            owner_phone: Some("call the front desk".to_string()),
            address: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(config.owner_phone, "call the front desk");
        assert_eq!(config.address, "");
    }
}
