use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub code: String,
    pub title: String,
    pub description: String,
    pub discount: String,
    pub expiry: String,
    pub valid_until: String,
    #[serde(rename = "type")]
    pub kind: PromotionType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PromotionType {
    Seasonal,
    Loyalty,
    #[serde(rename = "First-Time")]
    FirstTime,
}
