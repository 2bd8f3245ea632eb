use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    /// System instruction sent to the chat service for every turn.
    #[serde(skip)]
    pub instruction: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}
