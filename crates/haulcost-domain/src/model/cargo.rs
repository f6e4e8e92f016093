use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: String,
    pub weight_kg: f64,
    /// Declared value of the goods
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}
