use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    /// Time baseline recorded with the route (hours)
    #[serde(default)]
    pub estimated_time_h: Option<f64>,
    #[serde(default = "super::default_owner")]
    pub owner: String,
}

impl Route {
    /// "Origin → Destination"
    pub fn label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}
