use serde::{Deserialize, Deserializer, Serialize};

/// Assignment of one street address to one coverage (fire station) number.
///
/// Identity is the address: there is at most one assignment per address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageAssignment {
    pub address: String,
    #[serde(deserialize_with = "station_number")]
    pub station: u32,
}

impl CoverageAssignment {
    pub fn new(address: impl Into<String>, station: u32) -> Self {
        Self {
            address: address.into(),
            station,
        }
    }
}

/// Seed documents carry the station either as a number or as a numeric string.
fn station_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<u32>().map_err(|_| {
            serde::de::Error::custom(format!("invalid station number '{}'", s))
        }),
    }
}
