use serde::{Deserialize, Serialize};

/// A person living at an address.
///
/// Identity is the (first name, last name) pair, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl Resident {
    pub fn id(&self) -> String {
        super::identity_label(&self.first_name, &self.last_name)
    }

    pub fn has_identity(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// `address zip city`
    pub fn full_address(&self) -> String {
        format!("{} {} {}", self.address, self.zip, self.city)
    }

    /// Copies the mutable contact fields; identity is left untouched.
    pub fn apply_contact(&mut self, other: &Resident) {
        self.address = other.address.clone();
        self.city = other.city.clone();
        self.zip = other.zip.clone();
        self.phone = other.phone.clone();
        self.email = other.email.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> Resident {
        Resident {
            first_name: "John".to_string(),
            last_name: "Boyd".to_string(),
            address: "1509 Culver St".to_string(),
            city: "Culver".to_string(),
            zip: "97451".to_string(),
            phone: "841-874-6512".to_string(),
            email: "jaboyd@email.com".to_string(),
        }
    }

    #[test]
    fn test_full_address() {
        assert_eq!(john().full_address(), "1509 Culver St 97451 Culver");
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let r = john();
        assert!(r.has_identity("John", "Boyd"));
        assert!(!r.has_identity("john", "Boyd"));
        assert!(!r.has_identity("John", "BOYD"));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(john()).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["zip"], "97451");
        assert!(json.get("first_name").is_none());
    }
}
