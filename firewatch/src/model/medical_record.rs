use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Ages strictly above this count as adults; 18 itself is still a minor.
pub const ADULT_AGE_THRESHOLD: i32 = 18;

/// Medical record of a person, keyed like [`super::Resident`] by (first name, last name).
///
/// Nothing guarantees a matching resident exists, or the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "birthdate", with = "birthdate_format")]
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl MedicalRecord {
    pub fn id(&self) -> String {
        super::identity_label(&self.first_name, &self.last_name)
    }

    pub fn has_identity(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// Whole years elapsed between the birth date and `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut years = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years
    }

    pub fn age(&self) -> i32 {
        self.age_on(Local::now().date_naive())
    }

    pub fn is_adult_on(&self, today: NaiveDate) -> bool {
        self.age_on(today) > ADULT_AGE_THRESHOLD
    }

    pub fn is_minor_on(&self, today: NaiveDate) -> bool {
        !self.is_adult_on(today)
    }

    /// Copies birth date, medications and allergies; identity is left untouched.
    pub fn apply_clinical(&mut self, other: &MedicalRecord) {
        self.birth_date = other.birth_date;
        self.medications = other.medications.clone();
        self.allergies = other.allergies.clone();
    }
}

/// `MM/dd/yyyy`, the format used by the store document.
mod birthdate_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid birthdate '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(birth: &str) -> MedicalRecord {
        MedicalRecord {
            first_name: "Tenley".to_string(),
            last_name: "Boyd".to_string(),
            birth_date: NaiveDate::parse_from_str(birth, "%m/%d/%Y").unwrap(),
            medications: vec![],
            allergies: vec!["peanut".to_string()],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_counts_whole_years() {
        let r = record("02/18/2012");
        assert_eq!(r.age_on(date(2024, 2, 17)), 11);
        assert_eq!(r.age_on(date(2024, 2, 18)), 12);
        assert_eq!(r.age_on(date(2024, 12, 31)), 12);
    }

    #[test]
    fn test_eighteen_is_still_a_minor() {
        let r = record("06/01/2000");
        let eighteenth = date(2018, 6, 1);
        assert_eq!(r.age_on(eighteenth), 18);
        assert!(r.is_minor_on(eighteenth));
        assert!(!r.is_adult_on(eighteenth));
        // 19th birthday flips it
        assert!(r.is_adult_on(date(2019, 6, 1)));
    }

    #[test]
    fn test_birthdate_round_trips_in_store_format() {
        let json = serde_json::to_value(record("03/06/1984")).unwrap();
        assert_eq!(json["birthdate"], "03/06/1984");
        let back: MedicalRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.birth_date, date(1984, 3, 6));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let r: MedicalRecord = serde_json::from_str(
            r#"{"firstName":"A","lastName":"B","birthdate":"01/01/2000"}"#,
        )
        .unwrap();
        assert!(r.medications.is_empty());
        assert!(r.allergies.is_empty());
    }

    #[test]
    fn test_bad_birthdate_is_rejected() {
        let res = serde_json::from_str::<MedicalRecord>(
            r#"{"firstName":"A","lastName":"B","birthdate":"2000-01-01"}"#,
        );
        assert!(res.is_err());
    }
}
