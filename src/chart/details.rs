use serde::Serialize;
use serde_json::Value;

const MISSING: &str = "-";

/// Label/value rows listed under a chart pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AstroDetails {
    pub rows: Vec<DetailRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl AstroDetails {
    /// Build rows from the service's details object.
    ///
    /// Objects carrying `nakshatra` or `dasha_info` are read with the fixed
    /// compatibility-page labels; anything else is listed key by key in
    /// document order.
    pub fn from_value(details: &Value) -> Self {
        let Some(object) = details.as_object() else {
            return Self::default();
        };

        if object.contains_key("nakshatra") || object.contains_key("dasha_info") {
            return Self::from_person_details(details);
        }

        let rows = object
            .iter()
            .map(|(key, value)| DetailRow {
                label: key.clone(),
                value: display_value(value),
            })
            .collect();
        Self { rows }
    }

    fn from_person_details(details: &Value) -> Self {
        let fields: [(&str, &[&str]); 6] = [
            ("ලග්නය", &["lagna"]),
            ("නවාංශක ලග්නය", &["navamsa_lagna"]),
            ("නැකත", &["nakshatra", "name"]),
            ("වත්මන් මහදශාව", &["dasha_info", "current_mahadasha"]),
            ("මීළඟ මහදශාව", &["dasha_info", "next_mahadasha"]),
            ("මීළඟ මහදශා ආරම්භ වසර", &["dasha_info", "next_mahadasha_start_year"]),
        ];

        let rows = fields
            .iter()
            .map(|(label, path)| {
                let value = path
                    .iter()
                    .try_fold(details, |node, key| node.get(key))
                    .map(display_value)
                    .unwrap_or_else(|| MISSING.to_string());
                DetailRow {
                    label: label.to_string(),
                    value,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Empty values show as the missing marker. A zero counts as empty.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING.to_string(),
        Value::String(s) if s.trim().is_empty() => MISSING.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(false) => MISSING.to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => MISSING.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generic_details_keep_document_order_and_fill_gaps() {
        let details: Value =
            serde_json::from_str(r#"{"Tithi":"Panchami","Yoga":"","Karana":null,"Year":1994}"#)
                .unwrap();
        let rows = AstroDetails::from_value(&details).rows;

        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Tithi", "Yoga", "Karana", "Year"]);
        let values: Vec<_> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["Panchami", "-", "-", "1994"]);
    }

    #[test]
    fn person_details_use_fixed_labels() {
        let details = json!({
            "lagna": "Leo",
            "navamsa_lagna": "Aries",
            "nakshatra": {"name": "Rohini"},
            "dasha_info": {"current_mahadasha": "Venus", "next_mahadasha_start_year": 2031}
        });
        let rows = AstroDetails::from_value(&details).rows;

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].label, "ලග්නය");
        assert_eq!(rows[0].value, "Leo");
        assert_eq!(rows[2].value, "Rohini");
        assert_eq!(rows[3].value, "Venus");
        assert_eq!(rows[4].value, "-");
        assert_eq!(rows[5].value, "2031");
    }

    #[test]
    fn zero_is_shown_as_missing() {
        let details = json!({
            "lagna": "Leo",
            "nakshatra": {"name": "Magha"},
            "dasha_info": {"next_mahadasha_start_year": 0}
        });

        let rows = AstroDetails::from_value(&details).rows;

        assert_eq!(rows[5].value, MISSING);
        assert_eq!(display_value(&json!(0.0)), MISSING);
        assert_eq!(display_value(&json!(2031)), "2031");
    }

    #[test]
    fn non_object_details_are_empty() {
        assert!(AstroDetails::from_value(&json!("lagna")).is_empty());
        assert!(AstroDetails::from_value(&Value::Null).is_empty());
    }
}
