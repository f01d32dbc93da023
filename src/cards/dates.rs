//! Date (de)serialization in the `YYYY/MM/DD` format.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialized date format.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// A `(release date, out-of-print date)` pair, either side optional.
pub type DateRange = (Option<NaiveDate>, Option<NaiveDate>);

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

fn to_strings(range: &DateRange) -> [Option<String>; 2] {
    [range.0.map(format_date), range.1.map(format_date)]
}

fn from_strings<E: serde::de::Error>(pair: [Option<String>; 2]) -> Result<DateRange, E> {
    let parse = |s: Option<String>| -> Result<Option<NaiveDate>, E> {
        match s.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => parse_date(s).map(Some).map_err(E::custom),
        }
    };
    let [release, out_of_print] = pair;
    Ok((parse(release)?, parse(out_of_print)?))
}

/// `serde(with)` adapter for maps of key to `DateRange`.
pub mod range_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, DateRange>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        map.iter()
            .map(|(k, v)| (k, to_strings(v)))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, DateRange>, D::Error> {
        BTreeMap::<String, [Option<String>; 2]>::deserialize(deserializer)?
            .into_iter()
            .map(|(k, v)| from_strings(v).map(|range| (k, range)))
            .collect()
    }
}

/// `serde(with)` adapter for a single optional date.
pub mod optional_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.map(format_date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => parse_date(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "range_map")]
        dates: BTreeMap<String, DateRange>,
    }

    #[test]
    fn test_format_and_parse() {
        let date = NaiveDate::from_ymd_opt(2021, 5, 7).unwrap();
        assert_eq!(format_date(date), "2021/05/07");
        assert_eq!(parse_date("2021/05/07").unwrap(), date);
        assert!(parse_date("2021-05-07").is_err());
    }

    #[test]
    fn test_range_map_json() {
        let mut dates = BTreeMap::new();
        dates.insert(
            "F".to_string(),
            (NaiveDate::from_ymd_opt(2021, 5, 7), None),
        );
        let holder = Holder { dates };

        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"dates":{"F":["2021/05/07",null]}}"#);

        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, holder);
    }

    #[test]
    fn test_empty_string_is_unknown() {
        let back: Holder = serde_json::from_str(r#"{"dates":{"U":["", ""]}}"#).unwrap();
        assert_eq!(back.dates["U"], (None, None));
    }
}
