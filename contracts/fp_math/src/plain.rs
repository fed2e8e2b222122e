//! Serde adapters that keep amounts as plain decimal strings on the wire.
//!
//! Use with `#[serde(with = "fp_math::plain::decimal")]`,
//! `#[serde(with = "fp_math::plain::decimal_vec")]` or
//! `#[serde(with = "fp_math::plain::uint")]`.

pub mod decimal {
    use crate::to_plain_string;
    use bigdecimal::BigDecimal;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_plain_string(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        let text = String::deserialize(deserializer)?;
        BigDecimal::from_str(&text).map_err(de::Error::custom)
    }
}

pub mod decimal_vec {
    use crate::to_plain_string;
    use bigdecimal::BigDecimal;
    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(
        values: &[BigDecimal],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&to_plain_string(value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BigDecimal>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|text| BigDecimal::from_str(text).map_err(de::Error::custom))
            .collect()
    }
}

pub mod uint {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("invalid integer `{text}`")));
        }
        BigUint::parse_bytes(text.as_bytes(), 10)
            .ok_or_else(|| de::Error::custom(format!("invalid integer `{text}`")))
    }
}
