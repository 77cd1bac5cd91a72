//! Utilities to be used in serde derives for more robust (de)serializations.

use serde::{Deserialize, Deserializer};

/// Many fields in the webauthn spec have the following wording.
///
/// > The values SHOULD be members of `T` but client platforms MUST ignore unknown values.
///
/// This method is a simple way of ignoring unknown values without failing deserialization.
pub fn ignore_unknown<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match T::deserialize(de) {
        Ok(val) => val,
        Err(_) => T::default(),
    })
}

/// Element wise version of [`ignore_unknown`] for optional lists, where an
/// unknown entry falls back to its default value instead of failing the
/// whole list.
pub fn ignore_unknown_opt_vec<'de, D, T>(de: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    struct IgnoreUnknown<T>(T);

    impl<'de, T> Deserialize<'de> for IgnoreUnknown<T>
    where
        T: Deserialize<'de> + Default,
    {
        fn deserialize<D>(de: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            ignore_unknown(de).map(IgnoreUnknown)
        }
    }

    let list: Option<Vec<IgnoreUnknown<T>>> = Deserialize::deserialize(de)?;
    Ok(list.map(|entries| entries.into_iter().map(|entry| entry.0).collect()))
}

/// Some relying parties send numeric fields, such as timeouts, as strings.
/// Accept either representation.
pub fn maybe_stringified<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumberVisitor;

    impl serde::de::Visitor<'_> for NumberVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "A number or its string representation")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            v.parse()
                .map(Some)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    de.deserialize_any(NumberVisitor)
}
