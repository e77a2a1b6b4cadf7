use ::serde::{de::Error as _, Deserialize, Deserializer};

/// Treats a `null` as the default value of `T`
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Kraken sends ids as numbers, but some older responses have them as strings
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Number(id)) => Ok(id),
        Some(Id::Text(id)) if id.is_empty() => Ok(0),
        Some(Id::Text(id)) => id.parse().map_err(D::Error::custom),
        None => Ok(0),
    }
}

pub mod timestamp {
    use ::serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::{format_description::well_known::Rfc3339, OffsetDateTime};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(ts) => OffsetDateTime::parse(ts, &Rfc3339)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }

    pub fn serialize<S>(ts: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => {
                let ts = ts.format(&Rfc3339).map_err(ser::Error::custom)?;
                serializer.serialize_some(&ts)
            }
            None => serializer.serialize_none(),
        }
    }
}
