use crate::Fraction;
use ::serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Serialized as its text, so `"-1/-2"` stays `"-1/-2"`
impl Serialize for Fraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Fraction, Problem};

    #[test]
    fn as_text() {
        let f = Fraction::mixed(-1, -2, -3).unwrap();
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#""-1 -2/-3""#);
        let back: Fraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn rejects_bad_text() {
        let err = serde_json::from_str::<Fraction>(r#""1/0""#).unwrap_err();
        assert!(err.to_string().contains(&Problem::ZeroDenominator.to_string()));
        assert!(serde_json::from_str::<Fraction>(r#""half""#).is_err());
        assert!(serde_json::from_str::<Fraction>("12").is_err());
    }
}
