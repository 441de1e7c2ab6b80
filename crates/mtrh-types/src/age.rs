use std::str::FromStr;

/// Errors produced when an age value is out of range or unparsable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("age must be a whole number, got {0:?}")]
    NotANumber(String),
    #[error("age must be between {min} and {max}, got {value}", min = Age::MIN, max = Age::MAX)]
    OutOfRange { value: i64 },
}

/// Patient age in whole years, bounded to `[Age::MIN, Age::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 120;

    /// Creates an `Age`, rejecting values outside the accepted range.
    ///
    /// Both bounds are inclusive, so a newborn (`0`) and `120` are valid.
    pub fn new(value: i64) -> Result<Self, AgeError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(AgeError::OutOfRange { value });
        }
        // Range check above guarantees the value fits.
        Ok(Self(value as u8))
    }

    pub fn years(self) -> u8 {
        self.0
    }
}

impl FromStr for Age {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| AgeError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Age> for i64 {
    fn from(age: Age) -> Self {
        i64::from(age.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = AgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Age::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_accepted() {
        assert_eq!(Age::new(0).map(Age::years), Ok(0));
        assert_eq!(Age::new(120).map(Age::years), Ok(120));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(Age::new(-1), Err(AgeError::OutOfRange { value: -1 }));
        assert_eq!(Age::new(121), Err(AgeError::OutOfRange { value: 121 }));
    }

    #[test]
    fn test_parse_from_form_text() {
        assert_eq!(" 42 ".parse::<Age>().map(Age::years), Ok(42));
        assert_eq!(
            "forty".parse::<Age>(),
            Err(AgeError::NotANumber("forty".to_string()))
        );
        assert_eq!("4.5".parse::<Age>(), Err(AgeError::NotANumber("4.5".to_string())));
    }

    #[test]
    fn test_out_of_range_message_names_bounds() {
        let err = Age::new(200).expect_err("200 should be rejected");
        assert_eq!(err.to_string(), "age must be between 0 and 120, got 200");
    }
}
