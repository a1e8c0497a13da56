use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A class value as the classifier was trained on it.
///
/// Models fitted on encoded targets carry integer classes that a label
/// encoder turns back into names; models fitted on raw targets carry the
/// names directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Index(i64),
    Name(String),
}

impl ClassLabel {
    /// Index label for a whole-valued float, as numpy exports float targets.
    pub fn from_whole(value: f64) -> Option<Self> {
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        (value.fract() == 0.0 && in_range).then(|| Self::Index(value as i64))
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for ClassLabel {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<i64> for ClassLabel {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl<'de> Deserialize<'de> for ClassLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelVisitor;

        impl<'de> Visitor<'de> for LabelVisitor {
            type Value = ClassLabel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer, a whole-valued number or a string")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<ClassLabel, E> {
                Ok(ClassLabel::Index(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<ClassLabel, E> {
                i64::try_from(value)
                    .map(ClassLabel::Index)
                    .map_err(|_| E::custom(format!("class value {value} is out of range")))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<ClassLabel, E> {
                ClassLabel::from_whole(value)
                    .ok_or_else(|| E::custom(format!("class value {value} is not a whole number")))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ClassLabel, E> {
                Ok(ClassLabel::from(value))
            }
        }

        deserializer.deserialize_any(LabelVisitor)
    }
}
