//! Tri-state update field: absent, explicit `null`, or a value.
//!
//! Use with `#[serde(default)]` so an omitted key stays [`Patch::Missing`]:
//!
//! ```
//! use service::patch::Patch;
//! #[derive(serde::Deserialize)]
//! struct Update {
//!     #[serde(default)]
//!     notes: Patch<String>,
//! }
//! let u: Update = serde_json::from_str("{}").unwrap();
//! assert_eq!(u.notes, Patch::Missing);
//! let u: Update = serde_json::from_str(r#"{"notes": null}"#).unwrap();
//! assert_eq!(u.notes, Patch::Null);
//! ```

use serde::{Deserialize, Deserializer};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self { Patch::Missing }
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool { matches!(self, Patch::Missing) }

    /// `None` = leave alone, `Some(None)` = clear, `Some(Some(v))` = set.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    /// For columns that cannot be cleared: explicit `null` is rejected.
    pub fn into_required(self, field: &str) -> Result<Option<T>, ServiceError> {
        match self {
            Patch::Missing => Ok(None),
            Patch::Null => Err(ServiceError::Validation(format!("{field} cannot be null"))),
            Patch::Value(v) => Ok(Some(v)),
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)?),
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Update {
        #[serde(default)]
        telegram_id: Patch<i64>,
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let u: Update = serde_json::from_str(r#"{"telegram_id": null}"#).unwrap();
        assert_eq!(u.telegram_id, Patch::Null);
        assert_eq!(u.name, Patch::Missing);

        let u: Update = serde_json::from_str(r#"{"telegram_id": 555, "name": "x"}"#).unwrap();
        assert_eq!(u.telegram_id, Patch::Value(555));
        assert_eq!(u.name, Patch::Value("x".to_string()));
    }

    #[test]
    fn into_change_shapes() {
        assert_eq!(Patch::<i32>::Missing.into_change(), None);
        assert_eq!(Patch::<i32>::Null.into_change(), Some(None));
        assert_eq!(Patch::Value(1).into_change(), Some(Some(1)));
    }

    #[test]
    fn required_field_rejects_null() {
        assert!(matches!(Patch::<String>::Null.into_required("status"), Err(ServiceError::Validation(_))));
        assert_eq!(Patch::Value(2).into_required("x").unwrap(), Some(2));
        assert_eq!(Patch::<i32>::Missing.into_required("x").unwrap(), None);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(serde_json::from_str::<Update>(r#"{"telegram_id": "abc"}"#).is_err());
    }
}
