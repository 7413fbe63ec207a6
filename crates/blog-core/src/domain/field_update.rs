use serde::{Deserialize, Deserializer};

/// Three-state update for a single attribute of a partial update payload.
///
/// Deserializes from JSON as: key absent -> `Unset` (requires `#[serde(default)]`
/// on the field), `null` -> `Clear`, any value -> `Set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unset,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }

    /// `None` for `Unset`, `Some(None)` for `Clear`, `Some(Some(v))` for `Set`.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }

    /// Apply to a nullable slot.
    pub fn apply_nullable(self, slot: &mut Option<T>) {
        if let Some(change) = self.into_change() {
            *slot = change;
        }
    }
}

impl<T: Default> FieldUpdate<T> {
    /// Apply to a slot whose cleared state is `T::default()` (empty list, empty string).
    pub fn apply_or_default(self, slot: &mut T) {
        if let Some(change) = self.into_change() {
            *slot = change.unwrap_or_default();
        }
    }
}

impl<'de, T> Deserialize<'de> for FieldUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        name: FieldUpdate<String>,
        #[serde(default)]
        tags: FieldUpdate<Vec<String>>,
    }

    #[test]
    fn test_three_states_from_json() {
        let payload: Payload = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(payload.name, FieldUpdate::Clear);
        assert_eq!(payload.tags, FieldUpdate::Unset);

        let payload: Payload = serde_json::from_str(r#"{"tags": ["a", "b"]}"#).unwrap();
        assert_eq!(payload.name, FieldUpdate::Unset);
        assert_eq!(
            payload.tags,
            FieldUpdate::Set(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(serde_json::from_str::<Payload>(r#"{"name": 42}"#).is_err());
    }

    #[test]
    fn test_apply_nullable() {
        let mut slot = Some("old".to_string());

        FieldUpdate::Unset.apply_nullable(&mut slot);
        assert_eq!(slot.as_deref(), Some("old"));

        FieldUpdate::Set("new".to_string()).apply_nullable(&mut slot);
        assert_eq!(slot.as_deref(), Some("new"));

        FieldUpdate::Clear.apply_nullable(&mut slot);
        assert_eq!(slot, None);
    }

    #[test]
    fn test_apply_or_default_clears_lists() {
        let mut tags = vec!["rust".to_string()];

        FieldUpdate::<Vec<String>>::Unset.apply_or_default(&mut tags);
        assert_eq!(tags.len(), 1);

        FieldUpdate::<Vec<String>>::Clear.apply_or_default(&mut tags);
        assert!(tags.is_empty());
    }
}
