use std::collections::BTreeMap;

use super::types::Placeholder;

/// Value of a placeholder for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Present(String),
    /// The entity has no data for this field; distinct from an empty string
    Absent,
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Value::Present(v),
            None => Value::Absent,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Present(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Present(value)
    }
}

/// Placeholder values for a single render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<Placeholder, Value>,
}

static ABSENT: Value = Value::Absent;

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<Value>) -> Self {
        self.set(placeholder, value);
        self
    }

    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<Value>) {
        self.values.insert(placeholder, value.into());
    }

    /// Fields never set on this context are absent
    pub fn get(&self, placeholder: Placeholder) -> &Value {
        self.values.get(&placeholder).unwrap_or(&ABSENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_placeholder_is_absent() {
        let ctx = RenderContext::new().with(Placeholder::SeasonTitle, "Title");
        assert_eq!(ctx.get(Placeholder::EpisodeTitle), &Value::Absent);
        assert_eq!(
            ctx.get(Placeholder::SeasonTitle),
            &Value::Present("Title".to_string())
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<String>), Value::Absent);
        assert_eq!(
            Value::from(Some("01".to_string())),
            Value::Present("01".to_string())
        );
    }

    #[test]
    fn test_empty_string_is_present() {
        let ctx = RenderContext::new().with(Placeholder::EpisodeTitle, "");
        assert_eq!(ctx.get(Placeholder::EpisodeTitle), &Value::Present(String::new()));
    }
}
