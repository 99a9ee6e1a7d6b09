//! Result of a model-backed step: the output, or the safe default that replaced it.

/// Output of a generation step.
///
/// `Fallback` carries the default the pipeline continues with and the reason it was used,
/// so callers can log or report the failure without losing the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated<T> {
    Produced(T),
    Fallback { value: T, error: String },
}

impl<T> Generated<T> {
    pub fn fallback(value: T, error: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            error: error.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Produced(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Produced(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Produced(_) => None,
            Self::Fallback { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let ok = Generated::Produced(3);
        assert_eq!(*ok.value(), 3);
        assert!(!ok.is_fallback());
        assert!(ok.error().is_none());

        let fb: Generated<Vec<u8>> = Generated::fallback(Vec::new(), "boom");
        assert!(fb.is_fallback());
        assert_eq!(fb.error(), Some("boom"));
        assert!(fb.into_value().is_empty());
    }
}
