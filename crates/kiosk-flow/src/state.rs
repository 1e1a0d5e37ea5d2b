//! Remote-backed view state.

/// State of a view backed by a single remote fetch.
///
/// A tagged variant instead of loose `loading`/`error` booleans, so the
/// illegal combinations cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Fetch in flight.
    Loading,
    /// Last fetch succeeded; holds the fetched value wholesale.
    Ready(T),
    /// Last fetch failed; holds the user-facing message.
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The fetched value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if errored.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loading: LoadState<u32> = LoadState::Loading;
        assert!(loading.is_loading());
        assert!(loading.ready().is_none());
        assert!(loading.error().is_none());

        let ready = LoadState::Ready(7u32);
        assert_eq!(ready.ready(), Some(&7));

        let error: LoadState<u32> = LoadState::Error("boom".to_string());
        assert_eq!(error.error(), Some("boom"));
    }
}
