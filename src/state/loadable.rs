//! Four-state request/cache cell

/// Lifecycle of a remotely fetched value.
///
/// Transitions within one fetch cycle are monotonic:
/// `NotLoaded → Loading → Loaded | Error`. A new cycle starts only when a
/// relevant input changes, which resets the cell to `NotLoaded` (see
/// [`crate::state::DataCache`]). Exactly one variant holds at any time and
/// every consumption site matches exhaustively.
#[derive(Debug, Clone, Default)]
pub enum Loadable<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(T),
    /// Terminal failure state carrying a user-facing message. A failed cycle
    /// never retains the previously loaded value.
    Error(String),
}

impl<T> Loadable<T> {
    /// Reference to the loaded value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            Loadable::NotLoaded | Loadable::Loading | Loadable::Error(_) => None,
        }
    }

    pub fn is_not_loaded(&self) -> bool {
        matches!(self, Loadable::NotLoaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    /// The failure message, if the cell is in the error state
    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Error(msg) => Some(msg),
            Loadable::NotLoaded | Loadable::Loading | Loadable::Loaded(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_per_state() {
        let cell: Loadable<u32> = Loadable::NotLoaded;
        assert!(cell.is_not_loaded());
        assert_eq!(cell.value(), None);

        let cell: Loadable<u32> = Loadable::Loading;
        assert!(cell.is_loading());
        assert_eq!(cell.value(), None);

        let cell = Loadable::Loaded(7u32);
        assert!(cell.is_loaded());
        assert_eq!(cell.value(), Some(&7));
        assert_eq!(cell.error(), None);

        let cell: Loadable<u32> = Loadable::Error("offline".to_string());
        assert_eq!(cell.value(), None);
        assert_eq!(cell.error(), Some("offline"));
    }

    #[test]
    fn test_default_is_not_loaded() {
        let cell: Loadable<String> = Loadable::default();
        assert!(cell.is_not_loaded());
    }
}
