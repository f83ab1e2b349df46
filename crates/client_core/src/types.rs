use crate::error::ErrorMessage;

/// Lifecycle of one user-triggered flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FlowState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(ErrorMessage),
}

impl<T> FlowState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(payload) => Some(payload),
            _ => None,
        }
    }
}

impl<U> FlowState<Vec<U>> {
    /// Items to render; empty unless the flow loaded successfully.
    pub fn items(&self) -> &[U] {
        match self {
            Self::Loaded(items) => items,
            _ => &[],
        }
    }
}

/// What became of a dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing was sent (blank query).
    Skipped,
    /// The response was written to the flow state.
    Applied,
    /// A newer request on the same flow was dispatched first; the response was dropped.
    Superseded,
}
