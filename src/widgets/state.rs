//! Widget lifecycle

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::WidgetError;

/// Lifecycle of one widget
///
/// `Idle → Loading → Ready | Failed`. Ready and Failed are terminal; any other
/// transition is logged and ignored.
#[derive(Debug)]
pub enum WidgetState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(WidgetError),
}

impl<T> WidgetState<T> {
    /// Idle → Loading
    pub fn begin(&mut self) {
        match self {
            WidgetState::Idle => *self = WidgetState::Loading,
            other => tracing::warn!("Ignoring begin() in state {}", other.label()),
        }
    }

    /// Loading → Ready or Failed
    pub fn settle(&mut self, result: Result<T, WidgetError>) {
        if !matches!(self, WidgetState::Loading) {
            tracing::warn!("Ignoring settle() in state {}", self.label());
            return;
        }
        *self = match result {
            Ok(data) => WidgetState::Ready(data),
            Err(e) => WidgetState::Failed(e),
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetState::Idle => "idle",
            WidgetState::Loading => "loading",
            WidgetState::Ready(_) => "ready",
            WidgetState::Failed(_) => "failed",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, WidgetState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, WidgetState::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            WidgetState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WidgetError> {
        match self {
            WidgetState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for WidgetState<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WidgetState::Ready(data) => {
                let mut s = serializer.serialize_struct("WidgetState", 2)?;
                s.serialize_field("status", self.label())?;
                s.serialize_field("data", data)?;
                s.end()
            }
            WidgetState::Failed(e) => {
                let mut s = serializer.serialize_struct("WidgetState", 2)?;
                s.serialize_field("status", self.label())?;
                s.serialize_field("error", &e.to_string())?;
                s.end()
            }
            _ => {
                let mut s = serializer.serialize_struct("WidgetState", 1)?;
                s.serialize_field("status", self.label())?;
                s.end()
            }
        }
    }
}
