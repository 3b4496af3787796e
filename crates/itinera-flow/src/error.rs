use itinera_contract::WidgetType;
use thiserror::Error;

pub type FlowResult<T> = Result<T, FlowError>;

/// Violations of the widget ledger's invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// A widget is already awaiting user input; a second one may not open.
    #[error("widget {open:?} on message {message_id} is still open")]
    WidgetAlreadyOpen {
        message_id: String,
        open: WidgetType,
    },

    /// Resolution arrived for a (message, widget) pair that is not the
    /// currently open one.
    #[error("widget {widget:?} on message {message_id} is stale or unknown")]
    StaleWidget {
        message_id: String,
        widget: WidgetType,
    },

    /// Resolution arrived while no widget was open at all.
    #[error("no widget is open")]
    NoOpenWidget,
}

impl FlowError {
    #[inline]
    pub fn already_open(message_id: impl Into<String>, open: WidgetType) -> Self {
        FlowError::WidgetAlreadyOpen {
            message_id: message_id.into(),
            open,
        }
    }

    #[inline]
    pub fn stale(message_id: impl Into<String>, widget: WidgetType) -> Self {
        FlowError::StaleWidget {
            message_id: message_id.into(),
            widget,
        }
    }
}
