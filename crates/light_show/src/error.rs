use pixel_views::ViewError;

use crate::controller::ControllerError;
use crate::strip::StripError;

#[derive(Debug, derive_more::Display, derive_more::IsVariant)]
enum ErrorPayload {
    #[display(fmt = "View error: {}", _0)]
    View(ViewError),

    #[display(fmt = "Strip error: {}", _0)]
    Strip(StripError),

    #[display(fmt = "Controller error: {}", _0)]
    Controller(ControllerError),
}

#[derive(Debug, thiserror::Error)]
#[error("{payload}")]
pub struct Error {
    payload: ErrorPayload,
}

macro_rules! conv {
    ($variant: ident, $from_err: path) => {
        impl From<$from_err> for Error {
            fn from(value: $from_err) -> Error {
                Error {
                    payload: ErrorPayload::$variant(value),
                }
            }
        }
    };
}

conv!(View, ViewError);
conv!(Strip, StripError);
conv!(Controller, ControllerError);

impl Error {
    fn view(&self) -> Option<&ViewError> {
        match &self.payload {
            ErrorPayload::View(e) => Some(e),
            _ => None,
        }
    }

    /// Was an index outside `[-len, len)`?
    pub fn is_out_of_range(&self) -> bool {
        self.view().is_some_and(ViewError::is_out_of_range)
    }

    /// Did a bulk operand have the wrong number of elements?
    pub fn is_size_mismatch(&self) -> bool {
        self.view().is_some_and(ViewError::is_size_mismatch)
    }

    /// Was a view or strip set built from nothing?
    pub fn is_empty_construction(&self) -> bool {
        self.view().is_some_and(ViewError::is_empty_construction)
    }

    pub fn is_divide_by_zero(&self) -> bool {
        self.view().is_some_and(ViewError::is_divide_by_zero)
    }

    /// Did the channels of a strip, or the per-channel arrays of a controller configuration, differ in length?
    pub fn is_length_mismatch(&self) -> bool {
        match &self.payload {
            ErrorPayload::Strip(e) => e.is_length_mismatch(),
            ErrorPayload::Controller(e) => e.is_length_mismatch(),
            ErrorPayload::View(_) => false,
        }
    }

    /// Was a bulk HSV table not `[len, 3]`?
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(&self.payload, ErrorPayload::Strip(e) if e.is_shape_mismatch())
    }

    /// Did the controller reject its configuration?
    pub fn is_controller(&self) -> bool {
        self.payload.is_controller()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
