#![doc = include_str!("../README.md")]

pub(crate) mod bar;
pub(crate) mod format;
pub(crate) mod iter;
pub(crate) mod stream;

#[cfg(feature = "tokio")]
pub(crate) mod async_stream;
#[cfg(feature = "tracing")]
pub(crate) mod tracing;

#[cfg(test)]
mod test;

/// Re-exports of all public types and traits.
pub mod prelude {
    #[cfg(feature = "tokio")]
    pub use crate::async_stream::IntoAsyncProgressStream;
    pub use crate::bar::{DEFAULT_BAR_CHAR, DEFAULT_BAR_SIZE, DEFAULT_FORMAT, ProgressBar};
    pub use crate::format::{Fields, apply as apply_template};
    pub use crate::iter::{
        DEFAULT_STEP, ProgressSliceExt, RangeIter, SequenceIter, range, step_range,
    };
    pub use crate::stream::{IntoProgressStream, ProgressStream};
    #[cfg(feature = "tracing")]
    pub use crate::tracing::{ProgressLayer, progress_layer};
}

pub use crate::prelude::*;
