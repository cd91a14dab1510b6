//! Probeview resolves a remote dataset descriptor into interactive viewer
//! pipelines and keeps a time-probe chart synchronized with an image view.
//!
//! # Pipeline overview
//!
//! 1. **Fetch**: a [`DescriptorFetcher`] delivers the descriptor JSON body.
//! 2. **Resolve**: [`resolve`] parses the `type` tags into a [`CapabilitySet`]
//!    and activates the matching pipelines (`Plain | Probe | Composite`).
//! 3. **Bridge**: for probe datasets, a [`ChartDataBridge`] adapts the
//!    time-indexed image source to the chart renderer's trace contract.
//! 4. **Synchronize**: a [`TimeProbeSynchronizer`] keeps hover state, series
//!    colors, and the time marker consistent across both surfaces.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Headless**: rendering primitives, the data model, and the page are
//!   external collaborators behind trait seams; everything here is plain
//!   state logic and fully unit-testable.
//! - **Single-threaded, event-driven**: all mutation happens on the event
//!   loop as a reaction to fetch completion, UI events, or data-ready
//!   callbacks. Nothing blocks, nothing polls.
//! - **Degrade, don't raise**: per-update payload problems collapse to an
//!   empty chart; only fetch- and descriptor-level errors are terminal.
#![forbid(unsafe_code)]

pub mod chart;
pub mod descriptor;
pub mod foundation;
pub mod palette;
pub mod probe;
pub mod query;
pub mod viewer;

pub use chart::bridge::{ChartDataBridge, ChartPainter};
pub use chart::trace::{
    ChartUpdate, Field, HoverEntry, HoverState, LineStyle, ProbeData, Trace, TraceKind,
    assign_missing_colors, build_traces,
};
pub use descriptor::capability::{
    COMPOSITE_TAG, CapabilitySet, MODEL_TAG, PROBER_TAG, PipelineKind,
};
pub use descriptor::model::{Descriptor, FloatImage, Layer, Metadata};
pub use foundation::core::{NormalizedPosition, TIME_DIMENSION, TimeIndex};
pub use foundation::error::{ViewerError, ViewerResult};
pub use foundation::slot::CallbackSlot;
pub use palette::{DEFAULT_PALETTE, Palette};
pub use probe::lut::{LookupTableLink, LookupTableManager};
pub use probe::sync::{FloatImagePipeline, ModelChange, TimeProbeSynchronizer};
pub use query::{QueryDataModel, QueryDataModelFactory};
pub use viewer::host::{
    ChartRenderer, DescriptorFetcher, Host, MountKind, OverlayConfig, ViewMount,
};
pub use viewer::resolve::{
    CompositeImagePipeline, DEFAULT_DATA_BASE_PATH, ImagePipelineFactory, ProbeSession,
    ResolvedViewer, UNSUPPORTED_FORMAT_ALERT, ViewerEnv, download_failure_alert, load, resolve,
};
