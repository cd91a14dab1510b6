use std::rc::Rc;

use crate::{
    chart::bridge::ChartPainter,
    foundation::error::ViewerResult,
    query::QueryDataModel,
};

/// Retrieves the remote JSON descriptor body.
///
/// Transport mechanics live outside this crate; the engine only sees the
/// parsed body or a fetch error, delivered through the completion callback.
/// The callback always fires, even if the host container went away in the
/// meantime.
pub trait DescriptorFetcher {
    fn fetch(&self, url: &str, on_done: Box<dyn FnOnce(ViewerResult<serde_json::Value>)>);
}

/// Renders pushed chart updates.
///
/// The renderer receives a painter-shaped object and subscribes to its
/// data-ready channel; there is no pull path.
pub trait ChartRenderer {
    fn attach(&self, painter: Rc<dyn ChartPainter>);

    /// Re-measure the chart after its overlay window is resized.
    fn update_dimensions(&self);
}

/// Geometry for the probe chart's overlay window.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
    pub title_bar_height: u32,
    pub margin_size: u32,
    pub hot_corner_extra: u32,
    pub min_content_width: u32,
    pub min_content_height: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: "Time Probe Chart".to_string(),
            width: 500,
            height: 250,
            x: 100,
            y: 100,
            title_bar_height: 20,
            margin_size: 5,
            hot_corner_extra: 4,
            min_content_width: 200,
            min_content_height: 100,
        }
    }
}

/// Which pipeline a mount belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountKind {
    Image,
    Probe,
    Composite,
}

/// What the resolver asks the host to display.
pub enum ViewMount {
    /// Plain image viewer over an eagerly-fetched model.
    Image { model: Rc<dyn QueryDataModel> },

    /// Probe viewer: image view plus the synthetic time chart in an overlay.
    Probe {
        model: Rc<dyn QueryDataModel>,
        /// The chart data bridge, handed over in its painter shape.
        chart: Rc<dyn ChartPainter>,
        overlay: OverlayConfig,
        /// Opaque initial UI state from the descriptor.
        initial_state: serde_json::Value,
        /// Magic-lens interaction is not available in probe mode.
        allow_magic_lens: bool,
        probe: bool,
    },

    /// Composite viewer over an externally built composite pipeline.
    Composite { model: Rc<dyn QueryDataModel> },
}

impl ViewMount {
    pub fn kind(&self) -> MountKind {
        match self {
            ViewMount::Image { .. } => MountKind::Image,
            ViewMount::Probe { .. } => MountKind::Probe,
            ViewMount::Composite { .. } => MountKind::Composite,
        }
    }
}

/// The DOM-like element the resolved viewer mounts into.
///
/// All interaction with the page goes through this seam: styling, mounting,
/// re-render requests, blocking alerts, and the one-shot deferred task used
/// to land the first data paint after the UI tree has mounted.
pub trait Host {
    /// Apply a CSS background color to the container.
    fn set_background(&self, css_color: &str);

    /// Mount a resolved view. Fails when the container is gone; callers
    /// treat that as a skipped mount, not a panic.
    fn mount(&self, view: ViewMount) -> ViewerResult<()>;

    /// Ask the mounted component tree to re-render.
    fn request_refresh(&self);

    /// Blocking, user-visible alert.
    fn alert(&self, message: &str);

    /// Run a one-shot task after the current mount settles.
    fn defer(&self, task: Box<dyn FnOnce()>);
}
