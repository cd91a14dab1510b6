use crate::{foundation::core::TimeIndex, palette::Palette};

/// One named numeric series with an optionally assigned display color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Per-update payload pushed by the image pipeline.
///
/// `fields` is optional on the wire: a transient bad frame may carry no field
/// collection at all, and the chart degrades to empty rather than raising.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl ProbeData {
    pub fn with_fields(fields: Vec<Field>) -> Self {
        Self {
            fields: Some(fields),
        }
    }
}

/// Chart series kind understood by the trace-oriented plotting contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
}

/// Line styling for a trace.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineStyle {
    pub color: String,
}

/// Render-ready representation of one field across the full time axis.
///
/// Serializes to the chart renderer's wire shape: x is the index sequence
/// `0..N-1`, y the field values; `text` stays empty to suppress marker labels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trace {
    pub x: Vec<u64>,
    pub y: Vec<f64>,
    pub name: String,
    pub line: LineStyle,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub text: Vec<String>,
}

/// Transient record associating a rendered series with a time index.
///
/// Regenerated whenever the field set changes; only `point_number` mutates on
/// cursor moves. The point index is absent until the first marker event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HoverEntry {
    #[serde(rename = "curveNumber")]
    pub curve_number: usize,
    #[serde(rename = "pointNumber", skip_serializing_if = "Option::is_none")]
    pub point_number: Option<TimeIndex>,
}

/// Hover payload attached to marker-move notifications.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HoverState {
    pub enable: bool,
    #[serde(rename = "hoverList")]
    pub hover_list: Vec<HoverEntry>,
}

/// Notification pushed through the data-ready channel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartUpdate {
    #[serde(rename = "forceNewPlot")]
    pub force_new_plot: bool,
    pub traces: Vec<Trace>,
    #[serde(rename = "hoverList", skip_serializing_if = "Option::is_none")]
    pub hover_list: Option<Vec<HoverEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverState>,
}

impl ChartUpdate {
    /// Data-refresh notification: `{forceNewPlot: false, traces, hoverList}`.
    pub fn data(traces: Vec<Trace>, hover_list: Vec<HoverEntry>) -> Self {
        Self {
            force_new_plot: false,
            traces,
            hover_list: Some(hover_list),
            hover: None,
        }
    }

    /// Marker-move notification:
    /// `{forceNewPlot: false, traces, hover: {enable: true, hoverList}}`.
    pub fn marker(traces: Vec<Trace>, hover: HoverState) -> Self {
        Self {
            force_new_plot: false,
            traces,
            hover_list: None,
            hover: Some(hover),
        }
    }
}

/// Assign palette colors to fields that lack one, cycling by running index.
///
/// Fields that already carry a color keep it and do not consume a slot, so
/// repeated calls over an already-colored set assign nothing.
pub fn assign_missing_colors(fields: &mut [Field], palette: &Palette) {
    let mut color_index = 0usize;
    for field in fields.iter_mut() {
        if field.color.is_none() {
            field.color = Some(palette.color(color_index).to_string());
            color_index += 1;
        }
    }
}

/// Build the render-ready trace set and fresh hover entries for a field set.
///
/// A missing field collection is the explicit degrade-to-empty branch: the
/// chart shows nothing rather than the engine raising on a bad frame.
pub fn build_traces(fields: Option<&[Field]>) -> (Vec<Trace>, Vec<HoverEntry>) {
    let Some(fields) = fields else {
        tracing::warn!("probe update carried no field collection, degrading to empty chart");
        return (Vec::new(), Vec::new());
    };

    let mut traces = Vec::with_capacity(fields.len());
    let mut hover_list = Vec::with_capacity(fields.len());
    for field in fields {
        traces.push(Trace {
            x: (0..field.data.len() as u64).collect(),
            y: field.data.clone(),
            name: field.name.clone(),
            line: LineStyle {
                color: field.color.clone().unwrap_or_default(),
            },
            kind: TraceKind::Scatter,
            text: Vec::new(),
        });
        hover_list.push(HoverEntry {
            curve_number: traces.len() - 1,
            point_number: None,
        });
    }
    (traces, hover_list)
}
