use crate::foundation::error::{ViewerError, ViewerResult};

/// Root JSON metadata document describing a dataset and which visualization
/// capabilities it supports.
///
/// Field names follow the descriptor wire format exactly; unknown payload keys
/// are ignored so pipeline-specific extensions never break deserialization.
/// The `type` tag sequence is immutable once loaded.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Descriptor {
    /// Ordered sequence of capability tags.
    #[serde(rename = "type")]
    pub tags: Vec<String>,

    /// Optional display hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Float-image layer collection, present for probe-capable datasets.
    #[serde(rename = "FloatImage", default, skip_serializing_if = "Option::is_none")]
    pub float_image: Option<FloatImage>,

    /// Query arguments to animate, applied at probe activation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments_active: Vec<String>,

    /// Opaque initial UI state forwarded to the mounted probe view.
    #[serde(
        rename = "initialState",
        default,
        skip_serializing_if = "serde_json::Value::is_null"
    )]
    pub initial_state: serde_json::Value,
}

/// Display hints attached to a descriptor.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    /// CSS color applied to the host container before any viewer mounts.
    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,

    /// Name of the palette used for probe chart series colors.
    #[serde(
        rename = "probePalette",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub probe_palette: Option<String>,
}

/// Float-image payload section.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FloatImage {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// One image layer declared by the descriptor.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub name: String,
}

impl Descriptor {
    /// Deserialize a descriptor from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> ViewerResult<Self> {
        serde_json::from_value(value).map_err(|err| ViewerError::serde(err.to_string()))
    }

    /// Deserialize a descriptor from a JSON string.
    pub fn from_json(body: &str) -> ViewerResult<Self> {
        serde_json::from_str(body).map_err(|err| ViewerError::serde(err.to_string()))
    }

    /// Background color hint, if the descriptor carries one.
    pub fn background_color(&self) -> Option<&str> {
        self.metadata.as_ref()?.background_color.as_deref()
    }

    /// Probe palette name hint, if the descriptor carries one.
    pub fn probe_palette(&self) -> Option<&str> {
        self.metadata.as_ref()?.probe_palette.as_deref()
    }

    /// The single image layer the probe pipeline colors.
    ///
    /// The probe pipeline supports exactly one layer; anything else fails
    /// fast here instead of proceeding into undefined coloring behavior.
    pub fn probe_layer(&self) -> ViewerResult<&Layer> {
        let layers = self
            .float_image
            .as_ref()
            .map(|fi| fi.layers.as_slice())
            .unwrap_or_default();
        match layers {
            [layer] => Ok(layer),
            [] => Err(ViewerError::validation(
                "probe pipeline requires a FloatImage layer, descriptor declares none",
            )),
            _ => Err(ViewerError::validation(format!(
                "probe pipeline supports exactly one image layer, descriptor declares {}",
                layers.len()
            ))),
        }
    }
}
