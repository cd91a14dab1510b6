//! Named color palettes for probe chart series.
//!
//! These are the classic qualitative sets; descriptors pick one by name via
//! `metadata.probePalette`, falling back to [`DEFAULT_PALETTE`].

/// A fixed, ordered set of CSS hex colors.
///
/// Invariant: `colors` is never empty, so index cycling is always defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl Palette {
    /// Color for `index`, cycling through the palette (index modulo length).
    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

pub const PAIRED: Palette = Palette {
    name: "Paired",
    colors: &[
        "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
        "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
    ],
};

pub const SET1: Palette = Palette {
    name: "Set1",
    colors: &[
        "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
        "#999999",
    ],
};

pub const SET2: Palette = Palette {
    name: "Set2",
    colors: &[
        "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
    ],
};

pub const DARK2: Palette = Palette {
    name: "Dark2",
    colors: &[
        "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
    ],
};

pub const ACCENT: Palette = Palette {
    name: "Accent",
    colors: &[
        "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
    ],
};

/// Palette used when a descriptor names none (or an unknown one).
pub const DEFAULT_PALETTE: &Palette = &PAIRED;

const REGISTRY: &[&Palette] = &[&PAIRED, &SET1, &SET2, &DARK2, &ACCENT];

/// Look up a palette by its registered name.
pub fn by_name(name: &str) -> Option<&'static Palette> {
    REGISTRY.iter().copied().find(|p| p.name == name)
}

/// Resolve an optional palette-name hint, falling back to the default.
pub fn select(name: Option<&str>) -> &'static Palette {
    name.and_then(by_name).unwrap_or(DEFAULT_PALETTE)
}
