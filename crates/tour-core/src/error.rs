/// Errors raised while loading and validating tour data.
///
/// All of these are fatal at startup: a tour that fails validation is never
/// handed to the engine.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The raw document is not valid JSON or does not match the schema.
    #[error("invalid tour configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tour needs at least one scene to start from.
    #[error("tour configuration declares no scenes")]
    EmptyTour,

    /// Two scenes share the same id.
    #[error("duplicate scene id `{id}`")]
    DuplicateScene { id: String },

    /// A hotspot points at a scene that does not exist.
    #[error("hotspot `{hotspot}` in scene `{scene}` targets unknown scene `{target}`")]
    DanglingHotspot {
        scene: String,
        hotspot: String,
        target: String,
    },

    /// An angle or field of view is NaN or infinite.
    #[error("scene `{scene}` has a non-finite `{field}`")]
    InvalidAngle { scene: String, field: String },

    /// A `viewer` setting is outside the range the renderer can honor.
    #[error("viewer setting `{field}` = {value} is out of range")]
    InvalidViewerSetting { field: &'static str, value: f64 },
}

/// Lookup of a scene id that is not part of the graph.
///
/// After validation this indicates a programming defect rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scene `{id}` not found")]
pub struct NotFoundError {
    pub id: String,
}
