use thiserror::Error;

/// Top-level error type for isovist queries.
#[derive(Debug, Error)]
pub enum IsovistError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Structural problems with the caller's input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no regions were provided")]
    EmptyInput,

    #[error("regions are not coplanar")]
    NotCoplanar,

    #[error("observer ({x}, {y}, {z}) is not inside the master region")]
    ObserverOutside { x: f64, y: f64, z: f64 },

    #[error("observer ({x}, {y}, {z}) lies inside void {index}")]
    ObserverInsideVoid { index: usize, x: f64, y: f64, z: f64 },

    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polyline is not closed")]
    OpenPolyline,

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Convenience type alias for results using [`IsovistError`].
pub type Result<T> = std::result::Result<T, IsovistError>;
