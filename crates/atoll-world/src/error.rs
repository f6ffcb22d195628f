use atoll_grid::Size;

/// Which threshold a [`GenError::InvalidThreshold`] refers to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdKind {
    /// Noise cutoff outside `[0, 1]`.
    Noise(f64),
    /// Negative island-size cutoff.
    IslandSize(i64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum GenError {
    InvalidSize { width: i32, height: i32 },
    InvalidProbability(f64),
    InvalidThreshold(ThresholdKind),
    InvalidScale(f64),
    InvalidPolicy(String),
    /// Region labels that were not computed from the grid being filtered.
    LabelMismatch {
        grid: (usize, usize),
        labels: (usize, usize),
    },
    WorkerPool(String),
}

impl GenError {
    pub(crate) fn invalid_size(size: Size) -> Self {
        GenError::InvalidSize {
            width: size.width,
            height: size.height,
        }
    }
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenError::InvalidSize { width, height } => {
                write!(f, "invalid map size {}x{}: dimensions must be >= 0", width, height)
            }
            GenError::InvalidProbability(p) => {
                write!(f, "ground probability {} is outside [0, 1]", p)
            }
            GenError::InvalidThreshold(ThresholdKind::Noise(t)) => {
                write!(f, "noise threshold {} is outside [0, 1]", t)
            }
            GenError::InvalidThreshold(ThresholdKind::IslandSize(t)) => {
                write!(f, "island size threshold {} is negative", t)
            }
            GenError::InvalidScale(s) => write!(f, "noise scale {} must be finite and > 0", s),
            GenError::InvalidPolicy(name) => write!(f, "unknown island policy '{}'", name),
            GenError::LabelMismatch { grid, labels } => write!(
                f,
                "region labels are {}x{} but the grid is {}x{}",
                labels.0, labels.1, grid.0, grid.1
            ),
            GenError::WorkerPool(msg) => write!(f, "worker pool: {}", msg),
        }
    }
}

impl std::error::Error for GenError {}
