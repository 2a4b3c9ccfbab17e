use std::fmt;

/// Fidelity at which a sector is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelOfDetail {
    /// Not shown.
    #[default]
    Discarded,
    /// Shown using its coarse payload.
    Simple,
    /// Shown using its full payload.
    Detailed,
}

impl fmt::Display for LevelOfDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Discarded => "discarded",
            Self::Simple => "simple",
            Self::Detailed => "detailed",
        })
    }
}
