/// Dimension bookkeeping for an animation's frames.
///
/// An empty animation is `Uniform { 0, 0 }`. Once a frame of a different size is admitted
/// the shape becomes `NonUniform` and stays there until a bulk transform resets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FrameShape {
    Uniform { width: u32, height: u32 },
    NonUniform,
}

impl FrameShape {
    pub const EMPTY: FrameShape = FrameShape::Uniform {
        width: 0,
        height: 0,
    };

    pub fn uniform(width: u32, height: u32) -> Self {
        Self::Uniform { width, height }
    }

    pub fn is_uniform(self) -> bool {
        matches!(self, Self::Uniform { .. })
    }

    /// Shared dimensions, `(0, 0)` when non-uniform.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Uniform { width, height } => (width, height),
            Self::NonUniform => (0, 0),
        }
    }

    /// Transition for appending a `width x height` frame to a non-empty animation.
    pub fn admit(self, width: u32, height: u32) -> Self {
        match self {
            Self::Uniform {
                width: w,
                height: h,
            } if w == width && h == height => self,
            _ => Self::NonUniform,
        }
    }
}

impl Default for FrameShape {
    fn default() -> Self {
        Self::EMPTY
    }
}
