//! Pure path math: construction, smoothing, outlining, hit-testing. No
//! engine state lives here.

pub mod hit_testing;
mod outline;
mod path;
mod smoothing;

pub use outline::{CapStyle, JoinStyle, outline};
pub use path::{FLATTEN_TOLERANCE, Path, PathSegment};
pub use smoothing::{build_path, smooth};
