pub mod preprocessing;
pub mod extraction;
pub mod projection;
pub mod nearest;
pub mod roi;
pub mod drawing;
pub mod segmentation;

pub use preprocessing::*;
pub use extraction::*;
pub use projection::*;
pub use nearest::*;
pub use roi::*;
pub use drawing::*;
pub use segmentation::*;
