pub mod carousel;
pub mod engine;
pub mod pointer;
pub mod track;
pub mod zoom;

pub use carousel::{CarouselKey, CarouselState, FrameTransform, InputResponse, SpringBack};
pub use engine::{EngineOutput, GestureEngine, Phase, decide_swipe};
pub use pointer::{GestureState, PointerId, PointerSample};
pub use track::Track;
pub use zoom::{ZoomSpring, ZoomState};
