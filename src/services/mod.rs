pub mod frame_renderer;

pub use frame_renderer::{list_frames, BatchReport, FrameRenderer};
