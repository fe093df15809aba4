// src/trace/mod.rs
pub mod decode;
pub mod error;
pub mod layout;
pub mod loader;
pub mod pipeline;
pub mod plot;
pub mod step;
pub mod timebase;
pub use error::TraceError;
pub use layout::TraceLayout;
pub use pipeline::{DecodedTrace, TracePipeline};
pub use plot::{render_trace_png, PlotStyle, TIME_AXIS_LABEL};
