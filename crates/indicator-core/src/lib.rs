// File: crates/indicator-core/src/lib.rs
// Summary: Core library entry point; exports the indicator layout, scene, and animation API.

pub mod axis;
pub mod domain;
pub mod indicator;
pub mod layout;
pub mod mapper;
pub mod raster;
pub mod scene;
pub mod spec;
pub mod text;
pub mod transition;
pub mod types;

pub use domain::PlotArea;
pub use indicator::{Indicator, IndicatorRenderer, RenderState};
pub use mapper::{AngleMapper, PositionMapper};
pub use raster::{RasterError, Rasterizer, RenderOptions};
pub use scene::{Category, Scene, Shape};
pub use spec::{GaugeOpts, GaugeShape, IndicatorSpec, Mode, Step, Threshold};
pub use text::{HeuristicMeasurer, TextMeasurer, TextShaper};
pub use transition::{Easing, Transition, TransitionGroup, TransitionOptions};
pub use types::CanvasSize;
