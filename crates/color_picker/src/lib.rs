mod coalesce;
mod color;
mod dialog;
mod paint;
mod picker;
mod raster;
mod sliders;
mod swatch;

pub mod layout;
pub mod sliders_layout;

pub use coalesce::{FrameCoalescer, FrameTicket};
pub use color::{HUE_MAX, HslaColor, PERCENT_MAX, RgbaColor};
pub use dialog::{
    ColorChange, ColorPickerDialog, ColorPickerDialogOptions, ColorPickerDialogView,
    ColorPickerVariant, DEFAULT_HEX,
};
pub use layout::{DragTarget, RingLayout};
pub use picker::{ColorPicker, ColorPickerEvent, ColorPickerState};
pub use raster::RASTER_SCALE;
pub use sliders::{ColorSliders, ColorSlidersEvent, ColorSlidersState};
pub use sliders_layout::{HUE_SLIDER_MAX, SliderChannel, SlidersLayout};
pub use swatch::ColorSwatch;
