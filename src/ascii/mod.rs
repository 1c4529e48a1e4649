//! Converts RGB frames into character grids for terminal display.
//!
//! The pipeline is:
//!
//! 1. **Grayscale conversion** - RGB to luminance using BT.601
//! 2. **Downsampling** - average pixels into one value per character cell
//! 3. **Character mapping** - gamma-corrected brightness to a density ramp
//!
//! Cell colors are averaged alongside brightness so the terminal can draw
//! each character in the true color of the area it covers.

mod charset;
mod dimensions;
mod downsample;
mod grayscale;
mod mapping;

pub use charset::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use dimensions::{fit_dimensions, DEFAULT_CHAR_ASPECT_RATIO};
pub use downsample::{downsample, downsample_colors, CellColor};
pub use grayscale::to_grayscale;
pub use mapping::{gamma_correct, map_to_chars};
