pub mod backend;
pub mod raster;
pub mod recording;
