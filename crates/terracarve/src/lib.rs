//! Heightfield rendering to grayscale TGA: the sampler, the run-length
//! packetizer and the container codec.

pub mod raster;
pub mod rle;
pub mod tga;
