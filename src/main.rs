//! # imgsim CLI
//!
//! Command-line interface for perceptual image similarity search.
//!
//! ## Usage
//! ```bash
//! imgsim hash photo.jpg --algorithm dhash
//! imgsim search ~/Photos --query photo.jpg --max-distance 8
//! ```

mod cli;

use image_similarity::Result;

fn main() -> Result<()> {
    cli::run()
}
