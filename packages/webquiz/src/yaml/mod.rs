//! YAML output of a built quiz document.

mod writer;

pub use writer::{generate_yaml, output_path, save_yaml};
