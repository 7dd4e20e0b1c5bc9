//! Progress indication for one-shot mode

pub mod spinner;
