//! Filter chains that simulate reshaping.
//!
//! A reshape preset resolves to an ordered [`FilterChain`] of blur, sharpen,
//! modulate and linear-contrast steps, which [`apply_filter_chain`] runs
//! against a buffer.

mod chain;
mod ops;

pub use chain::{
    build_filter_chain, preset_template, Coefficient, FilterChain, FilterStep, StepTemplate,
    DEFAULT_FLAT, DEFAULT_JAGGED,
};
pub use ops::{apply_filter_chain, apply_step, blur, linear, modulate, sharpen, FLAT_THRESHOLD};
