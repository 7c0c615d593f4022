//! Decode pipeline
//!
//! `Processor` drives one private LibRaw session per call through
//! init, open, unpack, process and make-image, then translates the result.
//! `SessionGuard` releases the session, its memory image and the parameter
//! strings on every exit path.

mod driver;
mod teardown;
mod timing;


pub use driver::Processor;
pub use teardown::{release, SessionGuard};
pub use timing::{PipelineTimings, StepTiming, Timer};
