//! Test harness for the CLI: parsing units, full pipelines, and behaviour
//! scenarios, plus the shared workspace helpers they build on.

use super::*;

mod helpers;
mod pipeline;
