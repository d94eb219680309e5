//! Shared test harness modules for the Meander CLI.

use super::*;

pub(crate) mod helpers;
mod plan_unit;
