//! Shared test harness modules for the map demo CLI.

use super::*;

mod helpers;
mod search_unit;
