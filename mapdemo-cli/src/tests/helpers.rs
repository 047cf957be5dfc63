//! Test helpers for building search invocations without a network.

use super::*;
use crate::search::{SearchConfig, SearchProviderBuilder};
use mapdemo_core::test_support::StubPlaceSearchProvider;

/// Builder handing out a pre-configured stub provider.
#[derive(Debug, Clone)]
pub(super) struct StubSearchProviderBuilder {
    pub(super) provider: StubPlaceSearchProvider,
}

impl SearchProviderBuilder for StubSearchProviderBuilder {
    type Provider = StubPlaceSearchProvider;

    fn build(&self, _config: &SearchConfig) -> Result<Self::Provider, CliError> {
        Ok(self.provider.clone())
    }
}

/// Argument vector for `mapdemo search coffee` around Cupertino.
pub(super) fn search_command_line(extra: &[&str]) -> Vec<String> {
    let mut argv: Vec<String> = [
        "mapdemo",
        "search",
        "coffee",
        "--latitude",
        "37.33",
        "--longitude",
        "-122.03",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    argv.extend(extra.iter().map(ToString::to_string));
    argv
}
