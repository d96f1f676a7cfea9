use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use chainql_primitives::NetworkId;
use reqwest::Url;

use crate::ChainError;
use crate::JsonRpcTransport;

/// A network name and the URL of the node that serves it, written as `NAME:URL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkEndpoint {
    pub network: NetworkId,
    pub url: Url,
}

impl FromStr for NetworkEndpoint {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChainError::InvalidEndpoint(s.to_owned());

        let (name, url) = s.split_once(':').ok_or_else(invalid)?;
        let name = name.trim();

        if name.is_empty() {
            return Err(invalid());
        }

        let url = Url::parse(url.trim()).map_err(|_| invalid())?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }

        Ok(Self {
            network: NetworkId::new(name),
            url,
        })
    }
}

/// The transports of all configured networks.
#[derive(Clone, Default)]
pub struct Networks {
    transports: BTreeMap<NetworkId, Arc<dyn JsonRpcTransport>>,
}

impl Networks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(
        self,
        network: NetworkId,
        transport: Arc<dyn JsonRpcTransport>,
    ) -> Result<Self, ChainError> {
        let Self { mut transports } = self;

        if transports.contains_key(&network) {
            return Err(ChainError::DuplicateNetwork(network));
        }

        transports.insert(network, transport);

        Ok(Self { transports })
    }

    pub fn transport(&self, network: &NetworkId) -> Option<Arc<dyn JsonRpcTransport>> {
        self.transports.get(network).cloned()
    }

    pub fn contains(&self, network: &NetworkId) -> bool {
        self.transports.contains_key(network)
    }

    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }
}
