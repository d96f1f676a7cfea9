use std::sync::Arc;

use alloy_primitives::Address;
use chainql_primitives::NetworkId;

use crate::ContractError;
use crate::ContractInterface;

/// A deployed contract on a specific network, together with the
/// methods it is known to support.
#[derive(Clone, Debug)]
pub struct ContractHandle {
    network: NetworkId,
    address: Address,
    interface: Arc<ContractInterface>,
}

impl ContractHandle {
    pub fn new(network: NetworkId, address: Address, interface: Arc<ContractInterface>) -> Self {
        Self {
            network,
            address,
            interface,
        }
    }

    /// Parses a hex address; both checksummed and lowercase forms are accepted.
    pub fn parse(
        network: NetworkId,
        address: &str,
        interface: Arc<ContractInterface>,
    ) -> Result<Self, ContractError> {
        let address = address
            .parse::<Address>()
            .map_err(|_| ContractError::InvalidAddress(address.to_owned()))?;

        Ok(Self::new(network, address, interface))
    }

    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.interface.contains(method)
    }
}
