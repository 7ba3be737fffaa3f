use anyhow::Result;
use serde::{Deserialize, Serialize};

use ton_transfers_utils::{pack_std_smc_addr, parse_raw_address};

use super::{AddressParser, AddressParserRegistryBuilder, ChainType};

/// User-friendly address rendering options
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TonAddressFormat {
    pub bounceable: bool,
    pub url_safe: bool,
    pub testnet: bool,
}

impl Default for TonAddressFormat {
    fn default() -> Self {
        Self {
            bounceable: true,
            url_safe: true,
            testnet: false,
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct TonAddressParser {
    format: TonAddressFormat,
}

impl TonAddressParser {
    pub fn new(format: TonAddressFormat) -> Self {
        Self { format }
    }
}

impl AddressParser for TonAddressParser {
    fn parse_raw_address(&self, raw: &str) -> Result<String> {
        let address = parse_raw_address(raw)?;
        pack_std_smc_addr(
            self.format.url_safe,
            &address,
            self.format.bounceable,
            self.format.testnet,
        )
    }
}

pub fn register(
    builder: AddressParserRegistryBuilder,
    format: TonAddressFormat,
) -> AddressParserRegistryBuilder {
    builder.register(ChainType::Ton, TonAddressParser::new(format))
}
