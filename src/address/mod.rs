use std::collections::HashMap;

use anyhow::Result;

use crate::core::models::TransactionError;
use crate::core::InterpreterConfig;

pub use self::ton::{TonAddressFormat, TonAddressParser};

pub mod ton;

ton_transfers_utils::define_string_enum!(
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
    pub enum ChainType {
        /// TON family chains, addresses are rendered in the user-friendly base64 form
        Ton,
    }
);

/// Converts a raw `workchain:hex` address into the chain's user-facing form
pub trait AddressParser: Send + Sync {
    fn parse_raw_address(&self, raw: &str) -> Result<String>;
}

/// Chain type to address parser mapping.
///
/// Populated once through [`AddressParserRegistryBuilder`] and immutable afterwards,
/// so a single instance can be shared between threads without locking.
pub struct AddressParserRegistry {
    parsers: HashMap<ChainType, Box<dyn AddressParser>>,
}

impl AddressParserRegistry {
    pub fn builder() -> AddressParserRegistryBuilder {
        AddressParserRegistryBuilder::default()
    }

    /// Registry with every supported chain registered using its default settings
    pub fn with_defaults() -> Self {
        Self::from_config(&InterpreterConfig::default())
    }

    /// Registry with every supported chain registered, using the configured address format
    pub fn from_config(config: &InterpreterConfig) -> Self {
        let builder = Self::builder();
        let builder = ton::register(builder, config.address_format);
        builder.build()
    }

    pub fn get(&self, chain_type: ChainType) -> Result<&dyn AddressParser, TransactionError> {
        match self.parsers.get(&chain_type) {
            Some(parser) => Ok(parser.as_ref()),
            None => Err(TransactionError::UnknownChainType(chain_type)),
        }
    }

    pub fn contains(&self, chain_type: ChainType) -> bool {
        self.parsers.contains_key(&chain_type)
    }
}

#[derive(Default)]
pub struct AddressParserRegistryBuilder {
    parsers: HashMap<ChainType, Box<dyn AddressParser>>,
}

impl AddressParserRegistryBuilder {
    /// Registers a parser for the chain type, replacing the previous one
    pub fn register<P>(mut self, chain_type: ChainType, parser: P) -> Self
    where
        P: AddressParser + 'static,
    {
        if self.parsers.insert(chain_type, Box::new(parser)).is_some() {
            log::debug!("Address parser for {chain_type} replaced");
        }
        self
    }

    pub fn build(self) -> AddressParserRegistry {
        AddressParserRegistry {
            parsers: self.parsers,
        }
    }
}

/// Parses `raw` with the given parser, wrapping failures with the offending address
pub(crate) fn normalize_address(
    parser: &dyn AddressParser,
    raw: &str,
) -> Result<String, TransactionError> {
    parser
        .parse_raw_address(raw)
        .map_err(|reason| TransactionError::AddressParseError {
            address: raw.to_owned(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Uppercase;

    impl AddressParser for Uppercase {
        fn parse_raw_address(&self, raw: &str) -> Result<String> {
            Ok(raw.to_uppercase())
        }
    }

    #[test]
    fn missing_chain_type() {
        let registry = AddressParserRegistry::builder().build();
        assert!(!registry.contains(ChainType::Ton));
        assert!(matches!(
            registry.get(ChainType::Ton),
            Err(TransactionError::UnknownChainType(ChainType::Ton))
        ));
    }

    #[test]
    fn registered_parser_is_used() {
        let registry = AddressParserRegistry::builder()
            .register(ChainType::Ton, Uppercase)
            .build();
        let parser = registry.get(ChainType::Ton).unwrap();
        assert_eq!(parser.parse_raw_address("0:ab").unwrap(), "0:AB");
    }

    #[test]
    fn defaults_register_ton() {
        let registry = AddressParserRegistry::with_defaults();
        let parser = registry.get(ChainType::Ton).unwrap();
        assert_eq!(
            parser
                .parse_raw_address(
                    "0:98aa4f77fcb41fe2c0ee4d0934c9f993a49011c2f12ff5e0f69476b9ad836635"
                )
                .unwrap(),
            "EQCYqk93_LQf4sDuTQk0yfmTpJARwvEv9eD2lHa5rYNmNZSF"
        );
    }

    #[test]
    fn chain_type_names() {
        assert_eq!(ChainType::Ton.as_str(), "Ton");
        assert_eq!("Ton".parse::<ChainType>().unwrap(), ChainType::Ton);
        assert!("Eth".parse::<ChainType>().is_err());
    }

    #[test]
    fn normalize_wraps_errors() {
        let registry = AddressParserRegistry::with_defaults();
        let parser = registry.get(ChainType::Ton).unwrap();
        match normalize_address(parser, "garbage") {
            Err(TransactionError::AddressParseError { address, .. }) => {
                assert_eq!(address, "garbage")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
