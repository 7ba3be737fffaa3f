use std::str::FromStr;

use anyhow::Result;
use base64::URL_SAFE;
use ton_block::MsgAddressInt;

use crate::crc::crc_16;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TESTNET_FLAG: u8 = 0x80;

/// Parses a raw `workchain:hex` address
pub fn parse_raw_address(raw: &str) -> Result<MsgAddressInt> {
    if raw.is_empty() {
        return Err(AddressConversionError::EmptyAddress.into());
    }
    MsgAddressInt::from_str(raw).map_err(|_| AddressConversionError::InvalidAddress.into())
}

///Packs std address to base64 format
/// # Arguments
/// `base64_url` - encode with url friendly charset or not
/// `testnet` - set the testnet-only flag in the address tag
pub fn pack_std_smc_addr(
    base64_url: bool,
    addr: &MsgAddressInt,
    bounceable: bool,
    testnet: bool,
) -> Result<String> {
    let addr = match addr {
        MsgAddressInt::AddrStd(addr) => addr,
        MsgAddressInt::AddrVar(_) => {
            return Err(AddressConversionError::UnsupportedAddressType.into());
        }
    };
    if addr.address.remaining_bits() != 256 {
        return Err(AddressConversionError::InvalidAddress.into());
    }

    let mut buffer = [0u8; 36];
    buffer[0] = if bounceable {
        TAG_BOUNCEABLE
    } else {
        TAG_NON_BOUNCEABLE
    };
    if testnet {
        buffer[0] |= TAG_TESTNET_FLAG;
    }
    buffer[1] = addr.workchain_id as u8;
    buffer[2..34].copy_from_slice(&addr.address.storage()[0..32]);
    let crc = crc_16(&buffer[..34]);
    buffer[34] = (crc >> 8) as u8;
    buffer[35] = (crc & 0xff) as u8;

    Ok(if base64_url {
        base64::encode_config(buffer, URL_SAFE)
    } else {
        base64::encode(buffer)
    })
}

#[derive(thiserror::Error, Debug)]
pub enum AddressConversionError {
    #[error("Empty address")]
    EmptyAddress,
    #[error("Unsupported address type")]
    UnsupportedAddressType,
    #[error("Invalid address")]
    InvalidAddress,
}
