use anchor_lang::prelude::*;

use crate::error::UniversalNftError;

/// Revert options as laid out by the ZetaChain Solana gateway.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GatewayRevertOptions {
    pub revert_address: Pubkey,
    pub abort_address: Pubkey,
    pub call_on_revert: bool,
    pub revert_message: Vec<u8>,
    pub on_revert_gas_limit: u64,
}

/// Encode the Anchor instruction data for the gateway `deposit_and_call` method.
/// Layout: [discriminator(8)] + amount(u64 LE) + receiver([u8;20])
/// + message(u32 LE length + bytes) + revert_options(Option<RevertOptions>)
pub fn encode_deposit_and_call_ix_data(
    amount: u64,
    receiver: [u8; 20],
    message: &[u8],
    revert_options: Option<&GatewayRevertOptions>,
) -> Result<Vec<u8>> {
    // Discriminator = sha256("global:deposit_and_call")[..8]
    let disc = anchor_lang::solana_program::hash::hash(b"global:deposit_and_call").to_bytes();
    let mut data = Vec::with_capacity(8 + 8 + 20 + 4 + message.len() + 1);
    data.extend_from_slice(&disc[..8]);
    data.extend_from_slice(&amount.to_le_bytes());
    data.extend_from_slice(&receiver);
    data.extend_from_slice(&(message.len() as u32).to_le_bytes());
    data.extend_from_slice(message);
    match revert_options {
        Some(options) => {
            data.push(1u8);
            let encoded = options
                .try_to_vec()
                .map_err(|_| error!(UniversalNftError::SerializationFailed))?;
            data.extend_from_slice(&encoded);
        }
        None => data.push(0u8),
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_deposit_and_call_ix_data_layout() {
        let receiver = [0x11u8; 20];
        let message = vec![0xAA, 0xBB, 0xCC];
        let data = encode_deposit_and_call_ix_data(42, receiver, &message, None).unwrap();
        assert_eq!(
            &data[..8],
            &anchor_lang::solana_program::hash::hash(b"global:deposit_and_call").to_bytes()[..8]
        );
        assert_eq!(u64::from_le_bytes(data[8..16].try_into().unwrap()), 42);
        assert_eq!(&data[16..36], &receiver);
        let len_le = u32::from_le_bytes(data[36..40].try_into().unwrap());
        assert_eq!(len_le as usize, message.len());
        assert_eq!(&data[40..43], &message[..]);
        assert_eq!(data[43], 0u8); // None
        assert_eq!(data.len(), 44);
    }

    #[test]
    fn test_revert_options_follow_message() {
        let options = GatewayRevertOptions {
            revert_address: Pubkey::new_from_array([3u8; 32]),
            abort_address: Pubkey::new_from_array([4u8; 32]),
            call_on_revert: true,
            revert_message: vec![9, 9],
            on_revert_gas_limit: 7,
        };
        let data = encode_deposit_and_call_ix_data(1, [0u8; 20], &[], Some(&options)).unwrap();
        assert_eq!(data[40], 1u8); // Some
        let decoded = GatewayRevertOptions::try_from_slice(&data[41..]).unwrap();
        assert_eq!(decoded, options);
    }
}
