/// PDA seeds. The gateway credits execute deposits to the program's
/// `["connected"]` PDA, so the config account doubles as the vault.
pub const UNIVERSAL_NFT_CONFIG_SEED: &[u8] = b"connected";
pub const CONNECTED_SEED: &[u8] = b"connected";
pub const NFT_ORIGIN_SEED: &[u8] = b"nft_origin";
pub const NFT_MINT_SEED: &[u8] = b"nft_mint";
pub const MINT_TICKET_SEED: &[u8] = b"mint_ticket";
pub const PROCESSED_MESSAGE_SEED: &[u8] = b"processed";

/// Seed of the ZetaChain gateway's own PDA (the account that signs callbacks)
pub const GATEWAY_PDA_SEED: &[u8] = b"meta";

/// Metadata limits (Metaplex)
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Name and symbol given to tokens that arrive from another chain
pub const DEFAULT_NFT_NAME: &str = "Universal NFT";
pub const DEFAULT_NFT_SYMBOL: &str = "UNFT";

/// Version byte carried at the head of every cross-chain payload
pub const MESSAGE_VERSION: u8 = 1;

/// High-order bytes cleared from a derived token id
pub const TOKEN_ID_TRUNCATED_BYTES: usize = 1;

/// Gas limit used for destination execution when none is configured
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;
