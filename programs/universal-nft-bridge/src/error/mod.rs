use anchor_lang::prelude::*;

#[error_code]
pub enum UniversalNftError {
    // ========== AUTHORIZATION ERRORS ==========
    #[msg("Caller or claimed sender is not authorized")]
    Unauthorized,

    #[msg("Program is paused")]
    ProgramPaused,

    #[msg("Transfer path re-entered while already executing")]
    ReentrantCall,

    // ========== INPUT VALIDATION ERRORS ==========
    #[msg("Invalid address")]
    InvalidAddress,

    #[msg("Invalid recipient address")]
    InvalidRecipientAddress,

    #[msg("Channel is not configured")]
    InvalidChannel,

    #[msg("URI too long")]
    UriTooLong,

    #[msg("Invalid URI format")]
    InvalidUri,

    #[msg("Name too long")]
    NameTooLong,

    #[msg("Symbol too long")]
    SymbolTooLong,

    #[msg("Invalid token name")]
    InvalidTokenName,

    // ========== NFT OPERATION ERRORS ==========
    #[msg("Token identity already allocated")]
    IdentityCollision,

    #[msg("No origin record for token")]
    NotFound,

    #[msg("NFT does not exist")]
    NftDoesNotExist,

    #[msg("NFT already exists")]
    NftAlreadyExists,

    #[msg("Not the NFT owner")]
    NotNftOwner,

    #[msg("Mint ticket does not match this mint")]
    InvalidTicket,

    // ========== GAS & PAYMENT ERRORS ==========
    #[msg("Payment must be greater than zero")]
    InsufficientPayment,

    #[msg("Payment does not cover the hop fee")]
    SwapUnderfunded,

    #[msg("Fee asset swap failed")]
    SwapFailed,

    #[msg("Asset not supported on this chain")]
    UnsupportedAsset,

    #[msg("Vault balance cannot cover payout")]
    InsufficientVaultBalance,

    // ========== CROSS-CHAIN ERRORS ==========
    #[msg("Invalid cross-chain message")]
    InvalidCrossChainMessage,

    #[msg("Unsupported message version")]
    UnsupportedMessageVersion,

    #[msg("Cross-chain transfer failed")]
    CrossChainTransferFailed,

    #[msg("This deployment does not forward transfers")]
    ForwardingUnsupported,

    #[msg("Invalid gateway program")]
    InvalidGatewayProgram,

    #[msg("Invalid transfer state transition")]
    InvalidProgramState,

    // ========== ACCOUNT VALIDATION ERRORS ==========
    #[msg("Origin account does not match token")]
    InvalidOriginAccount,

    #[msg("Mint account does not match token")]
    InvalidMintAccount,

    #[msg("Token account does not match mint or owner")]
    InvalidTokenAccount,

    #[msg("Metadata account does not match mint")]
    InvalidMetadataAccount,

    #[msg("Replay marker account does not match message")]
    InvalidProcessedMessageAccount,

    // ========== ARITHMETIC & SERIALIZATION ERRORS ==========
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Serialization failed")]
    SerializationFailed,
}
