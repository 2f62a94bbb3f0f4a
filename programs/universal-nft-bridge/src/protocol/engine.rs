use anchor_lang::prelude::*;

use crate::error::UniversalNftError;
use crate::event::{
    CrossChainMessageRejected, TokenForwarded, TokenMinted, TokenTransfer, TokenTransferAborted,
    TokenTransferReceived, TokenTransferReverted,
};
use crate::protocol::custody::{NftCustody, Treasury};
use crate::protocol::gas::{fund_hop, Asset, AssetAmount, FeeGrant, SwapRouter};
use crate::protocol::gateway::{
    CallOptions, Gateway, GatewayEvent, RelayCall, RelayReceipt, RevertOptions,
};
use crate::protocol::identity::{IdentityAllocator, TokenId};
use crate::protocol::message::{Destination, RecoveryContext, TransferIntent};
use crate::protocol::origin::OriginLedger;
use crate::protocol::peers::PeerRegistry;
use crate::protocol::replay::{MessageKey, ReplayLedger};
use crate::state::{Connected, NftOrigin, Provenance, UniversalNftConfig};
use crate::util::address::{ChainAddress, Channel};
use crate::util::constants::MESSAGE_VERSION;
use crate::util::validation::validate_uri;

/// Lifecycle of one transfer as seen by a single deployment.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    OutboundPending,
    Reverted,
    Aborted,
    InboundAuthenticated,
    Minted,
    Rejected,
}

impl TransferState {
    pub fn can_transition_to(self, next: TransferState) -> bool {
        use TransferState::*;
        matches!(
            (self, next),
            (Idle, OutboundPending)
                | (OutboundPending, Reverted)
                | (OutboundPending, Aborted)
                | (Idle, InboundAuthenticated)
                | (Idle, Rejected)
                | (InboundAuthenticated, Minted)
                | (InboundAuthenticated, OutboundPending)
                | (InboundAuthenticated, Rejected)
        )
    }

    pub fn advance(self, next: TransferState) -> Result<TransferState> {
        if !self.can_transition_to(next) {
            msg!("Illegal transfer state change {:?} -> {:?}", self, next);
            return err!(UniversalNftError::InvalidProgramState);
        }
        Ok(next)
    }
}

/// Persistent state the engine reads and writes.
pub struct Ledgers<'a> {
    pub config: &'a mut UniversalNftConfig,
    pub origins: &'a mut dyn OriginLedger,
    pub peers: &'a dyn PeerRegistry,
    pub replay: &'a mut dyn ReplayLedger,
}

/// Chain-specific collaborators.
pub struct Host<'a> {
    pub custody: &'a mut dyn NftCustody,
    pub router: &'a mut dyn SwapRouter,
    pub gateway: &'a mut dyn Gateway,
    pub treasury: &'a mut dyn Treasury,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub token_id: TokenId,
    /// Current holder; must own the live token
    pub sender: ChainAddress,
    pub receiver: ChainAddress,
    pub destination: Channel,
    /// Native value offered for fees
    pub payment: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundReceipt {
    pub state: TransferState,
    pub token_id: TokenId,
    pub nonce: u64,
    pub fee_paid: u64,
    pub refund: u64,
    pub carried_value: u64,
    pub relay: Option<RelayReceipt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundCall {
    /// Principal invoking the callback
    pub caller: ChainAddress,
    pub channel: Channel,
    /// Sender claimed by the relay
    pub sender: ChainAddress,
    pub payload: Vec<u8>,
    /// Value transferred with the message
    pub value: AssetAmount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundOutcome {
    Minted {
        token_id: TokenId,
        receiver: ChainAddress,
        first_arrival: bool,
    },
    Forwarded {
        token_id: TokenId,
        next_channel: Channel,
        relay: RelayReceipt,
    },
    /// Already applied; nothing changed
    Duplicate { token_id: TokenId },
}

impl InboundOutcome {
    pub fn state(&self) -> TransferState {
        match self {
            InboundOutcome::Minted { .. } => TransferState::Minted,
            InboundOutcome::Forwarded { .. } => TransferState::OutboundPending,
            InboundOutcome::Duplicate { .. } => TransferState::Idle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryKind {
    Revert,
    Abort,
}

impl RecoveryKind {
    fn state(self) -> TransferState {
        match self {
            RecoveryKind::Revert => TransferState::Reverted,
            RecoveryKind::Abort => TransferState::Aborted,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Restored {
        state: TransferState,
        token_id: TokenId,
        recipient: ChainAddress,
        refunded: u64,
    },
    Duplicate { token_id: TokenId },
}

impl RecoveryOutcome {
    pub fn state(&self) -> TransferState {
        match self {
            RecoveryOutcome::Restored { state, .. } => *state,
            RecoveryOutcome::Duplicate { .. } => TransferState::Idle,
        }
    }
}

/// Burn / relay / mint state machine for one deployment.
pub struct TransferEngine<'a> {
    ledgers: Ledgers<'a>,
    host: Host<'a>,
    slot: u64,
}

impl<'a> TransferEngine<'a> {
    pub fn new(ledgers: Ledgers<'a>, host: Host<'a>, slot: u64) -> Self {
        Self {
            ledgers,
            host,
            slot,
        }
    }

    pub fn config(&self) -> &UniversalNftConfig {
        self.ledgers.config
    }

    /// Mint a chain-native token with a freshly allocated id.
    pub fn mint_local(&mut self, owner: &ChainAddress, uri: &str) -> Result<TokenId> {
        self.guarded(|engine| {
            engine.check_mint(owner, uri)?;
            let issuer = engine.ledgers.config.issuer;
            let token_id = IdentityAllocator::new(&mut engine.ledgers.config.next_token_id)
                .allocate(&issuer, engine.slot, &*engine.ledgers.origins)?;
            engine.mint_native(token_id, owner, uri)?;
            Ok(token_id)
        })
    }

    /// Mint a chain-native token under an id reserved earlier.
    pub fn mint_reserved(&mut self, token_id: TokenId, owner: &ChainAddress, uri: &str) -> Result<()> {
        self.guarded(|engine| {
            engine.check_mint(owner, uri)?;
            engine.mint_native(token_id, owner, uri)
        })
    }

    pub fn initiate_transfer(&mut self, request: &TransferRequest) -> Result<OutboundReceipt> {
        self.guarded(|engine| engine.send(request))
    }

    pub fn on_message(&mut self, call: InboundCall) -> Result<InboundOutcome> {
        self.guarded(|engine| engine.receive(call))
    }

    pub fn on_revert(
        &mut self,
        caller: &ChainAddress,
        context: &[u8],
        returned: AssetAmount,
    ) -> Result<RecoveryOutcome> {
        self.guarded(|engine| engine.recover(RecoveryKind::Revert, caller, context, returned))
    }

    pub fn on_abort(
        &mut self,
        caller: &ChainAddress,
        context: &[u8],
        returned: AssetAmount,
    ) -> Result<RecoveryOutcome> {
        self.guarded(|engine| engine.recover(RecoveryKind::Abort, caller, context, returned))
    }

    pub fn dispatch(&mut self, event: GatewayEvent) -> Result<TransferState> {
        match event {
            GatewayEvent::Call {
                caller,
                channel,
                sender,
                payload,
                value,
            } => self
                .on_message(InboundCall {
                    caller,
                    channel,
                    sender,
                    payload,
                    value,
                })
                .map(|outcome| outcome.state()),
            GatewayEvent::Revert {
                caller,
                context,
                returned,
            } => self
                .on_revert(&caller, &context, returned)
                .map(|outcome| outcome.state()),
            GatewayEvent::Abort {
                caller,
                context,
                returned,
            } => self
                .on_abort(&caller, &context, returned)
                .map(|outcome| outcome.state()),
        }
    }

    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.ledgers.config.transfer_locked {
            msg!("Transfer path already executing");
            return err!(UniversalNftError::ReentrantCall);
        }
        self.ledgers.config.transfer_locked = true;
        let result = op(self);
        self.ledgers.config.transfer_locked = false;
        result
    }

    fn verify_gateway(&self, caller: &ChainAddress) -> Result<()> {
        if *caller != self.ledgers.config.gateway {
            msg!("Callback from {} is not the gateway", caller);
            return err!(UniversalNftError::Unauthorized);
        }
        Ok(())
    }

    fn check_mint(&self, owner: &ChainAddress, uri: &str) -> Result<()> {
        require!(!self.ledgers.config.paused, UniversalNftError::ProgramPaused);
        require!(!owner.is_zero(), UniversalNftError::InvalidRecipientAddress);
        validate_uri(uri)
    }

    fn mint_native(&mut self, token_id: TokenId, owner: &ChainAddress, uri: &str) -> Result<()> {
        let chain_id = self.ledgers.config.chain_id;
        let provenance = Provenance {
            chain_of_origin: chain_id,
            original_reference: self.ledgers.config.issuer,
        };
        self.ledgers.origins.record_new(NftOrigin::new(
            token_id,
            provenance,
            uri.to_string(),
            chain_id,
            self.slot,
        ))?;
        self.host.custody.mint(&token_id, owner, uri)?;

        emit!(TokenMinted {
            token_id: token_id.to_bytes(),
            owner: *owner,
            uri: uri.to_string(),
            chain_id,
        });
        msg!("Minted {} to {}", token_id, owner);
        Ok(())
    }

    fn send(&mut self, request: &TransferRequest) -> Result<OutboundReceipt> {
        require!(!self.ledgers.config.paused, UniversalNftError::ProgramPaused);
        require!(request.payment > 0, UniversalNftError::InsufficientPayment);
        require!(
            !request.receiver.is_zero(),
            UniversalNftError::InvalidRecipientAddress
        );
        let peer = self.ledgers.peers.resolve(&request.destination)?;

        match self.host.custody.owner_of(&request.token_id) {
            Some(owner) if owner == request.sender => {}
            Some(_) => return err!(UniversalNftError::NotNftOwner),
            None => return err!(UniversalNftError::NftDoesNotExist),
        }
        let uri = self.host.custody.token_uri(&request.token_id)?;
        let origin = self.ledgers.origins.lookup(&request.token_id)?.provenance();
        let quote = self
            .host
            .gateway
            .quote(&request.destination, self.ledgers.config.gas_limit)?;

        let mut state = TransferState::Idle.advance(TransferState::OutboundPending)?;
        self.host.custody.burn(&request.token_id)?;
        let nonce = self.ledgers.config.next_message_nonce()?;

        let funding = match fund_hop(&mut *self.host.router, &Asset::Native, request.payment, &quote) {
            Ok(funding) => funding,
            Err(shortfall) => {
                msg!(
                    "Hop funding failed after burn: {}; restoring {} to {}",
                    shortfall.error,
                    request.token_id,
                    request.sender
                );
                state = state.advance(TransferState::Aborted)?;
                self.host
                    .custody
                    .mint(&request.token_id, &request.sender, &uri)?;
                if shortfall.remaining > 0 {
                    self.host
                        .treasury
                        .pay(&request.sender, &Asset::Native, shortfall.remaining)?;
                }
                emit!(TokenTransferAborted {
                    token_id: request.token_id.to_bytes(),
                    recipient: request.sender,
                    uri,
                    refunded: shortfall.remaining,
                });
                return Ok(OutboundReceipt {
                    state,
                    token_id: request.token_id,
                    nonce,
                    fee_paid: 0,
                    refund: shortfall.remaining,
                    carried_value: 0,
                    relay: None,
                });
            }
        };

        // Hub routes carry the excess to pay the next hop; direct routes refund it.
        let destination = match peer.forward_channel {
            Some(next) => Destination::Forward(next),
            None => Destination::Local,
        };
        let (carried_value, refund) = match destination {
            Destination::Forward(_) => (funding.refund, 0),
            Destination::Local => (0, funding.refund),
        };
        let intent = TransferIntent {
            version: MESSAGE_VERSION,
            nonce,
            destination,
            receiver: request.receiver,
            token_id: request.token_id,
            uri,
            carried_value,
            original_sender: request.sender,
            origin,
        };
        let fee_paid = funding.consumed;
        let call = self.relay_call(
            &peer,
            &intent,
            funding.grant,
            AssetAmount::native(carried_value),
            self.ledgers.config.issuer,
            &intent.recovery_context(),
        )?;
        // No compensation on refusal; the host discards the whole instruction.
        let relay = self.host.gateway.deliver(call).map_err(|error| {
            msg!("Gateway refused transfer of {}: {}", intent.token_id, error);
            error!(UniversalNftError::CrossChainTransferFailed)
        })?;
        if refund > 0 {
            self.host
                .treasury
                .pay(&request.sender, &Asset::Native, refund)?;
        }

        emit!(TokenTransfer {
            token_id: intent.token_id.to_bytes(),
            destination_channel: request.destination.0,
            receiver: intent.receiver,
            sender: intent.original_sender,
            uri: intent.uri.clone(),
            nonce,
            fee: fee_paid,
            carried_value,
        });
        msg!(
            "Transfer {} of {} to {} on channel {}",
            nonce,
            intent.token_id,
            intent.receiver,
            request.destination
        );

        Ok(OutboundReceipt {
            state,
            token_id: intent.token_id,
            nonce,
            fee_paid,
            refund,
            carried_value,
            relay: Some(relay),
        })
    }

    fn receive(&mut self, call: InboundCall) -> Result<InboundOutcome> {
        self.verify_gateway(&call.caller)?;
        if !self.ledgers.peers.authenticate(&call.channel, &call.sender) {
            msg!(
                "Transfer {:?}: sender {} is not the peer on channel {}",
                TransferState::Rejected,
                call.sender,
                call.channel
            );
            emit!(CrossChainMessageRejected {
                channel: call.channel.0,
                sender: call.sender,
            });
            return err!(UniversalNftError::Unauthorized);
        }
        let state = TransferState::Idle.advance(TransferState::InboundAuthenticated)?;

        let intent = TransferIntent::decode(&call.payload)?;
        let key = MessageKey {
            sender: call.sender,
            nonce: intent.nonce,
        };
        if self.ledgers.replay.is_processed(&key) {
            msg!("Message {} from {} already processed", intent.nonce, call.sender);
            return Ok(InboundOutcome::Duplicate {
                token_id: intent.token_id,
            });
        }

        let outcome = match intent.destination {
            Destination::Local => self.mint_arrival(state, &call, &intent)?,
            Destination::Forward(next) => self.forward(state, &call, &intent, next)?,
        };
        self.ledgers.replay.mark_processed(key)?;
        Ok(outcome)
    }

    fn mint_arrival(
        &mut self,
        state: TransferState,
        call: &InboundCall,
        intent: &TransferIntent,
    ) -> Result<InboundOutcome> {
        require!(
            !intent.receiver.is_zero(),
            UniversalNftError::InvalidRecipientAddress
        );
        let chain_id = self.ledgers.config.chain_id;
        let first_arrival = self.ledgers.origins.record_if_absent(NftOrigin::new(
            intent.token_id,
            intent.origin,
            intent.uri.clone(),
            chain_id,
            self.slot,
        ))?;
        self.host
            .custody
            .mint(&intent.token_id, &intent.receiver, &intent.uri)?;
        if call.value.amount > 0 {
            self.host
                .treasury
                .pay(&intent.receiver, &call.value.asset, call.value.amount)?;
        }
        state.advance(TransferState::Minted)?;

        emit!(TokenTransferReceived {
            token_id: intent.token_id.to_bytes(),
            source_channel: call.channel.0,
            sender: call.sender,
            receiver: intent.receiver,
            uri: intent.uri.clone(),
            nonce: intent.nonce,
            first_arrival,
            chain_of_origin: intent.origin.chain_of_origin,
        });
        msg!(
            "Received {} for {} (origin chain {})",
            intent.token_id,
            intent.receiver,
            intent.origin.chain_of_origin
        );

        Ok(InboundOutcome::Minted {
            token_id: intent.token_id,
            receiver: intent.receiver,
            first_arrival,
        })
    }

    fn forward(
        &mut self,
        state: TransferState,
        call: &InboundCall,
        intent: &TransferIntent,
        next: Channel,
    ) -> Result<InboundOutcome> {
        let peer = self.ledgers.peers.resolve(&next)?;
        let quote = self
            .host
            .gateway
            .quote(&next, self.ledgers.config.gas_limit)?;
        let funding = fund_hop(
            &mut *self.host.router,
            &call.value.asset,
            call.value.amount,
            &quote,
        )?;
        let nonce = self.ledgers.config.next_message_nonce()?;

        let onward = TransferIntent {
            nonce,
            destination: match peer.forward_channel {
                Some(channel) => Destination::Forward(channel),
                None => Destination::Local,
            },
            carried_value: funding.refund,
            ..intent.clone()
        };
        let fee = funding.consumed;
        let value = AssetAmount {
            asset: call.value.asset,
            amount: funding.refund,
        };
        // Recovery goes to the deployment the token left, under its own nonce.
        let relay_call = self.relay_call(
            &peer,
            &onward,
            funding.grant,
            value,
            call.sender,
            &intent.recovery_context(),
        )?;
        let relay = self.host.gateway.deliver(relay_call)?;
        state.advance(TransferState::OutboundPending)?;

        emit!(TokenForwarded {
            token_id: onward.token_id.to_bytes(),
            source_channel: call.channel.0,
            next_channel: next.0,
            receiver: onward.receiver,
            nonce,
            fee,
            carried_value: onward.carried_value,
        });
        msg!("Forwarded {} from {} to {}", onward.token_id, call.channel, next);

        Ok(InboundOutcome::Forwarded {
            token_id: onward.token_id,
            next_channel: next,
            relay,
        })
    }

    fn recover(
        &mut self,
        kind: RecoveryKind,
        caller: &ChainAddress,
        context: &[u8],
        returned: AssetAmount,
    ) -> Result<RecoveryOutcome> {
        self.verify_gateway(caller)?;
        let context = RecoveryContext::decode(context)?;
        require!(
            !context.original_sender.is_zero(),
            UniversalNftError::InvalidRecipientAddress
        );

        // Our own outbound nonces; never issued by a remote peer.
        let key = MessageKey {
            sender: self.ledgers.config.issuer,
            nonce: context.nonce,
        };
        if self.ledgers.replay.is_processed(&key) {
            msg!("{:?} for nonce {} already applied", kind, context.nonce);
            return Ok(RecoveryOutcome::Duplicate {
                token_id: context.token_id,
            });
        }

        let chain_id = self.ledgers.config.chain_id;
        self.ledgers.origins.record_if_absent(NftOrigin::new(
            context.token_id,
            context.origin,
            context.uri.clone(),
            chain_id,
            self.slot,
        ))?;
        self.host
            .custody
            .mint(&context.token_id, &context.original_sender, &context.uri)?;
        if returned.amount > 0 {
            self.host
                .treasury
                .pay(&context.original_sender, &returned.asset, returned.amount)?;
        }
        let state = TransferState::OutboundPending.advance(kind.state())?;

        match kind {
            RecoveryKind::Revert => emit!(TokenTransferReverted {
                token_id: context.token_id.to_bytes(),
                recipient: context.original_sender,
                uri: context.uri.clone(),
                refunded: returned.amount,
            }),
            RecoveryKind::Abort => emit!(TokenTransferAborted {
                token_id: context.token_id.to_bytes(),
                recipient: context.original_sender,
                uri: context.uri.clone(),
                refunded: returned.amount,
            }),
        }
        msg!(
            "Restored {} to {} after {:?}",
            context.token_id,
            context.original_sender,
            kind
        );

        self.ledgers.replay.mark_processed(key)?;
        Ok(RecoveryOutcome::Restored {
            state,
            token_id: context.token_id,
            recipient: context.original_sender,
            refunded: returned.amount,
        })
    }

    fn relay_call(
        &self,
        peer: &Connected,
        intent: &TransferIntent,
        fee: FeeGrant,
        value: AssetAmount,
        recover_at: ChainAddress,
        recovery: &RecoveryContext,
    ) -> Result<RelayCall> {
        let gas_limit = self.ledgers.config.gas_limit;
        Ok(RelayCall {
            receiver: peer.remote_principal,
            channel: peer.channel,
            fee,
            value,
            message: intent.encode()?,
            call_options: CallOptions {
                gas_limit,
                is_arbitrary_call: false,
            },
            revert_options: RevertOptions {
                revert_address: recover_at,
                call_on_revert: true,
                abort_address: recover_at,
                revert_message: recovery.encode()?,
                on_revert_gas_limit: gas_limit,
            },
        })
    }
}
