#![allow(dead_code)]

use std::collections::BTreeMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use universal_nft_bridge::protocol::admin::{self, PeerBinding};
use universal_nft_bridge::protocol::custody::{NftCustody, Treasury};
use universal_nft_bridge::protocol::engine::{
    Host, Ledgers, OutboundReceipt, TransferEngine, TransferRequest, TransferState,
};
use universal_nft_bridge::protocol::gas::{Asset, AssetAmount, FeeQuote, SwapFill, SwapRouter};
use universal_nft_bridge::protocol::gateway::{Gateway, GatewayEvent, RelayCall, RelayReceipt};
use universal_nft_bridge::protocol::identity::TokenId;
use universal_nft_bridge::protocol::origin::OriginBook;
use universal_nft_bridge::protocol::peers::PeerBook;
use universal_nft_bridge::protocol::replay::ReplayBook;
use universal_nft_bridge::state::{ConfigSettings, UniversalNftConfig};
use universal_nft_bridge::{ChainAddress, Channel, UniversalNftError};

pub const A: usize = 0;
pub const H: usize = 1;
pub const B: usize = 2;

pub const CHAIN_A: u64 = 11155111;
pub const CHAIN_H: u64 = 7001;
pub const CHAIN_B: u64 = 901;

/// Fee asset channels as named on the hub.
pub const CH_A: Channel = Channel([0xa0; 20]);
pub const CH_H: Channel = Channel([0x70; 20]);
pub const CH_B: Channel = Channel([0xb0; 20]);
/// Leaf-side routes that reach the other leaf through the hub.
pub const ROUTE_B: Channel = Channel([0xb1; 20]);
pub const ROUTE_A: Channel = Channel([0xa1; 20]);

pub const FEE_A: u64 = 100;
pub const FEE_B: u64 = 5_000;
pub const FEE_H: u64 = 30;
/// Hub router price: source-asset units per unit of destination fee asset.
pub const HUB_PRICE: u64 = 2;

pub fn alice() -> ChainAddress {
    ChainAddress::Evm([0x11; 20])
}

pub fn bob() -> ChainAddress {
    ChainAddress::Solana([0x22; 32])
}

pub fn carol() -> ChainAddress {
    ChainAddress::Evm([0x33; 20])
}

/// Live tokens keyed by id.
#[derive(Clone, Debug, Default)]
pub struct MemoryCustody {
    pub live: BTreeMap<TokenId, (ChainAddress, String)>,
    pub burned: Vec<TokenId>,
}

impl NftCustody for MemoryCustody {
    fn owner_of(&self, token_id: &TokenId) -> Option<ChainAddress> {
        self.live.get(token_id).map(|(owner, _)| *owner)
    }

    fn token_uri(&self, token_id: &TokenId) -> Result<String> {
        self.live
            .get(token_id)
            .map(|(_, uri)| uri.clone())
            .ok_or_else(|| error!(UniversalNftError::NftDoesNotExist))
    }

    fn mint(&mut self, token_id: &TokenId, owner: &ChainAddress, uri: &str) -> Result<()> {
        if self.live.contains_key(token_id) {
            return err!(UniversalNftError::NftAlreadyExists);
        }
        self.live.insert(*token_id, (*owner, uri.to_string()));
        Ok(())
    }

    fn burn(&mut self, token_id: &TokenId) -> Result<()> {
        self.live
            .remove(token_id)
            .ok_or_else(|| error!(UniversalNftError::NftDoesNotExist))?;
        self.burned.push(*token_id);
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryTreasury {
    pub payouts: Vec<(ChainAddress, Asset, u64)>,
}

impl MemoryTreasury {
    pub fn paid_to(&self, to: &ChainAddress) -> u64 {
        self.payouts
            .iter()
            .filter(|(who, _, _)| who == to)
            .map(|(_, _, amount)| amount)
            .sum()
    }
}

impl Treasury for MemoryTreasury {
    fn pay(&mut self, to: &ChainAddress, asset: &Asset, amount: u64) -> Result<()> {
        self.payouts.push((*to, *asset, amount));
        Ok(())
    }
}

/// Exact-output venue at a fixed price. Fills partially when the input
/// ceiling is too low, like a pool running out of slippage room.
#[derive(Clone, Debug)]
pub struct PricedRouter {
    pub price: u64,
    pub fail: bool,
    pub wrapped: u64,
    pub swaps: u32,
}

impl PricedRouter {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            fail: false,
            wrapped: 0,
            swaps: 0,
        }
    }
}

impl SwapRouter for PricedRouter {
    fn wrap_native(&mut self, amount: u64) -> Result<()> {
        self.wrapped += amount;
        Ok(())
    }

    fn unwrap_native(&mut self, amount: u64) -> Result<()> {
        self.wrapped = self
            .wrapped
            .checked_sub(amount)
            .ok_or_else(|| error!(UniversalNftError::ArithmeticOverflow))?;
        Ok(())
    }

    fn swap_exact_output(
        &mut self,
        _input: &Asset,
        _output: &Asset,
        amount_out: u64,
        max_in: u64,
    ) -> Result<SwapFill> {
        if self.fail {
            return err!(UniversalNftError::SwapFailed);
        }
        self.swaps += 1;
        let cost = amount_out * self.price;
        if cost > max_in {
            let received = max_in / self.price;
            return Ok(SwapFill {
                spent: received * self.price,
                received,
            });
        }
        Ok(SwapFill {
            spent: cost,
            received: amount_out,
        })
    }
}

/// A hop accepted by a gateway and not yet delivered.
#[derive(Clone, Debug)]
pub struct Outgoing {
    pub receiver: ChainAddress,
    pub channel: Channel,
    pub fee: u64,
    pub fee_asset: Asset,
    pub value: AssetAmount,
    pub message: Vec<u8>,
    pub revert_address: ChainAddress,
    pub abort_address: ChainAddress,
    pub revert_message: Vec<u8>,
}

/// Queues hops. Leaf chains quote in their native gas, the hub quotes in the
/// destination channel's fee asset.
#[derive(Clone, Debug)]
pub struct QueueGateway {
    pub hub: bool,
    pub fee: u64,
    pub refuse: bool,
    pub outbox: Vec<Outgoing>,
    pub accepted: u64,
}

impl Gateway for QueueGateway {
    fn quote(&self, channel: &Channel, _gas_limit: u64) -> Result<FeeQuote> {
        Ok(FeeQuote {
            asset: if self.hub {
                Asset::Token(*channel)
            } else {
                Asset::Native
            },
            amount: self.fee,
        })
    }

    fn deliver(&mut self, call: RelayCall) -> Result<RelayReceipt> {
        if self.refuse {
            return err!(UniversalNftError::CrossChainTransferFailed);
        }
        self.accepted += 1;
        self.outbox.push(Outgoing {
            receiver: call.receiver,
            channel: call.channel,
            fee: call.fee.amount(),
            fee_asset: *call.fee.asset(),
            value: call.value,
            message: call.message,
            revert_address: call.revert_options.revert_address,
            abort_address: call.revert_options.abort_address,
            revert_message: call.revert_options.revert_message,
        });
        Ok(RelayReceipt {
            reference: self.accepted,
        })
    }
}

/// One deployment with in-memory ledgers and host.
#[derive(Clone, Debug)]
pub struct Chain {
    /// Channel naming this chain's fee asset on the hub
    pub channel: Channel,
    pub config: UniversalNftConfig,
    pub origins: OriginBook,
    pub peers: PeerBook,
    pub replay: ReplayBook,
    pub custody: MemoryCustody,
    pub router: PricedRouter,
    pub gateway: QueueGateway,
    pub treasury: MemoryTreasury,
    pub slot: u64,
}

impl Chain {
    pub fn new(chain_id: u64, issuer: ChainAddress, gateway: ChainAddress, channel: Channel) -> Self {
        let hub = chain_id == CHAIN_H;
        let fee = match chain_id {
            CHAIN_A => FEE_A,
            CHAIN_B => FEE_B,
            _ => FEE_H,
        };
        Self {
            channel,
            config: UniversalNftConfig::new(
                ConfigSettings {
                    chain_id,
                    issuer,
                    authority: ChainAddress::Evm([0xad; 20]),
                    gateway,
                    gateway_program: Pubkey::default(),
                    gas_limit: 500_000,
                    hop_fee: fee,
                },
                255,
            ),
            origins: OriginBook::default(),
            peers: PeerBook::default(),
            replay: ReplayBook::default(),
            custody: MemoryCustody::default(),
            router: PricedRouter::new(if hub { HUB_PRICE } else { 1 }),
            gateway: QueueGateway {
                hub,
                fee,
                refuse: false,
                outbox: Vec::new(),
                accepted: 0,
            },
            treasury: MemoryTreasury::default(),
            slot: 42,
        }
    }

    pub fn engine(&mut self) -> TransferEngine<'_> {
        TransferEngine::new(
            Ledgers {
                config: &mut self.config,
                origins: &mut self.origins,
                peers: &self.peers,
                replay: &mut self.replay,
            },
            Host {
                custody: &mut self.custody,
                router: &mut self.router,
                gateway: &mut self.gateway,
                treasury: &mut self.treasury,
            },
            self.slot,
        )
    }

    pub fn connect(
        &mut self,
        channel: Channel,
        remote_chain: u64,
        remote_principal: ChainAddress,
        forward_channel: Option<Channel>,
    ) {
        let authority = self.config.authority;
        admin::set_peer(
            &self.config,
            &mut self.peers,
            &authority,
            PeerBinding {
                channel,
                remote_chain,
                remote_principal,
                forward_channel,
            },
            0,
        )
        .unwrap();
    }

    pub fn mint(&mut self, owner: ChainAddress, uri: &str) -> TokenId {
        self.engine().mint_local(&owner, uri).unwrap()
    }

    pub fn send(
        &mut self,
        token_id: TokenId,
        sender: ChainAddress,
        receiver: ChainAddress,
        destination: Channel,
        payment: u64,
    ) -> Result<OutboundReceipt> {
        self.engine().initiate_transfer(&TransferRequest {
            token_id,
            sender,
            receiver,
            destination,
            payment,
        })
    }

    /// `send` as the host runs it: a failed call leaves the chain untouched.
    pub fn send_atomic(
        &mut self,
        token_id: TokenId,
        sender: ChainAddress,
        receiver: ChainAddress,
        destination: Channel,
        payment: u64,
    ) -> Result<OutboundReceipt> {
        let snapshot = self.clone();
        let result = self.send(token_id, sender, receiver, destination, payment);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    pub fn owner_of(&self, token_id: &TokenId) -> Option<ChainAddress> {
        self.custody.owner_of(token_id)
    }

    pub fn uri_of(&self, token_id: &TokenId) -> Option<String> {
        self.custody.live.get(token_id).map(|(_, uri)| uri.clone())
    }
}

/// One callback the relay made, with what came of it.
#[derive(Debug)]
pub struct Hop {
    pub from: usize,
    pub to: usize,
    pub event: GatewayEvent,
    pub result: Result<TransferState>,
}

/// Leaf A and leaf B connected through hub H.
pub struct Network {
    pub chains: Vec<Chain>,
}

impl Network {
    pub fn new() -> Self {
        let mut a = Chain::new(
            CHAIN_A,
            ChainAddress::Evm([0xaa; 20]),
            ChainAddress::Evm([0x6a; 20]),
            CH_A,
        );
        let mut h = Chain::new(
            CHAIN_H,
            ChainAddress::Evm([0x77; 20]),
            ChainAddress::Evm([0x67; 20]),
            CH_H,
        );
        let mut b = Chain::new(
            CHAIN_B,
            ChainAddress::Solana([0xbb; 32]),
            ChainAddress::Solana([0x6b; 32]),
            CH_B,
        );

        let (a_id, h_id, b_id) = (a.config.issuer, h.config.issuer, b.config.issuer);
        a.connect(CH_H, CHAIN_H, h_id, None);
        a.connect(ROUTE_B, CHAIN_H, h_id, Some(CH_B));
        h.connect(CH_A, CHAIN_A, a_id, None);
        h.connect(CH_B, CHAIN_B, b_id, None);
        b.connect(CH_H, CHAIN_H, h_id, None);
        b.connect(ROUTE_A, CHAIN_H, h_id, Some(CH_A));

        Self {
            chains: vec![a, h, b],
        }
    }

    pub fn chain(&mut self, index: usize) -> &mut Chain {
        &mut self.chains[index]
    }

    fn locate(&self, principal: &ChainAddress) -> usize {
        self.chains
            .iter()
            .position(|chain| chain.config.issuer == *principal)
            .expect("unknown principal")
    }

    pub fn pending(&self) -> usize {
        self.chains.iter().map(|c| c.gateway.outbox.len()).sum()
    }

    /// The relay loses every queued hop.
    pub fn drop_pending(&mut self) {
        for chain in &mut self.chains {
            chain.gateway.outbox.clear();
        }
    }

    /// Deliver every queued hop, including hops queued while delivering.
    /// A failed delivery rolls the destination back and is reported to the
    /// source as an abort when funding failed, otherwise as a revert.
    pub fn flush(&mut self) -> Vec<Hop> {
        let mut hops = Vec::new();
        while let Some(from) = self.chains.iter().position(|c| !c.gateway.outbox.is_empty()) {
            let out = self.chains[from].gateway.outbox.remove(0);
            let to = self.locate(&out.receiver);
            let value = AssetAmount {
                asset: if to == H {
                    Asset::Token(self.chains[from].channel)
                } else {
                    Asset::Native
                },
                amount: out.value.amount,
            };
            let event = GatewayEvent::Call {
                caller: self.chains[to].config.gateway,
                channel: self.chains[from].channel,
                sender: self.chains[from].config.issuer,
                payload: out.message.clone(),
                value,
            };
            let result = self.apply(to, event.clone());
            let failure = result.as_ref().err().map(is_funding_failure);
            hops.push(Hop {
                from,
                to,
                event,
                result,
            });

            if let Some(funding) = failure {
                let (target, event) = if funding {
                    let target = self.locate(&out.abort_address);
                    (
                        target,
                        GatewayEvent::Abort {
                            caller: self.chains[target].config.gateway,
                            context: out.revert_message.clone(),
                            returned: AssetAmount::native(out.value.amount),
                        },
                    )
                } else {
                    let target = self.locate(&out.revert_address);
                    (
                        target,
                        GatewayEvent::Revert {
                            caller: self.chains[target].config.gateway,
                            context: out.revert_message.clone(),
                            returned: AssetAmount::native(out.value.amount),
                        },
                    )
                };
                let result = self.apply(target, event.clone());
                hops.push(Hop {
                    from: to,
                    to: target,
                    event,
                    result,
                });
            }
        }
        hops
    }

    /// Hand `event` to chain `to` again, as an at-least-once relay may.
    pub fn redeliver(&mut self, hop: &Hop) -> Result<TransferState> {
        self.apply(hop.to, hop.event.clone())
    }

    fn apply(&mut self, to: usize, event: GatewayEvent) -> Result<TransferState> {
        let snapshot = self.chains[to].clone();
        let result = self.chains[to].engine().dispatch(event);
        if result.is_err() {
            self.chains[to] = snapshot;
        }
        result
    }
}

fn is_funding_failure(error: &Error) -> bool {
    [
        UniversalNftError::InsufficientPayment,
        UniversalNftError::SwapUnderfunded,
        UniversalNftError::SwapFailed,
    ]
    .into_iter()
    .any(|code| *error == Error::from(code))
}
