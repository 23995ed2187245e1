/*
 * Copyright (c) 2025, Circle Internet Financial LTD All Rights Reserved.
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Gateway mint instruction handler — the attestation verification and redemption core.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak::hash;
use anchor_lang::solana_program::sysvar::clock::Clock;
use anchor_spl::token::{Token, TokenAccount};
use gateway_shared::{
    create_used_transfer_spec_hash_account, is_transfer_spec_hash_used,
    USED_TRANSFER_SPEC_HASH_SEED_PREFIX,
};

use crate::{
    attestation::{value_is_zero, value_to_u64, MintAttestation, MintAttestationElementStruct, MintAttestationStruct},
    error::GatewayMinterError,
    events::AttestationUsed,
    seeds::{GATEWAY_MINTER_CUSTODY_SEED, GATEWAY_MINTER_SEED},
    state::{GatewayMinter, UsedTransferSpecHash},
};

#[event_cpi]
#[derive(Accounts)]
pub struct GatewayMintContext<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The identity the attestation set permits to submit redemption. Always
    /// required structurally; only enforced against an element's
    /// `destination_caller` when that field is non-default.
    pub destination_caller: Signer<'info>,

    #[account(
        seeds = [GATEWAY_MINTER_SEED],
        bump = gateway_minter.bump,
        constraint = !gateway_minter.paused @ GatewayMinterError::ProgramPaused
    )]
    pub gateway_minter: Box<Account<'info, GatewayMinter>>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,
    // Additional account triplets for each attestation element, in element order:
    //   0. `[writable]` The custody token account PDA (seeds = [GATEWAY_MINTER_CUSTODY_SEED, destination_token])
    //   1. `[writable]` The destination recipient token account
    //   2. `[writable]` The used transfer spec hash account PDA (seeds = [USED_TRANSFER_SPEC_HASH_SEED_PREFIX, transfer_spec_hash])
}

/// Mode 1: full canonical attestation bytes with signature
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct GatewayMintParams {
    pub attestation: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Mode 2: structured parameters, re-serialized to canonical bytes before verification
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct GatewayMintReconstructParams {
    pub version: u32,
    pub elements: Vec<MintAttestationElementParams>,
    pub signature: Vec<u8>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct MintAttestationElementParams {
    pub source_domain: u32,
    pub destination_domain: u32,
    pub source_contract: [u8; 32],
    pub destination_contract: [u8; 32],
    pub source_token: [u8; 32],
    pub source_depositor: [u8; 32],
    pub destination_caller: [u8; 32],
    pub source_signer: [u8; 32],
    pub source_tx_hash: [u8; 32],
    pub nonce: u64,
    pub max_block_height: u64,
    pub transfer_spec_hash: [u8; 32],
    pub value: [u8; 32],
    pub hook_data: Vec<u8>,
}

pub fn gateway_mint<'mint>(
    ctx: Context<'_, '_, 'mint, 'mint, GatewayMintContext<'mint>>,
    params: &GatewayMintParams,
) -> Result<()> {
    let gateway_minter = &ctx.accounts.gateway_minter;

    let mut attestation = MintAttestation::new(&params.attestation)?;

    // The attester signs keccak256 of the raw canonical attestation-set bytes.
    let message_hash = hash(&params.attestation).0;
    gateway_minter.verify_attestation_signature(&message_hash, &params.signature)?;

    require_eq!(
        attestation.version()?,
        gateway_minter.version,
        GatewayMinterError::VersionMismatch
    );

    require_eq!(
        ctx.remaining_accounts.len(),
        (attestation.num_attestations()? * 3) as usize,
        GatewayMinterError::RemainingAccountsLengthMismatch
    );

    let current_slot = Clock::get()?.slot;

    let mut account_index = 0;
    while attestation.next()? {
        require_eq!(
            attestation.destination_domain()?,
            gateway_minter.local_domain,
            GatewayMinterError::DestinationDomainMismatch
        );

        require_keys_eq!(
            attestation.destination_contract()?,
            *ctx.program_id,
            GatewayMinterError::DestinationContractMismatch
        );

        require_gte!(
            attestation.max_block_height()?,
            current_slot,
            GatewayMinterError::AttestationExpired
        );

        let destination_caller = attestation.destination_caller()?;
        if destination_caller != Pubkey::default() {
            require_keys_eq!(
                destination_caller,
                ctx.accounts.destination_caller.key(),
                GatewayMinterError::DestinationCallerMismatch
            );
        }

        let value_bytes = attestation.value_bytes()?;
        require!(
            !value_is_zero(&value_bytes),
            GatewayMinterError::InvalidAttestationValue
        );

        let transfer_spec_hash = attestation.transfer_spec_hash()?;
        process_used_transfer_spec_hash(
            transfer_spec_hash,
            &ctx.remaining_accounts[account_index + 2],
            &ctx.accounts.payer,
            &ctx.accounts.system_program,
            ctx.program_id,
        )?;

        let destination_token = attestation.destination_token()?;
        let custody_token_account = validate_custody_token_account(
            &ctx.remaining_accounts[account_index],
            gateway_minter,
            &ctx.accounts.gateway_minter.key(),
            ctx.program_id,
        )?;
        require_keys_eq!(
            custody_token_account.mint,
            destination_token,
            GatewayMinterError::DestinationTokenMismatch
        );

        let destination_recipient_account =
            validate_destination_token_account(&ctx.remaining_accounts[account_index + 1])?;
        require_keys_eq!(
            destination_recipient_account.mint,
            destination_token,
            GatewayMinterError::DestinationTokenMismatch
        );
        require_keys_eq!(
            destination_recipient_account.owner,
            attestation.destination_recipient()?,
            GatewayMinterError::DestinationRecipientMismatch
        );

        let value = value_to_u64(&value_bytes)?;

        gateway_minter.mint_token(
            &ctx.accounts.token_program,
            &custody_token_account,
            &destination_recipient_account,
            &ctx.accounts.gateway_minter,
            gateway_minter.bump,
            value,
        )?;

        emit_cpi!(AttestationUsed {
            source_domain: attestation.source_domain()?,
            destination_domain: attestation.destination_domain()?,
            source_token: attestation.source_token()?,
            destination_token,
            destination_recipient: attestation.destination_recipient()?,
            nonce: attestation.nonce()?,
            value,
            transfer_spec_hash,
        });

        account_index += 3;
    }

    require_eq!(
        account_index,
        ctx.remaining_accounts.len(),
        GatewayMinterError::RemainingAccountsLengthMismatch
    );

    Ok(())
}

fn validate_custody_token_account<'mint>(
    account_info: &'mint AccountInfo<'mint>,
    gateway_minter: &GatewayMinter,
    gateway_minter_key: &Pubkey,
    program_id: &Pubkey,
) -> Result<Account<'mint, TokenAccount>> {
    let custody_account = Account::<'mint, TokenAccount>::try_from(account_info)
        .map_err(|_| GatewayMinterError::InvalidCustodyTokenAccount)?;

    require_keys_eq!(
        custody_account.owner,
        *gateway_minter_key,
        GatewayMinterError::InvalidCustodyTokenAccount
    );

    let custody_bump = gateway_minter.get_custody_token_account_bump(custody_account.mint)?;
    let expected_custody_pda = Pubkey::create_program_address(
        &[
            GATEWAY_MINTER_CUSTODY_SEED,
            custody_account.mint.as_ref(),
            &[custody_bump],
        ],
        program_id,
    )
    .map_err(|_| GatewayMinterError::InvalidCustodyTokenAccount)?;

    require_keys_eq!(
        expected_custody_pda,
        account_info.key(),
        GatewayMinterError::InvalidCustodyTokenAccount
    );

    Ok(custody_account)
}

fn validate_destination_token_account<'mint>(
    account_info: &'mint AccountInfo<'mint>,
) -> Result<Account<'mint, TokenAccount>> {
    Account::<'mint, TokenAccount>::try_from(account_info)
        .map_err(|_| GatewayMinterError::InvalidDestinationTokenAccount.into())
}

/// Derives the replay-marker PDA for `transfer_spec_hash`, checks it against the
/// caller-supplied account, and either claims it (writing the discriminator) or
/// fails `TransferSpecHashAlreadyUsed` if it is already claimed. Performed before
/// the token transfer so a later failure in this transaction rolls both back.
fn process_used_transfer_spec_hash<'mint>(
    transfer_spec_hash: [u8; 32],
    hash_account: &AccountInfo<'mint>,
    payer: &Signer<'mint>,
    system_program: &Program<'mint, System>,
    program_id: &Pubkey,
) -> Result<()> {
    let (expected_pda, bump) = Pubkey::find_program_address(
        &[USED_TRANSFER_SPEC_HASH_SEED_PREFIX, &transfer_spec_hash],
        program_id,
    );

    require_keys_eq!(
        expected_pda,
        hash_account.key(),
        GatewayMinterError::InvalidTransferSpecHashAccount
    );

    if hash_account.owner == program_id {
        let is_used = {
            let account_data = hash_account.try_borrow_data()?;
            is_transfer_spec_hash_used(&account_data, UsedTransferSpecHash::DISCRIMINATOR)?
        };
        return if is_used {
            Err(GatewayMinterError::TransferSpecHashAlreadyUsed.into())
        } else {
            Err(GatewayMinterError::InvalidTransferSpecHashAccount.into())
        };
    }

    // Not yet ours: must be unclaimed system-owned space (the "never existed" and
    // "pre-funded but unclaimed" regimes both look like this). Anything else — a
    // foreign-owned account, or system-owned with nonzero size — is malformed.
    let system_program_id = anchor_lang::solana_program::system_program::ID;
    require!(
        *hash_account.owner == system_program_id && hash_account.data_len() == 0,
        GatewayMinterError::InvalidTransferSpecHashAccount
    );

    create_used_transfer_spec_hash_account(
        hash_account,
        &transfer_spec_hash,
        bump,
        payer,
        system_program,
        program_id,
        UsedTransferSpecHash::DISCRIMINATOR,
    )
}

pub fn gateway_mint_with_params<'mint>(
    ctx: Context<'_, '_, 'mint, 'mint, GatewayMintContext<'mint>>,
    params: GatewayMintReconstructParams,
) -> Result<()> {
    require!(
        !params.elements.is_empty(),
        GatewayMinterError::EmptyAttestationSet
    );

    let attestation_bytes = reconstruct_attestation_bytes(&ctx, &params)?;

    let gateway_mint_params = GatewayMintParams {
        attestation: attestation_bytes,
        signature: params.signature,
    };

    gateway_mint(ctx, &gateway_mint_params)
}

/// Rebuilds canonical attestation-set bytes from structured parameters. Trusts the
/// supplied destination token account (not the caller's claimed fields) for
/// `destination_token`/`destination_recipient`: if these don't match what the
/// attester actually signed, re-hashing produces a different hash and signature
/// verification fails downstream — substitution cannot be used to bypass it.
fn reconstruct_attestation_bytes<'mint>(
    ctx: &Context<'_, '_, 'mint, 'mint, GatewayMintContext<'mint>>,
    params: &GatewayMintReconstructParams,
) -> Result<Vec<u8>> {
    require_eq!(
        ctx.remaining_accounts.len(),
        params.elements.len() * 3,
        GatewayMinterError::RemainingAccountsLengthMismatch
    );

    let mut account_index = 0;
    let mut elements = Vec::with_capacity(params.elements.len());
    for element in &params.elements {
        let destination_account =
            validate_destination_token_account(&ctx.remaining_accounts[account_index + 1])?;

        elements.push(MintAttestationElementStruct {
            source_domain: element.source_domain,
            destination_domain: element.destination_domain,
            source_contract: element.source_contract,
            destination_contract: element.destination_contract,
            source_token: element.source_token,
            destination_token: destination_account.mint.to_bytes(),
            source_depositor: element.source_depositor,
            destination_recipient: destination_account.owner.to_bytes(),
            destination_caller: element.destination_caller,
            source_signer: element.source_signer,
            source_tx_hash: element.source_tx_hash,
            nonce: element.nonce,
            max_block_height: element.max_block_height,
            transfer_spec_hash: element.transfer_spec_hash,
            value: element.value,
            hook_data: element.hook_data.as_slice(),
        });

        account_index += 3;
    }

    let attestation_struct = MintAttestationStruct {
        version: params.version,
        elements,
    };

    Ok(attestation_struct.encode_attestation())
}
