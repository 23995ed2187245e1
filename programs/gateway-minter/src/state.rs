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

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::error::GatewayMinterError;
use crate::seeds::GATEWAY_MINTER_SEED;

pub const MAX_SUPPORTED_TOKENS: usize = 10;
pub const MAX_ATTESTERS: usize = 10;

#[account(discriminator = [11, 0])]
#[derive(Debug, InitSpace)]
/// Program state for the GatewayMinter program
pub struct GatewayMinter {
    pub bump: u8,
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
    pub pauser: Pubkey,
    pub token_controller: Pubkey,
    pub paused: bool,
    /// Enabled attester identities. EVM attesters are stored right-padded into the
    /// 32-byte identity shape (see `gateway_shared::recover_evm_signer`); never
    /// contains the all-zero identity.
    #[max_len(MAX_ATTESTERS)]
    pub enabled_attesters: Vec<Pubkey>,
    pub local_domain: u32,
    pub version: u32,
    #[max_len(MAX_SUPPORTED_TOKENS)]
    pub supported_tokens: Vec<Pubkey>,
    #[max_len(MAX_SUPPORTED_TOKENS)]
    pub custody_token_account_bumps: Vec<u8>,
}

#[account(discriminator = [11, 1])]
/// Used transfer spec hash state for a transfer spec hash. Its presence (with this
/// discriminator, program-owned) is the entire replay-prevention record: there is no
/// additional "used" flag, and the bytes are never mutated or erased once written.
pub struct UsedTransferSpecHash;

impl GatewayMinter {
    /// The length in bytes of an attestation signature (64 bytes r||s + 1 byte recovery id)
    const ATTESTATION_SIGNATURE_LENGTH: usize = 65;

    pub fn is_token_supported(&self, token_mint: Pubkey) -> bool {
        self.supported_tokens.contains(&token_mint)
    }

    pub fn get_token_index(&self, token_mint: Pubkey) -> Option<usize> {
        self.supported_tokens
            .iter()
            .position(|token| token == &token_mint)
    }

    pub fn add_token(&mut self, token_mint: Pubkey, bump: u8) -> Result<()> {
        if self.is_token_supported(token_mint) {
            return Ok(());
        }

        if self.supported_tokens.len() >= MAX_SUPPORTED_TOKENS {
            return err!(GatewayMinterError::MaxTokensSupported);
        }

        self.supported_tokens.push(token_mint);
        self.custody_token_account_bumps.push(bump);

        Ok(())
    }

    pub fn is_attester_enabled(&self, attester: Pubkey) -> bool {
        self.enabled_attesters.contains(&attester)
    }

    /// Idempotent: adding an already-enabled attester is a no-op beyond the caller's
    /// own event emission.
    pub fn add_attester(&mut self, attester: Pubkey) -> Result<()> {
        if self.is_attester_enabled(attester) {
            return Ok(());
        }

        if self.enabled_attesters.len() >= MAX_ATTESTERS {
            return err!(GatewayMinterError::AttesterLimitExceeded);
        }

        self.enabled_attesters.push(attester);

        Ok(())
    }

    /// Idempotent: removing an attester that isn't enabled is a no-op.
    pub fn remove_attester(&mut self, attester: Pubkey) -> Result<()> {
        let index = match self.enabled_attesters.iter().position(|a| a == &attester) {
            Some(index) => index,
            None => return Ok(()),
        };

        self.enabled_attesters.remove(index);

        Ok(())
    }

    pub fn burn_token_custody<'info>(
        &self,
        token_program: &Program<'info, Token>,
        mint: &Account<'info, Mint>,
        authority: &Account<'info, GatewayMinter>,
        authority_bump: u8,
        from: &Account<'info, TokenAccount>,
        amount: u64,
    ) -> Result<()> {
        let authority_seeds: &[&[&[u8]]] = &[&[GATEWAY_MINTER_SEED, &[authority_bump]]];
        let burn_ctx = CpiContext::new_with_signer(
            token_program.to_account_info(),
            token::Burn {
                mint: mint.to_account_info(),
                from: from.to_account_info(),
                authority: authority.to_account_info(),
            },
            authority_seeds,
        );

        token::burn(burn_ctx, amount)?;

        Ok(())
    }

    pub fn get_custody_token_account_bump(&self, token_mint: Pubkey) -> Result<u8> {
        let index = self
            .get_token_index(token_mint)
            .ok_or(GatewayMinterError::TokenNotSupported)?;

        Ok(self.custody_token_account_bumps[index])
    }

    /// Releases custodied tokens to a recipient.
    ///
    /// Transfers `amount` tokens from `custody_account` to `destination_account`,
    /// authorized by the gateway minter's program-derived authority over the fixed
    /// custody seed.
    ///
    /// # Errors
    /// Returns an error if the underlying token-program transfer fails (for example,
    /// insufficient custody balance); the failure surfaces verbatim.
    pub fn mint_token<'info>(
        &self,
        token_program: &Program<'info, Token>,
        custody_account: &Account<'info, TokenAccount>,
        destination_account: &Account<'info, TokenAccount>,
        authority: &Account<'info, GatewayMinter>,
        authority_bump: u8,
        amount: u64,
    ) -> Result<()> {
        let authority_seeds: &[&[&[u8]]] = &[&[GATEWAY_MINTER_SEED, &[authority_bump]]];

        let transfer_ctx = CpiContext::new_with_signer(
            token_program.to_account_info(),
            token::Transfer {
                from: custody_account.to_account_info(),
                to: destination_account.to_account_info(),
                authority: authority.to_account_info(),
            },
            authority_seeds,
        );

        token::transfer(transfer_ctx, amount)?;

        Ok(())
    }

    /// Verifies an attestation signature against a message hash.
    ///
    /// Recovers the signer from the signature (secp256k1 ECDSA, low-S canonical,
    /// recovery id in {0, 1, 27, 28}) and checks that it is an enabled attester.
    ///
    /// # Arguments
    /// * `message_hash` - keccak256 of the canonical attestation-set bytes
    /// * `signature` - 65-byte signature (64 bytes r||s + 1 byte recovery id)
    pub fn verify_attestation_signature(
        &self,
        message_hash: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        require_eq!(
            signature.len(),
            Self::ATTESTATION_SIGNATURE_LENGTH,
            GatewayMinterError::InvalidAttesterSignature
        );

        let recovered_signer = gateway_shared::recover_evm_signer(message_hash, signature)
            .map_err(|_| GatewayMinterError::InvalidAttesterSignature)?;

        require!(
            self.is_attester_enabled(recovered_signer),
            GatewayMinterError::InvalidAttesterSignature
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_minter() -> GatewayMinter {
        GatewayMinter {
            bump: 0,
            owner: Pubkey::default(),
            pending_owner: Pubkey::default(),
            pauser: Pubkey::default(),
            token_controller: Pubkey::default(),
            paused: false,
            enabled_attesters: vec![],
            local_domain: 5,
            version: 1,
            supported_tokens: vec![],
            custody_token_account_bumps: vec![],
        }
    }

    #[test]
    fn add_attester_is_idempotent() {
        let mut state = new_minter();
        let attester = Pubkey::new_unique();

        state.add_attester(attester).unwrap();
        state.add_attester(attester).unwrap();
        state.add_attester(attester).unwrap();

        assert_eq!(state.enabled_attesters, vec![attester]);
    }

    #[test]
    fn remove_attester_is_idempotent() {
        let mut state = new_minter();
        let attester = Pubkey::new_unique();
        state.add_attester(attester).unwrap();

        state.remove_attester(attester).unwrap();
        state.remove_attester(attester).unwrap();

        assert!(state.enabled_attesters.is_empty());
    }

    #[test]
    fn attester_limit_is_enforced() {
        let mut state = new_minter();
        for _ in 0..MAX_ATTESTERS {
            state.add_attester(Pubkey::new_unique()).unwrap();
        }

        let err = state.add_attester(Pubkey::new_unique()).unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::AttesterLimitExceeded.to_string());
        assert_eq!(state.enabled_attesters.len(), MAX_ATTESTERS);
    }

    #[test]
    fn add_token_is_idempotent_and_bounded() {
        let mut state = new_minter();
        let mint = Pubkey::new_unique();

        state.add_token(mint, 254).unwrap();
        state.add_token(mint, 254).unwrap();
        assert_eq!(state.supported_tokens, vec![mint]);
        assert_eq!(state.custody_token_account_bumps, vec![254]);

        for _ in 0..MAX_SUPPORTED_TOKENS - 1 {
            state.add_token(Pubkey::new_unique(), 0).unwrap();
        }
        let err = state.add_token(Pubkey::new_unique(), 0).unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::MaxTokensSupported.to_string());
    }
}
