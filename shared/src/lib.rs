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

//! Shared utilities for Gateway programs.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{keccak::hash, secp256k1_recover::secp256k1_recover};
use libsecp256k1::Signature as EVMSignature;

pub const DISCRIMINATOR_SIZE: usize = 2;

/// Errors that can occur during EVM signature recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvmSignatureError {
    InvalidMessageHash,
    InvalidSignatureLength,
    InvalidRecoveryId,
    InvalidSignature,
    InvalidSignatureSValue,
}

/// Space required for UsedTransferSpecHash account (only discriminator)
pub const USED_TRANSFER_SPEC_HASH_ACCOUNT_SPACE: usize = DISCRIMINATOR_SIZE;

/// Seed prefix for used transfer spec hash PDA
pub const USED_TRANSFER_SPEC_HASH_SEED_PREFIX: &[u8] = b"used_transfer_spec_hash";

/// Checks if a transfer spec hash account has already been used
pub fn is_transfer_spec_hash_used(account_data: &[u8], discriminator: &[u8]) -> Result<bool> {
    Ok(account_data.len() >= DISCRIMINATOR_SIZE
        && &account_data[..DISCRIMINATOR_SIZE] == discriminator)
}

/// Creates and initializes a used transfer spec hash account to prevent replay attacks.
///
/// This function:
/// 1. Creates/initializes the account with proper rent and ownership, tolerating an
///    account that already holds lamports (pre-funded by an adversary or otherwise)
/// 2. Writes the discriminator to mark the transfer spec hash as used
///
/// Callers are responsible for first checking `is_transfer_spec_hash_used` and
/// rejecting an already-used hash; this function unconditionally claims the account.
///
/// # Arguments
///
/// * `hash_account` - The account info for the used transfer spec hash PDA
/// * `transfer_spec_hash` - The 32-byte hash to be marked as used
/// * `bump` - The bump seed for the PDA
/// * `payer` - The account that pays for the account creation
/// * `system_program` - The system program account info
/// * `program_id` - The program ID that will own the account
/// * `discriminator` - The discriminator to write to the account
pub fn create_used_transfer_spec_hash_account<'info>(
    hash_account: &AccountInfo<'info>,
    transfer_spec_hash: &[u8; 32],
    bump: u8,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    program_id: &Pubkey,
    discriminator: &[u8],
) -> Result<()> {
    // Calculate required rent
    let required_rent = Rent::get()?.minimum_balance(USED_TRANSFER_SPEC_HASH_ACCOUNT_SPACE);
    let current_lamports = hash_account.lamports();

    // Replicate Anchor's init logic for an account that may already carry lamports:
    // https://github.com/solana-foundation/anchor/blob/d5d7eb97979234eb1e9e32fcef66ce171a928b62/lang/syn/src/codegen/accounts/constraints.rs#L1626-L1679
    if current_lamports == 0 {
        // Account doesn't exist, create it
        anchor_lang::system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                anchor_lang::system_program::CreateAccount {
                    from: payer.clone(),
                    to: hash_account.clone(),
                },
                &[&[
                    USED_TRANSFER_SPEC_HASH_SEED_PREFIX,
                    transfer_spec_hash,
                    &[bump],
                ]],
            ),
            required_rent,
            USED_TRANSFER_SPEC_HASH_ACCOUNT_SPACE as u64,
            program_id,
        )?;
    } else {
        // If the account has less than the required rent, top it up
        if current_lamports < required_rent {
            anchor_lang::system_program::transfer(
                CpiContext::new(
                    system_program.clone(),
                    anchor_lang::system_program::Transfer {
                        from: payer.clone(),
                        to: hash_account.clone(),
                    },
                ),
                required_rent - current_lamports,
            )?;
        }

        // Allocate space for the account to the required size
        anchor_lang::system_program::allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                anchor_lang::system_program::Allocate {
                    account_to_allocate: hash_account.clone(),
                },
                &[&[
                    USED_TRANSFER_SPEC_HASH_SEED_PREFIX,
                    transfer_spec_hash,
                    &[bump],
                ]],
            ),
            USED_TRANSFER_SPEC_HASH_ACCOUNT_SPACE as u64,
        )?;

        // Assign the account to our program
        anchor_lang::system_program::assign(
            CpiContext::new_with_signer(
                system_program.clone(),
                anchor_lang::system_program::Assign {
                    account_to_assign: hash_account.clone(),
                },
                &[&[
                    USED_TRANSFER_SPEC_HASH_SEED_PREFIX,
                    transfer_spec_hash,
                    &[bump],
                ]],
            ),
            program_id,
        )?;
    }

    // Write the discriminator to mark this transfer spec hash as used
    let mut account_data = hash_account.try_borrow_mut_data()?;
    account_data[..DISCRIMINATOR_SIZE].copy_from_slice(discriminator);

    Ok(())
}

const SIGNATURE_LENGTH: usize = 65;

/// Recovers the EVM signer's address from a message hash and a 65-byte ECDSA signature.
///
/// The address is returned in the Pubkey/identity shape used throughout the gateway
/// programs: the last 20 bytes of `keccak256(uncompressed_pubkey_xy)`, right-padded
/// with 12 leading zero bytes to fill a 32-byte identity.
///
/// # Arguments
/// * `message_hash` - The 32-byte hash that was signed
/// * `signature` - The 65-byte signature (64 bytes r||s + 1 byte recovery id)
///
/// # Errors
/// Returns an error if:
/// - `message_hash` is not exactly 32 bytes
/// - `signature` is not exactly 65 bytes
/// - the recovery id is not one of {0, 1, 27, 28}
/// - the signature's `s` value is not in canonical low-S form
/// - `secp256k1_recover` fails
pub fn recover_evm_signer(
    message_hash: &[u8],
    signature: &[u8],
) -> core::result::Result<Pubkey, EvmSignatureError> {
    // secp256k1_recover doesn't validate input parameter lengths, so manual checks are needed
    if message_hash.len() != 32 {
        return Err(EvmSignatureError::InvalidMessageHash);
    }
    if signature.len() != SIGNATURE_LENGTH {
        return Err(EvmSignatureError::InvalidSignatureLength);
    }

    // Accept both the EVM-RPC convention (27/28) and the raw recovery id (0/1)
    let raw_recovery_id = signature[SIGNATURE_LENGTH - 1];
    let recovery_id = match raw_recovery_id {
        0 | 1 => raw_recovery_id,
        27 | 28 => raw_recovery_id - 27,
        _ => return Err(EvmSignatureError::InvalidRecoveryId),
    };

    // Reject high-s value signatures to prevent malleability
    let sig = match EVMSignature::parse_standard_slice(&signature[0..SIGNATURE_LENGTH - 1]) {
        Ok(s) => s,
        Err(_) => return Err(EvmSignatureError::InvalidSignature),
    };
    if sig.s.is_high() {
        return Err(EvmSignatureError::InvalidSignatureSValue);
    }

    // Recover signer's public key using secp256k1_recover
    let pubkey = match secp256k1_recover(
        message_hash,
        recovery_id,
        &signature[0..SIGNATURE_LENGTH - 1],
    ) {
        Ok(pk) => pk,
        Err(_) => return Err(EvmSignatureError::InvalidSignature),
    };

    // Hash the uncompressed public key and keep the last 20 bytes as an EVM address,
    // zero-padded on the left to fill the 32-byte identity shape.
    let mut address = hash(pubkey.to_bytes().as_slice()).0;
    address[0..12].iter_mut().for_each(|x| *x = 0);

    Ok(Pubkey::new_from_array(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsecp256k1::{sign, Message, SecretKey};

    fn sign_recoverable(message_hash: &[u8; 32], secret: &SecretKey) -> [u8; 65] {
        let message = Message::parse(message_hash);
        let (sig, recovery_id) = sign(&message, secret);
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&sig.serialize());
        out[64] = recovery_id.serialize();
        out
    }

    #[test]
    fn recovers_signer_with_raw_recovery_id() {
        let secret = SecretKey::parse(&[7u8; 32]).unwrap();
        let message_hash = [9u8; 32];
        let sig = sign_recoverable(&message_hash, &secret);

        let recovered = recover_evm_signer(&message_hash, &sig).unwrap();

        // Same key/hash recovered again must be stable and match
        let recovered_again = recover_evm_signer(&message_hash, &sig).unwrap();
        assert_eq!(recovered, recovered_again);
        // The top 12 bytes are always zero (the identity right-padding)
        assert_eq!(&recovered.to_bytes()[0..12], &[0u8; 12]);
    }

    #[test]
    fn accepts_evm_style_recovery_id() {
        let secret = SecretKey::parse(&[3u8; 32]).unwrap();
        let message_hash = [1u8; 32];
        let mut sig = sign_recoverable(&message_hash, &secret);

        let raw = recover_evm_signer(&message_hash, &sig).unwrap();

        sig[64] += 27;
        let evm_style = recover_evm_signer(&message_hash, &sig).unwrap();

        assert_eq!(raw, evm_style);
    }

    #[test]
    fn rejects_bad_recovery_id() {
        let secret = SecretKey::parse(&[3u8; 32]).unwrap();
        let message_hash = [1u8; 32];
        let mut sig = sign_recoverable(&message_hash, &secret);
        sig[64] = 4;

        let err = recover_evm_signer(&message_hash, &sig).unwrap_err();
        assert_eq!(err, EvmSignatureError::InvalidRecoveryId);
    }

    #[test]
    fn rejects_wrong_length_signature() {
        let err = recover_evm_signer(&[0u8; 32], &[0u8; 64]).unwrap_err();
        assert_eq!(err, EvmSignatureError::InvalidSignatureLength);
    }

    #[test]
    fn rejects_wrong_length_hash() {
        let err = recover_evm_signer(&[0u8; 31], &[0u8; 65]).unwrap_err();
        assert_eq!(err, EvmSignatureError::InvalidMessageHash);
    }

    #[test]
    fn transfer_spec_hash_used_requires_discriminator_match() {
        let discriminator = [11u8, 1];
        assert!(!is_transfer_spec_hash_used(&[], &discriminator).unwrap());
        assert!(!is_transfer_spec_hash_used(&[11, 2], &discriminator).unwrap());
        assert!(is_transfer_spec_hash_used(&[11, 1], &discriminator).unwrap());
    }
}
