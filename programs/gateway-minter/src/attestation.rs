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

//! MintAttestation
//!
//! This module implements a zero-copy, non-owning parser and a canonical encoder for
//! attestation-set messages. All integer encodings are **big-endian**; there is no
//! padding between fields.
//!
//! Constants:
//! - Set magic: `0xFF6FB334`
//!
//! Attestation set layout:
//! ```text
//! offset  size  field
//! 0       4     magic (0xFF6FB334)
//! 4       4     version
//! 8       4     num_attestations
//! 12      ?     attestations (concatenated)
//! ```
//!
//! Attestation element layout (relative to the element's own start):
//! ```text
//! offset  size  field
//! 0       4     source_domain
//! 4       4     destination_domain
//! 8       32    source_contract
//! 40      32    destination_contract
//! 72      32    source_token
//! 104     32    destination_token
//! 136     32    source_depositor
//! 168     32    destination_recipient
//! 200     32    destination_caller
//! 232     32    source_signer
//! 264     32    source_tx_hash
//! 296     8     nonce (u64)
//! 304     8     max_block_height (u64)
//! 312     32    transfer_spec_hash
//! 344     32    value (u256, big-endian)
//! 376     4     hook_data_length
//! 380     N     hook_data
//! ```

use crate::error::GatewayMinterError;
use anchor_lang::prelude::*;

/// A non-owning, offset-based view over an attestation set. Exposes a cursor-style
/// iterator (`next()`) over the elements it contains; no allocation occurs.
#[derive(Clone, Debug)]
pub struct MintAttestation<'a> {
    data: &'a [u8],
    offset: usize,
    index: u32,
    num_elements: u32,
}

// Iterator
impl<'a> MintAttestation<'a> {
    pub const ATTESTATION_SET_MAGIC: u32 = 0xFF6F_B334;

    // Byte offsets of each field in the attestation-set header
    const MAGIC_OFFSET: usize = 0;
    const VERSION_OFFSET: usize = 4;
    const ATTESTATION_SET_NUM_ATTESTATIONS_OFFSET: usize = 8;
    const ATTESTATION_SET_ATTESTATIONS_OFFSET: usize = 12;

    // Relative byte offsets of each field in an attestation element
    const SOURCE_DOMAIN_OFFSET: usize = 0;
    const DESTINATION_DOMAIN_OFFSET: usize = 4;
    const SOURCE_CONTRACT_OFFSET: usize = 8;
    const DESTINATION_CONTRACT_OFFSET: usize = 40;
    const SOURCE_TOKEN_OFFSET: usize = 72;
    const DESTINATION_TOKEN_OFFSET: usize = 104;
    const SOURCE_DEPOSITOR_OFFSET: usize = 136;
    const DESTINATION_RECIPIENT_OFFSET: usize = 168;
    const DESTINATION_CALLER_OFFSET: usize = 200;
    const SOURCE_SIGNER_OFFSET: usize = 232;
    const SOURCE_TX_HASH_OFFSET: usize = 264;
    const NONCE_OFFSET: usize = 296;
    const MAX_BLOCK_HEIGHT_OFFSET: usize = 304;
    const TRANSFER_SPEC_HASH_OFFSET: usize = 312;
    const VALUE_OFFSET: usize = 344;
    const HOOK_DATA_LENGTH_OFFSET: usize = 376;
    const HOOK_DATA_OFFSET: usize = 380;

    pub fn new(message_bytes: &'a [u8]) -> Result<Self> {
        // The smallest valid encoding is a set header plus one element's fixed header
        require_gte!(
            message_bytes.len(),
            Self::ATTESTATION_SET_ATTESTATIONS_OFFSET + Self::HOOK_DATA_OFFSET,
            GatewayMinterError::AttestationTooShort
        );

        let mut attestation = Self {
            data: message_bytes,
            offset: 0,
            index: 0,
            num_elements: 0,
        };

        require!(
            attestation.magic()? == Self::ATTESTATION_SET_MAGIC,
            GatewayMinterError::AttestationMagicMismatch
        );

        attestation.num_elements = attestation.num_attestations()?;
        attestation.offset = Self::ATTESTATION_SET_ATTESTATIONS_OFFSET;

        require_gt!(
            attestation.num_elements,
            0,
            GatewayMinterError::EmptyAttestationSet
        );

        Ok(attestation)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool> {
        if self.index >= self.num_elements {
            return Ok(false);
        }

        // Advance to the next attestation based on the size of the current element.
        // Do not advance on the first call; just expose the first element.
        if self.index > 0 {
            let hook_data_length = Self::u32_to_usize(self.hook_data_length()?)?;
            let attestation_length = Self::checked_add(Self::HOOK_DATA_OFFSET, hook_data_length)?;
            self.offset = Self::checked_add(self.offset, attestation_length)?;
        }
        self.index += 1;

        // Check that there are enough bytes to read the next element's fixed header
        let remaining_length = self.data.len() - self.offset;
        require_gte!(
            remaining_length,
            Self::HOOK_DATA_OFFSET,
            GatewayMinterError::AttestationTooShort
        );

        // Check that there are enough bytes to read the next element's hook data
        let hook_data_length = Self::u32_to_usize(self.hook_data_length()?)?;
        let attestation_length = Self::checked_add(Self::HOOK_DATA_OFFSET, hook_data_length)?;
        require_gte!(
            remaining_length,
            attestation_length,
            GatewayMinterError::AttestationTooShort
        );

        // If this is the last element, it must have no extraneous trailing bytes
        if self.index == self.num_elements {
            require_eq!(
                self.offset + attestation_length,
                self.data.len(),
                GatewayMinterError::AttestationTooLong
            );
        }

        Ok(true)
    }
}

// Field accessors
impl<'a> MintAttestation<'a> {
    /// Returns the magic field for the attestation set
    pub fn magic(&self) -> Result<u32> {
        self.read_u32(Self::MAGIC_OFFSET)
    }

    /// Returns the num_attestations field for the attestation set
    pub fn num_attestations(&self) -> Result<u32> {
        self.read_u32(Self::ATTESTATION_SET_NUM_ATTESTATIONS_OFFSET)
    }

    /// Returns the version field for the attestation set
    pub fn version(&self) -> Result<u32> {
        self.read_u32(Self::VERSION_OFFSET)
    }

    /// Returns source_domain for the current element
    pub fn source_domain(&self) -> Result<u32> {
        self.read_u32(Self::checked_add(self.offset, Self::SOURCE_DOMAIN_OFFSET)?)
    }

    /// Returns destination_domain for the current element
    pub fn destination_domain(&self) -> Result<u32> {
        self.read_u32(Self::checked_add(
            self.offset,
            Self::DESTINATION_DOMAIN_OFFSET,
        )?)
    }

    /// Returns source_contract for the current element
    pub fn source_contract(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(self.offset, Self::SOURCE_CONTRACT_OFFSET)?)
    }

    /// Returns destination_contract for the current element
    pub fn destination_contract(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(
            self.offset,
            Self::DESTINATION_CONTRACT_OFFSET,
        )?)
    }

    /// Returns source_token for the current element
    pub fn source_token(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(self.offset, Self::SOURCE_TOKEN_OFFSET)?)
    }

    /// Returns destination_token for the current element
    pub fn destination_token(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(
            self.offset,
            Self::DESTINATION_TOKEN_OFFSET,
        )?)
    }

    /// Returns source_depositor for the current element
    pub fn source_depositor(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(
            self.offset,
            Self::SOURCE_DEPOSITOR_OFFSET,
        )?)
    }

    /// Returns destination_recipient for the current element
    pub fn destination_recipient(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(
            self.offset,
            Self::DESTINATION_RECIPIENT_OFFSET,
        )?)
    }

    /// Returns destination_caller for the current element (all-zero means "anyone")
    pub fn destination_caller(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(
            self.offset,
            Self::DESTINATION_CALLER_OFFSET,
        )?)
    }

    /// Returns source_signer for the current element
    pub fn source_signer(&self) -> Result<Pubkey> {
        self.read_pubkey(Self::checked_add(self.offset, Self::SOURCE_SIGNER_OFFSET)?)
    }

    /// Returns source_tx_hash for the current element
    pub fn source_tx_hash(&self) -> Result<[u8; 32]> {
        self.read_bytes::<32>(Self::checked_add(self.offset, Self::SOURCE_TX_HASH_OFFSET)?)
    }

    /// Returns nonce for the current element
    pub fn nonce(&self) -> Result<u64> {
        self.read_u64(Self::checked_add(self.offset, Self::NONCE_OFFSET)?)
    }

    /// Returns max_block_height for the current element
    pub fn max_block_height(&self) -> Result<u64> {
        self.read_u64(Self::checked_add(
            self.offset,
            Self::MAX_BLOCK_HEIGHT_OFFSET,
        )?)
    }

    /// Returns transfer_spec_hash for the current element
    pub fn transfer_spec_hash(&self) -> Result<[u8; 32]> {
        self.read_bytes::<32>(Self::checked_add(
            self.offset,
            Self::TRANSFER_SPEC_HASH_OFFSET,
        )?)
    }

    /// Returns the raw big-endian u256 value bytes for the current element
    pub fn value_bytes(&self) -> Result<[u8; 32]> {
        self.read_bytes::<32>(Self::checked_add(self.offset, Self::VALUE_OFFSET)?)
    }

    /// Returns hook_data_length for the current element
    pub fn hook_data_length(&self) -> Result<u32> {
        self.read_u32(Self::checked_add(
            self.offset,
            Self::HOOK_DATA_LENGTH_OFFSET,
        )?)
    }

    /// Returns hook_data for the current element
    pub fn hook_data(&self) -> Result<&[u8]> {
        let hook_data_offset = Self::checked_add(self.offset, Self::HOOK_DATA_OFFSET)?;
        let hook_data_length = Self::u32_to_usize(self.hook_data_length()?)?;
        Ok(&self.data[hook_data_offset..Self::checked_add(hook_data_offset, hook_data_length)?])
    }

    // Private helpers

    fn read_u32(&self, index: usize) -> Result<u32> {
        let end = Self::checked_add(index, 4)?;
        Ok(u32::from_be_bytes(
            self.data[index..end]
                .try_into()
                .map_err(|_| error!(GatewayMinterError::MalformedMintAttestation))?,
        ))
    }

    fn read_u64(&self, index: usize) -> Result<u64> {
        let end = Self::checked_add(index, 8)?;
        Ok(u64::from_be_bytes(
            self.data[index..end]
                .try_into()
                .map_err(|_| error!(GatewayMinterError::MalformedMintAttestation))?,
        ))
    }

    fn read_pubkey(&self, index: usize) -> Result<Pubkey> {
        Pubkey::try_from(
            &self.data[index..Self::checked_add(index, std::mem::size_of::<Pubkey>())?],
        )
        .map_err(|_| error!(GatewayMinterError::MalformedMintAttestation))
    }

    fn read_bytes<const N: usize>(&self, index: usize) -> Result<[u8; N]> {
        self.data[index..Self::checked_add(index, N)?]
            .try_into()
            .map_err(|_| error!(GatewayMinterError::MalformedMintAttestation))
    }

    fn u32_to_usize(value: u32) -> Result<usize> {
        usize::try_from(value).map_err(|_| error!(GatewayMinterError::MalformedMintAttestation))
    }

    #[inline]
    fn checked_add(a: usize, b: usize) -> Result<usize> {
        a.checked_add(b)
            .ok_or_else(|| error!(GatewayMinterError::MalformedMintAttestation))
    }
}

/// Converts a big-endian u256 value to `u64`, failing if the magnitude does not fit.
/// SPL token amounts are `u64`; a value whose top 24 bytes are nonzero cannot be
/// redeemed through this program regardless of the bridge-wide value it represents.
pub fn value_to_u64(value: &[u8; 32]) -> Result<u64> {
    require!(
        value[0..24].iter().all(|b| *b == 0),
        GatewayMinterError::InvalidAttestationValue
    );
    Ok(u64::from_be_bytes(value[24..32].try_into().unwrap()))
}

pub fn value_is_zero(value: &[u8; 32]) -> bool {
    value.iter().all(|b| *b == 0)
}

#[derive(Clone, Debug)]
pub struct MintAttestationStruct<'a> {
    pub version: u32,
    pub elements: Vec<MintAttestationElementStruct<'a>>,
}

#[derive(Clone, Debug)]
pub struct MintAttestationElementStruct<'a> {
    pub source_domain: u32,
    pub destination_domain: u32,
    pub source_contract: [u8; 32],
    pub destination_contract: [u8; 32],
    pub source_token: [u8; 32],
    pub destination_token: [u8; 32],
    pub source_depositor: [u8; 32],
    pub destination_recipient: [u8; 32],
    pub destination_caller: [u8; 32],
    pub source_signer: [u8; 32],
    pub source_tx_hash: [u8; 32],
    pub nonce: u64,
    pub max_block_height: u64,
    pub transfer_spec_hash: [u8; 32],
    pub value: [u8; 32],
    pub hook_data: &'a [u8],
}

impl<'a> MintAttestationStruct<'a> {
    /// Canonically re-encodes the attestation set. This MUST byte-for-byte match the
    /// layout an off-chain signer produces over the same logical inputs, since the
    /// signature binds this exact byte string (see `MintAttestation`'s module docs).
    pub fn encode_attestation(&self) -> Vec<u8> {
        let num_elements = self.elements.len() as u32;

        let mut total_size = MintAttestation::ATTESTATION_SET_ATTESTATIONS_OFFSET;
        for element in &self.elements {
            total_size += MintAttestation::HOOK_DATA_OFFSET + element.hook_data.len();
        }

        let mut buffer = Vec::with_capacity(total_size);

        buffer.extend_from_slice(&MintAttestation::ATTESTATION_SET_MAGIC.to_be_bytes());
        buffer.extend_from_slice(&self.version.to_be_bytes());
        buffer.extend_from_slice(&num_elements.to_be_bytes());

        for element in &self.elements {
            let hook_data_length = element.hook_data.len() as u32;
            buffer.extend_from_slice(&element.source_domain.to_be_bytes());
            buffer.extend_from_slice(&element.destination_domain.to_be_bytes());
            buffer.extend_from_slice(&element.source_contract);
            buffer.extend_from_slice(&element.destination_contract);
            buffer.extend_from_slice(&element.source_token);
            buffer.extend_from_slice(&element.destination_token);
            buffer.extend_from_slice(&element.source_depositor);
            buffer.extend_from_slice(&element.destination_recipient);
            buffer.extend_from_slice(&element.destination_caller);
            buffer.extend_from_slice(&element.source_signer);
            buffer.extend_from_slice(&element.source_tx_hash);
            buffer.extend_from_slice(&element.nonce.to_be_bytes());
            buffer.extend_from_slice(&element.max_block_height.to_be_bytes());
            buffer.extend_from_slice(&element.transfer_spec_hash);
            buffer.extend_from_slice(&element.value);
            buffer.extend_from_slice(&hook_data_length.to_be_bytes());
            buffer.extend_from_slice(element.hook_data);
        }

        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_element(transfer_spec_hash: [u8; 32], value: u64) -> MintAttestationElementStruct<'static> {
        let mut value_bytes = [0u8; 32];
        value_bytes[24..].copy_from_slice(&value.to_be_bytes());
        MintAttestationElementStruct {
            source_domain: 0,
            destination_domain: 5,
            source_contract: [1u8; 32],
            destination_contract: [2u8; 32],
            source_token: [3u8; 32],
            destination_token: [4u8; 32],
            source_depositor: [5u8; 32],
            destination_recipient: [6u8; 32],
            destination_caller: [0u8; 32],
            source_signer: [7u8; 32],
            source_tx_hash: [8u8; 32],
            nonce: 42,
            max_block_height: 15_000,
            transfer_spec_hash,
            value: value_bytes,
            hook_data: &[],
        }
    }

    #[test]
    fn round_trip_single_element() {
        let set = MintAttestationStruct {
            version: 1,
            elements: vec![sample_element([9u8; 32], 100_000_000)],
        };
        let bytes = set.encode_attestation();

        let mut view = MintAttestation::new(&bytes).unwrap();
        assert_eq!(view.version().unwrap(), 1);
        assert_eq!(view.num_attestations().unwrap(), 1);
        assert!(view.next().unwrap());
        assert_eq!(view.destination_domain().unwrap(), 5);
        assert_eq!(view.nonce().unwrap(), 42);
        assert_eq!(view.transfer_spec_hash().unwrap(), [9u8; 32]);
        assert_eq!(value_to_u64(&view.value_bytes().unwrap()).unwrap(), 100_000_000);
        assert!(!view.next().unwrap());
    }

    #[test]
    fn round_trip_multi_element_preserves_order() {
        let set = MintAttestationStruct {
            version: 7,
            elements: vec![
                sample_element([1u8; 32], 50_000_000),
                sample_element([2u8; 32], 30_000_000),
                sample_element([3u8; 32], 20_000_000),
            ],
        };
        let bytes = set.encode_attestation();

        let mut view = MintAttestation::new(&bytes).unwrap();
        let mut hashes = vec![];
        while view.next().unwrap() {
            hashes.push(view.transfer_spec_hash().unwrap());
        }
        assert_eq!(hashes, vec![[1u8; 32], [2u8; 32], [3u8; 32]]);
    }

    #[test]
    fn rejects_truncated_message() {
        let set = MintAttestationStruct {
            version: 1,
            elements: vec![sample_element([1u8; 32], 1)],
        };
        let mut bytes = set.encode_attestation();
        bytes.pop();

        let err = MintAttestation::new(&bytes).unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::AttestationTooShort.to_string());
    }

    #[test]
    fn rejects_trailing_byte() {
        let set = MintAttestationStruct {
            version: 1,
            elements: vec![sample_element([1u8; 32], 1)],
        };
        let mut bytes = set.encode_attestation();
        bytes.push(0);

        let mut view = MintAttestation::new(&bytes).unwrap();
        let err = view.next().unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::AttestationTooLong.to_string());
    }

    #[test]
    fn rejects_overstated_hook_data_length() {
        let mut element = sample_element([1u8; 32], 1);
        let hook_data = [0u8; 4];
        element.hook_data = &hook_data;
        let set = MintAttestationStruct {
            version: 1,
            elements: vec![element],
        };
        let mut bytes = set.encode_attestation();
        // Bump the hook_data_length field (last 4 bytes before hook_data) by one.
        let len_offset = bytes.len() - hook_data.len() - 4;
        let overstated = (hook_data.len() as u32 + 1).to_be_bytes();
        bytes[len_offset..len_offset + 4].copy_from_slice(&overstated);

        let mut view = MintAttestation::new(&bytes).unwrap();
        let err = view.next().unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::AttestationTooShort.to_string());
    }

    #[test]
    fn rejects_magic_mismatch() {
        let set = MintAttestationStruct {
            version: 1,
            elements: vec![sample_element([1u8; 32], 1)],
        };
        let mut bytes = set.encode_attestation();
        bytes[0] ^= 0xFF;

        let err = MintAttestation::new(&bytes).unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::AttestationMagicMismatch.to_string());
    }

    #[test]
    fn rejects_empty_set() {
        let set = MintAttestationStruct {
            version: 1,
            elements: vec![],
        };
        // An empty element list still needs a full header-sized buffer to reach the
        // num_attestations==0 check rather than bailing out on length first.
        let mut bytes = set.encode_attestation();
        bytes.resize(
            MintAttestation::ATTESTATION_SET_ATTESTATIONS_OFFSET + MintAttestation::HOOK_DATA_OFFSET,
            0,
        );
        bytes[0..4].copy_from_slice(&MintAttestation::ATTESTATION_SET_MAGIC.to_be_bytes());

        let err = MintAttestation::new(&bytes).unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::EmptyAttestationSet.to_string());
    }

    #[test]
    fn value_conversion_rejects_overflow() {
        let mut value = [0u8; 32];
        value[0] = 1;
        let err = value_to_u64(&value).unwrap_err();
        assert_eq!(err.to_string(), GatewayMinterError::InvalidAttestationValue.to_string());
    }

    #[test]
    fn value_is_zero_detects_zero_and_nonzero() {
        assert!(value_is_zero(&[0u8; 32]));
        let mut nonzero = [0u8; 32];
        nonzero[31] = 1;
        assert!(!value_is_zero(&nonzero));
    }
}
