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

//! PDA seeds for the GatewayMinter program

/// Seed for the GatewayMinter state singleton
pub const GATEWAY_MINTER_SEED: &[u8] = b"gateway_minter";

/// Seed prefix for a per-mint custody token account
pub const GATEWAY_MINTER_CUSTODY_SEED: &[u8] = b"gateway_minter_custody";
