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

//! Instructions

pub mod accept_ownership;
pub mod add_attester;
pub mod add_token;
pub mod burn_token_custody;
pub mod gateway_mint;
pub mod initialize;
pub mod pause;
pub mod remove_attester;
pub mod transfer_ownership;
pub mod unpause;
pub mod update_pauser;
pub mod update_token_controller;

pub use accept_ownership::*;
pub use add_attester::*;
pub use add_token::*;
pub use burn_token_custody::*;
pub use gateway_mint::*;
pub use initialize::*;
pub use pause::*;
pub use remove_attester::*;
pub use transfer_ownership::*;
pub use unpause::*;
pub use update_pauser::*;
pub use update_token_controller::*;
