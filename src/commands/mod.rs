// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod plan;
pub mod generate;
pub mod numbers;
pub mod prices;
pub mod installments;
