// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod defaults;
pub mod error;
pub mod installment;
pub mod models;
pub mod numbering;
pub mod planner;
pub mod pricing;
pub mod utils;
