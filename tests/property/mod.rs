// Copyright (c) 2025 - Craftify, Inc.
//! Property-Based Tests Module

mod merge_strategies;
mod yield_arithmetic;
