//! dzSOL Stake Tracker
//!
//! Staking analytics for dzSOL deposits on Solana: scans recent
//! transactions to the deposit authority, extracts first-time stakes
//! per wallet, and produces summary statistics, a JSON report, and
//! SVG charts.
//!
//! This crate provides the core implementation for the
//! `dzsol-tracker` CLI tool.

pub mod aggregator;
pub mod charts;
pub mod commands;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod utils;
