//! AgilePoint - Planning Poker Estimation
//!
//! This crate implements the estimation core of a planning poker tool:
//! sessions move through voting, reveal and reset rounds over a Fibonacci
//! deck, with optional AI-generated advisory estimates for each story.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
