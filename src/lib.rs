//! Weixin Pay - merchant client for the WeChat Pay v2 API
//!
//! This crate implements the gateway's request-signing protocol and XML
//! message codec, and places, closes and queries orders over a pluggable
//! transport.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
