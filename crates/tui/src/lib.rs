//! Terminal client for a remote personal-finance `transactions` store.
//!
//! The binary wires four layers together: [`config`] resolves settings,
//! [`client`] speaks HTTP to the store, [`store`] keeps the in-memory
//! mirror of the transaction list (the only component allowed to mutate
//! it), and [`app`]/[`ui`] run the interactive shell on top.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod store;
pub mod ui;
