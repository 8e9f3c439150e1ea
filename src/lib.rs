//! After Humanity: a top-down survival game played on a seeded grid.
//!
//! Everything that decides what happens lives in [`engine::Engine`], which
//! applies [`action::Command`]s one at a time. Clients read state back through
//! the snapshot types in [`observer`].

pub mod action;
pub mod build;
pub mod config;
pub mod dilemma;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod movement;
pub mod observation;
pub mod observer;
pub mod rng;
pub mod scheduler;
pub mod structures;
pub mod tui;
pub mod world;
pub mod yields;
