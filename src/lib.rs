//! Hopper game library
//!
//! A side-scrolling platform jumper: hold to jump higher, land on procedurally
//! generated platforms, and score one point for each new platform reached.
//! The run itself ([`run::GameState`]) is plain data advanced one fixed tick at
//! a time; the Bevy plugins only feed it input and draw it.

pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod physics;
pub mod platforms;
pub mod player;
pub mod rendering;
pub mod run;
pub mod simulation;
