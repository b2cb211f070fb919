#![forbid(unsafe_code)]

//! Browser binding for Folio.
//!
//! [`folio_core::PageController`] knows nothing about the DOM. This crate
//! turns browser events into [`folio_core::PageEvent`]s, drives the
//! controller's clock from `performance.now()`, applies the
//! [`folio_core::DomCommand`]s it emits, and performs the resume fetch.
//!
//! Only [`binding`] (the selector contract) and [`logs`] build on native
//! targets; the `wasm-bindgen` glue is compiled for `wasm32` only.

pub mod binding;
pub mod logs;

#[cfg(target_arch = "wasm32")]
mod apply;
#[cfg(target_arch = "wasm32")]
mod resume_host;
#[cfg(target_arch = "wasm32")]
mod wasm;
