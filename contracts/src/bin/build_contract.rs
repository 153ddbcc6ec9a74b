#![cfg_attr(target_arch = "wasm32", no_std)]
#![cfg_attr(target_arch = "wasm32", no_main)]
#![allow(unused_imports, clippy::single_component_path_imports)]

// Wasm entry for `cargo odra build`; the module selected by ODRA_MODULE
// exports its entry points from the library.
use simple_swapper;

#[cfg(not(target_arch = "wasm32"))]
fn main() {}
