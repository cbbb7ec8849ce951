#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use grid_cfg as cfg;
pub use grid_ptr as ptr;
