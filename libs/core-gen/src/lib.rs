// [libs/core-gen/src/lib.rs]
//! `puzzle71-core-gen`: derivación de direcciones Bitcoin a partir de
//! claves públicas comprimidas, construida sobre `puzzle71-core-math`.

pub mod address;

pub mod prelude {
    pub use crate::address::{compressed_pubkey_to_p2pkh_address, hash160_to_p2pkh_address};
}
