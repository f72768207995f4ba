// [libs/core-gen/src/address.rs]
//! Codificación Base58Check de direcciones P2PKH (pay-to-pubkey-hash).

/// Byte de versión para direcciones P2PKH de la red principal de Bitcoin.
const MAINNET_P2PKH_VERSION_BYTE: u8 = 0x00;

/// Codifica un `hash160` de 20 bytes como una dirección P2PKH Base58Check
/// de mainnet (siempre comienza con `1`).
#[must_use]
pub fn hash160_to_p2pkh_address(hash160: &[u8; 20]) -> String {
    let mut versioned_payload = Vec::with_capacity(21);
    versioned_payload.push(MAINNET_P2PKH_VERSION_BYTE);
    versioned_payload.extend_from_slice(hash160);
    bs58::encode(versioned_payload).with_check().into_string()
}

/// Deriva la dirección P2PKH directamente a partir de una clave pública
/// comprimida de 33 bytes.
#[must_use]
pub fn compressed_pubkey_to_p2pkh_address(compressed_public_key: &[u8; 33]) -> String {
    let hash160 = puzzle71_core_math::hashing::hash160_of_compressed_pubkey(compressed_public_key);
    hash160_to_p2pkh_address(&hash160)
}
