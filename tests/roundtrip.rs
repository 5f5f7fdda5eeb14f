//======================================================================
// Public API integration tests
//======================================================================

use ruc::cipher::{KeyIvInit, StreamCipher};
use ruc::{
    decrypt_block, decrypt_blocks_batch, encrypt_block, encrypt_blocks_batch, expand_key,
    RucCipher,
};

const KEY: [u8; 64] = [0x42; 64];
const IV: [u8; 32] = [0x24; 32];

#[test]
fn block_roundtrip() {
    let km = expand_key(&KEY);
    let plaintext = *b"an exact thirty-two byte message";

    let ciphertext = encrypt_block(&plaintext, &KEY, &IV, 0, &km);
    let recovered = decrypt_block(&ciphertext, &KEY, &IV, 0, &km);

    assert_ne!(ciphertext, plaintext, "Ciphertext should not match plaintext");
    assert_eq!(recovered, plaintext, "Decrypted text should match original");
}

#[test]
fn selector_count_is_exposed() {
    let km = expand_key(&KEY);
    assert!((16..=31).contains(&km.num_selectors()));
}

#[test]
fn key_material_is_reusable_and_shareable() {
    let km = expand_key(&KEY);
    let plaintext = [0x5Au8; 32];

    let first = encrypt_block(&plaintext, &KEY, &IV, 1, &km);

    // The same material drives another thread to the same ciphertext.
    let km_clone = km.clone();
    let second = std::thread::spawn(move || encrypt_block(&plaintext, &KEY, &IV, 1, &km_clone))
        .join()
        .unwrap();

    assert_eq!(first, second, "KeyMaterial must behave identically across threads");
}

#[test]
fn batch_roundtrip_across_block_numbers() {
    let km = expand_key(&KEY);
    let plaintext: Vec<u8> = (0..8 * 32).map(|i| i as u8).collect();

    let mut ciphertext = vec![0u8; plaintext.len()];
    encrypt_blocks_batch(&plaintext, &KEY, &IV, 1000, &km, &mut ciphertext);

    let mut recovered = vec![0u8; plaintext.len()];
    decrypt_blocks_batch(&ciphertext, &KEY, &IV, 1000, &km, &mut recovered);

    assert_eq!(recovered, plaintext, "Batch decrypt should invert batch encrypt");
}

#[test]
fn stream_cipher_roundtrip() {
    let mut buffer = *b"Stream test message for the RUC cipher adapter..";

    let mut cipher = RucCipher::new(&KEY.into(), &IV.into());
    cipher.apply_keystream(&mut buffer);

    let mut cipher = RucCipher::new(&KEY.into(), &IV.into());
    cipher.apply_keystream(&mut buffer);

    assert_eq!(&buffer, b"Stream test message for the RUC cipher adapter..");
}
