//! Minimal Hilbert curve example: encode a tuple and decode it back.

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // snips-start: example
    let tuple = [1u8, 2, 3];
    let code = lindel::hilbert_encode(&tuple)?;
    println!("Hilbert code for {tuple:?}: {code}");

    let round_trip: smallvec::SmallVec<[u8; 16]> = lindel::hilbert_decode(code, 3)?;
    println!("Decoded back: {round_trip:?}");

    assert_eq!(round_trip.as_slice(), &tuple);
    // snips-end: example

    Ok(())
}
