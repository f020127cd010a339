/// Implementation of `utf8000 stats`.
///
/// Decodes the stream and prints its size, the number of values, how
/// many values use each encoded length, and the widest value seen.
///
/// # Example output
///
/// ```text
/// File:    /tmp/values.u8k  (14 bytes)
/// Values:  6 total
///
/// Length   Count   Bytes
/// ────────────────────────
///      1       3       3
///      2       1       2
///      3       1       3
///      6       1       6
/// ────────────────────────
/// Total        6      14
///
/// Widest value: 27 bits (6-byte form, 31-bit capacity)
/// ```
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use utf8000_decoder::{DecodedValue, Utf8000Decoder};

use crate::StatsArgs;
use crate::input::{display_name, read_input};

/// Run the `utf8000 stats` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a valid
/// UTF8000 stream.
pub fn run(args: &StatsArgs) -> Result<()> {
    let bytes = read_input(&args.file)?;
    let name = display_name(&args.file);
    let values =
        Utf8000Decoder::decode(&bytes).with_context(|| format!("failed to decode {name}"))?;

    println!("File:    {name}  ({} bytes)", bytes.len());
    println!("Values:  {} total", values.len());

    if values.is_empty() {
        return Ok(());
    }

    let by_len = length_histogram(&values);

    println!();
    println!("Length   Count   Bytes");
    println!("{}", "─".repeat(24));
    for (len, count) in &by_len {
        println!("{len:>6}  {count:>6}  {:>6}", len * count);
    }
    println!("{}", "─".repeat(24));
    println!("Total   {:>6}  {:>6}", values.len(), bytes.len());

    if let Some(line) = widest_line(&values) {
        println!();
        println!("{line}");
    }

    Ok(())
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// Encoded length → number of values with that length.
fn length_histogram(values: &[DecodedValue]) -> BTreeMap<usize, usize> {
    let mut by_len = BTreeMap::new();
    for value in values {
        *by_len.entry(value.n_bytes()).or_default() += 1;
    }
    by_len
}

/// `Widest value: 27 bits (6-byte form, 31-bit capacity)`
fn widest_line(values: &[DecodedValue]) -> Option<String> {
    let (bits, value) = values
        .iter()
        .map(|v| (v.to_biguint().bits(), v))
        .max_by_key(|(bits, _)| *bits)?;
    Some(format!(
        "Widest value: {bits} bits ({}-byte form, {}-bit capacity)",
        value.n_bytes(),
        value.n_bits_capacity()
    ))
}
