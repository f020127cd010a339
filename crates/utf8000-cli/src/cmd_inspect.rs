/// Implementation of `utf8000 inspect`.
///
/// Decodes the stream and prints one summary line per value. With
/// `--show-bytes`, every byte is listed underneath with its bit split
/// (`prefix|payload`) and the role flags the decoder assigned.
///
/// # Output format
///
/// ```text
/// Stream: 6 bytes, 3 values
/// Value 0 @0: 1 byte, 7-bit capacity = 65
/// Value 1 @1: 3 bytes, 16-bit capacity = 8364
///          @1     0xE2  1110|0010  start content
///          @2     0x82  10|000010  continuation content
///          @3     0xAC  10|101100  continuation content
/// Value 2 @4: 2 bytes, 11-bit capacity = 169
/// ```
use anyhow::{Context, Result};
use utf8000_decoder::{DecodedByte, DecodedValue, Utf8000Decoder};

use crate::InspectArgs;
use crate::input::{display_name, read_input};

/// Run the `utf8000 inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a valid
/// UTF8000 stream.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = read_input(&args.file)?;
    let values = Utf8000Decoder::decode(&bytes)
        .with_context(|| format!("failed to decode {}", display_name(&args.file)))?;

    println!(
        "Stream: {} byte{}, {} value{}",
        bytes.len(),
        plural(bytes.len()),
        values.len(),
        plural(values.len())
    );

    for (idx, value) in values.iter().enumerate() {
        // When --value N is specified, skip all other indices.
        if let Some(target) = args.value
            && idx != target
        {
            continue;
        }

        println!("{}", summary_line(idx, value));

        if args.show_bytes {
            let mut offset = value.offset();
            for byte in value.bytes() {
                println!("         {:<6} {}", format!("@{offset}"), byte_line(byte));
                offset += 1;
            }
        }
    }

    Ok(())
}

// ── Formatting helpers ────────────────────────────────────────────────────────

fn summary_line(idx: usize, value: &DecodedValue) -> String {
    format!(
        "Value {idx} @{}: {} byte{}, {}-bit capacity = {}",
        value.offset(),
        value.n_bytes(),
        plural(value.n_bytes()),
        value.n_bits_capacity(),
        value.to_biguint()
    )
}

/// `0xE2  1110|0010  start content`
fn byte_line(byte: &DecodedByte) -> String {
    format!(
        "{:#04X}  {:<10} {}",
        byte.byte(),
        byte.to_string(),
        role_label(byte)
    )
}

/// Space-separated names of the flags set on a byte.
fn role_label(byte: &DecodedByte) -> String {
    let mut roles = Vec::with_capacity(3);
    if byte.is_start_byte() {
        roles.push("start");
    }
    if byte.is_continuation_byte() {
        roles.push("continuation");
    }
    if byte.is_content_byte() {
        roles.push("content");
    } else {
        roles.push("signaling");
    }
    roles.join(" ")
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
