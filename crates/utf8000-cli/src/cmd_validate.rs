/// Implementation of `utf8000 validate`.
///
/// Decodes the whole stream and reports either a series of success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`). The command exits
/// with code 0 on a valid stream and code 1 on any error (the main
/// dispatcher in `main.rs` converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Grammar: 12 values decoded from 31 bytes
/// ✓ Termination: stream ends on a value boundary
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: overlong encoding for value starting at offset 4
/// ```
use anyhow::{Result, anyhow};
use utf8000_decoder::{DecodeError, Utf8000Decoder, WireError};

use crate::ValidateArgs;
use crate::input::read_input;

/// Run the `utf8000 validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or fails validation.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes = read_input(&args.file)?;

    match Utf8000Decoder::decode(&bytes) {
        Ok(values) => {
            println!(
                "✓ Grammar: {} value{} decoded from {} bytes",
                values.len(),
                if values.len() == 1 { "" } else { "s" },
                bytes.len()
            );
            println!("✓ Termination: stream ends on a value boundary");
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a one-line diagnostic.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────────┐
/// │ DecodeError variant      │ Diagnostic message prefix                │
/// ├──────────────────────────┼──────────────────────────────────────────┤
/// │ InvalidStartByte         │ "byte 0xNN at offset N cannot start…"    │
/// │ InvalidContinuationByte  │ "expected continuation byte at offset…"  │
/// │ Truncated                │ "stream truncated: …"                    │
/// │ everything else          │ "<error Display>"                        │
/// └──────────────────────────┴──────────────────────────────────────────┘
/// ```
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::Wire(WireError::InvalidStartByte { offset, byte }) => {
            format!("byte {byte:#04X} at offset {offset} cannot start a value (10xxxxxx is continuation-only)")
        }
        DecodeError::Wire(WireError::InvalidContinuationByte { offset, byte }) => {
            format!("expected continuation byte (10xxxxxx) at offset {offset}, found {byte:#010b}")
        }
        DecodeError::Truncated { pending_bytes } => {
            format!("stream truncated: last value has only {pending_bytes} of its bytes")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_explain_the_failure() {
        let err = Utf8000Decoder::decode(&[0x80]).unwrap_err();
        assert_eq!(
            diagnostic(&err),
            "byte 0x80 at offset 0 cannot start a value (10xxxxxx is continuation-only)"
        );

        let err = Utf8000Decoder::decode(&[0xE2, 0x41]).unwrap_err();
        assert_eq!(
            diagnostic(&err),
            "expected continuation byte (10xxxxxx) at offset 1, found 0b01000001"
        );

        let err = Utf8000Decoder::decode(&[0xE2, 0x82]).unwrap_err();
        assert_eq!(
            diagnostic(&err),
            "stream truncated: last value has only 2 of its bytes"
        );
    }
}
