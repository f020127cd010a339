/// Implementation of `utf8000 decode`.
///
/// Feeds the input to an `IncrementalDecoder` and prints every decoded
/// integer on its own line. By default the whole input goes in as one
/// chunk; `--chunk-size N` feeds it `N` bytes at a time, draining after
/// each chunk, which exercises the same suspend/resume path a network
/// stream would.
///
/// # Output formats
///
/// ```text
/// ┌────────┬──────────────────────────────┐
/// │ Format │ Example                      │
/// ├────────┼──────────────────────────────┤
/// │ dec    │ 8364            (default)    │
/// │ hex    │ 0x20ac                       │
/// └────────┴──────────────────────────────┘
/// ```
use std::io::{self, BufWriter, Write as _};

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use utf8000_decoder::{DecodedValue, IncrementalDecoder, Utf8000Decoder};

use crate::DecodeArgs;
use crate::input::{display_name, read_input};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Dec,
    Hex,
}

/// Run the `utf8000 decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, a flag value is
/// unrecognised, the stream violates the grammar, or it ends mid-value.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let format = parse_format(&args.format)?;
    let chunk_size = match args.chunk_size {
        Some(0) => bail!("--chunk-size must be at least 1"),
        Some(n) => Some(n),
        None => None,
    };

    let bytes = read_input(&args.file)?;
    let name = display_name(&args.file);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut decoder = IncrementalDecoder::new();

    let chunks: Box<dyn Iterator<Item = &[u8]> + '_> = match chunk_size {
        Some(n) => Box::new(bytes.chunks(n)),
        None => Box::new(std::iter::once(bytes.as_slice())),
    };

    for chunk in chunks {
        // Values completed before a bad byte are still printed.
        let fed = decoder.feed(chunk);
        for value in decoder.drain() {
            writeln!(out, "{}", render(&value, format))?;
        }
        if let Err(e) = fed {
            out.flush()?;
            return Err(e).with_context(|| format!("failed to decode {name}"));
        }
    }
    out.flush()?;

    Utf8000Decoder::ensure_complete(&decoder)
        .with_context(|| format!("failed to decode {name}"))?;
    debug!("decoded {} bytes from {name}", decoder.consumed());
    Ok(())
}

fn render(value: &DecodedValue, format: Format) -> String {
    match format {
        Format::Dec => value.to_biguint().to_string(),
        Format::Hex => format!("{:#x}", value.to_biguint()),
    }
}

/// Parse a `--format` string into a [`Format`].
///
/// Accepted values (case-insensitive): `dec`, `hex`.
fn parse_format(s: &str) -> Result<Format> {
    match s.to_lowercase().as_str() {
        "dec" | "decimal" => Ok(Format::Dec),
        "hex" => Ok(Format::Hex),
        other => Err(anyhow!("unknown format {other:?}; expected dec or hex")),
    }
}
