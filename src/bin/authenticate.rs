//! File authentication tool.
//!
//! Computes the UVMAC tag of a file and writes it, in hexadecimal, next to
//! the input as `<inputFile>.tag`. The hash key selects the hash function
//! and can be reused across files; the pad key is indexed by the message
//! number, and no message number may ever be used twice.

use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::process::ExitCode;

use uvmac::{authenticate, PadKeyStream, Vhash, HASH_KEY_BYTES, NH_BLOCK_BYTES, TAG_BITS, TAG_BYTES};

/// Streaming chunk size; a multiple of every permitted NH block size.
const BUF_LEN: usize = 3 * (1 << 20);

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        usage(args.first().map_or("authenticate", String::as_str));
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2], &args[3], &args[4]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn usage(program: &str) {
    eprintln!("This program creates a {TAG_BITS}-bit tag for a file");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("    {program} hashKeyFile padKeyFile inputFile messageNumber");
    eprintln!();
    eprintln!("  Parameters:");
    eprintln!("    hashKeyFile: key selecting the hash function, in binary format");
    eprintln!("      This file should contain {HASH_KEY_BYTES} bytes");
    eprintln!("    padKeyFile: key used for the one-time pad, in binary format");
    eprintln!("      This file should contain at least {TAG_BYTES}*messageNumber bytes");
    eprintln!("    inputFile: file to be authenticated");
    eprintln!("    messageNumber: a number >= 1 selecting the part of padKeyFile to use");
    eprintln!("      Like a nonce: no number should be used twice");
    eprintln!();
    eprintln!("  Output:");
    eprintln!("    A file <inputFile>.tag containing the tag in hexadecimal");
}

fn run(
    hash_key_path: &str,
    pad_key_path: &str,
    input_path: &str,
    message_number: &str,
) -> Result<(), String> {
    let number: u64 = message_number
        .parse()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or("message number should be an integer larger or equal to 1")?;

    let hash_key = fs::read(hash_key_path)
        .map_err(|e| format!("reading hash key file {hash_key_path} failed: {e}"))?;
    if hash_key.len() < HASH_KEY_BYTES {
        return Err(format!(
            "hash key file {hash_key_path} holds {} bytes, {HASH_KEY_BYTES} required",
            hash_key.len()
        ));
    }
    let mut ctx = Vhash::new(&hash_key[..HASH_KEY_BYTES]).map_err(|e| e.to_string())?;

    let pad_key = fs::read(pad_key_path)
        .map_err(|e| format!("reading pad key file {pad_key_path} failed: {e}"))?;
    let end = number
        .checked_mul(TAG_BYTES as u64)
        .ok_or("message number out of range")?;
    if (pad_key.len() as u64) < end {
        return Err(format!(
            "pad key file {pad_key_path} is too short for message number {number} \
             ({end} bytes required)"
        ));
    }
    let slice = &pad_key[(end as usize - TAG_BYTES)..end as usize];
    let mut pad = PadKeyStream::new(slice);

    let mut input = File::open(input_path)
        .map_err(|e| format!("opening input file {input_path} failed: {e}"))?;
    let total = input
        .metadata()
        .map_err(|e| format!("reading metadata of {input_path} failed: {e}"))?
        .len();

    debug_assert_eq!(BUF_LEN % NH_BLOCK_BYTES, 0);
    let mut buffer = vec![0u8; BUF_LEN];
    let mut left = total;
    let tag = loop {
        if left > BUF_LEN as u64 {
            input
                .read_exact(&mut buffer)
                .map_err(|e| format!("reading {input_path} failed: {e}"))?;
            ctx.update(&buffer).map_err(|e| e.to_string())?;
            left -= BUF_LEN as u64;
        } else {
            let take = left as usize;
            input
                .read_exact(&mut buffer[..take])
                .map_err(|e| format!("reading {input_path} failed: {e}"))?;
            break authenticate(&mut ctx, &buffer[..take], &mut pad)
                .map_err(|e| e.to_string())?;
        }
    };

    let tag_path = format!("{input_path}.tag");
    fs::write(&tag_path, format!("{tag}\n"))
        .map_err(|e| format!("writing tag file {tag_path} failed: {e}"))?;
    Ok(())
}
