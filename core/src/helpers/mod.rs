// Copyright (c) 2022-2023 The Beam Developers

use core::str::from_utf8;

use emstr::{helpers::Fractional, EncodeStr};

/// Display scalar for BEAM values (nine decimal places)
pub const SCALAR_BEAM: i64 = 1_000_000_000;

/// Format a BEAM value for display
pub fn fmt_beam_amount(value: u64, buff: &mut [u8]) -> &str {
    let value = match i64::try_from(value) {
        Ok(v) => v,
        Err(_) => return "ENCODE_ERR",
    };

    // Compute and write value using scalar
    let mut n = match emstr::write!(&mut buff[..], Fractional::<i64>::new(value, SCALAR_BEAM)) {
        Ok(v) => v,
        Err(_) => return "ENCODE_ERR",
    };

    // NOTE unit strings are hardcoded
    match emstr::write!(&mut buff[n..], " BEAM") {
        Ok(v) => n += v,
        Err(_) => return "ENCODE_ERR",
    }

    match from_utf8(&buff[..n]) {
        Ok(v) => v,
        Err(_) => "INVALID_UTF8",
    }
}

/// Format an unsigned integer for display
pub fn fmt_u64(value: u64, buff: &mut [u8]) -> &str {
    let n = match emstr::write!(&mut buff[..], value) {
        Ok(v) => v,
        Err(_) => return "ENCODE_ERR",
    };

    match from_utf8(&buff[..n]) {
        Ok(v) => v,
        Err(_) => "INVALID_UTF8",
    }
}
