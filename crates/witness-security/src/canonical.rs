// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canonical payload encoding — the exact bytes that get hashed and signed.
//
// Rules:
//   * object members sorted byte-wise by key, arrays keep their order
//   * numbers in one textual form (integers as-is, floats in the
//     ECMAScript `JSON.stringify` shortest round-trip form, -0 as 0)
//   * strings UTF-8 with minimal JSON escaping
//   * an omitted member is not emitted; an explicit `null` member is
//     emitted as `null`, so the two hash differently
//   * non-finite numbers are an encoding error

use std::fmt::Write as _;

use serde_json::{Number, Value};
use witness_bridge::CryptoProvider;
use witness_bridge::traits::DIGEST_LEN;
use witness_core::error::{Result, WitnessError};

/// Canonical byte encoding of `value`.
pub fn canonicalize(value: &Value) -> Result<Vec<u8>> {
    canonicalize_to_string(value).map(String::into_bytes)
}

/// Canonical encoding of `value` as text.
pub fn canonicalize_to_string(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// `SHA-256(canonicalize(value))` — the quantity every proof covers.
pub fn canonical_hash<P: CryptoProvider + ?Sized>(
    provider: &P,
    value: &Value,
) -> Result<[u8; DIGEST_LEN]> {
    let bytes = canonicalize(value)?;
    Ok(provider.sha256(&bytes))
}

/// Lowercase hex of [`canonical_hash`].
pub fn canonical_hash_hex<P: CryptoProvider + ?Sized>(provider: &P, value: &Value) -> Result<String> {
    canonical_hash(provider, value).map(hex::encode)
}

/// Build a JSON number from a float, refusing NaN and the infinities.
///
/// `serde_json::Value` cannot hold a non-finite number, and `json!` silently
/// turns one into `null`.  Payload builders that start from an `f64` go
/// through here instead so the problem surfaces as an error.
pub fn canonical_number(v: f64) -> Result<Value> {
    Number::from_f64(v)
        .map(Value::Number)
        .ok_or(WitnessError::NonFiniteNumber)
}

fn write_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, n)?,
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut members: Vec<_> = map.iter().collect();
            members.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

            out.push('{');
            for (idx, (key, member)) in members.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, member)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_number(out: &mut String, n: &Number) -> Result<()> {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "{i}");
        return Ok(());
    }
    if let Some(u) = n.as_u64() {
        let _ = write!(out, "{u}");
        return Ok(());
    }
    match n.as_f64() {
        Some(f) => write_f64(out, f),
        None => Err(WitnessError::Canonicalization(format!(
            "unrepresentable number: {n}"
        ))),
    }
}

/// ECMAScript Number-to-String over `ryu`'s shortest digits.
fn write_f64(out: &mut String, v: f64) -> Result<()> {
    if !v.is_finite() {
        return Err(WitnessError::NonFiniteNumber);
    }
    if v == 0.0 {
        out.push('0');
        return Ok(());
    }
    if v.is_sign_negative() {
        out.push('-');
    }

    let mut buf = ryu::Buffer::new();
    let (digits, point) = decimal_digits(buf.format_finite(v.abs()))?;
    let k = digits.len() as i32;

    if k <= point && point <= 21 {
        // Integer with trailing zeros.
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (point - k) as usize));
    } else if 0 < point && point <= 21 {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-point) as usize));
        out.push_str(&digits);
    } else {
        let exp = point - 1;
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let _ = write!(out, "e{}{}", if exp >= 0 { "+" } else { "-" }, exp.abs());
    }
    Ok(())
}

/// Split a positive decimal rendering into significant digits and the
/// position of the decimal point relative to the first of them, so that
/// the value is `0.<digits> * 10^point`.
fn decimal_digits(rendered: &str) -> Result<(String, i32)> {
    let (mantissa, exp) = match rendered.split_once(['e', 'E']) {
        Some((m, e)) => {
            let exp: i32 = e.parse().map_err(|_| {
                WitnessError::Canonicalization(format!("bad exponent in {rendered}"))
            })?;
            (m, exp)
        }
        None => (rendered, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all: String = int_part.chars().chain(frac_part.chars()).collect();
    let leading = all.len() - all.trim_start_matches('0').len();
    let digits = all.trim_start_matches('0').trim_end_matches('0');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WitnessError::Canonicalization(format!(
            "bad float rendering: {rendered}"
        )));
    }

    let point = int_part.len() as i32 + exp - leading as i32;
    Ok((digits.to_owned(), point))
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
