// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! URL-safe base64 decoding for compact token segments.
//!
//! Token segments arrive without padding. They are re-padded from their length
//! and decoded with the standard alphabet, so any byte the standard engine
//! rejects is rejected here too.

use base64::{engine::general_purpose::STANDARD, Engine};

/// A segment was not valid unpadded base64url, or did not decode to UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("segment is not valid base64url text")]
pub struct DecodeError;

/// Decode an unpadded base64url segment into UTF-8 text.
pub fn decode_url_safe(segment: &str) -> Result<String, DecodeError> {
    if segment.contains('=') {
        return Err(DecodeError);
    }

    let padding = match segment.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err(DecodeError),
    };

    let mut standard = String::with_capacity(segment.len() + padding.len());
    standard.extend(segment.chars().map(|c| match c {
        '-' => '+',
        '_' => '/',
        other => other,
    }));
    standard.push_str(padding);

    let bytes = STANDARD.decode(standard).map_err(|_| DecodeError)?;
    String::from_utf8(bytes).map_err(|_| DecodeError)
}
