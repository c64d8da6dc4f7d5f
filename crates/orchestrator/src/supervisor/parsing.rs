// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared text normalization for both the planner and decision-analyzer
//! responses (§4.8.1, §4.8.3): strip markdown code fences a model may wrap
//! its JSON response in before either one runs its own JSON parse.

/// Strips a leading/trailing ``` fence, with or without a language tag
/// (```json, ```, etc), leaving the inner text untouched otherwise.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_prefix('\n').unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// If `text` parses as a JSON array of strings, joins them with a blank
/// line to recover a single text blob — some model responses arrive as
/// separate content-block chunks rather than one string (§4.8.1 "tolerant
/// ... to arrays where strings are expected").
pub fn join_if_string_array(text: &str) -> Option<String> {
    serde_json::from_str::<Vec<String>>(text).ok().map(|chunks| chunks.join("\n\n"))
}

#[cfg(test)]
#[path = "parsing_tests.rs"]
mod tests;
