//
//  gerrit-client
//  util.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/23.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Small helpers shared across the resource modules.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters is escaped, so a
/// file path embeds into an endpoint as a single opaque segment
/// (`src/main.rs` -> `src%2Fmain.rs`).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a file path for use as one endpoint path segment.
pub(crate) fn escape_path_segment(path: &str) -> String {
    utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

/// Removes any trailing slashes from a base URL.
pub(crate) fn strip_trailing_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}
