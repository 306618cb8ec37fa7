//! Line-oriented intent source: maps one line of text to an [`Intent`].

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::events::Intent;
use crate::geometry::WindowGeometry;

pub fn parse_intent(line: &str) -> Option<Intent> {
    let line = line.trim();
    if line.starts_with("file://") {
        return open_request(line);
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    match command {
        "" | "n" | "next" => Some(Intent::NextRequested),
        "p" | "prev" | "previous" => Some(Intent::PreviousRequested),
        "s" | "start" => Some(Intent::AutoAdvanceArmed),
        "a" | "stop" => Some(Intent::AutoAdvanceDisarmed),
        "o" | "open" => open_request(rest),
        "geometry" => parse_geometry(rest).map(Intent::ViewportChanged),
        _ => None,
    }
}

fn open_request(target: &str) -> Option<Intent> {
    let path = path_from_uri(target.trim());
    if path.as_os_str().is_empty() {
        return None;
    }
    Some(Intent::OpenRequested(path))
}

/// Drag-and-drop payloads carry percent-encoded `file://` URIs, optionally
/// naming `localhost`. Plain paths pass through untouched.
pub fn path_from_uri(target: &str) -> PathBuf {
    let Some(rest) = target.strip_prefix("file://") else {
        return PathBuf::from(target);
    };
    let encoded = rest.strip_prefix("localhost").unwrap_or(rest);
    match percent_decode_str(encoded).decode_utf8() {
        Ok(decoded) => PathBuf::from(decoded.into_owned()),
        Err(err) => {
            debug!(uri = target, "keeping undecodable uri as is: {err}");
            PathBuf::from(encoded)
        }
    }
}

fn parse_geometry(args: &str) -> Option<WindowGeometry> {
    let mut fields = args.split_whitespace();
    let geometry = WindowGeometry {
        x: fields.next()?.parse().ok()?,
        y: fields.next()?.parse().ok()?,
        w: fields.next()?.parse().ok()?,
        h: fields.next()?.parse().ok()?,
    };
    if fields.next().is_some() || geometry.w == 0 || geometry.h == 0 {
        return None;
    }
    Some(geometry)
}
