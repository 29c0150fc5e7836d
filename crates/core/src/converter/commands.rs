//! Argument vectors for the decoder and encoder.
//!
//! Every value, tags included, is a separate argv element; nothing is ever
//! routed through a shell.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use super::config::ConverterConfig;
use crate::tags::{TagField, TagSet};

/// Encoder flags for each embeddable tag, in emission order.
const ENCODER_TAG_FLAGS: [(TagField, &str); 6] = [
    (TagField::Album, "--tl"),
    (TagField::Artist, "--ta"),
    (TagField::DiscNumber, "--tv"),
    (TagField::Title, "--tt"),
    (TagField::TrackNumber, "--tn"),
    (TagField::Year, "--ty"),
];

/// Builds decoder arguments: read `source`, write the intermediate
/// stream to stdout.
pub fn decode_args(config: &ConverterConfig, source: &Path) -> Vec<OsString> {
    vec![
        "-nostdin".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        config.decoder_log_level.clone().into(),
        "-i".into(),
        source.as_os_str().to_os_string(),
        "-f".into(),
        config.intermediate_format.clone().into(),
        "-".into(),
    ]
}

/// Builds encoder arguments: read stdin, write `destination` (always last).
pub fn encode_args(config: &ConverterConfig, tags: &TagSet, destination: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-V".into(), config.encoder_quality.to_string().into()];
    args.extend(tag_args(tags));
    args.extend(config.extra_encoder_args.iter().map(OsString::from));
    args.push("-".into());
    args.push(destination.as_os_str().to_os_string());
    args
}

/// Encoder metadata options for the tags present in `tags`.
///
/// The disc number goes into the ID3 disc-position frame.
pub fn tag_args(tags: &TagSet) -> Vec<OsString> {
    let mut args = Vec::new();
    for (field, flag) in ENCODER_TAG_FLAGS {
        let Some(value) = tags.get(field) else {
            continue;
        };
        args.push(OsString::from(flag));
        if field == TagField::DiscNumber {
            args.push(OsString::from(format!("TPOS={}", value)));
        } else {
            args.push(OsString::from(value));
        }
    }
    args
}

/// Human-readable rendering of a command line for diagnostics.
pub fn describe(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(render)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render(arg: &OsStr) -> String {
    let text = arg.to_string_lossy();
    if text.is_empty() || text.contains(char::is_whitespace) {
        format!("'{}'", text)
    } else {
        text.into_owned()
    }
}
