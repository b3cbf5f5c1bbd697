//! MIME-type to blob-extension mapping for uploaded audio.

/// File extension for a supported audio MIME type.
///
/// The extension is appended to the server-generated blob name so stored
/// objects stay recognizable; unknown types get no extension rather than
/// being rejected, since the metadata row records the exact MIME type.
pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    let ext = match base.as_str() {
        "audio/mpeg" | "audio/mp3" => ".mp3",
        "audio/wav" | "audio/x-wav" | "audio/wave" => ".wav",
        "audio/ogg" => ".ogg",
        "audio/flac" | "audio/x-flac" => ".flac",
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" => ".m4a",
        "audio/aac" => ".aac",
        "audio/webm" => ".webm",
        _ => return None,
    };
    Some(ext)
}
