use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode the `data:<mime>;base64,<payload>` URLs the API uses for
/// message and item images.
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;
    STANDARD.decode(payload).ok()
}

/// Turn a server image payload into a renderable handle. `None` when the
/// payload is not a well-formed data URL; the view falls back to a
/// placeholder.
pub fn image_handle(url: &str) -> Option<iced::widget::image::Handle> {
    decode_data_url(url).map(iced::widget::image::Handle::from_memory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_data_url_decodes() {
        let url = "data:image/png;base64,aGVsbG8=";
        assert_eq!(decode_data_url(url), Some(b"hello".to_vec()));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert_eq!(decode_data_url("https://example.com/x.png"), None);
        assert_eq!(decode_data_url("data:image/png,rawbytes"), None);
        assert_eq!(decode_data_url("data:image/png;base64,???"), None);
    }
}
