use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const WHATSAPP_NUMBER: &str = "6285168888877";

// Characters left as-is by JavaScript's encodeURIComponent.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// wa.me link to the store's WhatsApp, optionally with a pre-filled message.
pub fn whatsapp_url(message: &str) -> String {
    if message.is_empty() {
        return format!("https://wa.me/{}", WHATSAPP_NUMBER);
    }
    format!(
        "https://wa.me/{}?text={}",
        WHATSAPP_NUMBER,
        utf8_percent_encode(message, URI_COMPONENT)
    )
}
