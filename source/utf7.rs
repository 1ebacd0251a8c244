// https://www.courier-mta.org/imap/README.maildirquota.html
// https://www.rfc-editor.org/rfc/rfc3501#section-5.1.3
//
// Courier-IMAP (like most IMAP servers backed by Maildir++) stores folder names as they travel on
// the wire: in modified UTF-7. A folder created as "Entwürfe" ends up as ".Entw&APw-rfe" on disk.

use base64::Engine as _;
use std::borrow;

pub fn decode(input: &str) -> Option<String> {
  let engine = base64::engine::GeneralPurpose::new(
    &base64::alphabet::IMAP_MUTF7,
    base64::engine::general_purpose::NO_PAD,
  );
  let mut buffer = Vec::new();
  let mut output = String::with_capacity(input.len());
  let mut rest = input;
  while let Some(start) = rest.find('&') {
    output.push_str(&rest[..start]);
    let shifted = &rest[start + 1..];
    // "&" is used to shift to modified BASE64 and "-" to shift back to US-ASCII.
    let end = shifted.find('-')?;
    if end == 0 {
      // The character "&" (0x26) is represented by the two-octet sequence "&-".
      output.push('&');
    } else {
      // https://www.rfc-editor.org/rfc/rfc2152
      // Unicode is encoded using Modified Base64 by first converting Unicode 16-bit quantities to
      // an octet stream (with the most significant octet first).
      buffer.truncate(0);
      engine.decode_vec(&shifted[..end], &mut buffer).ok()?;
      let mut decoder = encoding_rs::UTF_16BE.new_decoder_without_bom_handling();
      output
        .try_reserve(decoder.max_utf8_buffer_length_without_replacement(buffer.len())?)
        .ok()?;
      let (result, _) = decoder.decode_to_string_without_replacement(
        &buffer,
        &mut output,
        true, // last
      );
      match result {
        encoding_rs::DecoderResult::InputEmpty => (),
        _ => return None,
      }
    }
    rest = &shifted[end + 1..];
  }
  // Anything outside of the shifted sequences is kept as is: servers configured for UTF-8 folder
  // names (e.g. Dovecot's UTF-8 layout option) write them unencoded.
  output.push_str(rest);
  Some(output)
}

// Falls back to the raw name when it isn't valid modified UTF-7.
pub fn display(name: &str) -> borrow::Cow<'_, str> {
  if !name.contains('&') {
    return borrow::Cow::Borrowed(name);
  }
  match decode(name) {
    Some(decoded) => borrow::Cow::Owned(decoded),
    None => borrow::Cow::Borrowed(name),
  }
}
