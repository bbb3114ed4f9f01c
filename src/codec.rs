use bytes::{Buf, BytesMut};
use std::io;
use tokio_util::codec::Decoder;

/// Splits the AQUOS response stream into lines.
///
/// The protocol terminates responses with a carriage return, but real
/// devices also emit line feeds, and login prompts end in a bare colon
/// (`Login:`). All three act as separators and are stripped from the
/// decoded text.
pub(crate) struct LineCodec;

fn is_separator(b: u8) -> bool {
    matches!(b, b'\r' | b'\n' | b':')
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, io::Error> {
        // Drop separators left over from the previous line.
        let start = src
            .iter()
            .position(|b| !is_separator(*b))
            .unwrap_or(src.len());
        src.advance(start);

        match src.iter().position(|b| is_separator(*b)) {
            Some(end) => {
                let line = src.split_to(end);
                src.advance(1);
                Ok(Some(String::from_utf8_lossy(&line).into_owned()))
            }
            // Partial line, wait for more data.
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, io::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            // Unterminated trailing content becomes one final line.
            None => {
                let line = src.split_to(src.len());
                Ok(Some(String::from_utf8_lossy(&line).into_owned()))
            }
        }
    }
}
