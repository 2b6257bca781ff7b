//! Streaming CZML writing.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes a CZML document (a JSON array of packets) one packet at a time.
pub(crate) struct CzmlWriter<W: Write> {
    writer: W,
    pretty: bool,
    packets: usize,
}

impl<W: Write> CzmlWriter<W> {
    /// Start a document by writing the opening bracket.
    pub(crate) fn new(mut writer: W, pretty: bool) -> Result<Self> {
        writer.write_all(b"[")
            .context("[czml::writer] Failed to start document")?;
        Ok(Self { writer, pretty, packets: 0 })
    }

    /// Append one packet to the array.
    pub(crate) fn write_packet<P: Serialize>(&mut self, packet: &P) -> Result<()> {
        let separator: &[u8] = if self.packets == 0 { b"\n" } else { b",\n" };
        self.writer.write_all(separator)
            .context("[czml::writer] Failed to write packet separator")?;
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, packet)
        } else {
            serde_json::to_writer(&mut self.writer, packet)
        };
        written.with_context(|| format!("[czml::writer] Failed to write packet {}", self.packets))?;
        self.packets += 1;
        Ok(())
    }

    /// Number of packets written so far.
    pub(crate) fn packets(&self) -> usize { self.packets }

    /// Close the array, flush, and hand back the underlying writer.
    pub(crate) fn finish(mut self) -> Result<W> {
        self.writer.write_all(b"\n]\n")
            .context("[czml::writer] Failed to close document")?;
        self.writer.flush()
            .context("[czml::writer] Failed to flush document")?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn empty_document_is_an_empty_array() {
        let bytes = CzmlWriter::new(Vec::new(), false).unwrap().finish().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn packets_form_one_array() {
        for pretty in [false, true] {
            let mut writer = CzmlWriter::new(Vec::new(), pretty).unwrap();
            writer.write_packet(&json!({ "id": "document" })).unwrap();
            writer.write_packet(&json!({ "id": "Division/Aston", "name": "Aston" })).unwrap();
            assert_eq!(writer.packets(), 2);

            let value: Value = serde_json::from_slice(&writer.finish().unwrap()).unwrap();
            assert_eq!(value, json!([{ "id": "document" }, { "id": "Division/Aston", "name": "Aston" }]));
        }
    }
}
