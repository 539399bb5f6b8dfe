use std::io;

use bitweave::{Error, Packer, Packet, Reader, Sizer, Unpacker, Writer};

#[derive(Debug, Default, PartialEq)]
struct Datagram {
    version: u8,
    ack: bool,
    urgent: bool,
    kind: u8,
    sequence: u16,
    payload: Vec<u8>,
}

impl Sizer for Datagram {
    fn size(&self) -> usize {
        // 24 bits of header fields, a 16-bit length and the payload.
        3 + 2 + self.payload.len()
    }
}

impl Packer for Datagram {
    fn read_bits<R: io::Read>(&mut self, reader: &mut Reader<R>) {
        self.version = reader.read_u8(3);
        self.ack = reader.read_bool();
        self.urgent = reader.read_bool();
        self.kind = reader.read_u8(5);
        self.sequence = reader.read_u16(14);

        let len = reader.read_u16(16) as usize;
        self.payload.resize(len, 0);
        reader.read(&mut self.payload);
    }
}

impl Unpacker for Datagram {
    fn write_bits<W: io::Write>(&self, writer: &mut Writer<W>) {
        writer.write_u8(self.version, 3);
        writer.write_bool(self.ack);
        writer.write_bool(self.urgent);
        writer.write_u8(self.kind, 5);
        writer.write_u16(self.sequence, 14);

        writer.write_u16(self.payload.len() as u16, 16);
        writer.write(&self.payload);
    }
}

fn sample() -> Datagram {
    Datagram {
        version: 5,
        ack: true,
        urgent: false,
        kind: 0x11,
        sequence: 0x1234,
        payload: vec![0xAA, 0xBB],
    }
}

const SAMPLE_BYTES: [u8; 7] = [0xB4, 0x52, 0x34, 0x00, 0x02, 0xAA, 0xBB];

#[test]
fn encode_layout() -> Result<(), Error> {
    let bytes = sample().to_vec()?;
    assert_eq!(bytes, SAMPLE_BYTES);

    Ok(())
}

#[test]
fn decode_layout() -> Result<(), Error> {
    let mut datagram = Datagram::default();
    let consumed = datagram.read_from(&SAMPLE_BYTES)?;

    assert_eq!(consumed, SAMPLE_BYTES.len());
    assert_eq!(datagram, sample());

    Ok(())
}

#[test]
fn decode_with_strict_reader() {
    let mut reader = Reader::from_buffer(&SAMPLE_BYTES);
    let mut datagram = Datagram::default();
    datagram.read_bits(&mut reader);

    assert_eq!(datagram, sample());
    assert!(reader.is_aligned());
}

#[test]
fn truncated_input_is_reported() {
    let mut datagram = Datagram::default();
    let err = datagram
        .read_from(&SAMPLE_BYTES[..SAMPLE_BYTES.len() - 1])
        .unwrap_err();

    assert!(err.is_exhausted());
}

#[test]
fn undersized_output_is_reported() {
    let mut buf = [0; 4];
    let err = sample().write_to(&mut buf).unwrap_err();

    assert!(err.is_exhausted());
}

#[test]
fn size_matches_encoding() -> Result<(), Error> {
    let mut datagram = sample();
    datagram.payload = (0..=255).collect();

    let bytes = datagram.to_vec()?;
    assert_eq!(bytes.len(), datagram.size());

    Ok(())
}
