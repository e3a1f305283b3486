#[macro_use]
extern crate afl;
extern crate navcom;

use std::io::Cursor;

use navcom::{
    parser::checksum,
    records::{self, Record},
    MessageFramer, ReceiveBuffer,
};

fn decode_stream(bufsize: usize, chunksize: usize, data: &[u8]) {
    let mut reader = Cursor::new(data);
    let mut framer = MessageFramer::new(chunksize);
    let mut buf = ReceiveBuffer::with_capacity(bufsize);

    // Every outcome is acceptable as long as nothing panics
    while framer.read_message(&mut reader, &mut buf).is_ok() {
        let _ = checksum::verify(&buf);
        if let Ok(Record::Pvt1b(pvt)) = records::decode(&buf) {
            let solution = pvt.to_solution();
            assert!(solution.latitude.is_finite());
            assert!(solution.longitude.is_finite());
        }
    }

    // A well-formed message after the garbage must still come through
    let mut ok = b"[OK]".to_vec();
    checksum::append_trailer(&mut ok);
    let mut reader = Cursor::new(&ok);
    let len = framer.read_message(&mut reader, &mut buf).unwrap();
    assert_eq!(len, ok.len());
    assert!(checksum::verify(&buf).is_ok());
    assert_eq!(records::decode(&buf).unwrap().mnemonic(), "[OK]");
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let bufsize = 16 + data[0] as usize * 16;
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                decode_stream(bufsize, chunksize, &data[2..]);
            }
        }
    });
}
