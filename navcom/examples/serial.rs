#[cfg(feature = "serialport")]
mod serial {
    use std::time::Duration;

    use navcom::{Error, SerialTransport, Session, SessionConfig};

    pub fn main() -> navcom::Result<()> {
        let transport =
            SerialTransport::new("/dev/ttyUSB0", 115200).with_timeout(Duration::from_secs(2));
        let mut session = Session::connect(transport, SessionConfig::default())?;

        loop {
            session.write_command(b"[PVT1B]")?;
            match session.read_message() {
                Ok(_) => println!("{:?}", session.pvt1b()?.to_solution()),
                Err(e @ Error::IntegrityFailure { .. }) => println!("Dropped message: {e}"),
                Err(e) => return Err(e),
            }
        }
    }
}

fn main() {
    #[cfg(feature = "serialport")]
    if let Err(e) = serial::main() {
        eprintln!("{e}");
    }
}
