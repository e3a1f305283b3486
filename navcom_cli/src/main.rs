use anyhow::{Context, Result};
use navcom::{
    DeviceFile, Error, MessageFlags, Pvt1b, Record, SerialTransport, Session, SessionConfig,
    Transport,
};
use tracing::{info, warn};

mod cli;
mod logging;

struct Poll<'a> {
    command: &'a str,
    count: u64,
    json: bool,
}

fn main() -> Result<()> {
    logging::initialize();
    let matches = cli::parse_args().get_matches();
    let config = cli::session_config(&matches);

    let poll = Poll {
        command: matches
            .get_one::<String>("command")
            .map(String::as_str)
            .unwrap_or("[PVT1B]"),
        count: matches.get_one::<u64>("count").copied().unwrap_or(1),
        json: matches.get_flag("json"),
    };

    if let Some(port) = matches.get_one::<String>("serial") {
        let baud = matches.get_one::<u32>("baud").copied().unwrap_or(115200);
        info!(%port, baud, "opening serial port");
        run(SerialTransport::new(port.as_str(), baud), config, &poll)
    } else {
        let path = matches
            .get_one::<String>("device")
            .context("no device path given")?;
        info!(%path, "opening device");
        run(DeviceFile::new(path.as_str()), config, &poll)
    }
}

fn run<T: Transport>(transport: T, config: SessionConfig, poll: &Poll) -> Result<()> {
    let mut session = Session::connect(transport, config).context("could not open receiver")?;

    let mut round = 0u64;
    while poll.count == 0 || round < poll.count {
        round += 1;
        session
            .write_command(poll.command.as_bytes())
            .context("could not send command")?;

        match session.read_message() {
            Ok(_) => {},
            Err(e @ (Error::IntegrityFailure { .. } | Error::MalformedMessage(_))) => {
                warn!(round, error = %e, "dropped message");
                continue;
            },
            Err(e) => return Err(e).context("could not read response"),
        }
        if session.flags().contains(MessageFlags::CHECKSUM_FAILED) {
            warn!(round, "printing message with a bad checksum");
        }
        print_record(&session, poll.json)?;
    }
    session.close();
    Ok(())
}

fn print_record<T: Transport>(session: &Session<T>, json: bool) -> Result<()> {
    match session.record()? {
        Record::Pvt1b(pvt) => {
            let solution = pvt.to_solution();
            if json {
                println!("{}", serde_json::to_string(&solution)?);
            } else {
                println!(
                    "{} lat {:.9} lon {:.9} vel n {:.3} e {:.3} u {:.3}",
                    Pvt1b::MNEMONIC,
                    solution.latitude,
                    solution.longitude,
                    solution.velocity.north,
                    solution.velocity.east,
                    solution.velocity.up,
                );
            }
        },
        Record::Other { mnemonic, message } => {
            if json {
                let value = serde_json::json!({ "mnemonic": mnemonic, "len": message.len() });
                println!("{value}");
            } else {
                println!("{} ({} bytes)", mnemonic, message.len());
            }
        },
    }
    Ok(())
}
